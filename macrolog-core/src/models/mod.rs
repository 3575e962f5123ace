mod macros;
mod meal;
mod nutrient;
mod settings;

pub use macros::{Macro, MacroSet};
pub use meal::Meal;
pub use nutrient::Nutrient;
pub use settings::{CaloriesLeftPolicy, Settings, DEFAULT_CALORIES};
