//! Macrolog Core Library
//!
//! Domain models, the nutrition tracking engine, and the storage
//! contract shared by Macrolog frontends.

pub mod error;
pub mod models;
pub mod store;
pub mod tracker;

pub use error::{StoreError, TrackerError};
pub use models::{CaloriesLeftPolicy, Macro, MacroSet, Meal, Nutrient, Settings, DEFAULT_CALORIES};
pub use store::{MemoryStore, NutritionStore};
pub use tracker::{ConsumedMacros, NutritionTracker};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
