use serde::{Deserialize, Serialize};

use super::macros::MacroSet;

/// Default daily calorie goal for a fresh profile.
pub const DEFAULT_CALORIES: f64 = 2000.0;

/// How `calories_left` reports an over-target day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaloriesLeftPolicy {
    /// Never report below zero (overage is discarded).
    #[default]
    Clamp,
    /// Report the overage as a negative figure.
    Signed,
}

/// User-configured goal state: the calorie target and macro goals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    pub total_calories: f64,
    pub macros: MacroSet,
    #[serde(default)]
    pub calories_left: CaloriesLeftPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            total_calories: DEFAULT_CALORIES,
            macros: MacroSet::for_calories(DEFAULT_CALORIES),
            calories_left: CaloriesLeftPolicy::default(),
        }
    }
}
