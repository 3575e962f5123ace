use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three tracked macronutrients.
///
/// Macros are keyed by this enum throughout the core; an ordered
/// Protein/Carbs/Fat view exists only at the presentation boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Nutrient {
    Protein,
    Carbs,
    Fat,
}

impl Nutrient {
    /// All nutrients in display order.
    pub const ALL: [Nutrient; 3] = [Nutrient::Protein, Nutrient::Carbs, Nutrient::Fat];

    /// Energy density in kcal per gram.
    pub fn kcal_per_gram(&self) -> f64 {
        match self {
            Nutrient::Protein => 4.0,
            Nutrient::Carbs => 4.0,
            Nutrient::Fat => 9.0,
        }
    }

    /// Progress bar color used by clients.
    pub fn color(&self) -> &'static str {
        match self {
            Nutrient::Protein => "#FF6B6B",
            Nutrient::Carbs => "#FFB169",
            Nutrient::Fat => "#4DABF7",
        }
    }
}

impl fmt::Display for Nutrient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Nutrient::Protein => write!(f, "Protein"),
            Nutrient::Carbs => write!(f, "Carbs"),
            Nutrient::Fat => write!(f, "Fat"),
        }
    }
}

impl FromStr for Nutrient {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "protein" => Ok(Nutrient::Protein),
            "carbs" | "carb" | "carbohydrates" => Ok(Nutrient::Carbs),
            "fat" | "fats" => Ok(Nutrient::Fat),
            _ => Err(format!(
                "Invalid nutrient '{}'. Valid options: protein, carbs, fat",
                s
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nutrient_display() {
        assert_eq!(format!("{}", Nutrient::Protein), "Protein");
        assert_eq!(format!("{}", Nutrient::Carbs), "Carbs");
        assert_eq!(format!("{}", Nutrient::Fat), "Fat");
    }

    #[test]
    fn test_nutrient_from_str() {
        assert_eq!(Nutrient::from_str("protein").unwrap(), Nutrient::Protein);
        assert_eq!(Nutrient::from_str("CARBS").unwrap(), Nutrient::Carbs);
        assert_eq!(Nutrient::from_str("fats").unwrap(), Nutrient::Fat);
    }

    #[test]
    fn test_nutrient_from_str_invalid() {
        assert!(Nutrient::from_str("fiber").is_err());
        assert!(Nutrient::from_str("").is_err());
    }

    #[test]
    fn test_kcal_per_gram() {
        assert_eq!(Nutrient::Protein.kcal_per_gram(), 4.0);
        assert_eq!(Nutrient::Carbs.kcal_per_gram(), 4.0);
        assert_eq!(Nutrient::Fat.kcal_per_gram(), 9.0);
    }

    #[test]
    fn test_nutrient_json_roundtrip() {
        let json = serde_json::to_string(&Nutrient::Carbs).unwrap();
        assert_eq!(json, "\"carbs\"");

        let parsed: Nutrient = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, Nutrient::Carbs);
    }
}
