use chrono::{DateTime, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// One recorded food intake event.
///
/// `calories`, `protein`, `carbs` and `fat` are always per-100g base
/// values; the actual intake is derived by scaling with `grams`
/// (`actual_*` methods). A meal stored in the saved-foods catalog keeps
/// the same shape but its `date` carries no meaning there.
///
/// No numeric validation happens at this layer; callers are expected to
/// hand in well-formed values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Meal {
    pub id: Uuid,
    pub name: String,
    pub korean_name: Option<String>,
    /// kcal per 100g.
    pub calories: f64,
    /// Grams per 100g.
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    /// Actual serving size consumed, in grams.
    pub grams: f64,
    pub image_uri: Option<String>,
    pub date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Meal {
    /// Creates a meal dated today (local time).
    pub fn new(
        name: impl Into<String>,
        calories: f64,
        protein: f64,
        carbs: f64,
        fat: f64,
        grams: f64,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            korean_name: None,
            calories,
            protein,
            carbs,
            fat,
            grams,
            image_uri: None,
            date: Local::now().date_naive(),
            created_at: Utc::now(),
        }
    }

    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = date;
        self
    }

    pub fn with_korean_name(mut self, korean_name: impl Into<String>) -> Self {
        self.korean_name = Some(korean_name.into());
        self
    }

    pub fn with_image_uri(mut self, image_uri: impl Into<String>) -> Self {
        self.image_uri = Some(image_uri.into());
        self
    }

    /// kcal actually consumed, rounded to a whole number.
    pub fn actual_calories(&self) -> f64 {
        (self.calories * self.grams / 100.0).round()
    }

    /// Grams of protein actually consumed (unrounded).
    pub fn actual_protein(&self) -> f64 {
        self.protein * self.grams / 100.0
    }

    pub fn actual_carbs(&self) -> f64 {
        self.carbs * self.grams / 100.0
    }

    pub fn actual_fat(&self) -> f64 {
        self.fat * self.grams / 100.0
    }
}

impl fmt::Display for Meal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if let Some(korean) = &self.korean_name {
            write!(f, " ({})", korean)?;
        }
        write!(
            f,
            " - {:.0}g: {:.0} kcal, P {:.1}g / C {:.1}g / F {:.1}g",
            self.grams,
            self.actual_calories(),
            self.actual_protein(),
            self.actual_carbs(),
            self.actual_fat()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meal_new_defaults() {
        let meal = Meal::new("Bibimbap", 150.0, 6.0, 20.0, 4.5, 350.0);
        assert_eq!(meal.name, "Bibimbap");
        assert_eq!(meal.date, Local::now().date_naive());
        assert!(meal.korean_name.is_none());
        assert!(meal.image_uri.is_none());
    }

    #[test]
    fn test_meal_builder() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let meal = Meal::new("Kimchi Stew", 80.0, 5.0, 7.0, 3.0, 400.0)
            .with_date(date)
            .with_korean_name("김치찌개")
            .with_image_uri("file:///photos/stew.jpg");

        assert_eq!(meal.date, date);
        assert_eq!(meal.korean_name.as_deref(), Some("김치찌개"));
        assert_eq!(meal.image_uri.as_deref(), Some("file:///photos/stew.jpg"));
    }

    #[test]
    fn test_identity_scaling_at_100g() {
        // 100g is the identity point: actual calories == per-100g value
        let meal = Meal::new("Apple", 52.0, 0.3, 14.0, 0.2, 100.0);
        assert_eq!(meal.actual_calories(), 52.0_f64.round());
        assert_eq!(meal.actual_protein(), 0.3);
        assert_eq!(meal.actual_carbs(), 14.0);
        assert_eq!(meal.actual_fat(), 0.2);
    }

    #[test]
    fn test_actual_calories_scaled_and_rounded() {
        let meal = Meal::new("Rice", 130.0, 2.7, 28.0, 0.3, 210.0);
        // 130 * 2.1 = 273
        assert_eq!(meal.actual_calories(), 273.0);
        // macros stay unrounded
        assert!((meal.actual_protein() - 5.67).abs() < 1e-9);
    }

    #[test]
    fn test_meal_display() {
        let meal = Meal::new("Bulgogi", 200.0, 18.0, 5.0, 12.0, 150.0).with_korean_name("불고기");
        let output = format!("{}", meal);
        assert!(output.contains("Bulgogi"));
        assert!(output.contains("불고기"));
        assert!(output.contains("300 kcal"));
    }

    #[test]
    fn test_meal_json_roundtrip() {
        let meal = Meal::new("Salad", 35.0, 1.2, 6.0, 0.5, 180.0)
            .with_date(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let json = serde_json::to_string(&meal).unwrap();
        let parsed: Meal = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, meal);
    }
}
