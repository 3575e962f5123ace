use serde::{Deserialize, Serialize};
use std::fmt;

use super::nutrient::Nutrient;

/// Calorie ratio split used when deriving macro goals from a calorie
/// target: 50% carbs, 30% protein, 20% fat.
const RATIO_CARBS: f64 = 5.0;
const RATIO_PROTEIN: f64 = 3.0;
const RATIO_FAT: f64 = 2.0;

/// One nutrient's goal/current pair.
///
/// `current` never goes below zero; there is no upper clamp, so an
/// over-target state shows up as a negative `remaining()`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Macro {
    pub kind: Nutrient,
    pub current: f64,
    pub total: f64,
    pub unit: String,
    pub color: String,
}

impl Macro {
    pub fn new(kind: Nutrient, current: f64, total: f64) -> Self {
        Self {
            kind,
            current,
            total,
            unit: "g".to_string(),
            color: kind.color().to_string(),
        }
    }

    /// Percentage of the goal consumed, in [0, 100].
    ///
    /// Returns 0 when the goal is NaN or non-positive rather than
    /// dividing by zero.
    pub fn percentage(&self) -> f64 {
        if self.total.is_nan() || self.total <= 0.0 {
            return 0.0;
        }
        (self.current / self.total * 100.0).min(100.0)
    }

    /// Grams left toward the goal; negative means over target.
    pub fn remaining(&self) -> f64 {
        if self.current.is_nan() || self.total.is_nan() {
            return 0.0;
        }
        self.total - self.current
    }

    pub fn add_amount(&mut self, amount: f64) {
        self.current = (self.current + amount).max(0.0);
    }

    pub fn subtract_amount(&mut self, amount: f64) {
        self.current = (self.current - amount).max(0.0);
    }

    pub fn reset_current(&mut self) {
        self.current = 0.0;
    }
}

impl fmt::Display for Macro {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {:.1}/{:.1} {} ({:.0}%)",
            self.kind,
            self.current,
            self.total,
            self.unit,
            self.percentage()
        )
    }
}

/// The full set of macro goals, keyed by nutrient.
///
/// Position-based indexing is deliberately not exposed; callers needing
/// display order go through [`MacroSet::ordered`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MacroSet {
    pub protein: Macro,
    pub carbs: Macro,
    pub fat: Macro,
}

impl MacroSet {
    pub fn new(protein: Macro, carbs: Macro, fat: Macro) -> Self {
        Self {
            protein,
            carbs,
            fat,
        }
    }

    /// Derives macro goals from a calorie target using the fixed
    /// 50/30/20 carbs/protein/fat calorie split, converted to grams at
    /// 4/4/9 kcal per gram and rounded.
    pub fn for_calories(calories: f64) -> Self {
        let total_ratio = RATIO_CARBS + RATIO_PROTEIN + RATIO_FAT;

        let grams = |ratio: f64, kind: Nutrient| {
            let kcal = calories * ratio / total_ratio;
            (kcal / kind.kcal_per_gram()).round()
        };

        Self {
            protein: Macro::new(Nutrient::Protein, 0.0, grams(RATIO_PROTEIN, Nutrient::Protein)),
            carbs: Macro::new(Nutrient::Carbs, 0.0, grams(RATIO_CARBS, Nutrient::Carbs)),
            fat: Macro::new(Nutrient::Fat, 0.0, grams(RATIO_FAT, Nutrient::Fat)),
        }
    }

    pub fn get(&self, kind: Nutrient) -> &Macro {
        match kind {
            Nutrient::Protein => &self.protein,
            Nutrient::Carbs => &self.carbs,
            Nutrient::Fat => &self.fat,
        }
    }

    pub fn get_mut(&mut self, kind: Nutrient) -> &mut Macro {
        match kind {
            Nutrient::Protein => &mut self.protein,
            Nutrient::Carbs => &mut self.carbs,
            Nutrient::Fat => &mut self.fat,
        }
    }

    /// Macros in Protein/Carbs/Fat display order.
    pub fn ordered(&self) -> [&Macro; 3] {
        [&self.protein, &self.carbs, &self.fat]
    }

    pub fn reset_current(&mut self) {
        for kind in Nutrient::ALL {
            self.get_mut(kind).reset_current();
        }
    }
}
