//! The nutrition accounting engine.
//!
//! Owns the per-date meal ledger, the goal state and the saved-foods
//! catalog. Every aggregate it reports is recomputed from the ledger for
//! the queried date; nothing is accumulated incrementally, so derived
//! figures can never drift from the recorded meals.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::error::TrackerError;
use crate::models::{CaloriesLeftPolicy, Macro, MacroSet, Meal, Nutrient, Settings};
use crate::store::{MemoryStore, NutritionStore};

/// Per-nutrient consumed grams for one day, rounded to one decimal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConsumedMacros {
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
}

impl ConsumedMacros {
    pub fn get(&self, kind: Nutrient) -> f64 {
        match kind {
            Nutrient::Protein => self.protein,
            Nutrient::Carbs => self.carbs,
            Nutrient::Fat => self.fat,
        }
    }
}

/// Tracker over an optional persistent store.
///
/// Constructed per session and injected where needed; there is no global
/// instance. Mutations are applied in memory first and then persisted as
/// a single keyed record write, awaited before the method returns. A
/// failed write is logged and dropped: the in-memory state stays
/// authoritative and the session keeps working (durability is
/// best-effort).
pub struct NutritionTracker<S = MemoryStore> {
    settings: Settings,
    meals: BTreeMap<NaiveDate, Vec<Meal>>,
    saved_foods: Vec<Meal>,
    store: Option<S>,
    ready: bool,
}

impl<S: NutritionStore> NutritionTracker<S> {
    /// Tracker without durable storage; immediately ready.
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            meals: BTreeMap::new(),
            saved_foods: Vec::new(),
            store: None,
            ready: true,
        }
    }

    /// Tracker backed by a store. Reads return the given defaults until
    /// [`init`](Self::init) has completed.
    pub fn with_store(settings: Settings, store: S) -> Self {
        Self {
            settings,
            meals: BTreeMap::new(),
            saved_foods: Vec::new(),
            store: Some(store),
            ready: false,
        }
    }

    /// Loads persisted state, overlaying the in-memory defaults.
    ///
    /// Idempotent once it has run: subsequent calls return immediately.
    /// When no settings record exists yet the current defaults are
    /// persisted so first-run state is durable. Load failures are warned
    /// and the defaults stand.
    pub async fn init(&mut self) {
        if self.ready {
            return;
        }

        if let Some(store) = &self.store {
            match store.load_settings().await {
                Ok(Some(settings)) => self.settings = settings,
                Ok(None) => {
                    if let Err(e) = store.put_settings(&self.settings).await {
                        tracing::warn!("failed to persist default settings: {}", e);
                    }
                }
                Err(e) => tracing::warn!("failed to load settings: {}", e),
            }

            match store.load_meals().await {
                Ok(meals) => {
                    self.meals.clear();
                    for meal in meals {
                        self.meals.entry(meal.date).or_default().push(meal);
                    }
                }
                Err(e) => tracing::warn!("failed to load meals: {}", e),
            }

            match store.load_saved_foods().await {
                Ok(foods) => self.saved_foods = foods,
                Err(e) => tracing::warn!("failed to load saved foods: {}", e),
            }
        }

        self.ready = true;
    }

    /// True once persisted state has been loaded (or no store exists).
    /// Callers should not trust reads before this.
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    // ------------------------------------------------------------------
    // Mutations
    // ------------------------------------------------------------------

    /// Appends a meal to its day's ledger (insertion order preserved).
    pub async fn add_meal(&mut self, meal: Meal) {
        self.meals.entry(meal.date).or_default().push(meal.clone());
        self.persist_meal(&meal).await;
    }

    /// Replaces the meal at `index` in `date`'s ledger.
    ///
    /// The replacement inherits the existing record's id and creation
    /// time so the keyed upsert replaces in place and intra-day order is
    /// unchanged. Out-of-range indices leave state untouched.
    pub async fn update_meal(
        &mut self,
        date: NaiveDate,
        index: usize,
        meal: Meal,
    ) -> Result<(), TrackerError> {
        let slot = self
            .meals
            .get_mut(&date)
            .and_then(|day| day.get_mut(index))
            .ok_or(TrackerError::MealNotFound { date, index })?;

        let mut meal = meal;
        meal.id = slot.id;
        meal.created_at = slot.created_at;
        meal.date = date;
        *slot = meal.clone();

        self.persist_meal(&meal).await;
        Ok(())
    }

    /// Removes the meal at `index` from `date`'s ledger.
    pub async fn delete_meal(&mut self, date: NaiveDate, index: usize) -> Result<(), TrackerError> {
        let day = self
            .meals
            .get_mut(&date)
            .filter(|day| index < day.len())
            .ok_or(TrackerError::MealNotFound { date, index })?;

        let removed = day.remove(index);
        if day.is_empty() {
            self.meals.remove(&date);
        }

        if let Some(store) = &self.store {
            if let Err(e) = store.delete_meal(removed.id).await {
                tracing::warn!("failed to delete meal {}: {}", removed.id, e);
            }
        }
        Ok(())
    }

    /// Copies a meal into the saved-foods catalog (no date semantics).
    pub async fn save_food(&mut self, meal: Meal) {
        self.saved_foods.push(meal.clone());
        if let Some(store) = &self.store {
            if let Err(e) = store.put_saved_food(&meal).await {
                tracing::warn!("failed to persist saved food {}: {}", meal.id, e);
            }
        }
    }

    pub async fn delete_saved_food(&mut self, index: usize) -> Result<(), TrackerError> {
        if index >= self.saved_foods.len() {
            return Err(TrackerError::SavedFoodNotFound { index });
        }
        let removed = self.saved_foods.remove(index);

        if let Some(store) = &self.store {
            if let Err(e) = store.delete_saved_food(removed.id).await {
                tracing::warn!("failed to delete saved food {}: {}", removed.id, e);
            }
        }
        Ok(())
    }

    /// Wholesale replacement of the goal state.
    pub async fn update_settings(&mut self, total_calories: f64, macros: MacroSet) {
        self.settings.total_calories = total_calories;
        self.settings.macros = macros;
        self.persist_settings().await;
    }

    pub async fn set_calories_left_policy(&mut self, policy: CaloriesLeftPolicy) {
        self.settings.calories_left = policy;
        self.persist_settings().await;
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Meals recorded on `date`, in insertion order. Defensive copy.
    pub fn meals(&self, date: NaiveDate) -> Vec<Meal> {
        self.meals.get(&date).cloned().unwrap_or_default()
    }

    /// `date`'s meals most-recent-first, for display.
    pub fn recent_meals(&self, date: NaiveDate) -> Vec<Meal> {
        let mut meals = self.meals(date);
        meals.reverse();
        meals
    }

    /// The saved-foods catalog in insertion order. Defensive copy.
    pub fn saved_foods(&self) -> Vec<Meal> {
        self.saved_foods.clone()
    }

    /// The configured macro goals, exactly as last set.
    pub fn macros(&self) -> MacroSet {
        self.settings.macros.clone()
    }

    pub fn total_calories(&self) -> f64 {
        self.settings.total_calories
    }

    pub fn calories_left_policy(&self) -> CaloriesLeftPolicy {
        self.settings.calories_left
    }

    /// kcal consumed on `date` (sum of rounded per-meal figures).
    pub fn consumed_calories(&self, date: NaiveDate) -> f64 {
        self.meals
            .get(&date)
            .map(|day| day.iter().map(Meal::actual_calories).sum())
            .unwrap_or(0.0)
    }

    /// kcal remaining toward the goal on `date`.
    ///
    /// Returns 0 when the goal is NaN or non-positive. Under the default
    /// clamp policy the result never goes below zero; the signed policy
    /// reports the overage as a negative figure.
    pub fn calories_left(&self, date: NaiveDate) -> f64 {
        let goal = self.settings.total_calories;
        if goal.is_nan() || goal <= 0.0 {
            return 0.0;
        }
        let left = goal - self.consumed_calories(date);
        match self.settings.calories_left {
            CaloriesLeftPolicy::Clamp => left.max(0.0),
            CaloriesLeftPolicy::Signed => left,
        }
    }

    /// Percentage of the calorie goal consumed on `date`, in [0, 100].
    /// Never NaN or infinite.
    pub fn calorie_percentage(&self, date: NaiveDate) -> f64 {
        let goal = self.settings.total_calories;
        if goal.is_nan() || goal <= 0.0 {
            return 0.0;
        }
        (self.consumed_calories(date) / goal * 100.0).round().min(100.0)
    }

    /// Grams of each macro consumed on `date`, rounded to one decimal.
    pub fn consumed_macros(&self, date: NaiveDate) -> ConsumedMacros {
        let round1 = |x: f64| (x * 10.0).round() / 10.0;
        let day = self.meals.get(&date);
        let sum = |f: fn(&Meal) -> f64| {
            day.map(|meals| meals.iter().map(f).sum()).unwrap_or(0.0)
        };
        ConsumedMacros {
            protein: round1(sum(Meal::actual_protein)),
            carbs: round1(sum(Meal::actual_carbs)),
            fat: round1(sum(Meal::actual_fat)),
        }
    }

    /// Ordered Protein/Carbs/Fat view with `current` filled from `date`'s
    /// consumption; the shape presentation layers render from.
    pub fn macros_view(&self, date: NaiveDate) -> Vec<Macro> {
        let consumed = self.consumed_macros(date);
        self.settings
            .macros
            .ordered()
            .into_iter()
            .map(|goal| {
                let mut m = goal.clone();
                m.current = consumed.get(m.kind);
                m
            })
            .collect()
    }

    // ------------------------------------------------------------------

    async fn persist_meal(&self, meal: &Meal) {
        if let Some(store) = &self.store {
            if let Err(e) = store.put_meal(meal).await {
                tracing::warn!("failed to persist meal {}: {}", meal.id, e);
            }
        }
    }

    async fn persist_settings(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.put_settings(&self.settings).await {
                tracing::warn!("failed to persist settings: {}", e);
            }
        }
    }
}
