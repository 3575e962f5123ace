use std::sync::Mutex;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Meal, Settings};

use super::NutritionStore;

#[derive(Debug, Default)]
struct Inner {
    settings: Option<Settings>,
    meals: Vec<Meal>,
    saved_foods: Vec<Meal>,
}

/// In-memory store for tests and platforms without durable storage.
///
/// Collections keep insertion order; upserts replace in place.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn upsert(records: &mut Vec<Meal>, meal: &Meal) {
    match records.iter_mut().find(|m| m.id == meal.id) {
        Some(slot) => *slot = meal.clone(),
        None => records.push(meal.clone()),
    }
}

impl NutritionStore for MemoryStore {
    async fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        Ok(self.inner.lock().unwrap().settings.clone())
    }

    async fn put_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.inner.lock().unwrap().settings = Some(settings.clone());
        Ok(())
    }

    async fn load_meals(&self) -> Result<Vec<Meal>, StoreError> {
        let mut meals = self.inner.lock().unwrap().meals.clone();
        // stable: ties keep insertion order within a day
        meals.sort_by_key(|m| m.date);
        Ok(meals)
    }

    async fn put_meal(&self, meal: &Meal) -> Result<(), StoreError> {
        upsert(&mut self.inner.lock().unwrap().meals, meal);
        Ok(())
    }

    async fn delete_meal(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.lock().unwrap().meals.retain(|m| m.id != id);
        Ok(())
    }

    async fn clear_meals(&self) -> Result<(), StoreError> {
        self.inner.lock().unwrap().meals.clear();
        Ok(())
    }

    async fn load_saved_foods(&self) -> Result<Vec<Meal>, StoreError> {
        Ok(self.inner.lock().unwrap().saved_foods.clone())
    }

    async fn put_saved_food(&self, meal: &Meal) -> Result<(), StoreError> {
        upsert(&mut self.inner.lock().unwrap().saved_foods, meal);
        Ok(())
    }

    async fn delete_saved_food(&self, id: Uuid) -> Result<(), StoreError> {
        self.inner.lock().unwrap().saved_foods.retain(|m| m.id != id);
        Ok(())
    }

    async fn clear_saved_foods(&self) -> Result<(), StoreError> {
        self.inner.lock().unwrap().saved_foods.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_settings_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.load_settings().await.unwrap().is_none());

        let settings = Settings::default();
        store.put_settings(&settings).await.unwrap();
        assert_eq!(store.load_settings().await.unwrap(), Some(settings));
    }

    #[tokio::test]
    async fn test_meal_upsert_replaces_in_place() {
        let store = MemoryStore::new();
        let first = Meal::new("Toast", 250.0, 9.0, 45.0, 4.0, 80.0);
        let second = Meal::new("Eggs", 155.0, 13.0, 1.1, 11.0, 120.0);
        store.put_meal(&first).await.unwrap();
        store.put_meal(&second).await.unwrap();

        let mut replacement = first.clone();
        replacement.grams = 160.0;
        store.put_meal(&replacement).await.unwrap();

        let meals = store.load_meals().await.unwrap();
        assert_eq!(meals.len(), 2);
        assert_eq!(meals[0].id, first.id);
        assert_eq!(meals[0].grams, 160.0);
    }

    #[tokio::test]
    async fn test_delete_meal_by_id() {
        let store = MemoryStore::new();
        let meal = Meal::new("Soup", 40.0, 2.0, 5.0, 1.0, 300.0);
        store.put_meal(&meal).await.unwrap();
        store.delete_meal(meal.id).await.unwrap();
        assert!(store.load_meals().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_load_meals_ordered_by_date() {
        let store = MemoryStore::new();
        let d1 = chrono::NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        let d2 = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        store
            .put_meal(&Meal::new("Later", 100.0, 1.0, 1.0, 1.0, 100.0).with_date(d1))
            .await
            .unwrap();
        store
            .put_meal(&Meal::new("Earlier", 100.0, 1.0, 1.0, 1.0, 100.0).with_date(d2))
            .await
            .unwrap();

        let meals = store.load_meals().await.unwrap();
        assert_eq!(meals[0].name, "Earlier");
        assert_eq!(meals[1].name, "Later");
    }
}
