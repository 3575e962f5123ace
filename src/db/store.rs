use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use macrolog_core::{Meal, NutritionStore, Settings, StoreError};

/// SQLite-backed store, scoped to one user profile.
///
/// Meals and saved foods are written one record at a time with keyed
/// upserts (`ON CONFLICT(id) DO UPDATE`); settings are a single JSON
/// record keyed `<user>_current`.
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    user: String,
}

#[derive(sqlx::FromRow)]
struct MealRow {
    id: String,
    date: Option<String>,
    name: String,
    korean_name: Option<String>,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    grams: f64,
    image_uri: Option<String>,
    created_at: String,
}

impl MealRow {
    fn hydrate(self) -> Result<Meal, StoreError> {
        let id = Uuid::parse_str(&self.id).map_err(|_| StoreError::CorruptRecord {
            field: "id",
            value: self.id.clone(),
        })?;

        let date = match &self.date {
            Some(d) => NaiveDate::parse_from_str(d, "%Y-%m-%d").map_err(|_| {
                StoreError::CorruptRecord {
                    field: "date",
                    value: d.clone(),
                }
            })?,
            // saved foods carry no date column; stamp load time
            None => chrono::Local::now().date_naive(),
        };

        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .map_err(|_| StoreError::CorruptRecord {
                field: "created_at",
                value: self.created_at.clone(),
            })?
            .with_timezone(&Utc);

        Ok(Meal {
            id,
            name: self.name,
            korean_name: self.korean_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            grams: self.grams,
            image_uri: self.image_uri,
            date,
            created_at,
        })
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

impl SqliteStore {
    pub fn new(pool: SqlitePool, user: impl Into<String>) -> Self {
        Self {
            pool,
            user: user.into(),
        }
    }

    fn settings_key(&self) -> String {
        format!("{}_current", self.user)
    }
}

impl NutritionStore for SqliteStore {
    async fn load_settings(&self) -> Result<Option<Settings>, StoreError> {
        let row: Option<(String,)> = sqlx::query_as("SELECT value FROM settings WHERE key = ?")
            .bind(self.settings_key())
            .fetch_optional(&self.pool)
            .await
            .map_err(backend)?;

        match row {
            Some((value,)) => Ok(Some(serde_json::from_str(&value)?)),
            None => Ok(None),
        }
    }

    async fn put_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        let value = serde_json::to_string(settings)?;

        sqlx::query(
            r#"
            INSERT INTO settings (key, value) VALUES (?, ?)
            ON CONFLICT(key) DO UPDATE SET value = excluded.value
            "#,
        )
        .bind(self.settings_key())
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn load_meals(&self) -> Result<Vec<Meal>, StoreError> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT id, date, name, korean_name, calories, protein, carbs, fat,
                   grams, image_uri, created_at
            FROM meals WHERE user = ?
            ORDER BY date, created_at, rowid
            "#,
        )
        .bind(&self.user)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(MealRow::hydrate).collect()
    }

    async fn put_meal(&self, meal: &Meal) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO meals (id, user, date, name, korean_name, calories, protein,
                               carbs, fat, grams, image_uri, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                date = excluded.date,
                name = excluded.name,
                korean_name = excluded.korean_name,
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                grams = excluded.grams,
                image_uri = excluded.image_uri
            "#,
        )
        .bind(meal.id.to_string())
        .bind(&self.user)
        .bind(meal.date.to_string())
        .bind(&meal.name)
        .bind(&meal.korean_name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fat)
        .bind(meal.grams)
        .bind(&meal.image_uri)
        .bind(meal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn delete_meal(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM meals WHERE id = ? AND user = ?")
            .bind(id.to_string())
            .bind(&self.user)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn clear_meals(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM meals WHERE user = ?")
            .bind(&self.user)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn load_saved_foods(&self) -> Result<Vec<Meal>, StoreError> {
        let rows: Vec<MealRow> = sqlx::query_as(
            r#"
            SELECT id, NULL AS date, name, korean_name, calories, protein, carbs, fat,
                   grams, image_uri, created_at
            FROM saved_foods WHERE user = ?
            ORDER BY created_at, rowid
            "#,
        )
        .bind(&self.user)
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter().map(MealRow::hydrate).collect()
    }

    async fn put_saved_food(&self, meal: &Meal) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO saved_foods (id, user, name, korean_name, calories, protein,
                                     carbs, fat, grams, image_uri, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                korean_name = excluded.korean_name,
                calories = excluded.calories,
                protein = excluded.protein,
                carbs = excluded.carbs,
                fat = excluded.fat,
                grams = excluded.grams,
                image_uri = excluded.image_uri
            "#,
        )
        .bind(meal.id.to_string())
        .bind(&self.user)
        .bind(&meal.name)
        .bind(&meal.korean_name)
        .bind(meal.calories)
        .bind(meal.protein)
        .bind(meal.carbs)
        .bind(meal.fat)
        .bind(meal.grams)
        .bind(&meal.image_uri)
        .bind(meal.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(backend)?;

        Ok(())
    }

    async fn delete_saved_food(&self, id: Uuid) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM saved_foods WHERE id = ? AND user = ?")
            .bind(id.to_string())
            .bind(&self.user)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }

    async fn clear_saved_foods(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM saved_foods WHERE user = ?")
            .bind(&self.user)
            .execute(&self.pool)
            .await
            .map_err(backend)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_db;
    use tempfile::tempdir;

    async fn test_store(dir: &tempfile::TempDir, user: &str) -> SqliteStore {
        let pool = init_db(dir.path().join("test.db")).await.unwrap();
        SqliteStore::new(pool, user)
    }

    fn meal(name: &str, date: &str) -> Meal {
        Meal::new(name, 100.0, 10.0, 20.0, 5.0, 150.0)
            .with_date(date.parse().unwrap())
    }

    #[tokio::test]
    async fn test_settings_first_run_then_roundtrip() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, "alice").await;

        assert!(store.load_settings().await.unwrap().is_none());

        let settings = Settings::default();
        store.put_settings(&settings).await.unwrap();
        assert_eq!(store.load_settings().await.unwrap(), Some(settings.clone()));

        // upsert replaces
        let mut changed = settings;
        changed.total_calories = 1500.0;
        store.put_settings(&changed).await.unwrap();
        assert_eq!(
            store.load_settings().await.unwrap().unwrap().total_calories,
            1500.0
        );
    }

    #[tokio::test]
    async fn test_meal_crud_roundtrip() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, "alice").await;

        let first = meal("Breakfast", "2024-01-01");
        let second = meal("Lunch", "2024-01-01");
        store.put_meal(&first).await.unwrap();
        store.put_meal(&second).await.unwrap();

        let loaded = store.load_meals().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0], first);
        assert_eq!(loaded[1], second);

        // keyed upsert replaces the record, keeping its position
        let mut updated = first.clone();
        updated.grams = 300.0;
        store.put_meal(&updated).await.unwrap();
        let loaded = store.load_meals().await.unwrap();
        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].grams, 300.0);

        store.delete_meal(second.id).await.unwrap();
        let loaded = store.load_meals().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, first.id);
    }

    #[tokio::test]
    async fn test_meals_ordered_by_date_then_insertion() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, "alice").await;

        store.put_meal(&meal("Later day", "2024-02-01")).await.unwrap();
        store.put_meal(&meal("Earlier day", "2024-01-15")).await.unwrap();

        let loaded = store.load_meals().await.unwrap();
        assert_eq!(loaded[0].name, "Earlier day");
        assert_eq!(loaded[1].name, "Later day");
    }

    #[tokio::test]
    async fn test_saved_foods_roundtrip() {
        let dir = tempdir().unwrap();
        let store = test_store(&dir, "alice").await;

        let food = Meal::new("Shake", 120.0, 24.0, 3.0, 1.5, 350.0).with_korean_name("쉐이크");
        store.put_saved_food(&food).await.unwrap();

        let loaded = store.load_saved_foods().await.unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, food.id);
        assert_eq!(loaded[0].korean_name.as_deref(), Some("쉐이크"));

        store.delete_saved_food(food.id).await.unwrap();
        assert!(store.load_saved_foods().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_user_scoping() {
        let dir = tempdir().unwrap();
        let pool = init_db(dir.path().join("test.db")).await.unwrap();
        let alice = SqliteStore::new(pool.clone(), "alice");
        let bob = SqliteStore::new(pool, "bob");

        alice.put_meal(&meal("Alice's lunch", "2024-01-01")).await.unwrap();
        alice.put_settings(&Settings::default()).await.unwrap();

        assert!(bob.load_meals().await.unwrap().is_empty());
        assert!(bob.load_settings().await.unwrap().is_none());

        bob.clear_meals().await.unwrap();
        assert_eq!(alice.load_meals().await.unwrap().len(), 1);
    }
}
