//! Persistent store contract for tracker state.
//!
//! Three logical collections back the tracker: a singleton settings
//! record, the dated meal ledger, and the undated saved-foods catalog.
//! Meals and saved foods are persisted per record (keyed upsert/delete),
//! never by rewriting a whole collection.

mod memory;

pub use memory::MemoryStore;

use uuid::Uuid;

use crate::error::StoreError;
use crate::models::{Meal, Settings};

/// Durable storage for one user's tracker state.
///
/// Implementations scope all collections to a single user.
#[allow(async_fn_in_trait)]
pub trait NutritionStore {
    /// Returns the persisted settings, or `None` on first run.
    async fn load_settings(&self) -> Result<Option<Settings>, StoreError>;

    async fn put_settings(&self, settings: &Settings) -> Result<(), StoreError>;

    /// Returns all meals ordered by date, then insertion order within a day.
    async fn load_meals(&self) -> Result<Vec<Meal>, StoreError>;

    /// Inserts or replaces a meal by id.
    async fn put_meal(&self, meal: &Meal) -> Result<(), StoreError>;

    async fn delete_meal(&self, id: Uuid) -> Result<(), StoreError>;

    async fn clear_meals(&self) -> Result<(), StoreError>;

    /// Returns the saved-foods catalog in insertion order.
    async fn load_saved_foods(&self) -> Result<Vec<Meal>, StoreError>;

    /// Inserts or replaces a saved food by id.
    async fn put_saved_food(&self, meal: &Meal) -> Result<(), StoreError>;

    async fn delete_saved_food(&self, id: Uuid) -> Result<(), StoreError>;

    async fn clear_saved_foods(&self) -> Result<(), StoreError>;
}
