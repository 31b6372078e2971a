use async_trait::async_trait;

use crate::database::manager::DatabaseError;
use crate::database::models::{Cat, Dog, NewCat, NewDog};

/// Store client for the cat and dog collections.
///
/// Handlers receive an `Arc<dyn Store>` through application state. Each
/// method is a single round-trip to the backing store; the increment
/// operations are atomic with respect to concurrent requests.
#[async_trait]
pub trait Store: Send + Sync {
    /// Backend name for logging
    fn backend(&self) -> &'static str;

    /// Cat with the greatest `created_date`, later insert wins a tie
    async fn latest_cat(&self) -> Result<Option<Cat>, DatabaseError>;

    async fn list_cats(&self) -> Result<Vec<Cat>, DatabaseError>;

    async fn insert_cat(&self, cat: NewCat) -> Result<Cat, DatabaseError>;

    /// First cat whose name matches exactly
    async fn find_cat_by_name(&self, name: &str) -> Result<Option<Cat>, DatabaseError>;

    /// Add one to `beds_owned` on the most recent cat and return it
    async fn increment_latest_cat_beds(&self) -> Result<Option<Cat>, DatabaseError>;

    async fn list_dogs(&self) -> Result<Vec<Dog>, DatabaseError>;

    async fn insert_dog(&self, dog: NewDog) -> Result<Dog, DatabaseError>;

    /// Add one to `age` on the first dog with this name and return it
    async fn increment_dog_age_by_name(&self, name: &str) -> Result<Option<Dog>, DatabaseError>;

    /// Round-trip to the backing store
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
