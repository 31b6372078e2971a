use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Cat, Dog, NewCat, NewDog};
use crate::database::store::Store;

/// Process-local store. Each collection keeps insertion order; the write
/// lock is held across find + mutate so increments cannot interleave.
#[derive(Debug, Default)]
pub struct MemoryStore {
    cats: RwLock<Vec<Cat>>,
    dogs: RwLock<Vec<Dog>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Index of the most recent cat. `max_by_key` keeps the last of equal
    /// keys, so the later insert wins a timestamp tie.
    fn latest_index(cats: &[Cat]) -> Option<usize> {
        cats.iter()
            .enumerate()
            .max_by_key(|(_, cat)| cat.created_date)
            .map(|(idx, _)| idx)
    }
}

#[async_trait]
impl Store for MemoryStore {
    fn backend(&self) -> &'static str {
        "memory"
    }

    async fn latest_cat(&self) -> Result<Option<Cat>, DatabaseError> {
        let cats = self.cats.read().await;
        Ok(Self::latest_index(&cats).map(|idx| cats[idx].clone()))
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, DatabaseError> {
        Ok(self.cats.read().await.clone())
    }

    async fn insert_cat(&self, cat: NewCat) -> Result<Cat, DatabaseError> {
        let record = Cat {
            id: Uuid::new_v4(),
            name: cat.name,
            beds_owned: cat.beds_owned,
            created_date: Utc::now(),
        };
        self.cats.write().await.push(record.clone());
        debug!("Inserted cat {} ({})", record.name, record.id);
        Ok(record)
    }

    async fn find_cat_by_name(&self, name: &str) -> Result<Option<Cat>, DatabaseError> {
        let cats = self.cats.read().await;
        Ok(cats.iter().find(|cat| cat.name == name).cloned())
    }

    async fn increment_latest_cat_beds(&self) -> Result<Option<Cat>, DatabaseError> {
        let mut cats = self.cats.write().await;
        let Some(idx) = Self::latest_index(&cats) else {
            return Ok(None);
        };
        let cat = &mut cats[idx];
        cat.beds_owned = cat.beds_owned.checked_add(1).ok_or_else(|| DatabaseError::CounterOverflow {
            field: "beds_owned",
            name: cat.name.clone(),
        })?;
        debug!("Cat {} now owns {} beds", cat.name, cat.beds_owned);
        Ok(Some(cat.clone()))
    }

    async fn list_dogs(&self) -> Result<Vec<Dog>, DatabaseError> {
        Ok(self.dogs.read().await.clone())
    }

    async fn insert_dog(&self, dog: NewDog) -> Result<Dog, DatabaseError> {
        let record = Dog {
            id: Uuid::new_v4(),
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
        };
        self.dogs.write().await.push(record.clone());
        debug!("Inserted dog {} ({})", record.name, record.id);
        Ok(record)
    }

    async fn increment_dog_age_by_name(&self, name: &str) -> Result<Option<Dog>, DatabaseError> {
        let mut dogs = self.dogs.write().await;
        let Some(dog) = dogs.iter_mut().find(|dog| dog.name == name) else {
            return Ok(None);
        };
        dog.age = dog.age.checked_add(1).ok_or_else(|| DatabaseError::CounterOverflow {
            field: "age",
            name: dog.name.clone(),
        })?;
        debug!("Dog {} is now {}", dog.name, dog.age);
        Ok(Some(dog.clone()))
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}
