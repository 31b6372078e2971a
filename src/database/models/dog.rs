use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Dog {
    pub id: Uuid,
    pub name: String,
    pub breed: String,
    pub age: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub age: i64,
}

/// Public JSON shape of a dog: `{name, breed, age}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogSummary {
    pub name: String,
    pub breed: String,
    pub age: i64,
}

impl From<&Dog> for DogSummary {
    fn from(dog: &Dog) -> Self {
        Self {
            name: dog.name.clone(),
            breed: dog.breed.clone(),
            age: dog.age,
        }
    }
}

impl From<Dog> for DogSummary {
    fn from(dog: Dog) -> Self {
        Self {
            name: dog.name,
            breed: dog.breed,
            age: dog.age,
        }
    }
}
