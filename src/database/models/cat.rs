use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Cat {
    pub id: Uuid,
    pub name: String,
    pub beds_owned: i64,
    /// Set once at insert; "most recent" ordering key
    pub created_date: DateTime<Utc>,
}

/// Fields supplied by the client when creating a cat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCat {
    pub name: String,
    pub beds_owned: i64,
}

/// Public JSON shape of a cat: `{name, beds}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatSummary {
    pub name: String,
    pub beds: i64,
}

impl From<&Cat> for CatSummary {
    fn from(cat: &Cat) -> Self {
        Self {
            name: cat.name.clone(),
            beds: cat.beds_owned,
        }
    }
}

impl From<Cat> for CatSummary {
    fn from(cat: Cat) -> Self {
        Self {
            name: cat.name,
            beds: cat.beds_owned,
        }
    }
}
