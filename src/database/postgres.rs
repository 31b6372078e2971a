use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{debug, info};
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::{Cat, Dog, NewCat, NewDog};
use crate::database::store::Store;

const CREATE_CATS: &str = "CREATE TABLE IF NOT EXISTS cats (
    id UUID PRIMARY KEY,
    seq BIGSERIAL NOT NULL,
    name TEXT NOT NULL CHECK (name <> ''),
    beds_owned BIGINT NOT NULL,
    created_date TIMESTAMPTZ NOT NULL DEFAULT now()
)";

const CREATE_CATS_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS cats_created_date_idx ON cats (created_date DESC, seq DESC)";

const CREATE_DOGS: &str = "CREATE TABLE IF NOT EXISTS dogs (
    id UUID PRIMARY KEY,
    seq BIGSERIAL NOT NULL,
    name TEXT NOT NULL CHECK (name <> ''),
    breed TEXT NOT NULL,
    age BIGINT NOT NULL
)";

/// SQLSTATE for numeric_value_out_of_range
const NUMERIC_OUT_OF_RANGE: &str = "22003";

const CAT_COLUMNS: &str = "id, name, beds_owned, created_date";
const DOG_COLUMNS: &str = "id, name, breed, age";

/// PostgreSQL-backed store. `seq` preserves insertion order for listing,
/// first-match lookups and created_date ties.
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the cat and dog tables when they do not exist yet
    pub async fn ensure_schema(&self) -> Result<(), DatabaseError> {
        for statement in [CREATE_CATS, CREATE_CATS_INDEX, CREATE_DOGS] {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        info!("Database schema ready");
        Ok(())
    }
}

/// Map a BIGINT overflow raised by an increment onto the store's overflow error
fn counter_overflow(err: sqlx::Error, field: &'static str, name: &str) -> DatabaseError {
    let out_of_range = err
        .as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == NUMERIC_OUT_OF_RANGE);
    if out_of_range {
        DatabaseError::CounterOverflow { field, name: name.to_string() }
    } else {
        DatabaseError::Sqlx(err)
    }
}

#[async_trait]
impl Store for PgStore {
    fn backend(&self) -> &'static str {
        "postgres"
    }

    async fn latest_cat(&self) -> Result<Option<Cat>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM cats ORDER BY created_date DESC, seq DESC LIMIT 1",
            CAT_COLUMNS
        );
        let cat = sqlx::query_as::<_, Cat>(&sql).fetch_optional(&self.pool).await?;
        Ok(cat)
    }

    async fn list_cats(&self) -> Result<Vec<Cat>, DatabaseError> {
        let sql = format!("SELECT {} FROM cats ORDER BY seq", CAT_COLUMNS);
        let cats = sqlx::query_as::<_, Cat>(&sql).fetch_all(&self.pool).await?;
        Ok(cats)
    }

    async fn insert_cat(&self, cat: NewCat) -> Result<Cat, DatabaseError> {
        let sql = format!(
            "INSERT INTO cats (id, name, beds_owned) VALUES ($1, $2, $3) RETURNING {}",
            CAT_COLUMNS
        );
        let record = sqlx::query_as::<_, Cat>(&sql)
            .bind(Uuid::new_v4())
            .bind(&cat.name)
            .bind(cat.beds_owned)
            .fetch_one(&self.pool)
            .await?;
        debug!("Inserted cat {} ({})", record.name, record.id);
        Ok(record)
    }

    async fn find_cat_by_name(&self, name: &str) -> Result<Option<Cat>, DatabaseError> {
        let sql = format!(
            "SELECT {} FROM cats WHERE name = $1 ORDER BY seq LIMIT 1",
            CAT_COLUMNS
        );
        let cat = sqlx::query_as::<_, Cat>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(cat)
    }

    async fn increment_latest_cat_beds(&self) -> Result<Option<Cat>, DatabaseError> {
        let sql = format!(
            "UPDATE cats SET beds_owned = beds_owned + 1
             WHERE id = (SELECT id FROM cats ORDER BY created_date DESC, seq DESC LIMIT 1)
             RETURNING {}",
            CAT_COLUMNS
        );
        let cat = sqlx::query_as::<_, Cat>(&sql)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| counter_overflow(e, "beds_owned", "latest cat"))?;
        if let Some(cat) = &cat {
            debug!("Cat {} now owns {} beds", cat.name, cat.beds_owned);
        }
        Ok(cat)
    }

    async fn list_dogs(&self) -> Result<Vec<Dog>, DatabaseError> {
        let sql = format!("SELECT {} FROM dogs ORDER BY seq", DOG_COLUMNS);
        let dogs = sqlx::query_as::<_, Dog>(&sql).fetch_all(&self.pool).await?;
        Ok(dogs)
    }

    async fn insert_dog(&self, dog: NewDog) -> Result<Dog, DatabaseError> {
        let sql = format!(
            "INSERT INTO dogs (id, name, breed, age) VALUES ($1, $2, $3, $4) RETURNING {}",
            DOG_COLUMNS
        );
        let record = sqlx::query_as::<_, Dog>(&sql)
            .bind(Uuid::new_v4())
            .bind(&dog.name)
            .bind(&dog.breed)
            .bind(dog.age)
            .fetch_one(&self.pool)
            .await?;
        debug!("Inserted dog {} ({})", record.name, record.id);
        Ok(record)
    }

    async fn increment_dog_age_by_name(&self, name: &str) -> Result<Option<Dog>, DatabaseError> {
        let sql = format!(
            "UPDATE dogs SET age = age + 1
             WHERE id = (SELECT id FROM dogs WHERE name = $1 ORDER BY seq LIMIT 1)
             RETURNING {}",
            DOG_COLUMNS
        );
        let dog = sqlx::query_as::<_, Dog>(&sql)
            .bind(name)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| counter_overflow(e, "age", name))?;
        if let Some(dog) = &dog {
            debug!("Dog {} is now {}", dog.name, dog.age);
        }
        Ok(dog)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
