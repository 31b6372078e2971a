use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::app::AppState;
use crate::database::models::{DogSummary, NewDog};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequiredFields};

#[derive(Debug, Default, Deserialize)]
pub struct SetDogBody {
    pub name: Option<Value>,
    pub breed: Option<Value>,
    pub age: Option<Value>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearchDogBody {
    pub dogname: Option<Value>,
}

/// POST /setDogName - create a dog from `{name, breed, age}`
pub async fn set_dog_name(
    State(state): State<AppState>,
    body: Result<Json<SetDogBody>, JsonRejection>,
) -> ApiResult<DogSummary> {
    let Json(body) = body?;

    let mut fields = RequiredFields::new();
    let name = fields.text("name", body.name.as_ref());
    let breed = fields.text("breed", body.breed.as_ref());
    let age = fields.integer("age", body.age.as_ref());
    let (Some(name), Some(breed), Some(age)) = (name, breed, age) else {
        return Err(fields.into_error());
    };

    let dog = state.store.insert_dog(NewDog { name, breed, age }).await?;
    info!("Created dog {} ({}, {})", dog.name, dog.breed, dog.age);

    Ok(ApiResponse::created(DogSummary::from(dog)))
}

/// POST /searchDogName - look a dog up by name, ageing it by one year
///
/// The age bump happens in the same store call as the lookup, so the
/// response already carries the new age and concurrent searches each
/// count once.
pub async fn search_dog_name(
    State(state): State<AppState>,
    body: Result<Json<SearchDogBody>, JsonRejection>,
) -> ApiResult<DogSummary> {
    let Json(body) = body?;

    let mut fields = RequiredFields::new();
    let Some(dogname) = fields.text("dogname", body.dogname.as_ref()) else {
        return Err(fields.into_error());
    };

    match state.store.increment_dog_age_by_name(&dogname).await? {
        Some(dog) => {
            info!("Dog {} is now {}", dog.name, dog.age);
            Ok(ApiResponse::success(DogSummary::from(dog)))
        }
        None => Err(ApiError::not_found(format!("No dog named '{}'", dogname))),
    }
}
