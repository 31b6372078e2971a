use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::app::AppState;
use crate::database::models::{CatSummary, NewCat};
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, RequiredFields};

#[derive(Debug, Serialize, Deserialize)]
pub struct NameResponse {
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct SetNameBody {
    pub firstname: Option<Value>,
    pub lastname: Option<Value>,
    pub beds: Option<Value>,
}

#[derive(Debug, Deserialize)]
pub struct SearchNameQuery {
    pub name: Option<String>,
}

/// GET /getName - name of the most recently created cat
pub async fn get_name(State(state): State<AppState>) -> ApiResult<NameResponse> {
    match state.store.latest_cat().await? {
        Some(cat) => Ok(ApiResponse::success(NameResponse { name: cat.name })),
        None => Err(ApiError::not_found("No cats found")),
    }
}

/// POST /setName - create a cat named "<firstname> <lastname>"
///
/// Expected Input:
/// ```json
/// { "firstname": "Tom", "lastname": "Cat", "beds": 3 }
/// ```
///
/// Responds 201 with `{ "name": "Tom Cat", "beds": 3 }`. Nothing is written
/// unless all three fields are present.
pub async fn set_name(
    State(state): State<AppState>,
    body: Result<Json<SetNameBody>, JsonRejection>,
) -> ApiResult<CatSummary> {
    let Json(body) = body?;

    let mut fields = RequiredFields::new();
    let firstname = fields.text("firstname", body.firstname.as_ref());
    let lastname = fields.text("lastname", body.lastname.as_ref());
    let beds = fields.integer("beds", body.beds.as_ref());
    let (Some(firstname), Some(lastname), Some(beds)) = (firstname, lastname, beds) else {
        return Err(fields.into_error());
    };

    let cat = state
        .store
        .insert_cat(NewCat {
            name: format!("{} {}", firstname, lastname),
            beds_owned: beds,
        })
        .await?;
    info!("Created cat {} with {} beds", cat.name, cat.beds_owned);

    Ok(ApiResponse::created(CatSummary::from(cat)))
}

/// GET /searchName?name= - first cat with exactly this name
pub async fn search_name(
    State(state): State<AppState>,
    query: Result<Query<SearchNameQuery>, QueryRejection>,
) -> ApiResult<CatSummary> {
    let Query(query) = query?;
    let name = match query.name {
        Some(name) if !name.is_empty() => name,
        _ => return Err(ApiError::bad_request("Missing required query parameter: name")),
    };

    match state.store.find_cat_by_name(&name).await? {
        Some(cat) => Ok(ApiResponse::success(CatSummary::from(cat))),
        None => Err(ApiError::not_found(format!("No cat named '{}'", name))),
    }
}

/// POST /updateLast - give the most recently created cat one more bed
pub async fn update_last(State(state): State<AppState>) -> ApiResult<CatSummary> {
    match state.store.increment_latest_cat_beds().await? {
        Some(cat) => {
            info!("Cat {} now owns {} beds", cat.name, cat.beds_owned);
            Ok(ApiResponse::success(CatSummary::from(cat)))
        }
        None => Err(ApiError::not_found("No cats found")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use serde_json::json;

    use crate::database::Store;
    use crate::testing::{failing_app, get, post_json, post_raw, send_json, test_app};

    #[tokio::test]
    async fn set_name_joins_first_and_last() {
        let (app, store) = test_app();
        let (status, body) = send_json(
            &app,
            post_json("/setName", json!({ "firstname": "Tom", "lastname": "Cat", "beds": 3 })),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body, json!({ "name": "Tom Cat", "beds": 3 }));

        let cats = store.list_cats().await.unwrap();
        assert_eq!(cats.len(), 1);
        assert_eq!(cats[0].name, "Tom Cat");
        assert_eq!(cats[0].beds_owned, 3);
    }

    #[tokio::test]
    async fn set_name_accepts_form_style_beds() {
        let (app, _) = test_app();
        let (status, body) = send_json(
            &app,
            post_json("/setName", json!({ "firstname": "Kit", "lastname": "Kat", "beds": "2" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["beds"], 2);
    }

    #[tokio::test]
    async fn set_name_missing_fields_writes_nothing() {
        let (app, store) = test_app();
        let bodies = [
            json!({ "lastname": "Cat", "beds": 3 }),
            json!({ "firstname": "Tom", "beds": 3 }),
            json!({ "firstname": "Tom", "lastname": "Cat" }),
            json!({ "firstname": "", "lastname": "Cat", "beds": 3 }),
            json!({ "firstname": "Tom", "lastname": "Cat", "beds": null }),
            json!({}),
        ];
        for body in bodies {
            let (status, response) = send_json(&app, post_json("/setName", body.clone())).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {}", body);
            assert!(response["error"].is_string());
        }
        assert!(store.list_cats().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_name_rejects_non_json_body() {
        let (app, store) = test_app();
        let (status, body) = send_json(&app, post_raw("/setName", "text/plain", "firstname=Tom")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
        assert!(store.list_cats().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn set_name_store_failure_is_500() {
        let app = failing_app();
        let (status, body) = send_json(
            &app,
            post_json("/setName", json!({ "firstname": "Tom", "lastname": "Cat", "beds": 3 })),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An error occurred while processing your request");
    }

    #[tokio::test]
    async fn get_name_follows_latest_insert() {
        let (app, _) = test_app();
        let (status, body) = send_json(&app, get("/getName")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());

        send_json(
            &app,
            post_json("/setName", json!({ "firstname": "Tom", "lastname": "Cat", "beds": 3 })),
        )
        .await;
        let (status, body) = send_json(&app, get("/getName")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "Tom Cat" }));
    }

    #[tokio::test]
    async fn get_name_store_failure_is_500() {
        let (status, _) = send_json(&failing_app(), get("/getName")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn search_name_cases() {
        let (app, store) = test_app();
        store.insert_cat(NewCat { name: "Tom Cat".into(), beds_owned: 3 }).await.unwrap();

        let (status, body) = send_json(&app, get("/searchName?name=Tom%20Cat")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "Tom Cat", "beds": 3 }));

        let (status, _) = send_json(&app, get("/searchName?name=Nobody")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send_json(&app, get("/searchName")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(&app, get("/searchName?name=")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send_json(&failing_app(), get("/searchName?name=Tom")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn update_last_increments_by_one_each_call() {
        let (app, store) = test_app();
        store.insert_cat(NewCat { name: "Old".into(), beds_owned: 10 }).await.unwrap();
        store.insert_cat(NewCat { name: "Tom Cat".into(), beds_owned: 3 }).await.unwrap();

        let (status, body) = send_json(&app, post_raw("/updateLast", "application/json", "")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "name": "Tom Cat", "beds": 4 }));

        let (_, body) = send_json(&app, post_raw("/updateLast", "application/json", "")).await;
        assert_eq!(body["beds"], 5);

        let old = store.find_cat_by_name("Old").await.unwrap().unwrap();
        assert_eq!(old.beds_owned, 10);
    }

    #[tokio::test]
    async fn update_last_without_cats_is_404() {
        let (app, _) = test_app();
        let (status, _) = send_json(&app, post_raw("/updateLast", "application/json", "")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn update_last_store_failure_is_500() {
        let (status, _) =
            send_json(&failing_app(), post_raw("/updateLast", "application/json", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn update_last_at_integer_limit_is_500_and_keeps_beds() {
        let (app, store) = test_app();
        let (status, _) = send_json(
            &app,
            post_json("/setName", json!({ "firstname": "Max", "lastname": "Cat", "beds": i64::MAX })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, body) =
            send_json(&app, post_raw("/updateLast", "application/json", "")).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "An error occurred while processing your request");

        let cat = store.latest_cat().await.unwrap().unwrap();
        assert_eq!(cat.beds_owned, i64::MAX);
    }
}
