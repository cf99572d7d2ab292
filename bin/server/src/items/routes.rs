//! HTTP handlers for items.

use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use mongodb::bson::{Document, oid::ObjectId};
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::sync::Arc;

use super::store::{ItemStore, UpdateSummary, parse_item_id, serialize_item};
use crate::error::{ApiError, ApiJson, ApiQuery};

const DATABASE_ERROR: &str = "Database error";

/// Pagination query for listing items.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

/// Builds the items router (`/items`, `/items/{item_id}`).
pub fn router<S>(store: Arc<ItemStore>) -> Router<S> {
    Router::new()
        .route("/items", get(list_items).post(create_item))
        .route(
            "/items/{item_id}",
            get(get_item).put(update_item).delete(delete_item),
        )
        .with_state(store)
}

/// Lists items with pagination.
pub async fn list_items(
    State(store): State<Arc<ItemStore>>,
    ApiQuery(query): ApiQuery<ListQuery>,
) -> Result<Json<Value>, ApiError> {
    let items = store
        .list(query.skip, query.limit)
        .await
        .map_err(|e| ApiError::internal(DATABASE_ERROR, e))?;

    Ok(Json(list_body(items, &query)))
}

/// Fetches a single item.
pub async fn get_item(
    State(store): State<Arc<ItemStore>>,
    Path(item_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = require_item_id(&item_id)?;

    let item = store
        .find_by_id(id)
        .await
        .map_err(|e| ApiError::internal(DATABASE_ERROR, e))?
        .ok_or(ApiError::ItemNotFound)?;

    Ok(Json(serialize_item(item)))
}

/// Creates an item from an arbitrary JSON object.
pub async fn create_item(
    State(store): State<Arc<ItemStore>>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let item = to_document(&body)?;

    let id = store
        .insert(item)
        .await
        .map_err(|e| ApiError::internal(DATABASE_ERROR, e))?;

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

/// Sets the given fields on an existing item.
pub async fn update_item(
    State(store): State<Arc<ItemStore>>,
    Path(item_id): Path<String>,
    ApiJson(body): ApiJson<Map<String, Value>>,
) -> Result<Json<Value>, ApiError> {
    let id = require_item_id(&item_id)?;
    let fields = to_document(&body)?;

    let summary = store
        .update(id, fields)
        .await
        .map_err(|e| ApiError::internal(DATABASE_ERROR, e))?;

    updated_body(summary).map(Json)
}

/// Deletes an item.
pub async fn delete_item(
    State(store): State<Arc<ItemStore>>,
    Path(item_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let id = require_item_id(&item_id)?;

    let deleted = store
        .delete(id)
        .await
        .map_err(|e| ApiError::internal(DATABASE_ERROR, e))?;

    deleted_body(deleted).map(Json)
}

fn require_item_id(raw: &str) -> Result<ObjectId, ApiError> {
    parse_item_id(raw).ok_or(ApiError::InvalidItemId)
}

fn list_body(items: Vec<Document>, query: &ListQuery) -> Value {
    let items: Vec<Value> = items.into_iter().map(serialize_item).collect();
    json!({
        "items": items,
        "skip": query.skip,
        "limit": query.limit,
    })
}

/// `None` means the id matched no document.
fn updated_body(summary: Option<UpdateSummary>) -> Result<Value, ApiError> {
    let summary = summary.ok_or(ApiError::ItemNotFound)?;
    Ok(json!({ "modified": summary.modified }))
}

fn deleted_body(deleted: bool) -> Result<Value, ApiError> {
    if !deleted {
        return Err(ApiError::ItemNotFound);
    }
    Ok(json!({ "deleted": true }))
}

fn to_document(body: &Map<String, Value>) -> Result<Document, ApiError> {
    mongodb::bson::to_document(body).map_err(|e| ApiError::InvalidItem {
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_query_defaults() {
        let query: ListQuery = serde_json::from_str("{}").expect("query");
        assert_eq!(query.skip, 0);
        assert_eq!(query.limit, 20);
    }

    #[test]
    fn invalid_id_is_rejected_before_the_database() {
        let err = require_item_id("xyz").expect_err("invalid id");
        assert!(matches!(err, ApiError::InvalidItemId));
    }

    #[test]
    fn list_body_rewrites_ids_and_echoes_paging() {
        let oid = ObjectId::parse_str("65f1a2b3c4d5e6f7a8b9c0d1").expect("oid");
        let items = vec![mongodb::bson::doc! { "_id": oid, "name": "widget" }];
        let query = ListQuery { skip: 40, limit: 20 };

        assert_eq!(
            list_body(items, &query),
            json!({
                "items": [{"id": "65f1a2b3c4d5e6f7a8b9c0d1", "name": "widget"}],
                "skip": 40,
                "limit": 20
            })
        );
    }

    #[test]
    fn update_without_match_is_not_found() {
        let err = updated_body(None).expect_err("no match");
        assert!(matches!(err, ApiError::ItemNotFound));
        assert_eq!(err.status_and_detail().0, StatusCode::NOT_FOUND);

        let body = updated_body(Some(UpdateSummary { modified: 0 })).expect("matched");
        assert_eq!(body, json!({"modified": 0}));
    }

    #[test]
    fn delete_without_match_is_not_found() {
        let err = deleted_body(false).expect_err("no match");
        assert_eq!(
            err.status_and_detail(),
            (StatusCode::NOT_FOUND, "Item not found".to_string())
        );

        assert_eq!(deleted_body(true).expect("deleted"), json!({"deleted": true}));
    }

    #[test]
    fn json_object_converts_to_document() {
        let body: Map<String, Value> =
            serde_json::from_str(r#"{"name": "widget", "tags": ["a", "b"], "price": 1.5}"#)
                .expect("body");
        let document = to_document(&body).expect("document");

        assert_eq!(document.get_str("name").expect("name"), "widget");
        assert_eq!(document.get_array("tags").expect("tags").len(), 2);
        assert_eq!(document.get_f64("price").expect("price"), 1.5);
    }
}
