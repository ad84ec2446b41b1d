use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use sqlx::SqlitePool;

use crate::{
    db::{categories, questions, Category},
    server::{app::AppState, error::ApiError, pagination::paginate},
};

use super::ApiResponse;

#[derive(Deserialize)]
pub(super) struct PageQuery {
    pub(super) page: Option<u32>,
}

// the frontend wants categories keyed by id, not as a list
pub(super) fn category_map(categories: &[Category]) -> Value {
    let mut map = Map::new();
    for category in categories {
        map.insert(category.id.to_string(), Value::from(category.label.clone()));
    }
    Value::Object(map)
}

async fn all_categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<Value>> {
    let categories = categories::get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(Json(json!({
        "success": true,
        "categories": category_map(&categories),
    })))
}

async fn questions_by_category(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<Value>> {
    let category = categories::get_category(&pool, id).await?;
    let selection = questions::get_questions_for_category(&pool, id).await?;
    let current_questions = paginate(page.unwrap_or(1), &selection);

    Ok(Json(json!({
        "success": true,
        "questions": current_questions,
        "total_questions": selection.len(),
        "current_category": category.label,
    })))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/api/v1.0/categories", get(all_categories))
        .route("/api/v1.0/categories/{id}/questions", get(questions_by_category))
        .with_state(state)
}
