use axum::{
    extract::{Path, Query, State},
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::{categories, questions},
    server::{app::AppState, error::ApiError, pagination::paginate},
};

use super::categories::{category_map, PageQuery};
use super::ApiResponse;

/// POST /questions carries either a search or a new question; which one is
/// decided by the payload shape, so every field is optional here.
#[derive(Deserialize)]
struct QuestionsPayload {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
    question: Option<String>,
    answer: Option<String>,
    difficulty: Option<i64>,
    category: Option<i64>,
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<Value>> {
    let selection = questions::get_all_questions(&pool).await?;
    let current_questions = paginate(page.unwrap_or(1), &selection);
    if current_questions.is_empty() {
        return Err(ApiError::NotFound);
    }

    let categories = categories::get_all_categories(&pool).await?;
    // the frontend pins the list view to category 5; null when unseeded
    let current_category = categories
        .iter()
        .find(|c| c.id == 5)
        .map(|c| c.label.as_str());

    Ok(Json(json!({
        "success": true,
        "questions": current_questions,
        "total_questions": selection.len(),
        "categories": category_map(&categories),
        "current_category": current_category,
    })))
}

async fn remove_question(
    State(pool): State<SqlitePool>,
    Path(id): Path<i64>,
    Query(PageQuery { page }): Query<PageQuery>,
) -> ApiResponse<Json<Value>> {
    questions::get_question_by_id(&pool, id).await?;
    questions::delete_question(&pool, id).await.map_err(|error| {
        tracing::error!("Failed to delete question {id}: {error}");
        ApiError::Unprocessable
    })?;

    let selection = questions::get_all_questions(&pool).await?;
    let current_questions = paginate(page.unwrap_or(1), &selection);

    Ok(Json(json!({
        "success": true,
        "deleted": id,
        "questions": current_questions,
        "total_questions": selection.len(),
    })))
}

async fn create_or_search(
    State(pool): State<SqlitePool>,
    Json(payload): Json<QuestionsPayload>,
) -> ApiResponse<Json<Value>> {
    if let Some(term) = payload.search_term {
        let matches = questions::search_questions(&pool, term.trim()).await?;
        let total = matches.len();
        let current_category = matches
            .first()
            .map(|q| Value::from(q.category))
            .unwrap_or_else(|| Value::from(""));

        return Ok(Json(json!({
            "questions": matches,
            "totalQuestions": total,
            "currentCategory": current_category,
        })));
    }

    match (
        payload.question,
        payload.answer,
        payload.difficulty,
        payload.category,
    ) {
        (Some(question), Some(answer), Some(difficulty), Some(category)) => {
            let id = questions::create_question(&pool, &question, &answer, category, difficulty)
                .await
                .map_err(|error| {
                    tracing::error!("Failed to create question: {error}");
                    ApiError::Unprocessable
                })?;
            let question = questions::get_question_by_id(&pool, id).await?;

            Ok(Json(json!({ "question": question })))
        }
        _ => Err(ApiError::BadRequest),
    }
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_or_search))
        .route("/questions/{id}", delete(remove_question))
        .with_state(state)
}
