use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::{categories, questions},
    server::{app::AppState, error::ApiError},
    telemetry::QUIZ_QUESTION_CNTR,
};

use super::ApiResponse;

/// Quiz play asks only while a question is left: fewer than 5 previous
/// questions when playing across all categories, exhaustion otherwise.
const UNCATEGORIZED_ROUND_LIMIT: usize = 5;

// the frontend sends {"id": N, "type": label}; null, false and {} all
// mean "play across all categories", as does an id no category has
fn selected_category(quiz_category: &Value) -> Option<i64> {
    match quiz_category {
        Value::Object(map) => map.get("id").and_then(Value::as_i64),
        Value::Number(id) => id.as_i64(),
        _ => None,
    }
}

async fn play_quiz(
    State(pool): State<SqlitePool>,
    Json(body): Json<Value>,
) -> ApiResponse<Json<Value>> {
    let Some(body) = body.as_object() else {
        return Err(ApiError::BadRequest);
    };
    let (Some(previous), Some(quiz_category)) =
        (body.get("previous_questions"), body.get("quiz_category"))
    else {
        return Err(ApiError::BadRequest);
    };

    let previous: Vec<i64> = previous
        .as_array()
        .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
        .unwrap_or_default();

    let category = match selected_category(quiz_category) {
        Some(id) => categories::find_category(&pool, id)
            .await
            .map_err(ApiError::Internal)?,
        None => None,
    };

    let question = match category {
        Some(category) => questions::random_question(&pool, Some(category.id), &previous).await,
        None if previous.len() < UNCATEGORIZED_ROUND_LIMIT => {
            questions::random_question(&pool, None, &previous).await
        }
        None => Ok(None),
    }
    .map_err(ApiError::Internal)?;

    if let Some(question) = &question {
        QUIZ_QUESTION_CNTR
            .with_label_values(&[question.category.to_string().as_str()])
            .inc();
    }

    Ok(Json(json!({ "question": question })))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play_quiz))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_object_with_id() {
        assert_eq!(selected_category(&json!({"id": 3, "type": "Geography"})), Some(3));
    }

    #[test]
    fn all_categories_forms() {
        assert_eq!(selected_category(&json!(null)), None);
        assert_eq!(selected_category(&json!(false)), None);
        assert_eq!(selected_category(&json!({})), None);
    }

    #[test]
    fn bare_id_is_accepted() {
        assert_eq!(selected_category(&json!(2)), Some(2));
    }
}
