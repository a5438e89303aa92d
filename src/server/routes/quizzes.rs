use axum::{
    extract::{rejection::JsonRejection, State},
    routing::post,
    Json, Router,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_number_from_string;
use sqlx::SqlitePool;

use crate::{
    db::{queries::questions::get_quiz_candidates, Question},
    server::{app::AppState, errors::ApiError},
    telemetry::QUIZ_QUESTIONS_SERVED,
};

use super::{ApiResponse, Success};

/// Quiz category id that lifts the category filter.
const ANY_CATEGORY: i64 = 0;

#[derive(Deserialize)]
struct QuizBody {
    previous_questions: Vec<i64>,
    quiz_category: QuizCategory,
}

// the frontend keys categories by the ids of a JSON object, so they may arrive as strings
#[derive(Deserialize)]
struct QuizCategory {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    id: i64,
}

#[derive(Serialize)]
struct QuizQuestion {
    question: Question,
}

fn pick_random(mut candidates: Vec<Question>) -> Option<Question> {
    if candidates.is_empty() {
        return None;
    }
    let index = rand::thread_rng().gen_range(0..candidates.len());
    Some(candidates.swap_remove(index))
}

async fn play(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuizBody>, JsonRejection>,
) -> ApiResponse<Json<Success<QuizQuestion>>> {
    let Json(body) = payload?;
    let category = match body.quiz_category.id {
        ANY_CATEGORY => None,
        id => Some(id),
    };

    let candidates = get_quiz_candidates(&pool, category, &body.previous_questions).await?;
    tracing::debug!(
        ?category,
        seen = body.previous_questions.len(),
        candidates = candidates.len(),
        "Quiz round"
    );
    let question = pick_random(candidates).ok_or(ApiError::NotFound)?;

    let label = category.map_or_else(|| "any".to_owned(), |id| id.to_string());
    QUIZ_QUESTIONS_SERVED
        .with_label_values(&[label.as_str()])
        .inc();

    Ok(Success::json(QuizQuestion { question }))
}

pub fn quizzes_router(state: AppState) -> Router {
    Router::new()
        .route("/quizzes", post(play))
        .with_state(state)
}
