use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    routing::{delete, get, post},
    Json, Router,
};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_option_number_from_string;
use serde_json::{json, Value};
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::get_all_categories,
            questions::{self, get_all_questions, search_questions},
        },
        NewQuestion, Question,
    },
    server::{app::AppState, deserializers::PageQuery, errors::ApiError},
    telemetry::{QUESTIONS_CREATED, QUESTIONS_DELETED},
};

use super::{category_map, paginate, ApiResponse, Success};

// the frontend's dropdowns send category and difficulty as strings
#[derive(Deserialize)]
struct QuestionBody {
    question: Option<String>,
    answer: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    category: Option<i64>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    difficulty: Option<i64>,
}

#[derive(Deserialize)]
struct SearchBody {
    #[serde(rename = "searchTerm")]
    search_term: Option<String>,
}

#[derive(Serialize)]
struct QuestionsPage {
    questions: Vec<Question>,
    total_questions: usize,
    categories: BTreeMap<i64, String>,
    current_category: Vec<Option<i64>>,
}

#[derive(Serialize)]
struct SearchResults {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: Option<i64>,
}

#[derive(Serialize)]
struct Deleted {
    deleted: i64,
}

fn required(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::BadRequest(format!("`{field}` must be a non-empty string"))),
    }
}

async fn list_questions(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<Success<QuestionsPage>>> {
    let Query(PageQuery { page }) = query?;
    let all_questions = get_all_questions(&pool).await?;
    let questions = paginate(&all_questions, page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    // categories seen on this page only, not across the whole bank
    let current_category = questions.iter().map(|q| q.category).sorted().dedup().collect();
    let categories = get_all_categories(&pool).await?;

    Ok(Success::json(QuestionsPage {
        questions,
        total_questions: all_questions.len(),
        categories: category_map(categories),
        current_category,
    }))
}

async fn delete_question(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResponse<Json<Success<Deleted>>> {
    let Path(id) = path?;
    questions::delete_question(&pool, id).await?;
    QUESTIONS_DELETED.inc();
    tracing::info!(id, "Question deleted");
    Ok(Success::json(Deleted { deleted: id }))
}

async fn create_question(
    State(pool): State<SqlitePool>,
    payload: Result<Json<QuestionBody>, JsonRejection>,
) -> ApiResponse<(StatusCode, Json<Value>)> {
    let Json(body) = payload?;
    let new_question = NewQuestion {
        question: required("question", body.question)?,
        answer: required("answer", body.answer)?,
        category: body.category,
        difficulty: body.difficulty,
    };

    let id = questions::create_question(&pool, &new_question)
        .await
        .map_err(ApiError::Unprocessable)?;
    QUESTIONS_CREATED.inc();
    tracing::info!(id, "Question created");

    Ok((StatusCode::CREATED, Json(json!({ "success": true }))))
}

async fn search(
    State(pool): State<SqlitePool>,
    query: Result<Query<PageQuery>, QueryRejection>,
    payload: Result<Json<SearchBody>, JsonRejection>,
) -> ApiResponse<Json<Success<SearchResults>>> {
    let Query(PageQuery { page }) = query?;
    let Json(body) = payload?;
    let term = required("searchTerm", body.search_term)?;

    let selection = search_questions(&pool, &term).await?;
    let questions = paginate(&selection, page).to_vec();
    tracing::debug!(term = %term, found = selection.len(), "Search");

    Ok(Success::json(SearchResults {
        total_questions: questions.len(),
        questions,
        current_category: None,
    }))
}

pub fn questions_router(state: AppState) -> Router {
    Router::new()
        .route("/questions", get(list_questions).post(create_question))
        .route("/questions/search", post(search))
        .route("/questions/{id}", delete(delete_question))
        .with_state(state)
}
