use std::collections::BTreeMap;

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    routing::get,
    Json, Router,
};
use serde::Serialize;
use sqlx::SqlitePool;

use crate::{
    db::{
        queries::{
            categories::{get_all_categories, get_category},
            questions::get_questions_for_category,
        },
        Question,
    },
    server::{app::AppState, deserializers::PageQuery, errors::ApiError},
};

use super::{category_map, paginate, ApiResponse, Success};

#[derive(Serialize)]
struct CategoriesBody {
    categories: BTreeMap<i64, String>,
}

#[derive(Serialize)]
struct CategoryQuestionsBody {
    questions: Vec<Question>,
    total_questions: usize,
    current_category: i64,
}

async fn categories(State(pool): State<SqlitePool>) -> ApiResponse<Json<Success<CategoriesBody>>> {
    let categories = get_all_categories(&pool).await?;
    if categories.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Success::json(CategoriesBody {
        categories: category_map(categories),
    }))
}

async fn category_questions(
    State(pool): State<SqlitePool>,
    path: Result<Path<i64>, PathRejection>,
    query: Result<Query<PageQuery>, QueryRejection>,
) -> ApiResponse<Json<Success<CategoryQuestionsBody>>> {
    let Path(id) = path?;
    let Query(PageQuery { page }) = query?;
    // unknown categories are a plain 404 rather than an empty page
    get_category(&pool, id).await?;
    let selection = get_questions_for_category(&pool, id).await?;
    let questions = paginate(&selection, page).to_vec();
    if questions.is_empty() {
        return Err(ApiError::NotFound);
    }
    Ok(Success::json(CategoryQuestionsBody {
        questions,
        total_questions: selection.len(),
        current_category: id,
    }))
}

pub fn category_router(state: AppState) -> Router {
    Router::new()
        .route("/categories", get(categories))
        .route("/categories/{id}/questions", get(category_questions))
        .with_state(state)
}
