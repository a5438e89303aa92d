mod categories;
mod questions;
mod quizzes;

use std::collections::BTreeMap;

use axum::Json;
use serde::Serialize;

use crate::db::Category;

use super::errors::ApiError;

pub use categories::category_router;
pub use questions::questions_router;
pub use quizzes::quizzes_router;

pub type ApiResponse<T> = Result<T, ApiError>;

pub const QUESTIONS_PER_PAGE: usize = 10;

/// Successful JSON envelope: `success: true` next to the body's own fields.
#[derive(Serialize)]
pub struct Success<T> {
    success: bool,
    #[serde(flatten)]
    body: T,
}

impl<T: Serialize> Success<T> {
    pub fn json(body: T) -> Json<Self> {
        Json(Success {
            success: true,
            body,
        })
    }
}

/// 1-indexed page of `QUESTIONS_PER_PAGE` items; empty when the page is out of range.
pub fn paginate<T>(items: &[T], page: i64) -> &[T] {
    let page = match usize::try_from(page) {
        Ok(page) if page > 0 => page,
        _ => return &[],
    };
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(QUESTIONS_PER_PAGE).min(items.len());
    &items[start..end]
}

pub fn category_map(categories: Vec<Category>) -> BTreeMap<i64, String> {
    categories.into_iter().map(|c| (c.id, c.kind)).collect()
}
