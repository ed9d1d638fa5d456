use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod products;

/// JSON body extractor whose rejection renders as an `AppError` (`{"error": ...}`, 400).
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path extractor with the same `{"error": ...}` rejection as [`AppJson`].
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
