//! Extractors whose rejections are reported as [`AppError`] JSON bodies.

use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Path` with a JSON 400 on malformed segments
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// `axum::extract::Query` with a JSON 400 on malformed query strings
#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);
