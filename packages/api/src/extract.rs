// ABOUTME: axum extractors whose rejections render as AppError
// ABOUTME: Keeps malformed bodies, queries and path parameters in the same error envelope

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// JSON body extractor that rejects with a validation error
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor that rejects with a validation error
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor that rejects with a validation error
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct ApiPath<T>(pub T);
