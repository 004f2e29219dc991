//! `Json` and `Query` extractors whose rejections render as `AppError`.
//!
//! axum's own rejections answer with a plain-text body and 415/422 codes;
//! these wrappers turn every malformed body or query string into a 400
//! with the usual `{ "error": .. }` JSON body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::errors::AppError;

#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct ApiQuery<T>(pub T);
