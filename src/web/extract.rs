//! API extractors whose rejections surface as `crate::Error`, so a bad body
//! or id gets the same JSON error shape as every other API failure.

use axum::extract::{FromRequest, FromRequestParts};

use crate::Error;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(Error))]
pub struct ApiJson<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(Error))]
pub struct ApiPath<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(Error))]
pub struct ApiQuery<T>(pub T);
