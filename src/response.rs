use axum::{
    Json,
    http::{StatusCode, header::SET_COOKIE},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::cookies::Cookies;

/// Plain error answer, `{"error": "..."}`.
pub struct Error {
    code: StatusCode,
    message: &'static str,
}

impl Error {
    pub const fn new(code: StatusCode, message: &'static str) -> Self {
        Self { code, message }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: &'static str,
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, Json(ErrorBody { error: self.message })).into_response()
    }
}

/// Rejected operation, `{"success": false, "message": "..."}`, as answered by
/// the auth endpoints.
pub struct Failure {
    code: StatusCode,
    message: &'static str,
}

impl Failure {
    pub const fn new(code: StatusCode, message: &'static str) -> Self {
        Self { code, message }
    }
}

#[derive(Serialize)]
struct FailureBody {
    success: bool,
    message: &'static str,
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (
            self.code,
            Json(FailureBody {
                success: false,
                message: self.message,
            }),
        )
            .into_response()
    }
}

pub struct SetCookies<T> {
    inner: T,
    cookies: Cookies,
}

impl<T> SetCookies<T> {
    pub fn new(inner: T, cookies: Cookies) -> Self {
        Self { inner, cookies }
    }
}

impl<T> IntoResponse for SetCookies<T>
where
    T: IntoResponse,
{
    fn into_response(self) -> Response {
        let mut res = self.inner.into_response();
        let headers = res.headers_mut();

        for cookie in self.cookies.delta() {
            headers.append(SET_COOKIE, cookie.to_string().try_into().unwrap());
        }

        res
    }
}
