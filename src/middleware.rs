#![allow(clippy::unused_async)]

use std::convert::Infallible;

use axum::{
    http::{
        HeaderValue,
        header::{
            CONTENT_SECURITY_POLICY, REFERRER_POLICY, STRICT_TRANSPORT_SECURITY,
            X_CONTENT_TYPE_OPTIONS, X_FRAME_OPTIONS, X_XSS_PROTECTION,
        },
    },
    response::Response,
};

pub async fn security_headers(mut res: Response) -> Result<Response, Infallible> {
    let headers = res.headers_mut();

    // The API serves nothing but JSON, so nothing may be loaded from it.
    headers.append(
        CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'"),
    );
    headers.append(REFERRER_POLICY, HeaderValue::from_static("same-origin"));
    headers.append(
        STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=63072000; includeSubDomains; preload"),
    );
    headers.append(X_CONTENT_TYPE_OPTIONS, HeaderValue::from_static("nosniff"));
    headers.append(X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));
    headers.append(X_XSS_PROTECTION, HeaderValue::from_static("1; mode=block"));

    Ok(res)
}
