use std::convert::Infallible;

use axum::{
    extract::{FromRequestParts, OptionalFromRequestParts},
    http::{StatusCode, request::Parts},
};
use uuid::Uuid;

use crate::{
    cookies::Cookies,
    repositories::UserRepository,
    response::Error,
    session::{COOKIE_SESSION, COOKIE_USERNAME},
};

const FORBIDDEN: Error = Error::new(StatusCode::FORBIDDEN, "Unauthorized");
const INTERNAL_SERVER_ERROR: Error =
    Error::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error");

#[derive(Debug)]
pub struct User {
    pub username: String,
    pub token: Uuid,
}

impl User {
    fn from_cookies(cookies: &Cookies) -> Option<Self> {
        let username = cookies.get(COOKIE_USERNAME)?.value().to_owned();
        let token = cookies.get(COOKIE_SESSION)?.value().parse().ok()?;

        Some(Self { username, token })
    }
}

impl<S> FromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = Cookies::from_request_parts(parts, state)
            .await
            .ok()
            .and_then(|cookies| Self::from_cookies(&cookies))
            .ok_or(FORBIDDEN)?;

        let repo = UserRepository::for_user(&user.username);

        if repo.exists().await {
            repo.is_valid_token(user.token)
                .await
                .map_err(|_| INTERNAL_SERVER_ERROR)?
                .then_some(user)
                .ok_or(FORBIDDEN)
        } else {
            Err(FORBIDDEN)
        }
    }
}

impl<S> OptionalFromRequestParts<S> for User
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &S,
    ) -> Result<Option<Self>, Self::Rejection> {
        Ok(<Self as FromRequestParts<S>>::from_request_parts(parts, state)
            .await
            .ok())
    }
}
