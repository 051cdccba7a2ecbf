#![allow(clippy::unused_async)]

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use tracing::info;

use crate::{
    extract::User,
    models::Role,
    repositories::{ServiceRepository, UserRepository},
    response::Error,
};

pub mod auth;
pub mod booking;
pub mod technician;
pub mod user;

#[derive(Serialize)]
struct Index {
    service: &'static str,
    authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<Role>,
}

pub async fn index(user: Option<User>) -> impl IntoResponse {
    info!(authorized = user.is_some(), "got index request");

    let mut index = Index {
        service: env!("CARGO_PKG_NAME"),
        authenticated: false,
        username: None,
        role: None,
    };

    if let Some(user) = user {
        let info = UserRepository::for_user(&user.username)
            .load_info()
            .await
            .unwrap();

        index.authenticated = true;
        index.username = Some(info.username);
        index.role = Some(info.role);
    }

    Json(index)
}

#[derive(Serialize)]
struct Services {
    services: Vec<String>,
}

pub async fn services() -> impl IntoResponse {
    info!("got services request");

    let services = ServiceRepository::new().names().await.unwrap();

    Json(Services { services })
}

pub async fn handle_404() -> impl IntoResponse {
    Error::new(StatusCode::NOT_FOUND, "Not found")
}
