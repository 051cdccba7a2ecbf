use axum::{Json, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{extract::User, models::Role, repositories::UserRepository};

#[derive(Serialize)]
struct Profile {
    service_type: Option<String>,
    hourly_rate: Option<f64>,
    rating: Option<f64>,
}

#[derive(Serialize)]
struct UserInfo {
    username: String,
    email: String,
    role: Role,
    profile: Profile,
}

pub async fn info(user: User) -> impl IntoResponse {
    info!(?user.username, "got user info request");

    let user_repo = UserRepository::for_user(&user.username);
    let account = user_repo.load_info().await.unwrap();

    let profile = if account.role == Role::Technician {
        Some(user_repo.load_profile().await.unwrap())
    } else {
        None
    };

    Json(UserInfo {
        username: account.username,
        email: account.email,
        role: account.role,
        profile: Profile {
            service_type: profile.as_ref().map(|p| p.service_type.clone()),
            hourly_rate: profile.as_ref().map(|p| p.hourly_rate),
            rating: profile.as_ref().map(|p| p.rating),
        },
    })
}

#[derive(Deserialize)]
pub struct Location {
    latitude: f64,
    longitude: f64,
}

#[derive(Serialize)]
struct Updated {
    success: bool,
}

pub async fn location(user: User, Json(location): Json<Location>) -> impl IntoResponse {
    info!(?user.username, "got location update request");

    UserRepository::for_user(&user.username)
        .set_location(location.latitude, location.longitude)
        .await
        .unwrap();

    Json(Updated { success: true })
}
