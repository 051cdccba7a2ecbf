use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    cookies::{Cookie, Cookies},
    extract::User,
    models::{Role, TechnicianProfile},
    repositories::{CreateUser, UserRepository},
    response::{Failure, SetCookies},
    session::{COOKIE_SESSION, COOKIE_USERNAME},
    validate,
};

#[derive(Serialize)]
struct Authenticated {
    success: bool,
    role: Role,
}

#[derive(Serialize)]
struct Invalid {
    success: bool,
    errors: Vec<&'static str>,
}

pub async fn register(mut cookies: Cookies, Json(form): Json<validate::Registration>) -> Response {
    info!(?form.username, "got register request");

    let errors = validate::registration(&form);
    if !errors.is_empty() {
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(Invalid {
                success: false,
                errors,
            }),
        )
            .into_response();
    }

    if UserRepository::find_by_email(&form.email)
        .await
        .unwrap()
        .is_some()
    {
        return Failure::new(StatusCode::BAD_REQUEST, "Email already exists").into_response();
    }

    let user_repo = UserRepository::for_user(&form.username);
    let created = user_repo
        .create_user(CreateUser {
            email: &form.email,
            password: &form.password,
            role: form.role,
            phone: &form.phone,
            address: &form.address,
        })
        .await
        .unwrap();

    if !created {
        return Failure::new(StatusCode::CONFLICT, "Username already exists").into_response();
    }

    if form.role == Role::Technician {
        let profile = TechnicianProfile {
            service_type: form
                .service_type
                .unwrap_or_else(|| "General".to_owned()),
            hourly_rate: form.hourly_rate.unwrap_or(25.0),
            experience_years: None,
            description: form.description,
            skills: form.skills,
            rating: 0.0,
            total_reviews: 0,
            is_available: true,
        };

        user_repo.save_profile(&profile).await.unwrap();
    }

    let new_token = Uuid::new_v4();
    user_repo.add_token(new_token).await.unwrap();

    cookies.add(Cookie::new(COOKIE_SESSION, new_token.to_string()));
    cookies.add(Cookie::new(COOKIE_USERNAME, form.username));

    SetCookies::new(
        Json(Authenticated {
            success: true,
            role: form.role,
        }),
        cookies,
    )
    .into_response()
}

#[derive(Deserialize)]
pub struct StrengthCheck {
    password: String,
}

#[derive(Serialize)]
struct Strength {
    score: u8,
}

/// Backs the strength meter on the registration page. The score is purely
/// derived, nothing is stored.
pub async fn strength(Json(check): Json<StrengthCheck>) -> impl IntoResponse {
    Json(Strength {
        score: validate::strength(&check.password),
    })
}

#[derive(Deserialize)]
pub struct Login {
    email: String,
    password: String,
    #[serde(default)]
    remember: bool,
}

pub async fn login(mut cookies: Cookies, Json(login): Json<Login>) -> Response {
    info!(?login.email, "got login request");

    const INVALID: Failure = Failure::new(StatusCode::UNAUTHORIZED, "Invalid credentials");

    if login.email.is_empty() || login.password.is_empty() {
        return INVALID.into_response();
    }

    let Some(username) = UserRepository::find_by_email(&login.email).await.unwrap() else {
        return INVALID.into_response();
    };

    let user_repo = UserRepository::for_user(&username);

    if !user_repo.is_valid_password(&login.password).await.unwrap() {
        return INVALID.into_response();
    }

    let info = user_repo.load_info().await.unwrap();

    let new_token = Uuid::new_v4();
    user_repo.add_token(new_token).await.unwrap();

    if login.remember {
        cookies.add(Cookie::permanent(COOKIE_SESSION, new_token.to_string()));
        cookies.add(Cookie::permanent(COOKIE_USERNAME, username));
    } else {
        cookies.add(Cookie::new(COOKIE_SESSION, new_token.to_string()));
        cookies.add(Cookie::new(COOKIE_USERNAME, username));
    }

    SetCookies::new(
        Json(Authenticated {
            success: true,
            role: info.role,
        }),
        cookies,
    )
    .into_response()
}

#[derive(Serialize)]
struct LoggedOut {
    success: bool,
}

pub async fn logout(user: User, mut cookies: Cookies) -> impl IntoResponse {
    info!(?user.username, "got logout request");

    let user_repo = UserRepository::for_user(&user.username);
    user_repo.remove_token(user.token).await.unwrap();

    cookies.remove(COOKIE_SESSION);
    cookies.remove(COOKIE_USERNAME);

    SetCookies::new(Json(LoggedOut { success: true }), cookies)
}
