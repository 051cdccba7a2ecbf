use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    extract::User,
    geo::{self, Coordinates},
    models::Role,
    repositories::UserRepository,
    response::Error,
};

const UNAUTHORIZED: Error = Error::new(StatusCode::FORBIDDEN, "Unauthorized");
const DEFAULT_MAX_DISTANCE_KM: f64 = 50.0;

#[derive(Deserialize)]
pub struct Search {
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    service_type: Option<String>,
    #[serde(default)]
    max_distance: Option<f64>,
}

#[derive(Serialize)]
struct Matches {
    technicians: Vec<Match>,
}

#[derive(Serialize)]
struct Match {
    username: String,
    service_type: String,
    experience_years: Option<u32>,
    hourly_rate: f64,
    rating: f64,
    total_reviews: u32,
    description: String,
    distance: f64,
    skills: Vec<String>,
}

pub async fn search(user: User, Json(search): Json<Search>) -> Result<impl IntoResponse, Error> {
    info!(?user.username, "got technician search request");

    let account = UserRepository::for_user(&user.username)
        .load_info()
        .await
        .unwrap();

    if account.role != Role::Customer {
        return Err(UNAUTHORIZED);
    }

    let origin = Coordinates {
        latitude: search.latitude,
        longitude: search.longitude,
    };
    let max_distance = search.max_distance.unwrap_or(DEFAULT_MAX_DISTANCE_KM);
    let service = search.service_type.unwrap_or_default().to_lowercase();

    let mut matches = Vec::new();

    for (info, profile) in UserRepository::list_technicians().await.unwrap() {
        if !profile.is_available {
            continue;
        }

        if !service.is_empty() && !profile.service_type.to_lowercase().contains(&service) {
            continue;
        }

        let (Some(latitude), Some(longitude)) = (info.latitude, info.longitude) else {
            continue;
        };

        let distance = geo::distance_km(
            origin,
            Coordinates {
                latitude,
                longitude,
            },
        );

        if distance > max_distance {
            continue;
        }

        matches.push(Match {
            username: info.username,
            service_type: profile.service_type,
            experience_years: profile.experience_years,
            hourly_rate: profile.hourly_rate,
            rating: profile.rating,
            total_reviews: profile.total_reviews,
            description: profile.description,
            distance: (distance * 100.0).round() / 100.0,
            skills: profile.skills,
        });
    }

    matches.sort_by(|a, b| a.distance.total_cmp(&b.distance));

    Ok(Json(Matches {
        technicians: matches,
    }))
}

#[derive(Deserialize)]
pub struct Availability {
    is_available: bool,
}

#[derive(Serialize)]
struct Updated {
    success: bool,
}

pub async fn availability(
    user: User,
    Json(availability): Json<Availability>,
) -> Result<impl IntoResponse, Error> {
    info!(
        ?user.username,
        available = availability.is_available,
        "got availability update request"
    );

    let user_repo = UserRepository::for_user(&user.username);
    let account = user_repo.load_info().await.unwrap();

    if account.role != Role::Technician {
        return Err(UNAUTHORIZED);
    }

    let mut profile = user_repo.load_profile().await.unwrap();
    profile.is_available = availability.is_available;
    user_repo.save_profile(&profile).await.unwrap();

    Ok(Json(Updated { success: true }))
}
