use axum::{Json, extract::Path, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::{
    extract::User,
    models::{Booking, BookingStatus, Role},
    repositories::{BookingRepository, UserRepository},
    response::Error,
};

const UNAUTHORIZED: Error = Error::new(StatusCode::FORBIDDEN, "Unauthorized");
const NOT_FOUND: Error = Error::new(StatusCode::NOT_FOUND, "Booking not found");

#[derive(Deserialize)]
pub struct CreateBooking {
    technician: String,
    service_type: String,
    description: String,
    #[serde(default)]
    address: Option<String>,
    #[serde(default)]
    latitude: Option<f64>,
    #[serde(default)]
    longitude: Option<f64>,
    #[serde(default)]
    scheduled_date: Option<DateTime<Utc>>,
    estimated_hours: f64,
}

#[derive(Serialize)]
struct Created {
    success: bool,
    booking_id: Uuid,
    message: &'static str,
}

pub async fn create(
    user: User,
    Json(request): Json<CreateBooking>,
) -> Result<impl IntoResponse, Error> {
    info!(?user.username, ?request.technician, "got booking create request");

    let customer = UserRepository::for_user(&user.username)
        .load_info()
        .await
        .unwrap();

    if customer.role != Role::Customer {
        return Err(UNAUTHORIZED);
    }

    let tech_repo = UserRepository::for_user(&request.technician);

    if !tech_repo.exists().await {
        return Err(Error::new(StatusCode::NOT_FOUND, "Technician not found"));
    }

    let technician = tech_repo.load_info().await.unwrap();

    if technician.role != Role::Technician {
        return Err(Error::new(StatusCode::NOT_FOUND, "Technician not found"));
    }

    let profile = tech_repo.load_profile().await.unwrap();

    let booking = Booking {
        id: Uuid::new_v4(),
        customer: customer.username,
        technician: technician.username,
        service_type: request.service_type,
        description: request.description,
        status: BookingStatus::Pending,
        scheduled_date: request.scheduled_date,
        address: request.address.unwrap_or(customer.address),
        latitude: request.latitude,
        longitude: request.longitude,
        estimated_hours: request.estimated_hours,
        total_cost: profile.hourly_rate * request.estimated_hours,
        created_at: Utc::now(),
        completed_at: None,
        rating: None,
        review: None,
    };

    BookingRepository::create(&booking).await.unwrap();

    Ok(Json(Created {
        success: true,
        booking_id: booking.id,
        message: "Booking request sent successfully",
    }))
}

#[derive(Serialize)]
struct Bookings {
    bookings: Vec<Booking>,
}

pub async fn list(user: User) -> impl IntoResponse {
    info!(?user.username, "got booking list request");

    let account = UserRepository::for_user(&user.username)
        .load_info()
        .await
        .unwrap();

    let bookings = match account.role {
        Role::Customer => BookingRepository::list_for_customer(&user.username)
            .await
            .unwrap(),
        Role::Technician => BookingRepository::list_for_technician(&user.username)
            .await
            .unwrap(),
    };

    Json(Bookings { bookings })
}

#[derive(Deserialize)]
pub struct UpdateStatus {
    status: BookingStatus,
}

#[derive(Serialize)]
struct Updated {
    success: bool,
}

pub async fn status(
    user: User,
    Path(id): Path<Uuid>,
    Json(update): Json<UpdateStatus>,
) -> Result<impl IntoResponse, Error> {
    info!(?user.username, %id, "got booking status update request");

    let booking_repo = BookingRepository::for_booking(id);

    if !booking_repo.exists().await {
        return Err(NOT_FOUND);
    }

    let mut booking = booking_repo.load().await.unwrap();

    if booking.customer != user.username && booking.technician != user.username {
        return Err(UNAUTHORIZED);
    }

    booking.status = update.status;

    if update.status == BookingStatus::Completed {
        booking.completed_at = Some(Utc::now());
    }

    booking_repo.save(&booking).await.unwrap();

    Ok(Json(Updated { success: true }))
}

#[derive(Deserialize)]
pub struct SubmitReview {
    rating: f64,
    #[serde(default)]
    review: Option<String>,
}

pub async fn review(
    user: User,
    Path(id): Path<Uuid>,
    Json(submit): Json<SubmitReview>,
) -> Result<impl IntoResponse, Error> {
    info!(?user.username, %id, "got review request");

    let booking_repo = BookingRepository::for_booking(id);

    if !booking_repo.exists().await {
        return Err(NOT_FOUND);
    }

    let mut booking = booking_repo.load().await.unwrap();

    if booking.customer != user.username {
        return Err(UNAUTHORIZED);
    }

    if booking.status != BookingStatus::Completed {
        return Err(Error::new(
            StatusCode::BAD_REQUEST,
            "Can only review completed bookings",
        ));
    }

    booking.rating = Some(submit.rating);
    booking.review = submit.review;
    booking_repo.save(&booking).await.unwrap();

    update_technician_rating(&booking.technician).await;

    Ok(Json(Updated { success: true }))
}

/// Mean over all rated completed bookings, kept to one decimal like the
/// profile cards display it.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
async fn update_technician_rating(technician: &str) {
    let ratings = BookingRepository::list_for_technician(technician)
        .await
        .unwrap()
        .into_iter()
        .filter(|booking| booking.status == BookingStatus::Completed)
        .filter_map(|booking| booking.rating)
        .collect::<Vec<_>>();

    if ratings.is_empty() {
        return;
    }

    let average = ratings.iter().sum::<f64>() / ratings.len() as f64;

    let user_repo = UserRepository::for_user(technician);
    let mut profile = user_repo.load_profile().await.unwrap();

    profile.rating = (average * 10.0).round() / 10.0;
    profile.total_reviews = ratings.len() as u32;

    user_repo.save_profile(&profile).await.unwrap();
}
