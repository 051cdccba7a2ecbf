pub use self::{
    booking::BookingRepository,
    service::ServiceRepository,
    settings::SettingsRepository,
    user::{CreateUser, UserRepository},
};

mod booking;
mod service;
mod settings;
mod user;
