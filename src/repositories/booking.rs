use std::{cmp::Reverse, io::ErrorKind};

use anyhow::Result;
use tokio::fs;
use uuid::Uuid;

use crate::{dirs::DIRS, models::Booking};

pub struct BookingRepository {
    id: Uuid,
}

impl BookingRepository {
    pub fn for_booking(id: Uuid) -> Self {
        Self { id }
    }

    pub async fn exists(&self) -> bool {
        fs::metadata(DIRS.booking_file(self.id)).await.is_ok()
    }

    pub async fn create(booking: &Booking) -> Result<()> {
        fs::create_dir_all(DIRS.bookings_dir()).await?;

        Self::for_booking(booking.id).save(booking).await
    }

    pub async fn load(&self) -> Result<Booking> {
        let data = fs::read(DIRS.booking_file(self.id)).await?;
        serde_json::from_slice(&data).map_err(Into::into)
    }

    pub async fn save(&self, booking: &Booking) -> Result<()> {
        let real_file = DIRS.booking_file(self.id);
        let temp_file = DIRS.booking_temp_file(self.id);

        let buf = serde_json::to_vec_pretty(booking)?;
        fs::write(&temp_file, &buf).await?;
        fs::rename(temp_file, real_file).await?;

        Ok(())
    }

    pub async fn list_for_customer(user: &str) -> Result<Vec<Booking>> {
        Self::list_filtered(|booking| booking.customer == user).await
    }

    pub async fn list_for_technician(user: &str) -> Result<Vec<Booking>> {
        Self::list_filtered(|booking| booking.technician == user).await
    }

    /// Newest first, matching the dashboards that show recent activity on top.
    async fn list_filtered(keep: impl Fn(&Booking) -> bool) -> Result<Vec<Booking>> {
        let mut entries = match fs::read_dir(DIRS.bookings_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut bookings = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();

            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }

            let buf = fs::read(&path).await?;
            let booking = serde_json::from_slice::<Booking>(&buf)?;

            if keep(&booking) {
                bookings.push(booking);
            }
        }

        bookings.sort_by_key(|booking| Reverse(booking.created_at));

        Ok(bookings)
    }
}
