use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::{Utf8Path, Utf8PathBuf};
use unidirs::{Directories, UnifiedDirs};
use uuid::Uuid;

// Unwrap: We can't run the server without knowing where to place files, so panic here as there is
// no good recovery case other than throwing an error and shutting down.
pub static DIRS: LazyLock<Utf8ProjectDirs> = LazyLock::new(|| Utf8ProjectDirs::new().unwrap());

pub struct Utf8ProjectDirs {
    data_dir: Utf8PathBuf,
}

impl Utf8ProjectDirs {
    fn new() -> Result<Self> {
        let dirs = UnifiedDirs::simple("io", "handiwork", env!("CARGO_PKG_NAME"))
            .default()
            .context("failed finding project dirs")?;

        Ok(Self {
            data_dir: dirs.data_dir().to_owned(),
        })
    }

    #[inline]
    pub fn data_dir(&self) -> &Utf8Path {
        &self.data_dir
    }

    pub fn settings_file(&self) -> Utf8PathBuf {
        self.data_dir.join("settings.json")
    }

    pub fn settings_temp_file(&self) -> Utf8PathBuf {
        self.data_dir.join("settings.json.tmp")
    }

    pub fn services_file(&self) -> Utf8PathBuf {
        self.data_dir.join("services.json")
    }

    pub fn services_temp_file(&self) -> Utf8PathBuf {
        self.data_dir.join("services.json.tmp")
    }

    pub fn users_dir(&self) -> Utf8PathBuf {
        self.data_dir.join("users")
    }

    pub fn user_dir(&self, user: &str) -> Utf8PathBuf {
        self.users_dir().join(user)
    }

    pub fn user_info_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("info.json")
    }

    pub fn user_info_temp_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("info.json.tmp")
    }

    pub fn user_profile_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("profile.json")
    }

    pub fn user_profile_temp_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("profile.json.tmp")
    }

    pub fn user_tokens_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("tokens.json")
    }

    pub fn user_tokens_temp_file(&self, user: &str) -> Utf8PathBuf {
        self.user_dir(user).join("tokens.json.tmp")
    }

    pub fn bookings_dir(&self) -> Utf8PathBuf {
        self.data_dir.join("bookings")
    }

    pub fn booking_file(&self, id: Uuid) -> Utf8PathBuf {
        self.bookings_dir().join(format!("{id}.json"))
    }

    pub fn booking_temp_file(&self, id: Uuid) -> Utf8PathBuf {
        self.bookings_dir().join(format!("{id}.json.tmp"))
    }
}
