use std::{io::ErrorKind, sync::LazyLock};

use anyhow::{Context, Result};
use tokio::{fs, sync::RwLock};

use crate::{cookies, dirs::DIRS, models::Settings};

static STATE: LazyLock<RwLock<Settings>> = LazyLock::new(|| RwLock::new(Settings::default()));

pub struct SettingsRepository {
    _priv: (),
}

impl SettingsRepository {
    pub fn new() -> Self {
        Self { _priv: () }
    }

    pub async fn init() -> Result<()> {
        let settings = load().await?;
        *STATE.write().await = settings;

        Ok(())
    }

    pub async fn get_key(&self) -> [u8; 64] {
        STATE.read().await.key
    }
}

async fn load() -> Result<Settings> {
    let buf = match fs::read(DIRS.settings_file()).await {
        Ok(buf) => buf,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            let settings = Settings {
                key: cookies::generate_key(),
            };

            save(&settings)
                .await
                .context("failed saving default settings")?;

            return Ok(settings);
        }
        Err(e) => return Err(e).context("failed loading settings"),
    };

    serde_json::from_slice(&buf).context("failed parsing settings")
}

async fn save(settings: &Settings) -> Result<()> {
    fs::create_dir_all(DIRS.data_dir()).await?;

    let real_file = DIRS.settings_file();
    let temp_file = DIRS.settings_temp_file();

    let buf = serde_json::to_vec_pretty(settings)?;

    fs::write(&temp_file, &buf).await?;
    fs::rename(temp_file, real_file).await?;

    Ok(())
}
