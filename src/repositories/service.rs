use std::io::ErrorKind;

use anyhow::{Context, Result};
use tokio::fs;

use crate::{dirs::DIRS, models::Service};

pub struct ServiceRepository {
    _priv: (),
}

impl ServiceRepository {
    pub fn new() -> Self {
        Self { _priv: () }
    }

    /// Seeds the default catalog on first start, so search and registration
    /// have something to offer right away.
    pub async fn init() -> Result<()> {
        match fs::metadata(DIRS.services_file()).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => save(&default_catalog())
                .await
                .context("failed seeding default services"),
            Err(e) => Err(e).context("failed loading services"),
        }
    }

    pub async fn list(&self) -> Result<Vec<Service>> {
        let buf = fs::read(DIRS.services_file()).await?;
        serde_json::from_slice(&buf).map_err(Into::into)
    }

    pub async fn names(&self) -> Result<Vec<String>> {
        let mut names = self
            .list()
            .await?
            .into_iter()
            .map(|service| service.name)
            .collect::<Vec<_>>();

        names.sort();
        names.dedup();

        Ok(names)
    }
}

async fn save(services: &[Service]) -> Result<()> {
    fs::create_dir_all(DIRS.data_dir()).await?;

    let real_file = DIRS.services_file();
    let temp_file = DIRS.services_temp_file();

    let buf = serde_json::to_vec_pretty(services)?;

    fs::write(&temp_file, &buf).await?;
    fs::rename(temp_file, real_file).await?;

    Ok(())
}

fn default_catalog() -> Vec<Service> {
    [
        ("Plumbing", "Fix leaks, install fixtures, clear drains"),
        ("Electrical", "Wiring, lighting, electrical repairs"),
        ("HVAC", "Heating, ventilation, air conditioning"),
        ("Carpentry", "Furniture, cabinets, structural work"),
        ("Painting", "Interior and exterior painting"),
        ("Cleaning", "Residential and commercial cleaning"),
        ("Appliance Repair", "Fix household appliances"),
        ("General Handyman", "Various home repairs"),
    ]
    .into_iter()
    .map(|(name, description)| Service {
        name: name.to_owned(),
        description: description.to_owned(),
    })
    .collect()
}
