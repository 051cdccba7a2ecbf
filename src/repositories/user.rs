use std::{collections::HashSet, io::ErrorKind};

use anyhow::Result;
use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use camino::Utf8PathBuf;
use chrono::Utc;
use tokio::fs;
use uuid::Uuid;

use crate::{
    dirs::DIRS,
    models::{Role, TechnicianProfile, UserAccount},
};

pub struct CreateUser<'a> {
    pub email: &'a str,
    pub password: &'a str,
    pub role: Role,
    pub phone: &'a str,
    pub address: &'a str,
}

pub struct UserRepository<'a> {
    user: &'a str,
}

impl<'a> UserRepository<'a> {
    pub fn for_user(user: &'a str) -> Self {
        Self { user }
    }

    pub async fn exists(&self) -> bool {
        fs::metadata(DIRS.user_info_file(self.user)).await.is_ok()
    }

    pub async fn create_user(&self, new: CreateUser<'_>) -> Result<bool> {
        if self.exists().await {
            return Ok(false);
        }

        let data = serde_json::to_vec_pretty(&UserAccount {
            username: self.user.to_owned(),
            email: new.email.to_owned(),
            password: hash_password(new.password)?,
            role: new.role,
            phone: new.phone.to_owned(),
            address: new.address.to_owned(),
            latitude: None,
            longitude: None,
            created_at: Utc::now(),
        })?;

        fs::create_dir_all(DIRS.user_dir(self.user)).await?;
        fs::write(DIRS.user_info_file(self.user), data).await?;

        Ok(true)
    }

    pub async fn is_valid_password(&self, password: &str) -> Result<bool> {
        let user_file = fs::read(DIRS.user_info_file(self.user)).await?;

        let data = serde_json::from_slice::<UserAccount>(&user_file)?;

        verify_password(password, &data.password)
    }

    pub async fn is_valid_token(&self, token: Uuid) -> Result<bool> {
        let token_file = match fs::read(DIRS.user_tokens_file(self.user)).await {
            Ok(buf) => buf,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(false),
            Err(e) => return Err(e.into()),
        };

        let tokens = serde_json::from_slice::<HashSet<Uuid>>(&token_file)?;

        Ok(tokens.contains(&token))
    }

    pub async fn add_token(&self, token: Uuid) -> Result<()> {
        self.edit_tokens(|tokens| {
            tokens.insert(token);
        })
        .await
    }

    pub async fn remove_token(&self, token: Uuid) -> Result<()> {
        self.edit_tokens(|tokens| {
            tokens.remove(&token);
        })
        .await
    }

    pub async fn load_info(&self) -> Result<UserAccount> {
        let data = fs::read(DIRS.user_info_file(self.user)).await?;
        serde_json::from_slice(&data).map_err(Into::into)
    }

    pub async fn save_info(&self, info: &UserAccount) -> Result<()> {
        let real_file = DIRS.user_info_file(self.user);
        let temp_file = DIRS.user_info_temp_file(self.user);

        let buf = serde_json::to_vec_pretty(info)?;
        fs::write(&temp_file, &buf).await?;
        fs::rename(temp_file, real_file).await?;

        Ok(())
    }

    pub async fn load_profile(&self) -> Result<TechnicianProfile> {
        let data = fs::read(DIRS.user_profile_file(self.user)).await?;
        serde_json::from_slice(&data).map_err(Into::into)
    }

    pub async fn save_profile(&self, profile: &TechnicianProfile) -> Result<()> {
        let real_file = DIRS.user_profile_file(self.user);
        let temp_file = DIRS.user_profile_temp_file(self.user);

        let buf = serde_json::to_vec_pretty(profile)?;
        fs::write(&temp_file, &buf).await?;
        fs::rename(temp_file, real_file).await?;

        Ok(())
    }

    pub async fn set_location(&self, latitude: f64, longitude: f64) -> Result<()> {
        let mut info = self.load_info().await?;
        info.latitude = Some(latitude);
        info.longitude = Some(longitude);

        self.save_info(&info).await
    }

    pub async fn find_by_email(email: &str) -> Result<Option<String>> {
        let mut entries = match fs::read_dir(DIRS.users_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        while let Some(entry) = entries.next_entry().await? {
            let path = Utf8PathBuf::try_from(entry.path())?;
            let file_name = path.file_name().unwrap();

            let user_repo = UserRepository::for_user(file_name);

            if !user_repo.exists().await {
                continue;
            }

            let info = user_repo.load_info().await?;

            if info.email.eq_ignore_ascii_case(email) {
                return Ok(Some(info.username));
            }
        }

        Ok(None)
    }

    pub async fn list_technicians() -> Result<Vec<(UserAccount, TechnicianProfile)>> {
        let mut entries = match fs::read_dir(DIRS.users_dir()).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        let mut technicians = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            let path = Utf8PathBuf::try_from(entry.path())?;
            let file_name = path.file_name().unwrap();

            let user_repo = UserRepository::for_user(file_name);

            if !user_repo.exists().await {
                continue;
            }

            let info = user_repo.load_info().await?;

            if info.role != Role::Technician {
                continue;
            }

            // Accounts can exist without a profile when a previous
            // registration was interrupted halfway. Skip those.
            let buf = match fs::read(DIRS.user_profile_file(file_name)).await {
                Ok(buf) => buf,
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => return Err(e.into()),
            };

            technicians.push((info, serde_json::from_slice(&buf)?));
        }

        Ok(technicians)
    }

    async fn edit_tokens(&self, edit: impl Fn(&mut HashSet<Uuid>)) -> Result<()> {
        let real_file = DIRS.user_tokens_file(self.user);
        let temp_file = DIRS.user_tokens_temp_file(self.user);

        let mut tokens = match fs::read(&real_file).await {
            Ok(buf) => serde_json::from_slice::<HashSet<Uuid>>(&buf)?,
            Err(e) if e.kind() == ErrorKind::NotFound => HashSet::default(),
            Err(e) => return Err(e.into()),
        };

        edit(&mut tokens);

        let buf = serde_json::to_vec_pretty(&tokens)?;
        fs::write(&temp_file, &buf).await?;
        fs::rename(temp_file, real_file).await?;

        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hasher = Argon2::default();

    Ok(hasher
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let hash = PasswordHash::new(hash)?;
    let hasher = Argon2::default();

    Ok(hasher.verify_password(password.as_bytes(), &hash).is_ok())
}
