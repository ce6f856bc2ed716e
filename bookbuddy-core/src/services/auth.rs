//! Auth service - registration, login and the active profile
//!
//! Passwords are stored as Argon2id PHC strings.

use std::sync::Arc;

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use rand::Rng;
use tracing::info;

use super::validation::{validate_login, validate_registration, RegistrationData, FIELD_EMAIL};
use crate::domain::result::{Error, Result};
use crate::domain::UserProfile;
use crate::ports::CatalogRepository;

pub struct AuthService {
    repository: Arc<dyn CatalogRepository>,
}

impl AuthService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    /// Register a new reader and log them in
    pub fn register(&self, data: &RegistrationData) -> Result<UserProfile> {
        validate_registration(data).into_result()?;

        if self.repository.user_exists(&data.email) {
            return Err(Error::validation(
                FIELD_EMAIL,
                "An account with this email already exists",
            ));
        }

        let profile = UserProfile::new(data.username.trim(), &data.email);
        self.register_profile(profile, &data.password)
    }

    /// Store a prepared profile with a password, bypassing form validation
    pub(crate) fn register_profile(&self, profile: UserProfile, password: &str) -> Result<UserProfile> {
        let hash = hash_password(password)?;
        if !self.repository.register_user(profile.clone(), hash) {
            return Err(Error::validation(
                FIELD_EMAIL,
                "An account with this email already exists",
            ));
        }

        info!(username = %profile.username, "registered new user");
        self.repository
            .current_user()
            .ok_or(Error::NoActiveUser)
    }

    /// Log in with email and password
    ///
    /// Unknown email and wrong password fail the same way.
    pub fn login(&self, email: &str, password: &str) -> Result<UserProfile> {
        validate_login(email, password).into_result()?;

        let hash = self
            .repository
            .password_hash(email)
            .ok_or(Error::InvalidCredentials)?;
        if !verify_password(password, &hash) {
            info!("login rejected");
            return Err(Error::InvalidCredentials);
        }

        let profile = self
            .repository
            .activate_user(email)
            .ok_or(Error::InvalidCredentials)?;
        info!(username = %profile.username, "logged in");
        Ok(profile)
    }

    pub fn logout(&self) {
        self.repository.logout();
        info!("logged out");
    }

    pub fn current_user(&self) -> Option<UserProfile> {
        self.repository.current_user()
    }

    pub fn require_user(&self) -> Result<UserProfile> {
        self.current_user().ok_or(Error::NoActiveUser)
    }

    /// Save changes to the active profile
    pub fn update_profile(&self, profile: UserProfile) -> Result<UserProfile> {
        if !self.repository.update_user_profile(profile) {
            return Err(Error::NoActiveUser);
        }
        self.require_user()
    }

    /// Simulated password reset: succeeds iff the email is registered
    pub fn reset_password(&self, email: &str) -> bool {
        let known = self.repository.user_exists(email);
        if known {
            info!("password reset requested");
        }
        known
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt_bytes: [u8; 16] = rand::thread_rng().gen();
    let salt = SaltString::encode_b64(&salt_bytes)
        .map_err(|e| Error::Other(format!("Failed to encode salt: {}", e)))?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| Error::Other(format!("Failed to hash password: {}", e)))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}
