//! Account registration and login
//!
//! The app holds exactly one registered user. Login accepts either the
//! email or the national id as identifier; the password is compared by
//! plain equality, exactly as the reference app did (the record is
//! stored unhashed).

use crate::kv::KvStore;
use anyhow::Result;
use thiserror::Error;
use tr_core::{CredentialStore, UserRecord};
use tracing::warn;

const USER_KEY: &str = "user";

pub struct JsonCredentialStore {
    kv: KvStore,
}

impl JsonCredentialStore {
    pub fn new(kv: KvStore) -> Self {
        Self { kv }
    }
}

impl CredentialStore for JsonCredentialStore {
    fn load(&self) -> Option<UserRecord> {
        let value = self.kv.get(USER_KEY)?;
        match serde_json::from_value(value) {
            Ok(user) => Some(user),
            Err(e) => {
                warn!(error = %e, "stored user record unparsable, treating as absent");
                None
            }
        }
    }

    fn save(&self, user: &UserRecord) -> Result<()> {
        self.kv.set(USER_KEY, serde_json::to_value(user)?)
    }
}

/// Account sign-up form
#[derive(Debug, Clone)]
pub struct SignupForm {
    pub email: String,
    pub national_id: String,
    pub password: String,
    pub confirm_password: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SignupError {
    #[error("required field is empty: {0}")]
    MissingField(&'static str),

    #[error("password confirmation does not match")]
    PasswordMismatch,
}

/// Validate the form and replace the registered user.
///
/// No store write happens on validation failure.
pub fn register_user(store: &dyn CredentialStore, form: &SignupForm) -> Result<UserRecord> {
    validate_signup(form)?;
    let user = UserRecord {
        email: form.email.clone(),
        national_id: form.national_id.clone(),
        password: form.password.clone(),
    };
    store.save(&user)?;
    Ok(user)
}

fn validate_signup(form: &SignupForm) -> Result<(), SignupError> {
    if form.email.trim().is_empty() {
        return Err(SignupError::MissingField("email"));
    }
    if form.national_id.trim().is_empty() {
        return Err(SignupError::MissingField("national_id"));
    }
    if form.password.is_empty() {
        return Err(SignupError::MissingField("password"));
    }
    if form.confirm_password.is_empty() || form.confirm_password != form.password {
        return Err(SignupError::PasswordMismatch);
    }
    Ok(())
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("no account registered")]
    NoAccount,

    #[error("invalid credentials")]
    InvalidCredentials,
}

/// Check a login attempt against the stored record.
///
/// Succeeds iff `identifier` matches the email or the national id and
/// the password matches exactly.
pub fn login(
    store: &dyn CredentialStore,
    identifier: &str,
    password: &str,
) -> Result<UserRecord, LoginError> {
    let user = store.load().ok_or(LoginError::NoAccount)?;

    let identifier_ok = identifier == user.email || identifier == user.national_id;
    if identifier_ok && password == user.password {
        Ok(user)
    } else {
        Err(LoginError::InvalidCredentials)
    }
}
