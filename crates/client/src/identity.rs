//! Identity capability that gates listing creation.

use std::collections::HashMap;

use argon2::{
    password_hash::{PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use async_trait::async_trait;
use rand::rngs::OsRng;
use tokio::sync::{watch, RwLock};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::errors::ClientError;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub display_name: Option<String>,
}

#[derive(Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self { email: email.into(), password: password.into() }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials").field("email", &self.email).finish_non_exhaustive()
    }
}

/// Source of the signed-in identity.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, ClientError>;

    fn current_identity(&self) -> Option<Identity>;

    /// Receiver that observes every sign-in and sign-out.
    fn on_identity_change(&self) -> watch::Receiver<Option<Identity>>;

    async fn sign_out(&self);
}

struct Account {
    identity: Identity,
    password_hash: String,
}

/// In-process provider holding argon2-hashed credentials.
pub struct LocalIdentityProvider {
    accounts: RwLock<HashMap<String, Account>>,
    current: watch::Sender<Option<Identity>>,
}

impl Default for LocalIdentityProvider {
    fn default() -> Self {
        let (current, _) = watch::channel(None);
        Self { accounts: RwLock::new(HashMap::new()), current }
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl LocalIdentityProvider {
    pub fn new() -> Self { Self::default() }

    /// Create an account. Does not sign it in.
    #[instrument(skip(self, credentials, display_name), fields(email = %credentials.email))]
    pub async fn register(&self, credentials: &Credentials, display_name: Option<String>) -> Result<Identity, ClientError> {
        let email = normalize_email(&credentials.email);
        if email.is_empty() || !email.contains('@') {
            return Err(ClientError::Identity("a valid email is required".into()));
        }
        if credentials.password.len() < MIN_PASSWORD_LEN {
            return Err(ClientError::Identity(format!("password too short (>={MIN_PASSWORD_LEN})")));
        }

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&email) {
            debug!("account exists");
            return Err(ClientError::Identity("email already registered".into()));
        }

        let salt = SaltString::generate(&mut OsRng);
        let password_hash = Argon2::default()
            .hash_password(credentials.password.as_bytes(), &salt)
            .map_err(|e| ClientError::Identity(e.to_string()))?
            .to_string();

        let identity = Identity { id: Uuid::new_v4(), email: email.clone(), display_name };
        accounts.insert(email, Account { identity: identity.clone(), password_hash });
        info!(user_id = %identity.id, "account_registered");
        Ok(identity)
    }
}

#[async_trait]
impl IdentityProvider for LocalIdentityProvider {
    #[instrument(skip(self, credentials), fields(email = %credentials.email))]
    async fn authenticate(&self, credentials: &Credentials) -> Result<Identity, ClientError> {
        let accounts = self.accounts.read().await;
        let account = accounts
            .get(&normalize_email(&credentials.email))
            .ok_or_else(|| ClientError::Identity("invalid email or password".into()))?;

        let parsed = PasswordHash::new(&account.password_hash).map_err(|e| ClientError::Identity(e.to_string()))?;
        if Argon2::default().verify_password(credentials.password.as_bytes(), &parsed).is_err() {
            return Err(ClientError::Identity("invalid email or password".into()));
        }

        let identity = account.identity.clone();
        self.current.send_replace(Some(identity.clone()));
        info!(user_id = %identity.id, "signed_in");
        Ok(identity)
    }

    fn current_identity(&self) -> Option<Identity> {
        self.current.borrow().clone()
    }

    fn on_identity_change(&self) -> watch::Receiver<Option<Identity>> {
        self.current.subscribe()
    }

    async fn sign_out(&self) {
        if self.current.send_replace(None).is_some() {
            info!("signed_out");
        }
    }
}
