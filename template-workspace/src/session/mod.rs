//! Session guard: owns the bearer credential, attaches it to outbound calls
//! and tears the session down when the store rejects it.

mod store;

pub use store::CredentialStore;

use reqwest::{RequestBuilder, StatusCode};
use std::fmt;

use crate::error::SessionStoreError;

/// Opaque bearer token. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// Adds the bearer credential to an outbound request.
pub fn attach_credential(request: RequestBuilder, credential: &Credential) -> RequestBuilder {
    request.bearer_auth(credential.expose())
}

/// True exactly when the store signals the credential is no longer valid.
pub fn is_rejected(status: StatusCode) -> bool {
    status == StatusCode::UNAUTHORIZED
}

pub struct SessionGuard {
    store: CredentialStore,
    credential: Option<Credential>,
}

impl SessionGuard {
    /// Builds the guard from persisted storage. A missing credential is not
    /// an error here; callers check `is_authenticated` and redirect.
    pub fn restore(store: CredentialStore) -> Result<Self, SessionStoreError> {
        let credential = store.load()?;
        if credential.is_none() {
            log::info!("No stored credential in {}", store.path().display());
        }
        Ok(Self { store, credential })
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.is_some()
    }

    /// Adopts a freshly issued credential and persists it.
    pub fn establish(&mut self, credential: Credential) -> Result<(), SessionStoreError> {
        self.store.store(&credential)?;
        self.credential = Some(credential);
        log::info!("Session established");
        Ok(())
    }

    /// Drops the credential in memory and on disk. It is never reused.
    pub fn reject(&mut self) {
        self.credential = None;
        if let Err(e) = self.store.clear() {
            log::error!("Failed to clear persisted credential: {}", e);
        }
        log::warn!("Session credential rejected, re-authentication required");
    }
}
