//! Identity collaborator seam
//!
//! The surrounding system authenticates requests and hands the core a
//! verified user identifier. Token mechanics (JWT signing, hashing) live in
//! the host application; this module only defines the contract and a small
//! in-process implementation for tests and tooling.

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::types::UserId;

/// Supplies verified user identifiers to the core.
pub trait IdentityProvider {
    /// Verify a bearer credential and return the user it identifies.
    /// Missing or invalid credentials yield [`CoreError::Unauthorized`].
    fn verify(&self, token: &str) -> Result<UserId, CoreError>;

    /// Confirm a previously issued user identifier still resolves.
    /// Unknown users yield [`CoreError::NotFound`].
    fn resolve(&self, user: &UserId) -> Result<(), CoreError>;
}

/// Fixed token-to-user map. The in-process implementation used by tests and
/// the CLI; real deployments substitute their own provider.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity {
    tokens: HashMap<String, UserId>,
    users: HashSet<UserId>,
}

impl StaticIdentity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a credential for a user.
    pub fn register(&mut self, token: impl Into<String>, user: UserId) {
        self.users.insert(user.clone());
        self.tokens.insert(token.into(), user);
    }
}

impl IdentityProvider for StaticIdentity {
    fn verify(&self, token: &str) -> Result<UserId, CoreError> {
        if token.trim().is_empty() {
            return Err(CoreError::Unauthorized("missing credential".to_string()));
        }
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| CoreError::Unauthorized("invalid credential".to_string()))
    }

    fn resolve(&self, user: &UserId) -> Result<(), CoreError> {
        if self.users.contains(user) {
            Ok(())
        } else {
            Err(CoreError::NotFound(format!("user {user}")))
        }
    }
}
