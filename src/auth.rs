//! Access control contract for POS operations.
//!
//! The checkout engine and catalog management only run for an authorized
//! caller. This module defines that boundary: a gate turns an opaque caller
//! token into a [`Principal`] or rejects it. The shipped implementation is
//! a static token map loadable from environment variables; the mechanics of
//! producing tokens (password login, session issuance) live outside this
//! crate.

use crate::errors::{Error, Result};
use std::collections::HashMap;

/// Role attached to an authenticated caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Full access: catalog management, checkout, history
    Admin,
    /// Ring up orders only
    Cashier,
}

/// An authenticated caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    /// Stable identifier for the caller
    pub user_id: String,
    /// The caller's role
    pub role: Role,
}

impl Principal {
    /// Whether this caller may create, update, or delete catalog products.
    #[must_use]
    pub fn can_manage_catalog(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Authorizes a request before any engine operation runs.
pub trait AuthGate {
    /// Resolves a caller token to a principal.
    ///
    /// # Errors
    /// Returns [`Error::Unauthorized`] if the token is unknown.
    fn authorize(&self, token: &str) -> Result<Principal>;
}

/// Token-map gate: a fixed set of tokens, each bound to a principal.
#[derive(Debug, Default)]
pub struct StaticTokenGate {
    tokens: HashMap<String, Principal>,
}

impl StaticTokenGate {
    /// Creates an empty gate that rejects every token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token for a principal.
    pub fn insert(&mut self, token: impl Into<String>, principal: Principal) {
        self.tokens.insert(token.into(), principal);
    }

    /// Builds a gate from `POS_ADMIN_TOKEN` and `POS_CASHIER_TOKEN`
    /// environment variables. Unset variables are simply skipped.
    #[must_use]
    pub fn from_env() -> Self {
        let mut gate = Self::new();

        if let Ok(token) = std::env::var("POS_ADMIN_TOKEN") {
            gate.insert(
                token,
                Principal {
                    user_id: "admin".to_string(),
                    role: Role::Admin,
                },
            );
        }

        if let Ok(token) = std::env::var("POS_CASHIER_TOKEN") {
            gate.insert(
                token,
                Principal {
                    user_id: "cashier".to_string(),
                    role: Role::Cashier,
                },
            );
        }

        gate
    }
}

impl AuthGate for StaticTokenGate {
    fn authorize(&self, token: &str) -> Result<Principal> {
        self.tokens
            .get(token)
            .cloned()
            .ok_or_else(|| Error::Unauthorized {
                message: "unknown caller token".to_string(),
            })
    }
}
