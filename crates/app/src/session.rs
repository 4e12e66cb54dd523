//! Explicit session state.
//!
//! Authorization here is a single hardcoded credential gate: there are no
//! users, roles, or tokens, just an admin/visitor split. The session is an
//! explicit value passed to operations rather than an ambient flag.

use chrono::{DateTime, Utc};

use atelier_core::{DomainError, DomainResult};

/// What a session is allowed to do.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AccessLevel {
    /// Catalog browsing only.
    Visitor,
    /// Full stock management.
    Admin,
}

/// An authenticated (or visitor) session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    level: AccessLevel,
    started_at: DateTime<Utc>,
}

impl Session {
    /// A catalog-only session; needs no credentials.
    pub fn visitor() -> Self {
        Self {
            level: AccessLevel::Visitor,
            started_at: Utc::now(),
        }
    }

    fn admin() -> Self {
        Self {
            level: AccessLevel::Admin,
            started_at: Utc::now(),
        }
    }

    pub fn level(&self) -> AccessLevel {
        self.level
    }

    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    pub fn is_admin(&self) -> bool {
        self.level == AccessLevel::Admin
    }

    /// Gate for mutating operations.
    pub fn require_admin(&self) -> DomainResult<()> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(DomainError::Unauthorized)
        }
    }
}

/// The single admin credential pair.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password: String,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read credentials from `ATELIER_ADMIN_USER` / `ATELIER_ADMIN_PASS`,
    /// falling back to insecure dev defaults.
    pub fn from_env() -> Self {
        let username = std::env::var("ATELIER_ADMIN_USER").unwrap_or_else(|_| {
            tracing::warn!("ATELIER_ADMIN_USER not set; using insecure dev default");
            "admin".to_string()
        });
        let password = std::env::var("ATELIER_ADMIN_PASS").unwrap_or_else(|_| {
            tracing::warn!("ATELIER_ADMIN_PASS not set; using insecure dev default");
            "admin123".to_string()
        });
        Self { username, password }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

/// Check a credential pair and open an admin session.
pub fn login(credentials: &AdminCredentials, username: &str, password: &str) -> DomainResult<Session> {
    if credentials.matches(username, password) {
        tracing::info!(username, "admin session opened");
        Ok(Session::admin())
    } else {
        tracing::warn!(username, "rejected login attempt");
        Err(DomainError::Unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correct_credentials_open_an_admin_session() {
        let creds = AdminCredentials::new("gerente", "s3nha");
        let session = login(&creds, "gerente", "s3nha").unwrap();
        assert!(session.is_admin());
        assert!(session.require_admin().is_ok());
    }

    #[test]
    fn wrong_credentials_are_unauthorized() {
        let creds = AdminCredentials::new("gerente", "s3nha");
        let err = login(&creds, "gerente", "errada").unwrap_err();
        assert_eq!(err, DomainError::Unauthorized);
    }

    #[test]
    fn visitor_sessions_cannot_pass_the_admin_gate() {
        let session = Session::visitor();
        assert!(!session.is_admin());
        assert_eq!(session.require_admin().unwrap_err(), DomainError::Unauthorized);
        assert_eq!(session.level(), AccessLevel::Visitor);
    }
}
