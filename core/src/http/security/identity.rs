//! Authenticated subject supplied by the identity extraction step.
//!
//! # Spring Equivalent
//! `Authentication` principal with its `GrantedAuthority` roles

use std::fmt;

const ROLE_PREFIX: &str = "ROLE_";

/// An authenticated subject with zero or more role names.
///
/// Roles are stored without the `ROLE_` prefix, so `ROLE_ADMIN` and `ADMIN`
/// name the same role.
///
/// # Example
/// ```
/// use site_security_core::http::security::Identity;
///
/// let identity = Identity::new("alice").roles(&["ROLE_ADMIN", "USER"]);
///
/// assert!(identity.has_role("ADMIN"));
/// assert!(identity.has_role("ROLE_USER"));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    subject: String,
    roles: Vec<String>,
}

impl Identity {
    /// Creates an identity without roles.
    pub fn new(subject: impl Into<String>) -> Self {
        Identity {
            subject: subject.into(),
            roles: Vec::new(),
        }
    }

    /// Returns the subject (member id, username, ...).
    pub fn get_subject(&self) -> &str {
        &self.subject
    }

    /// Returns the role names, without prefix.
    pub fn get_roles(&self) -> &[String] {
        &self.roles
    }

    /// Adds roles (builder pattern). Duplicates are ignored.
    pub fn roles(mut self, roles: &[&str]) -> Self {
        for role in roles {
            let role = normalize_role(role);
            if !self.roles.iter().any(|r| r == role) {
                self.roles.push(role.to_string());
            }
        }
        self
    }

    /// Checks if the identity holds `role`.
    pub fn has_role(&self, role: &str) -> bool {
        let role = normalize_role(role);
        self.roles.iter().any(|r| r == role)
    }

    /// Checks if the identity holds ANY of `roles` (OR logic).
    pub fn has_any_role<S: AsRef<str>>(&self, roles: &[S]) -> bool {
        roles.iter().any(|role| self.has_role(role.as_ref()))
    }
}

fn normalize_role(role: &str) -> &str {
    role.strip_prefix(ROLE_PREFIX).unwrap_or(role)
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity {{ subject: {}, roles: {:?} }}", self.subject, self.roles)
    }
}
