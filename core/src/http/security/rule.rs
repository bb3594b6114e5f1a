//! Authorization rules.
//!
//! # Spring Security Equivalent
//! One `authorize(...)` entry inside `authorizeHttpRequests { }`

use std::fmt;

use actix_web::http::Method;

use crate::http::error::ConfigError;
use crate::http::security::ant_matcher::AntMatcher;
use crate::http::security::identity::Identity;

/// Which HTTP methods a rule applies to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodMatcher {
    Any,
    Only(Method),
}

impl MethodMatcher {
    pub fn matches(&self, method: &Method) -> bool {
        match self {
            MethodMatcher::Any => true,
            MethodMatcher::Only(expected) => expected == method,
        }
    }
}

impl From<Method> for MethodMatcher {
    fn from(method: Method) -> Self {
        MethodMatcher::Only(method)
    }
}

impl fmt::Display for MethodMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MethodMatcher::Any => write!(f, "*"),
            MethodMatcher::Only(method) => write!(f, "{}", method),
        }
    }
}

/// What a matching request must satisfy.
///
/// # Spring Security Equivalent
/// `permitAll`, `authenticated`, `hasRole(..)`, `hasAnyRole(..)`, `denyAll`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Permit,
    Authenticated,
    Role(String),
    AnyRole(Vec<String>),
    DenyAll,
}

impl Requirement {
    /// Shorthand for `Requirement::Role`.
    pub fn role(role: impl Into<String>) -> Self {
        Requirement::Role(role.into())
    }

    /// Shorthand for `Requirement::AnyRole`.
    pub fn any_role(roles: &[&str]) -> Self {
        Requirement::AnyRole(roles.iter().map(|r| r.to_string()).collect())
    }

    /// Applies the requirement to an optional identity.
    ///
    /// An anonymous caller is always `Unauthorized` when the requirement is
    /// not met, an authenticated one is `Forbidden`.
    pub fn evaluate(&self, identity: Option<&Identity>) -> Decision {
        let satisfied = match (self, identity) {
            (Requirement::Permit, _) => return Decision::Allow,
            (_, None) => return Decision::Unauthorized,
            (Requirement::Authenticated, Some(_)) => true,
            (Requirement::Role(role), Some(id)) => id.has_role(role),
            (Requirement::AnyRole(roles), Some(id)) => id.has_any_role(roles.as_slice()),
            (Requirement::DenyAll, Some(_)) => false,
        };

        if satisfied {
            Decision::Allow
        } else {
            Decision::Forbidden
        }
    }

    fn can_close_rule_list(&self) -> bool {
        matches!(self, Requirement::Permit | Requirement::Authenticated)
    }
}

impl fmt::Display for Requirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Requirement::Permit => write!(f, "permitAll"),
            Requirement::Authenticated => write!(f, "authenticated"),
            Requirement::Role(role) => write!(f, "hasRole({})", role),
            Requirement::AnyRole(roles) => write!(f, "hasAnyRole({})", roles.join(", ")),
            Requirement::DenyAll => write!(f, "denyAll"),
        }
    }
}

/// Outcome of evaluating a request against the rule list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    Unauthorized,
    Forbidden,
}

/// One `(method, path, requirement)` entry. First match wins.
#[derive(Debug, Clone)]
pub struct Rule {
    method: MethodMatcher,
    path: AntMatcher,
    requirement: Requirement,
}

impl Rule {
    /// Compiles a rule.
    ///
    /// # Errors
    /// `ConfigError::InvalidPattern` when `pattern` does not compile.
    pub fn new(
        method: impl Into<MethodMatcher>,
        pattern: &str,
        requirement: Requirement,
    ) -> Result<Self, ConfigError> {
        Ok(Rule {
            method: method.into(),
            path: AntMatcher::new(pattern)?,
            requirement,
        })
    }

    /// The `anyRequest` rule.
    pub fn any_request(requirement: Requirement) -> Self {
        Rule {
            method: MethodMatcher::Any,
            path: AntMatcher::match_all(),
            requirement,
        }
    }

    pub fn method(&self) -> &MethodMatcher {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        self.path.pattern()
    }

    pub fn requirement(&self) -> &Requirement {
        &self.requirement
    }

    /// Checks whether the request falls under this rule.
    pub fn matches(&self, method: &Method, path: &str) -> bool {
        self.method.matches(method) && self.path.matches(path)
    }

    /// True for a rule that matches every request and yields a total
    /// decision: any method, `/**`, `Permit` or `Authenticated`.
    pub fn is_catch_all(&self) -> bool {
        self.method == MethodMatcher::Any
            && self.path.is_match_all()
            && self.requirement.can_close_rule_list()
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} -> {}", self.method, self.path.pattern(), self.requirement)
    }
}
