//! First-match authorization gate.
//!
//! # Spring Security Equivalent
//! `RequestMatcherDelegatingAuthorizationManager` together with the CORS
//! configuration source and the entry point / access denied handlers
//!
//! # Example
//! ```
//! use actix_web::http::Method;
//! use site_security_core::http::security::{AuthorizationGate, Decision, Identity, Requirement};
//!
//! let gate = AuthorizationGate::builder()
//!     .authorize_method(Method::GET, "/api/*/posts", Requirement::Permit)
//!     .authorize("/api/*/adm/**", Requirement::role("ADMIN"))
//!     .authorize("/api/*/**", Requirement::Authenticated)
//!     .any_request(Requirement::Permit)
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(gate.authorize(&Method::GET, "/api/v1/posts", None), Ok(Decision::Allow));
//! assert_eq!(gate.authorize(&Method::POST, "/api/v1/posts", None), Ok(Decision::Unauthorized));
//!
//! let member = Identity::new("member");
//! assert_eq!(
//!     gate.authorize(&Method::GET, "/api/v1/adm/members", Some(&member)),
//!     Ok(Decision::Forbidden)
//! );
//! ```

use actix_web::http::Method;

use crate::http::error::{AuthError, ConfigError};
use crate::http::security::cors::{CorsHeaders, CorsPolicy};
use crate::http::security::error_response::{ErrorResponse, ErrorResponses};
use crate::http::security::identity::Identity;
use crate::http::security::rule::{Decision, MethodMatcher, Requirement, Rule};

/// Immutable authorization and CORS gate.
///
/// Built once at startup and shared read-only between workers; every
/// operation is a pure function of the gate and its arguments.
#[derive(Debug, Clone)]
pub struct AuthorizationGate {
    rules: Vec<Rule>,
    cors: Option<CorsPolicy>,
    errors: ErrorResponses,
}

impl AuthorizationGate {
    /// Starts a declarative rule list.
    pub fn builder() -> GateBuilder {
        GateBuilder::default()
    }

    /// Creates a gate from an explicit rule table.
    ///
    /// # Errors
    /// - `ConfigError::MissingCatchAll` when `rules` is empty or the last rule
    ///   is not a catch-all
    /// - `ConfigError::RuleAfterCatchAll` when a catch-all shadows later rules
    /// - `ConfigError::InvalidCors` when the CORS policy is inconsistent
    pub fn new(
        rules: Vec<Rule>,
        cors: Option<CorsPolicy>,
        errors: ErrorResponses,
    ) -> Result<Self, ConfigError> {
        match rules.iter().position(Rule::is_catch_all) {
            None => return Err(ConfigError::MissingCatchAll),
            Some(index) if index + 1 != rules.len() => {
                return Err(ConfigError::RuleAfterCatchAll { index: index + 1 })
            }
            Some(_) => {}
        }

        if let Some(policy) = &cors {
            policy.validate()?;
        }

        tracing::info!(
            rules = rules.len(),
            cors = cors.as_ref().map(CorsPolicy::path_pattern),
            "authorization gate ready"
        );

        Ok(AuthorizationGate {
            rules,
            cors,
            errors,
        })
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn cors_policy(&self) -> Option<&CorsPolicy> {
        self.cors.as_ref()
    }

    /// Returns the first rule matching the request, with its position.
    pub fn matching_rule(&self, method: &Method, path: &str) -> Option<(usize, &Rule)> {
        self.rules
            .iter()
            .enumerate()
            .find(|(_, rule)| rule.matches(method, path))
    }

    /// Decides a request. First matching rule wins.
    ///
    /// # Errors
    /// `ConfigError::NoMatchingRule` if no rule matches. A gate built through
    /// [`AuthorizationGate::new`] always ends with a catch-all, so this only
    /// signals a broken invariant.
    pub fn authorize(
        &self,
        method: &Method,
        path: &str,
        identity: Option<&Identity>,
    ) -> Result<Decision, ConfigError> {
        let (index, rule) =
            self.matching_rule(method, path)
                .ok_or_else(|| ConfigError::NoMatchingRule {
                    method: method.to_string(),
                    path: path.to_string(),
                })?;

        let decision = rule.requirement().evaluate(identity);
        tracing::debug!(
            %method,
            path,
            rule = index,
            subject = identity.map(Identity::get_subject),
            ?decision,
            "authorization decision"
        );
        Ok(decision)
    }

    /// CORS headers to attach for `origin`, or `None` when the path is not
    /// registered or the origin/method is not allowed.
    pub fn cors_decision(&self, origin: &str, path: &str, method: &str) -> Option<CorsHeaders> {
        self.cors.as_ref()?.check(origin, path, method)
    }

    /// True when a CORS policy is registered for `path`.
    pub fn cors_applies(&self, path: &str) -> bool {
        self.cors.as_ref().is_some_and(|c| c.applies_to(path))
    }

    /// Response template for a denial.
    pub fn render_error(&self, kind: AuthError) -> &ErrorResponse {
        self.errors.render(kind)
    }
}

impl Decision {
    /// The denial carried by this decision, if any.
    pub fn into_error(self) -> Option<AuthError> {
        match self {
            Decision::Allow => None,
            Decision::Unauthorized => Some(AuthError::Unauthorized),
            Decision::Forbidden => Some(AuthError::Forbidden),
        }
    }
}

/// Declarative builder mirroring `authorizeHttpRequests { authorize(...) }`.
///
/// Patterns are compiled in [`GateBuilder::build`], so the first invalid
/// pattern is reported there.
#[derive(Debug, Default)]
pub struct GateBuilder {
    entries: Vec<(MethodMatcher, String, Requirement)>,
    any_request: Option<Requirement>,
    cors: Option<CorsPolicy>,
    errors: Option<ErrorResponses>,
}

impl GateBuilder {
    /// Adds a rule for every method.
    pub fn authorize(self, pattern: &str, requirement: Requirement) -> Self {
        self.push(MethodMatcher::Any, pattern, requirement)
    }

    /// Adds a rule for a single method.
    pub fn authorize_method(self, method: Method, pattern: &str, requirement: Requirement) -> Self {
        self.push(MethodMatcher::Only(method), pattern, requirement)
    }

    /// Sets the trailing `anyRequest` rule.
    pub fn any_request(mut self, requirement: Requirement) -> Self {
        self.any_request = Some(requirement);
        self
    }

    pub fn cors(mut self, policy: CorsPolicy) -> Self {
        self.cors = Some(policy);
        self
    }

    pub fn error_responses(mut self, errors: ErrorResponses) -> Self {
        self.errors = Some(errors);
        self
    }

    /// Compiles the rules and validates the result.
    pub fn build(self) -> Result<AuthorizationGate, ConfigError> {
        let mut rules = self
            .entries
            .iter()
            .map(|(method, pattern, requirement)| {
                Rule::new(method.clone(), pattern, requirement.clone())
            })
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(requirement) = self.any_request {
            rules.push(Rule::any_request(requirement));
        }

        AuthorizationGate::new(rules, self.cors, self.errors.unwrap_or_default())
    }

    fn push(mut self, method: MethodMatcher, pattern: &str, requirement: Requirement) -> Self {
        self.entries.push((method, pattern.to_string(), requirement));
        self
    }
}
