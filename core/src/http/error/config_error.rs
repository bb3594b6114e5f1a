use derive_more::{Display, Error};

/// Fatal configuration problem detected while building the security setup.
///
/// None of these are recoverable per request: a gate that fails to build
/// must stop the server from starting.
#[derive(Debug, Display, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// The rule list is empty or its last rule is not a catch-all.
    #[display("rule list must end with a catch-all rule (any method, `/**`, permit or authenticated)")]
    MissingCatchAll,
    /// A catch-all rule appears before the end of the list.
    #[display("rule #{index} is declared after the catch-all rule")]
    RuleAfterCatchAll { index: usize },
    /// Evaluation ran off the end of the rule list.
    #[display("no rule matched {method} {path}")]
    NoMatchingRule { method: String, path: String },
    /// A path pattern could not be compiled.
    #[display("invalid path pattern `{pattern}`: {reason}")]
    InvalidPattern { pattern: String, reason: String },
    /// The CORS policy is self-contradictory.
    #[display("invalid CORS policy: {reason}")]
    InvalidCors { reason: String },
    /// A required site property is absent.
    #[display("missing site property `{name}`")]
    MissingProperty { name: String },
    /// The site properties document could not be parsed.
    #[display("invalid site properties: {reason}")]
    InvalidProperties { reason: String },
}
