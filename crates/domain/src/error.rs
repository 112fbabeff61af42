//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`WeatherHueError`] at port boundaries.

/// Boxed error used to carry adapter failures across port boundaries.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Base error for everything a weather cycle can run into.
#[derive(Debug, thiserror::Error)]
pub enum WeatherHueError {
    /// The forecast could not be mapped to a color.
    #[error("lookup error")]
    Lookup(#[from] LookupError),

    /// A domain invariant was violated.
    #[error("validation error")]
    Validation(#[from] ValidationError),

    /// A remote service could not be reached or answered with a failure status.
    #[error("network error")]
    Network(#[source] BoxError),

    /// A remote service answered with something we could not understand.
    #[error("parse error")]
    Parse(#[source] BoxError),

    /// The light bridge rejected a request.
    #[error("bridge error")]
    Bridge(#[source] BoxError),
}

/// Failure to find a color for a (condition, description) pair.
///
/// This always signals a configuration gap the operator must fix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// The condition has no entry in the weather table at all.
    #[error("no weather set configured for condition {condition:?}")]
    UnknownCondition {
        /// The condition name that was looked up.
        condition: String,
    },

    /// The condition exists but has neither the description nor a `default`.
    #[error("condition {condition:?} has no entry for {description:?} and no default")]
    NoDefault {
        /// The condition name that was looked up.
        condition: String,
        /// The description that was looked up.
        description: String,
    },
}

/// Domain invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// A condition key in the weather table is empty or whitespace.
    #[error("condition name must not be empty")]
    EmptyCondition,

    /// A condition in the weather table has no color entries.
    #[error("condition {0:?} has no color entries")]
    EmptyConditionSet(String),

    /// The weather table has no conditions at all.
    #[error("weather table is empty")]
    EmptyTable,
}
