//! User-supplied checks
//!
//! A [`Check`] pairs an asynchronous predicate with the message reported
//! when the predicate returns `false`. Checks may await external I/O (a
//! database uniqueness lookup, for example); the validator awaits them only
//! after a field's built-in checks have passed.
//!
//! # Example
//!
//! ```rust
//! use restdoc_validation::checks::Check;
//! use serde_json::Value;
//!
//! let not_admin = Check::sync("The username \"admin\" is reserved.", |value: &Value| {
//!     value.as_str() != Some("admin")
//! });
//!
//! let unique = Check::new("That email is already registered.", |value: Value| async move {
//!     // Look the value up somewhere...
//!     value.as_str().map_or(false, |email| email != "taken@example.com")
//! });
//! # let _ = (not_admin, unique);
//! ```

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;
use std::future::Future;
use std::sync::Arc;

// ============================================================================
// Predicate Trait
// ============================================================================

/// An asynchronous yes/no test over a field value
#[async_trait]
pub trait Predicate: Send + Sync {
    /// Return `true` if the value passes
    async fn run(&self, value: &Value) -> bool;
}

/// Type alias for shared predicates
pub type BoxedPredicate = Arc<dyn Predicate>;

/// Predicate backed by an async closure
pub struct FnPredicate<F> {
    run_fn: F,
}

#[async_trait]
impl<F, Fut> Predicate for FnPredicate<F>
where
    F: Fn(Value) -> Fut + Send + Sync,
    Fut: Future<Output = bool> + Send,
{
    async fn run(&self, value: &Value) -> bool {
        (self.run_fn)(value.clone()).await
    }
}

/// Predicate backed by a plain synchronous closure
pub struct SyncPredicate<F> {
    run_fn: F,
}

#[async_trait]
impl<F> Predicate for SyncPredicate<F>
where
    F: Fn(&Value) -> bool + Send + Sync,
{
    async fn run(&self, value: &Value) -> bool {
        (self.run_fn)(value)
    }
}

// ============================================================================
// Check
// ============================================================================

/// A user-defined check with its failure message
#[derive(Clone)]
pub struct Check {
    predicate: BoxedPredicate,
    response: String,
}

impl Check {
    /// Create a check from an async closure
    pub fn new<F, Fut>(response: impl Into<String>, run: F) -> Self
    where
        F: Fn(Value) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = bool> + Send + 'static,
    {
        Self {
            predicate: Arc::new(FnPredicate { run_fn: run }),
            response: response.into(),
        }
    }

    /// Create a check from a synchronous closure
    pub fn sync<F>(response: impl Into<String>, run: F) -> Self
    where
        F: Fn(&Value) -> bool + Send + Sync + 'static,
    {
        Self {
            predicate: Arc::new(SyncPredicate { run_fn: run }),
            response: response.into(),
        }
    }

    /// Create a check from any [`Predicate`] implementation
    pub fn from_predicate(response: impl Into<String>, predicate: impl Predicate + 'static) -> Self {
        Self {
            predicate: Arc::new(predicate),
            response: response.into(),
        }
    }

    /// Message reported when the check fails
    pub fn response(&self) -> &str {
        &self.response
    }

    /// Run the predicate against a value
    pub async fn run(&self, value: &Value) -> bool {
        self.predicate.run(value).await
    }
}

impl fmt::Debug for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Check")
            .field("response", &self.response)
            .finish_non_exhaustive()
    }
}
