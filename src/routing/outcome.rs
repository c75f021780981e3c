//! Routing outcomes.

use futures_util::future::BoxFuture;
use std::fmt;
use std::future::Future;

use crate::data::FetchError;

/// Terminal result of a deferred routing attempt.
///
/// `activated` is true when the final mutation had to switch the visible root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The target screen was pushed or presented.
    Presented { activated: bool },
    /// The fetch failed and an alert was shown on the visible screen.
    ErrorSurfaced { error: FetchError, activated: bool },
    /// The owning screen was torn down before the fetch completed.
    Discarded,
}

impl Resolution {
    pub fn activated(&self) -> bool {
        match self {
            Resolution::Presented { activated } | Resolution::ErrorSurfaced { activated, .. } => *activated,
            Resolution::Discarded => false,
        }
    }
}

/// Work a router node still has to finish before the request is resolved.
pub struct DeferredRoute {
    node: String,
    future: BoxFuture<'static, Resolution>,
}

impl DeferredRoute {
    pub fn new<F>(node: impl Into<String>, future: F) -> Self
    where
        F: Future<Output = Resolution> + Send + 'static,
    {
        Self {
            node: node.into(),
            future: Box::pin(future),
        }
    }

    /// Name of the node that deferred.
    pub fn node(&self) -> &str {
        &self.node
    }

    pub async fn resolve(self) -> Resolution {
        self.future.await
    }
}

impl fmt::Debug for DeferredRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredRoute")
            .field("node", &self.node)
            .finish_non_exhaustive()
    }
}

/// What a router node did with a context.
#[derive(Debug)]
pub enum RoutingOutcome {
    /// A screen was pushed or presented, switching tabs if `activated`.
    Handled { activated: bool },
    /// No node in the subtree recognized the context.
    Unhandled,
    /// Recognized, completion pending.
    Deferred(DeferredRoute),
}

impl RoutingOutcome {
    pub fn is_unhandled(&self) -> bool {
        matches!(self, RoutingOutcome::Unhandled)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RoutingOutcome::Handled { .. } => "handled",
            RoutingOutcome::Unhandled => "unhandled",
            RoutingOutcome::Deferred(_) => "deferred",
        }
    }
}
