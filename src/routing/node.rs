//! The router node capability.
//!
//! # Responsibilities
//! - Decide from the context alone whether a node can satisfy it
//! - Push/present synchronously, or defer behind a fetch
//! - Otherwise offer the context to children in declared order
//!
//! # Design Decisions
//! - Capability trait, independent of any presentation object
//! - Children are an explicit ordered list, first non-unhandled result wins
//! - Traversal lives in the provided `route` method so every node shares it

use async_trait::async_trait;
use std::sync::Arc;

use crate::deeplink::DeeplinkContext;
use crate::routing::outcome::RoutingOutcome;

#[async_trait]
pub trait RouterNode: Send + Sync {
    /// Node name for logging.
    fn name(&self) -> &str;

    /// Try to satisfy the context at this node only, ignoring children.
    async fn route_local(&self, context: &DeeplinkContext) -> RoutingOutcome;

    /// Children in priority order.
    fn children(&self) -> &[Arc<dyn RouterNode>] {
        &[]
    }

    /// Route at this node, then delegate to children until one accepts.
    async fn route(&self, context: &DeeplinkContext) -> RoutingOutcome {
        let outcome = self.route_local(context).await;
        if !outcome.is_unhandled() {
            tracing::debug!(node = self.name(), outcome = outcome.label(), "Context accepted");
            return outcome;
        }

        for child in self.children() {
            let outcome = child.route(context).await;
            if !outcome.is_unhandled() {
                return outcome;
            }
        }

        tracing::trace!(node = self.name(), "Context not recognized in subtree");
        RoutingOutcome::Unhandled
    }
}

/// A node with no intents of its own that only delegates.
pub struct RouterGroup {
    name: String,
    children: Vec<Arc<dyn RouterNode>>,
}

impl RouterGroup {
    pub fn new(name: impl Into<String>, children: Vec<Arc<dyn RouterNode>>) -> Self {
        Self {
            name: name.into(),
            children,
        }
    }
}

#[async_trait]
impl RouterNode for RouterGroup {
    fn name(&self) -> &str {
        &self.name
    }

    async fn route_local(&self, _context: &DeeplinkContext) -> RoutingOutcome {
        RoutingOutcome::Unhandled
    }

    fn children(&self) -> &[Arc<dyn RouterNode>] {
        &self.children
    }
}
