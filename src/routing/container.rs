//! The single entry point for deep links.
//!
//! # Responsibilities
//! - Parse raw payloads, dropping malformed ones
//! - Pick the owning root from the ownership map
//! - Hand the context to that root's router tree and await deferred work
//!
//! # Design Decisions
//! - Explicitly constructed and cloned into callers, never a global
//! - Nothing escapes `handle_deep_link`; every failure ends as a log line
//! - Concurrent calls are neither coalesced nor cancelled
//! - The owning root is activated by the push, present or alert that ends the
//!   dispatch, under the same lock, so the last finisher is what the user sees
//! - Unhandled and discarded dispatches never switch tabs
//! - A root without a router tree is a mapping gap: no activation, warn

use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::Instrument;
use uuid::Uuid;

use crate::config::AppConfig;
use crate::data::{EntityFetcher, FetchError};
use crate::deeplink::{DeeplinkContext, DeeplinkParser, IntentKind, ParseError, RawDeepLinkPayload};
use crate::navigation::{Navigator, RootId};
use crate::observability::metrics;
use crate::routing::features::router_tree;
use crate::routing::node::RouterNode;
use crate::routing::outcome::{Resolution, RoutingOutcome};
use crate::routing::ownership::OwnershipMap;

/// How a dispatch ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", content = "error", rename_all = "snake_case")]
pub enum DispatchResult {
    /// A screen was pushed or presented.
    Presented,
    /// The target could not be fetched; an alert is showing.
    ErrorSurfaced(#[serde(serialize_with = "serialize_display")] FetchError),
    /// A deferred push lost its owning screen.
    Discarded,
    /// No node accepted the context.
    Unhandled,
}

fn serialize_display<S: serde::Serializer>(error: &FetchError, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

impl DispatchResult {
    pub fn label(&self) -> &'static str {
        match self {
            DispatchResult::Presented => "presented",
            DispatchResult::ErrorSurfaced(_) => "error_surfaced",
            DispatchResult::Discarded => "discarded",
            DispatchResult::Unhandled => "unhandled",
        }
    }
}

impl From<Resolution> for DispatchResult {
    fn from(resolution: Resolution) -> Self {
        match resolution {
            Resolution::Presented { .. } => DispatchResult::Presented,
            Resolution::ErrorSurfaced { error, .. } => DispatchResult::ErrorSurfaced(error),
            Resolution::Discarded => DispatchResult::Discarded,
        }
    }
}

/// Record of one dispatch, for hosts and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DispatchReport {
    pub dispatch_id: Uuid,
    pub intent: IntentKind,
    pub owner: RootId,
    /// Whether this dispatch switched the visible root. At most one switch
    /// happens per dispatch, together with its final push, present or alert.
    pub activated: bool,
    pub result: DispatchResult,
}

struct Inner {
    navigator: Arc<Navigator>,
    parser: DeeplinkParser,
    ownership: OwnershipMap,
    routers: HashMap<RootId, Arc<dyn RouterNode>>,
}

/// Receives deep links and routes them to the owning root.
#[derive(Clone)]
pub struct RootModuleContainer {
    inner: Arc<Inner>,
}

/// Assembles a container from explicit parts.
pub struct ContainerBuilder {
    navigator: Arc<Navigator>,
    parser: DeeplinkParser,
    ownership: OwnershipMap,
    routers: HashMap<RootId, Arc<dyn RouterNode>>,
}

impl ContainerBuilder {
    pub fn parser(mut self, parser: DeeplinkParser) -> Self {
        self.parser = parser;
        self
    }

    pub fn ownership(mut self, ownership: OwnershipMap) -> Self {
        self.ownership = ownership;
        self
    }

    /// Install the router tree for `root`, replacing any previous one.
    pub fn router(mut self, root: RootId, node: Arc<dyn RouterNode>) -> Self {
        self.routers.insert(root, node);
        self
    }

    /// Install the standard feature tree on every root of the navigator.
    pub fn feature_routers(mut self, fetcher: Arc<dyn EntityFetcher>, fetch_timeout: Duration) -> Self {
        for root in self.navigator.roots() {
            let tree = router_tree(root.clone(), fetcher.clone(), fetch_timeout);
            self.routers.insert(root.id(), tree);
        }
        self
    }

    pub fn build(self) -> RootModuleContainer {
        RootModuleContainer {
            inner: Arc::new(Inner {
                navigator: self.navigator,
                parser: self.parser,
                ownership: self.ownership,
                routers: self.routers,
            }),
        }
    }
}

impl RootModuleContainer {
    pub fn builder(navigator: Arc<Navigator>) -> ContainerBuilder {
        ContainerBuilder {
            navigator,
            parser: DeeplinkParser::default(),
            ownership: OwnershipMap::default(),
            routers: HashMap::new(),
        }
    }

    /// Standard container: one root per configured tab, feature routers on each.
    pub fn from_config(config: &AppConfig, fetcher: Arc<dyn EntityFetcher>) -> Self {
        let navigator = Arc::new(Navigator::new(
            &config.navigation.tabs,
            config.navigation.initial_root,
        ));
        Self::builder(navigator)
            .parser(DeeplinkParser::from_config(&config.deeplinks))
            .ownership(OwnershipMap::from_config(&config.navigation))
            .feature_routers(fetcher, Duration::from_millis(config.data.fetch_timeout_ms))
            .build()
    }

    pub fn navigator(&self) -> &Arc<Navigator> {
        &self.inner.navigator
    }

    /// Route a raw deep link. Never fails; outcomes are logged.
    pub async fn handle_deep_link(&self, raw: RawDeepLinkPayload) {
        let _ = self.dispatch_raw(raw).await;
    }

    /// Route a raw deep link on the runtime, for synchronous system callbacks.
    pub fn spawn_deep_link(&self, raw: RawDeepLinkPayload) -> JoinHandle<()> {
        let container = self.clone();
        tokio::spawn(async move { container.handle_deep_link(raw).await })
    }

    /// Parse and route, reporting what happened.
    pub async fn dispatch_raw(&self, raw: RawDeepLinkPayload) -> Result<DispatchReport, ParseError> {
        metrics::record_received(raw.source());
        match self.inner.parser.parse(&raw) {
            Ok(context) => Ok(self.dispatch(context).await),
            Err(error) => {
                tracing::debug!(source = raw.source(), raw = %raw, error = %error, "Ignoring malformed deep link");
                metrics::record_parse_failure(error.reason());
                Err(error)
            }
        }
    }

    /// Route an already parsed context.
    pub async fn dispatch(&self, context: DeeplinkContext) -> DispatchReport {
        let dispatch_id = Uuid::new_v4();
        let intent = context.kind();
        let span = tracing::info_span!("dispatch", %dispatch_id, %intent);

        async move {
            let owner = self.inner.ownership.owner(intent);
            let (activated, result) = self.route_to(owner, &context).await;

            match &result {
                DispatchResult::Unhandled => {
                    tracing::warn!(
                        owner = %owner,
                        context = %context,
                        "No router accepted deep link, intent ownership has a gap"
                    );
                    metrics::record_unhandled(intent);
                }
                DispatchResult::Discarded => {
                    tracing::debug!(owner = %owner, "Deep link superseded before completion");
                }
                other => {
                    tracing::info!(owner = %owner, result = other.label(), "Deep link routed");
                }
            }
            metrics::record_dispatch(result.label());

            DispatchReport {
                dispatch_id,
                intent,
                owner,
                activated,
                result,
            }
        }
        .instrument(span)
        .await
    }

    async fn route_to(&self, owner: RootId, context: &DeeplinkContext) -> (bool, DispatchResult) {
        let Some(router) = self.inner.routers.get(&owner) else {
            return (false, DispatchResult::Unhandled);
        };

        if self.inner.navigator.root(owner).is_none() {
            tracing::warn!(owner = %owner, "Owning root is not part of the navigator");
            return (false, DispatchResult::Unhandled);
        }

        match router.route(context).await {
            RoutingOutcome::Handled { activated } => (activated, DispatchResult::Presented),
            RoutingOutcome::Unhandled => (false, DispatchResult::Unhandled),
            RoutingOutcome::Deferred(deferred) => {
                tracing::debug!(node = deferred.node(), "Awaiting deferred route");
                let resolution = deferred.resolve().await;
                (resolution.activated(), resolution.into())
            }
        }
    }
}
