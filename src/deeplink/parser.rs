//! Raw payload → [`DeeplinkContext`].
//!
//! # Grammar
//! ```text
//! app://restaurant/{id}
//! app://event/{id}
//! app://events[/{tag}][?tag={tag}]
//! app://bookings
//! app://promo[/{code}][?code={code}]
//! https://{universal host}/{intent}/...      same intents as above
//! ```
//!
//! # Design Decisions
//! - Pure: no I/O, no logging
//! - Path segments and query values are percent-decoded before matching
//! - Intent names are case-insensitive, identifiers are strict decimals
//! - One trailing slash is tolerated, empty or extra segments are rejected
//! - Notifications and shortcuts are lowered onto the same intent resolver

use percent_encoding::percent_decode_str;
use thiserror::Error;
use url::Url;

use crate::config::DeeplinkConfig;
use crate::deeplink::context::{DeeplinkContext, EntityId, EventFilter, PromoCode};
use crate::deeplink::payload::RawDeepLinkPayload;

/// Why a raw payload did not produce a context.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported scheme '{0}'")]
    UnsupportedScheme(String),

    #[error("host '{0}' is not a universal link host")]
    UnknownHost(String),

    #[error("unknown intent '{0}'")]
    UnknownIntent(String),

    #[error("missing required parameter '{0}'")]
    MissingParameter(&'static str),

    #[error("invalid identifier '{0}'")]
    InvalidIdentifier(String),

    #[error("invalid promo code '{0}'")]
    InvalidPromoCode(String),

    #[error("unexpected path segment '{0}'")]
    UnexpectedSegment(String),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl ParseError {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            ParseError::InvalidUrl(_) => "invalid_url",
            ParseError::UnsupportedScheme(_) => "unsupported_scheme",
            ParseError::UnknownHost(_) => "unknown_host",
            ParseError::UnknownIntent(_) => "unknown_intent",
            ParseError::MissingParameter(_) => "missing_parameter",
            ParseError::InvalidIdentifier(_) => "invalid_identifier",
            ParseError::InvalidPromoCode(_) => "invalid_promo_code",
            ParseError::UnexpectedSegment(_) => "unexpected_segment",
            ParseError::InvalidPayload(_) => "invalid_payload",
        }
    }
}

/// Scheme-aware parser. Cheap to clone, holds no state besides its config.
#[derive(Debug, Clone)]
pub struct DeeplinkParser {
    scheme: String,
    universal_hosts: Vec<String>,
}

impl Default for DeeplinkParser {
    fn default() -> Self {
        Self::from_config(&DeeplinkConfig::default())
    }
}

/// Parse with the default `app` scheme and no universal link hosts.
pub fn parse(raw: &RawDeepLinkPayload) -> Result<DeeplinkContext, ParseError> {
    DeeplinkParser::default().parse(raw)
}

impl DeeplinkParser {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into().to_ascii_lowercase(),
            universal_hosts: Vec::new(),
        }
    }

    pub fn from_config(config: &DeeplinkConfig) -> Self {
        let mut parser = Self::new(config.scheme.clone());
        for host in &config.universal_link_hosts {
            parser = parser.with_universal_host(host.clone());
        }
        parser
    }

    /// Accept `https://{host}/...` links as well.
    pub fn with_universal_host(mut self, host: impl Into<String>) -> Self {
        self.universal_hosts.push(host.into().to_ascii_lowercase());
        self
    }

    pub fn parse(&self, raw: &RawDeepLinkPayload) -> Result<DeeplinkContext, ParseError> {
        match raw {
            RawDeepLinkPayload::Url(url) => self.parse_url(url),
            RawDeepLinkPayload::Notification(value) => self.parse_notification(value),
            RawDeepLinkPayload::Shortcut(kind) => parse_shortcut(kind),
        }
    }

    pub fn parse_url(&self, raw: &str) -> Result<DeeplinkContext, ParseError> {
        let url = Url::parse(raw.trim())?;
        let scheme = url.scheme();

        let mut segments = Vec::new();
        if scheme == self.scheme {
            // app://restaurant/42 puts the intent in the host position
            if let Some(host) = url.host_str().filter(|h| !h.is_empty()) {
                segments.push(host.to_string());
            }
        } else if scheme == "https" || scheme == "http" {
            let host = url.host_str().unwrap_or_default().to_ascii_lowercase();
            if !self.universal_hosts.iter().any(|h| *h == host) {
                return Err(ParseError::UnknownHost(host));
            }
        } else {
            return Err(ParseError::UnsupportedScheme(scheme.to_string()));
        }
        segments.extend(split_path(url.path())?);

        let mut request = IntentRequest::from_segments(segments)?;
        request.params = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        request.resolve()
    }

    fn parse_notification(&self, value: &serde_json::Value) -> Result<DeeplinkContext, ParseError> {
        let object = value
            .as_object()
            .ok_or_else(|| ParseError::InvalidPayload("notification is not an object".into()))?;

        if let Some(link) = object.get("deeplink") {
            let link = link
                .as_str()
                .ok_or_else(|| ParseError::InvalidPayload("'deeplink' is not a string".into()))?;
            return self.parse_url(link);
        }

        let intent = object
            .get("type")
            .and_then(|v| v.as_str())
            .ok_or(ParseError::MissingParameter("type"))?;

        let mut args = Vec::new();
        if let Some(id) = object.get("id") {
            args.push(json_scalar(id, "id")?);
        }
        let mut params = Vec::new();
        for key in ["tag", "code"] {
            if let Some(value) = object.get(key) {
                params.push((key.to_string(), json_scalar(value, key)?));
            }
        }

        IntentRequest {
            intent: intent.to_ascii_lowercase(),
            args,
            params,
        }
        .resolve()
    }
}

fn parse_shortcut(raw: &str) -> Result<DeeplinkContext, ParseError> {
    let (intent, arg) = match raw.trim().split_once(':') {
        Some((intent, arg)) => (intent, Some(arg)),
        None => (raw.trim(), None),
    };
    if intent.is_empty() {
        return Err(ParseError::MissingParameter("intent"));
    }
    IntentRequest {
        intent: intent.to_ascii_lowercase(),
        args: arg.map(|a| vec![a.to_string()]).unwrap_or_default(),
        params: Vec::new(),
    }
    .resolve()
}

fn json_scalar(value: &serde_json::Value, field: &str) -> Result<String, ParseError> {
    match value {
        serde_json::Value::String(s) => Ok(s.clone()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        _ => Err(ParseError::InvalidPayload(format!("'{}' must be a string or number", field))),
    }
}

fn split_path(path: &str) -> Result<Vec<String>, ParseError> {
    let path = path.strip_prefix('/').unwrap_or(path);
    let path = path.strip_suffix('/').unwrap_or(path);
    if path.is_empty() {
        return Ok(Vec::new());
    }
    path.split('/')
        .map(|segment| {
            if segment.is_empty() {
                return Err(ParseError::UnexpectedSegment(String::new()));
            }
            percent_decode_str(segment)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|_| ParseError::UnexpectedSegment(segment.to_string()))
        })
        .collect()
}

/// Intent name plus positional arguments and named parameters, source-agnostic.
struct IntentRequest {
    intent: String,
    args: Vec<String>,
    params: Vec<(String, String)>,
}

impl IntentRequest {
    fn from_segments(mut segments: Vec<String>) -> Result<Self, ParseError> {
        if segments.is_empty() {
            return Err(ParseError::MissingParameter("intent"));
        }
        let intent = segments.remove(0).to_ascii_lowercase();
        Ok(Self {
            intent,
            args: segments,
            params: Vec::new(),
        })
    }

    fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Positional argument `index`, rejecting anything past `max` arguments.
    fn arg(&self, index: usize, max: usize) -> Result<Option<&str>, ParseError> {
        if let Some(extra) = self.args.get(max) {
            return Err(ParseError::UnexpectedSegment(extra.clone()));
        }
        Ok(self.args.get(index).map(String::as_str))
    }

    fn resolve(self) -> Result<DeeplinkContext, ParseError> {
        match self.intent.as_str() {
            "restaurant" => {
                let raw = self.arg(0, 1)?.ok_or(ParseError::MissingParameter("id"))?;
                Ok(DeeplinkContext::OpenRestaurant { id: parse_id(raw)? })
            }
            "event" => {
                let raw = self.arg(0, 1)?.ok_or(ParseError::MissingParameter("id"))?;
                Ok(DeeplinkContext::OpenEvent { id: parse_id(raw)? })
            }
            "events" => {
                let tag = match self.arg(0, 1)?.or(self.param("tag")) {
                    Some(raw) => Some(parse_id(raw)?),
                    None => None,
                };
                Ok(DeeplinkContext::OpenEventList {
                    filter: EventFilter { tag },
                })
            }
            "bookings" => {
                self.arg(0, 0)?;
                Ok(DeeplinkContext::OpenBookingHistory)
            }
            "promo" => {
                let code = match self.arg(0, 1)?.or(self.param("code")) {
                    Some(raw) => Some(
                        PromoCode::parse(raw)
                            .ok_or_else(|| ParseError::InvalidPromoCode(raw.to_string()))?,
                    ),
                    None => None,
                };
                Ok(DeeplinkContext::OpenPromoCode { code })
            }
            other => Err(ParseError::UnknownIntent(other.to_string())),
        }
    }
}

fn parse_id(raw: &str) -> Result<EntityId, ParseError> {
    raw.parse()
        .map_err(|_| ParseError::InvalidIdentifier(raw.to_string()))
}
