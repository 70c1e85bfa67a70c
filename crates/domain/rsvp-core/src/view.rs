use std::borrow::Cow;
use std::collections::BTreeMap;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

// Same unreserved set as `encodeURIComponent`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    Setup,
    LinkShare,
    Form,
    Dashboard,
    Success,
}

impl View {
    pub fn as_str(self) -> &'static str {
        match self {
            View::Setup => "setup",
            View::LinkShare => "link",
            View::Form => "form",
            View::Dashboard => "dashboard",
            View::Success => "success",
        }
    }

    /// Guest-facing views show the couple heading.
    pub fn is_guest_facing(self) -> bool {
        matches!(self, View::Form | View::Success)
    }
}

/// Address the process was opened with, split into path and query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub path: String,
    pub query_params: BTreeMap<String, String>,
    /// Query string as it appeared in the address, without the leading `?`.
    pub raw_query: String,
}

impl RouteContext {
    /// Split `/path?query#fragment` into a context. Query keys and values are
    /// percent-decoded with `+` read as a space; pairs that do not decode to
    /// UTF-8 are dropped.
    pub fn parse(location: &str) -> Self {
        let location = location
            .split_once('#')
            .map(|(head, _)| head)
            .unwrap_or(location);
        let (path, raw_query) = location.split_once('?').unwrap_or((location, ""));
        let path = if path.is_empty() { "/" } else { path };

        let mut query_params = BTreeMap::new();
        for pair in raw_query.split('&').filter(|p| !p.is_empty()) {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(k), Some(v)) = (decode_form_value(k), decode_form_value(v)) else {
                continue;
            };
            query_params.entry(k).or_insert(v);
        }

        Self {
            path: path.to_string(),
            query_params,
            raw_query: raw_query.to_string(),
        }
    }

    pub fn from_parts<I, K, V>(path: &str, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let query_params: BTreeMap<String, String> = params
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let raw_query = query_params
            .iter()
            .map(|(k, v)| format!("{}={}", encode_component(k), encode_component(v)))
            .collect::<Vec<_>>()
            .join("&");
        Self {
            path: path.to_string(),
            query_params,
            raw_query,
        }
    }

    pub fn has_query(&self) -> bool {
        !self.raw_query.is_empty()
    }

    /// A parameter counts as present only when it carries a non-empty value.
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query_params
            .get(key)
            .map(String::as_str)
            .filter(|v| !v.is_empty())
    }

    pub fn is_bare_root(&self) -> bool {
        self.path == "/" && !self.has_query()
    }
}

/// Which row of the resolution table produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveRule {
    DashboardPath,
    RsvpPath,
    SlugPath,
    DashboardParam,
    RsvpParam,
    SetupParam,
    RootFallback,
    Unmatched,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub view: View,
    pub slug: String,
    pub display_name: String,
    pub rule: ResolveRule,
}

impl Resolution {
    /// Address the caller should swap in (history replace) after resolving.
    pub fn canonical_location(&self) -> Option<String> {
        match self.rule {
            ResolveRule::RootFallback => Some(format!("/{}", self.slug)),
            _ => None,
        }
    }
}

/// Decide the initial view for an address. Pure and infallible: the last row
/// of the table always yields [`View::Setup`].
pub fn resolve_initial_view(ctx: &RouteContext) -> Resolution {
    let (view, slug, rule) = resolve_view_and_slug(ctx);
    Resolution {
        view,
        slug,
        display_name: resolve_display_name(ctx),
        rule,
    }
}

fn resolve_view_and_slug(ctx: &RouteContext) -> (View, String, ResolveRule) {
    let path = ctx.path.as_str();

    if let Some(rest) = path.strip_prefix("/dashboard/") {
        if !rest.is_empty() {
            return (
                View::Dashboard,
                decode_component(rest).unwrap_or_default(),
                ResolveRule::DashboardPath,
            );
        }
    }

    if path.ends_with("/rsvp") {
        let parts: Vec<&str> = path.split('/').collect();
        let slug = if parts.len() >= 3 {
            decode_component(parts[parts.len() - 2]).unwrap_or_default()
        } else {
            String::new()
        };
        return (View::Form, slug, ResolveRule::RsvpPath);
    }

    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    if let [segment] = segments.as_slice() {
        if !rsvp_config::is_reserved_segment(segment) {
            return (
                View::Form,
                decode_component(segment).unwrap_or_default(),
                ResolveRule::SlugPath,
            );
        }
    }

    let by_param = [
        ("dashboard", View::Dashboard, ResolveRule::DashboardParam),
        ("rsvp", View::Form, ResolveRule::RsvpParam),
        ("setup", View::LinkShare, ResolveRule::SetupParam),
    ];
    for (key, view, rule) in by_param {
        if let Some(value) = ctx.param(key) {
            return (view, value.to_string(), rule);
        }
    }

    if ctx.is_bare_root() {
        return (
            View::Form,
            rsvp_config::DEMO_SLUG.to_string(),
            ResolveRule::RootFallback,
        );
    }

    (View::Setup, String::new(), ResolveRule::Unmatched)
}

fn resolve_display_name(ctx: &RouteContext) -> String {
    if let Some(name) = ctx.param("name") {
        return name.to_string();
    }
    if ctx.is_bare_root() {
        return rsvp_config::DEMO_COUPLE_NAME.to_string();
    }
    String::new()
}

/// Percent-decode one path segment. `None` when the bytes are not UTF-8.
pub fn decode_component(raw: &str) -> Option<String> {
    percent_decode_str(raw)
        .decode_utf8()
        .ok()
        .map(Cow::into_owned)
}

fn decode_form_value(raw: &str) -> Option<String> {
    let spaced = raw.replace('+', " ");
    decode_component(&spaced)
}

/// Percent-encode a value for use inside a query string.
pub fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, COMPONENT).to_string()
}

/// Address shown after a host page was created.
pub fn setup_location(slug: &str, couple_name: &str) -> String {
    format!(
        "/?setup={}&name={}",
        encode_component(slug),
        encode_component(couple_name)
    )
}

pub fn dashboard_location(slug: &str) -> String {
    format!("/dashboard/{slug}")
}
