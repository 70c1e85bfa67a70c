//! Central configuration constants for routing, theming and guest limits.

/// Theme applied when a requested theme id is not in the catalog.
pub const DEFAULT_THEME_ID: &str = "charcoal";

/// Theme applied when the slug has no host record.
pub const MISSING_HOST_THEME_ID: &str = "rose";

/// Slug shown when the site root is opened without any query string.
pub const DEMO_SLUG: &str = "mary&john";

/// Couple name paired with [`DEMO_SLUG`].
pub const DEMO_COUPLE_NAME: &str = "Mary & John";

/// Heading used when neither a couple name nor a slug is known.
pub const FALLBACK_DISPLAY_NAME: &str = "Our Wedding";

/// Shortest slug accepted when creating a host page.
pub const MIN_SLUG_LEN: usize = 3;

/// Top-level path segments that never name a host page.
pub const RESERVED_SEGMENTS: &[&str] = &["assets", "favicon.ico"];

/// Slugs a new host page may not take: the reserved segments, the path the
/// resolver reads as a form suffix, and the server's own top-level routes.
pub const RESERVED_SLUGS: &[&str] = &["assets", "favicon.ico", "rsvp", "health", "api"];

/// Smallest party a guest can announce.
pub const MIN_PARTY_SIZE: u32 = 1;

/// Largest party a guest can announce.
pub const MAX_PARTY_SIZE: u32 = 10;

/// Prefix of the style variables the palette is published under.
pub const STYLE_VAR_PREFIX: &str = "--color-primary";

/// Convenience function to clamp a party size into the allowed range.
pub fn clamp_party_size(v: u32) -> u32 {
    v.clamp(MIN_PARTY_SIZE, MAX_PARTY_SIZE)
}

/// Whether a slug would be shadowed by a route if handed out as a page.
pub fn is_reserved_slug(slug: &str) -> bool {
    RESERVED_SLUGS.contains(&slug)
}

/// Whether a single path segment is reserved for static assets.
pub fn is_reserved_segment(segment: &str) -> bool {
    RESERVED_SEGMENTS.contains(&segment)
}
