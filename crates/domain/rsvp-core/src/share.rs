use serde::Serialize;

use crate::Slug;

/// What the share screen hands to guests: the clean page link and the name
/// the QR code download is saved under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    pub slug: String,
    pub url: String,
    pub qr_file_name: String,
}

impl ShareLink {
    pub fn new(base_url: &str, slug: &str) -> Self {
        Self {
            slug: slug.to_string(),
            url: format!("{}/{slug}", base_url.trim_end_matches('/')),
            qr_file_name: format!("{slug}-rsvp-qr.svg"),
        }
    }
}

/// Heading for guest views: the couple name when known, otherwise a title
/// built from the slug, otherwise a generic fallback.
pub fn display_name(couple_name: &str, slug: &str) -> String {
    if !couple_name.is_empty() {
        return couple_name.to_string();
    }
    if slug.is_empty() {
        return rsvp_config::FALLBACK_DISPLAY_NAME.to_string();
    }
    Slug::to_title(slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn share_link_strips_trailing_slash() {
        let link = ShareLink::new("https://vows.example/", "jo-ann");
        assert_eq!(link.url, "https://vows.example/jo-ann");
        assert_eq!(link.qr_file_name, "jo-ann-rsvp-qr.svg");
    }

    #[test]
    fn display_name_prefers_couple_name() {
        assert_eq!(display_name("Jo & Ann", "jo&ann"), "Jo & Ann");
        assert_eq!(display_name("", "mary-and-john"), "Mary And John");
        assert_eq!(display_name("", ""), "Our Wedding");
    }
}
