use rsvp_core::Slug;
use rsvp_persistence::NewHost;

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("Please enter a valid couple name (e.g. Mary & John)")]
    InvalidName,
    #[error("This couple name is already taken. Please try a different name.")]
    SlugTaken,
    #[error("This couple name is reserved. Please try a different name.")]
    ReservedName,
    #[error("Could not create your page: {0}")]
    Store(#[from] anyhow::Error),
}

/// Build the record for a new host page from the names typed into setup.
pub fn new_host(couple_names: &str, theme_id: &str) -> Result<NewHost, SetupError> {
    let slug = Slug::from_names(couple_names);
    if !Slug::is_valid(&slug) {
        return Err(SetupError::InvalidName);
    }
    if rsvp_config::is_reserved_slug(&slug) {
        return Err(SetupError::ReservedName);
    }
    Ok(NewHost {
        slug,
        couple_name: couple_names.to_string(),
        theme_id: Some(theme_id.to_string()),
        event_date: None,
        location: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_host_keeps_raw_name_and_theme() {
        let host = new_host("Mary & John", "sage").unwrap();
        assert_eq!(host.slug, "mary&john");
        assert_eq!(host.couple_name, "Mary & John");
        assert_eq!(host.theme_id.as_deref(), Some("sage"));
    }

    #[test]
    fn too_short_names_are_rejected() {
        let err = new_host("A!", "charcoal").unwrap_err();
        assert!(matches!(err, SetupError::InvalidName));
        assert_eq!(
            err.to_string(),
            "Please enter a valid couple name (e.g. Mary & John)"
        );
    }

    #[test]
    fn names_shadowed_by_routes_are_rejected() {
        for names in ["Health", "  RSVP ", "assets", "Api"] {
            assert!(
                matches!(new_host(names, "rose"), Err(SetupError::ReservedName)),
                "{names:?} should be reserved"
            );
        }
        assert!(new_host("Health & Hope", "rose").is_ok());
    }
}
