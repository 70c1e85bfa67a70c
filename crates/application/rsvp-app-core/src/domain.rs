use rsvp_core::{DashboardStats, Host, RsvpResponse, View};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardState {
    /// Newest first, as listed by the store.
    pub responses: Vec<RsvpResponse>,
    pub stats: DashboardStats,
    pub is_loading: bool,
}

impl DashboardState {
    pub fn replace(&mut self, responses: Vec<RsvpResponse>) {
        self.stats = DashboardStats::from_responses(&responses);
        self.responses = responses;
        self.is_loading = false;
    }
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub view: View,
    pub location: String,

    pub slug: String,
    pub couple_name: String,
    pub theme_id: String,
    pub cover_image_url: Option<String>,
    pub host: Option<Host>,

    /// Bumped on every slug change; lookup results carrying an older value are dropped.
    pub host_generation: u64,
    pub is_loading_name: bool,
    pub is_preview: bool,

    pub dashboard: DashboardState,
    pub last_submitted: Option<RsvpResponse>,

    pub setup_error: Option<String>,
    pub error: Option<String>,
}

impl AppState {
    pub fn host_id(&self) -> Option<&str> {
        self.host.as_ref().map(|h| h.id.as_str())
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: View::Setup,
            location: "/".to_string(),
            slug: String::new(),
            couple_name: String::new(),
            theme_id: rsvp_config::DEFAULT_THEME_ID.to_string(),
            cover_image_url: None,
            host: None,
            host_generation: 0,
            is_loading_name: false,
            is_preview: false,
            dashboard: DashboardState::default(),
            last_submitted: None,
            setup_error: None,
            error: None,
        }
    }
}
