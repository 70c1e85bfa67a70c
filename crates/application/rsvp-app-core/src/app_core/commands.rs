use rsvp_core::{RouteContext, RsvpDraft, RsvpId, RsvpResponse};

#[derive(Debug, Clone)]
pub enum AppCommand {
    // Startup
    Boot(RouteContext),
    LoadHost(String),

    // Setup
    SubmitSetup { couple_names: String },
    SelectTheme(String),

    // Navigation
    OpenDashboard,
    NewEvent,
    Preview,
    ClosePreview,

    // Guest form
    SubmitRsvp(RsvpDraft),
    RsvpSubmitted(RsvpResponse),

    // Dashboard
    RefreshDashboard,
    DeleteRsvp(RsvpId),
    SetCoverImage(Option<String>),
}
