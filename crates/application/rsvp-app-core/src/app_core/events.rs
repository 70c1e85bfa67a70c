use rsvp_core::{Host, HostId, Resolution, RsvpId, RsvpResponse, View};

#[derive(Debug, Clone)]
pub enum DomainEvent {
    // Startup
    Booted(Resolution),

    // Navigation
    ViewChanged(View),
    LocationChanged(String),
    PreviewChanged(bool),
    NewEventStarted { generation: u64 },

    // Host metadata
    HostLookupStarted { slug: String, generation: u64 },
    HostLoaded { generation: u64, host: Option<Host> },
    HostLookupFailed { generation: u64, message: String },
    HostCreated(Host),
    SetupRejected(String),
    ThemeApplied(String),
    CoverImageChanged(Option<String>),

    // Responses
    RsvpSubmitted(RsvpResponse),
    RsvpsRequested,
    RsvpsLoaded { host_id: HostId, responses: Vec<RsvpResponse> },
    RsvpDeleted(RsvpId),

    // User-visible errors
    UserError(String),
}
