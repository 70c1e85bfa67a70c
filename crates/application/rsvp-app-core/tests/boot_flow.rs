mod support;

use chrono::Utc;
use rsvp_app_core::app_core::{AppCommand, AppStore};
use rsvp_app_core::kernel::AppKernel;
use rsvp_app_core::ports::{HistoryPort, HostDirectory, RsvpBook};
use rsvp_app_core::{HeaderVm, SetupError, StorePersistence};
use rsvp_core::{Host, RouteContext, RsvpDraft, RsvpResponse, View};
use rsvp_persistence::NewHost;
use support::{settle, temp_root, SharedHistory};

struct BrokenHosts;
impl HostDirectory for BrokenHosts {
    fn find_by_slug(&self, _slug: &str) -> anyhow::Result<Option<Host>> {
        anyhow::bail!("backend offline")
    }
    fn create(&self, _host: &NewHost) -> Result<Host, SetupError> {
        Err(SetupError::Store(anyhow::anyhow!("backend offline")))
    }
    fn set_cover_image(&self, _slug: &str, _url: Option<&str>) -> anyhow::Result<Host> {
        anyhow::bail!("backend offline")
    }
}

struct NoRsvps;
impl RsvpBook for NoRsvps {
    fn submit(&self, _host_id: &str, _draft: &RsvpDraft) -> anyhow::Result<RsvpResponse> {
        anyhow::bail!("backend offline")
    }
    fn list(&self, _host_id: &str) -> anyhow::Result<Vec<RsvpResponse>> {
        Ok(vec![])
    }
    fn delete(&self, _rsvp_id: &str) -> anyhow::Result<bool> {
        Ok(false)
    }
}

struct FailingHistory;
impl HistoryPort for FailingHistory {
    fn push(&self, _location: &str) -> anyhow::Result<()> {
        anyhow::bail!("history unavailable")
    }
    fn replace(&self, _location: &str) -> anyhow::Result<()> {
        anyhow::bail!("history unavailable")
    }
}

#[test]
fn bare_root_shows_demo_and_rewrites_address() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let history = SharedHistory::default();
    let store = AppStore::default();
    let mut kernel = AppKernel::new(
        store.clone(),
        persistence.clone(),
        persistence,
        history.clone(),
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/")));
    let state = settle(&mut kernel, |s| !s.is_loading_name);

    assert_eq!(state.view, View::Form);
    assert_eq!(state.slug, "mary&john");
    assert_eq!(state.couple_name, "Mary & John");
    assert_eq!(state.location, "/mary&john");
    assert_eq!(history.0.entries(), ["/mary&john"]);
    // No stored host for the demo slug.
    assert_eq!(state.theme_id, rsvp_config::MISSING_HOST_THEME_ID);
}

#[test]
fn unknown_slug_gets_title_heading_and_rose_theme() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence,
        SharedHistory::default(),
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/jane-and-bob/rsvp")));
    let state = settle(&mut kernel, |s| !s.is_loading_name);

    assert_eq!(state.view, View::Form);
    assert_eq!(state.theme_id, "rose");
    assert!(state.host.is_none());
    assert_eq!(HeaderVm::from_state(&state).display_name, "Jane And Bob");
}

#[test]
fn lookup_failure_keeps_defaults() {
    let mut kernel = AppKernel::new(
        AppStore::default(),
        BrokenHosts,
        NoRsvps,
        SharedHistory::default(),
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse(
        "/?rsvp=jo-ann&name=Jo%20%26%20Ann",
    )));
    let state = settle(&mut kernel, |s| !s.is_loading_name);

    assert_eq!(state.view, View::Form);
    assert_eq!(state.couple_name, "Jo & Ann");
    assert_eq!(state.theme_id, rsvp_config::DEFAULT_THEME_ID);
    assert!(state.error.is_none());
}

#[test]
fn setup_creates_host_and_reports_conflicts() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let history = SharedHistory::default();
    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence.clone(),
        history.clone(),
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/?foo=bar")));
    assert_eq!(kernel.store.state().view, View::Setup);

    kernel.dispatch(AppCommand::SelectTheme("sage".into()));
    kernel.dispatch(AppCommand::SubmitSetup {
        couple_names: "A".into(),
    });
    assert_eq!(
        kernel.store.state().setup_error.as_deref(),
        Some("Please enter a valid couple name (e.g. Mary & John)")
    );

    kernel.dispatch(AppCommand::SubmitSetup {
        couple_names: "Mary & John".into(),
    });
    let state = kernel.store.state();
    assert_eq!(state.view, View::LinkShare);
    assert_eq!(state.slug, "mary&john");
    assert!(state.setup_error.is_none());
    assert_eq!(state.location, "/?setup=mary%26john&name=Mary%20%26%20John");
    assert_eq!(
        history.0.current().as_deref(),
        Some("/?setup=mary%26john&name=Mary%20%26%20John")
    );

    let stored = persistence.find_by_slug("mary&john").unwrap().unwrap();
    assert_eq!(stored.theme_id.as_deref(), Some("sage"));

    kernel.dispatch(AppCommand::NewEvent);
    kernel.dispatch(AppCommand::SubmitSetup {
        couple_names: "mary   &  john".into(),
    });
    let state = kernel.store.state();
    assert_eq!(state.view, View::Setup);
    assert_eq!(
        state.setup_error.as_deref(),
        Some("This couple name is already taken. Please try a different name.")
    );
}

#[test]
fn guest_submission_reaches_dashboard_and_can_be_deleted() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let history = SharedHistory::default();
    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence,
        history.clone(),
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/?x=1")));
    kernel.dispatch(AppCommand::SubmitSetup {
        couple_names: "Ana & Ben".into(),
    });
    kernel.dispatch(AppCommand::Preview);
    kernel.dispatch(AppCommand::SubmitRsvp(RsvpDraft {
        guest_name: "Cy".into(),
        guest_email: "cy@example.com".into(),
        guest_phone: None,
        attending: true,
        party_size: 3,
        message: Some("Can't wait".into()),
    }));
    let state = settle(&mut kernel, |s| s.view == View::Success);
    let submitted = state.last_submitted.unwrap();
    assert_eq!(submitted.party_size, 3);
    assert!(submitted.created_at <= Utc::now());

    kernel.dispatch(AppCommand::OpenDashboard);
    let state = settle(&mut kernel, |s| s.dashboard.responses.len() == 1);
    assert_eq!(state.view, View::Dashboard);
    assert_eq!(state.location, "/dashboard/ana&ben");
    assert_eq!(state.dashboard.stats.total_guests, 3);
    assert_eq!(history.0.current().as_deref(), Some("/dashboard/ana&ben"));

    kernel.dispatch(AppCommand::DeleteRsvp(submitted.id));
    let state = settle(&mut kernel, |s| s.dashboard.responses.is_empty());
    assert_eq!(state.dashboard.stats.total, 0);
}

#[test]
fn slug_change_supersedes_earlier_lookup() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    persistence
        .create(&rsvp_app_core::setup::new_host("Old Couple", "sage").unwrap())
        .unwrap();
    persistence
        .create(&rsvp_app_core::setup::new_host("New Couple", "navy").unwrap())
        .unwrap();

    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence,
        SharedHistory::default(),
    );
    kernel.dispatch(AppCommand::LoadHost("old-couple".into()));
    kernel.dispatch(AppCommand::LoadHost("new-couple".into()));

    // The first lookup's result carries a superseded generation and is dropped.
    let state = settle(&mut kernel, |s| s.host.is_some());
    assert_eq!(state.host_generation, 2);
    assert_eq!(state.slug, "new-couple");
    assert_eq!(state.couple_name, "New Couple");
    assert_eq!(state.theme_id, "navy");
}

#[test]
fn direct_dashboard_link_loads_responses() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let host = persistence
        .create(&rsvp_app_core::setup::new_host("Ana & Ben", "rose").unwrap())
        .unwrap();
    persistence
        .submit(
            host.id.as_str(),
            &RsvpDraft {
                guest_name: "Cy".into(),
                guest_email: "cy@example.com".into(),
                guest_phone: None,
                attending: true,
                party_size: 2,
                message: None,
            },
        )
        .unwrap();

    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence,
        SharedHistory::default(),
    );
    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/dashboard/ana&ben")));
    let state = settle(&mut kernel, |s| s.dashboard.responses.len() == 1);

    assert_eq!(state.view, View::Dashboard);
    assert_eq!(state.couple_name, "Ana & Ben");
    assert_eq!(state.dashboard.stats.total_guests, 2);
    assert!(!state.dashboard.is_loading);
}

#[test]
fn navigation_survives_history_failures() {
    let (_dir, root) = temp_root();
    let persistence = StorePersistence::open(root);
    let mut kernel = AppKernel::new(
        AppStore::default(),
        persistence.clone(),
        persistence,
        FailingHistory,
    );

    kernel.dispatch(AppCommand::Boot(RouteContext::parse("/")));
    let state = settle(&mut kernel, |s| !s.is_loading_name);
    assert_eq!(state.view, View::Form);
    assert_eq!(state.slug, "mary&john");
    assert_eq!(state.location, "/mary&john");
    assert!(state.error.is_none());

    kernel.dispatch(AppCommand::OpenDashboard);
    let state = kernel.store.state();
    assert_eq!(state.view, View::Dashboard);
    assert_eq!(state.location, "/dashboard/mary&john");

    kernel.dispatch(AppCommand::NewEvent);
    let state = kernel.store.state();
    assert_eq!(state.view, View::Setup);
    assert_eq!(state.location, "/");
}
