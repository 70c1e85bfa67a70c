use std::sync::Arc;
use tokio::sync::mpsc;

use rsvp_core::view::{dashboard_location, setup_location};
use rsvp_core::{resolve_initial_view, RsvpDraft, View};

use crate::app_core::{AppCommand, DomainEvent};
use crate::ports::{HistoryPort, HostDirectory, RsvpBook};
use crate::theme_state;

pub struct AppKernel<H, R, Y> {
    pub store: crate::app_core::AppStore,
    hosts: Arc<H>,
    rsvps: Arc<R>,
    history: Arc<Y>,

    tx: mpsc::Sender<DomainEvent>,
    rx: mpsc::Receiver<DomainEvent>,
}

impl<H, R, Y> AppKernel<H, R, Y>
where
    H: HostDirectory,
    R: RsvpBook,
    Y: HistoryPort,
{
    pub fn new(store: crate::app_core::AppStore, hosts: H, rsvps: R, history: Y) -> Self {
        let (tx, rx) = mpsc::channel(100);
        Self {
            store,
            hosts: Arc::new(hosts),
            rsvps: Arc::new(rsvps),
            history: Arc::new(history),
            tx,
            rx,
        }
    }

    pub fn dispatch(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::Boot(ctx) => {
                let resolution = resolve_initial_view(&ctx);
                tracing::debug!(
                    view = resolution.view.as_str(),
                    slug = %resolution.slug,
                    rule = ?resolution.rule,
                    "initial view resolved"
                );
                let canonical = resolution.canonical_location();
                let view = resolution.view;
                let slug = resolution.slug.clone();
                self.store.apply(DomainEvent::Booted(resolution));

                let location = match canonical {
                    Some(loc) => {
                        self.replace_location(&loc);
                        loc
                    }
                    None if ctx.has_query() => format!("{}?{}", ctx.path, ctx.raw_query),
                    None => ctx.path.clone(),
                };
                self.store.apply(DomainEvent::LocationChanged(location));

                if view == View::Setup {
                    self.dispatch(AppCommand::SelectTheme(
                        rsvp_config::DEFAULT_THEME_ID.to_string(),
                    ));
                }

                if !slug.is_empty() {
                    self.start_host_lookup(slug);
                }
            }

            AppCommand::LoadHost(slug) => {
                if slug.is_empty() {
                    return;
                }
                self.start_host_lookup(slug);
            }

            AppCommand::SubmitSetup { couple_names } => {
                let theme_id = self.store.read(|s| s.theme_id.clone());
                let created = crate::setup::new_host(&couple_names, &theme_id)
                    .and_then(|new_host| self.hosts.create(&new_host));
                match created {
                    Ok(host) => {
                        tracing::info!(slug = %host.slug, "host page created");
                        let location = setup_location(&host.slug, &host.couple_name);
                        self.store.apply(DomainEvent::HostCreated(host));
                        self.store.apply(DomainEvent::ViewChanged(View::LinkShare));
                        self.replace_location(&location);
                        self.store.apply(DomainEvent::LocationChanged(location));
                    }
                    Err(e) => {
                        if let crate::setup::SetupError::Store(inner) = &e {
                            tracing::warn!(error = %inner, "host creation failed");
                        }
                        self.store.apply(DomainEvent::SetupRejected(e.to_string()));
                    }
                }
            }

            AppCommand::SelectTheme(theme_id) => {
                let applied = theme_state::apply_theme(&theme_id);
                self.store
                    .apply(DomainEvent::ThemeApplied(applied.id.to_string()));
            }

            AppCommand::OpenDashboard => {
                let slug = self.store.read(|s| s.slug.clone());
                let location = dashboard_location(&slug);
                self.store.apply(DomainEvent::ViewChanged(View::Dashboard));
                self.push_location(&location);
                self.store.apply(DomainEvent::LocationChanged(location));
                self.dispatch(AppCommand::RefreshDashboard);
            }

            AppCommand::NewEvent => {
                let generation = self.store.read(|s| s.host_generation) + 1;
                self.store
                    .apply(DomainEvent::NewEventStarted { generation });
                self.push_location("/");
                self.store.apply(DomainEvent::LocationChanged("/".into()));
            }

            AppCommand::Preview => self.store.apply(DomainEvent::PreviewChanged(true)),
            AppCommand::ClosePreview => self.store.apply(DomainEvent::PreviewChanged(false)),

            AppCommand::SubmitRsvp(draft) => self.submit_rsvp(draft),
            AppCommand::RsvpSubmitted(response) => {
                self.store.apply(DomainEvent::RsvpSubmitted(response))
            }

            AppCommand::RefreshDashboard => {
                let Some(host_id) = self.store.read(|s| s.host_id().map(str::to_string)) else {
                    return;
                };
                self.store.apply(DomainEvent::RsvpsRequested);
                let rsvps = self.rsvps.clone();
                let tx = self.tx.clone();
                self.spawn_worker("rsvp-dashboard-refresh", move || {
                    let ev = match rsvps.list(&host_id) {
                        Ok(responses) => DomainEvent::RsvpsLoaded { host_id, responses },
                        Err(e) => DomainEvent::UserError(format!("{e:#}")),
                    };
                    let _ = tx.blocking_send(ev);
                });
            }

            AppCommand::DeleteRsvp(rsvp_id) => {
                let host_id = self.store.read(|s| s.host_id().map(str::to_string));
                let rsvps = self.rsvps.clone();
                let tx = self.tx.clone();
                self.spawn_worker("rsvp-delete", move || {
                    match rsvps.delete(&rsvp_id) {
                        Ok(true) => {
                            let _ = tx.blocking_send(DomainEvent::RsvpDeleted(rsvp_id));
                        }
                        Ok(false) => {
                            tracing::debug!(rsvp_id = %rsvp_id, "rsvp already gone");
                        }
                        Err(e) => {
                            let _ = tx.blocking_send(DomainEvent::UserError(format!("{e:#}")));
                            return;
                        }
                    }
                    if let Some(host_id) = host_id {
                        if let Ok(responses) = rsvps.list(&host_id) {
                            let _ = tx.blocking_send(DomainEvent::RsvpsLoaded { host_id, responses });
                        }
                    }
                });
            }

            AppCommand::SetCoverImage(url) => {
                let slug = self.store.read(|s| s.slug.clone());
                let hosts = self.hosts.clone();
                let tx = self.tx.clone();
                self.spawn_worker("rsvp-cover-image", move || {
                    let ev = match hosts.set_cover_image(&slug, url.as_deref()) {
                        Ok(host) => DomainEvent::CoverImageChanged(host.cover_image_url),
                        Err(e) => DomainEvent::UserError(format!("{e:#}")),
                    };
                    let _ = tx.blocking_send(ev);
                });
            }
        }
    }

    fn start_host_lookup(&mut self, slug: String) {
        let generation = self.store.read(|s| s.host_generation) + 1;
        self.store.apply(DomainEvent::HostLookupStarted {
            slug: slug.clone(),
            generation,
        });

        let hosts = self.hosts.clone();
        let tx = self.tx.clone();
        self.spawn_worker("rsvp-host-lookup", move || {
            let ev = match hosts.find_by_slug(&slug) {
                Ok(host) => DomainEvent::HostLoaded { generation, host },
                Err(e) => DomainEvent::HostLookupFailed {
                    generation,
                    message: format!("{e:#}"),
                },
            };
            let _ = tx.blocking_send(ev);
        });
    }

    fn submit_rsvp(&mut self, draft: RsvpDraft) {
        let Some(host_id) = self.store.read(|s| s.host_id().map(str::to_string)) else {
            self.store.apply(DomainEvent::UserError(
                "This RSVP page is not available".into(),
            ));
            return;
        };
        let rsvps = self.rsvps.clone();
        let tx = self.tx.clone();
        self.spawn_worker("rsvp-submit", move || {
            let ev = match rsvps.submit(&host_id, &draft) {
                Ok(response) => DomainEvent::RsvpSubmitted(response),
                Err(e) => DomainEvent::UserError(format!("{e:#}")),
            };
            let _ = tx.blocking_send(ev);
        });
    }

    fn spawn_worker(&self, name: &str, work: impl FnOnce() + Send + 'static) {
        let spawn_res = std::thread::Builder::new().name(name.into()).spawn(work);
        if let Err(e) = spawn_res {
            self.store.apply(DomainEvent::UserError(format!(
                "Failed to start {name} worker thread: {e}"
            )));
        }
    }

    fn push_location(&self, location: &str) {
        if let Err(e) = self.history.push(location) {
            tracing::debug!(error = %e, location, "history push ignored");
        }
    }

    fn replace_location(&self, location: &str) {
        if let Err(e) = self.history.replace(location) {
            tracing::debug!(error = %e, location, "history replace ignored");
        }
    }

    pub fn tick(&mut self) {
        while let Ok(ev) = self.rx.try_recv() {
            let mut host_arrived = false;
            match &ev {
                DomainEvent::HostLoaded { generation, host } => {
                    if !self.is_current(*generation) {
                        continue;
                    }
                    let theme_id = match host {
                        Some(h) => h.theme_id.clone(),
                        None => Some(rsvp_config::MISSING_HOST_THEME_ID.to_string()),
                    };
                    if let Some(theme_id) = theme_id {
                        let applied = theme_state::apply_theme(&theme_id);
                        self.store
                            .apply(DomainEvent::ThemeApplied(applied.id.to_string()));
                    }
                    host_arrived = host.is_some();
                }
                DomainEvent::HostLookupFailed {
                    generation,
                    message,
                } => {
                    if !self.is_current(*generation) {
                        continue;
                    }
                    tracing::warn!(error = %message, "host lookup failed, keeping defaults");
                }
                DomainEvent::RsvpsLoaded { host_id, .. } => {
                    let current = self.store.read(|s| s.host_id() == Some(host_id.as_str()));
                    if !current {
                        continue;
                    }
                }
                _ => {}
            }
            self.store.apply(ev);

            // A dashboard opened straight from its link has no host id until
            // the lookup lands, so its responses are fetched here.
            if host_arrived && self.store.read(|s| s.view == View::Dashboard) {
                self.dispatch(AppCommand::RefreshDashboard);
            }
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.store.read(|s| s.host_generation) == generation
    }

    pub fn sender(&self) -> mpsc::Sender<DomainEvent> {
        self.tx.clone()
    }
}
