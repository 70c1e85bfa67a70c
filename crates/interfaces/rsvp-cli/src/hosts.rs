use std::time::{Duration, Instant};

use anyhow::{anyhow, bail, Context, Result};
use camino::Utf8PathBuf;
use humansize::{format_size, DECIMAL};
use rsvp_app_core::ports::{HostDirectory, RsvpBook};
use rsvp_app_core::{
    setup, theme_state, AppCommand, AppKernel, AppState, AppStore, HeaderVm, RecordingHistory,
    StorePersistence,
};
use rsvp_core::view::setup_location;
use rsvp_core::{export, DashboardStats, Host, RouteContext, RsvpDraft, RsvpResponse, View};

const LOAD_TIMEOUT: Duration = Duration::from_secs(10);

fn require_host(store: &StorePersistence, slug: &str) -> Result<Host> {
    store
        .find_by_slug(slug)?
        .ok_or_else(|| anyhow!("No RSVP page for '{}'", slug))
}

pub fn create_host(store: &StorePersistence, couple_names: &str, theme_id: &str) -> Result<Host> {
    let theme = rsvp_core::themes::resolve(theme_id);
    let new_host = setup::new_host(couple_names, theme.id)?;
    Ok(store.create(&new_host)?)
}

pub fn handle_create(store: &StorePersistence, couple_names: &str, theme_id: &str) -> Result<()> {
    let host = create_host(store, couple_names, theme_id)?;
    println!("Page '{}' created for {}.", host.slug, host.couple_name);
    println!("Share: {}", setup_location(&host.slug, &host.couple_name));
    Ok(())
}

pub fn render_host(host: &Host) -> String {
    let mut out = String::new();
    out.push_str(&format!("slug:    {}\n", host.slug));
    out.push_str(&format!("couple:  {}\n", host.couple_name));
    out.push_str(&format!(
        "theme:   {}\n",
        host.theme_id.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!(
        "cover:   {}\n",
        host.cover_image_url.as_deref().unwrap_or("-")
    ));
    out.push_str(&format!("created: {}\n", host.created_at.to_rfc3339()));
    out
}

pub fn handle_show(store: &StorePersistence, slug: &str) -> Result<()> {
    let host = require_host(store, slug)?;
    print!("{}", render_host(&host));
    Ok(())
}

pub fn handle_cover(store: &StorePersistence, slug: &str, url: Option<&str>) -> Result<()> {
    let host = store.set_cover_image(slug, url)?;
    match host.cover_image_url {
        Some(url) => println!("Cover image for '{}' set to {}.", host.slug, url),
        None => println!("Cover image for '{}' removed.", host.slug),
    }
    Ok(())
}

pub fn add_rsvp(store: &StorePersistence, slug: &str, draft: &RsvpDraft) -> Result<RsvpResponse> {
    let host = require_host(store, slug)?;
    store.submit(&host.id, draft)
}

pub fn handle_add(store: &StorePersistence, slug: &str, draft: &RsvpDraft) -> Result<()> {
    let resp = add_rsvp(store, slug, draft)?;
    println!(
        "Recorded '{}' for {} ({}).",
        resp.status_label(),
        resp.guest_name,
        resp.id
    );
    Ok(())
}

pub fn list_rsvps(store: &StorePersistence, slug: &str) -> Result<Vec<RsvpResponse>> {
    let host = require_host(store, slug)?;
    store.list(&host.id)
}

pub fn render_rsvps(responses: &[RsvpResponse]) -> String {
    if responses.is_empty() {
        return "No RSVPs yet.\n".to_string();
    }
    let stats = DashboardStats::from_responses(responses);
    let mut out = format!(
        "{:<36} {:<20} {:<28} {:<14} {:>5}\n",
        "ID", "NAME", "EMAIL", "STATUS", "PARTY"
    );
    out.push_str(&format!(
        "{:-<36} {:-<20} {:-<28} {:-<14} {:->5}\n",
        "", "", "", "", ""
    ));
    for r in responses {
        out.push_str(&format!(
            "{:<36} {:<20} {:<28} {:<14} {:>5}\n",
            r.id,
            r.guest_name,
            r.guest_email,
            r.status_label(),
            r.party_size
        ));
    }
    out.push_str(&format!(
        "\n{} responses, {} attending, {} declined, {} guests\n",
        stats.total, stats.accepted, stats.declined, stats.total_guests
    ));
    out
}

pub fn handle_list(store: &StorePersistence, slug: &str) -> Result<()> {
    print!("{}", render_rsvps(&list_rsvps(store, slug)?));
    Ok(())
}

pub fn handle_delete(store: &StorePersistence, rsvp_id: &str) -> Result<()> {
    if !store.delete(rsvp_id)? {
        return Err(anyhow!("RSVP '{}' not found", rsvp_id));
    }
    println!("RSVP '{}' removed.", rsvp_id);
    Ok(())
}

/// Write the CSV export and return where it went.
pub fn export_csv(
    store: &StorePersistence,
    slug: &str,
    output: Option<Utf8PathBuf>,
) -> Result<(Utf8PathBuf, usize)> {
    let responses = list_rsvps(store, slug)?;
    let csv = export::rsvps_to_csv(&responses);
    let path = output.unwrap_or_else(|| Utf8PathBuf::from(export::export_file_name(slug)));
    std::fs::write(&path, &csv).with_context(|| format!("Failed to write {path}"))?;
    Ok((path, csv.len()))
}

pub fn handle_export(store: &StorePersistence, slug: &str, output: Option<Utf8PathBuf>) -> Result<()> {
    let (path, bytes) = export_csv(store, slug, output)?;
    println!(":: Saved {} to {}", format_size(bytes, DECIMAL), path);
    Ok(())
}

/// Boot the app on `location` against the store and wait until the host
/// lookup, and a dashboard's responses, have landed.
pub fn load_page(store: &StorePersistence, location: &str) -> Result<AppState> {
    let mut kernel = AppKernel::new(
        AppStore::default(),
        store.clone(),
        store.clone(),
        RecordingHistory::new(location),
    );
    kernel.dispatch(AppCommand::Boot(RouteContext::parse(location)));

    let deadline = Instant::now() + LOAD_TIMEOUT;
    loop {
        kernel.tick();
        let state = kernel.store.state();
        if !state.is_loading_name && !state.dashboard.is_loading {
            return Ok(state);
        }
        if Instant::now() >= deadline {
            bail!("Timed out loading '{}'", location);
        }
        std::thread::sleep(Duration::from_millis(10));
    }
}

pub fn render_loaded_page(state: &AppState) -> String {
    let theme = theme_state::snapshot();
    let primary_var = format!("{}-500", rsvp_config::STYLE_VAR_PREFIX);
    let mut out = String::new();
    out.push_str(&format!("view:         {}\n", state.view.as_str()));
    out.push_str(&format!("slug:         {}\n", state.slug));
    out.push_str(&format!(
        "display name: {}\n",
        HeaderVm::from_state(state).display_name
    ));
    out.push_str(&format!("address:      {}\n", state.location));
    out.push_str(&format!(
        "host:         {}\n",
        if state.host.is_some() { "found" } else { "not found" }
    ));
    out.push_str(&format!("theme:        {}\n", theme.theme_id));
    if let Some(value) = theme_state::style_var(&primary_var) {
        out.push_str(&format!("{primary_var}: {value}\n"));
    }
    if state.view == View::Dashboard {
        out.push_str(&format!("responses:    {}\n", state.dashboard.responses.len()));
    }
    if let Some(error) = &state.error {
        out.push_str(&format!("error:        {error}\n"));
    }
    out
}

pub fn handle_load(store: &StorePersistence, location: &str) -> Result<()> {
    let state = load_page(store, location)?;
    print!("{}", render_loaded_page(&state));
    Ok(())
}
