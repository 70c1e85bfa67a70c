//! Server-rendered pages. One shell, five view bodies.

use maud::{html, Markup, PreEscaped, DOCTYPE};
use rsvp_app_core::domain::AppState;
use rsvp_app_core::theme_state::ThemeSnapshot;
use rsvp_app_core::{DashboardVm, HeaderVm};
use rsvp_core::share::ShareLink;
use rsvp_core::view::encode_component;
use rsvp_core::{themes, View};

/// Palette-driven styles. Colors come only from the `--color-primary-*` vars.
pub const PAGE_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:Georgia,"Times New Roman",serif;line-height:1.6;color:var(--color-primary-900);background:var(--color-primary-50);min-height:100vh;display:flex;flex-direction:column;align-items:center;padding:2rem 1rem}
main{max-width:720px;width:100%}
a{color:var(--color-primary-700)}
.card{background:#fff;border:1px solid var(--color-primary-200);border-radius:12px;padding:1.75rem;margin-bottom:1.25rem}
.cover{width:100%;max-height:280px;object-fit:cover;border-radius:12px;margin-bottom:1rem}
.heading{text-align:center;margin-bottom:1.5rem}
.heading h1{font-size:2.2rem;color:var(--color-primary-800)}
.heading p{color:var(--color-primary-600)}
label{display:block;font-weight:600;margin:.75rem 0 .25rem}
input,select,textarea{width:100%;padding:.55rem .7rem;border:1px solid var(--color-primary-300);border-radius:8px;font:inherit}
.choices{display:flex;gap:1.5rem}
.choices label{font-weight:400;display:flex;gap:.4rem;align-items:center}
.choices input{width:auto}
button,.button{display:inline-block;margin-top:1rem;padding:.6rem 1.2rem;background:var(--color-primary-500);color:#fff;border:none;border-radius:8px;font:inherit;cursor:pointer;text-decoration:none}
button:hover,.button:hover{background:var(--color-primary-600)}
.button.secondary{background:var(--color-primary-100);color:var(--color-primary-800)}
.notice{background:var(--color-primary-100);border-left:4px solid var(--color-primary-500);padding:.6rem .9rem;margin-bottom:1rem}
.share-url{font-family:ui-monospace,Menlo,monospace;background:var(--color-primary-50);padding:.5rem .75rem;border-radius:6px;word-break:break-all}
.stats{display:grid;grid-template-columns:repeat(4,1fr);gap:.75rem;margin-bottom:1.25rem}
.stat{background:var(--color-primary-100);border-radius:10px;padding:.75rem;text-align:center}
.stat b{display:block;font-size:1.6rem;color:var(--color-primary-700)}
table{width:100%;border-collapse:collapse;font-size:.92rem}
th,td{text-align:left;padding:.45rem .5rem;border-bottom:1px solid var(--color-primary-100)}
td form button{margin:0;padding:.25rem .6rem;font-size:.8rem}
.preview-bar{background:var(--color-primary-800);color:#fff;padding:.5rem 1rem;border-radius:8px;margin-bottom:1rem;display:flex;justify-content:space-between;align-items:center}
.preview-bar a{color:#fff}
"#;

/// Everything a page needs besides the base URL.
#[derive(Debug, Clone)]
pub struct Screen {
    pub state: AppState,
    /// Address the browser should show instead of the requested one.
    pub canonical: Option<String>,
    /// `Some(false)` when the slug was looked up and has no host.
    pub host_found: Option<bool>,
    pub notice: Option<String>,
}

impl Screen {
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            canonical: None,
            host_found: None,
            notice: None,
        }
    }
}

fn slug_path(slug: &str) -> String {
    format!("/{}", encode_component(slug))
}

fn dashboard_path(slug: &str) -> String {
    format!("/dashboard/{}", encode_component(slug))
}

pub fn page(screen: &Screen, base_url: &str) -> Markup {
    let state = &screen.state;
    let header = HeaderVm::from_state(state);
    let css_root = ThemeSnapshot::for_theme(themes::resolve(&state.theme_id)).css_root();
    let title = match state.view {
        View::Setup => "Create your RSVP page".to_string(),
        View::Dashboard => format!("{} · Dashboard", header.display_name),
        _ => format!("{} · RSVP", header.display_name),
    };

    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                @if let Some(canonical) = &screen.canonical {
                    link rel="canonical" href=(canonical);
                }
                style { (PreEscaped(&css_root)) }
                style { (PreEscaped(PAGE_CSS)) }
            }
            body data-view=(state.view.as_str()) data-theme=(state.theme_id) {
                main {
                    @if let Some(notice) = &screen.notice {
                        div class="notice" { (notice) }
                    }
                    @if header.show_heading {
                        (heading(&header))
                    }
                    @match state.view {
                        View::Setup => (setup_view(state)),
                        View::LinkShare => (link_share_view(state, base_url)),
                        View::Form => (form_view(state, screen.host_found)),
                        View::Success => (success_view(state)),
                        View::Dashboard => (dashboard_view(state, base_url, screen.host_found)),
                    }
                }
                @if let Some(canonical) = &screen.canonical {
                    script {
                        (PreEscaped(format!(
                            "try{{history.replaceState(null,\"\",{})}}catch(e){{}}",
                            serde_json::Value::String(canonical.clone())
                        )))
                    }
                }
            }
        }
    }
}

fn heading(header: &HeaderVm) -> Markup {
    html! {
        div class="heading" {
            @if let Some(url) = &header.cover_image_url {
                img class="cover" src=(url) alt="";
            }
            p { "Together with their families" }
            h1 { (header.display_name) }
            p { "request the pleasure of your reply" }
        }
    }
}

fn setup_view(state: &AppState) -> Markup {
    html! {
        div class="card" {
            h1 { "Create your RSVP page" }
            p { "Enter your names to get a link you can share with guests." }
            @if let Some(err) = &state.setup_error {
                div class="notice" { (err) }
            }
            form method="post" action="/" {
                label for="couple_names" { "Your names" }
                input id="couple_names" name="couple_names" placeholder="Mary & John" required;
                label for="theme_id" { "Color theme" }
                select id="theme_id" name="theme_id" {
                    @for theme in themes::THEMES {
                        option value=(theme.id) selected[theme.id == state.theme_id] { (theme.name) }
                    }
                }
                button type="submit" { "Create page" }
            }
        }
    }
}

fn link_share_view(state: &AppState, base_url: &str) -> Markup {
    let share = ShareLink::new(base_url, &state.slug);
    html! {
        div class="card" {
            h1 { "Your page is ready" }
            p { "Share this link with your guests:" }
            p class="share-url" { (share.url) }
            p { "QR code download: " code { (share.qr_file_name) } }
            a class="button" href=(dashboard_path(&state.slug)) { "Open dashboard" }
            " "
            a class="button secondary" href=(slug_path(&state.slug)) { "View guest page" }
        }
    }
}

fn form_view(state: &AppState, host_found: Option<bool>) -> Markup {
    let action = format!("{}/rsvp", slug_path(&state.slug));
    html! {
        @if state.is_preview {
            div class="preview-bar" {
                span { "Preview of your guest page" }
                a href=(dashboard_path(&state.slug)) { "Close preview" }
            }
        }
        div class="card" {
            @if host_found == Some(false) {
                p class="notice" { "This RSVP page has not been set up yet." }
            } @else {
                form method="post" action=(action) {
                    label for="guest_name" { "Name" }
                    input id="guest_name" name="guest_name" required;
                    label for="guest_email" { "Email" }
                    input id="guest_email" name="guest_email" type="email" required;
                    label for="guest_phone" { "Phone (optional)" }
                    input id="guest_phone" name="guest_phone" type="tel";
                    label { "Will you attend?" }
                    div class="choices" {
                        label { input type="radio" name="attending" value="yes" checked; "Joyfully accepts" }
                        label { input type="radio" name="attending" value="no"; "Regretfully declines" }
                    }
                    label for="party_size" { "Number of guests" }
                    input id="party_size" name="party_size" type="number"
                        min=(rsvp_config::MIN_PARTY_SIZE) max=(rsvp_config::MAX_PARTY_SIZE)
                        value=(rsvp_config::MIN_PARTY_SIZE);
                    label for="message" { "Message for the couple" }
                    textarea id="message" name="message" rows="3" {}
                    button type="submit" { "Send RSVP" }
                }
            }
        }
    }
}

fn success_view(state: &AppState) -> Markup {
    html! {
        div class="card" {
            h1 { "Thank you!" }
            @match &state.last_submitted {
                Some(resp) if resp.attending => {
                    p { "We can't wait to celebrate with you, " (resp.guest_name) "." }
                }
                Some(resp) => {
                    p { "We'll miss you, " (resp.guest_name) ". Thank you for letting us know." }
                }
                None => {
                    p { "Your response has been recorded." }
                }
            }
        }
    }
}

fn dashboard_view(state: &AppState, base_url: &str, host_found: Option<bool>) -> Markup {
    if host_found == Some(false) {
        return html! {
            div class="card" {
                h1 { "Page not found" }
                p { "There is no RSVP page at this address." }
                a class="button" href="/" { "Create a new event" }
            }
        };
    }
    let vm = DashboardVm::from_state(state, base_url);
    let export_href = format!("/api/hosts/{}/export.csv", encode_component(&state.slug));
    html! {
        div class="card" {
            h1 { (vm.display_name) }
            p class="share-url" { (vm.share.url) }
            a class="button secondary" href=(format!("{}?preview=1", slug_path(&state.slug))) { "Preview guest page" }
            " "
            a class="button secondary" href=(export_href) download=(vm.csv_file_name) { "Export CSV" }
            " "
            a class="button secondary" href="/" { "New event" }
        }
        div class="stats" {
            div class="stat" { b { (vm.stats.total) } "Responses" }
            div class="stat" { b { (vm.stats.accepted) } "Attending" }
            div class="stat" { b { (vm.stats.declined) } "Declined" }
            div class="stat" { b { (vm.stats.total_guests) } "Guests" }
        }
        div class="card" {
            @if vm.is_empty() {
                p { "No RSVPs yet." }
            } @else {
                table {
                    thead {
                        tr { th { "Name" } th { "Email" } th { "Status" } th { "Guests" } th { "Message" } th { "Date" } th {} }
                    }
                    tbody {
                        @for row in &vm.rows {
                            tr {
                                td { (row.guest_name) }
                                td { (row.guest_email) }
                                td { (row.status_label) }
                                td { (row.party_size) }
                                td { (row.message) }
                                td { (row.submitted_on) }
                                td {
                                    form method="post" action=(format!("{}/rsvps/{}/delete", dashboard_path(&state.slug), encode_component(&row.id))) {
                                        button type="submit" { "Delete" }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
