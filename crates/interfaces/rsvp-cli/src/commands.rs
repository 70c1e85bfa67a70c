//! Stateless commands: they never touch the record store.

use anyhow::Result;
use rsvp_core::share::ShareLink;
use rsvp_core::{resolve_initial_view, themes, try_generate_palette, RouteContext};

pub fn render_resolution(location: &str) -> String {
    let ctx = RouteContext::parse(location);
    let res = resolve_initial_view(&ctx);
    let mut out = String::new();
    out.push_str(&format!("view:         {}\n", res.view.as_str()));
    out.push_str(&format!("slug:         {}\n", res.slug));
    out.push_str(&format!("display name: {}\n", res.display_name));
    out.push_str(&format!("rule:         {:?}\n", res.rule));
    if let Some(loc) = res.canonical_location() {
        out.push_str(&format!("replace with: {loc}\n"));
    }
    out
}

pub fn cmd_resolve(location: &str) -> Result<()> {
    print!("{}", render_resolution(location));
    Ok(())
}

/// Scale for either a theme id or a raw base color.
pub fn render_palette(base: &str, is_theme: bool, json: bool) -> Result<String> {
    let scale = if is_theme {
        themes::resolve(base).palette()
    } else {
        try_generate_palette(base)?
    };
    if json {
        return Ok(serde_json::to_string_pretty(&scale)? + "\n");
    }
    Ok(scale
        .style_vars(rsvp_config::STYLE_VAR_PREFIX)
        .into_iter()
        .map(|(name, value)| format!("{name}: {value};\n"))
        .collect())
}

pub fn cmd_palette(base: &str, is_theme: bool, json: bool) -> Result<()> {
    print!("{}", render_palette(base, is_theme, json)?);
    Ok(())
}

pub fn render_themes(query: Option<&str>) -> String {
    let list = match query {
        Some(q) => themes::search(q),
        None => themes::THEMES.iter().collect(),
    };
    if list.is_empty() {
        return "No themes match.\n".to_string();
    }
    let mut out = format!("{:<16} {:<24} {:<8}\n", "ID", "NAME", "COLOR");
    out.push_str(&format!("{:-<16} {:-<24} {:-<8}\n", "", "", ""));
    for t in list {
        out.push_str(&format!("{:<16} {:<24} {:<8}\n", t.id, t.name, t.color));
    }
    out
}

pub fn cmd_themes(query: Option<&str>) -> Result<()> {
    print!("{}", render_themes(query));
    Ok(())
}

pub fn render_share(base_url: &str, slug: &str) -> String {
    let link = ShareLink::new(base_url, slug);
    format!("link:    {}\nqr file: {}\n", link.url, link.qr_file_name)
}

pub fn cmd_share(base_url: &str, slug: &str) -> Result<()> {
    print!("{}", render_share(base_url, slug));
    Ok(())
}
