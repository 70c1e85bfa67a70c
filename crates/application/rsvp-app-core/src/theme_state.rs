//! Process-wide theme: the ten `--color-primary-*` variables every view reads.

use std::sync::{OnceLock, PoisonError, RwLock};

use rsvp_core::{themes, Theme};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeSnapshot {
    pub theme_id: &'static str,
    pub vars: Vec<(String, String)>,
}

impl ThemeSnapshot {
    pub fn for_theme(theme: &'static Theme) -> Self {
        Self {
            theme_id: theme.id,
            vars: theme.palette().style_vars(rsvp_config::STYLE_VAR_PREFIX),
        }
    }

    /// `:root { ... }` block carrying the variables.
    pub fn css_root(&self) -> String {
        let body: String = self
            .vars
            .iter()
            .map(|(name, value)| format!("{name}: {value}; "))
            .collect();
        format!(":root {{ {body}}}")
    }
}

fn state() -> &'static RwLock<ThemeSnapshot> {
    static STATE: OnceLock<RwLock<ThemeSnapshot>> = OnceLock::new();
    STATE.get_or_init(|| {
        RwLock::new(ThemeSnapshot::for_theme(themes::resolve(
            rsvp_config::DEFAULT_THEME_ID,
        )))
    })
}

/// Publish the palette of `theme_id`. Unknown ids fall back to the default
/// theme, then to the first catalog entry. Last write wins.
pub fn apply_theme(theme_id: &str) -> &'static Theme {
    let theme = themes::resolve(theme_id);
    if theme.id != theme_id {
        tracing::debug!(requested = theme_id, applied = theme.id, "unknown theme id");
    }
    let next = ThemeSnapshot::for_theme(theme);
    *state().write().unwrap_or_else(PoisonError::into_inner) = next;
    theme
}

pub fn current_theme_id() -> &'static str {
    state()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .theme_id
}

pub fn style_var(name: &str) -> Option<String> {
    state()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .vars
        .iter()
        .find(|(n, _)| n == name)
        .map(|(_, v)| v.clone())
}

pub fn snapshot() -> ThemeSnapshot {
    state()
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static SERIAL: Mutex<()> = Mutex::new(());

    #[test]
    fn apply_publishes_all_stops() {
        let _g = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let theme = apply_theme("rose");
        assert_eq!(theme.id, "rose");
        assert_eq!(current_theme_id(), "rose");
        assert_eq!(style_var("--color-primary-500").as_deref(), Some(theme.color));
        assert_eq!(style_var("--color-primary-50").as_deref(), Some("#fef5f7"));
        assert_eq!(snapshot().vars.len(), 10);
    }

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let _g = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        let theme = apply_theme("no-such-theme");
        assert_eq!(theme.id, rsvp_config::DEFAULT_THEME_ID);
        assert_eq!(current_theme_id(), rsvp_config::DEFAULT_THEME_ID);
    }

    #[test]
    fn css_root_lists_variables() {
        let _g = SERIAL.lock().unwrap_or_else(PoisonError::into_inner);
        apply_theme("rose");
        let css = snapshot().css_root();
        assert!(css.starts_with(":root { --color-primary-50: #fef5f7; "));
        assert!(css.ends_with("--color-primary-900: #49131c; }"));
    }
}
