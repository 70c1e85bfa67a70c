use serde::Serialize;

use crate::palette::{generate_palette, ColorScale};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub id: &'static str,
    pub name: &'static str,
    /// Base color, used as stop 500 of the derived scale.
    pub color: &'static str,
}

impl Theme {
    pub fn palette(&self) -> ColorScale {
        generate_palette(self.color)
    }
}

const fn theme(id: &'static str, name: &'static str, color: &'static str) -> Theme {
    Theme { id, name, color }
}

pub const THEMES: &[Theme] = &[
    theme("rose", "Classic Rose", "#f43f5e"),
    theme("burgundy", "Burgundy", "#800020"),
    theme("marsala", "Marsala", "#955251"),
    theme("blush", "Blush Pink", "#ffb7c5"),
    theme("coral", "Coral Reef", "#ff7f50"),
    theme("peach", "Peach", "#ffcba4"),
    theme("terracotta", "Terracotta", "#e2725b"),
    theme("dusty-rose", "Dusty Rose", "#dcae96"),
    theme("sapphire", "Sapphire Blue", "#0f52ba"),
    theme("navy", "Navy Blue", "#000080"),
    theme("midnight", "Midnight Blue", "#191970"),
    theme("royal", "Royal Blue", "#4169e1"),
    theme("sky", "Sky Blue", "#87ceeb"),
    theme("powder", "Powder Blue", "#b0e0e6"),
    theme("dusty-blue", "Dusty Blue", "#5b7c99"),
    theme("teal", "Teal", "#008080"),
    theme("turquoise", "Turquoise", "#40e0d0"),
    theme("emerald", "Emerald Green", "#50c878"),
    theme("hunter", "Hunter Green", "#355e3b"),
    theme("forest", "Forest Green", "#228b22"),
    theme("sage", "Sage Green", "#9dc183"),
    theme("olive", "Olive", "#808000"),
    theme("moss", "Moss Green", "#8a9a5b"),
    theme("mint", "Mint", "#98ff98"),
    theme("gold", "Classic Gold", "#ffd700"),
    theme("champagne", "Champagne", "#f7e7ce"),
    theme("mustard", "Mustard", "#ffdb58"),
    theme("violet", "Violet", "#8f00ff"),
    theme("lavender", "Lavender", "#e6e6fa"),
    theme("plum", "Plum", "#8e4585"),
    theme("lilac", "Lilac", "#c8a2c8"),
    theme("mauve", "Mauve", "#e0b0ff"),
    theme("orchid", "Orchid", "#da70d6"),
    theme("chocolate", "Chocolate", "#7b3f00"),
    theme("rust", "Rust", "#b7410e"),
    theme("sand", "Sand", "#c2b280"),
    theme("taupe", "Taupe", "#483c32"),
    theme("grey", "Classic Grey", "#808080"),
    theme("charcoal", "Charcoal", "#36454f"),
    theme("slate", "Slate", "#708090"),
    theme("silver", "Silver", "#c0c0c0"),
    theme("black", "Modern Black", "#000000"),
    theme("bordeaux", "Bordeaux", "#4c0013"),
    theme("crimson", "Crimson", "#dc143c"),
    theme("fuchsia", "Fuchsia", "#ff00ff"),
    theme("magenta", "Magenta", "#ff0090"),
    theme("tangerine", "Tangerine", "#f28500"),
    theme("cinnabar", "Cinnabar", "#e34234"),
    theme("indigo", "Indigo", "#4b0082"),
    theme("periwinkle", "Periwinkle", "#ccccff"),
];

pub fn find(id: &str) -> Option<&'static Theme> {
    THEMES.iter().find(|t| t.id == id)
}

/// Look up `id`, then the default theme, then the first catalog entry.
pub fn resolve(id: &str) -> &'static Theme {
    find(id)
        .or_else(|| find(rsvp_config::DEFAULT_THEME_ID))
        .unwrap_or(&THEMES[0])
}

/// Case-insensitive substring match on the theme name.
pub fn search(query: &str) -> Vec<&'static Theme> {
    let needle = query.to_lowercase();
    THEMES
        .iter()
        .filter(|t| t.name.to_lowercase().contains(&needle))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn catalog_ids_are_unique() {
        let ids: HashSet<_> = THEMES.iter().map(|t| t.id).collect();
        assert_eq!(ids.len(), THEMES.len());
    }

    #[test]
    fn every_catalog_color_parses() {
        for t in THEMES {
            assert!(
                crate::palette::Rgb::from_hex(t.color).is_ok(),
                "bad color for {}",
                t.id
            );
        }
    }

    #[test]
    fn resolve_falls_back_to_default() {
        assert_eq!(resolve("sage").id, "sage");
        assert_eq!(resolve("no-such-theme").id, rsvp_config::DEFAULT_THEME_ID);
    }

    #[test]
    fn search_ignores_case() {
        let hits: Vec<_> = search("BLUE").into_iter().map(|t| t.id).collect();
        assert!(hits.contains(&"sapphire"));
        assert!(hits.contains(&"dusty-blue"));
        assert!(!hits.contains(&"rose"));
        assert_eq!(search("").len(), THEMES.len());
    }
}
