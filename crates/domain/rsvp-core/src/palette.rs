use serde::ser::{Serialize, SerializeMap, Serializer};

/// Stops of a color scale, lightest first.
pub const STOPS: [u16; 10] = [50, 100, 200, 300, 400, 500, 600, 700, 800, 900];

/// Blend weight toward white for the stops above the base.
const TINTS: [(u16, f64); 5] = [(50, 0.95), (100, 0.90), (200, 0.80), (300, 0.60), (400, 0.30)];

/// Blend weight toward black for the stops below the base.
const SHADES: [(u16, f64); 4] = [(600, 0.10), (700, 0.30), (800, 0.50), (900, 0.70)];

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum PaletteError {
    #[error("expected a 6-digit hex color, got {0:?}")]
    InvalidHex(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the `#` is optional, digits are case-insensitive).
    pub fn from_hex(hex: &str) -> Result<Self, PaletteError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let mut buf = [0u8; 3];
        if digits.len() != 6 || hex::decode_to_slice(digits, &mut buf).is_err() {
            return Err(PaletteError::InvalidHex(hex.to_string()));
        }
        Ok(Self::new(buf[0], buf[1], buf[2]))
    }

    pub fn to_hex(self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// Linear blend `self*(1-weight) + target*weight`, rounded per channel.
    pub fn mix(self, target: Rgb, weight: f64) -> Self {
        let blend = |c: u8, t: u8| -> u8 {
            let v = f64::from(c) * (1.0 - weight) + f64::from(t) * weight;
            v.round().clamp(0.0, 255.0) as u8
        };
        Self::new(
            blend(self.r, target.r),
            blend(self.g, target.g),
            blend(self.b, target.b),
        )
    }

    pub fn channel_sum(self) -> u16 {
        u16::from(self.r) + u16::from(self.g) + u16::from(self.b)
    }
}

/// Ten shades keyed by [`STOPS`]; stop 500 is the base color as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorScale {
    shades: [String; 10],
}

impl ColorScale {
    pub fn get(&self, stop: u16) -> Option<&str> {
        STOPS
            .iter()
            .position(|s| *s == stop)
            .map(|ix| self.shades[ix].as_str())
    }

    pub fn base(&self) -> &str {
        &self.shades[5]
    }

    pub fn iter(&self) -> impl Iterator<Item = (u16, &str)> {
        STOPS
            .iter()
            .copied()
            .zip(self.shades.iter().map(String::as_str))
    }

    /// `(name, value)` pairs such as `("--color-primary-50", "#fef3f5")`.
    pub fn style_vars(&self, prefix: &str) -> Vec<(String, String)> {
        self.iter()
            .map(|(stop, hex)| (format!("{prefix}-{stop}"), hex.to_string()))
            .collect()
    }
}

impl Serialize for ColorScale {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(STOPS.len()))?;
        for (stop, hex) in self.iter() {
            map.serialize_entry(&stop.to_string(), hex)?;
        }
        map.end()
    }
}

/// Derive the full scale from one base color.
///
/// A base that is not `#rrggbb` is read as black for every derived stop while
/// stop 500 still echoes the input. Use [`try_generate_palette`] to surface
/// the parse error instead.
pub fn generate_palette(base_hex: &str) -> ColorScale {
    let base = Rgb::from_hex(base_hex).unwrap_or(Rgb::BLACK);
    build_scale(base, base_hex)
}

pub fn try_generate_palette(base_hex: &str) -> Result<ColorScale, PaletteError> {
    let base = Rgb::from_hex(base_hex)?;
    Ok(build_scale(base, base_hex))
}

fn build_scale(base: Rgb, base_hex: &str) -> ColorScale {
    let tint = |w: f64| base.mix(Rgb::WHITE, w).to_hex();
    let shade = |w: f64| base.mix(Rgb::BLACK, w).to_hex();
    let [t50, t100, t200, t300, t400] = TINTS.map(|(_, w)| tint(w));
    let [s600, s700, s800, s900] = SHADES.map(|(_, w)| shade(w));
    ColorScale {
        shades: [
            t50,
            t100,
            t200,
            t300,
            t400,
            base_hex.to_string(),
            s600,
            s700,
            s800,
            s900,
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rose_scale_matches_reference_values() {
        let scale = generate_palette("#f43f5e");
        assert_eq!(scale.get(50), Some("#fef5f7"));
        assert_eq!(scale.get(400), Some("#f7798e"));
        assert_eq!(scale.get(500), Some("#f43f5e"));
        assert_eq!(scale.get(600), Some("#dc3955"));
        assert_eq!(scale.get(900), Some("#49131c"));
    }

    #[test]
    fn hex_is_lowercase_and_zero_padded() {
        let scale = generate_palette("#000080");
        assert_eq!(scale.get(900), Some("#000026"));
        assert_eq!(scale.get(50), Some("#f2f2f9"));
    }

    #[test]
    fn uppercase_and_hashless_input_parse() {
        assert_eq!(Rgb::from_hex("FF7F50"), Ok(Rgb::new(255, 127, 80)));
        assert_eq!(Rgb::from_hex("#ff7f50"), Ok(Rgb::new(255, 127, 80)));
    }

    #[test]
    fn malformed_input_degrades_to_black() {
        let scale = generate_palette("tomato");
        assert_eq!(scale.get(500), Some("tomato"));
        assert_eq!(scale.get(600), Some("#000000"));
        assert_eq!(scale.get(50), Some("#f2f2f2"));
        assert!(matches!(
            try_generate_palette("#abc"),
            Err(PaletteError::InvalidHex(_))
        ));
    }

    #[test]
    fn unknown_stop_is_none() {
        assert_eq!(generate_palette("#808080").get(950), None);
    }

    #[test]
    fn serializes_as_stop_map() {
        let json = serde_json::to_value(generate_palette("#808080")).unwrap();
        assert_eq!(json["500"], "#808080");
        assert_eq!(json.as_object().unwrap().len(), 10);
    }
}
