//! Colors and color palettes
//!
//! Colors are RGB triples in `[0, 1]` with an optional alpha channel. Palettes
//! come from a small set of qualitative cycles, evenly spaced hues in HLS or
//! HUSL space, or an explicit list of colors.
//!
//! # References
//!
//! - Boronine, A. (2012). "HUSL: Human-friendly HSL." (now HSLuv)

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// RGB color with optional alpha, components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    /// Explicit alpha channel; `None` means the color carries no alpha
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
}

impl Color {
    pub const BLACK: Self = Self::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Self = Self::rgb(1.0, 1.0, 1.0);

    /// Create an opaque color without an alpha channel
    pub const fn rgb(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b, a: None }
    }

    /// Create a color with an explicit alpha channel
    pub const fn rgba(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a: Some(a) }
    }

    /// Create from 8-bit components
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::rgb(
            f64::from(r) / 255.0,
            f64::from(g) / 255.0,
            f64::from(b) / 255.0,
        )
    }

    /// Same color with the given alpha
    pub fn with_alpha(self, a: f64) -> Self {
        Self { a: Some(a), ..self }
    }

    /// RGB components without alpha
    pub fn to_rgb(self) -> [f64; 3] {
        [self.r, self.g, self.b]
    }

    /// 8-bit RGB components, clamped
    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Lowercase `#rrggbb` hex string
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_u8();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 1.0),
            g: self.g.clamp(0.0, 1.0),
            b: self.b.clamp(0.0, 1.0),
            a: self.a,
        }
    }

    /// Parse a color specification
    ///
    /// Accepts `#rrggbb`, `#rrggbbaa`, single-letter codes (`"r"`, `"g"`, ...),
    /// common color names and grey levels written as a number string (`".2"`).
    pub fn parse(spec: &str) -> Result<Self> {
        let s = spec.trim();
        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| invalid_color(spec));
        }
        if let Ok(level) = s.parse::<f64>() {
            if (0.0..=1.0).contains(&level) {
                return Ok(Self::rgb(level, level, level));
            }
            return Err(invalid_color(spec));
        }
        named_color(&s.to_ascii_lowercase()).ok_or_else(|| invalid_color(spec))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.a {
            Some(a) => write!(f, "{} (alpha {a:.2})", self.to_hex()),
            None => write!(f, "{}", self.to_hex()),
        }
    }
}

fn invalid_color(spec: &str) -> Error {
    Error::InvalidParameter(format!("Invalid color specification: {spec:?}"))
}

fn parse_hex(hex: &str) -> Option<Color> {
    let byte = |i: usize| -> Option<f64> {
        u8::from_str_radix(hex.get(i..i + 2)?, 16)
            .ok()
            .map(|v| f64::from(v) / 255.0)
    };
    match hex.len() {
        6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(Color::rgba(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let c = match name {
        "b" => Color::rgb(0.0, 0.0, 1.0),
        "g" => Color::rgb(0.0, 0.5, 0.0),
        "r" => Color::rgb(1.0, 0.0, 0.0),
        "c" => Color::rgb(0.0, 0.75, 0.75),
        "m" => Color::rgb(0.75, 0.0, 0.75),
        "y" => Color::rgb(0.75, 0.75, 0.0),
        "k" | "black" => Color::BLACK,
        "w" | "white" => Color::WHITE,
        "red" => Color::from_u8(255, 0, 0),
        "green" => Color::from_u8(0, 128, 0),
        "blue" => Color::from_u8(0, 0, 255),
        "pink" => Color::from_u8(255, 192, 203),
        "orange" => Color::from_u8(255, 165, 0),
        "purple" => Color::from_u8(128, 0, 128),
        "yellow" => Color::from_u8(255, 255, 0),
        "cyan" => Color::from_u8(0, 255, 255),
        "magenta" => Color::from_u8(255, 0, 255),
        "brown" => Color::from_u8(165, 42, 42),
        "navy" => Color::from_u8(0, 0, 128),
        "gray" | "grey" => Color::from_u8(128, 128, 128),
        "lightgray" | "lightgrey" => Color::from_u8(211, 211, 211),
        "darkgray" | "darkgrey" => Color::from_u8(169, 169, 169),
        _ => return None,
    };
    Some(c)
}

/// Qualitative palettes addressable by name
const QUALITATIVE: &[(&str, [&str; 6])] = &[
    ("deep", ["#4C72B0", "#55A868", "#C44E52", "#8172B2", "#CCB974", "#64B5CD"]),
    ("muted", ["#4878CF", "#6ACC65", "#D65F5F", "#B47CC7", "#C4AD66", "#77BEDB"]),
    ("pastel", ["#92C6FF", "#97F0AA", "#FF9F9A", "#D0BBFF", "#FFFEA3", "#B0E0E6"]),
    ("bright", ["#003FFF", "#03ED3A", "#E8000B", "#8A2BE2", "#FFC400", "#00D7FF"]),
    ("dark", ["#001C7F", "#017517", "#8C0900", "#7600A1", "#B8860B", "#006374"]),
    ("colorblind", ["#0072B2", "#009E73", "#D55E00", "#CC79A7", "#F0E442", "#56B4E9"]),
];

fn qualitative(name: &str) -> Option<Vec<Color>> {
    QUALITATIVE
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, hexes)| hexes.iter().filter_map(|h| parse_hex(&h[1..])).collect())
}

/// The default color cycle
pub fn default_cycle() -> Vec<Color> {
    qualitative("deep").unwrap_or_default()
}

/// How a palette is requested
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PaletteSpec {
    /// A palette name such as `"deep"`, `"husl"` or `"hls"`
    Named(String),
    /// An explicit list of colors, cycled as needed
    Colors(Vec<Color>),
    /// Colors keyed by hue level
    Mapping(BTreeMap<String, Color>),
}

impl From<&str> for PaletteSpec {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<Vec<Color>> for PaletteSpec {
    fn from(colors: Vec<Color>) -> Self {
        Self::Colors(colors)
    }
}

impl From<BTreeMap<String, Color>> for PaletteSpec {
    fn from(mapping: BTreeMap<String, Color>) -> Self {
        Self::Mapping(mapping)
    }
}

/// Resolve a palette to exactly `n_colors` colors
///
/// `None` gives the default cycle. Explicit lists and qualitative palettes
/// are cycled when fewer colors than requested are available. A mapping
/// palette has no intrinsic order and must be resolved against hue levels by
/// the caller.
pub fn color_palette(palette: Option<&PaletteSpec>, n_colors: usize) -> Result<Vec<Color>> {
    let base = match palette {
        None => default_cycle(),
        Some(PaletteSpec::Named(name)) => match name.to_ascii_lowercase().as_str() {
            "husl" => return Ok(husl_palette(n_colors, 0.01, 0.9, 0.65)),
            "hls" => return Ok(hls_palette(n_colors, 0.01, 0.6, 0.65)),
            other => qualitative(other).ok_or_else(|| {
                Error::Configuration(format!("{name} is not a valid palette name"))
            })?,
        },
        Some(PaletteSpec::Colors(colors)) => colors.clone(),
        Some(PaletteSpec::Mapping(_)) => {
            return Err(Error::Configuration(
                "A mapping palette needs levels to be resolved".to_string(),
            ))
        }
    };
    if base.is_empty() {
        return Err(Error::Configuration("Palette has no colors".to_string()));
    }
    if base.len() < n_colors {
        debug!("Cycling {} palette colors to fill {}", base.len(), n_colors);
    }
    Ok(base.iter().copied().cycle().take(n_colors).collect())
}

fn spaced_hues(n_colors: usize, h: f64) -> Vec<f64> {
    (0..n_colors)
        .map(|i| (i as f64 / n_colors as f64 + h).rem_euclid(1.0))
        .collect()
}

/// Evenly spaced hues in HLS space
pub fn hls_palette(n_colors: usize, h: f64, l: f64, s: f64) -> Vec<Color> {
    spaced_hues(n_colors, h)
        .into_iter()
        .map(|hue| hls_to_rgb(hue, l, s))
        .collect()
}

/// Evenly spaced hues in HUSL space, which keeps perceived lightness constant
pub fn husl_palette(n_colors: usize, h: f64, s: f64, l: f64) -> Vec<Color> {
    spaced_hues(n_colors, h)
        .into_iter()
        .map(|hue| husl::to_rgb(hue * 359.0, s * 99.0, l * 99.0).clamped())
        .collect()
}

fn hls_to_rgb(h: f64, l: f64, s: f64) -> Color {
    if s == 0.0 {
        return Color::rgb(l, l, l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    let channel = |hue: f64| {
        let hue = hue.rem_euclid(1.0);
        if hue < 1.0 / 6.0 {
            m1 + (m2 - m1) * hue * 6.0
        } else if hue < 0.5 {
            m2
        } else if hue < 2.0 / 3.0 {
            m1 + (m2 - m1) * (2.0 / 3.0 - hue) * 6.0
        } else {
            m1
        }
    };
    Color::rgb(channel(h + 1.0 / 3.0), channel(h), channel(h - 1.0 / 3.0))
}

mod husl {
    use super::Color;

    const M: [[f64; 3]; 3] = [
        [3.2406, -1.5372, -0.4986],
        [-0.9689, 1.8758, 0.0415],
        [0.0557, -0.2040, 1.0570],
    ];
    const REF_Y: f64 = 1.0;
    const REF_U: f64 = 0.19784;
    const REF_V: f64 = 0.46834;
    const LAB_E: f64 = 0.008856;
    const LAB_K: f64 = 903.3;

    /// Largest chroma representable in sRGB for a lightness and hue
    fn max_chroma(l: f64, h: f64) -> f64 {
        let hrad = h.to_radians();
        let (sin_h, cos_h) = hrad.sin_cos();
        let sub1 = (l + 16.0).powi(3) / 1_560_896.0;
        let sub2 = if sub1 > LAB_E { sub1 } else { l / LAB_K };
        let mut result = f64::INFINITY;
        for [m1, m2, m3] in M {
            let top = (0.99915 * m1 + 1.05122 * m2 + 1.14460 * m3) * sub2;
            let rbottom = 0.86330 * m3 - 0.17266 * m2;
            let lbottom = 0.12949 * m3 - 0.38848 * m1;
            let bottom = (rbottom * sin_h + lbottom * cos_h) * sub2;
            for t in [0.0, 1.0] {
                let c = l * (top - 1.05122 * t) / (bottom + 0.17266 * sin_h * t);
                if c > 0.0 && c < result {
                    result = c;
                }
            }
        }
        result
    }

    fn f_inv(t: f64) -> f64 {
        if t.powi(3) > LAB_E {
            t.powi(3)
        } else {
            (116.0 * t - 16.0) / LAB_K
        }
    }

    fn from_linear(c: f64) -> f64 {
        if c <= 0.003_130_8 {
            12.92 * c
        } else {
            1.055 * c.powf(1.0 / 2.4) - 0.055
        }
    }

    /// HUSL (hue in degrees, saturation and lightness in `[0, 100]`) to sRGB
    pub(super) fn to_rgb(h: f64, s: f64, l: f64) -> Color {
        if l > 99.999_999_9 {
            return Color::WHITE;
        }
        if l < 1e-8 {
            return Color::BLACK;
        }
        // HUSL -> LCH
        let c = max_chroma(l, h) / 100.0 * s;
        // LCH -> LUV
        let hrad = h.to_radians();
        let u = hrad.cos() * c;
        let v = hrad.sin() * c;
        // LUV -> XYZ
        let var_y = f_inv((l + 16.0) / 116.0);
        let var_u = u / (13.0 * l) + REF_U;
        let var_v = v / (13.0 * l) + REF_V;
        let y = var_y * REF_Y;
        let x = -(9.0 * y * var_u) / ((var_u - 4.0) * var_v - var_u * var_v);
        let z = (9.0 * y - 15.0 * var_v * y - var_v * x) / (3.0 * var_v);
        // XYZ -> sRGB
        let xyz = [x, y, z];
        let channel = |row: [f64; 3]| from_linear(row[0] * xyz[0] + row[1] * xyz[1] + row[2] * xyz[2]);
        Color::rgb(channel(M[0]), channel(M[1]), channel(M[2]))
    }
}
