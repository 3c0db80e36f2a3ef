//! Ancestry colors.
//!
//! Roots draw colors from a palette in round-robin order; everyone else gets the HSV blend of
//! their parents' colors.

use crate::graph::FamilyGraph;
use serde::Deserialize;

pub const DEFAULT_PALETTE: [&str; 10] = [
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEAA7", "#DDA0DD", "#98D8C8", "#F7DC6F",
    "#BB8FCE", "#85C1E9",
];

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PaletteError {
    #[error("the palette must contain at least one color")]
    Empty,
    #[error("invalid palette color `{color}` (expected #rrggbb)")]
    InvalidColor { color: String },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub palette: Vec<String>,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl LayoutOptions {
    pub fn validate(&self) -> Result<(), PaletteError> {
        if self.palette.is_empty() {
            return Err(PaletteError::Empty);
        }
        if let Some(bad) = self.palette.iter().find(|c| Rgb::from_hex(c).is_none()) {
            return Err(PaletteError::InvalidColor { color: bad.clone() });
        }
        Ok(())
    }
}

/// RGB with channels in `0..=1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSV with all components in `0..=1` (hue is a fraction of a turn).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgb {
    /// Parses `#rrggbb` (the `#` is optional).
    pub fn from_hex(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Self {
            r: f64::from(r) / 255.0,
            g: f64::from(g) / 255.0,
            b: f64::from(b) / 255.0,
        })
    }

    /// Lowercase `#rrggbb`.
    pub fn to_hex(self) -> String {
        let channel = |c: f64| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!(
            "#{:02x}{:02x}{:02x}",
            channel(self.r),
            channel(self.g),
            channel(self.b)
        )
    }

    pub fn luminance(self) -> f64 {
        0.299 * self.r + 0.587 * self.g + 0.114 * self.b
    }

    pub fn to_hsv(self) -> Hsv {
        let Self { r, g, b } = self;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let diff = max - min;

        let mut h = 0.0;
        if diff != 0.0 {
            h = if max == r {
                ((g - b) / diff) % 6.0
            } else if max == g {
                (b - r) / diff + 2.0
            } else {
                (r - g) / diff + 4.0
            };
        }
        h /= 6.0;
        if h < 0.0 {
            h += 1.0;
        }

        Hsv {
            h,
            s: if max == 0.0 { 0.0 } else { diff / max },
            v: max,
        }
    }
}

impl Hsv {
    pub fn to_rgb(self) -> Rgb {
        let Self { h, s, v } = self;
        let c = v * s;
        let x = c * (1.0 - ((h * 6.0) % 2.0 - 1.0).abs());
        let m = v - c;

        let (r, g, b) = if h < 1.0 / 6.0 {
            (c, x, 0.0)
        } else if h < 2.0 / 6.0 {
            (x, c, 0.0)
        } else if h < 3.0 / 6.0 {
            (0.0, c, x)
        } else if h < 4.0 / 6.0 {
            (0.0, x, c)
        } else if h < 5.0 / 6.0 {
            (x, 0.0, c)
        } else {
            (c, 0.0, x)
        };

        Rgb {
            r: r + m,
            g: g + m,
            b: b + m,
        }
    }
}

/// Mean hue. Exactly two hues at least half a turn apart are averaged across the wrap point;
/// three or more use the plain arithmetic mean, wrap-around included.
pub fn mean_hue(hues: &[f64]) -> f64 {
    match hues {
        [] => 0.0,
        [a, b] if (a - b).abs() >= 0.5 => ((a + b + 1.0) / 2.0) % 1.0,
        [a, b] => (a + b) / 2.0,
        _ => hues.iter().sum::<f64>() / hues.len() as f64,
    }
}

/// Blends hex colors in HSV space. A single color is returned untouched; identical colors are
/// counted once. Unparseable entries are ignored.
pub fn blend_colors(colors: &[&str]) -> Option<String> {
    if let [only] = colors {
        return Some(only.to_string());
    }

    let mut unique: Vec<Hsv> = Vec::with_capacity(colors.len());
    for hsv in colors.iter().filter_map(|c| Rgb::from_hex(c)).map(Rgb::to_hsv) {
        let seen = unique.iter().any(|u| {
            u.h.to_bits() == hsv.h.to_bits()
                && u.s.to_bits() == hsv.s.to_bits()
                && u.v.to_bits() == hsv.v.to_bits()
        });
        if !seen {
            unique.push(hsv);
        }
    }
    if unique.is_empty() {
        return None;
    }

    let n = unique.len() as f64;
    let hues: Vec<f64> = unique.iter().map(|c| c.h).collect();
    let blended = Hsv {
        h: mean_hue(&hues),
        s: unique.iter().map(|c| c.s).sum::<f64>() / n,
        v: unique.iter().map(|c| c.v).sum::<f64>() / n,
    };
    Some(blended.to_rgb().to_hex())
}

/// Whether black text reads better than white on `color`.
pub fn is_light(color: &str) -> bool {
    Rgb::from_hex(color).is_some_and(|rgb| rgb.luminance() > 0.5)
}

impl FamilyGraph {
    /// Colors every person, band by band.
    ///
    /// Parentless people take the next palette color from a single counter shared by all
    /// bands. The counter starts past one slot per first-generation person: with `n0` people
    /// in generation 0, the first person of that band gets `palette[n0 % palette.len()]`.
    pub fn propagate_colors(&mut self, palette: &[String]) {
        if palette.is_empty() {
            return;
        }
        let mut next_color = self.generation(0).len();

        for band in 0..self.generations.len() {
            for i in 0..self.generations[band].len() {
                let id = self.generations[band][i];
                let color = if self[id].parents.is_empty() {
                    let color = palette[next_color % palette.len()].clone();
                    next_color += 1;
                    Some(color)
                } else {
                    let parent_colors: Vec<&str> = self[id]
                        .parents
                        .iter()
                        .filter_map(|&p| self[p].color.as_deref())
                        .collect();
                    if parent_colors.is_empty() {
                        None
                    } else {
                        blend_colors(&parent_colors)
                    }
                };
                self[id].color = color;
            }
        }
    }
}
