// Chart rendering: word cloud, similarity heatmap, recommendation bars.
//
// Everything is drawn with plotters onto SVG files so charts can be produced
// on a headless machine. Each renderer writes one file and returns its path.

pub mod bars;
pub mod heatmap;
pub mod wordcloud;

use std::path::{Path, PathBuf};

use plotters::style::RGBColor;

use crate::error::{LookalikeError, Result};

pub use bars::render_recommendation_bars;
pub use heatmap::render_heatmap;
pub use wordcloud::render_wordcloud;

pub const FONT: &str = "sans-serif";

/// Longest title shown on an axis before truncation.
pub const LABEL_CHARS: usize = 28;

pub fn wordcloud_path(dir: &Path) -> PathBuf {
    dir.join("wordcloud.svg")
}

pub fn heatmap_path(dir: &Path) -> PathBuf {
    dir.join("similarity_heatmap.svg")
}

pub fn bars_path(dir: &Path, product_index: usize) -> PathBuf {
    dir.join(format!("recommendations_{product_index}.svg"))
}

/// Create the parent directory of `path` if needed.
pub(crate) fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| {
                LookalikeError::Render(format!("cannot create {}: {e}", dir.display()))
            })
        }
        _ => Ok(()),
    }
}

/// Linear interpolation between two colors, `t` clamped to [0, 1].
pub fn lerp_color(from: RGBColor, to: RGBColor, t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0);
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
    RGBColor(mix(from.0, to.0), mix(from.1, to.1), mix(from.2, to.2))
}

/// Diverging blue → grey → red scale for values in [0, 1].
pub fn coolwarm(value: f64) -> RGBColor {
    const COOL: RGBColor = RGBColor(59, 76, 192);
    const MID: RGBColor = RGBColor(221, 221, 221);
    const WARM: RGBColor = RGBColor(180, 4, 38);

    let v = value.clamp(0.0, 1.0);
    if v < 0.5 {
        lerp_color(COOL, MID, v * 2.0)
    } else {
        lerp_color(MID, WARM, (v - 0.5) * 2.0)
    }
}

/// Whether dark text is readable on `background`.
pub fn is_light(background: RGBColor) -> bool {
    let luminance =
        0.299 * background.0 as f64 + 0.587 * background.1 as f64 + 0.114 * background.2 as f64;
    luminance > 140.0
}
