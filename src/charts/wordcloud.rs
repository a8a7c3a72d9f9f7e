// Word cloud of all product descriptions.
//
// Words are counted with the same tokenizer the vectorizer uses, sized
// relative to the most frequent word, and placed largest-first along an
// outward spiral from the canvas center. Placement is deterministic: the
// same catalog always produces the same picture.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use plotters::prelude::*;
use tracing::info;

use super::{ensure_parent, FONT};
use crate::catalog::Catalog;
use crate::error::{LookalikeError, Result};
use crate::text::tokenize::Tokenizer;

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 400;
pub const MAX_WORDS: usize = 100;

const MAX_FONT: f64 = 72.0;
const MIN_FONT: f64 = 8.0;
/// Average glyph width as a fraction of font size
const GLYPH_ASPECT: f64 = 0.6;
const PADDING: i32 = 2;
const SPIRAL_STEP: f64 = 0.1;
const SPIRAL_GROWTH: f64 = 1.5;

/// Viridis samples, dark to light.
const PALETTE: [RGBColor; 6] = [
    RGBColor(68, 1, 84),
    RGBColor(65, 68, 135),
    RGBColor(42, 120, 142),
    RGBColor(34, 168, 132),
    RGBColor(122, 209, 81),
    RGBColor(189, 223, 38),
];

/// A word with its position and box on the canvas (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    pub font_size: f64,
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl PlacedWord {
    fn overlaps(&self, x: i32, y: i32, width: i32, height: i32) -> bool {
        x < self.x + self.width + PADDING
            && self.x < x + width + PADDING
            && y < self.y + self.height + PADDING
            && self.y < y + height + PADDING
    }
}

/// Count tokens across all `texts`, most frequent first (ties alphabetical).
pub fn word_frequencies(texts: &[String], tokenizer: &Tokenizer) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for text in texts {
        for token in tokenizer.tokenize(text) {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

/// Place words on a `width × height` canvas without overlaps.
///
/// `freqs` must be sorted most frequent first. Words that cannot be placed
/// at a legible size are skipped.
pub fn layout_words(freqs: &[(String, usize)], width: u32, height: u32) -> Vec<PlacedWord> {
    let Some(&(_, max_count)) = freqs.first() else {
        return Vec::new();
    };
    let (w, h) = (width as f64, height as f64);
    let aspect = w / h.max(1.0);
    let max_radius = w.hypot(h) / 2.0;

    let mut placed: Vec<PlacedWord> = Vec::new();

    for (text, count) in freqs.iter().take(MAX_WORDS) {
        let chars = text.chars().count().max(1) as f64;
        let relative = *count as f64 / max_count as f64;
        let mut font_size = (MAX_FONT * (0.5 * relative + 0.5)).max(MIN_FONT);

        // Shrink long words to fit the canvas width
        let fit = 0.95 * w / (GLYPH_ASPECT * chars);
        if font_size > fit {
            font_size = fit;
        }
        if font_size < MIN_FONT {
            continue;
        }

        let box_w = (GLYPH_ASPECT * chars * font_size).ceil() as i32;
        let box_h = font_size.ceil() as i32;

        let mut step = 0usize;
        loop {
            let t = step as f64 * SPIRAL_STEP;
            let r = SPIRAL_GROWTH * t;
            if r > max_radius {
                break;
            }
            let cx = w / 2.0 + r * t.cos() * aspect;
            let cy = h / 2.0 + r * t.sin();
            let x = (cx - box_w as f64 / 2.0).round() as i32;
            let y = (cy - box_h as f64 / 2.0).round() as i32;

            let inside = x >= 0 && y >= 0 && x + box_w <= width as i32 && y + box_h <= height as i32;
            if inside && !placed.iter().any(|p| p.overlaps(x, y, box_w, box_h)) {
                placed.push(PlacedWord {
                    text: text.clone(),
                    font_size,
                    x,
                    y,
                    width: box_w,
                    height: box_h,
                });
                break;
            }
            step += 1;
        }
    }

    placed
}

/// Render a word cloud of every description in the catalog to `path`.
pub fn render_wordcloud(catalog: &Catalog, path: &Path) -> Result<PathBuf> {
    let freqs = word_frequencies(&catalog.descriptions(), &Tokenizer::english());
    if freqs.is_empty() {
        return Err(LookalikeError::Render(
            "no words to draw in the word cloud".to_string(),
        ));
    }

    ensure_parent(path)?;
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(LookalikeError::render)?;
    let area = root
        .titled("WordCloud: Product Descriptions", (FONT, 20.0))
        .map_err(LookalikeError::render)?;

    let (area_w, area_h) = area.dim_in_pixel();
    let words = layout_words(&freqs, area_w, area_h);

    for (i, word) in words.iter().enumerate() {
        let color = PALETTE[i % PALETTE.len()];
        let style = (FONT, word.font_size).into_font().color(&color);
        area.draw(&Text::new(word.text.clone(), (word.x, word.y), style))
            .map_err(LookalikeError::render)?;
    }

    root.present().map_err(LookalikeError::render)?;
    info!(path = %path.display(), words = words.len(), "Rendered word cloud");

    Ok(path.to_path_buf())
}
