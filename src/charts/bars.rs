// Horizontal bar chart of a query product's top recommendations.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use tracing::info;

use super::{ensure_parent, lerp_color, FONT, LABEL_CHARS};
use crate::error::{LookalikeError, Result};
use crate::output::truncate_chars;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 500;
const LABEL_WIDTH: i32 = 260;

/// Darkest bar (best match) and lightest bar.
const DARK_BLUE: RGBColor = RGBColor(8, 48, 107);
const LIGHT_BLUE: RGBColor = RGBColor(158, 202, 225);

/// Render the scores in `similarity_row` at `indices` as horizontal bars,
/// best match on top, labelled with `titles`, to `path`.
pub fn render_recommendation_bars(
    similarity_row: &[f64],
    indices: &[usize],
    titles: &[String],
    path: &Path,
) -> Result<PathBuf> {
    if indices.is_empty() {
        return Err(LookalikeError::Render(
            "no recommendations to plot".to_string(),
        ));
    }

    let scores: Vec<f64> = indices
        .iter()
        .map(|&i| {
            similarity_row
                .get(i)
                .copied()
                .ok_or(LookalikeError::OutOfRange {
                    index: i,
                    len: similarity_row.len(),
                })
        })
        .collect::<Result<_>>()?;

    ensure_parent(path)?;
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(LookalikeError::render)?;
    let (label_area, plot_area) = root.split_horizontally(LABEL_WIDTH);

    let m = scores.len();
    let mut chart = ChartBuilder::on(&plot_area)
        .caption("Top Recommendations", (FONT, 22.0))
        .margin(15)
        .x_label_area_size(45)
        .build_cartesian_2d(0.0..1.0, 0.0..m as f64)
        .map_err(LookalikeError::render)?;

    chart
        .configure_mesh()
        .disable_y_mesh()
        .y_labels(0)
        .x_desc("Cosine Similarity")
        .x_label_formatter(&|v| format!("{v:.1}"))
        .draw()
        .map_err(LookalikeError::render)?;

    // Rank 0 occupies the top band [m - 1, m]
    let band = |rank: usize| ((m - rank - 1) as f64, (m - rank) as f64);
    let shade = |rank: usize| {
        let t = if m > 1 { rank as f64 / (m - 1) as f64 } else { 0.0 };
        lerp_color(DARK_BLUE, LIGHT_BLUE, t)
    };

    chart
        .draw_series(scores.iter().enumerate().map(|(rank, &score)| {
            let (bottom, top) = band(rank);
            Rectangle::new([(0.0, bottom + 0.1), (score, top - 0.1)], shade(rank).filled())
        }))
        .map_err(LookalikeError::render)?;

    chart
        .draw_series(scores.iter().enumerate().map(|(rank, &score)| {
            let (bottom, top) = band(rank);
            EmptyElement::at((score, (bottom + top) / 2.0))
                + Text::new(
                    format!("{score:.3}"),
                    (5, 0),
                    (FONT, 12.0)
                        .into_font()
                        .color(&BLACK)
                        .pos(Pos::new(HPos::Left, VPos::Center)),
                )
        }))
        .map_err(LookalikeError::render)?;

    // Titles go in the left strip, lined up with each bar's center
    for (rank, &index) in indices.iter().enumerate() {
        let (bottom, top) = band(rank);
        let (_, y) = chart.backend_coord(&(0.0, (bottom + top) / 2.0));
        let title = titles
            .get(index)
            .map(|t| truncate_chars(t, LABEL_CHARS))
            .unwrap_or_else(|| format!("#{index}"));
        let style = (FONT, 13.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        label_area
            .draw(&Text::new(title, (LABEL_WIDTH - 10, y), style))
            .map_err(LookalikeError::render)?;
    }

    root.present().map_err(LookalikeError::render)?;
    info!(path = %path.display(), bars = m, "Rendered recommendation chart");

    Ok(path.to_path_buf())
}
