// Annotated heatmap of the top-left corner of the similarity matrix.

use std::path::{Path, PathBuf};

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use tracing::info;

use super::{coolwarm, ensure_parent, is_light, FONT, LABEL_CHARS};
use crate::error::{LookalikeError, Result};
use crate::output::truncate_chars;
use crate::similarity::SimilarityMatrix;

/// Rows and columns shown.
pub const HEATMAP_SIZE: usize = 10;

const WIDTH: u32 = 1000;
const HEIGHT: u32 = 800;
const ROW_LABEL_WIDTH: i32 = 230;
const COLUMN_LABEL_HEIGHT: i32 = 190;
const COLORBAR_WIDTH: i32 = 90;
const TOP_MARGIN: i32 = 10;

/// Render the top-left `HEATMAP_SIZE × HEATMAP_SIZE` block of `similarity`,
/// labelled with `titles`, to `path`.
pub fn render_heatmap(
    similarity: &SimilarityMatrix,
    titles: &[String],
    path: &Path,
) -> Result<PathBuf> {
    let block = similarity.submatrix(HEATMAP_SIZE);
    let k = block.len();
    if k == 0 {
        return Err(LookalikeError::Render(
            "similarity matrix is empty".to_string(),
        ));
    }

    ensure_parent(path)?;
    let root = SVGBackend::new(path, (WIDTH, HEIGHT)).into_drawing_area();
    root.fill(&WHITE).map_err(LookalikeError::render)?;
    let area = root
        .titled("Top 10 Product Similarities", (FONT, 24.0))
        .map_err(LookalikeError::render)?;

    let (area_w, area_h) = area.dim_in_pixel();
    let grid_w = area_w as i32 - ROW_LABEL_WIDTH - COLORBAR_WIDTH;
    let grid_h = area_h as i32 - COLUMN_LABEL_HEIGHT - TOP_MARGIN;
    let cell = (grid_w.min(grid_h) / k as i32).max(1);
    let (left, top) = (ROW_LABEL_WIDTH, TOP_MARGIN);

    let label = |i: usize| -> String {
        titles
            .get(i)
            .map(|t| truncate_chars(t, LABEL_CHARS))
            .unwrap_or_else(|| format!("#{i}"))
    };
    let annotation_size = (cell as f64 * 0.28).clamp(8.0, 16.0);

    for (i, row) in block.iter().enumerate() {
        for (j, &value) in row.iter().enumerate() {
            let x0 = left + j as i32 * cell;
            let y0 = top + i as i32 * cell;
            let fill = coolwarm(value);
            area.draw(&Rectangle::new(
                [(x0, y0), (x0 + cell, y0 + cell)],
                fill.filled(),
            ))
            .map_err(LookalikeError::render)?;

            let text_color = if is_light(fill) { BLACK } else { WHITE };
            let style = (FONT, annotation_size)
                .into_font()
                .color(&text_color)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(
                format!("{value:.2}"),
                (x0 + cell / 2, y0 + cell / 2),
                style,
            ))
            .map_err(LookalikeError::render)?;
        }
    }

    let grid_bottom = top + k as i32 * cell;

    // Row labels on the left, column labels rotated below the grid
    for i in 0..k {
        let row_style = (FONT, 12.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Right, VPos::Center));
        area.draw(&Text::new(
            label(i),
            (left - 6, top + i as i32 * cell + cell / 2),
            row_style,
        ))
        .map_err(LookalikeError::render)?;

        let column_style = (FONT, 12.0)
            .into_font()
            .transform(FontTransform::Rotate90)
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        area.draw(&Text::new(
            label(i),
            (left + i as i32 * cell + cell / 2, grid_bottom + 6),
            column_style,
        ))
        .map_err(LookalikeError::render)?;
    }

    draw_colorbar(&area, left + k as i32 * cell + 20, top, grid_bottom)?;

    root.present().map_err(LookalikeError::render)?;
    info!(path = %path.display(), size = k, "Rendered similarity heatmap");

    Ok(path.to_path_buf())
}

/// Vertical 0..1 color scale with three tick labels.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    x: i32,
    top: i32,
    bottom: i32,
) -> Result<()> {
    const BAR_WIDTH: i32 = 18;
    const BANDS: i32 = 50;
    let height = (bottom - top).max(BANDS);

    for band in 0..BANDS {
        let y0 = top + band * height / BANDS;
        let y1 = top + (band + 1) * height / BANDS;
        let value = 1.0 - (band as f64 + 0.5) / BANDS as f64;
        area.draw(&Rectangle::new(
            [(x, y0), (x + BAR_WIDTH, y1)],
            coolwarm(value).filled(),
        ))
        .map_err(LookalikeError::render)?;
    }

    for (value, y) in [(1.0, top), (0.5, top + height / 2), (0.0, bottom)] {
        let style = (FONT, 11.0)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Left, VPos::Center));
        area.draw(&Text::new(format!("{value:.1}"), (x + BAR_WIDTH + 4, y), style))
            .map_err(LookalikeError::render)?;
    }

    Ok(())
}
