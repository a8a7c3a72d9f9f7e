// Composition tests: verifying that the pipeline stages chain together.
//
// These tests exercise the data flow between modules:
//   CSV -> Catalog -> TF-IDF -> Similarity -> Recommend -> Output / Charts
// using temporary files for the dataset and the rendered SVGs.

use std::io::Write;
use std::path::Path;

use lookalike::catalog::{load_catalog, LoadOptions};
use lookalike::charts;
use lookalike::error::LookalikeError;
use lookalike::output::terminal::format_report;
use lookalike::output::truncate_chars;
use lookalike::recommend::indices;
use lookalike::Pipeline;

const PRODUCTS_CSV: &str = "\
title,description,price
Red Shirt,red cotton shirt,19.99
Blue Shirt,blue cotton shirt,19.99
Steel Pan,stainless steel pan,34.50
Mystery Box,,9.99
Glass Lid,tempered glass lid for steel pan,7.25
\"Scarf, Wool\",\"warm wool scarf, hand knitted\",25.00
";

fn write_csv(dir: &Path, contents: &str) -> std::path::PathBuf {
    let path = dir.join("products.csv");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

fn pipeline(dir: &Path) -> Pipeline {
    let path = write_csv(dir, PRODUCTS_CSV);
    Pipeline::from_path(&path, &LoadOptions::default()).unwrap()
}

// ============================================================
// Chain: CSV -> Catalog
// ============================================================

#[test]
fn missing_description_row_is_absent_downstream() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());

    assert_eq!(p.len(), 5);
    assert_eq!(p.catalog.dropped_rows, 1);
    assert!(p.titles().iter().all(|t| t != "Mystery Box"));
    assert_eq!(p.similarity.len(), 5);
    assert_eq!(p.terms.len(), 5);

    // Survivors keep their relative order and are reindexed densely
    let rows: Vec<usize> = p.catalog.products.iter().map(|pr| pr.source_row).collect();
    assert_eq!(rows, vec![0, 1, 2, 4, 5]);
    assert_eq!(p.catalog.products[3].title, "Glass Lid");
}

#[test]
fn quoted_fields_with_delimiters_load_intact() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_csv(dir.path(), PRODUCTS_CSV);
    let catalog = load_catalog(&path, &LoadOptions::default()).unwrap();
    let scarf = catalog.get(4).unwrap();
    assert_eq!(scarf.title, "Scarf, Wool");
    assert_eq!(scarf.description, "warm wool scarf, hand knitted");
}

// ============================================================
// Chain: Catalog -> Similarity -> Recommend
// ============================================================

#[test]
fn red_shirt_report_lists_blue_shirt_first() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());

    let report = p.report(0, 1).unwrap();
    assert_eq!(report.query_title, "Red Shirt");
    assert_eq!(report.items.len(), 1);
    assert_eq!(report.items[0].title, "Blue Shirt");
    assert!(report.items[0].score > 0.0);
}

#[test]
fn pan_and_lid_are_related() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());

    let recs = p.recommend(2, 1).unwrap();
    assert_eq!(indices(&recs), vec![3]);
}

#[test]
fn rerunning_the_pipeline_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let a = pipeline(dir.path());
    let b = pipeline(dir.path());

    assert_eq!(a.similarity, b.similarity);
    for i in 0..a.len() {
        assert_eq!(a.recommend(i, 3).unwrap(), b.recommend(i, 3).unwrap());
    }
}

#[test]
fn report_out_of_range() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());
    assert!(matches!(
        p.report(5, 3),
        Err(LookalikeError::OutOfRange { index: 5, len: 5 })
    ));
}

// ============================================================
// Chain: Recommend -> Output
// ============================================================

#[test]
fn console_format_has_header_and_scored_lines() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());

    let text = format_report(&p.report(0, 5).unwrap());
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(lines[0], "Top 5 recommendations for 'Red Shirt':");
    assert_eq!(lines.len(), 5, "header plus four other products");
    assert!(lines[1].starts_with("  - Blue Shirt (score: 0."));
    for line in &lines[1..] {
        assert!(line.ends_with(')'));
        let score = line.rsplit("score: ").next().unwrap().trim_end_matches(')');
        assert_eq!(score.split('.').nth(1).unwrap().len(), 3);
    }
}

#[test]
fn report_serializes_to_json() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());

    let json = serde_json::to_value(p.report(1, 2).unwrap()).unwrap();
    assert_eq!(json["query_index"], 1);
    assert_eq!(json["items"][0]["title"], "Red Shirt");
    assert_eq!(json["items"].as_array().unwrap().len(), 2);
}

#[test]
fn truncate_chars_shortens_long_titles() {
    let title = "Extra Large Stainless Steel Frying Pan With Lid";
    let label = truncate_chars(title, 28);
    assert!(label.ends_with("..."));
    assert_eq!(label.chars().count(), 31);
}

// ============================================================
// Chain: Pipeline -> Charts
// ============================================================

#[test]
fn charts_are_written_as_svg() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());
    let out = dir.path().join("charts");

    let cloud = charts::render_wordcloud(&p.catalog, &charts::wordcloud_path(&out)).unwrap();
    let heat = charts::render_heatmap(&p.similarity, &p.titles(), &charts::heatmap_path(&out))
        .unwrap();
    let recs = p.recommend(0, 3).unwrap();
    let bars = charts::render_recommendation_bars(
        p.similarity.row(0).unwrap(),
        &indices(&recs),
        &p.titles(),
        &charts::bars_path(&out, 0),
    )
    .unwrap();

    for path in [cloud, heat, bars] {
        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"), "{} is not an SVG", path.display());
    }

    let heat_svg = std::fs::read_to_string(charts::heatmap_path(&out)).unwrap();
    assert!(heat_svg.contains("Blue Shirt"));
    assert!(heat_svg.contains("1.00"));
}

#[test]
fn bar_chart_without_recommendations_fails() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());
    let err = charts::render_recommendation_bars(
        p.similarity.row(0).unwrap(),
        &[],
        &p.titles(),
        &charts::bars_path(dir.path(), 0),
    )
    .unwrap_err();
    assert!(matches!(err, LookalikeError::Render(_)));
}

#[test]
fn bar_chart_rejects_unknown_index() {
    let dir = tempfile::tempdir().unwrap();
    let p = pipeline(dir.path());
    let err = charts::render_recommendation_bars(
        p.similarity.row(0).unwrap(),
        &[1, 42],
        &p.titles(),
        &charts::bars_path(dir.path(), 0),
    )
    .unwrap_err();
    assert!(matches!(err, LookalikeError::OutOfRange { index: 42, .. }));
}
