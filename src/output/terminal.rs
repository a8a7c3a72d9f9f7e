// Terminal output for recommendation lists and dataset summaries.
//
// Formatting is split from printing: the `format_*` functions return plain
// strings (no color codes) so they can be checked in tests, and the
// `display_*` functions add color and write to stdout.

use colored::Colorize;

use crate::pipeline::Pipeline;
use crate::recommend::RecommendationReport;

/// Width of the rule printed between queries.
pub const RULE_WIDTH: usize = 50;

/// Header line naming the query product.
pub fn format_header(report: &RecommendationReport) -> String {
    format!(
        "Top {} recommendations for '{}':",
        report.top_n, report.query_title
    )
}

/// One line per recommended product: `  - <title> (score: 0.123)`.
pub fn format_items(report: &RecommendationReport) -> Vec<String> {
    report
        .items
        .iter()
        .map(|item| format!("  - {} (score: {:.3})", item.title, item.score))
        .collect()
}

/// The full plain-text block for one query.
pub fn format_report(report: &RecommendationReport) -> String {
    let mut lines = vec![format_header(report)];
    lines.extend(format_items(report));
    lines.join("\n")
}

/// Print one query's recommendations.
pub fn display_report(report: &RecommendationReport) {
    println!("\n{}", format_header(report).bold());
    if report.items.is_empty() {
        println!("  {}", "No other products to compare against.".dimmed());
        return;
    }
    for line in format_items(report) {
        println!("{line}");
    }
}

/// Print the separator between queries.
pub fn display_rule() {
    println!("\n{}\n", "-".repeat(RULE_WIDTH).dimmed());
}

/// Print reports as a pretty JSON array.
pub fn display_json(reports: &[RecommendationReport]) -> serde_json::Result<()> {
    println!("{}", serde_json::to_string_pretty(reports)?);
    Ok(())
}

/// Print dataset and vocabulary statistics.
pub fn display_summary(pipeline: &Pipeline, distinctive_terms: usize) {
    let catalog = &pipeline.catalog;
    let vocabulary = &pipeline.terms.vocabulary;

    println!("\n{}", "=== Catalog Summary ===".bold());
    println!("  Products:            {}", catalog.len());
    println!("  Rows dropped:        {}", catalog.dropped_rows);
    println!("  Vocabulary size:     {}", vocabulary.len());
    println!(
        "  Terms per product:   {:.1}",
        pipeline.terms.mean_terms_per_document()
    );
    println!(
        "  Mean similarity:     {:.3}",
        pipeline.similarity.mean_off_diagonal()
    );

    let terms = vocabulary.most_distinctive(distinctive_terms);
    if !terms.is_empty() {
        let words: Vec<&str> = terms.iter().map(|t| t.text.as_str()).collect();
        println!("\n  Most distinctive terms: {}", words.join(", ").dimmed());
    }
}
