use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::{info, warn};

use lookalike::catalog::load_catalog;
use lookalike::charts;
use lookalike::config::{self, Config};
use lookalike::output::terminal;
use lookalike::recommend;
use lookalike::text::tfidf::TfIdfVectorizer;
use lookalike::Pipeline;

/// Lookalike: content-based product recommendations.
///
/// Turns product descriptions into TF-IDF vectors, compares every product
/// with every other, and lists the closest matches. Charts are written as SVG.
#[derive(Parser)]
#[command(name = "lookalike", version, about)]
struct Cli {
    /// Product CSV with `title` and `description` columns
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Directory for rendered charts
    #[arg(long, global = true)]
    output_dir: Option<PathBuf>,

    /// CSV field delimiter (single character, or `tab`)
    #[arg(long, global = true)]
    delimiter: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Recommend for a few products, then render every chart (default)
    Run {
        /// Product indices to query (default: LOOKALIKE_QUERY_INDICES or 0,1)
        indices: Vec<usize>,

        /// Recommendations per product (default: 5)
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Print the most similar products
    Recommend {
        /// Product indices to query
        #[arg(required = true)]
        indices: Vec<usize>,

        /// Recommendations per product (default: 5)
        #[arg(long)]
        top_n: Option<usize>,

        /// Print JSON instead of a text list
        #[arg(long)]
        json: bool,
    },

    /// Render a word cloud of all descriptions
    Wordcloud,

    /// Render the similarity heatmap for the first ten products
    Heatmap,

    /// Render recommendation bar charts
    Bars {
        /// Product indices to chart
        #[arg(required = true)]
        indices: Vec<usize>,

        /// Recommendations per product (default: 5)
        #[arg(long)]
        top_n: Option<usize>,
    },

    /// Show dataset and vocabulary statistics
    Summary {
        /// Number of distinctive terms to list
        #[arg(long, default_value = "10")]
        terms: usize,
    },
}

fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Logs go to stderr so `recommend --json` output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("lookalike=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config::load()?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if let Some(delimiter) = cli.delimiter.as_deref() {
        config.delimiter = config::parse_delimiter(delimiter).context("Invalid --delimiter")?;
    }

    let command = cli.command.unwrap_or(Commands::Run {
        indices: Vec::new(),
        top_n: None,
    });

    config.require_dataset()?;
    let pipeline = build_pipeline(&config)?;

    match command {
        Commands::Run { indices, top_n } => {
            let indices = if indices.is_empty() {
                config.query_indices.clone()
            } else {
                indices
            };
            let top_n = top_n.unwrap_or(config.top_n);

            for &index in &indices {
                let report = pipeline.report(index, top_n)?;
                terminal::display_report(&report);
                terminal::display_rule();
            }

            println!(
                "Rendering charts to {}...",
                config.output_dir.display()
            );
            render_overview(&pipeline, &config)?;
            render_bars(&pipeline, &config, &indices, top_n)?;

            println!("\n{}", "Done.".bold());
        }

        Commands::Recommend {
            indices,
            top_n,
            json,
        } => {
            let top_n = top_n.unwrap_or(config.top_n);
            let reports = indices
                .iter()
                .map(|&index| pipeline.report(index, top_n))
                .collect::<lookalike::Result<Vec<_>>>()?;

            if json {
                terminal::display_json(&reports)?;
            } else {
                for (i, report) in reports.iter().enumerate() {
                    if i > 0 {
                        terminal::display_rule();
                    }
                    terminal::display_report(report);
                }
            }
        }

        Commands::Wordcloud => {
            let path = charts::render_wordcloud(
                &pipeline.catalog,
                &charts::wordcloud_path(&config.output_dir),
            )?;
            println!("Word cloud saved to: {}", path.display());
        }

        Commands::Heatmap => {
            let path = charts::render_heatmap(
                &pipeline.similarity,
                &pipeline.titles(),
                &charts::heatmap_path(&config.output_dir),
            )?;
            println!("Heatmap saved to: {}", path.display());
        }

        Commands::Bars { indices, top_n } => {
            let top_n = top_n.unwrap_or(config.top_n);
            render_bars(&pipeline, &config, &indices, top_n)?;
        }

        Commands::Summary { terms } => {
            println!("Dataset: {}", config.data_path.display());
            terminal::display_summary(&pipeline, terms);
        }
    }

    Ok(())
}

/// Load the dataset and compute term vectors and similarities.
fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let catalog = load_catalog(&config.data_path, &config.load_options())
        .with_context(|| format!("Failed to load {}", config.data_path.display()))?;

    if catalog.dropped_rows > 0 {
        info!(
            dropped = catalog.dropped_rows,
            "Skipped rows without a description"
        );
    }

    let pipeline = Pipeline::build(catalog, &TfIdfVectorizer::default(), true)?;
    Ok(pipeline)
}

/// Word cloud and heatmap.
fn render_overview(pipeline: &Pipeline, config: &Config) -> Result<()> {
    let wordcloud = charts::render_wordcloud(
        &pipeline.catalog,
        &charts::wordcloud_path(&config.output_dir),
    )?;
    println!("  Word cloud:  {}", wordcloud.display());

    let heatmap = charts::render_heatmap(
        &pipeline.similarity,
        &pipeline.titles(),
        &charts::heatmap_path(&config.output_dir),
    )?;
    println!("  Heatmap:     {}", heatmap.display());
    Ok(())
}

/// One bar chart per queried product.
fn render_bars(pipeline: &Pipeline, config: &Config, indices: &[usize], top_n: usize) -> Result<()> {
    let titles = pipeline.titles();

    for &index in indices {
        let recommendations = pipeline.recommend(index, top_n)?;
        if recommendations.is_empty() {
            warn!(index, "No recommendations to chart, skipping");
            println!(
                "  {} nothing to chart for product {index}",
                "Skipped:".yellow()
            );
            continue;
        }

        let row = pipeline
            .similarity
            .row(index)
            .context("similarity row missing for a ranked product")?;
        let path = charts::render_recommendation_bars(
            row,
            &recommend::indices(&recommendations),
            &titles,
            &charts::bars_path(&config.output_dir, index),
        )?;
        println!("  Product {index}: {}", path.display());
    }
    Ok(())
}
