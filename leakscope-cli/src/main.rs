//! Leakscope CLI - revenue-leak dashboard for service businesses

#![deny(warnings)]

// Global invariants enforced:
// - Deterministic output ordering
// - Identical inputs yield byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use leakscope_core::format::format_currency;
use leakscope_core::{
    compute_dashboard_with_settings, compute_what_if, config, project, render_json, render_text,
    store, DemoProfile, RawInputs, WhatIfInputs,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "leakscope")]
#[command(about = "Revenue-leak dashboard engine for service businesses")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the dashboard from business inputs
    Report {
        /// Path to a JSON file of raw inputs (absent fields use defaults)
        #[arg(long)]
        input: Option<PathBuf>,

        /// Demo profile to use instead of an input file (new, established, struggling)
        #[arg(long)]
        profile: Option<String>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Path to config file (default: auto-discover)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Do not persist the computed dashboard
        #[arg(long)]
        no_save: bool,
    },
    /// Import an externally produced dashboard JSON document
    Import {
        /// Path to the dashboard JSON file
        file: PathBuf,
    },
    /// Show the stored dashboard (or the sample if none is stored)
    Show {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Explore a what-if revenue scenario
    Whatif {
        /// Hypothesized average response time in minutes
        #[arg(long, default_value = "8")]
        response_time: f64,

        /// Hypothesized review count
        #[arg(long, default_value = "45")]
        reviews: f64,

        /// Hypothesized website conversion rate in percent
        #[arg(long, default_value = "8")]
        website_conversion: f64,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Project revenue recovery from the stored dashboard
    Project {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate or show configuration
    #[command(name = "config")]
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Validate a config file without computing a dashboard
    Validate {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Show the resolved configuration (merged defaults + config file)
    Show {
        /// Path to config file (default: auto-discover from current directory)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let root = std::env::current_dir()?;

    match cli.command {
        Commands::Report {
            input,
            profile,
            format,
            output,
            config: config_path,
            no_save,
        } => {
            if input.is_some() && profile.is_some() {
                anyhow::bail!("--input and --profile are mutually exclusive");
            }

            let mut inputs = match (&input, &profile) {
                (Some(path), None) => load_inputs(path)?,
                (None, Some(name)) => DemoProfile::from_name(name)
                    .with_context(|| {
                        format!(
                            "unknown profile '{}' (expected new, established, or struggling)",
                            name
                        )
                    })?
                    .inputs(),
                _ => RawInputs::default(),
            };

            let resolved = config::load_and_resolve(&root, config_path.as_deref())
                .context("failed to load configuration")?;
            if let Some(ref p) = resolved.config_path {
                eprintln!("Using config: {}", p.display());
            }
            resolved.apply_overrides(&mut inputs);

            let dashboard = compute_dashboard_with_settings(&inputs, &resolved.settings);

            if !no_save {
                store::save(&root, &dashboard).context("failed to persist dashboard")?;
            }

            let rendered = match format {
                OutputFormat::Text => render_text(&dashboard),
                OutputFormat::Json => render_json(&dashboard)?,
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Import { file } => {
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let dashboard = store::import_json(&text)
                .with_context(|| format!("failed to import {}", file.display()))?;
            store::save(&root, &dashboard).context("failed to persist dashboard")?;
            println!(
                "Imported dashboard for {} ({} revenue leak)",
                dashboard.business_name,
                format_currency(dashboard.total_revenue_leak)
            );
        }
        Commands::Show { format } => {
            let dashboard = store::load(&root);
            match format {
                OutputFormat::Text => print!("{}", render_text(&dashboard)),
                OutputFormat::Json => println!("{}", render_json(&dashboard)?),
            }
        }
        Commands::Whatif {
            response_time,
            reviews,
            website_conversion,
            format,
        } => {
            let scenario = compute_what_if(&WhatIfInputs {
                response_time,
                review_count: reviews,
                website_conversion_pct: website_conversion,
            });
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&scenario)?),
                OutputFormat::Text => {
                    println!("What-if scenario");
                    println!(
                        "  Response time: {} min (conversion x{})",
                        response_time, scenario.response_multiplier
                    );
                    println!(
                        "  Reviews: {} (conversion x{:.3})",
                        reviews, scenario.review_multiplier
                    );
                    println!("  Website conversion: {}%", website_conversion);
                    println!();
                    println!(
                        "  Base monthly revenue:      {}",
                        format_currency(scenario.base_revenue)
                    );
                    println!(
                        "  Projected monthly revenue: {}",
                        format_currency(scenario.projected_revenue)
                    );
                    println!(
                        "  Improvement:               {} ({}%)",
                        format_currency(scenario.improvement),
                        scenario.improvement_percent
                    );
                }
            }
        }
        Commands::Project { format } => {
            let dashboard = store::load(&root);
            let set = project(&dashboard);
            match format {
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&set)?),
                OutputFormat::Text => {
                    println!("Revenue recovery projection for {}", dashboard.business_name);
                    println!(
                        "  Answer more calls:  {}/month ({} extra calls captured)",
                        format_currency(set.improved_answer_rate.revenue),
                        set.improved_answer_rate.improved
                    );
                    println!(
                        "  Respond faster:     {}/month (down to {} min)",
                        format_currency(set.faster_response.revenue),
                        set.faster_response.response_time
                    );
                    println!(
                        "  Grow reviews:       {}/month ({} more to reach {})",
                        format_currency(set.more_reviews.revenue),
                        set.more_reviews.needed,
                        set.more_reviews.target
                    );
                    if let Some(ref website) = set.better_website {
                        println!(
                            "  Improve website:    {}/month",
                            format_currency(website.revenue)
                        );
                    }
                    println!();
                    println!(
                        "  Combined lift:      {}/month",
                        format_currency(set.combined.monthly_revenue_lift)
                    );
                    println!(
                        "  Leaks recovered:    {}/month",
                        format_currency(set.combined.leaks_reduced)
                    );
                }
            }
        }
        Commands::Config { action } => match action {
            ConfigAction::Validate { path } => {
                match config::load_and_resolve(&root, path.as_deref()) {
                    Ok(resolved) => {
                        if let Some(ref p) = resolved.config_path {
                            println!("Config valid: {}", p.display());
                        } else {
                            println!("No config file found. Using defaults.");
                        }
                    }
                    Err(e) => {
                        eprintln!("Config validation failed: {:#}", e);
                        std::process::exit(1);
                    }
                }
            }
            ConfigAction::Show { path } => {
                let resolved = config::load_and_resolve(&root, path.as_deref())
                    .context("failed to load configuration")?;

                println!("Configuration:");
                if let Some(ref p) = resolved.config_path {
                    println!("  Source: {}", p.display());
                } else {
                    println!("  Source: defaults (no config file found)");
                }
                println!();
                println!("Input overrides:");
                println!(
                    "  avg_job_value: {}",
                    resolved
                        .avg_job_value
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                println!(
                    "  close_rate: {}",
                    resolved
                        .close_rate
                        .map(|v| v.to_string())
                        .unwrap_or_else(|| "none".to_string())
                );
                println!();
                println!("Score calibration:");
                println!(
                    "  reference_max_leak: {}",
                    resolved.settings.score.reference_max_leak
                );
                println!(
                    "  leak_penalty_weight: {}",
                    resolved.settings.score.leak_penalty_weight
                );
                println!(
                    "  critical_penalty: {}",
                    resolved.settings.score.critical_penalty
                );
                println!(
                    "  improving_bonus: {}",
                    resolved.settings.score.improving_bonus
                );
                println!();
                println!("Recommendations:");
                println!(
                    "  revenue_threshold: {}",
                    resolved.settings.recommendations.revenue_threshold
                );
                println!("  top: {}", resolved.settings.recommendations.top_n);
            }
        },
    }

    Ok(())
}

/// Load raw inputs from a JSON file, filling absent fields from defaults
fn load_inputs(path: &Path) -> anyhow::Result<RawInputs> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    RawInputs::from_json(&text).with_context(|| format!("failed to parse {}", path.display()))
}

/// Write rendered output to a file or stdout
fn write_output(path: Option<&Path>, rendered: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!("Report written to: {}", path.display());
        }
        None => {
            if rendered.ends_with('\n') {
                print!("{}", rendered);
            } else {
                println!("{}", rendered);
            }
        }
    }
    Ok(())
}
