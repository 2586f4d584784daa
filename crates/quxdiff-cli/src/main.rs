//! quxdiff - cross-run issue reconciliation CLI
//!
//! ## Commands
//!
//! - `compare`: Diff two synthesis snapshots (resolved, new, persisting, reworded)
//! - `stable-id`: Print the stable id for a title and discriminator
//! - `stamp`: Assign stable ids to a synthesis document's issues

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing::{info, Level};

use quxdiff_core::{
    compare_syntheses, generate_stable_id, read_synthesis, stamp_stable_ids, write_compare_json,
    write_compare_md, CompareOptions, CompareReportArtifact, CompareResult, SeverityTrend,
};

#[derive(Parser)]
#[command(name = "quxdiff")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Reconcile issues across two analysis runs", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare a baseline synthesis against a current one
    Compare {
        /// Baseline synthesis JSON file
        baseline: PathBuf,

        /// Current synthesis JSON file
        current: PathBuf,

        /// Label for the baseline run (default: file stem)
        #[arg(long)]
        baseline_label: Option<String>,

        /// Label for the current run (default: file stem)
        #[arg(long)]
        current_label: Option<String>,

        /// Similarity floor for reworded-issue detection, in [0, 1]
        #[arg(long)]
        variant_threshold: Option<f64>,

        /// TOML file with comparison options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Emit JSON output instead of terminal text
        #[arg(long)]
        json: bool,

        /// Also write the comparison artifact as JSON
        #[arg(long)]
        output_json: Option<PathBuf>,

        /// Also write a markdown summary
        #[arg(long)]
        output_md: Option<PathBuf>,
    },

    /// Print the stable id for an issue title and discriminator
    StableId {
        /// Issue title
        title: String,

        /// Category, or `video` / `model-unique` for uncategorised issues
        discriminator: String,
    },

    /// Assign stable ids to issues that lack one
    Stamp {
        /// Synthesis JSON file
        synthesis: PathBuf,

        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    quxdiff_core::init_tracing(cli.json_logs, level);

    match cli.command {
        Commands::Compare {
            baseline,
            current,
            baseline_label,
            current_label,
            variant_threshold,
            config,
            json,
            output_json,
            output_md,
        } => {
            let options = resolve_options(config.as_deref(), variant_threshold)?;
            cmd_compare(
                &baseline,
                &current,
                &label_for(&baseline, baseline_label),
                &label_for(&current, current_label),
                &options,
                json,
                output_json.as_deref(),
                output_md.as_deref(),
            )
        }
        Commands::StableId {
            title,
            discriminator,
        } => {
            println!("{}", generate_stable_id(&title, &discriminator));
            Ok(())
        }
        Commands::Stamp { synthesis, output } => cmd_stamp(&synthesis, output.as_deref()),
    }
}

/// Defaults, then the config file, then the environment, then the flag.
fn resolve_options(config: Option<&Path>, variant_threshold: Option<f64>) -> Result<CompareOptions> {
    let mut options = match config {
        Some(path) => CompareOptions::from_toml_file(path)
            .with_context(|| format!("Failed to load config: {:?}", path))?,
        None => CompareOptions::default(),
    };
    options = options.with_env_overrides()?;
    if let Some(threshold) = variant_threshold {
        options = options.with_variant_threshold(threshold);
    }
    options.validate()?;
    Ok(options)
}

fn label_for(path: &Path, explicit: Option<String>) -> String {
    explicit.unwrap_or_else(|| {
        path.file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string())
    })
}

#[allow(clippy::too_many_arguments)]
fn cmd_compare(
    baseline_path: &Path,
    current_path: &Path,
    baseline_label: &str,
    current_label: &str,
    options: &CompareOptions,
    json: bool,
    output_json: Option<&Path>,
    output_md: Option<&Path>,
) -> Result<()> {
    let baseline = read_synthesis(baseline_path)?;
    let current = read_synthesis(current_path)?;

    let result = compare_syntheses(&baseline, &current, baseline_label, current_label, options);

    if let Some(path) = output_json {
        write_compare_json(path, &CompareReportArtifact::new(result.clone()))?;
        info!(path = %path.display(), "comparison artifact written");
    }
    if let Some(path) = output_md {
        write_compare_md(path, &result)?;
        info!(path = %path.display(), "markdown summary written");
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("{}", render_compare_text(&result));
    }
    Ok(())
}

fn cmd_stamp(path: &Path, output: Option<&Path>) -> Result<()> {
    let mut synthesis = read_synthesis(path)?;
    let stamped = stamp_stable_ids(&mut synthesis);
    info!(stamped, total = synthesis.issue_count(), "stable ids assigned");

    let content = serde_json::to_string_pretty(&synthesis).context("serialize synthesis")?;
    match output {
        Some(out) => {
            std::fs::write(out, content).with_context(|| format!("write {:?}", out))?;
        }
        None => println!("{}", content),
    }
    Ok(())
}

fn render_compare_text(result: &CompareResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "Compare {} -> {}\n",
        result.baseline_label, result.current_label
    ));
    out.push_str("=======\n");
    out.push_str(&format!(
        "score: {} -> {} ({:+})\n",
        result.baseline_score, result.current_score, result.score_delta
    ));
    if let Some(delta) = result.adjusted_delta {
        out.push_str(&format!("adjusted_delta: {:+}\n", delta));
    }
    out.push_str(&format!(
        "readiness: {} -> {}\n",
        result.baseline_readiness, result.current_readiness
    ));
    out.push_str(&format!("resolved: {}\n", result.resolved_issues.len()));
    out.push_str(&format!("new: {}\n", result.new_issues.len()));
    out.push_str(&format!("persisting: {}\n", result.persisting_issues.len()));
    out.push_str(&format!("reworded: {}\n", result.persisting_variants.len()));
    out.push_str(&format!("regressions: {}\n", result.regressions.len()));

    if !result.resolved_issues.is_empty() {
        out.push_str("\nResolved:\n");
        for issue in &result.resolved_issues {
            out.push_str(&format!("  - [{}] {}\n", issue.severity, issue.title));
        }
    }
    if !result.new_issues.is_empty() {
        out.push_str("\nNew:\n");
        for issue in &result.new_issues {
            out.push_str(&format!("  + [{}] {}\n", issue.severity, issue.title));
        }
    }
    if !result.persisting_variants.is_empty() {
        out.push_str("\nReworded:\n");
        for v in &result.persisting_variants {
            out.push_str(&format!(
                "  ~ {} <- {} ({}%)\n",
                v.issue.title, v.similar_to.title, v.similarity_score
            ));
        }
    }
    let regressed: Vec<_> = result
        .persisting_issues
        .iter()
        .filter(|p| p.trend == SeverityTrend::Regressed)
        .collect();
    if !regressed.is_empty() {
        out.push_str("\nRegressed:\n");
        for p in regressed {
            out.push_str(&format!(
                "  ! {} ({} -> {})\n",
                p.current.title, p.baseline.severity, p.current.severity
            ));
        }
    }

    out.push_str(&format!("\n{}", result.narrative));
    out.trim_end().to_string()
}
