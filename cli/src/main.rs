//! docsieve CLI - persona-driven collection analysis tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use docsieve::extract::{default_texts_dir, PlainTextExtractor};
use docsieve::{
    analyze_collection, build_profile, to_json, AnalyzeOptions, CollectionDescriptor, JsonFormat,
};

/// Conventional descriptor filename inside a collection directory.
const INPUT_FILENAME: &str = "challenge1b_input.json";

/// Conventional result filename inside a collection directory.
const OUTPUT_FILENAME: &str = "challenge1b_output.json";

#[derive(Parser)]
#[command(name = "docsieve")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Rank document sections by persona relevance", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze one collection directory
    Analyze {
        /// Collection directory containing challenge1b_input.json
        #[arg(value_name = "DIR")]
        collection: PathBuf,

        /// Directory of pre-extracted text files (default: DIR/texts)
        #[arg(long, value_name = "DIR")]
        texts_dir: Option<PathBuf>,

        /// Output file (default: DIR/challenge1b_output.json)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Analyze every Collection* subdirectory of a base directory
    Batch {
        /// Base directory to scan
        #[arg(value_name = "DIR", default_value = ".")]
        base: PathBuf,

        #[command(flatten)]
        tuning: Tuning,
    },

    /// Show the persona profile built for a role and task
    Profile {
        /// Persona role, e.g. "Food Contractor"
        #[arg(long)]
        role: String,

        /// Task text ("job to be done")
        #[arg(long)]
        task: String,
    },
}

/// Tuning flags shared by analyze and batch.
#[derive(Args)]
struct Tuning {
    /// Maximum number of ranked sections to emit
    #[arg(long)]
    top_k: Option<usize>,

    /// Refined text character budget
    #[arg(long)]
    char_budget: Option<usize>,

    /// Output compact JSON
    #[arg(long)]
    compact: bool,

    /// Disable parallel document processing
    #[arg(long)]
    sequential: bool,

    /// Record per-factor score breakdowns
    #[arg(long)]
    breakdown: bool,
}

impl Tuning {
    fn options(&self) -> AnalyzeOptions {
        let mut options = AnalyzeOptions::new().with_breakdown(self.breakdown);
        if let Some(k) = self.top_k {
            options = options.with_top_k(k);
        }
        if let Some(budget) = self.char_budget {
            options = options.with_char_budget(budget);
        }
        if self.sequential {
            options = options.sequential();
        }
        options
    }

    fn format(&self) -> JsonFormat {
        if self.compact {
            JsonFormat::Compact
        } else {
            JsonFormat::Pretty
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Analyze {
            collection,
            texts_dir,
            output,
            tuning,
        } => cmd_analyze(&collection, texts_dir.as_deref(), output.as_deref(), &tuning),
        Commands::Batch { base, tuning } => cmd_batch(&base, &tuning),
        Commands::Profile { role, task } => cmd_profile(&role, &task),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_analyze(
    collection: &Path,
    texts_dir: Option<&Path>,
    output: Option<&Path>,
    tuning: &Tuning,
) -> Result<(), Box<dyn std::error::Error>> {
    let analysis = run_collection_dir(collection, texts_dir, tuning)?;

    let output_path = output
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| collection.join(OUTPUT_FILENAME));
    fs::write(&output_path, to_json(&analysis, tuning.format())?)?;

    println!(
        "{} {} sections ranked, {} refined -> {}",
        "OK".green().bold(),
        analysis.extracted_sections.len(),
        analysis.subsection_analysis.len(),
        output_path.display()
    );
    Ok(())
}

fn cmd_batch(base: &Path, tuning: &Tuning) -> Result<(), Box<dyn std::error::Error>> {
    let mut collections: Vec<PathBuf> = fs::read_dir(base)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_dir()
                && path
                    .file_name()
                    .map(|n| n.to_string_lossy().starts_with("Collection"))
                    .unwrap_or(false)
        })
        .collect();
    collections.sort();

    if collections.is_empty() {
        println!(
            "{} no Collection* directories under {}",
            "Warning".yellow().bold(),
            base.display()
        );
        return Ok(());
    }

    let pb = ProgressBar::new(collections.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut failures = Vec::new();
    for dir in &collections {
        pb.set_message(dir.display().to_string());
        match run_collection_dir(dir, None, tuning) {
            Ok(analysis) => {
                let output_path = dir.join(OUTPUT_FILENAME);
                fs::write(&output_path, to_json(&analysis, tuning.format())?)?;
                info!("wrote {}", output_path.display());
            }
            Err(e) => {
                pb.println(format!("{} {}: {}", "Failed".red().bold(), dir.display(), e));
                failures.push(dir.clone());
            }
        }
        pb.inc(1);
    }
    pb.finish_with_message("done");

    println!(
        "{} {}/{} collections processed",
        "OK".green().bold(),
        collections.len() - failures.len(),
        collections.len()
    );
    if failures.len() == collections.len() {
        return Err("all collections failed".into());
    }
    Ok(())
}

fn cmd_profile(role: &str, task: &str) -> Result<(), Box<dyn std::error::Error>> {
    let profile = build_profile(role, task);

    println!("{} {}", "Role:".cyan().bold(), profile.role);
    println!("{} {}", "Task:".cyan().bold(), profile.task);
    println!("{}", "Keywords:".cyan().bold());
    for (keyword, weight) in &profile.keywords {
        println!("  {keyword} ({weight:.2})");
    }
    println!("{}", "Priority concepts:".cyan().bold());
    for priority in &profile.priorities {
        println!("  {priority}");
    }
    Ok(())
}

fn run_collection_dir(
    collection: &Path,
    texts_dir: Option<&Path>,
    tuning: &Tuning,
) -> Result<docsieve::CollectionAnalysis, Box<dyn std::error::Error>> {
    let input_path = collection.join(INPUT_FILENAME);
    let descriptor = CollectionDescriptor::from_json(&fs::read_to_string(&input_path)?)?;

    let texts = texts_dir
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| default_texts_dir(collection));
    let extractor = PlainTextExtractor::new(texts);

    let analysis = analyze_collection(&descriptor, &extractor, &tuning.options())?;
    Ok(analysis)
}
