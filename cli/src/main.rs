//! hwpxprep CLI - proposal content normalization tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use hwpxprep::parser::{self, PipelineOptions, SectionTrace};
use hwpxprep::render::{self, DocumentStats, JsonFormat, TextOptions};
use hwpxprep::{DocumentBuilder, DocumentModel, GenerateRequest, MetadataInput, Pipeline};

#[derive(Parser)]
#[command(name = "hwpxprep")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Normalize generated proposal sections into an HWPX document model", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a document model from a request JSON file
    Build {
        /// Request JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        /// Assemble sections one at a time
        #[arg(long)]
        sequential: bool,

        /// Write per-section intermediate files to this directory
        #[arg(long, value_name = "DIR", env = "HWPXPREP_DEBUG_DIR")]
        debug_dir: Option<PathBuf>,
    },

    /// Assemble a single raw section text and print its blocks
    Section {
        /// Raw section text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Section title
        #[arg(short, long, default_value = "")]
        title: String,

        /// Zero-based section index
        #[arg(short, long, default_value = "0")]
        index: usize,
    },

    /// Convert a Markdown proposal into a document model
    #[command(alias = "md")]
    Markdown {
        /// Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title (first `# ` heading if not specified)
        #[arg(long)]
        title: Option<String>,

        /// Organization name
        #[arg(long)]
        organization: Option<String>,
    },

    /// Print a plain text preview of a request
    Preview {
        /// Request JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Keep inline provenance markers
        #[arg(long)]
        markers: bool,
    },

    /// Show statistics for a document model JSON file
    Info {
        /// Document model JSON file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build {
            input,
            output,
            compact,
            sequential,
            debug_dir,
        }) => cmd_build(
            &input,
            output.as_deref(),
            compact,
            sequential,
            debug_dir.as_deref(),
        ),
        Some(Commands::Section {
            input,
            title,
            index,
        }) => cmd_section(&input, &title, index),
        Some(Commands::Markdown {
            input,
            output,
            title,
            organization,
        }) => cmd_markdown(&input, output.as_deref(), title, organization),
        Some(Commands::Preview { input, markers }) => cmd_preview(&input, markers),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            println!("{}", "Usage: hwpxprep <COMMAND> <FILE>".yellow());
            println!("       hwpxprep --help for more information");
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_build(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
    sequential: bool,
    debug_dir: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let request = GenerateRequest::from_file(input)?;
    let pipeline = Pipeline::new().parallel(!sequential);

    let doc = match debug_dir {
        Some(dir) => build_with_trace(&pipeline, &request, dir)?,
        None => pipeline.run(&request),
    };

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };
    let json = render::to_json(&doc, format)?;

    if let Some(dir) = debug_dir {
        let stamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
        let path = dir.join(format!("proposal_{}.json", stamp));
        fs::write(&path, render::to_json(&doc, JsonFormat::Pretty)?)?;
        eprintln!("{} {}", "Saved to".green(), path.display());
    }

    write_output(output, &json)?;

    let stats = DocumentStats::collect(&doc);
    log::info!(
        "{} sections, {} tables, {} items",
        stats.section_count,
        stats.table_count,
        stats.item_count
    );

    Ok(())
}

/// Run the pipeline section by section, writing the intermediate files.
fn build_with_trace(
    pipeline: &Pipeline,
    request: &GenerateRequest,
    dir: &Path,
) -> Result<DocumentModel, Box<dyn std::error::Error>> {
    fs::create_dir_all(dir)?;

    let traces = pipeline.trace(request);

    let pb = ProgressBar::new(traces.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    let mut builder = DocumentBuilder::new(pipeline.options().defaults.clone())
        .with_metadata(request.metadata());

    for (section, trace) in request.sections.iter().zip(traces) {
        pb.set_message(format!("section {}", trace.index + 1));
        write_trace(dir, section.text(), &trace)?;
        builder.add_section(section.text(), trace.blocks);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    Ok(builder.build())
}

fn write_trace(
    dir: &Path,
    raw: &str,
    trace: &SectionTrace,
) -> Result<(), Box<dyn std::error::Error>> {
    let n = trace.index;
    fs::write(dir.join(format!("section_{}_raw.txt", n)), raw)?;
    fs::write(
        dir.join(format!("section_{}_parts.json", n)),
        serde_json::to_string_pretty(&trace.parts)?,
    )?;
    Ok(())
}

fn cmd_section(input: &Path, title: &str, index: usize) -> Result<(), Box<dyn std::error::Error>> {
    let raw = fs::read_to_string(input)?;
    let blocks = parser::assemble_section(index, title, &raw, &PipelineOptions::default());
    println!("{}", serde_json::to_string_pretty(&blocks)?);
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    organization: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let markdown = fs::read_to_string(input)?;

    let metadata = MetadataInput {
        title,
        organization,
        ..MetadataInput::default()
    };
    let doc = hwpxprep::build_document_from_markdown(&markdown, metadata);

    let json = render::to_json(&doc, JsonFormat::Pretty)?;
    write_output(output, &json)
}

fn cmd_preview(input: &Path, markers: bool) -> Result<(), Box<dyn std::error::Error>> {
    let request = GenerateRequest::from_file(input)?;
    let doc = hwpxprep::build_document(&request);
    let options = TextOptions::new().with_markers(markers);
    println!("{}", render::to_text(&doc, &options));
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let json = fs::read_to_string(input)?;
    let doc = render::from_json(&json)?;
    let m = doc.metadata();

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Title".bold(), m.title);
    println!("{}: {}", "Organization".bold(), m.organization);
    println!("{}: {}", "Date".bold(), m.date);
    println!("{}: {}", "Model".bold(), m.model);
    println!("{}: {}", "Preset".bold(), m.preset);

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = DocumentStats::collect(&doc);
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!(
        "{}: {} ({} rows)",
        "Tables".bold(),
        stats.table_count,
        stats.table_row_count
    );
    println!("{}: {}", "Items".bold(), stats.item_count);
    for (i, count) in stats.items_by_level.iter().enumerate() {
        println!("  {} level {}: {}", "├─".dimmed(), i + 1, count);
    }
    println!(
        "{}: {} {} {}",
        "Markers".bold(),
        format!("red {}", stats.red_markers).red(),
        format!("green {}", stats.green_markers).green(),
        format!("blue {}", stats.blue_markers).blue()
    );
    println!("{}: {}", "Characters".bold(), stats.total_chars);

    if !doc.is_consistent() {
        println!("\n{}", "Warning: document has duplicate ids or malformed blocks".yellow());
    }

    Ok(())
}

fn write_output(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "hwpxprep".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Proposal content normalization tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_files_named_by_section_index() {
        let dir = tempfile::tempdir().unwrap();
        let trace = parser::trace_section(0, "개요", "본문", &PipelineOptions::default());
        write_trace(dir.path(), "본문", &trace).unwrap();

        assert!(dir.path().join("section_0_raw.txt").exists());
        assert!(dir.path().join("section_0_parts.json").exists());
        assert!(!dir.path().join("section_1_raw.txt").exists());
        assert_eq!(
            fs::read_to_string(dir.path().join("section_0_raw.txt")).unwrap(),
            "본문"
        );
    }
}
