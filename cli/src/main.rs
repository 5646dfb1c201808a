//! mdinfer CLI - text and delimited data to Markdown

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use mdinfer::{
    BulletStyle, ConvertOptions, ConverterRegistry, InferOptions, JsonFormat, NormalizePreset,
    ParagraphPolicy, RenderOptions, SourceFormat, TableOptions,
};

#[derive(Parser)]
#[command(name = "mdinfer")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Convert loose text and delimited data to Markdown", long_about = None)]
struct Cli {
    /// Input file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(short, long, value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a file to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        style: StyleArgs,

        /// Print conversion statistics to stderr
        #[arg(long)]
        stats: bool,
    },

    /// Convert a file to the JSON document model
    Json {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// Convert many files into a directory
    Batch {
        /// Input files
        #[arg(value_name = "FILES", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "markdown")]
        output: PathBuf,

        #[command(flatten)]
        style: StyleArgs,
    },

    /// Show conversion statistics for a file
    Info {
        /// Input file
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// List known source formats and their converters
    Formats,

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct StyleArgs {
    /// Include YAML frontmatter
    #[arg(short, long)]
    frontmatter: bool,

    /// Append a Document Information section
    #[arg(long)]
    info_section: bool,

    /// Text normalization preset
    #[arg(long, value_enum, default_value = "standard")]
    normalize: NormalizeLevel,

    /// Lines shorter than this may become headings
    #[arg(long, default_value = "50")]
    heading_max_len: usize,

    /// When a paragraph ends
    #[arg(long, value_enum, default_value = "sentence")]
    paragraphs: ParagraphMode,

    /// Keep source bullet glyphs instead of `*`
    #[arg(long)]
    preserve_bullets: bool,

    /// Do not read indented lines as code
    #[arg(long)]
    no_code: bool,

    /// Maximum table rows to render
    #[arg(long)]
    max_table_rows: Option<usize>,

    /// Maximum CSV data rows to include
    #[arg(long, default_value = "100")]
    csv_preview_rows: usize,

    /// Request LLM enhancement (not available; logged and skipped)
    #[arg(long)]
    llm: bool,
}

impl Default for StyleArgs {
    fn default() -> Self {
        Self {
            frontmatter: false,
            info_section: false,
            normalize: NormalizeLevel::Standard,
            heading_max_len: mdinfer::infer::DEFAULT_HEADING_MAX_LEN,
            paragraphs: ParagraphMode::Sentence,
            preserve_bullets: false,
            no_code: false,
            max_table_rows: None,
            csv_preview_rows: mdinfer::convert::DEFAULT_CSV_PREVIEW_ROWS,
            llm: false,
        }
    }
}

impl StyleArgs {
    fn to_options(&self) -> ConvertOptions {
        let mut infer = InferOptions::new()
            .with_heading_max_len(self.heading_max_len)
            .with_paragraph_policy(self.paragraphs.into())
            .with_code_detection(!self.no_code);
        if self.preserve_bullets {
            infer = infer.with_bullet_style(BulletStyle::Preserve);
        }

        let mut table = TableOptions::new();
        if let Some(rows) = self.max_table_rows {
            table = table.with_max_rows(rows);
        }

        let render = RenderOptions::new()
            .with_infer(infer)
            .with_table(table)
            .with_normalize_preset(self.normalize.into())
            .with_frontmatter(self.frontmatter)
            .with_info_section(self.info_section);

        ConvertOptions::new()
            .with_render_options(render)
            .with_csv_preview_rows(self.csv_preview_rows)
            .with_llm(self.llm)
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum NormalizeLevel {
    /// No normalization
    Minimal,
    /// Line endings, trailing whitespace, NFC (default)
    Standard,
    /// Also ligatures, private-use characters, inner spaces
    Aggressive,
}

impl From<NormalizeLevel> for NormalizePreset {
    fn from(level: NormalizeLevel) -> Self {
        match level {
            NormalizeLevel::Minimal => NormalizePreset::Minimal,
            NormalizeLevel::Standard => NormalizePreset::Standard,
            NormalizeLevel::Aggressive => NormalizePreset::Aggressive,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum ParagraphMode {
    /// End a paragraph after sentence punctuation
    Sentence,
    /// End a paragraph only at blank lines and structure changes
    BlankLine,
}

impl From<ParagraphMode> for ParagraphPolicy {
    fn from(mode: ParagraphMode) -> Self {
        match mode {
            ParagraphMode::Sentence => ParagraphPolicy::Sentence,
            ParagraphMode::BlankLine => ParagraphPolicy::BlankLine,
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Markdown {
            input,
            output,
            style,
            stats,
        }) => cmd_markdown(&input, output.as_deref(), &style, stats),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Batch {
            inputs,
            output,
            style,
        }) => cmd_batch(&inputs, &output, &style),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Formats) => {
            cmd_formats();
            Ok(())
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_markdown(&input, cli.output.as_deref(), &StyleArgs::default(), false)
            } else {
                println!("{}", "Usage: mdinfer <FILE> [-o OUTPUT]".yellow());
                println!("       mdinfer --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn write_or_print(output: Option<&Path>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        print!("{}", content);
    }
    Ok(())
}

fn cmd_markdown(
    input: &Path,
    output: Option<&Path>,
    style: &StyleArgs,
    stats: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let options = style.to_options().with_stats(stats);
    let result = mdinfer::convert_file(input, &options)?;

    write_or_print(output, &result.content)?;

    if let Some(stats) = result.stats {
        eprintln!("{}", serde_json::to_string_pretty(&stats)?);
    }

    Ok(())
}

fn cmd_json(
    input: &Path,
    output: Option<&Path>,
    compact: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = mdinfer::to_json(input, format)?;
    write_or_print(output, &json)
}

fn cmd_batch(
    inputs: &[PathBuf],
    output_dir: &Path,
    style: &StyleArgs,
) -> Result<(), Box<dyn std::error::Error>> {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );
    pb.set_message("Converting...");

    let registry = ConverterRegistry::with_defaults();
    let results = registry.convert_many(inputs, &style.to_options());

    let mut failed = 0;
    for (input, result) in inputs.iter().zip(results) {
        match result {
            Ok(converted) => {
                let stem = input.file_stem().unwrap_or_default().to_string_lossy();
                let target = output_dir.join(format!("{}.md", stem));
                fs::write(&target, &converted.content)?;
                pb.set_message(stem.into_owned());
            }
            Err(e) => {
                pb.println(format!("{} {}", "Failed".red(), e));
                failed += 1;
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!(
        "\n{} {} converted, {} failed",
        "Summary:".green().bold(),
        inputs.len() - failed,
        failed
    );

    if failed > 0 {
        return Err(format!("{} of {} files failed", failed, inputs.len()).into());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let format = mdinfer::detect_format_from_path(input)?;
    let options = ConvertOptions::new().with_stats(true);
    let result = mdinfer::convert_file(input, &options)?;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Format".bold(), format);

    if let Some(ref title) = result.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref author) = result.metadata.author {
        println!("{}: {}", "Author".bold(), author);
    }
    if let Some(ref created) = result.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    if let Some(ref modified) = result.metadata.modified {
        println!("{}: {}", "Modified".bold(), modified);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = result.stats.unwrap_or_default();
    println!("{}: {}", "Sections".bold(), stats.section_count);
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "List items".bold(), stats.list_item_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);

    Ok(())
}

fn cmd_formats() {
    let registry = ConverterRegistry::with_defaults();

    println!("{}", "Source Formats".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    for format in SourceFormat::ALL {
        let converter = format
            .extensions()
            .iter()
            .find_map(|ext| registry.get_by_extension(ext));
        let status = match converter {
            Some(c) => c.name().green().to_string(),
            None => "not built in".dimmed().to_string(),
        };
        println!(
            "{:<10} {:<28} {}",
            format.name().bold(),
            format.extensions().join(", "),
            status
        );
    }
}

fn cmd_version() {
    println!("{} {}", "mdinfer".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Heuristic text to Markdown converter");
    println!();
    println!("Repository: {}", "https://github.com/iyulab/mdinfer".dimmed());
    println!("License: MIT");
}
