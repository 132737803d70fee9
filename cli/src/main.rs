use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use jsonschema2openapi_core::{
    merge_into_template, take_definitions, to_sorted_json, translate_definitions,
    ConditionalDepth, ConvertError, ConvertOptions, DuplicateCasePolicy, Report,
};
use serde_json::Value;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::level_filters::LevelFilter;

#[derive(Parser)]
#[command(name = "jsonschema2openapi")]
#[command(about = "Translate JSON Schema definitions into OpenAPI 3.0 component schemas")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge a JSON Schema's definitions into an OpenAPI template's components.schemas
    Merge {
        /// Input JSON Schema file (must have a `definitions` object)
        schema: PathBuf,

        /// OpenAPI template file (must have a `components.schemas` object)
        #[arg(short, long)]
        template: PathBuf,

        #[command(flatten)]
        translate: TranslateArgs,
    },

    /// Translate a JSON Schema's definitions and print them without a template
    Translate {
        /// Input JSON Schema file (must have a `definitions` object)
        schema: PathBuf,

        #[command(flatten)]
        translate: TranslateArgs,
    },
}

#[derive(Args)]
struct TranslateArgs {
    /// Output file (defaults to stdout if not specified)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a JSON report of every rewrite to this file
    #[arg(long)]
    report: Option<PathBuf>,

    /// $ref prefix to replace
    #[arg(long, default_value = "#/definitions/")]
    ref_from: String,

    /// Replacement $ref prefix
    #[arg(long, default_value = "#/components/schemas/")]
    ref_to: String,

    /// How deep to expand if/then/else conditionals
    #[arg(long, value_enum, default_value_t = ConditionalsArg::Shallow)]
    conditionals: ConditionalsArg,

    /// What to do when two discriminator branches share a case value
    #[arg(long, value_enum, default_value_t = DuplicateCasesArg::LastWins)]
    duplicate_cases: DuplicateCasesArg,

    /// Spaces per indentation level
    #[arg(long, default_value_t = 1)]
    indent: usize,
}

impl From<&TranslateArgs> for ConvertOptions {
    fn from(args: &TranslateArgs) -> Self {
        // All fields set explicitly; the compiler enforces exhaustiveness
        ConvertOptions {
            ref_from: args.ref_from.clone(),
            ref_to: args.ref_to.clone(),
            conditionals: args.conditionals.into(),
            duplicate_cases: args.duplicate_cases.into(),
            indent: args.indent,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum ConditionalsArg {
    Shallow,
    Full,
}

impl From<ConditionalsArg> for ConditionalDepth {
    fn from(val: ConditionalsArg) -> Self {
        match val {
            ConditionalsArg::Shallow => ConditionalDepth::Shallow,
            ConditionalsArg::Full => ConditionalDepth::Full,
        }
    }
}

#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum DuplicateCasesArg {
    LastWins,
    Reject,
}

impl From<DuplicateCasesArg> for DuplicateCasePolicy {
    fn from(val: DuplicateCasesArg) -> Self {
        match val {
            DuplicateCasesArg::LastWins => DuplicateCasePolicy::LastWins,
            DuplicateCasesArg::Reject => DuplicateCasePolicy::Reject,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for JSON
    let log_level = if cli.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Merge {
            schema,
            template,
            translate,
        } => {
            let options = ConvertOptions::from(&translate);
            let schema_doc = read_json(&schema, ConvertError::SchemaParse)?;
            let template_doc = read_json(&template, ConvertError::TemplateParse)?;

            let merged = merge_into_template(schema_doc, template_doc, &options)
                .map_err(|e| anyhow::Error::from(e).context("Merge failed"))?;

            let text = to_sorted_json(merged.document, options.indent)?;
            write_text(&text, translate.output.as_deref())?;
            write_report(&merged.report, translate.report.as_deref())?;
        }
        Commands::Translate { schema, translate } => {
            let options = ConvertOptions::from(&translate);
            let schema_doc = read_json(&schema, ConvertError::SchemaParse)?;

            let translation = take_definitions(schema_doc)
                .and_then(|definitions| translate_definitions(definitions, &options))
                .map_err(|e| anyhow::Error::from(e).context("Translation failed"))?;

            let text = to_sorted_json(translation.definitions, options.indent)?;
            write_text(&text, translate.output.as_deref())?;
            write_report(&translation.report, translate.report.as_deref())?;
        }
    }

    Ok(())
}

fn read_json(path: &Path, parse_error: fn(serde_json::Error) -> ConvertError) -> Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to open input file: {}", path.display()))?;
    let value = serde_json::from_str(&text)
        .map_err(parse_error)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(value)
}

fn write_text(text: &str, path: Option<&Path>) -> Result<()> {
    let mut writer: Box<dyn Write> = if let Some(p) = path {
        let file = File::create(p)
            .with_context(|| format!("Failed to create output file: {}", p.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(BufWriter::new(io::stdout()))
    };

    writer
        .write_all(text.as_bytes())
        .context("Failed to write JSON")?;
    // Ensure trailing newline
    writeln!(writer).context("Failed to write trailing newline")?;
    writer.flush().context("Failed to flush output")?;

    Ok(())
}

fn write_report(report: &Report, path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create report file: {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report).context("Failed to write report")?;
    writeln!(writer).context("Failed to write trailing newline")?;
    Ok(())
}
