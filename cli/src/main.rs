//! Instata CLI: publish CSV tables as HTML through an RDF round trip
//!
//! ```text
//! instata publish test/potd_0.csv http://example.org/instata/potd_0
//! instata dump test/potd_0.csv http://example.org/instata/potd_0 --format nt
//! instata show test/potd_0.csv http://example.org/instata/potd_0
//! ```

use anyhow::Context;
use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use instata::{Publisher, PublisherConfig, RdfFormat, ReconstructedTable, SourceLocation};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "instata", version, about = "Publish CSV tables as HTML via RDF")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true, env = "INSTATA_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory for published documents
    #[arg(long, global = true, env = "INSTATA_OUTPUT_DIR")]
    output_dir: Option<PathBuf>,

    /// Keep typed literals as plain strings
    #[arg(long, global = true)]
    no_infer: bool,

    /// Debug logging (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the table to <output-dir>/<dataset>.html
    Publish {
        /// Local path or http(s) URL of the CSV source
        source: String,
        /// Base IRI for the generated identifiers
        base: String,
    },
    /// Print the mapped graph
    Dump {
        source: String,
        base: String,
        /// turtle, ntriples or jsonld
        #[arg(long, default_value_t = RdfFormat::Turtle)]
        format: RdfFormat,
    },
    /// Preview the reconstructed table in the terminal
    Show {
        source: String,
        base: String,
        #[arg(long, default_value = "table")]
        output: OutputFormat,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "instata=debug" } else { "instata=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => PublisherConfig::load(path)?,
        None => PublisherConfig::default(),
    };
    if let Some(dir) = cli.output_dir {
        config.output_dir = dir;
    }
    if cli.no_infer {
        config.infer_datatypes = false;
    }
    let publisher = Publisher::new(config);

    match cli.command {
        Commands::Publish { source, base } => {
            let path = publisher
                .publish(&source, &base)
                .with_context(|| format!("publishing {}", source))?;
            println!("{}", path.display());
        }
        Commands::Dump {
            source,
            base,
            format,
        } => {
            let text = publisher
                .dump(&source, &base, format)
                .with_context(|| format!("dumping {}", source))?;
            print!("{}", text);
        }
        Commands::Show {
            source,
            base,
            output,
        } => {
            let name = SourceLocation::parse(&source).dataset_name();
            let store = publisher.load(&source, &base)?;
            let table = publisher.reconstruct(&store, &name)?;
            print_table(&table, &output)?;
        }
    }

    Ok(())
}

fn print_table(table: &ReconstructedTable, output: &OutputFormat) -> anyhow::Result<()> {
    let rows = table.body.rows(table.header.len());

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(table)?);
        }
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(std::io::stdout());
            writer.write_record(&table.header)?;
            for row in &rows {
                writer.write_record(row.iter().map(|v| v.as_deref().unwrap_or("")))?;
            }
            writer.flush()?;
        }
        OutputFormat::Table => {
            if table.header.is_empty() {
                println!("(empty table)");
                return Ok(());
            }

            let mut preview = Table::new();
            preview.set_content_arrangement(ContentArrangement::Dynamic);
            preview.set_header(&table.header);
            for row in &rows {
                let cells: Vec<&str> = row.iter().map(|v| v.as_deref().unwrap_or("")).collect();
                preview.add_row(cells);
            }

            println!("{}", preview);
            println!(
                "{} row(s), last update {}",
                rows.len(),
                table.metadata.last_update()
            );
        }
    }

    Ok(())
}
