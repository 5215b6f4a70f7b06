//! csv2docx CLI - CSV to bordered Word table converter

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use csv2docx::convert::{DEFAULT_DESTINATION, DEFAULT_SOURCE};
use csv2docx::{
    read_docx, render, BorderPosition, Document, Grid, GridLoader, RenderOptions, TableBorders,
};

#[derive(Parser)]
#[command(name = "csv2docx")]
#[command(version)]
#[command(about = "Convert semicolon-delimited CSV into a Word document with a bordered table", long_about = None)]
struct Cli {
    /// Input CSV file
    #[arg(value_name = "SOURCE", env = "CSV2DOCX_SOURCE", default_value = DEFAULT_SOURCE)]
    source: PathBuf,

    /// Output document
    #[arg(value_name = "OUTPUT", env = "CSV2DOCX_OUTPUT", default_value = DEFAULT_DESTINATION)]
    output: PathBuf,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a CSV file to a Word document
    Convert {
        /// Input CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output document (defaults to the input name with .docx)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Document title stored in the document properties
        #[arg(long)]
        title: Option<String>,
    },

    /// Show the padded grid loaded from a CSV file
    Preview {
        /// Input CSV file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },

    /// Show the tables and borders of a Word document
    Inspect {
        /// Input .docx file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output JSON instead of a text listing
        #[arg(long)]
        json: bool,
    },

    /// Show version information
    Version,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            title,
        }) => {
            let output = output.unwrap_or_else(|| input.with_extension("docx"));
            cmd_convert(&input, &output, title)
        }
        Some(Commands::Preview { input, json }) => cmd_preview(&input, json),
        Some(Commands::Inspect { input, json }) => cmd_inspect(&input, json),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_convert(&cli.source, &cli.output, None),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn cmd_convert(
    input: &Path,
    output: &Path,
    title: Option<String>,
) -> Result<(), Box<dyn std::error::Error>> {
    let pb = ProgressBar::new(3);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Loading CSV...");
    let grid = GridLoader::open(input)?.load()?;
    pb.inc(1);

    pb.set_message("Building table...");
    let mut options = RenderOptions::new();
    if let Some(title) = title {
        options = options.with_title(title);
    }
    log::debug!("Render options: {:?}", options);
    let doc = render::render_grid(&grid, &options)?;
    pb.inc(1);

    pb.set_message("Writing document...");
    let bytes = render::save(&doc, output)?;
    pb.inc(1);

    pb.finish_and_clear();

    println!(
        "{} {} ({} x {} table, {} bytes)",
        "Document saved to".green(),
        output.display(),
        grid.row_count(),
        grid.column_count(),
        bytes
    );

    Ok(())
}

fn cmd_preview(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let grid = GridLoader::open(input)?.load()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&grid)?);
        return Ok(());
    }

    println!("{}", "Grid".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Rows".bold(), grid.row_count());
    println!("{}: {}", "Columns".bold(), grid.column_count());
    println!();
    print_rows(&grid);

    Ok(())
}

fn print_rows(grid: &Grid) {
    for (index, row) in grid.rows().iter().enumerate() {
        let cells: Vec<String> = row.iter().map(|c| format!("{:?}", c)).collect();
        println!("{:>4} {}", index.to_string().dimmed(), cells.join(" │ "));
    }
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let doc = read_docx(input)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&doc)?);
        return Ok(());
    }

    print_document(input, &doc);
    Ok(())
}

fn print_document(input: &Path, doc: &Document) {
    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    if let Some(ref title) = doc.metadata.title {
        println!("{}: {}", "Title".bold(), title);
    }
    if let Some(ref creator) = doc.metadata.creator {
        println!("{}: {}", "Creator".bold(), creator);
    }
    if let Some(ref created) = doc.metadata.created {
        println!("{}: {}", "Created".bold(), created);
    }
    println!("{}: {}", "Tables".bold(), doc.table_count());

    for (index, table) in doc.tables.iter().enumerate() {
        println!();
        println!(
            "{} {} ({} x {})",
            "Table".cyan().bold(),
            index + 1,
            table.row_count(),
            table.column_count()
        );
        println!("{}", "─".repeat(40).dimmed());
        print_borders(table.borders());
        for (r, row) in table.rows.iter().enumerate() {
            let cells: Vec<String> = row.cells.iter().map(|c| format!("{:?}", c.text)).collect();
            println!("{:>4} {}", r.to_string().dimmed(), cells.join(" │ "));
        }
    }
}

fn print_borders(borders: &TableBorders) {
    for position in BorderPosition::ALL {
        let description = match borders.get(position) {
            Some(style) => format!(
                "{} sz={} space={} color={}",
                style.line_style, style.size_eighths, style.spacing, style.color
            ),
            None => "(none)".dimmed().to_string(),
        };
        println!("{:>8}: {}", position.element_name(), description);
    }
}

fn cmd_version() {
    println!("{} {}", "csv2docx".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("CSV to bordered Word table converter");
    println!();
    println!("License: MIT");
}
