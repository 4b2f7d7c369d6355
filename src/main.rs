//! bookdex - Book index generator

use std::process::ExitCode;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use bookdex::config::DEFAULT_SHEET_NAME;
use bookdex::{IndexConfig, TableLayout};

#[derive(Parser)]
#[command(name = "bookdex")]
#[command(version, about = "Book index generator", long_about = None)]
#[command(after_help = "EXAMPLES:
    bookdex Index.xlsx Index.docx                  Build an index document
    bookdex Index.xlsx Index.docx --layout combined
                                                   One table per entry
    bookdex -i Index.docx                          Show a written index")]
struct Cli {
    /// Input file (XLSX spreadsheet, or DOCX with --info)
    #[arg(value_name = "INPUT")]
    input: String,

    /// Output file (DOCX)
    #[arg(value_name = "OUTPUT", required_unless_present = "info")]
    output: Option<String>,

    /// Worksheet holding the index
    #[arg(long, value_name = "NAME", default_value = DEFAULT_SHEET_NAME)]
    sheet: String,

    /// Table layout for each entry
    #[arg(long, value_enum, default_value_t = TableLayout::Split)]
    layout: TableLayout,

    /// Do not start each letter on a new page under a heading
    #[arg(long)]
    no_grouping: bool,

    /// Document font family
    #[arg(long, value_name = "NAME")]
    font: Option<String>,

    /// Show the outline of a written index instead of generating one
    #[arg(short, long)]
    info: bool,

    /// Print the outline as JSON (with --info)
    #[arg(long, requires = "info")]
    json: bool,

    /// Suppress output messages
    #[arg(short, long)]
    quiet: bool,

    /// Log debug details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();

    let result = if cli.info {
        show_info(&cli.input, cli.json)
    } else {
        match cli.output.as_deref() {
            Some(output) => generate(&cli, output),
            None => Err("output required".to_string()),
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn show_info(path: &str, json: bool) -> Result<(), String> {
    let outline = bookdex::read_outline(path).map_err(|e| e.to_string())?;

    if json {
        let text = serde_json::to_string_pretty(&outline).map_err(|e| e.to_string())?;
        println!("{text}");
        return Ok(());
    }

    println!("File: {path}");
    println!("Letter groups: {}", outline.headings().len());
    println!("Tables: {}", outline.table_count());
    println!();
    print!("{}", outline.to_text());
    Ok(())
}

fn generate(cli: &Cli, output: &str) -> Result<(), String> {
    let mut config = IndexConfig::new(&cli.input, output)
        .with_sheet_name(&cli.sheet)
        .with_layout(cli.layout)
        .with_grouping(!cli.no_grouping);
    if let Some(ref font) = cli.font {
        config = config.with_font_family(font);
    }

    let report = bookdex::generate_index(&config).map_err(|e| e.to_string())?;

    if !cli.quiet {
        println!(
            "{} -> {} ({} entries, {} letter groups, {} page breaks)",
            cli.input,
            report.output.display(),
            report.rows,
            report.groups,
            report.page_breaks
        );
    }
    Ok(())
}
