//! Parse command - turn a single order sheet into structured orders.

use std::fs;
use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use tracing::{debug, info};

use ordersheet_core::{OrderSheet, ParseOutcome, SheetParser};

use super::{load_config, require_input};

/// Arguments for the parse command.
#[derive(Args)]
pub struct ParseArgs {
    /// Input order sheet (UTF-8 text)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Show line statistics
    #[arg(long)]
    stats: bool,

    /// Check the parsed sheet for consistency
    #[arg(long)]
    validate: bool,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output, one row per purchase
    Csv,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    /// File extension used when writing this format to a directory.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn run(args: ParseArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    require_input(&args.input)?;

    info!("Processing file: {}", args.input.display());

    let parser = SheetParser::from_config(&config.parser);
    let outcome = parser.parse_file(&args.input)?;

    if args.validate {
        let issues = outcome.sheet.validate();
        if !issues.is_empty() {
            eprintln!("{}", style("Validation issues:").yellow());
            for issue in &issues {
                eprintln!("  - {}", issue);
            }
        }
    }

    let output = format_outcome(&outcome, args.format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    if args.stats {
        let stats = &outcome.stats;
        eprintln!();
        eprintln!(
            "{} {} lines: {} items, {} checked, {} unchecked, {} ignored, {} skipped, {} blank",
            style("ℹ").blue(),
            stats.lines_read,
            stats.item_lines,
            stats.checked_lines,
            stats.unchecked_lines,
            stats.ignored_lines,
            stats.skipped_lines,
            stats.blank_lines
        );
        eprintln!(
            "{} Processing time: {}ms",
            style("ℹ").blue(),
            outcome.processing_time_ms
        );
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// Render a parse outcome in the requested format.
pub fn format_outcome(outcome: &ParseOutcome, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(outcome)?),
        OutputFormat::Csv => format_csv(&outcome.sheet),
        OutputFormat::Text => Ok(format_text(&outcome.sheet)),
    }
}

fn format_csv(sheet: &OrderSheet) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record([
        "item",
        "price",
        "customer",
        "phone",
        "quantity",
        "notes",
        "subtotal",
    ])?;

    for item in &sheet.items {
        for purchase in &item.purchases {
            let customer = sheet.customers.get(&purchase.customer_key);
            wtr.write_record([
                item.name.as_str(),
                &item.price.to_string(),
                customer.map(|c| c.name.as_str()).unwrap_or(""),
                customer.and_then(|c| c.phone.as_deref()).unwrap_or(""),
                &purchase.quantity.to_string(),
                purchase.notes.as_deref().unwrap_or(""),
                &purchase.subtotal(item.price).to_string(),
            ])?;
        }
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(sheet: &OrderSheet) -> String {
    let mut output = String::new();

    for item in &sheet.items {
        output.push_str(&format!("{} @ {}\n", item.name, item.price));
        if item.purchases.is_empty() {
            output.push_str("  (no orders)\n");
        }
        for purchase in &item.purchases {
            let name = sheet
                .customers
                .get(&purchase.customer_key)
                .map(|c| c.name.as_str())
                .unwrap_or(purchase.customer_key.as_str());
            let note = purchase
                .notes
                .as_deref()
                .map(|n| format!(" {}", n))
                .unwrap_or_default();
            output.push_str(&format!("  {} x{}{}\n", name, purchase.quantity, note));
        }
    }

    output.push('\n');
    output.push_str(&format!(
        "{} items, {} customers, {} purchases\n",
        sheet.items.len(),
        sheet.customers.len(),
        sheet.purchase_count()
    ));
    output.push_str(&format!("Total: {}\n", sheet.total_revenue()));

    output
}
