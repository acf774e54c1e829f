//! Report command - billing and sales summaries for one order sheet.

use std::fs;
use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::info;

use ordersheet_core::summary::{
    billing, revenue, top_items, top_spenders, CustomerBill, CustomerSpend, ItemQuantity,
    RevenueSummary,
};
use ordersheet_core::SheetParser;

use super::{load_config, require_input};

/// Arguments for the report command.
#[derive(Args)]
pub struct ReportArgs {
    /// Input order sheet (UTF-8 text)
    #[arg(required = true)]
    input: PathBuf,

    /// Which summary to produce
    #[arg(short, long, value_enum, default_value = "billing")]
    kind: ReportKind,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: ReportFormat,

    /// Rows in ranked summaries (default: from config)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportKind {
    /// Per-customer bills
    Billing,
    /// Customers ranked by spend
    TopSpenders,
    /// Items ranked by units sold
    TopItems,
    /// Revenue totals and per-item breakdown
    Revenue,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum ReportFormat {
    /// JSON output
    Json,
    /// Plain text tables
    Text,
}

pub fn run(args: ReportArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let config = load_config(config_path)?;
    require_input(&args.input)?;

    let limit = args.limit.unwrap_or(config.report.top_limit);
    if limit == 0 {
        anyhow::bail!("--limit must be at least 1");
    }

    let parser = SheetParser::from_config(&config.parser);
    let sheet = parser.parse_file(&args.input)?.sheet;

    info!("Building {:?} report for {}", args.kind, args.input.display());

    let output = match (args.kind, args.format) {
        (ReportKind::Billing, ReportFormat::Json) => serde_json::to_string_pretty(&billing(&sheet))?,
        (ReportKind::Billing, ReportFormat::Text) => format_billing(&billing(&sheet)),
        (ReportKind::TopSpenders, ReportFormat::Json) => {
            serde_json::to_string_pretty(&top_spenders(&sheet, limit))?
        }
        (ReportKind::TopSpenders, ReportFormat::Text) => {
            format_top_spenders(&top_spenders(&sheet, limit))
        }
        (ReportKind::TopItems, ReportFormat::Json) => {
            serde_json::to_string_pretty(&top_items(&sheet, limit))?
        }
        (ReportKind::TopItems, ReportFormat::Text) => format_top_items(&top_items(&sheet, limit)),
        (ReportKind::Revenue, ReportFormat::Json) => serde_json::to_string_pretty(&revenue(&sheet))?,
        (ReportKind::Revenue, ReportFormat::Text) => format_revenue(&revenue(&sheet)),
    };

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} Report written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    Ok(())
}

fn format_billing(bills: &[CustomerBill]) -> String {
    let mut output = String::new();

    for bill in bills {
        match &bill.customer.phone {
            Some(phone) => output.push_str(&format!("{} ({})\n", bill.customer.name, phone)),
            None => output.push_str(&format!("{}\n", bill.customer.name)),
        }
        for line in &bill.lines {
            output.push_str(&format!(
                "  {:<40} {:>4} x {:>10} = {:>12}\n",
                line.label, line.quantity, line.unit_price, line.subtotal
            ));
        }
        output.push_str(&format!("  {:<40} {:>31}\n\n", "Total", bill.total));
    }

    let grand_total: u64 = bills.iter().map(|b| b.total).sum();
    output.push_str(&format!(
        "{} customers, grand total {}\n",
        bills.len(),
        grand_total
    ));

    output
}

fn format_top_spenders(ranked: &[CustomerSpend]) -> String {
    let mut output = String::from("Top spenders:\n");
    for (i, spend) in ranked.iter().enumerate() {
        output.push_str(&format!(
            "{:>3}. {:<30} {:>12}\n",
            i + 1,
            spend.customer.name,
            spend.total
        ));
    }
    output
}

fn format_top_items(ranked: &[ItemQuantity]) -> String {
    let mut output = String::from("Top items:\n");
    for (i, item) in ranked.iter().enumerate() {
        output.push_str(&format!("{:>3}. {:<40} {:>6}\n", i + 1, item.name, item.quantity));
    }
    output
}

fn format_revenue(summary: &RevenueSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("Total revenue:   {}\n", summary.total_revenue));
    output.push_str(&format!("Items sold:      {}\n", summary.items_sold));
    output.push_str(&format!("Total quantity:  {}\n", summary.total_quantity));
    output.push_str(&format!("Total customers: {}\n", summary.total_customers));
    output.push('\n');

    for item in &summary.items {
        output.push_str(&format!(
            "  {:<40} {:>4} x {:>10} = {:>12}\n",
            item.name, item.quantity, item.unit_price, item.revenue
        ));
    }

    output
}
