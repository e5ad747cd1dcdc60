//! # Quote
//!
//! Prices a list of order lines against the live lookup service and prints
//! the table the ordering page would show.
//!
//! ## Usage
//! ```bash
//! # Two lines: 3 × BOLT-M8, 2 × NUT-M8
//! cargo run -p orderdesk-client --bin quote -- BOLT-M8:3 NUT-M8:2
//!
//! # Explicit config file
//! cargo run -p orderdesk-client --bin quote -- --config ./orderdesk.toml BOLT-M8:3
//! ```
//!
//! Logging follows `RUST_LOG` (default `info,orderdesk=debug`).

use std::env;
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use orderdesk_client::{ClientConfig, HttpCatalog, LoggingSurface, OrderLineTable, TokioFrameClock};
use orderdesk_core::order_table::TableSkeleton;
use orderdesk_core::validation::{validate_product_code, validate_quantity};
use orderdesk_core::Field;

fn print_usage() {
    println!("orderdesk quote");
    println!();
    println!("Usage: quote [OPTIONS] CODE:QTY...");
    println!();
    println!("Options:");
    println!("  -c, --config <PATH>  Config file (default: platform config dir)");
    println!("  -h, --help           Show this help message");
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,orderdesk=debug"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Splits `CODE:QTY`, checking both halves.
fn parse_line(arg: &str) -> Result<(String, String), Box<dyn std::error::Error>> {
    let (code, qty) = arg
        .rsplit_once(':')
        .ok_or_else(|| format!("expected CODE:QTY, got '{}'", arg))?;
    validate_product_code(code)?;
    validate_quantity(qty)?;
    Ok((code.trim().to_string(), qty.trim().to_string()))
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut config_path: Option<PathBuf> = None;
    let mut lines = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            other => lines.push(parse_line(other)?),
        }
        i += 1;
    }

    if lines.is_empty() {
        print_usage();
        return Ok(());
    }

    init_tracing();

    let config = ClientConfig::load(config_path)?;
    info!(base_url = %config.service.base_url, lines = lines.len(), "Pricing order lines");

    let catalog = Arc::new(HttpCatalog::new(&config.service)?);
    let table = OrderLineTable::new(
        TableSkeleton::standard(),
        catalog,
        Arc::new(LoggingSurface),
        Arc::new(TokioFrameClock::default()),
        config.table.options(),
    )?;

    // Each line lands in the blank row the previous change appended.
    for (index, (code, qty)) in lines.iter().enumerate() {
        table.set_cell(index, Field::Quantity, qty).await?;
        table.edit(index, Field::ProductCode, code).await?.settled().await;
    }

    // Final sweep so every row is priced against one baseline.
    table.handle_change().await.settled().await;

    println!(
        "{:<20} {:>10} {:>6} {:>8} {:>12} {:>12}",
        "code", "unit", "vat%", "qty", "vat", "subtotal"
    );
    for row in table.rows().await.iter().filter(|row| !row.is_empty()) {
        println!(
            "{:<20} {:>10} {:>6} {:>8} {:>12} {:>12}",
            row.product_code, row.unit_cost, row.vat_rate, row.quantity, row.vat_amount, row.subtotal
        );
    }

    let footer = table.footer().await;
    println!();
    for summary in &footer.summary_rows {
        println!("{:>58} {:>12}", format!("VAT {}%", summary.row.rate), summary.row.amount);
    }
    println!("{:>58} {:>12}", "Total ex. VAT", footer.total_ex_vat);
    println!("{:>58} {:>12}", "Total inc. VAT", footer.total_inc_vat);

    Ok(())
}
