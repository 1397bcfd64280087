//! Ceiba settlement CLI
//!
//! Reads a roster and a month's expenses from JSON, publishes the billing
//! period and writes the rounded receipts. With `--send` every receipt is
//! also mailed to its owner.

mod input;

use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::Context;
use chrono::{Datelike, Utc};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ceiba_core::dispatch::DispatchService;
use ceiba_core::finalize::{FinalizeService, InMemoryStore, UnitRoster};
use ceiba_core::period::BillingPeriod;
use ceiba_core::receipt::ReceiptView;
use ceiba_core::settlement::{AllocationBasis, FundConfig};
use ceiba_shared::types::PeriodId;
use ceiba_shared::{AppConfig, EmailService};

use crate::input::SettlementInput;

#[derive(Parser, Debug)]
#[command(name = "ceiba-settle", version, about = "Settle a condominium billing period")]
struct Cli {
    /// Input JSON with units and expenses
    #[arg(short = 'i', long = "input")]
    input: PathBuf,

    /// Output file (stdout by default)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Billing period id (random by default)
    #[arg(long = "period-id")]
    period_id: Option<PeriodId>,

    /// Billing month, 1-12 (current month by default)
    #[arg(long = "month")]
    month: Option<u32>,

    /// Billing year (current year by default)
    #[arg(long = "year")]
    year: Option<i32>,

    /// Mail every receipt to its owner
    #[arg(long = "send")]
    send: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // stdout carries the receipts; logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ceiba=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::load().context("Failed to load configuration")?;

    let input = SettlementInput::from_path(&cli.input)?;
    let funds = input
        .funds
        .clone()
        .unwrap_or_else(|| FundConfig::from_condominium(&config.condominium));
    let basis = match input.basis {
        Some(basis) => basis,
        None => AllocationBasis::parse(&config.settlement.allocation_basis).with_context(|| {
            format!(
                "Unknown allocation basis in configuration: {}",
                config.settlement.allocation_basis
            )
        })?,
    };

    let today = Utc::now().date_naive();
    let mut period = BillingPeriod::new(
        cli.month.unwrap_or_else(|| today.month()),
        cli.year.unwrap_or_else(|| today.year()),
    )?;
    if let Some(id) = cli.period_id {
        period.id = id;
    }
    for expense in input.expenses()? {
        period.add_expense(expense)?;
    }

    let store = InMemoryStore::with_units(input.units()?);
    store.save_period(period.clone())?;
    info!(
        period = %period.label(),
        expenses = period.expenses.len(),
        funds = funds.len(),
        basis = %basis,
        "Settling billing period"
    );

    let outcome = FinalizeService::finalize(&period, &store, &store, &funds, basis)?;
    for warning in outcome.warnings() {
        eprintln!("warning: {warning}");
    }

    let decimals = config.settlement.display_decimals;
    let views: Vec<ReceiptView> = outcome
        .receipts
        .iter()
        .map(|issued| ReceiptView::from_receipt(&issued.receipt, decimals))
        .collect();

    let mut writer: Box<dyn Write> = match &cli.output {
        Some(path) => Box::new(
            File::create(path).with_context(|| format!("Cannot create {}", path.display()))?,
        ),
        None => Box::new(io::stdout()),
    };
    serde_json::to_writer_pretty(&mut writer, &views)?;
    writeln!(writer)?;
    writer.flush()?;

    if cli.send {
        let mailer = EmailService::new(config.email.clone());
        let report = DispatchService::new(config.condominium.clone(), decimals)
            .send_all(&outcome.period, &outcome.receipts, &store.units()?, &mailer)
            .await;
        eprintln!("sent: {}, failed: {}", report.sent, report.failed);
        for failure in &report.failures {
            eprintln!("  {}: {}", failure.unit_id, failure.reason);
        }
    }

    Ok(())
}
