mod config;

use std::{path::PathBuf, sync::Arc};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use dashboard_core::{DashboardController, FetchOutcome, FilterState, HttpCampaignsApi};
use shared::domain::{
    parse_date, parse_filter_assignment, AccountId, AccountSelection, ClientId, DateRange,
    FilterDimension,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::config::load_settings;

/// Loads campaign metrics for one client and prints the dashboard view as JSON.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long)]
    client: Option<String>,
    #[arg(long = "meta-account")]
    meta_accounts: Vec<String>,
    #[arg(long = "google-account")]
    google_accounts: Vec<String>,
    /// Start of the range (YYYY-MM-DD). Defaults to the first day of this month.
    #[arg(long, value_parser = parse_date)]
    from: Option<NaiveDate>,
    /// End of the range (YYYY-MM-DD). Defaults to today.
    #[arg(long, value_parser = parse_date)]
    to: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date, requires = "compare_to")]
    compare_from: Option<NaiveDate>,
    #[arg(long, value_parser = parse_date, requires = "compare_from")]
    compare_to: Option<NaiveDate>,
    /// Named filter selection, e.g. `campaign=Prospecting` or `objective=Leads`.
    #[arg(long = "filter", value_parser = parse_filter_assignment)]
    filters: Vec<(FilterDimension, String)>,
    /// Show the demonstration dataset instead of calling the backend.
    #[arg(long)]
    demo: bool,
    #[arg(long)]
    config: Option<PathBuf>,
}

impl Args {
    fn filter_state(&self, today: NaiveDate) -> Result<FilterState> {
        let mut filters = FilterState::starting_on(today);

        if let Some(client) = &self.client {
            filters.set_client(ClientId::new(client.trim()));
        }
        filters.set_accounts(AccountSelection::new(
            self.meta_accounts.iter().map(AccountId::new),
            self.google_accounts.iter().map(AccountId::new),
        ));

        let default_range = DateRange::month_to_date(today);
        let range = DateRange::new(
            self.from.unwrap_or(default_range.from),
            self.to.unwrap_or(default_range.to),
        );
        if range.from > range.to {
            bail!("--from {} is after --to {}", range.from, range.to);
        }
        filters.set_date_range(range);

        if let (Some(from), Some(to)) = (self.compare_from, self.compare_to) {
            if from > to {
                bail!("--compare-from {from} is after --compare-to {to}");
            }
            filters.set_compare_range(Some(DateRange::new(from, to)));
        }

        for (dimension, value) in &self.filters {
            filters.set_filter(*dimension, value.clone());
        }
        Ok(filters)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let settings = load_settings(args.config.as_deref()).context("failed to load settings")?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_filter))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let api = HttpCampaignsApi::new(&settings.api_base_url, settings.request_timeout())?;
    info!(api_base_url = %api.base_url(), "dashboard cli starting");

    let filters = args.filter_state(Local::now().date_naive())?;
    if !args.demo && !filters.is_ready_to_fetch() {
        warn!("no client or account selected; nothing will be fetched");
    }

    let controller = DashboardController::with_filters(Arc::new(api), filters);
    let mut events = controller.subscribe();
    let event_log = tokio::spawn(async move {
        while let Ok(event) = events.recv().await {
            info!(?event, "dashboard event");
        }
    });

    let outcome = if args.demo {
        controller.set_demo_mode(true).await
    } else {
        controller.reconcile().await
    };

    let snapshot = controller.snapshot();
    drop(controller);
    let _ = event_log.await;

    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    match outcome {
        FetchOutcome::Failed(err) => bail!("dashboard fetch failed: {}", err.message()),
        outcome => {
            info!(?outcome, "dashboard cli finished");
            Ok(())
        }
    }
}

#[cfg(test)]
#[path = "tests/main_tests.rs"]
mod tests;
