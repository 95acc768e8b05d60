use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;

use gridcast_client::{ClientConfig, ForecastRequest, HttpGateway, ResilientAccess};
use gridcast_core::{ProjectId, UserId};
use gridcast_forecast::{aggregate, display_breakdown, ForecastReport};
use gridcast_store::{ForecastFilter, NewProject, ReferenceStore};

#[derive(Parser)]
#[command(name = "gridcast")]
#[command(about = "Material demand forecasting dashboard (command line)")]
struct Cli {
    /// Remote service base URL (overrides GRIDCAST_API_BASE_URL).
    #[arg(long, global = true)]
    base_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Dashboard headline numbers.
    Stats,
    /// Material stock and alert levels.
    Materials,
    Projects {
        #[arg(long)]
        user: Option<String>,
    },
    Project {
        id: String,
    },
    Suppliers,
    Procurement,
    History {
        #[arg(long)]
        project_name: Option<String>,
        #[arg(long)]
        status: Option<String>,
    },
    /// Forecast page summary.
    Overview,
    CreateProject {
        #[arg(long)]
        name: String,
        #[arg(long)]
        budget: f64,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        category: Option<String>,
    },
    /// Generate and save a forecast, then print its grouped summary.
    Forecast {
        #[arg(long)]
        name: String,
        #[arg(long)]
        budget: f64,
        #[arg(long, default_value = "Transmission")]
        category: String,
        #[arg(long = "type", default_value = "Tower")]
        project_type: String,
        #[arg(long)]
        location: String,
        #[arg(long, default_value = "Mixed")]
        terrain: String,
        #[arg(long)]
        line_length: Option<f64>,
        #[arg(long)]
        distance: Option<f64>,
        /// Predict only; do not persist.
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Group a saved forecast report (JSON file) by material category.
    Summarize {
        file: PathBuf,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReportView<'a> {
    report: &'a ForecastReport,
    summary: gridcast_forecast::GroupedSummary,
    display: gridcast_forecast::DisplayBreakdown,
    warnings: Vec<String>,
}

fn report_view(report: &ForecastReport) -> ReportView<'_> {
    let aggregation = aggregate(report);
    ReportView {
        report,
        summary: aggregation.summary,
        display: display_breakdown(report),
        warnings: aggregation.warnings.iter().map(ToString::to_string).collect(),
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("serializing output")?;
    println!("{out}");
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    gridcast_observability::init();

    let cli = Cli::parse();
    let config = match cli.base_url {
        Some(url) => ClientConfig::from_env().with_base_url(url),
        None => ClientConfig::from_env(),
    };
    tracing::debug!(base_url = %config.base_url, "client configured");

    let gateway = HttpGateway::new(&config).context("building HTTP client")?;
    let access = ResilientAccess::new(Arc::new(gateway), Arc::new(ReferenceStore::seeded()));

    match cli.command {
        Command::Stats => print_json(&access.dashboard_stats().await),
        Command::Materials => print_json(&access.materials_summary().await),
        Command::Projects { user } => {
            let user = user.map(UserId::new);
            print_json(&access.projects(user.as_ref()).await)
        }
        Command::Project { id } => {
            let id: ProjectId = id.parse().context("invalid project id")?;
            print_json(&access.project(&id).await)
        }
        Command::Suppliers => print_json(&access.suppliers().await),
        Command::Procurement => print_json(&access.procurement_orders().await),
        Command::History { project_name, status } => {
            let filter = ForecastFilter { project_name, status };
            print_json(&access.forecast_history(&filter).await)
        }
        Command::Overview => print_json(&access.forecast_overview().await),
        Command::CreateProject {
            name,
            budget,
            location,
            category,
        } => {
            let mut new = NewProject::new(name, budget);
            new.location = location;
            new.project_category = category;
            print_json(&access.create_project(new).await)
        }
        Command::Forecast {
            name,
            budget,
            category,
            project_type,
            location,
            terrain,
            line_length,
            distance,
            dry_run,
        } => {
            let request = ForecastRequest {
                project_category: category,
                project_type,
                location,
                terrain,
                line_length,
                distance_from_storage: distance,
                ..ForecastRequest::new(name, budget)
            };
            let result = if dry_run {
                access.predict_forecast(&request).await
            } else {
                access.save_forecast(&request).await
            };
            let report = result.context("forecast generation failed")?;
            print_json(&report_view(&report))
        }
        Command::Summarize { file } => {
            let raw = std::fs::read_to_string(&file)
                .with_context(|| format!("reading {}", file.display()))?;
            let report: ForecastReport = serde_json::from_str(&raw)
                .with_context(|| format!("parsing {}", file.display()))?;
            print_json(&report_view(&report.normalized()))
        }
    }
}
