use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use wheatcast::config::AppConfig;
use wheatcast::models::request::PredictionRequest;
use wheatcast::models::upload::{self, SpreadsheetUpload};
use wheatcast::services::api::HttpPredictionApi;
use wheatcast::services::calendar;
use wheatcast::services::notify::TracingNotifier;
use wheatcast::services::validation::FieldErrors;
use wheatcast::workflows::batch::{BatchOutcome, BatchUploadWorkflow};
use wheatcast::workflows::single::{SinglePredictionWorkflow, SubmitOutcome};

#[derive(Parser)]
#[command(
    name = "wheatcast",
    version,
    about = "Terminal front end for the wheat price prediction service"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Predict the wheat price for one location and date
    Predict {
        /// One of: Lagos, Abuja, Anambra, Kano, Rivers, Oyo
        #[arg(long)]
        location: String,

        /// Prediction date (YYYY-MM-DD, GMT+1); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Consumer Price Index for food items
        #[arg(long, default_value_t = 0.0)]
        cpi_food_items: f64,

        /// Premium Motor Spirit (petrol) price in Naira per liter
        #[arg(long, default_value_t = 0.0)]
        pms_price: f64,

        /// Official USD to Naira central rate
        #[arg(long, default_value_t = 0.0)]
        central_rate_usd: f64,

        /// Monetary Policy Rate in percent
        #[arg(long, default_value_t = 0.0)]
        mpr: f64,
    },
    /// Upload a spreadsheet of indicators and list prices per location
    Batch {
        /// Path to an .xlsx or .xls file
        #[arg(long)]
        file: PathBuf,
    },
}

#[tokio::main]
async fn main() {
    // Initialize structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration from environment
    let config = AppConfig::from_env().expect("Failed to load configuration from environment");

    let api = HttpPredictionApi::new(
        &config.api_base_url,
        Duration::from_secs(config.request_timeout_secs),
    )
    .expect("Failed to initialize prediction service client");
    let api: Arc<HttpPredictionApi> = Arc::new(api);
    let notifier = Arc::new(TracingNotifier);

    match cli.command {
        Command::Predict {
            location,
            date,
            cpi_food_items,
            pms_price,
            central_rate_usd,
            mpr,
        } => {
            let date = match date {
                Some(day) => calendar::wat_start_of_day(day),
                None => chrono::Utc::now(),
            };
            let candidate = PredictionRequest {
                location,
                date,
                cpi_food_items,
                pms_price,
                central_rate_usd,
                mpr,
            };

            let mut workflow = SinglePredictionWorkflow::new(api, notifier);
            match workflow.submit(&candidate).await {
                SubmitOutcome::Completed(result) => {
                    println!("Predicted wheat price: ₦{:.2}", result.price);
                    println!(
                        "For {} on {}",
                        candidate.location,
                        calendar::wire_date(candidate.date)
                    );
                }
                SubmitOutcome::Rejected(errors) => exit_with_field_errors(&errors),
                SubmitOutcome::Failed => std::process::exit(1),
                SubmitOutcome::InFlight => unreachable!("the CLI submits sequentially"),
            }
        }
        Command::Batch { file } => {
            let bytes = std::fs::read(&file).expect("Failed to read spreadsheet");
            let upload = SpreadsheetUpload {
                file_name: file
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| "upload.xlsx".to_string()),
                content_type: upload::content_type_for_path(&file)
                    .unwrap_or("application/octet-stream")
                    .to_string(),
                bytes,
            };

            let mut workflow = BatchUploadWorkflow::new(api, notifier);
            match workflow.submit(&upload).await {
                BatchOutcome::Completed(predictions) => {
                    println!("Predicted wheat prices by location:");
                    for row in &predictions {
                        println!("  {:<10} ₦{:.2}", row.location, row.price);
                    }
                }
                BatchOutcome::Rejected(errors) => exit_with_field_errors(&errors),
                BatchOutcome::Failed => std::process::exit(1),
                BatchOutcome::InFlight => unreachable!("the CLI submits sequentially"),
            }
        }
    }
}

fn exit_with_field_errors(errors: &FieldErrors) -> ! {
    for (field, message) in errors {
        eprintln!("{field}: {message}");
    }
    std::process::exit(2)
}
