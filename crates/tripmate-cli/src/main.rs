use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tripmate_agent::{Budget, Month, TripCategory, TripDuration, TripForm};
use tripmate_core::config::LogLevel;

mod commands;

#[derive(Parser)]
#[command(name = "tripmate")]
#[command(author, version, about = "AI trip planner backed by Gemini", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, global = true, env = "GEMINI_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[arg(short, long, global = true)]
    model: Option<String>,

    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the web planner
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
        /// Port to bind to
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Plan a single trip and print the itinerary
    Plan {
        /// What the trip should be about
        description: String,
        #[arg(short, long, default_value_t = TripCategory::default())]
        trip_type: TripCategory,
        #[arg(short, long, default_value_t = TripDuration::DEFAULT)]
        days: u32,
        #[arg(long, default_value_t = Month::default())]
        month: Month,
        #[arg(short, long, default_value_t = Budget::default())]
        budget: Budget,
        /// Preferred destination
        #[arg(long)]
        hint: Option<String>,
    },
}

fn init_tracing(verbose: u8, configured: LogLevel) {
    let level = match verbose {
        0 => configured.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = commands::load_config(cli.config.as_deref(), cli.model, cli.base_url)?;
    init_tracing(cli.verbose, config.general.log_level);

    let planner = commands::build_planner(&config, cli.api_key)?;

    match cli.command {
        Commands::Serve { host, port } => {
            commands::serve::run(planner, &config, host, port).await?;
        }
        Commands::Plan {
            description,
            trip_type,
            days,
            month,
            budget,
            hint,
        } => {
            let form = TripForm {
                trip_type,
                days,
                month,
                budget,
                hint: hint.unwrap_or_default(),
                query: description,
                dark_mode: false,
            };
            commands::plan::run(planner, form).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plan_defaults() {
        let cli = Cli::try_parse_from(["tripmate", "plan", "family trip"]).unwrap();

        match cli.command {
            Commands::Plan {
                description,
                trip_type,
                days,
                month,
                budget,
                hint,
            } => {
                assert_eq!(description, "family trip");
                assert_eq!(trip_type, TripCategory::Adventure);
                assert_eq!(days, 7);
                assert_eq!(month, Month::June);
                assert_eq!(budget, Budget::Low);
                assert!(hint.is_none());
            }
            Commands::Serve { .. } => panic!("expected plan"),
        }
    }

    #[test]
    fn test_parse_plan_options_case_insensitive() {
        let cli = Cli::try_parse_from([
            "tripmate",
            "plan",
            "lakes",
            "--trip-type",
            "nature & wildlife",
            "--days",
            "10",
            "--month",
            "august",
            "--budget",
            "HIGH",
            "--hint",
            "Skardu",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Plan {
                trip_type,
                days,
                month,
                budget,
                hint,
                ..
            } => {
                assert_eq!(trip_type, TripCategory::NatureWildlife);
                assert_eq!(days, 10);
                assert_eq!(month, Month::August);
                assert_eq!(budget, Budget::High);
                assert_eq!(hint.as_deref(), Some("Skardu"));
            }
            Commands::Serve { .. } => panic!("expected plan"),
        }
    }

    #[test]
    fn test_parse_rejects_unknown_month() {
        assert!(Cli::try_parse_from(["tripmate", "plan", "x", "--month", "December"]).is_err());
    }

    #[test]
    fn test_parse_serve_with_globals() {
        let cli = Cli::try_parse_from([
            "tripmate",
            "serve",
            "--port",
            "9000",
            "--model",
            "gemini-2.0-flash",
            "--api-key",
            "k",
        ])
        .unwrap();

        assert_eq!(cli.model.as_deref(), Some("gemini-2.0-flash"));
        assert_eq!(cli.api_key.as_deref(), Some("k"));
        match cli.command {
            Commands::Serve { host, port } => {
                assert!(host.is_none());
                assert_eq!(port, Some(9000));
            }
            Commands::Plan { .. } => panic!("expected serve"),
        }
    }
}
