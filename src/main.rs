//! agriplay CLI - local state and ML client of the Agriplay app.

use agriplay::cli;
use clap::{Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Get the version string.
///
/// - Release builds (on a git tag): "0.1.0"
/// - Development builds: "0.1.0-dev (abc1234)"
fn version() -> &'static str {
    const VERSION: &str = env!("CARGO_PKG_VERSION");
    const GIT_HASH: &str = env!("AGRIPLAY_GIT_HASH");
    const IS_RELEASE: &str = env!("AGRIPLAY_IS_RELEASE");

    static VERSION_STRING: std::sync::OnceLock<String> = std::sync::OnceLock::new();

    VERSION_STRING.get_or_init(|| {
        if IS_RELEASE == "true" {
            VERSION.to_string()
        } else {
            format!("{VERSION}-dev ({GIT_HASH})")
        }
    })
}

#[derive(Parser)]
#[command(name = "agriplay")]
#[command(author, version = version(), about = "AgriPlay local state and ML client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the route the app opens on (/onboarding or /login).
    Gate,

    /// Mark onboarding as finished.
    Onboard,

    /// Clear the onboarding flag.
    Logout,

    /// Chat session history.
    Chat {
        #[command(subcommand)]
        command: ChatCommands,
    },

    /// Ask the ML service for a plant recommendation.
    Recommend {
        /// Experience level (pemula, menengah, mahir).
        #[arg(long, default_value = "pemula")]
        level: String,

        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Sun condition (full, partial, shade).
        #[arg(long, default_value = "full")]
        sun: String,

        /// Planting area in square metres.
        #[arg(long)]
        area: f64,
    },

    /// Ask the ML service for a yield prediction.
    Yield {
        /// Latitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        /// Longitude in degrees.
        #[arg(long, allow_hyphen_values = true)]
        lon: f64,

        /// Crop name.
        #[arg(long)]
        crop: String,
    },

    /// Check whether the ML service is reachable.
    Health,
}

#[derive(Subcommand)]
enum ChatCommands {
    /// List sessions, most recent first.
    List {
        /// Maximum number of sessions to show. Defaults to 20.
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Show every message of a session.
    Show {
        /// Session ID.
        session_id: String,
    },

    /// Append a message. Starts a new session unless --session is given.
    Send {
        /// Message text.
        text: String,

        /// Session to append to.
        #[arg(short, long)]
        session: Option<String>,

        /// Record the message as written by the assistant.
        #[arg(long)]
        assistant: bool,
    },

    /// Delete a session.
    Delete {
        /// Session ID.
        session_id: String,
    },
}

/// Install the stderr log subscriber, filtered by `AGRIPLAY_LOG`.
fn init_logging() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_env("AGRIPLAY_LOG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let result = match cli.command {
        Commands::Gate => cli::gate::run(),
        Commands::Onboard => cli::gate::run_onboard(),
        Commands::Logout => cli::gate::run_logout(),
        Commands::Chat { command } => match command {
            ChatCommands::List { limit } => cli::chat::run_list(limit),
            ChatCommands::Show { session_id } => cli::chat::run_show(&session_id),
            ChatCommands::Send {
                text,
                session,
                assistant,
            } => cli::chat::run_send(&text, session.as_deref(), assistant),
            ChatCommands::Delete { session_id } => cli::chat::run_delete(&session_id),
        },
        Commands::Recommend {
            level,
            lat,
            lon,
            sun,
            area,
        } => cli::recommend::run(&level, lat, lon, &sun, area),
        Commands::Yield { lat, lon, crop } => cli::recommend::run_yield(lat, lon, &crop),
        Commands::Health => cli::recommend::run_health(),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("agriplay: error: {e}");
            ExitCode::FAILURE
        }
    }
}
