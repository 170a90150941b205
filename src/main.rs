use std::fs::OpenOptions;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invitacion::app::state::EnvironmentSource;
use invitacion::auth::session::{FileStorage, LocalStorage, MemoryStorage, SessionStore};
use invitacion::device::{self, Environment, GuardDecision, MobileGuard};
use invitacion::flow::FlowKind;
use invitacion::{App, Config};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "invitacion")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open an invitation
    Open {
        /// Which invitation to open
        #[arg(value_enum)]
        flow: FlowKind,
        /// Path or URL of the family records document
        #[arg(long)]
        records: Option<String>,
        /// Present the terminal as a phone
        #[arg(long)]
        emulate_mobile: bool,
        /// Skip the mobile-only guard
        #[arg(long)]
        allow_desktop: bool,
        /// Keep the session in memory only
        #[arg(long)]
        ephemeral: bool,
    },
    /// Check how the device guard classifies an environment
    Device {
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        #[arg(long, default_value = "")]
        user_agent: String,
        /// Touch events are supported
        #[arg(long)]
        touch: bool,
        /// The orientation API is present
        #[arg(long)]
        orientation: bool,
    },
    /// Forget the stored login for an invitation
    Logout {
        #[arg(value_enum)]
        flow: FlowKind,
    },
}

const LOG_FILE: &str = "invitacion.log";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| "invitacion=info".into())
}

/// Log to stderr for one-shot commands
fn init_stderr_logging() {
    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();
}

/// Log to a file in the data directory while the TUI owns the terminal
fn init_file_logging() -> Result<()> {
    let data_dir = Config::data_dir()?;
    std::fs::create_dir_all(&data_dir)
        .with_context(|| format!("Failed to create data directory {:?}", data_dir))?;
    let log_path = data_dir.join(LOG_FILE);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::registry()
        .with(env_filter())
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false),
        )
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let command = cli.command.unwrap_or(Commands::Open {
        flow: FlowKind::Wedding,
        records: None,
        emulate_mobile: false,
        allow_desktop: false,
        ephemeral: false,
    });

    match command {
        Commands::Open { flow, records, emulate_mobile, allow_desktop, ephemeral } => {
            init_file_logging()?;
            let mut config = Config::load()?;
            if allow_desktop {
                config.mobile_only = Some(false);
            }
            if let Some(records) = records {
                config.records_source = Some(records);
            }

            let flow = flow.flow();
            let records = if flow.requires_login() {
                config.records_source()?.load().await
            } else {
                Vec::new()
            };

            let storage: Box<dyn LocalStorage> = if ephemeral {
                Box::new(MemoryStorage::default())
            } else {
                Box::new(FileStorage::open_default()?)
            };
            let source = if emulate_mobile {
                EnvironmentSource::EmulatedPhone
            } else {
                EnvironmentSource::Terminal
            };

            let mut app = App::new(flow, config, source, storage, records)?;
            app.run()?;
        }
        Commands::Device { width, height, user_agent, touch, orientation } => {
            init_stderr_logging();
            let env = Environment {
                viewport_width: width,
                viewport_height: height,
                user_agent,
                touch_start_supported: touch,
                orientation_api: orientation,
                ..Default::default()
            };
            let mobile = device::is_mobile_device(&env);
            let verdict = match MobileGuard::new(true).evaluate(&env) {
                GuardDecision::Allow => "allowed",
                GuardDecision::DesktopNotSupported => "desktop not supported",
            };
            println!("mobile: {}", mobile);
            if mobile {
                println!("device: {}", device::device_type(&env));
            }
            println!("mobile-only invitations: {}", verdict);
        }
        Commands::Logout { flow } => {
            init_stderr_logging();
            let flow = flow.flow();
            match flow.session_keys {
                Some(keys) => {
                    let mut store = SessionStore::new(FileStorage::open_default()?, keys);
                    store.logout()?;
                    println!("Session cleared for {}", flow.title);
                }
                None => println!("{} has no login", flow.title),
            }
        }
    }

    Ok(())
}
