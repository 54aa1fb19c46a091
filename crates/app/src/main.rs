use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{QuizBackend, RemoteSessionClient, RemoteSessionConfig};
use ui::{App, UiApp, UiConfig, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiUrl { raw: String },
    InvalidNumber { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiUrl { raw } => write!(f, "invalid --api value: {raw}"),
            ArgsError::InvalidNumber { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_number(value: String, flag: &'static str) -> Result<u64, ArgsError> {
    value
        .trim()
        .parse()
        .map_err(|_| ArgsError::InvalidNumber { flag, raw: value })
}

struct DesktopApp {
    backend: Arc<RemoteSessionClient>,
    config: UiConfig,
}

impl UiApp for DesktopApp {
    fn backend(&self) -> Arc<dyn QuizBackend> {
        self.backend.clone()
    }

    fn config(&self) -> UiConfig {
        self.config
    }
}

struct Args {
    client: RemoteSessionConfig,
    ui: UiConfig,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api <base_url>] [--timeout-secs <n>] [--completion-delay-ms <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api {}", services::DEFAULT_BASE_URL);
    eprintln!("  no request timeout, 3000 ms completion delay");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_API_BASE_URL, QUIZ_REQUEST_TIMEOUT_SECS, QUIZ_COMPLETION_DELAY_MS, RUST_LOG");
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut client = RemoteSessionConfig::from_env();
        let mut ui = UiConfig::from_env();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api" => {
                    let value = require_value(args, "--api")?;
                    let trimmed = value.trim();
                    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
                        return Err(ArgsError::InvalidApiUrl { raw: value });
                    }
                    client = RemoteSessionConfig::new(trimmed)
                        .with_request_timeout(client.request_timeout);
                }
                "--timeout-secs" => {
                    let value = require_value(args, "--timeout-secs")?;
                    let secs = parse_number(value, "--timeout-secs")?;
                    let timeout = (secs > 0).then(|| Duration::from_secs(secs));
                    client = client.with_request_timeout(timeout);
                }
                "--completion-delay-ms" => {
                    let value = require_value(args, "--completion-delay-ms")?;
                    let millis = parse_number(value, "--completion-delay-ms")?;
                    ui = ui.with_completion_delay(Duration::from_millis(millis));
                }
                "--help" | "-h" => return Ok(None),
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Some(Self { client, ui }))
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn report_backend_health(client: &RemoteSessionClient) {
    match client.health().await {
        Ok(health) if health.is_healthy() => tracing::info!(
            version = %health.version,
            active_sessions = health.active_sessions,
            "backend is healthy"
        ),
        Ok(health) => tracing::warn!(status = %health.status, message = %health.message, "backend reports a problem"),
        Err(err) => tracing::warn!(error = %err, "backend health check failed; continuing"),
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let Some(parsed) = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?
    else {
        print_usage();
        return Ok(());
    };

    init_tracing();
    tracing::info!(base_url = %parsed.client.base_url, "starting quiz client");

    let client = Arc::new(RemoteSessionClient::new(parsed.client)?);
    report_backend_health(&client).await;

    let app: Arc<dyn UiApp> = Arc::new(DesktopApp {
        backend: client,
        config: parsed.ui,
    });
    let context = build_app_context(&app);

    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Progressive Quiz")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
