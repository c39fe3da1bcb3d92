use lume_connect::config::{LoggingSettings, Settings};
use lume_connect::store::{Action, Store};
use std::process::ExitCode;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

fn init_logging(logging: &LoggingSettings) {
    let filter = EnvFilter::try_new(&logging.level).unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true);

    if logging.format == "json" {
        subscriber.json().init();
    } else {
        subscriber.pretty().init();
    }
}

/// Dispatch every action in a JSON array file, logging rejected ones
fn replay(store: &mut Store, path: &str) -> Result<(), Box<dyn std::error::Error>> {
    let contents = std::fs::read_to_string(path)?;
    let actions: Vec<Action> = serde_json::from_str(&contents)?;

    info!("Replaying {} actions from {}", actions.len(), path);
    for (step, action) in actions.into_iter().enumerate() {
        match store.dispatch(action) {
            Ok(outcome) => info!("Step {}: {:?}", step + 1, outcome),
            Err(e) => warn!("Step {} rejected: {}", step + 1, e),
        }
    }

    for event in store.drain_events() {
        info!("Activity: {} {:?} {}", event.user_id, event.event_type, event.target_user_id);
    }
    Ok(())
}

fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let (settings, config_error) = match Settings::load() {
        Ok(settings) => (settings, None),
        Err(e) => (Settings::default(), Some(e)),
    };

    init_logging(&settings.logging);

    if let Some(e) = config_error {
        error!("Failed to load configuration, using defaults: {}", e);
    }

    info!("Starting Lume Connect for {}", settings.session.local_user_id);

    let mut store = match Store::from_settings(&settings) {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to build store: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(path) = std::env::args().nth(1) {
        if let Err(e) = replay(&mut store, &path) {
            error!("Failed to replay actions from {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    }

    match serde_json::to_string_pretty(&store.snapshot()) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("Failed to serialize store snapshot: {}", e);
            ExitCode::FAILURE
        }
    }
}
