// Monitoring binary: wires config, live sources, and one session end to end

use std::sync::Arc;

use tracing::{error, info, warn};

use agrimon_core::{
    Config, MonitorSession, OpenWeather, SchemaKind, SheetsFeed, SystemClock, REFERENCE_MONTHS,
};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    let schema_name =
        std::env::var("FEED_SCHEMA").unwrap_or_else(|_| "soil-moisture".to_string());
    let Some(kind) = SchemaKind::parse(&schema_name) else {
        error!(schema = %schema_name, "Unknown feed schema");
        std::process::exit(1);
    };

    let crop = std::env::var("MONITOR_CROP").ok();

    let client = match reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            error!(error = %err, "Failed to build HTTP client");
            std::process::exit(1);
        }
    };

    let feed = Arc::new(SheetsFeed::new(
        client.clone(),
        &config.sheet_id,
        &config.sheet_range,
        &config.sheets_api_key,
    ));
    let weather = Arc::new(OpenWeather::new(
        client,
        &config.weather_location,
        &config.weather_api_key,
    ));

    let mut session = MonitorSession::new(
        kind,
        config.poll_interval,
        feed,
        weather,
        Arc::new(SystemClock::new()),
    );

    info!(schema = %kind.as_str(), crops = ?session.crops(), "Starting monitoring session");
    session.start();

    let mut ticker = tokio::time::interval(config.poll_interval);
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                report(&session, crop.as_deref()).await;
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down");
                break;
            }
        }
    }

    session.stop().await;
}

async fn report(session: &MonitorSession, crop: Option<&str>) {
    let Some(reading) = session.latest_reading().await else {
        info!("No reading yet");
        return;
    };

    info!(
        row_id = %reading.row_id(),
        provenance = %reading.provenance.as_str(),
        temperature = ?reading.temperature,
        humidity = ?reading.humidity,
        "Latest reading"
    );

    if let Some(message) = session.error().await {
        warn!(advisory = %message, "Feed advisory");
    }

    let Some(crop) = crop else {
        return;
    };

    match session.analyze(crop, REFERENCE_MONTHS).await {
        Ok(diagnostics) if diagnostics.is_empty() => {
            info!(crop = %crop, "All parameters within acceptable ranges");
        }
        Ok(diagnostics) => {
            for diagnostic in diagnostics {
                warn!(
                    crop = %crop,
                    parameter = %diagnostic.parameter,
                    message = %diagnostic.message,
                    action = %diagnostic.action,
                    "Out-of-range parameter"
                );
            }
        }
        Err(err) => {
            error!(crop = %crop, error = %err, "Analysis request rejected");
        }
    }
}
