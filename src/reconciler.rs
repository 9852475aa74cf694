use std::sync::Arc;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::catalog::FeedSchema;
use crate::domain::Reading;
use crate::error::FeedError;
use crate::feed::FeedSource;
use crate::normalize::{normalize, HeaderMap};
use crate::synthetic::synthetic_reading;
use crate::time::Clock;
use crate::weather::WeatherSource;

/// Advisory set when the weather lookup fails and no feed error is pending
pub const WEATHER_ADVISORY: &str = "Warning: Could not fetch current temperature data.";

/// Poll-cycle state. Single writer (the reconciler's cycle); consumers
/// read snapshots through the session surface.
#[derive(Debug, Default)]
pub struct FeedState {
    pub latest: Option<Reading>,
    pub last_row_id: Option<String>,
    pub error: Option<String>,
    pub freshness_key: Option<String>,
    pub outdoor_temperature: Option<f64>,
}

impl FeedState {
    pub fn new() -> FeedState {
        FeedState::default()
    }
}

/// Terminal classification of one poll cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// New row stored; error cleared; freshness advanced
    Accepted,
    /// Upstream row unchanged; state untouched, freshness NOT advanced
    Duplicate,
    /// Feed unavailable or unusable; synthetic fallback or retained prior
    Degraded,
}

/// Owns the poll cycle: fetch, normalize, dedup by composite row identity,
/// degrade to synthetic data on failure, then a best-effort weather lookup.
pub struct FeedReconciler {
    schema: &'static FeedSchema,
    feed: Arc<dyn FeedSource>,
    weather: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
    state: Arc<Mutex<FeedState>>,
    rng: StdRng,
}

impl FeedReconciler {
    pub fn new(
        schema: &'static FeedSchema,
        feed: Arc<dyn FeedSource>,
        weather: Arc<dyn WeatherSource>,
        clock: Arc<dyn Clock>,
        state: Arc<Mutex<FeedState>>,
    ) -> Self {
        Self::with_rng(schema, feed, weather, clock, state, StdRng::from_entropy())
    }

    /// Seedable constructor so degraded-mode jitter is deterministic in tests
    pub fn with_rng(
        schema: &'static FeedSchema,
        feed: Arc<dyn FeedSource>,
        weather: Arc<dyn WeatherSource>,
        clock: Arc<dyn Clock>,
        state: Arc<Mutex<FeedState>>,
        rng: StdRng,
    ) -> Self {
        Self {
            schema,
            feed,
            weather,
            clock,
            state,
            rng,
        }
    }

    /// Run one full poll cycle: feed fetch first, weather after. The state
    /// lock is never held across the transport awaits.
    pub async fn run_cycle(&mut self) -> CycleOutcome {
        let outcome = match self.fetch_reading().await {
            Ok(reading) => self.apply_reading(reading).await,
            Err(err) => self.apply_degraded(err).await,
        };

        self.refresh_weather().await;

        outcome
    }

    async fn fetch_reading(&self) -> Result<Reading, FeedError> {
        let payload = self.feed.fetch_latest().await?;
        let headers = HeaderMap::build(payload.header_row()?);
        let row = payload.last_data_row()?;
        normalize(&headers, row, self.schema)
    }

    async fn apply_reading(&self, reading: Reading) -> CycleOutcome {
        let row_id = reading.row_id();
        let mut state = self.state.lock().await;

        if state.last_row_id.as_deref() == Some(row_id.as_str()) {
            info!(row_id = %row_id, "feed row unchanged, keeping stored reading");
            return CycleOutcome::Duplicate;
        }

        info!(row_id = %row_id, schema = %self.schema.kind.as_str(), "accepted new feed row");
        state.latest = Some(reading);
        state.last_row_id = Some(row_id.clone());
        state.freshness_key = Some(row_id);
        state.error = None;
        CycleOutcome::Accepted
    }

    async fn apply_degraded(&mut self, err: FeedError) -> CycleOutcome {
        let mut state = self.state.lock().await;

        if state.latest.is_none() {
            warn!(error = %err, "feed unavailable before first reading, generating synthetic data");
            let reading = synthetic_reading(self.schema, self.clock.as_ref(), &mut self.rng);
            state.freshness_key = Some(format!("mock-{}", self.clock.now_epoch_millis()));
            state.latest = Some(reading);
        } else {
            // a working dashboard is never blanked by a transient failure
            warn!(error = %err, "feed cycle degraded, retaining prior reading");
        }

        state.error = Some(err.to_string());
        CycleOutcome::Degraded
    }

    async fn refresh_weather(&self) {
        match self.weather.current_temperature().await {
            Ok(temperature) => {
                let mut state = self.state.lock().await;
                state.outdoor_temperature = Some(temperature);
                if state.error.as_deref() == Some(WEATHER_ADVISORY) {
                    state.error = None;
                }
            }
            Err(err) => {
                warn!(error = %err, "weather lookup failed");
                let mut state = self.state.lock().await;
                // the advisory never overrides a pending feed error
                if state.error.is_none() {
                    state.error = Some(WEATHER_ADVISORY.to_string());
                }
            }
        }
    }
}
