use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::catalog::{FeedSchema, RangeTable, SchemaKind};
use crate::compliance::{analyze, Diagnostic};
use crate::domain::Reading;
use crate::error::AnalysisError;
use crate::feed::FeedSource;
use crate::reconciler::{FeedReconciler, FeedState};
use crate::scaling::{scale, ScaledRangeEntry};
use crate::time::Clock;
use crate::weather::WeatherSource;

/// One dashboard session: owns the polling task and FeedState, and exposes
/// the read surface plus the catalog/analysis surface. Constructed per
/// session and torn down explicitly; dropping without `stop()` still
/// cancels the polling loop.
pub struct MonitorSession {
    schema: &'static FeedSchema,
    state: Arc<Mutex<FeedState>>,
    feed: Arc<dyn FeedSource>,
    weather: Arc<dyn WeatherSource>,
    clock: Arc<dyn Clock>,
    poll_interval: Duration,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl MonitorSession {
    pub fn new(
        kind: SchemaKind,
        poll_interval: Duration,
        feed: Arc<dyn FeedSource>,
        weather: Arc<dyn WeatherSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            schema: FeedSchema::for_kind(kind),
            state: Arc::new(Mutex::new(FeedState::new())),
            feed,
            weather,
            clock,
            poll_interval,
            cancel: CancellationToken::new(),
            task: None,
        }
    }

    pub fn schema_kind(&self) -> SchemaKind {
        self.schema.kind
    }

    /// Run one immediate cycle, then poll on the configured interval until
    /// cancelled. Cycles never overlap: the loop awaits each cycle, and
    /// missed ticks are delayed rather than burst.
    pub fn start(&mut self) {
        if self.task.is_some() {
            return;
        }

        let mut reconciler = FeedReconciler::new(
            self.schema,
            Arc::clone(&self.feed),
            Arc::clone(&self.weather),
            Arc::clone(&self.clock),
            Arc::clone(&self.state),
        );
        let cancel = self.cancel.clone();
        let poll_interval = self.poll_interval;

        self.task = Some(tokio::spawn(async move {
            reconciler.run_cycle().await;

            let mut ticker = tokio::time::interval(poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // the first tick completes immediately; the initial cycle
            // already ran, so consume it
            ticker.tick().await;

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        reconciler.run_cycle().await;
                    }
                    _ = cancel.cancelled() => {
                        info!("polling loop shutting down");
                        break;
                    }
                }
            }
        }));
    }

    /// Cancel the polling loop and wait for the task to finish
    pub async fn stop(&mut self) {
        self.cancel.cancel();
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }

    pub async fn latest_reading(&self) -> Option<Reading> {
        self.state.lock().await.latest.clone()
    }

    pub async fn error(&self) -> Option<String> {
        self.state.lock().await.error.clone()
    }

    pub async fn freshness_key(&self) -> Option<String> {
        self.state.lock().await.freshness_key.clone()
    }

    /// Outdoor temperature from the weather source, falling back to the
    /// reading's own temperature field
    pub async fn current_temperature(&self) -> Option<f64> {
        let state = self.state.lock().await;
        state
            .outdoor_temperature
            .or_else(|| state.latest.as_ref().and_then(|reading| reading.temperature))
    }

    /// Crop identifiers available for analysis, in catalog order
    pub fn crops(&self) -> Vec<&'static str> {
        RangeTable::for_schema(self.schema.kind).crops()
    }

    /// Reference bounds for a crop scaled to a growing duration, rounded
    /// per the schema's policy
    pub fn scaled_range(
        &self,
        crop: &str,
        months: u32,
    ) -> Result<ScaledRangeEntry, AnalysisError> {
        let table = RangeTable::for_schema(self.schema.kind);
        let entry = table
            .get(crop)
            .ok_or_else(|| AnalysisError::UnknownCrop(crop.to_string()))?;
        scale(entry, months, self.schema.rounding)
    }

    /// Classify the latest reading against a crop's scaled bounds. Crop and
    /// months are validated before FeedState is touched; with no reading
    /// yet the result is empty.
    pub async fn analyze(
        &self,
        crop: &str,
        months: u32,
    ) -> Result<Vec<Diagnostic>, AnalysisError> {
        let scaled = self.scaled_range(crop, months)?;
        let reading = self.state.lock().await.latest.clone();

        Ok(match reading {
            Some(reading) => analyze(&reading, &scaled),
            None => Vec::new(),
        })
    }
}

impl Drop for MonitorSession {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
