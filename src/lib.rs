// Declare modules at the root level
pub mod catalog;
pub mod compliance;
pub mod config;
pub mod domain;
pub mod error;
pub mod feed;
pub mod normalize;
pub mod reconciler;
pub mod scaling;
pub mod session;
pub mod synthetic;
pub mod time;
pub mod weather;

// Test utilities module (available in test and integration test builds)
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

// Re-export the core surface at the root for convenience
pub use catalog::{FeedSchema, ParamRange, RangeEntry, RangeTable, SchemaKind};
pub use compliance::{analyze, Deviation, Diagnostic};
pub use config::{Config, ConfigError};
pub use domain::{Parameter, Provenance, Reading, WaterStatus};
pub use error::{AnalysisError, FeedError};
pub use feed::{FeedSource, SheetsFeed, ValueRange};
pub use normalize::{normalize, parse_numeric_prefix, HeaderMap};
pub use reconciler::{CycleOutcome, FeedReconciler, FeedState, WEATHER_ADVISORY};
pub use scaling::{scale, RoundingPolicy, ScaledRangeEntry, REFERENCE_MONTHS};
pub use session::MonitorSession;
pub use synthetic::{baselines, synthetic_reading, JITTER_FRACTION};
pub use time::{Clock, FixedClock, SystemClock};
pub use weather::{OpenWeather, WeatherSource};
