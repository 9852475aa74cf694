use rand::Rng;

use crate::catalog::{FeedSchema, SchemaKind};
use crate::domain::{Parameter, Provenance, Reading, WaterStatus};
use crate::time::Clock;

/// Degraded-mode jitter: each numeric field varies by at most this
/// fraction of its baseline
pub const JITTER_FRACTION: f64 = 0.1;

/// Baseline values the degraded-mode generator jitters around, one table
/// per feed layout
pub const WATER_LEVEL_BASELINES: &[(Parameter, f64)] = &[
    (Parameter::Tds, 3.91),
    (Parameter::Ph, 0.12),
    (Parameter::Turbidity, 0.78),
    (Parameter::WaterLevel, 0.68),
    (Parameter::Temperature, 30.5),
    (Parameter::Humidity, 45.0),
];

pub const SOIL_MOISTURE_BASELINES: &[(Parameter, f64)] = &[
    (Parameter::Turbidity, 510.0),
    (Parameter::SoilMoisture, 1024.0),
    (Parameter::Ph, 6.5),
    (Parameter::Tds, 29.0),
    (Parameter::Temperature, 30.9),
    (Parameter::Humidity, 54.8),
];

pub fn baselines(kind: SchemaKind) -> &'static [(Parameter, f64)] {
    match kind {
        SchemaKind::WaterLevel => WATER_LEVEL_BASELINES,
        SchemaKind::SoilMoisture => SOIL_MOISTURE_BASELINES,
    }
}

/// Build a plausible Reading from the schema baselines so the dashboard
/// stays populated when the feed is unreachable. Each numeric field gets
/// uniform jitter within ±10% of its baseline; capture date and time come
/// from the clock; provenance is marked Synthetic.
pub fn synthetic_reading<R: Rng>(
    schema: &FeedSchema,
    clock: &dyn Clock,
    rng: &mut R,
) -> Reading {
    let mut reading = Reading::empty(
        clock.now_date(),
        clock.now_time(),
        Provenance::Synthetic,
    );

    for (parameter, baseline) in baselines(schema.kind) {
        let jitter = rng.gen_range(-JITTER_FRACTION..=JITTER_FRACTION);
        reading.set_value(*parameter, Some(baseline * (1.0 + jitter)));
    }

    if schema.has_water_status {
        reading.water_status = Some(WaterStatus::Dry);
        reading.soil = Some("dry".to_string());
    }

    reading
}
