//! Test utilities: proptest generators for domain types and scripted
//! fakes for the feed and weather transport seams.

pub mod generators {
    use proptest::prelude::*;

    use crate::catalog::{ParamRange, RangeEntry, WATER_LEVEL};
    use crate::domain::{Parameter, Provenance, Reading, WaterStatus};
    use crate::scaling::RoundingPolicy;

    /// Generate an ordered parameter range with an occasional unit label
    pub fn param_range() -> impl Strategy<Value = ParamRange> {
        (
            0.0f64..2000.0,
            0.0f64..2000.0,
            prop_oneof![Just(""), Just("°C"), Just("%")],
        )
            .prop_map(|(a, b, unit)| ParamRange {
                min: a.min(b),
                max: a.max(b),
                unit: unit.to_string(),
            })
    }

    /// Generate a water-level RangeEntry with valid ordered bounds
    pub fn range_entry() -> impl Strategy<Value = RangeEntry> {
        let parameters = WATER_LEVEL.ranged_parameters;
        (
            prop::collection::vec(param_range(), parameters.len()),
            prop_oneof![
                Just(None),
                Just(Some(WaterStatus::Wet)),
                Just(Some(WaterStatus::Dry))
            ],
        )
            .prop_map(move |(bounds, water_target)| RangeEntry {
                crop: "Testcrop".to_string(),
                ranges: parameters.iter().copied().zip(bounds).collect(),
                water_target,
                soil: "Loamy soil".to_string(),
            })
    }

    /// Generate a growing duration in months (1..=48)
    pub fn months() -> impl Strategy<Value = u32> {
        1u32..=48
    }

    pub fn rounding_policy() -> impl Strategy<Value = RoundingPolicy> {
        prop_oneof![
            Just(RoundingPolicy::NearestInteger),
            Just(RoundingPolicy::OneDecimal)
        ]
    }

    /// Generate a live reading whose continuous fields all lie within the
    /// entry's bounds and whose status matches the target
    pub fn compliant_reading(entry: &RangeEntry) -> impl Strategy<Value = Reading> {
        let bounds: Vec<(Parameter, f64, f64)> = entry
            .ranges
            .iter()
            .map(|(parameter, range)| (*parameter, range.min, range.max))
            .collect();
        let water_target = entry.water_target;

        prop::collection::vec(0.0f64..=1.0, bounds.len()).prop_map(move |fractions| {
            let mut reading = Reading::empty(
                "2025-05-07".to_string(),
                "20:47:06".to_string(),
                Provenance::Live,
            );
            for ((parameter, min, max), fraction) in bounds.iter().zip(fractions) {
                // clamp: min + (max - min) can overshoot max by one ulp
                let value = (min + (max - min) * fraction).clamp(*min, *max);
                reading.set_value(*parameter, Some(value));
            }
            reading.water_status = water_target;
            reading
        })
    }
}

pub mod fakes {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;
    use serde_json::json;

    use crate::error::FeedError;
    use crate::feed::{FeedSource, ValueRange};
    use crate::weather::WeatherSource;

    /// Build a sheet payload from header names and string rows
    pub fn sheet_payload(headers: &[&str], rows: &[&[&str]]) -> ValueRange {
        let mut values = vec![headers.iter().map(|cell| json!(cell)).collect::<Vec<_>>()];
        for row in rows {
            values.push(row.iter().map(|cell| json!(cell)).collect());
        }
        ValueRange { values }
    }

    /// Feed fake returning scripted responses in order; exhaustion is a
    /// transport error so a miscounted script fails loudly
    pub struct ScriptedFeed {
        responses: Mutex<VecDeque<Result<ValueRange, FeedError>>>,
    }

    impl ScriptedFeed {
        pub fn new(responses: Vec<Result<ValueRange, FeedError>>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
            }
        }
    }

    #[async_trait]
    impl FeedSource for ScriptedFeed {
        async fn fetch_latest(&self) -> Result<ValueRange, FeedError> {
            self.responses
                .lock()
                .expect("scripted feed lock poisoned")
                .pop_front()
                .unwrap_or_else(|| Err(FeedError::Transport("script exhausted".to_string())))
        }
    }

    /// Weather fake: a fixed temperature, or a transport failure when None
    pub struct FixedWeather {
        temperature: Option<f64>,
    }

    impl FixedWeather {
        pub fn ok(temperature: f64) -> Self {
            Self {
                temperature: Some(temperature),
            }
        }

        pub fn failing() -> Self {
            Self { temperature: None }
        }
    }

    #[async_trait]
    impl WeatherSource for FixedWeather {
        async fn current_temperature(&self) -> Result<f64, FeedError> {
            self.temperature
                .ok_or_else(|| FeedError::Transport("weather unavailable".to_string()))
        }
    }
}
