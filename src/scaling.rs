use serde::{Deserialize, Serialize};

use crate::catalog::{ParamRange, RangeEntry};
use crate::domain::{Parameter, WaterStatus};
use crate::error::AnalysisError;

/// Catalog bounds are defined at a 12-month growing duration
pub const REFERENCE_MONTHS: u32 = 12;

/// How scaled bounds are rounded. The two feed layouts historically used
/// different policies; each FeedSchema pins one.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum RoundingPolicy {
    NearestInteger,
    OneDecimal,
}

impl RoundingPolicy {
    pub fn apply(&self, value: f64) -> f64 {
        match self {
            RoundingPolicy::NearestInteger => value.round(),
            RoundingPolicy::OneDecimal => (value * 10.0).round() / 10.0,
        }
    }
}

/// A RangeEntry with continuous bounds scaled to a growing duration.
/// Derived per analysis request, never persisted.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScaledRangeEntry {
    pub crop: String,
    pub months: u32,
    pub ranges: Vec<(Parameter, ParamRange)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_target: Option<WaterStatus>,
    pub soil: String,
}

impl ScaledRangeEntry {
    pub fn range(&self, parameter: Parameter) -> Option<&ParamRange> {
        self.ranges
            .iter()
            .find(|(candidate, _)| *candidate == parameter)
            .map(|(_, range)| range)
    }
}

/// Scale every continuous bound by months/12, rounding per policy.
/// Categorical fields (irrigation target, soil label) pass through unscaled.
/// Idempotent at 12 months up to rounding.
pub fn scale(
    entry: &RangeEntry,
    months: u32,
    policy: RoundingPolicy,
) -> Result<ScaledRangeEntry, AnalysisError> {
    if months == 0 {
        return Err(AnalysisError::InvalidDuration(months));
    }

    let factor = months as f64 / REFERENCE_MONTHS as f64;
    let ranges = entry
        .ranges
        .iter()
        .map(|(parameter, range)| {
            (
                *parameter,
                ParamRange {
                    min: policy.apply(range.min * factor),
                    max: policy.apply(range.max * factor),
                    unit: range.unit.clone(),
                },
            )
        })
        .collect();

    Ok(ScaledRangeEntry {
        crop: entry.crop.clone(),
        months,
        ranges,
        water_target: entry.water_target,
        soil: entry.soil.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RangeTable, SchemaKind};

    #[test]
    fn test_rounding_policies() {
        assert_eq!(RoundingPolicy::NearestInteger.apply(15.5), 16.0);
        assert_eq!(RoundingPolicy::NearestInteger.apply(15.4), 15.0);
        assert_eq!(RoundingPolicy::OneDecimal.apply(3.75), 3.8);
        assert_eq!(RoundingPolicy::OneDecimal.apply(3.04), 3.0);
    }

    #[test]
    fn test_scale_halves_bounds_at_six_months() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Rice")
            .unwrap();

        let scaled = scale(entry, 6, RoundingPolicy::NearestInteger).unwrap();
        let temperature = scaled.range(Parameter::Temperature).unwrap();

        assert_eq!(temperature.min, 14.0);
        assert_eq!(temperature.max, 16.0);
        assert_eq!(temperature.unit, "°C");
    }

    #[test]
    fn test_scale_one_decimal_keeps_fractional_bounds() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Cotton")
            .unwrap();

        let scaled = scale(entry, 6, RoundingPolicy::OneDecimal).unwrap();
        let ph = scaled.range(Parameter::Ph).unwrap();

        assert_eq!(ph.min, 3.0);
        // 7.5 * 0.5 = 3.75, rounds to 3.8 at one decimal
        assert_eq!(ph.max, 3.8);
    }

    #[test]
    fn test_scale_reference_duration_is_identity() {
        let entry = RangeTable::for_schema(SchemaKind::SoilMoisture)
            .get("Wheat")
            .unwrap();

        let scaled = scale(entry, REFERENCE_MONTHS, RoundingPolicy::NearestInteger).unwrap();

        for (parameter, range) in &entry.ranges {
            let result = scaled.range(*parameter).unwrap();
            assert_eq!(result.min, range.min.round());
            assert_eq!(result.max, range.max.round());
        }
    }

    #[test]
    fn test_scale_passes_categorical_fields_through() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Onion")
            .unwrap();

        let scaled = scale(entry, 3, RoundingPolicy::OneDecimal).unwrap();

        assert_eq!(scaled.water_target, entry.water_target);
        assert_eq!(scaled.soil, entry.soil);
        assert_eq!(scaled.crop, "Onion");
        assert_eq!(scaled.months, 3);
    }

    #[test]
    fn test_scale_rejects_zero_months() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Rice")
            .unwrap();

        let result = scale(entry, 0, RoundingPolicy::NearestInteger);

        assert!(matches!(result, Err(AnalysisError::InvalidDuration(0))));
    }
}
