//! Property Test: Range Scaling
//!
//! This property test verifies that:
//! - Scaling preserves min <= max ordering for any positive duration
//! - Scaling at the 12-month reference duration is identity up to rounding
//! - Zero-month durations are rejected before any bound is computed

use agrimon_core::test_utils::generators;
use agrimon_core::{scale, AnalysisError, Parameter, RoundingPolicy, REFERENCE_MONTHS};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: scaled bounds stay ordered for every valid entry and duration
    #[test]
    fn prop_scaling_preserves_bound_ordering(
        entry in generators::range_entry(),
        months in generators::months(),
        policy in generators::rounding_policy(),
    ) {
        let scaled = scale(&entry, months, policy).unwrap();
        for (parameter, range) in &scaled.ranges {
            prop_assert!(
                range.min <= range.max,
                "{:?}: scaled min {} > max {} at {} months",
                parameter,
                range.min,
                range.max,
                months
            );
        }
    }

    /// Property: the reference duration is identity up to the rounding policy
    #[test]
    fn prop_reference_duration_is_identity(
        entry in generators::range_entry(),
        policy in generators::rounding_policy(),
    ) {
        let scaled = scale(&entry, REFERENCE_MONTHS, policy).unwrap();
        for (parameter, range) in &entry.ranges {
            let result = scaled.range(*parameter).unwrap();
            prop_assert_eq!(result.min, policy.apply(range.min));
            prop_assert_eq!(result.max, policy.apply(range.max));
            prop_assert_eq!(&result.unit, &range.unit);
        }
    }

    /// Property: categorical fields are never scaled
    #[test]
    fn prop_categorical_fields_pass_through(
        entry in generators::range_entry(),
        months in generators::months(),
        policy in generators::rounding_policy(),
    ) {
        let scaled = scale(&entry, months, policy).unwrap();
        prop_assert_eq!(scaled.water_target, entry.water_target);
        prop_assert_eq!(scaled.soil, entry.soil);
        prop_assert_eq!(scaled.crop, entry.crop);
    }

    /// Property: zero months is rejected regardless of entry or policy
    #[test]
    fn prop_zero_months_rejected(
        entry in generators::range_entry(),
        policy in generators::rounding_policy(),
    ) {
        let result = scale(&entry, 0, policy);
        prop_assert!(matches!(result, Err(AnalysisError::InvalidDuration(0))));
    }
}

#[cfg(test)]
mod additional_tests {
    use super::*;
    use agrimon_core::{RangeTable, SchemaKind};

    #[test]
    fn test_six_month_temperature_scaling() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Rice")
            .unwrap();

        let scaled = scale(entry, 6, RoundingPolicy::NearestInteger).unwrap();
        let temperature = scaled.range(Parameter::Temperature).unwrap();

        assert_eq!(temperature.min, 14.0);
        assert_eq!(temperature.max, 16.0);
    }

    #[test]
    fn test_policies_diverge_on_fractional_bounds() {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Cotton")
            .unwrap();

        // ph max 7.5 at 6 months: 3.75 either rounds to 4 or keeps 3.8
        let integer = scale(entry, 6, RoundingPolicy::NearestInteger).unwrap();
        let decimal = scale(entry, 6, RoundingPolicy::OneDecimal).unwrap();

        assert_eq!(integer.range(Parameter::Ph).unwrap().max, 4.0);
        assert_eq!(decimal.range(Parameter::Ph).unwrap().max, 3.8);
    }

    #[test]
    fn test_durations_beyond_reference_grow_bounds() {
        let entry = RangeTable::for_schema(SchemaKind::SoilMoisture)
            .get("Rice")
            .unwrap();

        let scaled = scale(entry, 24, RoundingPolicy::NearestInteger).unwrap();
        let moisture = scaled.range(Parameter::SoilMoisture).unwrap();

        assert_eq!(moisture.min, 2000.0);
        assert_eq!(moisture.max, 2048.0);
    }
}
