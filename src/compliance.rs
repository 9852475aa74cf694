use serde::Serialize;

use crate::domain::Reading;
use crate::scaling::ScaledRangeEntry;

/// How a reading deviates from its acceptable range
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Deviation {
    BelowMinimum,
    AboveMaximum,
    StatusMismatch,
}

/// One human-readable out-of-range or mismatched-category finding
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Diagnostic {
    pub parameter: String,
    pub deviation: Deviation,
    pub message: String,
    pub action: String,
}

/// Classify a reading against scaled bounds. Closed intervals: boundary
/// values are compliant. Fields absent from the reading are skipped, not
/// errors, since partially populated feeds are expected. Output order is
/// catalog-declaration order, categorical status last. An empty result
/// means fully compliant; "not yet analyzed" is the caller's concern.
pub fn analyze(reading: &Reading, scaled: &ScaledRangeEntry) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();

    for (parameter, range) in &scaled.ranges {
        let Some(value) = reading.value(*parameter) else {
            continue;
        };

        // below-minimum wording wins when both could apply
        if value < range.min {
            diagnostics.push(Diagnostic {
                parameter: parameter.label().to_string(),
                deviation: Deviation::BelowMinimum,
                message: format!(
                    "{} is less than the minimum acceptable range ({}).",
                    parameter.label(),
                    bound(range.min, &range.unit)
                ),
                action: adjust_action(parameter.as_str(), range.min, range.max, &range.unit),
            });
        } else if value > range.max {
            diagnostics.push(Diagnostic {
                parameter: parameter.label().to_string(),
                deviation: Deviation::AboveMaximum,
                message: format!(
                    "{} is more than the maximum acceptable range ({}).",
                    parameter.label(),
                    bound(range.max, &range.unit)
                ),
                action: adjust_action(parameter.as_str(), range.min, range.max, &range.unit),
            });
        }
    }

    if let (Some(target), Some(actual)) = (scaled.water_target, reading.water_status) {
        if actual != target {
            diagnostics.push(Diagnostic {
                parameter: "WATER STATUS".to_string(),
                deviation: Deviation::StatusMismatch,
                message: format!(
                    "WATER STATUS is {} but should be {} for {}.",
                    actual.as_str(),
                    target.as_str(),
                    scaled.crop
                ),
                action: format!(
                    "Adjust irrigation to achieve {} water status.",
                    target.as_str()
                ),
            });
        }
    }

    diagnostics
}

/// Render a bound with its unit, e.g. "32 °C" or "600"
fn bound(value: f64, unit: &str) -> String {
    if unit.is_empty() {
        value.to_string()
    } else {
        format!("{} {}", value, unit)
    }
}

fn adjust_action(parameter: &str, min: f64, max: f64, unit: &str) -> String {
    format!(
        "Adjust {} levels to be within {} - {}.",
        parameter,
        min,
        bound(max, unit)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{RangeTable, SchemaKind};
    use crate::domain::{Parameter, Provenance, Reading, WaterStatus};
    use crate::scaling::{scale, RoundingPolicy, REFERENCE_MONTHS};

    fn rice_scaled() -> ScaledRangeEntry {
        let entry = RangeTable::for_schema(SchemaKind::WaterLevel)
            .get("Rice")
            .unwrap();
        scale(entry, REFERENCE_MONTHS, RoundingPolicy::OneDecimal).unwrap()
    }

    fn compliant_rice_reading() -> Reading {
        let mut reading = Reading::empty(
            "2025-05-07".to_string(),
            "20:47:06".to_string(),
            Provenance::Live,
        );
        reading.set_value(Parameter::Temperature, Some(30.0));
        reading.set_value(Parameter::Humidity, Some(52.0));
        reading.set_value(Parameter::Tds, Some(450.0));
        reading.set_value(Parameter::Turbidity, Some(40.0));
        reading.set_value(Parameter::Ph, Some(6.5));
        reading.water_status = Some(WaterStatus::Wet);
        reading
    }

    #[test]
    fn test_compliant_reading_produces_no_diagnostics() {
        let diagnostics = analyze(&compliant_rice_reading(), &rice_scaled());
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_above_maximum_wording() {
        let mut reading = compliant_rice_reading();
        reading.set_value(Parameter::Temperature, Some(36.0));

        let diagnostics = analyze(&reading, &rice_scaled());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].parameter, "TEMPERATURE");
        assert_eq!(diagnostics[0].deviation, Deviation::AboveMaximum);
        assert_eq!(
            diagnostics[0].message,
            "TEMPERATURE is more than the maximum acceptable range (32 °C)."
        );
        assert_eq!(
            diagnostics[0].action,
            "Adjust temperature levels to be within 28 - 32 °C."
        );
    }

    #[test]
    fn test_below_minimum_wording() {
        let mut reading = compliant_rice_reading();
        reading.set_value(Parameter::Tds, Some(120.0));

        let diagnostics = analyze(&reading, &rice_scaled());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].deviation, Deviation::BelowMinimum);
        assert_eq!(
            diagnostics[0].message,
            "TDS is less than the minimum acceptable range (300)."
        );
        assert_eq!(
            diagnostics[0].action,
            "Adjust tds levels to be within 300 - 600."
        );
    }

    #[test]
    fn test_boundary_values_are_compliant() {
        let mut reading = compliant_rice_reading();
        reading.set_value(Parameter::Temperature, Some(28.0));
        reading.set_value(Parameter::Humidity, Some(55.0));

        let diagnostics = analyze(&reading, &rice_scaled());

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_absent_fields_are_skipped() {
        let mut reading = compliant_rice_reading();
        reading.set_value(Parameter::Humidity, None);
        reading.water_status = None;

        let diagnostics = analyze(&reading, &rice_scaled());

        assert!(diagnostics.is_empty());
    }

    #[test]
    fn test_status_mismatch_wording() {
        let mut reading = compliant_rice_reading();
        reading.water_status = Some(WaterStatus::Dry);

        let diagnostics = analyze(&reading, &rice_scaled());

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].parameter, "WATER STATUS");
        assert_eq!(diagnostics[0].deviation, Deviation::StatusMismatch);
        assert_eq!(
            diagnostics[0].message,
            "WATER STATUS is dry but should be wet for Rice."
        );
        assert_eq!(
            diagnostics[0].action,
            "Adjust irrigation to achieve wet water status."
        );
    }

    #[test]
    fn test_diagnostics_follow_catalog_order() {
        let mut reading = compliant_rice_reading();
        reading.set_value(Parameter::Ph, Some(9.0));
        reading.set_value(Parameter::Humidity, Some(10.0));
        reading.water_status = Some(WaterStatus::Dry);

        let diagnostics = analyze(&reading, &rice_scaled());

        let order: Vec<&str> = diagnostics
            .iter()
            .map(|diagnostic| diagnostic.parameter.as_str())
            .collect();
        assert_eq!(order, vec!["HUMIDITY", "PH", "WATER STATUS"]);
    }

    #[test]
    fn test_soil_moisture_schema_has_no_status_diagnostic() {
        let entry = RangeTable::for_schema(SchemaKind::SoilMoisture)
            .get("Rice")
            .unwrap();
        let scaled = scale(entry, REFERENCE_MONTHS, RoundingPolicy::NearestInteger).unwrap();

        let mut reading = Reading::empty(
            "2025-05-07".to_string(),
            "20:47:06".to_string(),
            Provenance::Live,
        );
        reading.set_value(Parameter::SoilMoisture, Some(800.0));
        reading.water_status = Some(WaterStatus::Dry);

        let diagnostics = analyze(&reading, &scaled);

        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].parameter, "SOILMOISTURE");
        assert_eq!(diagnostics[0].deviation, Deviation::BelowMinimum);
    }
}
