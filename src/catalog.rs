use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::domain::{Parameter, WaterStatus};
use crate::scaling::RoundingPolicy;

// ============================================================================
// Feed Schemas
// ============================================================================

/// Which feed layout a session consumes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum SchemaKind {
    WaterLevel,
    SoilMoisture,
}

impl SchemaKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::WaterLevel => "water-level",
            SchemaKind::SoilMoisture => "soil-moisture",
        }
    }

    pub fn parse(raw: &str) -> Option<SchemaKind> {
        match raw.to_lowercase().as_str() {
            "water-level" => Some(SchemaKind::WaterLevel),
            "soil-moisture" => Some(SchemaKind::SoilMoisture),
            _ => None,
        }
    }
}

/// Static descriptor for one feed layout: which columns are parsed, which
/// parameters carry catalog ranges, and how scaled bounds are rounded
#[derive(Debug, Clone, Copy)]
pub struct FeedSchema {
    pub kind: SchemaKind,
    /// Continuous parameters with catalog ranges, in catalog-declaration
    /// order (the order diagnostics are emitted in)
    pub ranged_parameters: &'static [Parameter],
    /// All numeric columns parsed out of a data row
    pub numeric_fields: &'static [Parameter],
    pub has_water_status: bool,
    pub rounding: RoundingPolicy,
}

pub static WATER_LEVEL: FeedSchema = FeedSchema {
    kind: SchemaKind::WaterLevel,
    ranged_parameters: &[
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::Tds,
        Parameter::Turbidity,
        Parameter::Ph,
    ],
    numeric_fields: &[
        Parameter::Tds,
        Parameter::Ph,
        Parameter::Turbidity,
        Parameter::WaterLevel,
        Parameter::Temperature,
        Parameter::Humidity,
    ],
    has_water_status: true,
    rounding: RoundingPolicy::OneDecimal,
};

pub static SOIL_MOISTURE: FeedSchema = FeedSchema {
    kind: SchemaKind::SoilMoisture,
    ranged_parameters: &[
        Parameter::Temperature,
        Parameter::Humidity,
        Parameter::SoilMoisture,
        Parameter::Turbidity,
        Parameter::Ph,
        Parameter::Tds,
    ],
    numeric_fields: &[
        Parameter::Turbidity,
        Parameter::SoilMoisture,
        Parameter::Ph,
        Parameter::Tds,
        Parameter::Temperature,
        Parameter::Humidity,
    ],
    has_water_status: false,
    rounding: RoundingPolicy::NearestInteger,
};

impl FeedSchema {
    pub fn for_kind(kind: SchemaKind) -> &'static FeedSchema {
        match kind {
            SchemaKind::WaterLevel => &WATER_LEVEL,
            SchemaKind::SoilMoisture => &SOIL_MOISTURE,
        }
    }
}

// ============================================================================
// Reference Ranges
// ============================================================================

/// Acceptable bounds for one continuous parameter at the reference duration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub unit: String,
}

/// Reference ranges for one crop: continuous bounds in declaration order,
/// an optional irrigation target, and the recommended soil type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RangeEntry {
    pub crop: String,
    pub ranges: Vec<(Parameter, ParamRange)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_target: Option<WaterStatus>,
    pub soil: String,
}

impl RangeEntry {
    pub fn range(&self, parameter: Parameter) -> Option<&ParamRange> {
        self.ranges
            .iter()
            .find(|(candidate, _)| *candidate == parameter)
            .map(|(_, range)| range)
    }
}

/// Static reference catalog for one feed schema
#[derive(Debug, Clone)]
pub struct RangeTable {
    kind: SchemaKind,
    entries: Vec<RangeEntry>,
}

impl RangeTable {
    pub fn for_schema(kind: SchemaKind) -> &'static RangeTable {
        match kind {
            SchemaKind::WaterLevel => water_level_table(),
            SchemaKind::SoilMoisture => soil_moisture_table(),
        }
    }

    pub fn kind(&self) -> SchemaKind {
        self.kind
    }

    /// Exact-match crop lookup
    pub fn get(&self, crop: &str) -> Option<&RangeEntry> {
        self.entries.iter().find(|entry| entry.crop == crop)
    }

    /// Crop identifiers in catalog order
    pub fn crops(&self) -> Vec<&str> {
        self.entries.iter().map(|entry| entry.crop.as_str()).collect()
    }
}

fn range(min: f64, max: f64, unit: &str) -> (f64, f64, String) {
    (min, max, unit.to_string())
}

fn entry(
    crop: &str,
    parameters: &'static [Parameter],
    bounds: Vec<(f64, f64, String)>,
    water_target: Option<WaterStatus>,
    soil: &str,
) -> RangeEntry {
    let ranges = parameters
        .iter()
        .zip(bounds)
        .map(|(parameter, (min, max, unit))| (*parameter, ParamRange { min, max, unit }))
        .collect();
    RangeEntry {
        crop: crop.to_string(),
        ranges,
        water_target,
        soil: soil.to_string(),
    }
}

fn water_level_table() -> &'static RangeTable {
    static TABLE: OnceLock<RangeTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let parameters = WATER_LEVEL.ranged_parameters;
        RangeTable {
            kind: SchemaKind::WaterLevel,
            entries: vec![
                entry(
                    "Rice",
                    parameters,
                    vec![
                        range(28.0, 32.0, "°C"),
                        range(50.0, 55.0, "%"),
                        range(300.0, 600.0, ""),
                        range(30.0, 50.0, ""),
                        range(6.0, 7.0, ""),
                    ],
                    Some(WaterStatus::Wet),
                    "Loamy soil",
                ),
                entry(
                    "Wheat",
                    parameters,
                    vec![
                        range(25.0, 31.0, "°C"),
                        range(45.0, 52.0, "%"),
                        range(200.0, 450.0, ""),
                        range(20.0, 40.0, ""),
                        range(6.0, 7.0, ""),
                    ],
                    Some(WaterStatus::Wet),
                    "Clay loam",
                ),
                entry(
                    "Tomato",
                    parameters,
                    vec![
                        range(27.0, 32.0, "°C"),
                        range(50.0, 60.0, "%"),
                        range(300.0, 500.0, ""),
                        range(25.0, 45.0, ""),
                        range(6.0, 7.0, ""),
                    ],
                    Some(WaterStatus::Wet),
                    "Sandy loam",
                ),
                entry(
                    "Onion",
                    parameters,
                    vec![
                        range(26.0, 30.0, "°C"),
                        range(50.0, 55.0, "%"),
                        range(250.0, 500.0, ""),
                        range(20.0, 40.0, ""),
                        range(6.0, 7.0, ""),
                    ],
                    Some(WaterStatus::Dry),
                    "Loamy soil",
                ),
                entry(
                    "Cotton",
                    parameters,
                    vec![
                        range(29.0, 35.0, "°C"),
                        range(40.0, 50.0, "%"),
                        range(350.0, 600.0, ""),
                        range(30.0, 50.0, ""),
                        range(6.0, 7.5, ""),
                    ],
                    Some(WaterStatus::Dry),
                    "Black soil",
                ),
            ],
        }
    })
}

fn soil_moisture_table() -> &'static RangeTable {
    static TABLE: OnceLock<RangeTable> = OnceLock::new();
    TABLE.get_or_init(|| {
        let parameters = SOIL_MOISTURE.ranged_parameters;
        RangeTable {
            kind: SchemaKind::SoilMoisture,
            entries: vec![
                entry(
                    "Rice",
                    parameters,
                    vec![
                        range(28.0, 32.0, "°C"),
                        range(50.0, 55.0, "%"),
                        range(1000.0, 1024.0, ""),
                        range(500.0, 515.0, ""),
                        range(6.0, 7.0, ""),
                        range(22.0, 30.0, ""),
                    ],
                    None,
                    "Loamy soil",
                ),
                entry(
                    "Wheat",
                    parameters,
                    vec![
                        range(25.0, 31.0, "°C"),
                        range(45.0, 52.0, "%"),
                        range(950.0, 1024.0, ""),
                        range(490.0, 510.0, ""),
                        range(6.0, 7.0, ""),
                        range(20.0, 28.0, ""),
                    ],
                    None,
                    "Clay loam",
                ),
                entry(
                    "Tomato",
                    parameters,
                    vec![
                        range(27.0, 32.0, "°C"),
                        range(50.0, 60.0, "%"),
                        range(980.0, 1020.0, ""),
                        range(500.0, 520.0, ""),
                        range(6.0, 7.0, ""),
                        range(25.0, 30.0, ""),
                    ],
                    None,
                    "Sandy loam",
                ),
                entry(
                    "Onion",
                    parameters,
                    vec![
                        range(26.0, 30.0, "°C"),
                        range(50.0, 55.0, "%"),
                        range(1000.0, 1024.0, ""),
                        range(505.0, 515.0, ""),
                        range(6.0, 7.0, ""),
                        range(20.0, 29.0, ""),
                    ],
                    None,
                    "Loamy soil",
                ),
                entry(
                    "Cotton",
                    parameters,
                    vec![
                        range(29.0, 35.0, "°C"),
                        range(40.0, 50.0, "%"),
                        range(900.0, 1020.0, ""),
                        range(500.0, 520.0, ""),
                        range(6.0, 7.5, ""),
                        range(22.0, 30.0, ""),
                    ],
                    None,
                    "Black soil",
                ),
            ],
        }
    })
}
