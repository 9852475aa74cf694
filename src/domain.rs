use serde::{Deserialize, Serialize};

// ============================================================================
// Measurement Identifiers
// ============================================================================

/// Measured quantities across both feed layouts
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Parameter {
    Temperature,
    Humidity,
    Tds,
    Turbidity,
    Ph,
    #[serde(rename = "water")]
    WaterLevel,
    SoilMoisture,
}

impl Parameter {
    /// Wire name as it appears in feed headers and diagnostic actions
    pub fn as_str(&self) -> &'static str {
        match self {
            Parameter::Temperature => "temperature",
            Parameter::Humidity => "humidity",
            Parameter::Tds => "tds",
            Parameter::Turbidity => "turbidity",
            Parameter::Ph => "ph",
            Parameter::WaterLevel => "water",
            Parameter::SoilMoisture => "soilmoisture",
        }
    }

    /// Upper-cased label used in diagnostic messages
    pub fn label(&self) -> &'static str {
        match self {
            Parameter::Temperature => "TEMPERATURE",
            Parameter::Humidity => "HUMIDITY",
            Parameter::Tds => "TDS",
            Parameter::Turbidity => "TURBIDITY",
            Parameter::Ph => "PH",
            Parameter::WaterLevel => "WATER",
            Parameter::SoilMoisture => "SOILMOISTURE",
        }
    }

    /// Header names this parameter answers to, in lookup order.
    /// The short forms are the historical sheet column names.
    pub fn header_names(&self) -> &'static [&'static str] {
        match self {
            Parameter::Temperature => &["temp", "temperature"],
            Parameter::Humidity => &["hum", "humidity"],
            Parameter::Tds => &["tds"],
            Parameter::Turbidity => &["turbidity"],
            Parameter::Ph => &["ph"],
            Parameter::WaterLevel => &["water"],
            Parameter::SoilMoisture => &["soilmoisture", "soil moisture"],
        }
    }
}

// ============================================================================
// Categorical Fields
// ============================================================================

/// Irrigation status enumeration for the water-level feed
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WaterStatus {
    Wet,
    Dry,
}

impl WaterStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            WaterStatus::Wet => "wet",
            WaterStatus::Dry => "dry",
        }
    }

    /// Parse a raw cell value, tolerating any casing.
    /// Values outside the enumeration normalize to None.
    pub fn parse(raw: &str) -> Option<WaterStatus> {
        match raw.to_lowercase().as_str() {
            "wet" => Some(WaterStatus::Wet),
            "dry" => Some(WaterStatus::Dry),
            _ => None,
        }
    }
}

/// Whether a reading came from the live feed or the degraded-mode generator
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Live,
    Synthetic,
}

impl Provenance {
    pub fn as_str(&self) -> &'static str {
        match self {
            Provenance::Live => "live",
            Provenance::Synthetic => "synthetic",
        }
    }
}

// ============================================================================
// Reading
// ============================================================================

/// One normalized snapshot of the sensor feed.
/// Numeric fields are finite values or absent, never sentinel strings.
/// Immutable once constructed; superseded, never mutated, by the next cycle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    pub date: String,
    pub time: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tds: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turbidity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ph: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_level: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil_moisture: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_status: Option<WaterStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub soil: Option<String>,
    pub provenance: Provenance,
}

impl Reading {
    /// An empty reading carrying only capture timestamp and provenance
    pub fn empty(date: String, time: String, provenance: Provenance) -> Reading {
        Reading {
            date,
            time,
            temperature: None,
            humidity: None,
            tds: None,
            turbidity: None,
            ph: None,
            water_level: None,
            soil_moisture: None,
            water_status: None,
            soil: None,
            provenance,
        }
    }

    /// Composite identity used for deduplication
    pub fn row_id(&self) -> String {
        format!("{}-{}", self.date, self.time)
    }

    pub fn value(&self, parameter: Parameter) -> Option<f64> {
        match parameter {
            Parameter::Temperature => self.temperature,
            Parameter::Humidity => self.humidity,
            Parameter::Tds => self.tds,
            Parameter::Turbidity => self.turbidity,
            Parameter::Ph => self.ph,
            Parameter::WaterLevel => self.water_level,
            Parameter::SoilMoisture => self.soil_moisture,
        }
    }

    pub fn set_value(&mut self, parameter: Parameter, value: Option<f64>) {
        match parameter {
            Parameter::Temperature => self.temperature = value,
            Parameter::Humidity => self.humidity = value,
            Parameter::Tds => self.tds = value,
            Parameter::Turbidity => self.turbidity = value,
            Parameter::Ph => self.ph = value,
            Parameter::WaterLevel => self.water_level = value,
            Parameter::SoilMoisture => self.soil_moisture = value,
        }
    }
}
