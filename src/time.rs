use chrono::{DateTime, Utc};

/// Clock trait for abstracting time operations
/// Readings and freshness keys derive all wall-clock values through it
pub trait Clock: Send + Sync {
    /// Current date as "YYYY-MM-DD" (capture date for synthetic readings)
    fn now_date(&self) -> String;

    /// Current time of day as "HH:MM:SS" (capture time for synthetic readings)
    fn now_time(&self) -> String;

    /// Milliseconds since the Unix epoch (for mock freshness keys)
    fn now_epoch_millis(&self) -> i64;
}

/// Production implementation of Clock using system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_date(&self) -> String {
        Utc::now().format("%Y-%m-%d").to_string()
    }

    fn now_time(&self) -> String {
        Utc::now().format("%H:%M:%S").to_string()
    }

    fn now_epoch_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Test implementation of Clock with fixed/controllable time
/// Useful for deterministic testing
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: DateTime<Utc>,
}

impl FixedClock {
    /// Create a new FixedClock with the given timestamp
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Create a FixedClock from RFC3339 string
    pub fn from_rfc3339(timestamp_str: &str) -> Result<Self, chrono::ParseError> {
        let timestamp = DateTime::parse_from_rfc3339(timestamp_str)?.with_timezone(&Utc);
        Ok(Self { timestamp })
    }

    /// Create a FixedClock from epoch seconds
    pub fn from_epoch_seconds(seconds: i64) -> Self {
        let timestamp = DateTime::from_timestamp(seconds, 0).expect("Invalid timestamp");
        Self { timestamp }
    }

    /// Update the fixed time
    pub fn set_time(&mut self, timestamp: DateTime<Utc>) {
        self.timestamp = timestamp;
    }

    /// Advance time by the given number of seconds
    pub fn advance_seconds(&mut self, seconds: i64) {
        self.timestamp += chrono::Duration::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now_date(&self) -> String {
        self.timestamp.format("%Y-%m-%d").to_string()
    }

    fn now_time(&self) -> String {
        self.timestamp.format("%H:%M:%S").to_string()
    }

    fn now_epoch_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_clock_formats() {
        let clock = SystemClock::new();
        let date = clock.now_date();
        let time = clock.now_time();

        // Verify shapes: "YYYY-MM-DD" and "HH:MM:SS"
        assert_eq!(date.len(), 10);
        assert_eq!(date.as_bytes()[4], b'-');
        assert_eq!(time.len(), 8);
        assert_eq!(time.as_bytes()[2], b':');
    }

    #[test]
    fn test_system_clock_epoch_millis() {
        let clock = SystemClock::new();
        let now = clock.now_epoch_millis();

        // After 2020-01-01 and before 2100-01-01
        assert!(now > 1577836800000);
        assert!(now < 4102444800000);
    }

    #[test]
    fn test_fixed_clock_from_rfc3339() {
        let clock = FixedClock::from_rfc3339("2025-05-07T20:47:06Z").unwrap();

        assert_eq!(clock.now_date(), "2025-05-07");
        assert_eq!(clock.now_time(), "20:47:06");
    }

    #[test]
    fn test_fixed_clock_from_epoch_seconds() {
        let clock = FixedClock::from_epoch_seconds(1705316400);

        assert_eq!(clock.now_date(), "2024-01-15");
        assert_eq!(clock.now_epoch_millis(), 1705316400000);
    }

    #[test]
    fn test_fixed_clock_advance_seconds() {
        let mut clock = FixedClock::from_epoch_seconds(1705316400);

        clock.advance_seconds(3600);

        assert_eq!(clock.now_epoch_millis(), 1705320000000);
        assert_eq!(clock.now_time(), "12:00:00");
    }

    #[test]
    fn test_fixed_clock_set_time() {
        let mut clock = FixedClock::from_epoch_seconds(1705316400);

        let new_time = DateTime::parse_from_rfc3339("2024-12-25T00:00:00Z")
            .unwrap()
            .with_timezone(&Utc);
        clock.set_time(new_time);

        assert_eq!(clock.now_date(), "2024-12-25");
        assert_eq!(clock.now_time(), "00:00:00");
    }

    #[test]
    fn test_fixed_clock_deterministic() {
        let clock1 = FixedClock::from_rfc3339("2025-05-07T20:47:06Z").unwrap();
        let clock2 = FixedClock::from_rfc3339("2025-05-07T20:47:06Z").unwrap();

        assert_eq!(clock1.now_date(), clock1.now_date());
        assert_eq!(clock1.now_epoch_millis(), clock2.now_epoch_millis());
    }

    #[test]
    fn test_clock_trait_object() {
        let system_clock: Box<dyn Clock> = Box::new(SystemClock::new());
        let fixed_clock: Box<dyn Clock> = Box::new(FixedClock::from_epoch_seconds(1705316400));

        let _ = system_clock.now_date();
        let _ = system_clock.now_epoch_millis();

        assert_eq!(fixed_clock.now_epoch_millis(), 1705316400000);
    }
}
