use async_trait::async_trait;
use serde::Deserialize;

use crate::error::FeedError;

/// Best-effort outdoor temperature lookup; failures never degrade the
/// primary feed
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn current_temperature(&self) -> Result<f64, FeedError>;
}

#[derive(Debug, Deserialize)]
struct WeatherResponse {
    main: WeatherMain,
}

#[derive(Debug, Deserialize)]
struct WeatherMain {
    temp: f64,
}

/// OpenWeather current-conditions lookup by location name, metric units
pub struct OpenWeather {
    client: reqwest::Client,
    url: String,
}

impl OpenWeather {
    pub fn new(client: reqwest::Client, location: &str, api_key: &str) -> Self {
        let url = format!(
            "https://api.openweathermap.org/data/2.5/weather?q={}&units=metric&appid={}",
            location, api_key
        );
        Self { client, url }
    }
}

#[async_trait]
impl WeatherSource for OpenWeather {
    async fn current_temperature(&self) -> Result<f64, FeedError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Transport(format!(
                "weather returned HTTP {}",
                response.status()
            )));
        }

        let body = response.json::<WeatherResponse>().await?;
        Ok(body.main.temp)
    }
}
