use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;

use crate::error::FeedError;

/// Wire shape of the tabular feed response: row 0 is headers, the last
/// data row is authoritative
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValueRange {
    #[serde(default)]
    pub values: Vec<Vec<Value>>,
}

impl ValueRange {
    pub fn header_row(&self) -> Result<&[Value], FeedError> {
        self.values
            .first()
            .map(|row| row.as_slice())
            .ok_or(FeedError::EmptyPayload)
    }

    /// The latest data row. A payload with only a header row is empty.
    pub fn last_data_row(&self) -> Result<&[Value], FeedError> {
        if self.values.len() < 2 {
            return Err(FeedError::EmptyPayload);
        }
        self.values
            .last()
            .map(|row| row.as_slice())
            .ok_or(FeedError::EmptyPayload)
    }
}

/// Transport seam for the tabular feed; tests substitute scripted fakes
#[async_trait]
pub trait FeedSource: Send + Sync {
    async fn fetch_latest(&self) -> Result<ValueRange, FeedError>;
}

/// Live feed backed by the Sheets values endpoint
pub struct SheetsFeed {
    client: reqwest::Client,
    url: String,
}

impl SheetsFeed {
    pub fn new(client: reqwest::Client, sheet_id: &str, range: &str, api_key: &str) -> Self {
        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/{}?key={}",
            sheet_id, range, api_key
        );
        Self { client, url }
    }
}

#[async_trait]
impl FeedSource for SheetsFeed {
    async fn fetch_latest(&self) -> Result<ValueRange, FeedError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Transport(format!(
                "feed returned HTTP {}",
                response.status()
            )));
        }

        Ok(response.json::<ValueRange>().await?)
    }
}
