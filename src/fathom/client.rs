use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

use crate::config::FathomSettings;
use crate::fathom::models::{SummaryResponse, TranscriptResponse};
use crate::fathom::{
    EmbedData, FathomListResponse, FathomMeeting, FathomSummary, FathomTranscriptItem, MeetingData,
};
use crate::{Result, StokemeetError};

/// Pages scanned by [`FathomClient::find_meeting`] before giving up.
const MAX_LOOKUP_PAGES: usize = 10;

pub struct FathomClient {
    http: Client,
    base_url: String,
    api_key: String,
    oembed_url: String,
    oembed_timeout: Duration,
}

impl FathomClient {
    pub fn from_settings(settings: &FathomSettings) -> Result<Self> {
        let api_key = settings.api_key.trim().to_string();
        if api_key.is_empty() {
            return Err(StokemeetError::Config(
                "Fathom API key is missing. Set fathom.api_key in config or STOKEMEET_FATHOM_API_KEY."
                    .to_string(),
            ));
        }

        Ok(Self {
            http: Client::builder().timeout(Duration::from_secs(30)).build()?,
            base_url: settings.base_url.trim().trim_end_matches('/').to_string(),
            api_key,
            oembed_url: settings.oembed_url.trim().to_string(),
            oembed_timeout: Duration::from_secs(settings.oembed_timeout_secs),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// One page of recorded meetings, newest first.
    pub async fn list_meetings(&self, cursor: Option<&str>) -> Result<FathomListResponse> {
        let mut request = self
            .http
            .get(self.url("/meetings"))
            .header("X-Api-Key", &self.api_key);
        if let Some(cursor) = cursor {
            request = request.query(&[("cursor", cursor)]);
        }

        let response = request.send().await?;
        if !response.status().is_success() {
            return Err(StokemeetError::Platform(format!(
                "Fathom API error: {}",
                response.status()
            )));
        }

        Ok(response.json().await?)
    }

    pub async fn get_transcript(&self, recording_id: u64) -> Result<Vec<FathomTranscriptItem>> {
        let response = self
            .http
            .get(self.url(&format!("/recordings/{}/transcript", recording_id)))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(StokemeetError::Platform(format!(
                "Failed to fetch transcript: {}",
                response.status()
            )));
        }

        let body: TranscriptResponse = response.json().await?;
        Ok(body.transcript.unwrap_or_default())
    }

    /// Platform default summary. Error statuses yield the "no summary" fallback.
    pub async fn get_summary(&self, recording_id: u64) -> Result<FathomSummary> {
        let response = self
            .http
            .get(self.url(&format!("/recordings/{}/summary", recording_id)))
            .header("X-Api-Key", &self.api_key)
            .send()
            .await?;

        if !response.status().is_success() {
            debug!("No platform summary for {} ({})", recording_id, response.status());
            return Ok(FathomSummary::default());
        }

        let body: SummaryResponse = response.json().await?;
        Ok(body.summary.unwrap_or_default())
    }

    /// Thumbnail and player lookup. Best effort: any failure yields empty data.
    pub async fn get_embed(&self, share_url: &str) -> EmbedData {
        if share_url.trim().is_empty() {
            return EmbedData::default();
        }

        let result = self
            .http
            .get(self.oembed_url.as_str())
            .query(&[("url", share_url), ("format", "json")])
            .timeout(self.oembed_timeout)
            .send()
            .await;

        let response = match result {
            Ok(response) if response.status() == StatusCode::OK => response,
            Ok(response) => {
                debug!("oEmbed lookup returned {}", response.status());
                return EmbedData::default();
            }
            Err(e) => {
                warn!("Failed to fetch Fathom oEmbed data: {}", e);
                return EmbedData::default();
            }
        };

        match response.json::<EmbedData>().await {
            Ok(data) => data,
            Err(e) => {
                warn!("Failed to parse Fathom oEmbed data: {}", e);
                EmbedData::default()
            }
        }
    }

    /// Locate a meeting by recording id by paging through the list.
    pub async fn find_meeting(&self, recording_id: u64) -> Result<Option<FathomMeeting>> {
        let mut cursor: Option<String> = None;

        for page in 0..MAX_LOOKUP_PAGES {
            let list = self.list_meetings(cursor.as_deref()).await?;
            if let Some(found) = list
                .items
                .into_iter()
                .find(|m| m.recording_id == recording_id)
            {
                debug!("Found recording {} on page {}", recording_id, page + 1);
                return Ok(Some(found));
            }

            match list.next_cursor {
                Some(next) if !next.is_empty() => cursor = Some(next),
                _ => return Ok(None),
            }
        }

        warn!(
            "Recording {} not found in the first {} pages",
            recording_id, MAX_LOOKUP_PAGES
        );
        Ok(None)
    }

    /// Fetch transcript and platform summary together and build the view model.
    pub async fn load_meeting_data(&self, meeting: &FathomMeeting) -> Result<MeetingData> {
        let (transcript, summary) = tokio::join!(
            self.get_transcript(meeting.recording_id),
            self.get_summary(meeting.recording_id)
        );

        Ok(MeetingData::from_platform(meeting, &transcript?, &summary?))
    }

    /// [`Self::find_meeting`] followed by [`Self::load_meeting_data`].
    pub async fn load_recording(&self, recording_id: u64) -> Result<MeetingData> {
        let meeting = self
            .find_meeting(recording_id)
            .await?
            .ok_or_else(|| StokemeetError::NotFound(format!("Recording {}", recording_id)))?;
        self.load_meeting_data(&meeting).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> FathomSettings {
        let mut settings = crate::config::Settings::default().fathom;
        settings.api_key = "key".to_string();
        settings
    }

    #[test]
    fn missing_api_key_is_a_config_error() {
        let settings = crate::config::Settings::default().fathom;
        match FathomClient::from_settings(&settings) {
            Ok(_) => panic!("expected client creation to fail"),
            Err(e) => assert!(e.to_string().contains("Fathom API key is missing")),
        }
    }

    #[test]
    fn urls_are_built_from_trimmed_base() {
        let mut settings = settings();
        settings.base_url = "http://localhost:9000/external/v1/".to_string();

        let client = FathomClient::from_settings(&settings).unwrap();
        assert_eq!(
            client.url("/recordings/7/transcript"),
            "http://localhost:9000/external/v1/recordings/7/transcript"
        );
        assert_eq!(client.oembed_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn empty_share_url_skips_embed_lookup() {
        let client = FathomClient::from_settings(&settings()).unwrap();
        assert_eq!(client.get_embed("  ").await, EmbedData::default());
    }
}
