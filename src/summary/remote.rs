//! Remote summary store (PostgREST row per user, meeting and summary type)

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use reqwest::{Client, Request, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::auth::Session;
use crate::config::RemoteSettings;
use crate::summary::{StoredActionItem, StoredSummary};
use crate::{Result, StokemeetError};

const UPSERT_CONFLICT_COLUMNS: &str = "user_id,meeting_id,summary_type";
const UPSERT_PREFER: &str = "resolution=merge-duplicates,return=minimal";

#[async_trait]
pub trait RemoteSummaryStore: Send + Sync {
    /// Exact-match point lookup.
    async fn fetch(
        &self,
        session: &Session,
        meeting_id: &str,
        type_id: &str,
    ) -> Result<Option<StoredSummary>>;

    /// Insert or replace the row for (user, meeting, type).
    async fn upsert(
        &self,
        session: &Session,
        meeting_id: &str,
        type_id: &str,
        summary: &StoredSummary,
    ) -> Result<()>;
}

pub struct SupabaseSummaryStore {
    http: Client,
    base_url: String,
    anon_key: String,
    table: String,
}

impl SupabaseSummaryStore {
    pub fn from_settings(settings: &RemoteSettings) -> Result<Self> {
        if !settings.is_configured() {
            return Err(StokemeetError::Config(
                "Remote store is not configured".to_string(),
            ));
        }

        Ok(Self {
            http: Client::builder().timeout(Duration::from_secs(15)).build()?,
            base_url: settings.url.trim().trim_end_matches('/').to_string(),
            anon_key: settings.anon_key.trim().to_string(),
            table: settings.table.clone(),
        })
    }

    fn table_url(&self) -> String {
        format!("{}/rest/v1/{}", self.base_url, self.table)
    }

    /// Point lookup on (user, meeting, type) with PostgREST `eq.` filters.
    fn fetch_request(&self, session: &Session, meeting_id: &str, type_id: &str) -> Result<Request> {
        let user_filter = format!("eq.{}", session.user_id);
        let meeting_filter = format!("eq.{}", meeting_id);
        let type_filter = format!("eq.{}", type_id);

        let request = self
            .http
            .get(self.table_url())
            .header("apikey", &self.anon_key)
            .bearer_auth(&session.access_token)
            .query(&[
                ("select", "content,action_items,updated_at"),
                ("user_id", user_filter.as_str()),
                ("meeting_id", meeting_filter.as_str()),
                ("summary_type", type_filter.as_str()),
                ("limit", "1"),
            ])
            .build()?;
        Ok(request)
    }

    /// Upsert that merges on the (user, meeting, type) unique key.
    fn upsert_request(
        &self,
        session: &Session,
        meeting_id: &str,
        type_id: &str,
        summary: &StoredSummary,
    ) -> Result<Request> {
        let row = UpsertRow {
            user_id: &session.user_id,
            meeting_id,
            summary_type: type_id,
            content: &summary.content,
            action_items: &summary.action_items,
            updated_at: timestamp_to_datetime(summary.timestamp),
        };

        let request = self
            .http
            .post(self.table_url())
            .header("apikey", &self.anon_key)
            .header("Prefer", UPSERT_PREFER)
            .bearer_auth(&session.access_token)
            .query(&[("on_conflict", UPSERT_CONFLICT_COLUMNS)])
            .json(&row)
            .build()?;
        Ok(request)
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(StokemeetError::Remote(format!("{}: {}", status, body.trim())))
    }
}

#[async_trait]
impl RemoteSummaryStore for SupabaseSummaryStore {
    async fn fetch(
        &self,
        session: &Session,
        meeting_id: &str,
        type_id: &str,
    ) -> Result<Option<StoredSummary>> {
        let request = self.fetch_request(session, meeting_id, type_id)?;
        let response = self.http.execute(request).await?;

        let rows: Vec<SummaryRow> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().next().map(SummaryRow::into_summary))
    }

    async fn upsert(
        &self,
        session: &Session,
        meeting_id: &str,
        type_id: &str,
        summary: &StoredSummary,
    ) -> Result<()> {
        let request = self.upsert_request(session, meeting_id, type_id, summary)?;
        let response = self.http.execute(request).await?;

        Self::check(response).await?;
        Ok(())
    }
}

#[derive(Debug, Serialize)]
struct UpsertRow<'a> {
    user_id: &'a str,
    meeting_id: &'a str,
    summary_type: &'a str,
    content: &'a str,
    action_items: &'a [StoredActionItem],
    updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
struct SummaryRow {
    content: String,
    #[serde(default)]
    action_items: Option<Vec<StoredActionItem>>,
    #[serde(default)]
    updated_at: Option<DateTime<Utc>>,
}

impl SummaryRow {
    fn into_summary(self) -> StoredSummary {
        StoredSummary {
            content: self.content,
            action_items: self.action_items.unwrap_or_default(),
            timestamp: self
                .updated_at
                .map(|t| t.timestamp_millis())
                .unwrap_or_default(),
        }
    }
}

fn timestamp_to_datetime(millis: i64) -> DateTime<Utc> {
    Utc.timestamp_millis_opt(millis)
        .single()
        .unwrap_or_else(Utc::now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::summary::ActionItem;

    fn store() -> SupabaseSummaryStore {
        SupabaseSummaryStore::from_settings(&RemoteSettings {
            url: "https://project.supabase.co/".to_string(),
            anon_key: " anon ".to_string(),
            table: "meeting_summaries".to_string(),
        })
        .unwrap()
    }

    fn session() -> Session {
        Session {
            user_id: "u1".to_string(),
            email: None,
            access_token: "token".to_string(),
        }
    }

    fn query(request: &Request) -> Vec<(String, String)> {
        request
            .url()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    fn header<'a>(request: &'a Request, name: &str) -> Option<&'a str> {
        request.headers().get(name).and_then(|v| v.to_str().ok())
    }

    #[test]
    fn not_configured_remote_is_rejected() {
        let result = SupabaseSummaryStore::from_settings(&RemoteSettings {
            url: String::new(),
            anon_key: "anon".to_string(),
            table: "meeting_summaries".to_string(),
        });
        assert!(matches!(result, Err(StokemeetError::Config(_))));
    }

    #[test]
    fn fetch_request_filters_on_user_meeting_and_type() {
        let request = store()
            .fetch_request(&session(), "42", "Sales - BANT")
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::GET);
        assert_eq!(request.url().path(), "/rest/v1/meeting_summaries");
        assert_eq!(
            query(&request),
            vec![
                ("select".to_string(), "content,action_items,updated_at".to_string()),
                ("user_id".to_string(), "eq.u1".to_string()),
                ("meeting_id".to_string(), "eq.42".to_string()),
                ("summary_type".to_string(), "eq.Sales - BANT".to_string()),
                ("limit".to_string(), "1".to_string()),
            ]
        );
        assert_eq!(header(&request, "apikey"), Some("anon"));
        assert_eq!(header(&request, "authorization"), Some("Bearer token"));
    }

    #[test]
    fn upsert_request_merges_on_the_unique_key() {
        let summary = StoredSummary::new("body".to_string(), vec![]);
        let request = store()
            .upsert_request(&session(), "42", "General", &summary)
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            query(&request),
            vec![(
                "on_conflict".to_string(),
                "user_id,meeting_id,summary_type".to_string()
            )]
        );
        assert_eq!(
            header(&request, "prefer"),
            Some("resolution=merge-duplicates,return=minimal")
        );
        assert_eq!(header(&request, "content-type"), Some("application/json"));

        let body = request.body().and_then(|b| b.as_bytes()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(body).unwrap();
        assert_eq!(value["user_id"], "u1");
        assert_eq!(value["meeting_id"], "42");
        assert_eq!(value["summary_type"], "General");
    }

    #[test]
    fn row_with_null_columns_becomes_summary() {
        let rows: Vec<SummaryRow> =
            serde_json::from_str(r##"[{"content": "# Demo Summary", "action_items": null, "updated_at": null}]"##)
                .unwrap();
        let summary = rows.into_iter().next().unwrap().into_summary();

        assert_eq!(summary.content, "# Demo Summary");
        assert!(summary.action_items.is_empty());
        assert_eq!(summary.timestamp, 0);
    }

    #[test]
    fn row_timestamp_maps_to_millis() {
        let rows: Vec<SummaryRow> = serde_json::from_str(
            r#"[{
                "content": "body",
                "action_items": [{"text": "Send recap", "assignee": "Jackie"}, "legacy"],
                "updated_at": "2024-12-01T10:00:00+00:00"
            }]"#,
        )
        .unwrap();
        let summary = rows.into_iter().next().unwrap().into_summary();

        assert_eq!(summary.timestamp, 1_733_047_200_000);
        assert_eq!(
            summary.action_items(),
            vec![
                ActionItem::new("Send recap", "Jackie"),
                ActionItem::unassigned("legacy"),
            ]
        );
    }

    #[test]
    fn upsert_row_uses_snake_case_columns() {
        let items = vec![StoredActionItem::from(ActionItem::new("Export", "Mauricio"))];
        let row = UpsertRow {
            user_id: "u1",
            meeting_id: "42",
            summary_type: "Sales - BANT",
            content: "body",
            action_items: &items,
            updated_at: timestamp_to_datetime(1_733_047_200_000),
        };
        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["summary_type"], "Sales - BANT");
        assert_eq!(value["action_items"][0]["assignee"], "Mauricio");
        assert!(value["updated_at"].as_str().unwrap().starts_with("2024-12-01T10:00:00"));
    }
}
