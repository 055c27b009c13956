//! Recording platform payloads and the meeting view model

use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::summary::{ActionItem, MeetingContext, UNASSIGNED};

pub const NO_PLATFORM_SUMMARY: &str = "No summary available.";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomPerson {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomAttendee {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub is_external: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomActionItem {
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub user_generated: bool,
    #[serde(default)]
    pub recording_timestamp: Option<String>,
    #[serde(default)]
    pub recording_playback_url: Option<String>,
    #[serde(default)]
    pub assignee: Option<FathomPerson>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomSpeaker {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub matched_calendar_invitee_email: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomTranscriptItem {
    #[serde(default)]
    pub speaker: FathomSpeaker,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FathomSummary {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub markdown_formatted: String,
}

impl Default for FathomSummary {
    fn default() -> Self {
        Self {
            template_name: "Default".to_string(),
            markdown_formatted: NO_PLATFORM_SUMMARY.to_string(),
        }
    }
}

/// A recorded meeting as listed by the platform.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomMeeting {
    pub recording_id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub share_url: String,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub recording_start_time: Option<String>,
    #[serde(default)]
    pub recording_end_time: Option<String>,
    #[serde(default)]
    pub meeting_type: Option<String>,
    #[serde(default)]
    pub transcript_language: Option<String>,
    #[serde(default)]
    pub calendar_invitees: Vec<FathomAttendee>,
    #[serde(default)]
    pub recorded_by: Option<FathomPerson>,
    #[serde(default)]
    pub action_items: Option<Vec<FathomActionItem>>,
}

impl FathomMeeting {
    /// Recording start as `YYYY-MM-DD`, when parseable.
    pub fn date(&self) -> Option<String> {
        let start = self.recording_start_time.as_deref()?;
        DateTime::parse_from_rfc3339(start)
            .ok()
            .map(|t| t.format("%Y-%m-%d").to_string())
    }

    /// Recording length in whole minutes, rounded.
    pub fn duration_minutes(&self) -> Option<i64> {
        let start = DateTime::parse_from_rfc3339(self.recording_start_time.as_deref()?).ok()?;
        let end = DateTime::parse_from_rfc3339(self.recording_end_time.as_deref()?).ok()?;
        let millis = (end - start).num_milliseconds();
        Some((millis as f64 / 60_000.0).round() as i64)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FathomListResponse {
    #[serde(default)]
    pub items: Vec<FathomMeeting>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct TranscriptResponse {
    #[serde(default)]
    pub transcript: Option<Vec<FathomTranscriptItem>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SummaryResponse {
    #[serde(default)]
    pub summary: Option<FathomSummary>,
}

/// Thumbnail and player markup from the oEmbed endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedData {
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub html: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attendee {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranscriptLine {
    pub speaker: String,
    pub text: String,
    pub timestamp: String,
}

/// Meeting detail view model.
#[derive(Debug, Clone, Serialize)]
pub struct MeetingData {
    pub id: String,
    pub title: String,
    pub date: Option<String>,
    pub duration: String,
    pub attendees: Vec<Attendee>,
    pub transcript: String,
    pub lines: Vec<TranscriptLine>,
    pub platform_summary: String,
    pub action_items: Vec<ActionItem>,
    pub share_url: String,
}

impl MeetingData {
    pub fn from_platform(
        meeting: &FathomMeeting,
        transcript: &[FathomTranscriptItem],
        summary: &FathomSummary,
    ) -> Self {
        let lines: Vec<TranscriptLine> = transcript
            .iter()
            .map(|item| TranscriptLine {
                speaker: item.speaker.display_name.clone(),
                text: item.text.clone(),
                timestamp: item.timestamp.clone(),
            })
            .collect();

        let joined = lines
            .iter()
            .map(|l| format!("{}: {}", l.speaker, l.text))
            .collect::<Vec<_>>()
            .join("\n");

        let action_items = meeting
            .action_items
            .iter()
            .flatten()
            .map(|item| {
                let assignee = item
                    .assignee
                    .as_ref()
                    .map(|a| a.name.trim())
                    .filter(|name| !name.is_empty())
                    .unwrap_or(UNASSIGNED);
                ActionItem::new(item.description.clone(), assignee)
            })
            .collect();

        let platform_summary = if summary.markdown_formatted.trim().is_empty() {
            NO_PLATFORM_SUMMARY.to_string()
        } else {
            summary.markdown_formatted.clone()
        };

        Self {
            id: meeting.recording_id.to_string(),
            title: meeting.title.clone(),
            date: meeting.date(),
            duration: meeting
                .duration_minutes()
                .map(|m| format!("{} mins", m))
                .unwrap_or_else(|| "Unknown".to_string()),
            attendees: meeting
                .calendar_invitees
                .iter()
                .map(|a| Attendee {
                    name: a.name.clone(),
                    email: a.email.clone(),
                })
                .collect(),
            transcript: joined,
            lines,
            platform_summary,
            action_items,
            share_url: meeting.share_url.clone(),
        }
    }

    pub fn attendee_names(&self) -> Vec<String> {
        self.attendees
            .iter()
            .map(|a| a.name.clone())
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// The subset the summary pipeline consumes.
    pub fn context(&self) -> MeetingContext {
        MeetingContext {
            meeting_id: self.id.clone(),
            title: self.title.clone(),
            transcript: self.transcript.clone(),
            date: self.date.clone(),
            attendee_names: self.attendee_names(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEETING_JSON: &str = r#"{
        "recording_id": 4242,
        "title": "Q4 planning",
        "url": "https://fathom.video/calls/4242",
        "share_url": "https://fathom.video/share/abc",
        "recording_start_time": "2024-12-01T10:00:00Z",
        "recording_end_time": "2024-12-01T10:44:40Z",
        "calendar_invitees": [
            {"name": "Jordan", "email": "jordan@example.com", "is_external": false},
            {"name": "Jackie", "email": "jackie@example.com", "is_external": true}
        ],
        "recorded_by": {"name": "Jordan", "email": "jordan@example.com", "team": "Sales"},
        "action_items": [
            {"description": "Send proposal", "completed": false, "assignee": {"name": "Jordan", "email": "jordan@example.com"}},
            {"description": "Book follow-up", "completed": false, "assignee": null}
        ]
    }"#;

    fn transcript() -> Vec<FathomTranscriptItem> {
        serde_json::from_str(
            r#"[
                {"speaker": {"display_name": "Jordan"}, "text": "Budget is approved.", "timestamp": "00:00:05"},
                {"speaker": {"display_name": "Jackie"}, "text": "Great, send the proposal.", "timestamp": "00:00:09"}
            ]"#,
        )
        .unwrap()
    }

    #[test]
    fn converts_platform_meeting_into_view_model() {
        let meeting: FathomMeeting = serde_json::from_str(MEETING_JSON).unwrap();
        let data = MeetingData::from_platform(&meeting, &transcript(), &FathomSummary::default());

        assert_eq!(data.id, "4242");
        assert_eq!(data.date.as_deref(), Some("2024-12-01"));
        assert_eq!(data.duration, "45 mins");
        assert_eq!(
            data.transcript,
            "Jordan: Budget is approved.\nJackie: Great, send the proposal."
        );
        assert_eq!(data.attendee_names(), vec!["Jordan", "Jackie"]);
        assert_eq!(
            data.action_items,
            vec![
                ActionItem::new("Send proposal", "Jordan"),
                ActionItem::unassigned("Book follow-up"),
            ]
        );
        assert_eq!(data.platform_summary, NO_PLATFORM_SUMMARY);
    }

    #[test]
    fn missing_times_yield_unknown_duration_and_no_date() {
        let meeting: FathomMeeting =
            serde_json::from_str(r#"{"recording_id": 1, "title": "Untimed"}"#).unwrap();
        let data = MeetingData::from_platform(&meeting, &[], &FathomSummary::default());

        assert_eq!(data.duration, "Unknown");
        assert!(data.date.is_none());
        assert!(data.transcript.is_empty());
        assert!(data.action_items.is_empty());
    }

    #[test]
    fn context_carries_pipeline_fields() {
        let meeting: FathomMeeting = serde_json::from_str(MEETING_JSON).unwrap();
        let context = MeetingData::from_platform(&meeting, &transcript(), &FathomSummary::default())
            .context();

        assert_eq!(context.meeting_id, "4242");
        assert_eq!(context.title, "Q4 planning");
        assert_eq!(context.date.as_deref(), Some("2024-12-01"));
        assert_eq!(context.attendee_names.len(), 2);
    }

    #[test]
    fn list_response_tolerates_null_cursor() {
        let list: FathomListResponse =
            serde_json::from_str(r#"{"items": [{"recording_id": 7}], "limit": 10, "next_cursor": null}"#)
                .unwrap();
        assert_eq!(list.items.len(), 1);
        assert!(list.next_cursor.is_none());
    }

    #[test]
    fn null_summary_payload_parses_as_absent() {
        let response: SummaryResponse = serde_json::from_str(r#"{"summary": null}"#).unwrap();
        assert!(response.summary.is_none());
    }
}
