//! Per-meeting summary orchestration
//!
//! A [`MeetingSession`] serves one meeting detail view. Selecting a summary
//! type either reuses the cached artifact or runs the generation pipeline
//! once and writes the result through the cache.

use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::auth::Session;
use crate::llm::{build_follow_up_email_prompt, build_question_prompt, build_summary_prompt};
use crate::profiles::SummaryProfile;
use crate::summary::{parse_action_items, ActionItem, StoredSummary, SummaryService};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SummaryState {
    Idle,
    Generating,
    Cached,
    Generated,
    Failed,
}

impl SummaryState {
    pub fn label(&self) -> &'static str {
        match self {
            SummaryState::Idle => "idle",
            SummaryState::Generating => "generating",
            SummaryState::Cached => "cached",
            SummaryState::Generated => "generated",
            SummaryState::Failed => "failed",
        }
    }
}

/// The meeting facts the pipeline needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MeetingContext {
    pub meeting_id: String,
    pub title: String,
    pub transcript: String,
    pub date: Option<String>,
    pub attendee_names: Vec<String>,
}

pub struct MeetingSession {
    service: Arc<SummaryService>,
    owner: Option<Session>,
    meeting: MeetingContext,
    current_type: Option<String>,
    state: SummaryState,
    content: String,
    action_items: Vec<ActionItem>,
}

impl MeetingSession {
    pub fn new(service: Arc<SummaryService>, owner: Option<Session>, meeting: MeetingContext) -> Self {
        Self {
            service,
            owner,
            meeting,
            current_type: None,
            state: SummaryState::Idle,
            content: String::new(),
            action_items: Vec::new(),
        }
    }

    pub fn meeting(&self) -> &MeetingContext {
        &self.meeting
    }

    pub fn state(&self) -> SummaryState {
        self.state
    }

    pub fn current_type(&self) -> Option<&str> {
        self.current_type.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn action_items(&self) -> &[ActionItem] {
        &self.action_items
    }

    /// Built-in types followed by custom profiles.
    pub fn summary_types(&self) -> Vec<SummaryProfile> {
        self.service.registry.list_all()
    }

    /// The user's default summary type.
    pub fn default_type_id(&self) -> String {
        self.service.registry.default_profile_id()
    }

    /// Mark `type_id` as in flight so a view can render the loading state
    /// before [`MeetingSession::select_type`] runs.
    pub fn begin_select(&mut self, type_id: &str) {
        self.current_type = Some(type_id.to_string());
        self.state = SummaryState::Generating;
    }

    /// Show the summary for `type_id`, generating it only on a cache miss.
    ///
    /// Failed generations are shown but never cached.
    pub async fn select_type(&mut self, type_id: &str) -> SummaryState {
        self.current_type = Some(type_id.to_string());
        let meeting_id = self.meeting.meeting_id.clone();

        if let Some(cached) = self
            .service
            .cache
            .load(self.owner.as_ref(), &meeting_id, type_id)
            .await
        {
            debug!("Using cached {} summary for meeting {}", type_id, meeting_id);
            self.action_items = cached.action_items();
            self.content = cached.content;
            self.state = SummaryState::Cached;
            return self.state;
        }

        self.state = SummaryState::Generating;
        info!("Generating {} summary for meeting {}", type_id, meeting_id);

        let framework = self.service.registry.framework_instruction(type_id);
        let date = self.meeting.date.as_deref();
        let prompt = build_summary_prompt(
            &self.meeting.transcript,
            type_id,
            date,
            Some(self.meeting.attendee_names.as_slice()),
            Some(framework.as_str()),
        );

        let generation = self.service.generator.generate(&prompt).await;

        if !generation.is_generated() {
            warn!(
                "Summary generation failed for meeting {} ({}): {:?}",
                meeting_id, type_id, generation.outcome
            );
            self.content = generation.text;
            self.action_items.clear();
            self.state = SummaryState::Failed;
            return self.state;
        }

        let action_items = parse_action_items(&generation.text);
        let stored = StoredSummary::new(generation.text, action_items.clone());
        self.service
            .cache
            .save(self.owner.as_ref(), &meeting_id, type_id, &stored)
            .await;

        self.content = stored.content;
        self.action_items = action_items;
        self.state = SummaryState::Generated;
        self.state
    }

    /// Answer a free-form question from the transcript.
    pub async fn ask(&self, question: &str) -> String {
        let prompt = build_question_prompt(&self.meeting.transcript, question);
        self.service.generator.answer(&prompt).await
    }

    /// Draft a follow-up email from the current action items.
    pub async fn follow_up_email(&self) -> String {
        let prompt = build_follow_up_email_prompt(
            &self.meeting.transcript,
            &self.meeting.title,
            &self.action_items,
        );
        self.service.generator.draft_email(&prompt).await
    }
}
