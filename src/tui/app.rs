//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{prelude::*, widgets::Paragraph};
use std::sync::Arc;
use tracing::{error, warn};

use crate::auth::{Session, SessionStore};
use crate::config::Settings;
use crate::fathom::{FathomClient, FathomMeeting};
use crate::storage::Database;
use crate::summary::{MeetingSession, SummaryService, SummaryState};
use crate::tui::screens::{DetailScreen, MeetingsScreen};
use crate::tui::widgets::HelpPopup;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Meetings,
    Detail,
}

/// Slow work queued by a key press and run on a later update tick, so the
/// status line is drawn first.
enum PendingAction {
    LoadMeetings,
    LoadMoreMeetings(String),
    OpenMeeting(Box<FathomMeeting>),
    LoadSummaryType,
    Ask(String),
    DraftEmail,
}

/// Main application state
pub struct App {
    settings: Settings,
    fathom: FathomClient,
    service: Option<Arc<SummaryService>>,
    owner: Option<Session>,
    current_screen: AppScreen,
    show_help: bool,

    // Screen states
    meetings: MeetingsScreen,
    detail: Option<DetailScreen>,

    pending: Option<PendingAction>,
    defer_pending: bool,
    status: Option<String>,
}

impl App {
    /// Create a new app instance
    pub fn new(settings: Settings) -> Result<Self> {
        let store = Arc::new(Database::open(&settings)?);
        let fathom = FathomClient::from_settings(&settings.fathom)?;
        let owner = SessionStore::new(store.clone()).load();

        let mut status = None;
        let service = match SummaryService::from_settings(&settings, store) {
            Ok(service) => Some(Arc::new(service)),
            Err(e) => {
                warn!("Summaries unavailable: {:#}", e);
                status = Some(format!("Summaries unavailable: {:#}", e));
                None
            }
        };

        let mut app = Self {
            settings,
            fathom,
            service,
            owner,
            current_screen: AppScreen::Meetings,
            show_help: false,
            meetings: MeetingsScreen::new(),
            detail: None,
            pending: None,
            defer_pending: false,
            status,
        };
        app.queue(PendingAction::LoadMeetings, "Loading meetings...");
        Ok(app)
    }

    /// Draw the current screen
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(5), Constraint::Length(1)])
            .split(area);

        match (self.current_screen, self.detail.as_mut()) {
            (AppScreen::Detail, Some(detail)) => {
                detail.draw(frame, chunks[0], &self.settings);
            }
            _ => {
                self.meetings.draw(frame, chunks[0]);
            }
        }

        let status = match (&self.status, &self.owner) {
            (Some(message), _) => message.clone(),
            (None, Some(owner)) => format!("Signed in as {}", owner.user_id),
            (None, None) => "Not signed in (summaries cached on this device)".to_string(),
        };
        frame.render_widget(
            Paragraph::new(status).style(Style::default().fg(Color::DarkGray)),
            chunks[1],
        );

        // Draw help popup if active
        if self.show_help {
            HelpPopup::draw(frame, area, self.current_screen);
        }
    }

    /// Whether keys should go to a text input instead of navigation
    pub fn is_editing(&self) -> bool {
        match self.current_screen {
            AppScreen::Meetings => self.meetings.is_searching(),
            AppScreen::Detail => self.detail.as_ref().is_some_and(|d| d.is_editing()),
        }
    }

    /// Handle key input
    pub async fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match self.current_screen {
            AppScreen::Meetings => self.handle_meetings_key(key),
            AppScreen::Detail => self.handle_detail_key(key),
        }

        Ok(())
    }

    /// Handle meetings key input
    fn handle_meetings_key(&mut self, key: KeyCode) {
        if self.meetings.is_searching() {
            self.meetings.handle_key(key);
            return;
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.meetings.previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.meetings.next();
            }
            KeyCode::Enter => {
                if let Some(meeting) = self.meetings.selected().cloned() {
                    if self.service.is_none() {
                        self.status = Some(
                            "Summaries unavailable: set llm.api_key or STOKEMEET_GEMINI_API_KEY"
                                .to_string(),
                        );
                        return;
                    }
                    let message = format!("Loading {}...", meeting.title);
                    self.queue(PendingAction::OpenMeeting(Box::new(meeting)), &message);
                }
            }
            KeyCode::Char('/') => {
                self.meetings.start_search();
            }
            KeyCode::Char('n') => match self.meetings.next_cursor() {
                Some(cursor) => {
                    let cursor = cursor.to_string();
                    self.queue(PendingAction::LoadMoreMeetings(cursor), "Loading more meetings...");
                }
                None => self.status = Some("No more meetings".to_string()),
            },
            KeyCode::Char('r') => {
                self.queue(PendingAction::LoadMeetings, "Loading meetings...");
            }
            _ => {}
        }
    }

    /// Handle detail key input
    fn handle_detail_key(&mut self, key: KeyCode) {
        let Some(detail) = self.detail.as_mut() else {
            return;
        };

        if detail.is_editing() {
            if let Some(question) = detail.handle_input_key(key) {
                self.queue(PendingAction::Ask(question), "Thinking...");
            }
            return;
        }

        match key {
            KeyCode::Tab | KeyCode::Right => detail.next_tab(),
            KeyCode::BackTab | KeyCode::Left => detail.previous_tab(),
            KeyCode::Char(']') => {
                if detail.next_type().is_some() {
                    self.queue_summary();
                }
            }
            KeyCode::Char('[') => {
                if detail.previous_type().is_some() {
                    self.queue_summary();
                }
            }
            KeyCode::Char('a') => detail.start_question(),
            KeyCode::Char('e') => {
                self.queue(PendingAction::DraftEmail, "Drafting follow-up email...");
            }
            KeyCode::Up | KeyCode::Char('k') => detail.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => detail.scroll_down(),
            KeyCode::PageUp => detail.page_up(),
            KeyCode::PageDown => detail.page_down(),
            KeyCode::Home | KeyCode::Char('g') => detail.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => detail.scroll_to_bottom(),
            _ => {}
        }
    }

    fn queue_summary(&mut self) {
        let Some(type_id) = self.detail.as_mut().and_then(|d| d.begin_load()) else {
            return;
        };
        let message = format!("Loading {} summary...", type_id);
        self.queue(PendingAction::LoadSummaryType, &message);
    }

    fn queue(&mut self, action: PendingAction, message: &str) {
        self.pending = Some(action);
        self.defer_pending = true;
        self.status = Some(message.to_string());
    }

    /// Handle back navigation
    pub fn handle_back(&mut self) {
        if self.show_help {
            self.show_help = false;
        } else if self.current_screen == AppScreen::Detail {
            self.current_screen = AppScreen::Meetings;
            self.detail = None;
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.current_screen == AppScreen::Meetings && !self.show_help
    }

    /// Toggle help popup
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Run at most one pending action per tick
    pub async fn update(&mut self) -> Result<()> {
        if std::mem::take(&mut self.defer_pending) {
            return Ok(());
        }

        let Some(action) = self.pending.take() else {
            return Ok(());
        };

        self.status = None;
        match action {
            PendingAction::LoadMeetings => match self.fathom.list_meetings(None).await {
                Ok(page) => self.meetings.set_meetings(page.items, page.next_cursor),
                Err(e) => self.report("Failed to load meetings", &e),
            },
            PendingAction::LoadMoreMeetings(cursor) => {
                match self.fathom.list_meetings(Some(&cursor)).await {
                    Ok(page) => self.meetings.append_meetings(page.items, page.next_cursor),
                    Err(e) => self.report("Failed to load meetings", &e),
                }
            }
            PendingAction::OpenMeeting(meeting) => self.open_meeting(&meeting).await,
            PendingAction::LoadSummaryType => {
                if let Some(detail) = self.detail.as_mut() {
                    if detail.load_selected_type().await == SummaryState::Failed {
                        self.status = Some("Summary generation failed".to_string());
                    }
                }
            }
            PendingAction::Ask(question) => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.ask(question).await;
                }
            }
            PendingAction::DraftEmail => {
                if let Some(detail) = self.detail.as_mut() {
                    detail.draft_email().await;
                }
            }
        }

        Ok(())
    }

    /// Open a meeting and load its default summary type
    async fn open_meeting(&mut self, meeting: &FathomMeeting) {
        let Some(service) = self.service.clone() else {
            return;
        };

        match self.fathom.load_meeting_data(meeting).await {
            Ok(data) => {
                let session = MeetingSession::new(service, self.owner.clone(), data.context());
                self.detail = Some(DetailScreen::new(data, session));
                self.current_screen = AppScreen::Detail;
                self.queue_summary();
            }
            Err(e) => self.report("Failed to load meeting", &e),
        }
    }

    fn report(&mut self, what: &str, e: &dyn std::fmt::Display) {
        error!("{}: {}", what, e);
        self.status = Some(format!("{}: {}", what, e));
    }
}
