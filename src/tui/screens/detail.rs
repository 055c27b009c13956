//! Detail screen - summary, action items, transcript and Q&A for one meeting

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, Tabs, Wrap,
    },
};

use crate::config::Settings;
use crate::fathom::MeetingData;
use crate::profiles::SummaryProfile;
use crate::summary::{MeetingSession, SummaryState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Summary,
    ActionItems,
    Transcript,
    Ask,
    Email,
}

impl DetailTab {
    pub const ALL: [DetailTab; 5] = [
        Self::Summary,
        Self::ActionItems,
        Self::Transcript,
        Self::Ask,
        Self::Email,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Summary => "Summary",
            Self::ActionItems => "Action Items",
            Self::Transcript => "Transcript",
            Self::Ask => "Ask",
            Self::Email => "Follow-up Email",
        }
    }

    fn index(&self) -> usize {
        Self::ALL.iter().position(|t| t == self).unwrap_or(0)
    }
}

/// Detail screen state
pub struct DetailScreen {
    data: MeetingData,
    session: MeetingSession,
    types: Vec<SummaryProfile>,
    type_index: usize,
    tab: DetailTab,
    editing: bool,
    question: String,
    answers: Vec<(String, String)>,
    email: Option<String>,
    scroll_offset: usize,
    content_height: usize,
}

impl DetailScreen {
    pub fn new(data: MeetingData, session: MeetingSession) -> Self {
        let types = session.summary_types();
        let default_id = session.default_type_id();
        let type_index = types.iter().position(|p| p.id == default_id).unwrap_or(0);

        Self {
            data,
            session,
            types,
            type_index,
            tab: DetailTab::Summary,
            editing: false,
            question: String::new(),
            answers: Vec::new(),
            email: None,
            scroll_offset: 0,
            content_height: 0,
        }
    }

    pub fn tab(&self) -> DetailTab {
        self.tab
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn state(&self) -> SummaryState {
        self.session.state()
    }

    /// Id of the type highlighted in the selector.
    pub fn selected_type_id(&self) -> Option<String> {
        self.types.get(self.type_index).map(|p| p.id.clone())
    }

    fn selected_type_name(&self) -> &str {
        self.types
            .get(self.type_index)
            .map(|p| p.name.as_str())
            .unwrap_or("-")
    }

    pub fn next_type(&mut self) -> Option<String> {
        if self.types.is_empty() {
            return None;
        }
        self.type_index = (self.type_index + 1) % self.types.len();
        self.selected_type_id()
    }

    pub fn previous_type(&mut self) -> Option<String> {
        if self.types.is_empty() {
            return None;
        }
        self.type_index = (self.type_index + self.types.len() - 1) % self.types.len();
        self.selected_type_id()
    }

    pub fn next_tab(&mut self) {
        self.set_tab(DetailTab::ALL[(self.tab.index() + 1) % DetailTab::ALL.len()]);
    }

    pub fn previous_tab(&mut self) {
        let len = DetailTab::ALL.len();
        self.set_tab(DetailTab::ALL[(self.tab.index() + len - 1) % len]);
    }

    pub fn set_tab(&mut self, tab: DetailTab) {
        self.tab = tab;
        self.scroll_offset = 0;
    }

    /// Show the loading state for the highlighted type. Returns its id.
    pub fn begin_load(&mut self) -> Option<String> {
        let type_id = self.selected_type_id()?;
        self.session.begin_select(&type_id);
        Some(type_id)
    }

    /// Load or generate the summary for the highlighted type.
    pub async fn load_selected_type(&mut self) -> SummaryState {
        let Some(type_id) = self.selected_type_id() else {
            return self.session.state();
        };
        self.scroll_offset = 0;
        self.session.select_type(&type_id).await
    }

    pub fn start_question(&mut self) {
        self.set_tab(DetailTab::Ask);
        self.editing = true;
    }

    /// Key handling while typing a question. Returns a question on submit.
    pub fn handle_input_key(&mut self, key: KeyCode) -> Option<String> {
        match key {
            KeyCode::Char(c) => self.question.push(c),
            KeyCode::Backspace => {
                self.question.pop();
            }
            KeyCode::Esc => self.editing = false,
            KeyCode::Enter => {
                self.editing = false;
                let question = std::mem::take(&mut self.question);
                let question = question.trim();
                if !question.is_empty() {
                    return Some(question.to_string());
                }
            }
            _ => {}
        }
        None
    }

    pub async fn ask(&mut self, question: String) {
        let answer = self.session.ask(&question).await;
        self.answers.push((question, answer));
    }

    pub async fn draft_email(&mut self) {
        self.email = Some(self.session.follow_up_email().await);
        self.set_tab(DetailTab::Email);
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, settings: &Settings) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // Header
                Constraint::Length(3), // Tabs
                Constraint::Min(5),    // Content
                Constraint::Length(3), // Help
            ])
            .split(area);

        let state_color = match self.session.state() {
            SummaryState::Cached | SummaryState::Generated => Color::Green,
            SummaryState::Generating => Color::Yellow,
            SummaryState::Failed => Color::Red,
            SummaryState::Idle => Color::DarkGray,
        };

        let header_text = vec![
            Line::from(vec![Span::styled(
                self.data.title.as_str(),
                Style::default().fg(Color::White).bold(),
            )]),
            Line::from(vec![
                Span::styled(
                    self.data.date.clone().unwrap_or_else(|| "-".to_string()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" • "),
                Span::styled(self.data.duration.as_str(), Style::default().fg(Color::Cyan)),
                Span::raw(" • "),
                Span::styled(
                    format!("{} attendees", self.data.attendees.len()),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(" • "),
                Span::styled(
                    self.selected_type_name().to_string(),
                    Style::default().fg(Color::Magenta),
                ),
                Span::raw(" "),
                Span::styled(
                    format!("[{}]", self.session.state().label()),
                    Style::default().fg(state_color),
                ),
            ]),
        ];

        let header = Paragraph::new(header_text).block(
            Block::default()
                .title(" Meeting ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(header, chunks[0]);

        let tabs = Tabs::new(DetailTab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
            .select(self.tab.index())
            .block(Block::default().borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Yellow).bold());
        frame.render_widget(tabs, chunks[1]);

        let lines = self.content_lines(settings);
        self.content_height = lines.len();

        let content_area = chunks[2];
        let visible_height = content_area.height.saturating_sub(2) as usize;

        let content = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((self.scroll_offset as u16, 0))
            .block(
                Block::default()
                    .title(format!(" {} ", self.tab.title()))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            );
        frame.render_widget(content, content_area);

        if self.content_height > visible_height {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("↑"))
                .end_symbol(Some("↓"));

            let mut scrollbar_state = ScrollbarState::new(self.content_height)
                .position(self.scroll_offset)
                .viewport_content_length(visible_height);

            frame.render_stateful_widget(
                scrollbar,
                content_area.inner(Margin {
                    horizontal: 0,
                    vertical: 1,
                }),
                &mut scrollbar_state,
            );
        }

        let help = Paragraph::new(Line::from(vec![
            Span::styled(" Tab ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Tabs  "),
            Span::styled(" [/] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Summary type  "),
            Span::styled(" a ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Ask  "),
            Span::styled(" e ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Email  "),
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Scroll  "),
            Span::styled(" Esc ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Back"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }

    fn content_lines(&self, settings: &Settings) -> Vec<Line<'static>> {
        match self.tab {
            DetailTab::Summary => match self.session.state() {
                SummaryState::Idle => vec![Line::from("Select a summary type with [ or ].")],
                SummaryState::Generating => vec![Line::from("Generating summary...")],
                _ => text_lines(self.session.content()),
            },
            DetailTab::ActionItems => {
                let items = self.session.action_items();
                if items.is_empty() {
                    return vec![Line::from("No action items")];
                }
                items
                    .iter()
                    .map(|item| {
                        Line::from(vec![
                            Span::raw("☐ "),
                            Span::raw(item.text.clone()),
                            Span::raw("  "),
                            Span::styled(
                                item.assignee.clone(),
                                Style::default().fg(Color::Cyan),
                            ),
                        ])
                    })
                    .collect()
            }
            DetailTab::Transcript => {
                if self.data.lines.is_empty() {
                    return vec![Line::from("(No transcript available)")];
                }
                self.data
                    .lines
                    .iter()
                    .map(|line| {
                        if settings.tui.show_speakers {
                            Line::from(vec![
                                Span::styled(
                                    format!("[{}] ", line.timestamp),
                                    Style::default().fg(Color::DarkGray),
                                ),
                                Span::styled(
                                    format!("{}: ", line.speaker),
                                    Style::default().fg(Color::Yellow),
                                ),
                                Span::raw(line.text.clone()),
                            ])
                        } else {
                            Line::from(line.text.clone())
                        }
                    })
                    .collect()
            }
            DetailTab::Ask => {
                let mut lines = Vec::new();
                let prompt_style = if self.editing {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default().fg(Color::DarkGray)
                };
                let prompt = if self.editing {
                    format!("Question: {}█", self.question)
                } else {
                    "Press [a] to ask a question about this meeting".to_string()
                };
                lines.push(Line::from(Span::styled(prompt, prompt_style)));

                for (question, answer) in self.answers.iter().rev() {
                    lines.push(Line::from(""));
                    lines.push(Line::from(Span::styled(
                        format!("Q: {}", question),
                        Style::default().fg(Color::Cyan).bold(),
                    )));
                    lines.extend(text_lines(answer));
                }
                lines
            }
            DetailTab::Email => match self.email.as_deref() {
                Some(email) => text_lines(email),
                None => vec![Line::from("Press [e] to draft a follow-up email")],
            },
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        if self.scroll_offset < self.content_height.saturating_sub(1) {
            self.scroll_offset += 1;
        }
    }

    pub fn page_up(&mut self) {
        self.scroll_offset = self.scroll_offset.saturating_sub(10);
    }

    pub fn page_down(&mut self) {
        self.scroll_offset = (self.scroll_offset + 10).min(self.content_height.saturating_sub(1));
    }

    pub fn scroll_to_top(&mut self) {
        self.scroll_offset = 0;
    }

    pub fn scroll_to_bottom(&mut self) {
        self.scroll_offset = self.content_height.saturating_sub(1);
    }
}

fn text_lines(text: &str) -> Vec<Line<'static>> {
    text.lines().map(|l| Line::from(l.to_string())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fathom::{FathomMeeting, FathomSummary};
    use crate::llm::{GenerationClient, LlmProvider};
    use crate::profiles::ProfileRegistry;
    use crate::storage::MemoryStore;
    use crate::summary::{SummaryCache, SummaryService};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct Echo;

    #[async_trait]
    impl LlmProvider for Echo {
        async fn generate(&self, _prompt: &str) -> anyhow::Result<String> {
            Ok("# Summary\n- [ ] Send recap - Jackie".to_string())
        }
    }

    fn screen() -> DetailScreen {
        let store = Arc::new(MemoryStore::new());
        let service = Arc::new(SummaryService::new(
            ProfileRegistry::new(store.clone()),
            SummaryCache::local_only(store),
            GenerationClient::new(Arc::new(Echo)),
        ));
        let meeting = FathomMeeting {
            recording_id: 5,
            title: "Retro".to_string(),
            ..Default::default()
        };
        let data = MeetingData::from_platform(&meeting, &[], &FathomSummary::default());
        let session = MeetingSession::new(service, None, data.context());
        DetailScreen::new(data, session)
    }

    #[test]
    fn starts_on_default_type() {
        let screen = screen();
        assert_eq!(screen.selected_type_id().as_deref(), Some("General"));
        assert_eq!(screen.state(), SummaryState::Idle);
    }

    #[test]
    fn type_selector_wraps() {
        let mut screen = screen();
        assert_eq!(screen.previous_type().as_deref(), Some("Chronological"));
        assert_eq!(screen.previous_type().as_deref(), Some("Stand Up"));
        assert_eq!(screen.next_type().as_deref(), Some("Chronological"));
    }

    #[test]
    fn tabs_cycle_in_order() {
        let mut screen = screen();
        screen.previous_tab();
        assert_eq!(screen.tab(), DetailTab::Email);
        screen.next_tab();
        screen.next_tab();
        assert_eq!(screen.tab(), DetailTab::ActionItems);
    }

    #[test]
    fn question_input_submits_trimmed_text() {
        let mut screen = screen();
        screen.start_question();
        assert!(screen.is_editing());

        for c in " who? ".chars() {
            assert!(screen.handle_input_key(KeyCode::Char(c)).is_none());
        }
        assert_eq!(screen.handle_input_key(KeyCode::Enter).as_deref(), Some("who?"));
        assert!(!screen.is_editing());
    }

    #[tokio::test]
    async fn begin_load_shows_generating_until_loaded() {
        let mut screen = screen();
        assert_eq!(screen.next_type().as_deref(), Some("Sales"));
        assert_eq!(screen.begin_load().as_deref(), Some("Sales"));
        assert_eq!(screen.state(), SummaryState::Generating);

        assert_eq!(screen.load_selected_type().await, SummaryState::Generated);
        assert_eq!(screen.session.current_type(), Some("Sales"));
    }

    #[tokio::test]
    async fn loading_selected_type_populates_action_items() {
        let mut screen = screen();
        assert_eq!(screen.load_selected_type().await, SummaryState::Generated);
        assert_eq!(screen.session.action_items().len(), 1);

        screen.draft_email().await;
        assert_eq!(screen.tab(), DetailTab::Email);
        assert!(screen.email.is_some());
    }
}
