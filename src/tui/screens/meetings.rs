//! Meetings screen - list and search recorded meetings

use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

use crate::fathom::FathomMeeting;

/// Meetings screen state
pub struct MeetingsScreen {
    meetings: Vec<FathomMeeting>,
    next_cursor: Option<String>,
    state: ListState,
    search_mode: bool,
    search_query: String,
    filtered_indices: Vec<usize>,
}

impl Default for MeetingsScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl MeetingsScreen {
    pub fn new() -> Self {
        Self {
            meetings: Vec::new(),
            next_cursor: None,
            state: ListState::default(),
            search_mode: false,
            search_query: String::new(),
            filtered_indices: Vec::new(),
        }
    }

    /// Replace the list with a first page.
    pub fn set_meetings(&mut self, meetings: Vec<FathomMeeting>, next_cursor: Option<String>) {
        self.meetings = meetings;
        self.next_cursor = next_cursor;
        self.apply_filter();
    }

    /// Append a further page, keeping the selection.
    pub fn append_meetings(&mut self, meetings: Vec<FathomMeeting>, next_cursor: Option<String>) {
        let selected = self.state.selected();
        self.meetings.extend(meetings);
        self.next_cursor = next_cursor;
        self.apply_filter();
        if selected.is_some() && !self.filtered_indices.is_empty() {
            self.state.select(selected);
        }
    }

    pub fn next_cursor(&self) -> Option<&str> {
        self.next_cursor.as_deref().filter(|c| !c.is_empty())
    }

    pub fn is_searching(&self) -> bool {
        self.search_mode
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(5),    // List
                Constraint::Length(3), // Help
            ])
            .split(area);

        // Search bar
        let search_style = if self.search_mode {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default().fg(Color::DarkGray)
        };

        let search_text = if self.search_mode {
            format!("Search: {}█", self.search_query)
        } else if self.search_query.is_empty() {
            "Press [/] to search".to_string()
        } else {
            format!("Search: {}", self.search_query)
        };

        let search = Paragraph::new(search_text)
            .style(search_style)
            .block(Block::default().borders(Borders::ALL).title(" Search "));
        frame.render_widget(search, chunks[0]);

        // Meetings list
        let items: Vec<ListItem> = self
            .filtered_indices
            .iter()
            .map(|&i| {
                let meeting = &self.meetings[i];
                let duration = meeting
                    .duration_minutes()
                    .map(|m| format!("{} mins", m))
                    .unwrap_or_else(|| "? mins".to_string());
                let date = meeting.date().unwrap_or_else(|| "----------".to_string());
                let invitees = meeting.calendar_invitees.len();

                ListItem::new(Line::from(vec![
                    Span::styled(
                        truncate(&meeting.title, 36),
                        Style::default().fg(Color::White),
                    ),
                    Span::raw(" "),
                    Span::styled(date, Style::default().fg(Color::DarkGray)),
                    Span::raw(" "),
                    Span::styled(
                        format!("{:>8}", duration),
                        Style::default().fg(Color::Cyan),
                    ),
                    Span::raw(" "),
                    Span::styled(
                        format!("{} attendees", invitees),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]))
            })
            .collect();

        let more = if self.next_cursor().is_some() { "+" } else { "" };
        let list = List::new(items)
            .block(
                Block::default()
                    .title(format!(
                        " Meetings ({}{}) ",
                        self.filtered_indices.len(),
                        more
                    ))
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Blue)),
            )
            .highlight_style(
                Style::default()
                    .bg(Color::DarkGray)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("▶ ");

        frame.render_stateful_widget(list, chunks[1], &mut self.state);

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" ↑/↓ ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Navigate  "),
            Span::styled(" Enter ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Open  "),
            Span::styled(" / ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Search  "),
            Span::styled(" n ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" More  "),
            Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Refresh  "),
            Span::styled(" q ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[2]);
    }

    pub fn next(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(i) if i + 1 < self.filtered_indices.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    pub fn previous(&mut self) {
        if self.filtered_indices.is_empty() {
            return;
        }

        let i = match self.state.selected() {
            Some(0) | None => self.filtered_indices.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    pub fn selected(&self) -> Option<&FathomMeeting> {
        self.state
            .selected()
            .and_then(|i| self.filtered_indices.get(i))
            .map(|&i| &self.meetings[i])
    }

    pub fn start_search(&mut self) {
        self.search_mode = true;
    }

    pub fn handle_key(&mut self, key: KeyCode) {
        if !self.search_mode {
            return;
        }

        match key {
            KeyCode::Char(c) => {
                self.search_query.push(c);
                self.apply_filter();
            }
            KeyCode::Backspace => {
                self.search_query.pop();
                self.apply_filter();
            }
            KeyCode::Enter | KeyCode::Esc => {
                self.search_mode = false;
            }
            _ => {}
        }
    }

    fn apply_filter(&mut self) {
        let query = self.search_query.to_lowercase();
        self.filtered_indices = self
            .meetings
            .iter()
            .enumerate()
            .filter(|(_, m)| query.is_empty() || m.title.to_lowercase().contains(&query))
            .map(|(i, _)| i)
            .collect();

        // Reset selection
        if !self.filtered_indices.is_empty() {
            self.state.select(Some(0));
        } else {
            self.state.select(None);
        }
    }
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        format!("{:<width$}", s, width = max_len)
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meeting(id: u64, title: &str) -> FathomMeeting {
        FathomMeeting {
            recording_id: id,
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn search_filters_by_title_case_insensitively() {
        let mut screen = MeetingsScreen::new();
        screen.set_meetings(
            vec![meeting(1, "Weekly Stand Up"), meeting(2, "Acme discovery")],
            None,
        );

        screen.start_search();
        for c in "ACME".chars() {
            screen.handle_key(KeyCode::Char(c));
        }

        assert_eq!(screen.selected().map(|m| m.recording_id), Some(2));
        screen.handle_key(KeyCode::Enter);
        assert!(!screen.is_searching());
    }

    #[test]
    fn navigation_wraps_around() {
        let mut screen = MeetingsScreen::new();
        screen.set_meetings(vec![meeting(1, "a"), meeting(2, "b")], Some("c1".to_string()));

        screen.previous();
        assert_eq!(screen.selected().map(|m| m.recording_id), Some(2));
        screen.next();
        assert_eq!(screen.selected().map(|m| m.recording_id), Some(1));
        assert_eq!(screen.next_cursor(), Some("c1"));
    }

    #[test]
    fn appending_keeps_selection() {
        let mut screen = MeetingsScreen::new();
        screen.set_meetings(vec![meeting(1, "a"), meeting(2, "b")], Some("c1".to_string()));
        screen.next();

        screen.append_meetings(vec![meeting(3, "c")], None);

        assert_eq!(screen.selected().map(|m| m.recording_id), Some(2));
        assert!(screen.next_cursor().is_none());
    }
}
