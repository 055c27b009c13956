//! Help popup widget

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::tui::AppScreen;

/// Help popup that shows keyboard shortcuts
pub struct HelpPopup;

impl HelpPopup {
    pub fn draw(frame: &mut Frame, area: Rect, screen: AppScreen) {
        // Calculate popup area (centered, 60% width, 70% height)
        let popup_width = (area.width as f32 * 0.6) as u16;
        let popup_height = (area.height as f32 * 0.7) as u16;
        let popup_area = Rect {
            x: area.x + (area.width - popup_width) / 2,
            y: area.y + (area.height - popup_height) / 2,
            width: popup_width,
            height: popup_height,
        };

        // Clear the area behind the popup
        frame.render_widget(Clear, popup_area);

        let (title, shortcuts) = Self::shortcuts(screen);

        let mut help_text = vec![
            Line::from(Span::styled(title, Style::default().fg(Color::Cyan).bold())),
            Line::from(""),
        ];
        help_text.extend(shortcuts.iter().map(|(key, action)| {
            Line::from(vec![
                Span::styled(format!("{:<8}", key), Style::default().fg(Color::Yellow)),
                Span::raw(*action),
            ])
        }));
        help_text.push(Line::from(""));
        help_text.push(Line::from(Span::styled(
            "Press any key to close",
            Style::default().fg(Color::DarkGray),
        )));

        let help = Paragraph::new(help_text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Cyan))
                .style(Style::default().bg(Color::Black)),
        );

        frame.render_widget(help, popup_area);
    }

    fn shortcuts(screen: AppScreen) -> (&'static str, &'static [(&'static str, &'static str)]) {
        match screen {
            AppScreen::Meetings => ("Meetings Shortcuts", MEETINGS_SHORTCUTS),
            AppScreen::Detail => ("Meeting Shortcuts", DETAIL_SHORTCUTS),
        }
    }
}

const MEETINGS_SHORTCUTS: &[(&str, &str)] = &[
    ("↑/k", "Move up"),
    ("↓/j", "Move down"),
    ("Enter", "Open meeting"),
    ("/", "Search meetings"),
    ("n", "Load more meetings"),
    ("r", "Refresh"),
    ("?", "Show this help"),
    ("q", "Quit application"),
];

const DETAIL_SHORTCUTS: &[(&str, &str)] = &[
    ("Tab", "Next tab"),
    ("S-Tab", "Previous tab"),
    ("]", "Next summary type"),
    ("[", "Previous summary type"),
    ("a", "Ask a question"),
    ("e", "Draft follow-up email"),
    ("↑/↓", "Scroll"),
    ("g/G", "Go to top/bottom"),
    ("Esc", "Back to meetings"),
];
