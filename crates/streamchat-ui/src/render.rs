use crate::menu::MenuState;
use crate::picker::PickerPanel;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};
use streamchat_core::{Candidate, CandidateKind, ThemeConfig};
use unicode_width::UnicodeWidthStr;

use crate::layout::{CATEGORY_CELL_WIDTH, ENTRY_CELL_WIDTH};

const EMOTE_MARK: &str = "✦";

fn parse_theme_color(name: &str) -> Color {
    match name.to_ascii_lowercase().as_str() {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "gray" | "grey" => Color::Gray,
        "darkgray" | "darkgrey" => Color::DarkGray,
        "lightred" => Color::LightRed,
        "lightgreen" => Color::LightGreen,
        "lightyellow" => Color::LightYellow,
        "lightblue" => Color::LightBlue,
        "lightmagenta" => Color::LightMagenta,
        "lightcyan" => Color::LightCyan,
        _ => Color::Cyan,
    }
}

#[derive(Debug, Clone)]
pub struct TuiTheme {
    pub primary: Color,
    pub secondary: Color,
    pub error: Color,
}

impl Default for TuiTheme {
    fn default() -> Self {
        Self {
            primary: Color::Cyan,
            secondary: Color::Yellow,
            error: Color::Red,
        }
    }
}

impl TuiTheme {
    pub fn from_config(theme: &ThemeConfig) -> Self {
        Self {
            primary: parse_theme_color(&theme.primary),
            secondary: parse_theme_color(&theme.secondary),
            error: parse_theme_color(&theme.error),
        }
    }
}

/// Glyph drawn before an entry: the emoji itself, `@`, or a mark for emotes
/// whose image cannot be shown in a terminal.
fn glyph(candidate: &Candidate) -> &str {
    match candidate.kind() {
        CandidateKind::Emoji => candidate.preview(),
        CandidateKind::Mention => "@",
        CandidateKind::Emote => EMOTE_MARK,
    }
}

/// Pad `text` with spaces to `width` display columns.
fn pad(text: &str, width: usize) -> String {
    let used = text.width();
    format!("{text}{}", " ".repeat(width.saturating_sub(used)))
}

pub struct SuggestionMenuWidget<'a> {
    pub state: &'a MenuState,
    pub theme: &'a TuiTheme,
}

impl Widget for SuggestionMenuWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let mut lines: Vec<Line<'static>> = self
            .state
            .displayed
            .iter()
            .enumerate()
            .map(|(idx, candidate)| {
                let row = format!(" {} {}", pad(glyph(candidate), 2), candidate.display_text());
                let style = if idx == self.state.selected {
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::REVERSED)
                } else {
                    Style::default().fg(Color::White)
                };
                Line::from(Span::styled(row, style))
            })
            .collect();
        if self.state.more_available {
            lines.push(Line::from(Span::styled(
                " ...",
                Style::default().fg(Color::DarkGray),
            )));
        }
        Paragraph::new(lines)
            .block(Block::bordered().border_style(Style::default().fg(Color::DarkGray)))
            .render(area, buf);
    }
}

pub struct PickerWidget<'a> {
    pub panel: &'a PickerPanel,
    pub theme: &'a TuiTheme,
}

impl Widget for PickerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        Clear.render(area, buf);
        let panel = self.panel;
        let dim = Style::default().fg(Color::DarkGray);

        let search = if panel.search().is_empty() {
            Line::from(Span::styled(" search…", dim))
        } else {
            Line::from(vec![
                Span::styled(" / ", Style::default().fg(self.theme.secondary)),
                Span::raw(panel.search().to_string()),
            ])
        };

        let highlighted = panel.highlighted_categories();
        let strip: Vec<Span<'static>> = panel
            .categories()
            .iter()
            .enumerate()
            .map(|(idx, category)| {
                let style = if highlighted.contains(&idx) {
                    Style::default()
                        .fg(self.theme.primary)
                        .add_modifier(Modifier::UNDERLINED)
                } else {
                    dim
                };
                Span::styled(pad(&category.icon, usize::from(CATEGORY_CELL_WIDTH)), style)
            })
            .collect();

        let entries = panel.visible_entries();
        let mut lines = vec![search, Line::from(strip)];
        let visible_rows = entries
            .chunks(panel.columns())
            .enumerate()
            .skip(panel.scroll_row())
            .take(panel.rows());
        for (grid_row, row) in visible_rows {
            let row_start = grid_row * panel.columns();
            let spans: Vec<Span<'static>> = row
                .iter()
                .enumerate()
                .map(|(offset, candidate)| {
                    let index = row_start + offset;
                    let style = if index == panel.cursor() {
                        Style::default().add_modifier(Modifier::REVERSED)
                    } else {
                        Style::default()
                    };
                    Span::styled(
                        format!(" {}", pad(glyph(candidate), usize::from(ENTRY_CELL_WIDTH) - 1)),
                        style,
                    )
                })
                .collect();
            lines.push(Line::from(spans));
        }
        if entries.is_empty() {
            lines.push(Line::from(Span::styled(" no matches", dim)));
        }

        let title = panel
            .selected_category()
            .filter(|_| !panel.is_searching())
            .map(|category| format!(" {} ", category.name))
            .unwrap_or_else(|| " search ".to_string());
        let footer = entries
            .get(panel.cursor())
            .map(|candidate| format!(" {} ", candidate.text()))
            .unwrap_or_default();
        Paragraph::new(lines)
            .block(
                Block::bordered()
                    .border_style(Style::default().fg(self.theme.primary))
                    .title(title)
                    .title_bottom(footer),
            )
            .render(area, buf);
    }
}
