use crate::input::TextHost;
use crate::keys::{ComposerAction, KeyBindings};
use crate::render::{PickerWidget, SuggestionMenuWidget, TuiTheme};
use crate::session::{ChatSession, InputEvent, Overlay, SessionOutcome};
use anyhow::Result;
use crossterm::event::{
    self, DisableBracketedPaste, DisableFocusChange, DisableMouseCapture, EnableBracketedPaste,
    EnableFocusChange, EnableMouseCapture, Event, KeyEventKind, MouseButton, MouseEventKind,
};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget, Wrap};
use ratatui::{Frame, Terminal, TerminalOptions, Viewport};
use std::io;
use std::time::Duration;

const INLINE_VIEWPORT_HEIGHT: u16 = 18;
const PROMPT: &str = "> ";
const HELP_LINE: &str = " Ctrl+C exit | Ctrl+E emoji | Enter/Tab accept | Esc dismiss";

/// Restores the terminal on drop, including on panic unwinds.
struct TerminalGuard {
    mouse_capture: bool,
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), DisableFocusChange, DisableBracketedPaste);
        if self.mouse_capture {
            let _ = crossterm::execute!(io::stdout(), DisableMouseCapture);
        }
        let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Show);
    }
}

/// Run the composer until the exit binding is pressed.
///
/// `on_submit` receives every sent message and returns the line to print into
/// the transcript above the composer.
pub fn run_composer<F>(
    session: &mut ChatSession,
    bindings: &KeyBindings,
    theme: &TuiTheme,
    mouse_capture: bool,
    mut on_submit: F,
) -> Result<()>
where
    F: FnMut(&str) -> Result<String>,
{
    let prev_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = crossterm::execute!(io::stdout(), crossterm::cursor::Show);
        prev_hook(info);
    }));

    enable_raw_mode()?;
    let _guard = TerminalGuard { mouse_capture };
    crossterm::execute!(io::stdout(), EnableFocusChange, EnableBracketedPaste)?;
    if mouse_capture {
        crossterm::execute!(io::stdout(), EnableMouseCapture)?;
    }
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::with_options(
        backend,
        TerminalOptions {
            viewport: Viewport::Inline(INLINE_VIEWPORT_HEIGHT),
        },
    )?;

    let mut info_line: Option<String> = None;
    loop {
        terminal.draw(|frame| draw_composer(frame, session, theme, info_line.as_deref()))?;

        if !event::poll(Duration::from_millis(33))? {
            continue;
        }
        let input_event = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match bindings.translate(key) {
                ComposerAction::Exit => break,
                ComposerAction::TogglePicker => InputEvent::TogglePicker,
                ComposerAction::Key(key) => InputEvent::Key(key),
            },
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved => InputEvent::MouseMove {
                    column: mouse.column,
                    row: mouse.row,
                },
                MouseEventKind::Down(MouseButton::Left) => InputEvent::MouseDown {
                    column: mouse.column,
                    row: mouse.row,
                },
                _ => continue,
            },
            Event::FocusGained => InputEvent::FocusGained,
            Event::FocusLost => InputEvent::FocusLost,
            Event::Paste(text) => InputEvent::Paste(text),
            // The next draw recomputes the input area.
            _ => continue,
        };
        info_line = None;
        if let SessionOutcome::Submitted(text) = session.handle(input_event) {
            match on_submit(&text) {
                Ok(echo) => insert_wrapped_lines_above(&mut terminal, &[Line::from(echo)])?,
                Err(err) => info_line = Some(format!("send failed: {err}")),
            }
        }
    }
    Ok(())
}

/// Separator, prompt line, status line and the active overlay. The overlay
/// is confined to the rows above the separator.
fn draw_composer(
    frame: &mut Frame,
    session: &mut ChatSession,
    theme: &TuiTheme,
    info_line: Option<&str>,
) {
    let area = frame.area();
    if area.width < 4 || area.height < 4 {
        return;
    }
    let input_y = area.y + area.height - 2;
    let prompt_width = PROMPT.len() as u16;
    let input_area = Rect::new(
        area.x + prompt_width,
        input_y,
        area.width.saturating_sub(prompt_width),
        1,
    );
    session.relayout(input_area);

    let sep_area = Rect::new(area.x, input_y - 1, area.width, 1);
    frame.render_widget(
        Paragraph::new(Span::styled(
            "\u{2500}".repeat(area.width as usize),
            Style::default().fg(Color::DarkGray),
        )),
        sep_area,
    );
    frame.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(
                PROMPT,
                Style::default()
                    .fg(theme.primary)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(session.input().value().to_string()),
        ])),
        Rect::new(area.x, input_y, area.width, 1),
    );
    let caret_x = input_area
        .x
        .saturating_add(session.input().caret_column())
        .min(area.x + area.width - 1);
    frame.set_cursor_position((caret_x, input_y));

    let status = match info_line {
        Some(message) => Span::styled(format!(" {message}"), Style::default().fg(theme.error)),
        None => Span::styled(HELP_LINE, Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(
        Paragraph::new(Line::from(status)),
        Rect::new(area.x, input_y + 1, area.width, 1),
    );

    session.set_viewport(Rect::new(area.x, area.y, area.width, input_y - 1 - area.y));
    match session.overlay() {
        Some(Overlay::Menu(overlay)) => {
            if let Some(state) = session.engine().menu() {
                frame.render_widget(SuggestionMenuWidget { state, theme }, overlay);
            }
        }
        Some(Overlay::Picker(overlay)) => {
            frame.render_widget(
                PickerWidget {
                    panel: session.picker(),
                    theme,
                },
                overlay,
            );
        }
        None => {}
    }
}

fn wrapped_line_height(line: &Line<'_>, width: u16) -> u16 {
    if width == 0 {
        return 0;
    }
    let width = width as usize;
    let content_width = line.width().max(1);
    let rows = (content_width.saturating_sub(1) / width) + 1;
    u16::try_from(rows).unwrap_or(u16::MAX)
}

/// Print transcript lines into native scrollback above the inline viewport.
fn insert_wrapped_lines_above(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    lines: &[Line<'static>],
) -> Result<()> {
    if lines.is_empty() {
        return Ok(());
    }
    let viewport_width = terminal.size()?.width.max(1);
    let height = lines
        .iter()
        .map(|line| wrapped_line_height(line, viewport_width) as u32)
        .sum::<u32>()
        .min(u16::MAX as u32) as u16;
    if height == 0 {
        return Ok(());
    }
    terminal.insert_before(height, |buf| {
        let area = buf.area;
        let bottom = area.y.saturating_add(area.height);
        let mut y = area.y;
        for line in lines {
            if y >= bottom {
                break;
            }
            let logical_height = wrapped_line_height(line, area.width).max(1);
            let render_height = logical_height.min(bottom.saturating_sub(y));
            let line_area = Rect::new(area.x, y, area.width, render_height);
            Paragraph::new(line.clone())
                .wrap(Wrap { trim: false })
                .render(line_area, buf);
            y = y.saturating_add(logical_height);
        }
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use streamchat_core::AppConfig;

    fn screen_rows(terminal: &Terminal<TestBackend>) -> Vec<String> {
        let buf = terminal.backend().buffer();
        (0..buf.area.height)
            .map(|y| {
                (0..buf.area.width)
                    .map(|x| buf[(x, y)].symbol())
                    .collect::<String>()
            })
            .collect()
    }

    #[test]
    fn draws_prompt_and_menu_above_the_separator() {
        let mut cfg = AppConfig::default();
        cfg.roster = vec!["alice".to_string(), "albert".to_string()];
        let (mut session, _) = ChatSession::from_config(&cfg);
        for ch in "@al".chars() {
            session.handle(InputEvent::Key(crate::keys::Key::Char(ch)));
        }
        let theme = TuiTheme::from_config(&cfg.theme);
        let mut terminal = Terminal::new(TestBackend::new(40, 12)).expect("terminal");
        terminal
            .draw(|frame| draw_composer(frame, &mut session, &theme, None))
            .expect("draw");

        let rows = screen_rows(&terminal);
        assert!(rows[10].starts_with("> @al"));
        assert!(rows[9].starts_with('\u{2500}'));
        let Some(Overlay::Menu(area)) = session.overlay() else {
            panic!("menu should be open");
        };
        assert!(area.bottom() <= 9);
        assert!(rows[usize::from(area.y) + 1].contains("alice"));
    }

    #[test]
    fn wrapped_height_counts_rows() {
        assert_eq!(wrapped_line_height(&Line::from("abcdef"), 3), 2);
        assert_eq!(wrapped_line_height(&Line::from("abc"), 3), 1);
        assert_eq!(wrapped_line_height(&Line::from(""), 3), 1);
        assert_eq!(wrapped_line_height(&Line::from("abc"), 0), 0);
    }
}
