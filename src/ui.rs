use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthChar;

use crate::{
    app::App,
    scoring::CharClass,
    session::{SessionStatus, Snapshot},
};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

pub fn format_elapsed(secs: f64) -> String {
    format!("{secs:.1}")
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let snap = self.machine.snapshot();

        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);
        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let passage = Paragraph::new(Line::from(passage_spans(&snap))).wrap(Wrap { trim: false });
        // word wrap needs more rows than width / columns suggests
        let passage_lines = passage
            .line_count(max_chars_per_line)
            .clamp(1, u16::MAX as usize) as u16;

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .vertical_margin(VERTICAL_MARGIN)
            .constraints([
                Constraint::Length(1), // title
                Constraint::Length(1), // stats
                Constraint::Length(1), // padding
                Constraint::Length(passage_lines),
                Constraint::Length(1), // padding
                Constraint::Length(3), // input box
                Constraint::Min(0),    // instructions / results
                Constraint::Length(1), // legend
            ])
            .split(area);

        Paragraph::new(Span::styled(
            "Typing Speed Test",
            Style::default().patch(bold_style).fg(Color::Cyan),
        ))
        .alignment(Alignment::Center)
        .render(chunks[0], buf);

        Paragraph::new(Span::styled(
            format!(
                "Time: {}s   WPM: {}   Accuracy: {}%   Errors: {}",
                format_elapsed(snap.elapsed_secs),
                snap.stats.wpm,
                snap.stats.accuracy,
                snap.stats.errors
            ),
            bold_style,
        ))
        .alignment(Alignment::Center)
        .render(chunks[1], buf);

        passage
            .alignment(if passage_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .render(chunks[3], buf);

        render_input_box(&snap, chunks[5], buf);

        match snap.status {
            SessionStatus::Finished => {
                let results = vec![
                    Line::from(Span::styled(
                        "Test Complete!",
                        Style::default().patch(bold_style).fg(Color::Green),
                    )),
                    Line::from(vec![
                        Span::raw("Your typing speed: "),
                        Span::styled(format!("{} WPM", snap.stats.wpm), bold_style),
                    ]),
                    Line::from(vec![
                        Span::raw("Accuracy: "),
                        Span::styled(format!("{}%", snap.stats.accuracy), bold_style),
                    ]),
                    Line::from(vec![
                        Span::raw("Errors: "),
                        Span::styled(snap.stats.errors.to_string(), bold_style),
                    ]),
                ];
                Paragraph::new(results)
                    .alignment(Alignment::Center)
                    .render(chunks[6], buf);
            }
            _ if snap.typed_input.is_empty() => {
                Paragraph::new(Span::styled(
                    "Start typing the text above. The timer begins with your first keystroke.",
                    italic_style,
                ))
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true })
                .render(chunks[6], buf);
            }
            _ => {}
        }

        let legend = if snap.status == SessionStatus::Finished {
            "(r)etry / (n)ew text / (esc)ape"
        } else {
            "(←) retry / (→) new text / (esc)ape"
        };
        Paragraph::new(Span::styled(legend, italic_style))
            .style(Style::default().patch(dim_bold_style))
            .render(chunks[7], buf);
    }
}

fn passage_spans(snap: &Snapshot<'_>) -> Vec<Span<'static>> {
    let bold_style = Style::default().add_modifier(Modifier::BOLD);
    let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
    let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
    let dim_bold_style = Style::default()
        .patch(bold_style)
        .add_modifier(Modifier::DIM);
    let underlined_dim_bold_style = Style::default()
        .patch(dim_bold_style)
        .add_modifier(Modifier::UNDERLINED);

    snap.char_classes()
        .into_iter()
        .map(|(expected, class)| match class {
            CharClass::Correct => Span::styled(visible(expected), green_bold_style),
            // a mistyped space is invisible otherwise
            CharClass::Incorrect => Span::styled(
                match expected {
                    ' ' => "·".to_owned(),
                    c => visible(c),
                },
                red_bold_style,
            ),
            CharClass::Current => Span::styled(visible(expected), underlined_dim_bold_style),
            CharClass::Pending => Span::styled(visible(expected), dim_bold_style),
        })
        .collect()
}

/// Newlines and tabs get a glyph; the terminal would otherwise drop them.
fn visible(c: char) -> String {
    match c {
        '\n' => "↵".to_owned(),
        '\t' => "⇥".to_owned(),
        c => c.to_string(),
    }
}

fn render_input_box(snap: &Snapshot<'_>, area: Rect, buf: &mut Buffer) {
    let finished = snap.status == SessionStatus::Finished;
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if finished { "Input (done)" } else { "Input" })
        .border_style(if finished {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        });

    let inner_width = area.width.saturating_sub(2) as usize;
    let content = if snap.typed_input.is_empty() && !finished {
        Span::styled(
            "Start typing here...",
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        )
    } else {
        Span::styled(
            tail_fitting(
                &snap.typed_input.chars().map(visible).collect::<String>(),
                inner_width,
            ),
            if finished {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            },
        )
    };

    Paragraph::new(content).block(block).render(area, buf);
}

/// The longest suffix of `text` that fits in `width` terminal columns.
fn tail_fitting(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut start = text.len();
    for (idx, c) in text.char_indices().rev() {
        let w = c.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        start = idx;
    }
    text[start..].to_string()
}
