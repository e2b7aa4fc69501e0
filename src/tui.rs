//! Terminal front end using ratatui and crossterm
//!
//! `Keymap` turns key presses into session actions and `Display` draws a
//! rendered `Screen`. Neither looks at the session directly.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Row, Table, TableState},
};

use huiwei::navigation::Direction;
use huiwei::note::NoteClass;
use huiwei::session::{Action, Mode};
use huiwei::view::{Cell, Emphasis, Screen, TableView};

/// Decodes key presses, remembering a pending `g` for `gg`.
#[derive(Debug, Default)]
pub struct Keymap {
    pending_g: bool,
}

impl Keymap {
    /// Translate a key press given the session's current mode.
    pub fn translate(&mut self, key: KeyEvent, mode: &Mode) -> Option<Action> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        if *mode != Mode::Normal {
            self.pending_g = false;
            return match key.code {
                KeyCode::Enter => Some(Action::Confirm),
                KeyCode::Esc => Some(Action::Cancel),
                KeyCode::Backspace => Some(Action::Backspace),
                KeyCode::Char(c) if !ctrl => Some(Action::Input(c)),
                _ => None,
            };
        }

        let pending_g = std::mem::replace(&mut self.pending_g, false);
        let action = match key.code {
            KeyCode::Char('d') if ctrl => Action::HalfPageDown,
            KeyCode::Char('u') if ctrl => Action::HalfPageUp,
            KeyCode::Char('f') if ctrl => Action::PageDown,
            KeyCode::Char('b') if ctrl => Action::PageUp,
            KeyCode::Char('c') if ctrl => Action::Quit,
            _ if ctrl => return None,

            KeyCode::Char('g') if pending_g => Action::Top,
            KeyCode::Char('g') => {
                self.pending_g = true;
                return None;
            }

            KeyCode::Char('h') | KeyCode::Left => Action::Move(Direction::Left),
            KeyCode::Char('j') | KeyCode::Down => Action::Move(Direction::Down),
            KeyCode::Char('k') | KeyCode::Up => Action::Move(Direction::Up),
            KeyCode::Char('l') | KeyCode::Right => Action::Move(Direction::Right),
            KeyCode::Char('G') | KeyCode::End => Action::Bottom,
            KeyCode::Home => Action::Top,
            KeyCode::PageDown => Action::PageDown,
            KeyCode::PageUp => Action::PageUp,
            KeyCode::Tab | KeyCode::BackTab => Action::SwitchTable,
            KeyCode::Char('/') => Action::StartSearch,
            KeyCode::Char(':') => Action::StartCommand,
            KeyCode::Char('r') => Action::StartRetune,
            KeyCode::Char('n') => Action::NextMatch,
            KeyCode::Char('N') => Action::PrevMatch,
            KeyCode::Char('*') => Action::HighlightCurrent,
            KeyCode::Char('?') => Action::ShowHelp,
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Esc => Action::Clear,
            _ => return None,
        };

        Some(action)
    }
}

fn letter_color(letter: NoteClass) -> Color {
    match letter {
        NoteClass::C => Color::Red,
        NoteClass::D => Color::Green,
        NoteClass::E => Color::Yellow,
        NoteClass::F => Color::Blue,
        NoteClass::G => Color::Magenta,
        NoteClass::A => Color::Cyan,
        NoteClass::B => Color::White,
    }
}

fn cell_style(cell: &Cell) -> Style {
    let color = match cell.letter {
        Some(letter) => letter_color(letter),
        None => return Style::default().fg(Color::White),
    };

    match cell.emphasis {
        Emphasis::None => Style::default().fg(color),
        Emphasis::Highlight => Style::default().fg(color).bold().underlined(),
        Emphasis::Match => Style::default().fg(Color::Black).bg(color).bold(),
        Emphasis::CurrentMatch => Style::default().fg(Color::Black).bg(color).bold().underlined(),
    }
}

/// Terminal display state that survives between frames.
#[derive(Debug, Default)]
pub struct Display {
    tables: [TableState; 2],
    viewport: usize,
}

impl Display {
    /// Table rows visible in the last drawn frame.
    pub fn viewport(&self) -> usize {
        self.viewport
    }

    /// Draw one frame.
    pub fn draw(&mut self, frame: &mut Frame, screen: &Screen) {
        let layout = Layout::vertical([
            Constraint::Length(3), // Tuning
            Constraint::Min(8),    // Tables
            Constraint::Length(1), // Prompt
            Constraint::Length(1), // Status
        ])
        .split(frame.area());

        let mut spans = vec![
            Span::styled(screen.title.clone(), Style::default().fg(Color::Cyan).bold()),
            Span::raw("  |  "),
        ];
        for cell in &screen.tuning {
            spans.push(Span::styled(cell.text.clone(), cell_style(cell)));
            spans.push(Span::raw("  "));
        }
        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("huiwei"));
        frame.render_widget(header, layout[0]);

        let areas = Layout::vertical([Constraint::Fill(1), Constraint::Fill(1)]).split(layout[1]);
        // Borders and the header row.
        self.viewport = areas[0].height.saturating_sub(3).max(1) as usize;
        for ((view, state), area) in screen.tables.iter().zip(self.tables.iter_mut()).zip(areas.iter()) {
            draw_table(frame, *area, view, state);
        }

        let prompt = screen.prompt.clone().unwrap_or_default();
        frame.render_widget(Paragraph::new(prompt), layout[2]);
        frame.render_widget(
            Paragraph::new(screen.status.clone()).style(Style::default().reversed()),
            layout[3],
        );

        if let Some(lines) = &screen.help {
            draw_help(frame, lines);
        }
    }
}

fn draw_table(frame: &mut Frame, area: Rect, view: &TableView, state: &mut TableState) {
    let (cursor_row, cursor_column) = view.cursor;

    let rows: Vec<Row> = view
        .rows
        .iter()
        .enumerate()
        .map(|(r, cells)| {
            Row::new(cells.iter().enumerate().map(|(c, cell)| {
                let mut style = cell_style(cell);
                if view.focused && (r, c) == (cursor_row, cursor_column) {
                    style = style.reversed();
                }
                ratatui::widgets::Cell::from(cell.text.clone()).style(style)
            }))
        })
        .collect();

    let mut widths = vec![Constraint::Length(11)];
    widths.extend(std::iter::repeat(Constraint::Length(9)).take(view.header.len() - 2));
    widths.push(Constraint::Min(10));

    let border = if view.focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let table = Table::new(rows, widths)
        .header(Row::new(view.header.clone()).style(Style::default().bold()))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border)
                .title(view.title.clone()),
        );

    state.select(Some(cursor_row));
    frame.render_stateful_widget(table, area, state);
}

fn draw_help(frame: &mut Frame, lines: &[String]) {
    let area = frame.area();
    let width = 72.min(area.width);
    let height = (lines.len() as u16 + 2).min(area.height);
    let popup = Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    };

    let text: Vec<Line> = lines.iter().map(|l| Line::from(l.as_str())).collect();
    frame.render_widget(Clear, popup);
    frame.render_widget(
        Paragraph::new(text).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help (any key closes)"),
        ),
        popup,
    );
}
