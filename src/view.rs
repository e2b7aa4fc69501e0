//! Turns a `Session` into a description of what should be on screen.
//!
//! `render` is a pure function: it reads the session and returns a `Screen`
//! value. The terminal front end draws that value and nothing else, so the
//! screen can never show state the session does not hold.

use crate::navigation::Navigator;
use crate::note::NoteClass;
use crate::search::Coord;
use crate::session::{Focus, Session};
use crate::table::{COLUMN_COUNT, INTERVAL_COLUMN, LABEL_COLUMN};

/// Emphasis applied to a note cell, strongest last.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Emphasis {
    None,
    Highlight,
    Match,
    CurrentMatch,
}

/// One cell of a rendered table.
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub text: String,

    /// Letter of the note in this cell, used for colouring
    pub letter: Option<NoteClass>,

    pub emphasis: Emphasis,
}

impl Cell {
    fn plain(text: &str) -> Cell {
        Cell { text: text.to_string(), letter: None, emphasis: Emphasis::None }
    }
}

/// A rendered position table.
#[derive(Clone, Debug, PartialEq)]
pub struct TableView {
    pub title: String,
    pub focused: bool,
    pub header: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
    pub cursor: Coord,
}

/// Everything drawn in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Screen {
    pub title: String,
    pub tuning: Vec<Cell>,
    pub tables: Vec<TableView>,
    pub prompt: Option<String>,
    pub status: String,
    pub help: Option<Vec<String>>,
}

const HELP: &[&str] = &[
    "Navigation",
    "  h j k l / arrows   move the cursor",
    "  Tab / Shift+Tab    switch between stopped notes and harmonics",
    "  gg / G             first / last row",
    "  Ctrl+d / Ctrl+u    half page down / up",
    "  Ctrl+f / Ctrl+b    page down / up",
    "",
    "Search",
    "  /E4                every E4",
    "  /E                 every E, E♭ and E♯ in any octave",
    "  n / N              next / previous match",
    "  *                  highlight the note under the cursor",
    "  Esc                clear search and highlights",
    "",
    "Commands",
    "  :retune C2 D2 F2 G2 A2 C3 D3   retune (r opens this prompt)",
    "  :load <preset>                 load a preset tuning",
    "  :export <file>                 write both tables as Markdown",
    "  :help                          show this help",
    "  :quit                          quit (or q)",
];

/// Describe the whole screen for the current session state.
pub fn render(session: &Session) -> Screen {
    let tuning = session
        .tuning()
        .strings()
        .iter()
        .enumerate()
        .map(|(i, pitch)| Cell {
            text: format!("{}: {}", i + 1, pitch),
            letter: Some(pitch.root),
            emphasis: Emphasis::None,
        })
        .collect();

    let tables = [Focus::Stopped, Focus::Harmonics]
        .iter()
        .map(|&focus| render_table(session, focus))
        .collect();

    let help = if session.help_visible() {
        let mut lines: Vec<String> = HELP.iter().map(|l| l.to_string()).collect();
        let presets: Vec<&str> = session.presets().names().collect();
        if !presets.is_empty() {
            lines.push(String::new());
            lines.push(format!("Presets: {}", presets.join(", ")));
        }
        Some(lines)
    } else {
        None
    };

    Screen {
        title: session.name().to_string(),
        tuning,
        tables,
        prompt: session.prompt(),
        status: session.status().to_string(),
        help,
    }
}

fn render_table(session: &Session, focus: Focus) -> TableView {
    let nav = session.navigator(focus);
    let table = nav.table();

    let mut header = Vec::with_capacity(COLUMN_COUNT);
    header.push("Position".to_string());
    for (i, pitch) in session.tuning().strings().iter().enumerate() {
        header.push(format!("{} ({})", i + 1, pitch));
    }
    header.push("Interval".to_string());

    let rows = table
        .rows()
        .iter()
        .enumerate()
        .map(|(r, row)| {
            (0..COLUMN_COUNT)
                .map(|c| match c {
                    LABEL_COLUMN => Cell::plain(row.position.label),
                    INTERVAL_COLUMN => Cell::plain(row.position.interval),
                    _ => note_cell(nav, (r, c)),
                })
                .collect()
        })
        .collect();

    TableView {
        title: table.catalog().title().to_string(),
        focused: session.focus() == focus,
        header,
        rows,
        cursor: nav.cursor(),
    }
}

fn note_cell(nav: &Navigator, coord: Coord) -> Cell {
    let pitch = match nav.table().note_at(coord.0, coord.1) {
        Some(pitch) => pitch,
        None => return Cell::plain(""),
    };

    let search = nav.search();
    let emphasis = if search.current_coord() == Some(coord) {
        Emphasis::CurrentMatch
    } else if search.contains(coord) {
        Emphasis::Match
    } else if nav.is_highlighted(&pitch) {
        Emphasis::Highlight
    } else {
        Emphasis::None
    };

    Cell {
        text: pitch.to_string(),
        letter: Some(pitch.root),
        emphasis,
    }
}
