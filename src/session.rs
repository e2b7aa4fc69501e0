//! The interactive session: two navigators, focus and the modal input line.
//!
//! The session starts in Normal mode. `/` and `:` open a search or command
//! prompt; Enter dispatches the prompt text and Esc discards it, and both
//! return to Normal. Every input event is handled completely by one call to
//! `Session::apply`, after which the caller renders the session again.

use std::path::Path;

use log::info;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::export;
use crate::navigation::{Direction, Navigator};
use crate::preset::Presets;
use crate::table::{PositionTable, Tuning};

/// Name given to tunings entered by hand.
pub const CUSTOM_NAME: &str = "Custom";

/// Which of the two tables receives navigation input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Focus {
    Stopped,
    Harmonics,
}

impl Focus {
    /// The other table.
    pub fn toggle(self) -> Focus {
        match self {
            Focus::Stopped => Focus::Harmonics,
            Focus::Harmonics => Focus::Stopped,
        }
    }
}

/// Input mode. Search and Command carry the text typed after their sigil.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Normal,
    Search(String),
    Command(String),
}

/// A single user intent, already decoded from a key press.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Move(Direction),
    Top,
    Bottom,
    HalfPageDown,
    HalfPageUp,
    PageDown,
    PageUp,
    SwitchTable,
    HighlightCurrent,
    Clear,
    NextMatch,
    PrevMatch,
    StartSearch,
    StartCommand,
    StartRetune,
    ShowHelp,
    Quit,
    Input(char),
    Backspace,
    Confirm,
    Cancel,
}

/// Everything the user sees and manipulates.
pub struct Session {
    name: String,
    tuning: Tuning,
    presets: Presets,
    stopped: Navigator,
    harmonics: Navigator,
    focus: Focus,
    mode: Mode,
    status: String,
    help: bool,
    quit: bool,
    viewport: usize,
}

impl Session {
    /// Start a session on `tuning`, stopped-note table focused.
    pub fn new(tuning: Tuning, name: &str, presets: Presets) -> Session {
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);

        Session {
            name: name.to_string(),
            tuning,
            presets,
            stopped: Navigator::new(stopped),
            harmonics: Navigator::new(harmonics),
            focus: Focus::Stopped,
            mode: Mode::Normal,
            status: "ready | press ? for help".to_string(),
            help: false,
            quit: false,
            viewport: 10,
        }
    }

    /// Display name of the current tuning.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The current open-string tuning.
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Presets available to `load`.
    pub fn presets(&self) -> &Presets {
        &self.presets
    }

    /// The table receiving navigation input.
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Current input mode.
    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Status line text.
    pub fn status(&self) -> &str {
        &self.status
    }

    /// Returns true while the help overlay is shown.
    pub fn help_visible(&self) -> bool {
        self.help
    }

    /// Returns true once the user has asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// The navigator for one of the tables.
    pub fn navigator(&self, focus: Focus) -> &Navigator {
        match focus {
            Focus::Stopped => &self.stopped,
            Focus::Harmonics => &self.harmonics,
        }
    }

    /// The navigator of the focused table.
    pub fn focused(&self) -> &Navigator {
        self.navigator(self.focus)
    }

    fn focused_mut(&mut self) -> &mut Navigator {
        match self.focus {
            Focus::Stopped => &mut self.stopped,
            Focus::Harmonics => &mut self.harmonics,
        }
    }

    /// The prompt line including its sigil, when a prompt is open.
    pub fn prompt(&self) -> Option<String> {
        match self.mode {
            Mode::Normal => None,
            Mode::Search(ref text) => Some(format!("/{}", text)),
            Mode::Command(ref text) => Some(format!(":{}", text)),
        }
    }

    /// Number of table rows visible at once, used for paging.
    pub fn set_viewport(&mut self, rows: usize) {
        self.viewport = rows.max(1);
    }

    /// Replace the tuning and rebuild both tables.
    ///
    /// Cursors, highlights and search results start over. Focus is kept.
    pub fn retune(&mut self, tuning: Tuning, name: &str) {
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);
        self.stopped = Navigator::new(stopped);
        self.harmonics = Navigator::new(harmonics);
        self.tuning = tuning;
        self.name = name.to_string();

        info!("retuned to {} ({})", self.tuning, self.name);
    }

    /// Handle one action to completion.
    pub fn apply(&mut self, action: Action) {
        if self.help {
            self.help = false;
            return;
        }

        match self.mode {
            Mode::Normal => self.apply_normal(action),
            Mode::Search(_) | Mode::Command(_) => self.apply_prompt(action),
        }
    }

    fn apply_normal(&mut self, action: Action) {
        let half_page = (self.viewport / 2).max(1) as isize;
        let page = self.viewport as isize;

        match action {
            Action::Move(direction) => self.focused_mut().move_cursor(direction),
            Action::Top => self.focused_mut().top(),
            Action::Bottom => self.focused_mut().bottom(),
            Action::HalfPageDown => self.focused_mut().scroll(half_page),
            Action::HalfPageUp => self.focused_mut().scroll(-half_page),
            Action::PageDown => self.focused_mut().scroll(page),
            Action::PageUp => self.focused_mut().scroll(-page),
            Action::SwitchTable => {
                self.focus = self.focus.toggle();
                self.status = match self.focus {
                    Focus::Stopped => "switched to stopped notes".to_string(),
                    Focus::Harmonics => "switched to harmonics".to_string(),
                };
            }
            Action::HighlightCurrent => {
                self.status = match self.focused_mut().highlight_current() {
                    Some(note) => format!("highlight: {}", note),
                    None => "no note under cursor".to_string(),
                };
            }
            Action::Clear | Action::Cancel => self.clear_all(),
            Action::NextMatch => {
                let moved = self.focused_mut().next_match();
                self.report_match(moved);
            }
            Action::PrevMatch => {
                let moved = self.focused_mut().prev_match();
                self.report_match(moved);
            }
            Action::StartSearch => {
                self.mode = Mode::Search(String::new());
                self.status = "search: type a note and press Enter".to_string();
            }
            Action::StartCommand => {
                self.mode = Mode::Command(String::new());
                self.status = "command: type a command and press Enter".to_string();
            }
            Action::StartRetune => {
                self.mode = Mode::Command("retune ".to_string());
                self.status = "command: type seven pitches and press Enter".to_string();
            }
            Action::ShowHelp => self.help = true,
            Action::Quit => self.quit = true,
            Action::Input(_) | Action::Backspace | Action::Confirm => {}
        }
    }

    fn apply_prompt(&mut self, action: Action) {
        match action {
            Action::Input(c) => {
                if let Mode::Search(ref mut text) | Mode::Command(ref mut text) = self.mode {
                    text.push(c);
                }
            }
            Action::Backspace => {
                if let Mode::Search(ref mut text) | Mode::Command(ref mut text) = self.mode {
                    text.pop();
                }
            }
            Action::Confirm => {
                let mode = std::mem::replace(&mut self.mode, Mode::Normal);
                match mode {
                    Mode::Search(pattern) => self.confirm_search(&pattern),
                    Mode::Command(line) => self.confirm_command(&line),
                    Mode::Normal => {}
                }
            }
            Action::Cancel => {
                self.mode = Mode::Normal;
                self.clear_all();
            }
            _ => {}
        }
    }

    fn confirm_search(&mut self, pattern: &str) {
        let pattern = pattern.trim();
        let count = self.focused_mut().find(pattern);

        self.status = if pattern.is_empty() {
            Error::EmptySearchPattern.to_string()
        } else if count > 0 {
            format!("{} matches for {}", count, pattern)
        } else {
            format!("no match for {}", pattern)
        };
    }

    fn confirm_command(&mut self, line: &str) {
        let result = Command::parse(line).and_then(|command| match command {
            Some(command) => self.run(command),
            None => {
                self.status = "ready".to_string();
                Ok(())
            }
        });

        if let Err(e) = result {
            self.status = e.to_string();
        }
    }

    /// Execute a parsed command.
    pub fn run(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Export(path) => {
                self.export(&path)?;
                self.status = format!("exported to {}", path.display());
            }
            Command::Retune(tokens) => {
                let tuning = Tuning::parse(&tokens[..])?;
                self.retune(tuning, CUSTOM_NAME);
                self.status = format!("retuned: {}", self.tuning);
            }
            Command::Load(key) => {
                let preset = self
                    .presets
                    .get(&key)
                    .ok_or_else(|| Error::UnknownPreset(key.clone()))?;
                let tuning = preset.tuning()?;
                let name = preset.name.clone().unwrap_or_else(|| key.clone());

                self.retune(tuning, &name);
                self.status = format!("loaded {}: {}", name, self.tuning);
            }
            Command::Help => self.help = true,
            Command::Quit => self.quit = true,
        }

        Ok(())
    }

    /// Write both tables as Markdown to `path`.
    pub fn export(&self, path: &Path) -> Result<()> {
        export::export_markdown(
            path,
            &self.name,
            &self.tuning,
            self.stopped.table(),
            self.harmonics.table(),
        )?;

        Ok(())
    }

    fn report_match(&mut self, moved: bool) {
        let search = self.focused().search();
        self.status = match search.current() {
            Some(index) if moved => format!("match {}/{}", index + 1, search.matches().len()),
            _ => "no search results".to_string(),
        };
    }

    fn clear_all(&mut self) {
        self.stopped.clear();
        self.harmonics.clear();
        self.status = "cleared".to_string();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::table::LABEL_COLUMN;

    const PRESETS: &str = r#"
        [presets.ruibin]
        name = "Ruibin Diao"
        tuning = ["C2", "D2", "F2", "G2", "B♭2", "C3", "D3"]

        [presets.broken]
        tuning = ["C2", "D2", "F2", "G2", "H2", "C3", "D3"]
    "#;

    fn session() -> Session {
        let presets = Presets::from_toml(PRESETS).unwrap();
        Session::new(Tuning::default(), "Zheng Diao", presets)
    }

    fn type_line(session: &mut Session, opener: Action, text: &str) {
        session.apply(opener);
        for c in text.chars() {
            session.apply(Action::Input(c));
        }
        session.apply(Action::Confirm);
    }

    #[test]
    fn prompt_keeps_sigil() {
        let mut s = session();
        s.apply(Action::StartSearch);
        assert_eq!(s.prompt(), Some("/".to_string()));

        s.apply(Action::Input('E'));
        assert_eq!(s.prompt(), Some("/E".to_string()));

        s.apply(Action::Backspace);
        s.apply(Action::Backspace);
        assert_eq!(s.prompt(), Some("/".to_string()));
        assert_eq!(*s.mode(), Mode::Search(String::new()));
    }

    #[test]
    fn normal_actions_ignored_while_typing() {
        let mut s = session();
        s.apply(Action::StartCommand);
        s.apply(Action::Move(Direction::Down));
        s.apply(Action::SwitchTable);
        assert_eq!(s.focused().cursor(), (0, 1));
        assert_eq!(s.focus(), Focus::Stopped);
        assert_eq!(s.prompt(), Some(":".to_string()));
    }

    #[test]
    fn search_confirms_back_to_normal() {
        let mut s = session();
        type_line(&mut s, Action::StartSearch, "E");
        assert_eq!(*s.mode(), Mode::Normal);
        assert!(!s.focused().search().is_empty());
        assert!(s.status().ends_with("matches for E"));
    }

    #[test]
    fn empty_search_is_reported() {
        let mut s = session();
        type_line(&mut s, Action::StartSearch, "C");
        type_line(&mut s, Action::StartSearch, "  ");
        assert!(s.focused().search().is_empty());
        assert_eq!(s.status(), "empty search pattern");
    }

    #[test]
    fn cancel_clears_but_keeps_cursor() {
        let mut s = session();
        s.apply(Action::Move(Direction::Down));
        s.apply(Action::HighlightCurrent);
        s.apply(Action::StartSearch);
        s.apply(Action::Input('D'));
        s.apply(Action::Cancel);

        assert_eq!(*s.mode(), Mode::Normal);
        assert!(s.focused().highlighted().is_empty());
        assert!(s.focused().search().is_empty());
        assert_eq!(s.focused().cursor(), (1, 1));
    }

    #[test]
    fn clear_affects_both_tables() {
        let mut s = session();
        s.apply(Action::HighlightCurrent);
        s.apply(Action::SwitchTable);
        type_line(&mut s, Action::StartSearch, "G");
        s.apply(Action::Clear);

        assert!(s.navigator(Focus::Stopped).highlighted().is_empty());
        assert!(s.navigator(Focus::Harmonics).search().is_empty());
    }

    #[test]
    fn switching_tables_keeps_state() {
        let mut s = session();
        s.apply(Action::Move(Direction::Down));
        s.apply(Action::HighlightCurrent);
        s.apply(Action::SwitchTable);
        assert_eq!(s.focus(), Focus::Harmonics);
        assert_eq!(s.focused().cursor(), (0, 1));

        s.apply(Action::SwitchTable);
        assert_eq!(s.focused().cursor(), (1, 1));
        assert_eq!(s.focused().highlighted().len(), 1);
    }

    #[test]
    fn highlight_on_label_reports() {
        let mut s = session();
        s.apply(Action::Move(Direction::Left));
        assert_eq!(s.focused().cursor(), (0, LABEL_COLUMN));
        s.apply(Action::HighlightCurrent);
        assert_eq!(s.status(), "no note under cursor");
        assert!(s.focused().highlighted().is_empty());
    }

    #[test]
    fn stepping_matches() {
        let mut s = session();
        s.apply(Action::NextMatch);
        assert_eq!(s.status(), "no search results");
        assert_eq!(s.focused().cursor(), (0, 1));

        type_line(&mut s, Action::StartSearch, "A");
        s.apply(Action::NextMatch);
        assert!(s.status().starts_with("match 2/"));
        assert_eq!(s.focused().cursor(), s.focused().search().matches()[1]);
        s.apply(Action::PrevMatch);
        assert!(s.status().starts_with("match 1/"));
    }

    #[test]
    fn paging_uses_viewport() {
        let mut s = session();
        s.set_viewport(8);
        s.apply(Action::HalfPageDown);
        assert_eq!(s.focused().cursor().0, 4);
        s.apply(Action::PageDown);
        assert_eq!(s.focused().cursor().0, 12);
        s.apply(Action::PageDown);
        assert_eq!(s.focused().cursor().0, 18);
        s.apply(Action::HalfPageUp);
        assert_eq!(s.focused().cursor().0, 14);
        s.apply(Action::Top);
        assert_eq!(s.focused().cursor().0, 0);
        s.apply(Action::Bottom);
        assert_eq!(s.focused().cursor().0, 18);
    }

    #[test]
    fn retune_replaces_everything() {
        let mut s = session();
        s.apply(Action::Move(Direction::Down));
        s.apply(Action::HighlightCurrent);
        type_line(&mut s, Action::StartSearch, "C");
        s.apply(Action::SwitchTable);

        type_line(&mut s, Action::StartCommand, "retune D2 E2 G2 A2 B2 D3 E3");
        assert_eq!(*s.mode(), Mode::Normal);
        assert_eq!(s.name(), CUSTOM_NAME);
        assert_eq!(s.tuning().to_string(), "D2 E2 G2 A2 B2 D3 E3");
        assert_eq!(s.focus(), Focus::Harmonics);

        for focus in &[Focus::Stopped, Focus::Harmonics] {
            let nav = s.navigator(*focus);
            assert_eq!(nav.cursor(), (0, 1));
            assert!(nav.highlighted().is_empty());
            assert!(nav.search().is_empty());
        }
        let first = s.navigator(Focus::Stopped).table().note_at(0, 1).unwrap();
        assert_eq!(first.to_string(), "F♯4");
    }

    #[test]
    fn bad_retune_keeps_old_tables() {
        let mut s = session();
        s.apply(Action::HighlightCurrent);
        type_line(&mut s, Action::StartCommand, "retune C2 D2 F2 G2 Q2 C3 D3");

        assert_eq!(s.status(), "invalid pitch name: Q2");
        assert_eq!(s.tuning(), &Tuning::default());
        assert_eq!(s.focused().highlighted().len(), 1);

        type_line(&mut s, Action::StartCommand, "retune C2 D2");
        assert_eq!(s.status(), "a tuning needs 7 pitches, found 2");
    }

    #[test]
    fn retune_at_octave_limit() {
        let mut s = session();
        type_line(&mut s, Action::StartCommand, "retune B#178956964 D2 F2 G2 A2 C3 D3");
        assert_eq!(s.name(), CUSTOM_NAME);
        assert_eq!(s.navigator(Focus::Stopped).table().len(), 19);

        type_line(&mut s, Action::StartCommand, "retune B#178956968 D2 F2 G2 A2 C3 D3");
        assert_eq!(s.status(), "invalid pitch name: B#178956968");
        assert_eq!(s.tuning().strings()[0].octave, 178956964);
    }

    #[test]
    fn blank_command_returns_to_ready() {
        let mut s = session();
        type_line(&mut s, Action::StartCommand, "   ");
        assert_eq!(*s.mode(), Mode::Normal);
        assert_eq!(s.status(), "ready");
    }

    #[test]
    fn quick_retune_prefills_command() {
        let mut s = session();
        s.apply(Action::StartRetune);
        assert_eq!(s.prompt(), Some(":retune ".to_string()));
    }

    #[test]
    fn load_preset() {
        let mut s = session();
        type_line(&mut s, Action::StartCommand, "load ruibin");
        assert_eq!(s.name(), "Ruibin Diao");
        assert_eq!(s.tuning().to_string(), "C2 D2 F2 G2 B♭2 C3 D3");

        type_line(&mut s, Action::StartCommand, "load nothing");
        assert_eq!(s.status(), "unknown preset: nothing");

        type_line(&mut s, Action::StartCommand, "load broken");
        assert_eq!(s.status(), "invalid pitch name: H2");
        assert_eq!(s.name(), "Ruibin Diao");
    }

    #[test]
    fn unknown_and_incomplete_commands() {
        let mut s = session();
        type_line(&mut s, Action::StartCommand, "transpose 2");
        assert_eq!(s.status(), "unknown command: transpose");
        assert_eq!(*s.mode(), Mode::Normal);

        type_line(&mut s, Action::StartCommand, "export");
        assert_eq!(s.status(), "usage: export <path>");
    }

    #[test]
    fn help_and_quit() {
        let mut s = session();
        type_line(&mut s, Action::StartCommand, "help");
        assert!(s.help_visible());

        s.apply(Action::Quit);
        assert!(!s.help_visible());
        assert!(!s.should_quit());

        s.apply(Action::ShowHelp);
        assert!(s.help_visible());
        s.apply(Action::Cancel);

        type_line(&mut s, Action::StartCommand, "quit");
        assert!(s.should_quit());
    }

    #[test]
    fn export_command_writes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zheng.md");
        let mut s = session();

        type_line(&mut s, Action::StartCommand, &format!("export {}", path.display()));
        assert!(s.status().starts_with("exported to"));
        assert!(fs::read_to_string(&path).unwrap().starts_with("# Zheng Diao"));
    }
}
