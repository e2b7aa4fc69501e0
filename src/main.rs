//! huiwei
//!
//! Browse the stopped notes and harmonics of a guqin tuning in the terminal,
//! or export them as Markdown.

mod cli;
mod tui;

use std::fs::File;
use std::io;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::event::{self, Event, KeyEventKind};
use log::{info, warn};
use ratatui::DefaultTerminal;

use huiwei::export;
use huiwei::preset::Presets;
use huiwei::session::{Action, Session, CUSTOM_NAME};
use huiwei::table::{PositionTable, Tuning};
use huiwei::view;

use cli::Cli;
use tui::{Display, Keymap};

const DEFAULT_NAME: &str = "Zheng Diao (F)";

fn init_logging(log_file: Option<&Path>) -> Result<()> {
    match log_file {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("cannot create log file {}", path.display()))?;
            env_logger::Builder::from_env(
                env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "info"),
            )
            .target(env_logger::Target::Pipe(Box::new(file)))
            .init();
        }
        // Warnings only on stderr.
        None => env_logger::init_from_env(
            env_logger::Env::default().filter_or(env_logger::DEFAULT_FILTER_ENV, "warn"),
        ),
    }
    Ok(())
}

/// Read the preset book, treating an unreadable or malformed file as empty.
fn load_presets(path: &Path) -> Presets {
    Presets::load(path).unwrap_or_else(|e| {
        warn!("ignoring preset file {}: {}", path.display(), e);
        Presets::default()
    })
}

fn resolve_tuning(cli: &Cli, presets: &Presets) -> Result<(Tuning, String)> {
    if let Some(key) = &cli.preset {
        let preset = match presets.get(key) {
            Some(preset) => preset,
            None => {
                let names: Vec<&str> = presets.names().collect();
                bail!("unknown preset {:?} (available: {})", key, names.join(", "));
            }
        };
        let tuning = preset
            .tuning()
            .with_context(|| format!("preset {:?} has an invalid tuning", key))?;
        let name = match &cli.name {
            Some(name) => name.clone(),
            None => presets.display_name(key).unwrap_or(key.as_str()).to_string(),
        };
        return Ok((tuning, name));
    }

    if let Some(tokens) = &cli.tuning {
        let tuning = Tuning::parse(&tokens[..])?;
        let name = cli.name.clone().unwrap_or_else(|| CUSTOM_NAME.to_string());
        return Ok((tuning, name));
    }

    let name = cli.name.clone().unwrap_or_else(|| DEFAULT_NAME.to_string());
    Ok((Tuning::default(), name))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_file.as_deref())?;

    let presets = load_presets(&cli.presets);

    let (tuning, name) = resolve_tuning(&cli, &presets)?;
    info!("tuning {}: {}", name, tuning);

    if cli.print {
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);
        let stdout = io::stdout();
        export::write_markdown(&mut stdout.lock(), &name, &tuning, &stopped, &harmonics)?;
        return Ok(());
    }

    if let Some(path) = &cli.output {
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);
        export::export_markdown(path, &name, &tuning, &stopped, &harmonics)
            .with_context(|| format!("cannot write {}", path.display()))?;
        println!("{}", path.display());
        return Ok(());
    }

    let mut session = Session::new(tuning, &name, presets);

    let mut terminal = ratatui::init();
    let result = main_loop(&mut terminal, &mut session);
    ratatui::restore();

    result
}

fn main_loop(terminal: &mut DefaultTerminal, session: &mut Session) -> Result<()> {
    let mut display = Display::default();
    let mut keymap = Keymap::default();

    loop {
        let screen = view::render(session);
        terminal.draw(|frame| display.draw(frame, &screen))?;
        session.set_viewport(display.viewport());

        if session.should_quit() {
            return Ok(());
        }

        if let Event::Key(key) = event::read()? {
            // Only handle key press events (not release)
            if key.kind != KeyEventKind::Press {
                continue;
            }

            let action = if session.help_visible() {
                Some(Action::Cancel)
            } else {
                keymap.translate(key, session.mode())
            };

            if let Some(action) = action {
                session.apply(action);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    const PRESETS: &str = r#"
        [presets.ruibin]
        name = "Ruibin Diao"
        tuning = ["C2", "D2", "F2", "G2", "B♭2", "C3", "D3"]

        [presets.zheng]
        tuning = ["C2", "D2", "F2", "G2", "A2", "C3", "D3"]
    "#;

    fn resolve(args: &[&str]) -> Result<(Tuning, String)> {
        let mut argv = vec!["huiwei"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        resolve_tuning(&cli, &Presets::from_toml(PRESETS).unwrap())
    }

    #[test]
    fn no_flags_gives_default_tuning() {
        let (tuning, name) = resolve(&[]).unwrap();
        assert_eq!(tuning, Tuning::default());
        assert_eq!(name, "Zheng Diao (F)");
    }

    #[test]
    fn hand_entered_tuning_is_custom() {
        let (tuning, name) = resolve(&["-t", "C2", "D2", "E2", "G2", "A2", "C3", "D3"]).unwrap();
        assert_eq!(tuning.to_string(), "C2 D2 E2 G2 A2 C3 D3");
        assert_eq!(name, CUSTOM_NAME);

        let (_, name) = resolve(&["-t", "C2", "D2", "E2", "G2", "A2", "C3", "D3", "-n", "Manjiao"]).unwrap();
        assert_eq!(name, "Manjiao");
    }

    #[test]
    fn preset_names() {
        let (tuning, name) = resolve(&["-p", "ruibin"]).unwrap();
        assert_eq!(tuning.to_string(), "C2 D2 F2 G2 B♭2 C3 D3");
        assert_eq!(name, "Ruibin Diao");

        let (_, name) = resolve(&["-p", "zheng"]).unwrap();
        assert_eq!(name, "zheng");

        let (_, name) = resolve(&["-p", "ruibin", "-n", "Bin"]).unwrap();
        assert_eq!(name, "Bin");
    }

    #[test]
    fn unknown_preset_lists_available() {
        let err = resolve(&["-p", "manjiao"]).unwrap_err().to_string();
        assert!(err.contains("\"manjiao\""), "{}", err);
        assert!(err.contains("available: ruibin, zheng"), "{}", err);
    }

    #[test]
    fn bad_tuning_is_an_error() {
        assert!(resolve(&["-t", "C2", "D2", "E2", "G2", "A2", "C3", "Q3"]).is_err());
    }

    #[test]
    fn malformed_preset_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"[presets.zheng\ntuning = 3").unwrap();
        assert!(load_presets(file.path()).is_empty());
    }

    #[test]
    fn preset_file_is_loaded() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(PRESETS.as_bytes()).unwrap();
        assert_eq!(load_presets(file.path()).len(), 2);

        let dir = tempfile::tempdir().unwrap();
        assert!(load_presets(&dir.path().join("missing.toml")).is_empty());
    }
}
