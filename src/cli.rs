//! CLI argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "huiwei")]
#[command(about = "Guqin stopped-note and harmonic positions for any tuning")]
#[command(after_help = "Keys: ? help, / search, : command, n/N next/previous match, \
                        * highlight, Tab switch table, q quit")]
pub struct Cli {
    /// Open-string pitches, string one first (default: C2 D2 F2 G2 A2 C3 D3)
    #[arg(short, long, num_args = 7, value_names = ["S1", "S2", "S3", "S4", "S5", "S6", "S7"])]
    #[arg(conflicts_with = "preset")]
    pub tuning: Option<Vec<String>>,

    /// Use a tuning from the preset file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Display name for the tuning
    #[arg(short, long)]
    pub name: Option<String>,

    /// Preset file; a missing file means no presets
    #[arg(long, default_value = "presets.toml")]
    pub presets: PathBuf,

    /// Export both tables as Markdown to this file and exit
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print both tables as Markdown to stdout and exit
    #[arg(long)]
    pub print: bool,

    /// Write log output to this file instead of stderr
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["huiwei"]).unwrap();
        assert!(cli.tuning.is_none());
        assert_eq!(cli.presets, PathBuf::from("presets.toml"));
        assert!(!cli.print);
    }

    #[test]
    fn seven_pitch_tuning() {
        let cli = Cli::try_parse_from([
            "huiwei", "-t", "C2", "D2", "F2", "G2", "Bb2", "C3", "D3", "-n", "Ruibin",
        ])
        .unwrap();
        assert_eq!(cli.tuning.unwrap().len(), 7);
        assert_eq!(cli.name.as_deref(), Some("Ruibin"));
    }

    #[test]
    fn tuning_needs_seven_values() {
        assert!(Cli::try_parse_from(["huiwei", "-t", "C2", "D2"]).is_err());
    }

    #[test]
    fn tuning_conflicts_with_preset() {
        let args = ["huiwei", "-p", "zheng", "-t", "C2", "D2", "F2", "G2", "A2", "C3", "D3"];
        assert!(Cli::try_parse_from(args).is_err());
    }
}
