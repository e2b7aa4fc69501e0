//! Markdown export of a tuning and its two tables.
//!
//! Cells are padded to a fixed width and empty cells are written as blanks, so
//! every row keeps the same number of columns.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use log::info;

use crate::table::{PositionTable, Tuning, STRING_COUNT};

const CELL_WIDTH: usize = 7;

/// Write the Markdown document for `tuning` to `out`.
pub fn write_markdown<W: Write>(
    out: &mut W,
    name: &str,
    tuning: &Tuning,
    stopped: &PositionTable,
    harmonics: &PositionTable,
) -> io::Result<()> {
    writeln!(out, "# {}", name)?;
    writeln!(out)?;
    writeln!(out, "## Tuning")?;
    writeln!(out)?;

    write!(out, "| **String** |")?;
    for string in 1..=STRING_COUNT {
        write!(out, " {} |", string)?;
    }
    writeln!(out)?;
    writeln!(out, "|--{}|", "|--".repeat(STRING_COUNT))?;
    write!(out, "| **Open** |")?;
    for pitch in tuning.strings() {
        write!(out, " {} |", pitch)?;
    }
    writeln!(out)?;

    for table in &[stopped, harmonics] {
        writeln!(out)?;
        write_table(out, tuning, table)?;
    }

    Ok(())
}

fn write_table<W: Write>(out: &mut W, tuning: &Tuning, table: &PositionTable) -> io::Result<()> {
    writeln!(out, "## {}", table.catalog().title())?;
    writeln!(out)?;

    write!(out, "| **Position** |")?;
    for (i, pitch) in tuning.strings().iter().enumerate() {
        write!(out, " String {} ({}) |", i + 1, pitch)?;
    }
    writeln!(out, " **Interval** |")?;
    writeln!(out, "| -------- |{} -------- |", " ------- |".repeat(STRING_COUNT))?;

    for row in table.rows() {
        write!(out, "| **{}** |", row.position.label)?;
        for cell in row.cells.iter() {
            let name = cell.map(|p| p.to_string()).unwrap_or_default();
            write!(out, " {:<width$} |", name, width = CELL_WIDTH)?;
        }
        writeln!(out, " {} |", row.position.interval)?;
    }

    Ok(())
}

/// Write the Markdown document to a file at `path`.
pub fn export_markdown(
    path: &Path,
    name: &str,
    tuning: &Tuning,
    stopped: &PositionTable,
    harmonics: &PositionTable,
) -> io::Result<()> {
    let mut out = BufWriter::new(File::create(path)?);
    write_markdown(&mut out, name, tuning, stopped, harmonics)?;
    out.flush()?;

    info!("exported {} to {}", name, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::fs;

    use crate::interval::{Catalog, Position};

    fn render(tuning: &Tuning, stopped: &PositionTable, harmonics: &PositionTable) -> String {
        let mut out = Vec::new();
        write_markdown(&mut out, "Zheng Diao", tuning, stopped, harmonics).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn layout() {
        let tuning = Tuning::default();
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);
        let text = render(&tuning, &stopped, &harmonics);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "# Zheng Diao");
        assert!(lines.contains(&"| **Open** | C2 | D2 | F2 | G2 | A2 | C3 | D3 |"));
        assert!(lines.contains(&"## Stopped notes"));
        assert!(lines.contains(&"## Harmonics"));

        let stopped_at = lines.iter().position(|l| *l == "## Stopped notes").unwrap();
        let harmonics_at = lines.iter().position(|l| *l == "## Harmonics").unwrap();
        assert!(stopped_at < harmonics_at);

        assert_eq!(
            lines[stopped_at + 4],
            "| **Hui 3** | E4      | F♯4     | A4      | B4      | C♯5     | E5      | F♯5     | major 17th |"
        );
        assert_eq!(lines.len(), harmonics_at + 4 + 17);
    }

    #[test]
    fn empty_cells_keep_columns() {
        let tuning = Tuning::default();
        let positions = [Position { label: "Nowhere", interval: "augmented 4th" }];
        let empty = PositionTable::from_rows(
            Catalog::Stopped,
            PositionTable::compute(&tuning, &positions),
        );
        let harmonics = PositionTable::build(&tuning, Catalog::Harmonics);

        let text = render(&tuning, &empty, &harmonics);
        let row = text.lines().find(|l| l.starts_with("| **Nowhere**")).unwrap();
        assert_eq!(row.matches('|').count(), STRING_COUNT + 3);
        assert!(row.contains(&format!("| {} |", " ".repeat(CELL_WIDTH))));
    }

    #[test]
    fn export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tables.md");
        let tuning = Tuning::default();
        let (stopped, harmonics) = PositionTable::build_pair(&tuning);

        export_markdown(&path, "Zheng Diao", &tuning, &stopped, &harmonics).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        assert_eq!(written, render(&tuning, &stopped, &harmonics));
    }
}
