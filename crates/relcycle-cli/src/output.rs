//! Rendering helpers for terminal output and GitHub Actions step outputs.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use relcycle_core::ReleaseCycle;
use tracing::debug;

/// Print `key: value` lines with the values aligned.
pub fn write_pairs<W: Write + ?Sized>(out: &mut W, pairs: &[(&str, String)]) -> io::Result<()> {
    let width = pairs.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in pairs {
        writeln!(out, "{key:<width$}  {value}")?;
    }
    Ok(())
}

/// Print cycles as a fixed-width table.
pub fn write_cycle_table<W: Write + ?Sized>(
    out: &mut W,
    cycles: &[ReleaseCycle],
) -> io::Result<()> {
    if cycles.is_empty() {
        writeln!(out, "No release cycles in range.")?;
        return Ok(());
    }
    writeln!(
        out,
        "{:<12}  {:<10}  {:<10}  {:<10}",
        "Version", "Begin", "Freeze", "Release"
    )?;
    for cycle in cycles {
        writeln!(
            out,
            "{:<12}  {:<10}  {:<10}  {:<10}",
            cycle.version.to_string(),
            cycle.begin.to_string(),
            cycle.freeze.to_string(),
            cycle.release.to_string()
        )?;
    }
    Ok(())
}

pub fn cycle_pairs(cycle: &ReleaseCycle) -> Vec<(&'static str, String)> {
    vec![
        ("version", cycle.version.to_string()),
        ("begin", cycle.begin.to_string()),
        ("freeze", cycle.freeze.to_string()),
        ("release", cycle.release.to_string()),
    ]
}

/// Append `key=value` lines to the file named by `$GITHUB_OUTPUT`.
pub fn append_github_output(path: &Path, pairs: &[(&str, String)]) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    for (key, value) in pairs {
        writeln!(file, "{key}={value}")?;
    }
    debug!(path = %path.display(), count = pairs.len(), "wrote GitHub outputs");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use relcycle_core::{CyclePhase, monthly_cycle};

    #[test]
    fn test_pairs_are_aligned() {
        let mut buffer = Vec::new();
        write_pairs(
            &mut buffer,
            &[("a", "1".to_string()), ("longer", "2".to_string())],
        )
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text, "a       1\nlonger  2\n");
    }

    #[test]
    fn test_cycle_table_has_header_and_row() {
        let cycle = monthly_cycle(
            NaiveDate::from_ymd_opt(2023, 7, 12).unwrap(),
            CyclePhase::Development,
        );
        let mut buffer = Vec::new();
        write_cycle_table(&mut buffer, &[cycle]).unwrap();
        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("Version"));
        assert!(lines[1].starts_with("8.0.0 "));
        assert!(lines[1].contains("2023-08-08"));
    }

    #[test]
    fn test_empty_table_message() {
        let mut buffer = Vec::new();
        write_cycle_table(&mut buffer, &[]).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "No release cycles in range.\n"
        );
    }
}
