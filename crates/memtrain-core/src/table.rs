//! CSV table loading.
//!
//! Tables are read as raw rows of strings with no header interpretation;
//! [`crate::store::ingest`] decides which rows are settings, header and data.

use std::path::Path;

use anyhow::{Context, Result};

/// Read a UTF-8 CSV file into rows of trimmed cells.
pub fn read_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read table file: {}", path.display()))?;

    parse_table_str(&content)
        .with_context(|| format!("failed to parse CSV: {}", path.display()))
}

/// Parse CSV text into rows of trimmed cells (useful for testing).
pub fn parse_table_str(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("malformed record {}", line + 1))?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!(rows = rows.len(), "parsed table");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CAPITALS: &str = "\u{feff}World capitals\n\
\"settings: level3, nquestions=2\"\n\
Cue,Response,Synonym,Mtag\n\
\"The capital of France is {{}}.\", Paris ,,capitals\n\
The capital of Japan is {{}}.,Tokyo\n";

    #[test]
    fn parses_flexible_rows() {
        let rows = parse_table_str(CAPITALS).unwrap();
        assert_eq!(rows[0], vec!["World capitals"]);
        assert_eq!(rows[2], vec!["Cue", "Response", "Synonym", "Mtag"]);
        assert_eq!(rows[3][1], "Paris");
        assert_eq!(rows[4].len(), 2);
    }

    #[test]
    fn quoted_commas_stay_in_one_cell() {
        let rows = parse_table_str("Cue,Response\n\"a, b\",c\n").unwrap();
        assert_eq!(rows[1], vec!["a, b", "c"]);
    }

    #[test]
    fn reads_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("capitals.csv");
        std::fs::write(&path, CAPITALS).unwrap();
        let rows = read_table(&path).unwrap();
        assert_eq!(rows.len(), 5);
    }

    #[test]
    fn missing_file_names_the_path() {
        let err = read_table(Path::new("no_such_table.csv")).unwrap_err();
        assert!(format!("{err:#}").contains("no_such_table.csv"));
    }
}
