// src/process/mod.rs
use anyhow::{Context, Result};
use csv::ReaderBuilder;
use std::{fs::File, io::BufReader, path::Path};
use tracing::debug;

pub mod details;
pub mod stats;
pub mod time_parser;
pub mod utils;

use utils::clean_field;

#[derive(Debug, Clone, PartialEq)]
pub struct RawTable {
    /// Column names from the header row, trimmed.
    pub headers: Vec<String>,
    /// One entry per data row, padded or cut to `headers.len()`.
    /// `None` marks a blank or sentinel field.
    pub rows: Vec<Vec<Option<String>>>,
}

/// Borrowed view of one row, addressed by column name.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    headers: &'a [String],
    values: &'a [Option<String>],
}

impl<'a> RawRow<'a> {
    /// Value of `column`, or `None` if the column is missing or the field absent.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = self.headers.iter().position(|h| h == column)?;
        self.values.get(idx)?.as_deref()
    }
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// All values of `name` in row order, or `None` when the column is missing.
    pub fn column<'a>(&'a self, name: &str) -> Option<impl Iterator<Item = Option<&'a str>> + 'a> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(move |row| row[idx].as_deref()))
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(move |values| RawRow {
            headers: &self.headers,
            values,
        })
    }
}

/// Read a headed CSV file into a `RawTable`.
///
/// Returns `Ok(None)` when `path` does not exist. Fields are trimmed, and
/// blanks or any of `null_values` become `None`. Any read or decode error
/// fails the whole file.
#[tracing::instrument(level = "debug", skip(path, null_values), fields(path = %path.as_ref().display()))]
pub fn load_csv<P: AsRef<Path>>(path: P, null_values: &[String]) -> Result<Option<RawTable>> {
    let path = path.as_ref();
    if !path.exists() {
        debug!("no such file");
        return Ok(None);
    }

    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows pad with absent values
        .from_reader(BufReader::new(file));

    let headers: Vec<String> = rdr
        .headers()
        .with_context(|| format!("reading header of {}", path.display()))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut rows = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result
            .with_context(|| format!("CSV parse error in {} at record {}", path.display(), idx))?;
        let row: Vec<Option<String>> = (0..headers.len())
            .map(|i| record.get(i).and_then(|v| clean_field(v, null_values)))
            .collect();
        rows.push(row);
    }

    debug!(rows = rows.len(), columns = headers.len(), "loaded");
    Ok(Some(RawTable { headers, rows }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn nulls() -> Vec<String> {
        ["", " ", "NA", "N/A"].map(String::from).to_vec()
    }

    #[test]
    fn loads_and_normalizes() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("utmb_2010.csv");
        fs::write(
            &path,
            " name ,time,nationality\n  Kilian ,20:56:59,ES\nAnna,NA, \nShort\n",
        )?;

        let table = load_csv(&path, &nulls())?.expect("file exists");
        assert_eq!(table.headers, vec!["name", "time", "nationality"]);
        assert_eq!(table.len(), 3);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("name"), Some("Kilian"));
        assert_eq!(rows[0].get("time"), Some("20:56:59"));
        assert_eq!(rows[1].get("time"), None);
        assert_eq!(rows[1].get("nationality"), None);
        assert_eq!(rows[2].get("name"), Some("Short"));
        assert_eq!(rows[2].get("time"), None);
        assert_eq!(rows[0].get("category"), None);

        let times: Vec<_> = table.column("time").unwrap().collect();
        assert_eq!(times, vec![Some("20:56:59"), None, None]);
        assert!(table.column("category").is_none());
        Ok(())
    }

    #[test]
    fn missing_file_is_none() -> Result<()> {
        let tmp = tempdir()?;
        assert!(load_csv(tmp.path().join("utmb_1999.csv"), &nulls())?.is_none());
        Ok(())
    }

    #[test]
    fn invalid_utf8_fails_file() -> Result<()> {
        let tmp = tempdir()?;
        let path = tmp.path().join("bad.csv");
        fs::write(&path, b"name,time\n\xff\xfe,01:00:00\n")?;
        assert!(load_csv(&path, &nulls()).is_err());
        Ok(())
    }
}
