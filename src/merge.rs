//! Join the per-year frequency files and the ownership table into one variable by year matrix
//!
//! Every join is a left join on the "all" table: a variable keeps its row even when the
//! ownership table doesn't know it, and a year in which it never occurred stays empty instead of
//! becoming a zero.
use std::fs;
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use ndarray::Array2;
use regex::Regex;
use aggregate::{FrequencyTable, KEY_COLUMN};
use farm::{FarmMap, new_farm};
use errors::*;

/// Static facts about each variable, such as its owner, keyed by VARNAAM
#[derive(Debug, Clone)]
pub struct VariableInfo {
    columns: Vec<String>,
    rows: FarmMap<String, Vec<String>>,
}

impl VariableInfo {
    pub fn new(columns: Vec<String>) -> Self {
        VariableInfo { columns: columns, rows: new_farm() }
    }

    /// Add the facts of `variable`. The first row for a variable wins.
    pub fn insert(&mut self, variable: String, values: Vec<String>) -> bool {
        if self.rows.contains_key(&variable) {
            warn!("{} is in the variable info more than once, keeping the first row", variable);
            return false;
        }
        self.rows.insert(variable, values);
        true
    }

    /// Read a semicolon separated table with a VARNAAM column somewhere in it
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .delimiter(b';')
            .trim(Trim::All)
            .from_path(path)?;
        let headers = reader.headers()?.clone();
        let key = headers.iter().position(|h| h == KEY_COLUMN)
            .ok_or_else(|| Error::Malformed(
                path.to_path_buf(),
                format!("no {} column in {:?}", KEY_COLUMN, headers)))?;
        let columns = headers.iter()
            .enumerate()
            .filter(|&(i, _)| i != key)
            .map(|(_, h)| h.to_string())
            .collect();
        let mut info = VariableInfo::new(columns);
        for record in reader.records() {
            let record = record?;
            let values = record.iter()
                .enumerate()
                .filter(|&(i, _)| i != key)
                .map(|(_, v)| v.to_string())
                .collect();
            info.insert(record[key].to_string(), values);
        }
        info!("Loaded information on {} variables from {}", info.rows.len(), path.display());
        Ok(info)
    }

    /// Names of the information columns, without VARNAAM
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn get(&self, variable: &str) -> Option<&Vec<String>> {
        self.rows.get(variable)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Years that have a frequency file in `dir`, sorted.
///
/// Only `<yyyy>.txt` counts, so all.txt and the GAP_<year>.txt index files are left alone.
pub fn discover_years(dir: &Path) -> Result<Vec<String>> {
    let pattern = Regex::new(r"^(\d{4})\.txt$")?;
    let mut years = vec![];
    for entry in fs::read_dir(dir)? {
        let name = entry?.file_name();
        let name = name.to_string_lossy();
        if let Some(caps) = pattern.captures(&name) {
            years.push(caps[1].to_string());
        }
    }
    years.sort();
    debug!("Found years {:?} in {}", years, dir.display());
    Ok(years)
}

/// Read `<dir>/<year>.txt` for every year
pub fn read_year_tables(dir: &Path, years: &[String]) -> Result<Vec<FrequencyTable>> {
    years.iter()
        .map(|year| FrequencyTable::read(&dir.join(format!("{}.txt", year))))
        .collect()
}

/// Variable rows, year columns, plus the all-time count and the variable information
#[derive(Debug, Clone)]
pub struct YearFrequencyMatrix {
    /// Column name of the all-time count
    pub all_label: String,
    pub variables: Vec<String>,
    pub all: Vec<u64>,
    pub info_columns: Vec<String>,
    /// None where the variable information has no row for the variable
    pub info: Vec<Option<Vec<String>>>,
    pub years: Vec<String>,
    /// None where the variable did not occur that year
    pub counts: Array2<Option<u64>>,
}

impl YearFrequencyMatrix {
    pub fn row(&self, variable: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    pub fn count(&self, variable: &str, year: &str) -> Option<u64> {
        let row = self.row(variable)?;
        let col = self.years.iter().position(|y| y == year)?;
        self.counts[[row, col]]
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }
}

/// Left join the information and every year table onto the all table
pub fn merge(all: &FrequencyTable, info: &VariableInfo, years: &[FrequencyTable])
    -> YearFrequencyMatrix {
    let variables: Vec<String> = all.entries().iter().map(|e| e.0.clone()).collect();
    let mut counts = Array2::from_elem((variables.len(), years.len()), None);
    for (col, table) in years.iter().enumerate() {
        let lookup = table.counts();
        for (row, variable) in variables.iter().enumerate() {
            counts[[row, col]] = lookup.get(variable.as_str()).cloned();
        }
        let orphans = table.entries().iter()
            .filter(|e| all.get(&e.0).is_none())
            .count();
        if orphans > 0 {
            warn!("{} variables of {} are not in {}, they are left out",
                orphans, table.label(), all.label());
        }
    }
    let unknown = variables.iter().filter(|v| info.get(v).is_none()).count();
    if unknown > 0 {
        info!("{} of {} variables have no variable information", unknown, variables.len());
    }
    YearFrequencyMatrix {
        all_label: all.label().to_string(),
        all: all.values(),
        info_columns: info.columns().to_vec(),
        info: variables.iter().map(|v| info.get(v).cloned()).collect(),
        years: years.iter().map(|t| t.label().to_string()).collect(),
        variables: variables,
        counts: counts,
    }
}
