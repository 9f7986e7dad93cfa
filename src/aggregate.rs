//! Fold per-document matches into frequency tables and a document index
use std::cmp::Ordering;
use std::path::Path;
use csv::{ReaderBuilder, Trim};
use farm::{FarmMap, new_farm};
use files::Document;
use matcher::MatchedVariableSet;
use errors::*;

/// Key column of every frequency file and of the ownership table
pub const KEY_COLUMN: &str = "VARNAAM";

/// How often each variable occurs, most frequent first
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable {
    label: String,
    entries: Vec<(String, u64)>,
}

impl FrequencyTable {
    /// Sort `counts` by descending count. Ties go alphabetically so reruns write identical files.
    pub fn from_counts<S: Into<String>>(label: S, counts: FarmMap<String, u64>) -> Self {
        let mut entries: Vec<(String, u64)> = counts.into_iter().collect();
        entries.sort_by(|a, b| match b.1.cmp(&a.1) {
            Ordering::Equal => a.0.cmp(&b.0),
            other => other,
        });
        FrequencyTable { label: label.into(), entries: entries }
    }

    /// Read a frequency file back, as written by `report::write_frequency_table`.
    ///
    /// Fields may be padded with spaces. The label is taken from the header.
    pub fn read(path: &Path) -> Result<Self> {
        let mut reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)?;
        let label = {
            let headers = reader.headers()?;
            if headers.len() != 2 || &headers[0] != KEY_COLUMN {
                return Err(Error::Malformed(
                    path.to_path_buf(),
                    format!("expected a header '{}, <year>', found {:?}", KEY_COLUMN, headers)));
            }
            headers[1].to_string()
        };
        let mut entries = vec![];
        for record in reader.records() {
            let record = record?;
            let count = record[1].parse::<u64>()?;
            entries.push((record[0].to_string(), count));
        }
        debug!("Read {} variables for {} from {}", entries.len(), label, path.display());
        Ok(FrequencyTable { label: label, entries: entries })
    }

    /// The year, or "all"
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    /// Counts in table order, ready for plotting
    pub fn values(&self) -> Vec<u64> {
        self.entries.iter().map(|&(_, count)| count).collect()
    }

    pub fn get(&self, name: &str) -> Option<u64> {
        self.entries.iter()
            .find(|&&(ref n, _)| n == name)
            .map(|&(_, count)| count)
    }

    /// Lookup for joining
    pub fn counts(&self) -> FarmMap<&str, u64> {
        let mut counts = new_farm();
        for &(ref name, count) in &self.entries {
            counts.insert(name.as_str(), count);
        }
        counts
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The variables of one GAP
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentEntry {
    pub name: String,
    pub year: String,
    pub variables: Vec<String>,
}

impl DocumentEntry {
    /// The year first, so a line can be traced back to its year
    pub fn year_and_variables(&self) -> Vec<&str> {
        let mut fields = Vec::with_capacity(self.variables.len() + 1);
        fields.push(self.year.as_str());
        fields.extend(self.variables.iter().map(|v| v.as_str()));
        fields
    }
}

/// One entry per scanned GAP, in scan order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentVariableIndex {
    entries: Vec<DocumentEntry>,
}

impl DocumentVariableIndex {
    pub fn entries(&self) -> &[DocumentEntry] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&DocumentEntry> {
        self.entries.iter().find(|e| e.name == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Only count variables
    FrequencyOnly,
    /// Also remember which variables every GAP uses
    DocumentIndexed,
}

/// Collects the matches of every document of a run
pub struct Aggregator {
    counts: FarmMap<String, u64>,
    index: Option<DocumentVariableIndex>,
    documents: usize,
}

impl Aggregator {
    pub fn new(mode: Mode) -> Self {
        Aggregator {
            counts: new_farm(),
            index: match mode {
                Mode::FrequencyOnly => None,
                Mode::DocumentIndexed => Some(DocumentVariableIndex::default()),
            },
            documents: 0,
        }
    }

    pub fn add(&mut self, document: &Document, matched: MatchedVariableSet) {
        for variable in &matched {
            *self.counts.entry(variable.clone()).or_insert(0) += 1;
        }
        if let Some(ref mut index) = self.index {
            index.entries.push(DocumentEntry {
                name: document.name.clone(),
                year: document.year.clone(),
                variables: matched.into_iter().collect(),
            });
        }
        self.documents += 1;
    }

    pub fn documents(&self) -> usize {
        self.documents
    }

    /// The frequency table labelled `label`, plus the index when it was kept
    pub fn finish(self, label: &str) -> (FrequencyTable, Option<DocumentVariableIndex>) {
        info!("Counted {} distinct variables in {} documents", self.counts.len(), self.documents);
        (FrequencyTable::from_counts(label, self.counts), self.index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn set(vars: &[&str]) -> MatchedVariableSet {
        vars.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn counts_sorted_descending() {
        let mut agg = Aggregator::new(Mode::FrequencyOnly);
        agg.add(&Document::new("2016/a.txt"), set(&["RINPERSOON"]));
        agg.add(&Document::new("2016/b.txt"), set(&["RINPERSOON", "RINPERSOONS"]));
        let (table, index) = agg.finish("2016");
        assert_eq!(table.label(), "2016");
        assert_eq!(table.entries().to_vec(), vec![("RINPERSOON".to_string(), 2u64),
                                                  ("RINPERSOONS".to_string(), 1u64)]);
        assert!(index.is_none());
    }

    #[test]
    fn ties_break_by_name() {
        let mut agg = Aggregator::new(Mode::FrequencyOnly);
        agg.add(&Document::new("2016/a.txt"), set(&["ZZZ", "AAA", "MMM"]));
        let (table, _) = agg.finish("all");
        let names: Vec<&str> = table.entries().iter().map(|e| e.0.as_str()).collect();
        assert_eq!(names, vec!["AAA", "MMM", "ZZZ"]);
    }

    #[test]
    fn totals_are_conserved() {
        let docs = vec![
            set(&["A", "B", "C"]),
            set(&[]),
            set(&["A"]),
            set(&["B", "C", "D", "E"]),
        ];
        let pairs: usize = docs.iter().map(|d| d.len()).sum();
        let mut agg = Aggregator::new(Mode::FrequencyOnly);
        for (i, doc) in docs.into_iter().enumerate() {
            agg.add(&Document::new(format!("2017/{}.txt", i)), doc);
        }
        assert_eq!(agg.documents(), 4);
        let (table, _) = agg.finish("2017");
        assert_eq!(table.total(), pairs as u64);
        assert_eq!(table.get("A"), Some(2));
        assert_eq!(table.get("E"), Some(1));
        assert_eq!(table.get("Q"), None);
    }

    #[test]
    fn document_index_keeps_year_first() {
        let mut agg = Aggregator::new(Mode::DocumentIndexed);
        agg.add(&Document::new("gap/2016/first.txt"), set(&["RINPERSOONS", "RINPERSOON"]));
        agg.add(&Document::new("gap/2017/second.txt"), set(&[]));
        let (table, index) = agg.finish("all");
        let index = index.unwrap();
        assert_eq!(index.len(), 2);
        let first = index.get("first.txt").unwrap();
        assert_eq!(first.year_and_variables(), vec!["2016", "RINPERSOON", "RINPERSOONS"]);
        assert_eq!(index.get("second.txt").unwrap().year_and_variables(), vec!["2017"]);
        // The year is never counted as a variable
        assert_eq!(table.get("2016"), None);
        assert_eq!(table.total(), 2);
    }

    #[test]
    fn read_padded_frequency_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2016.txt");
        fs::write(&path, "VARNAAM, 2016\nRINPERSOON, 2\nRINPERSOONS, 1\n").unwrap();
        let table = FrequencyTable::read(&path).unwrap();
        assert_eq!(table.label(), "2016");
        assert_eq!(table.values(), vec![2, 1]);
        assert_eq!(table.counts()["RINPERSOONS"], 1);
    }

    #[test]
    fn reject_foreign_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("2016.txt");
        fs::write(&path, "NAME;COUNT\nRINPERSOON;2\n").unwrap();
        match FrequencyTable::read(&path) {
            Err(Error::Malformed(p, _)) => assert_eq!(p, path),
            other => panic!("expected malformed, got {:?}", other),
        }
    }

    #[test]
    fn reject_bad_count() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("all.txt");
        fs::write(&path, "VARNAAM, all\nRINPERSOON, many\n").unwrap();
        assert!(FrequencyTable::read(&path).is_err());
    }
}
