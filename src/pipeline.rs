//! The three runs: count variables, count and index them per GAP, and build the year matrix
use std::path::PathBuf;
use aggregate::{Aggregator, DocumentVariableIndex, FrequencyTable, Mode};
use config::{MergeConfig, ScanConfig};
use files::resolve;
use guard::check_exist;
use matcher::{ReferenceSet, match_variables, report_suspicious};
use merge::{VariableInfo, YearFrequencyMatrix, discover_years, merge, read_year_tables};
use report::{write_document_index, write_frequency_table, write_matrix};
use tokenize::{Tokenizer, UnicodeTokenizer};
use errors::*;

/// What a scan found and where it was written
pub struct ScanOutput {
    pub frequencies: FrequencyTable,
    /// Only in `Mode::DocumentIndexed`
    pub index: Option<DocumentVariableIndex>,
    /// GAPs with fewer variables than the configured minimum
    pub suspicious: Vec<PathBuf>,
    pub written: Vec<PathBuf>,
}

pub struct MergeOutput {
    pub matrix: YearFrequencyMatrix,
    pub written: PathBuf,
}

/// Scan with the unicode tokenizer and the configured vocabulary
pub fn scan(config: &ScanConfig, mode: Mode) -> Result<ScanOutput> {
    check_exist(&config.required_paths())?;
    let tokenizer = match config.vocabulary {
        Some(ref path) => UnicodeTokenizer::from_word_list(path)?,
        None => {
            info!("No vocabulary given, every token that spells a variable counts");
            UnicodeTokenizer::new()
        }
    };
    scan_documents(config, &tokenizer, mode)
}

/// Scan with a tokenizer of your own
pub fn scan_with<T: Tokenizer + ?Sized>(config: &ScanConfig, tokenizer: &T, mode: Mode)
    -> Result<ScanOutput> {
    check_exist(&config.required_paths())?;
    scan_documents(config, tokenizer, mode)
}

fn scan_documents<T: Tokenizer + ?Sized>(config: &ScanConfig, tokenizer: &T, mode: Mode)
    -> Result<ScanOutput> {
    let documents = resolve(&config.root_dir, &config.year)?;
    let reference = ReferenceSet::from_file(&config.reference_list)?;
    info!("Scanning {} GAPs for {}", documents.len(), config.year);

    let mut aggregator = Aggregator::new(mode);
    let mut suspicious = vec![];
    for document in &documents {
        info!("{}", document.name);
        let text = document.read()?;
        let matched = match_variables(tokenizer.tokenize(&text), &reference, tokenizer);
        debug!("{}: {:?}", document.name, matched);
        if report_suspicious(document, matched.len(), config.min_variables_per_document) {
            suspicious.push(document.path.clone());
        }
        aggregator.add(document, matched);
    }

    let label = config.year.label();
    let (frequencies, index) = aggregator.finish(label);
    let mut written = vec![write_frequency_table(&frequencies, &config.output_dir)?];
    if let Some(ref index) = index {
        written.push(write_document_index(index, &config.output_dir, label)?);
    }
    Ok(ScanOutput {
        frequencies: frequencies,
        index: index,
        suspicious: suspicious,
        written: written,
    })
}

/// Merge the frequency files of earlier scans with the variable information
pub fn merge_frequencies(config: &MergeConfig) -> Result<MergeOutput> {
    check_exist(&config.required_paths())?;
    let info = VariableInfo::read(&config.variable_info)?;
    let all = FrequencyTable::read(&config.all_frequencies)?;
    let years = discover_years(&config.frequency_dir)?;
    info!("Merging {} with years {:?}", all.label(), years);
    let tables = read_year_tables(&config.frequency_dir, &years)?;
    let matrix = merge(&all, &info, &tables);
    let written = write_matrix(&matrix, &config.output_dir)?;
    Ok(MergeOutput { matrix: matrix, written: written })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use config::YearSelector;
    use tempfile::{tempdir, TempDir};

    /// root/GAP/<year>/<doc>, out/, varlist.txt and nl.txt
    fn workspace(docs: &[(&str, &str, &str)]) -> TempDir {
        let dir = tempdir().unwrap();
        let root = dir.path().join("GAP");
        for &(year, name, text) in docs {
            fs::create_dir_all(root.join(year)).unwrap();
            fs::write(root.join(year).join(name), text).unwrap();
        }
        fs::create_dir_all(dir.path().join("out")).unwrap();
        fs::write(dir.path().join("varlist.txt"), "RINPERSOON RINPERSOONS\nLEEFTIJD\n").unwrap();
        fs::write(dir.path().join("nl.txt"), "de het een leeftijd per jaar\n").unwrap();
        dir
    }

    fn config(dir: &Path, year: &str) -> ScanConfig {
        let mut config = ScanConfig::new(dir.join("GAP"), dir.join("out"), dir.join("varlist.txt"));
        config.year = year.parse().unwrap();
        config.vocabulary = Some(dir.join("nl.txt"));
        config
    }

    fn read(path: &Path) -> String {
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn two_documents_in_2016() {
        let dir = workspace(&[
            ("2016", "a.txt", "Wij koppelen RINPERSOON aan de leeftijd per jaar."),
            ("2016", "b.txt", "RINPERSOON en RINPERSOONS"),
        ]);
        let out = scan(&config(dir.path(), "2016"), Mode::FrequencyOnly).unwrap();
        assert_eq!(out.frequencies.entries().to_vec(),
                   vec![("RINPERSOON".to_string(), 2u64), ("RINPERSOONS".to_string(), 1u64)]);
        assert_eq!(read(&dir.path().join("out/2016.txt")),
                   "VARNAAM, 2016\nRINPERSOON, 2\nRINPERSOONS, 1\n");
        assert_eq!(out.written, vec![dir.path().join("out/2016.txt")]);
        assert!(out.index.is_none());
        // Both are below the default minimum of 4
        assert_eq!(out.suspicious.len(), 2);
    }

    #[test]
    fn capitalised_leeftijd_counts_without_vocabulary_hit() {
        let dir = workspace(&[("2016", "a.txt", "Leeftijd RINPERSOON")]);
        let out = scan(&config(dir.path(), "all"), Mode::FrequencyOnly).unwrap();
        assert_eq!(out.frequencies.get("LEEFTIJD"), Some(1));
    }

    #[test]
    fn document_index_over_all_years() {
        let dir = workspace(&[
            ("2017", "gap2.txt", "RINPERSOONS LEEFTIJD"),
            ("2016", "gap1.txt", "RINPERSOON leeftijd"),
        ]);
        let mut config = config(dir.path(), "all");
        config.min_variables_per_document = 1;
        let out = scan(&config, Mode::DocumentIndexed).unwrap();
        assert!(out.suspicious.is_empty());
        assert_eq!(read(&dir.path().join("out/GAP_all.txt")),
                   "GAPNAAM, year of GAP, list of variables in that GAP\n\
                    gap1.txt,2016,RINPERSOON\n\
                    gap2.txt,2017,LEEFTIJD,RINPERSOONS\n");
        assert_eq!(out.frequencies.total(), 3);
        assert_eq!(out.written.len(), 2);
    }

    #[test]
    fn stub_tokenizer_can_be_injected() {
        struct Shouting;
        impl Tokenizer for Shouting {
            fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
                text.split_whitespace().collect()
            }
            fn is_known_word(&self, _token: &str) -> bool {
                true
            }
        }
        let dir = workspace(&[("2016", "a.txt", "rinpersoon RINPERSOON leeftijd")]);
        let mut config = config(dir.path(), "2016");
        config.vocabulary = None;
        let out = scan_with(&config, &Shouting, Mode::FrequencyOnly).unwrap();
        assert_eq!(out.frequencies.len(), 1);
        assert_eq!(out.frequencies.get("RINPERSOON"), Some(1));
    }

    #[test]
    fn missing_path_stops_before_anything_is_written() {
        let dir = workspace(&[("2016", "a.txt", "RINPERSOON")]);
        let mut config = config(dir.path(), "all");
        let missing = dir.path().join("no_such_varlist.txt");
        config.reference_list = missing.clone();
        match scan(&config, Mode::DocumentIndexed) {
            Err(Error::MissingPath(path)) => assert_eq!(path, missing),
            other => panic!("expected a missing path, got {:?}", other.map(|o| o.written)),
        }
        assert_eq!(fs::read_dir(dir.path().join("out")).unwrap().count(), 0);
    }

    #[test]
    fn wrong_year_fails_while_enumerating() {
        let dir = workspace(&[("2016", "a.txt", "RINPERSOON")]);
        match scan(&config(dir.path(), "2013"), Mode::FrequencyOnly) {
            Err(Error::Enumeration(..)) => {}
            other => panic!("expected an enumeration error, got {:?}", other.map(|o| o.written)),
        }
    }

    #[test]
    fn unreadable_document_aborts_the_run() {
        let dir = workspace(&[("2016", "a.txt", "RINPERSOON")]);
        fs::write(dir.path().join("GAP/2016/b.txt"), b"\xff\xfe").unwrap();
        match scan(&config(dir.path(), "2016"), Mode::FrequencyOnly) {
            Err(Error::Unreadable(..)) => {}
            other => panic!("expected an unreadable document, got {:?}", other.map(|o| o.written)),
        }
        assert!(!dir.path().join("out/2016.txt").exists());
    }

    #[test]
    fn scans_then_matrix() {
        let dir = workspace(&[
            ("2016", "a.txt", "RINPERSOON LEEFTIJD"),
            ("2016", "b.txt", "RINPERSOON"),
            ("2017", "c.txt", "RINPERSOON RINPERSOONS"),
        ]);
        for year in &["all", "2016", "2017"] {
            scan(&config(dir.path(), year), Mode::DocumentIndexed).unwrap();
        }
        let info = dir.path().join("Varinfo.csv");
        fs::write(&info, "VARNAAM;EIGENAAR\nRINPERSOON;CBS\nLEEFTIJD;GBA\n").unwrap();
        let merged = dir.path().join("merged");
        fs::create_dir(&merged).unwrap();

        let out = merge_frequencies(&MergeConfig::new(dir.path().join("out"), &info, &merged))
            .unwrap();
        assert_eq!(out.matrix.years, vec!["2016", "2017"]);
        assert_eq!(read(&out.written),
                   "VARNAAM,all,EIGENAAR,2016,2017\n\
                    RINPERSOON,3,CBS,2,1\n\
                    LEEFTIJD,1,GBA,1,\n\
                    RINPERSOONS,1,,,1\n");
        assert_eq!(YearSelector::All.label(), out.matrix.all_label);
    }

    #[test]
    fn matrix_needs_all_txt() {
        let dir = tempdir().unwrap();
        let info = dir.path().join("Varinfo.csv");
        fs::write(&info, "VARNAAM;EIGENAAR\n").unwrap();
        let config = MergeConfig::new(dir.path(), &info, dir.path());
        match merge_frequencies(&config) {
            Err(Error::MissingPath(path)) => assert_eq!(path, dir.path().join("all.txt")),
            other => panic!("expected a missing path, got {:?}", other.map(|o| o.written)),
        }
    }
}
