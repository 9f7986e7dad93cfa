//! Run settings for the scan and merge binaries
//!
//! Everything a run needs is carried in a `ScanConfig` or `MergeConfig` value, so one process
//! (or one test) can do several runs with different settings.
use clap::{App, Arg, ArgMatches};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use errors::*;

pub const DEFAULT_MIN_VARIABLES: usize = 4;
pub const DEFAULT_MAX_PLOTTED: usize = 200;
/// RINPERSOON and RINPERSOONS are in nearly every GAP, they flatten the plot
pub const DEFAULT_PLOT_SKIP: &str = "RINPERSOON,RINPERSOONS";

/// Which GAPs to scan: one year subdirectory, or all of them
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum YearSelector {
    All,
    Year(String),
}

impl YearSelector {
    /// Names the output files and the count column
    pub fn label(&self) -> &str {
        match *self {
            YearSelector::All => "all",
            YearSelector::Year(ref year) => year,
        }
    }
}

impl FromStr for YearSelector {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "" => Err(Error::Other("The year selector can't be empty".to_string())),
            "all" => Ok(YearSelector::All),
            year => Ok(YearSelector::Year(year.to_string())),
        }
    }
}

impl fmt::Display for YearSelector {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Settings for scanning GAP documents
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Contains one subdirectory per year, each holding GAP text files
    pub root_dir: PathBuf,
    pub year: YearSelector,
    pub output_dir: PathBuf,
    /// Whitespace separated list of every SSB variable
    pub reference_list: PathBuf,
    /// Known words of the working language, exact case
    pub vocabulary: Option<PathBuf>,
    /// GAPs with fewer variables than this are reported for review
    pub min_variables_per_document: usize,
    pub max_variables_plotted: usize,
    pub plot_skip: Vec<String>,
}

impl ScanConfig {
    pub fn new<P, Q, R>(root_dir: P, output_dir: Q, reference_list: R) -> Self
        where P: Into<PathBuf>, Q: Into<PathBuf>, R: Into<PathBuf> {
        ScanConfig {
            root_dir: root_dir.into(),
            year: YearSelector::All,
            output_dir: output_dir.into(),
            reference_list: reference_list.into(),
            vocabulary: None,
            min_variables_per_document: DEFAULT_MIN_VARIABLES,
            max_variables_plotted: DEFAULT_MAX_PLOTTED,
            plot_skip: split_names(DEFAULT_PLOT_SKIP),
        }
    }

    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let mut config = ScanConfig::new(
            required(args, "root")?,
            required(args, "destdir")?,
            required(args, "varlist")?);
        config.year = args.value_of("year").unwrap_or("all").parse()?;
        config.vocabulary = args.value_of("vocabulary").map(PathBuf::from);
        if let Some(n) = args.value_of("min-vars") {
            config.min_variables_per_document = n.parse()?;
        }
        if let Some(n) = args.value_of("max-plotted") {
            config.max_variables_plotted = n.parse()?;
        }
        if let Some(names) = args.value_of("plot-skip") {
            config.plot_skip = split_names(names);
        }
        Ok(config)
    }

    /// Everything that has to exist before the scan starts.
    ///
    /// The year subdirectory is not in here, a wrong year shows up when listing it.
    pub fn required_paths(&self) -> Vec<&Path> {
        let mut paths = vec![
            self.root_dir.as_path(),
            self.output_dir.as_path(),
            self.reference_list.as_path(),
        ];
        if let Some(ref vocabulary) = self.vocabulary {
            paths.push(vocabulary.as_path());
        }
        paths
    }
}

/// Settings for merging frequency files into the variable by year matrix
#[derive(Debug, Clone)]
pub struct MergeConfig {
    /// Holds all.txt and the <year>.txt files written by a scan
    pub frequency_dir: PathBuf,
    pub all_frequencies: PathBuf,
    /// Semicolon separated, keyed by VARNAAM
    pub variable_info: PathBuf,
    pub output_dir: PathBuf,
}

impl MergeConfig {
    pub fn new<P, Q, R>(frequency_dir: P, variable_info: Q, output_dir: R) -> Self
        where P: Into<PathBuf>, Q: Into<PathBuf>, R: Into<PathBuf> {
        let frequency_dir = frequency_dir.into();
        MergeConfig {
            all_frequencies: frequency_dir.join("all.txt"),
            frequency_dir: frequency_dir,
            variable_info: variable_info.into(),
            output_dir: output_dir.into(),
        }
    }

    pub fn from_matches(args: &ArgMatches) -> Result<Self> {
        let mut config = MergeConfig::new(
            required(args, "freqdir")?,
            required(args, "varinfo")?,
            required(args, "destdir")?);
        if let Some(all) = args.value_of("all") {
            config.all_frequencies = PathBuf::from(all);
        }
        Ok(config)
    }

    pub fn required_paths(&self) -> Vec<&Path> {
        vec![
            self.frequency_dir.as_path(),
            self.output_dir.as_path(),
            self.all_frequencies.as_path(),
            self.variable_info.as_path(),
        ]
    }
}

/// Arguments of the two scanning binaries
pub fn scan_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app
        .arg_from_usage("<root> 'directory with one subdirectory of GAP text files per year'")
        .arg_from_usage("<varlist> 'file listing every SSB variable, separated by whitespace'")
        .arg_from_usage("<destdir> 'directory in which to store the frequency files'")
        .arg(Arg::from_usage("-y, --year=[YEAR] 'only scan this year subdirectory, or all'")
             .default_value("all"))
        .arg_from_usage("--vocabulary=[FILE] 'known words of the GAP language, used to reject lowercase look-alikes'")
        .arg(Arg::from_usage("--min-vars=[N] 'report GAPs with fewer variables than this'")
             .default_value("4"))
        .arg(Arg::from_usage("--max-plotted=[N] 'how many ranks to plot'")
             .default_value("200"))
        .arg(Arg::from_usage("--plot-skip=[NAMES] 'comma separated variables left out of the plot'")
             .default_value(DEFAULT_PLOT_SKIP))
}

/// Arguments of the matrix binary
pub fn merge_args<'a, 'b>(app: App<'a, 'b>) -> App<'a, 'b> {
    app
        .arg_from_usage("<freqdir> 'directory containing all.txt and one <year>.txt per year'")
        .arg_from_usage("<varinfo> 'semicolon separated variable ownership table, keyed by VARNAAM'")
        .arg_from_usage("<destdir> 'directory in which to store varyearfreqmatrix.csv'")
        .arg_from_usage("--all=[FILE] 'frequency file over all years, defaults to <freqdir>/all.txt'")
}

fn required<'m>(args: &'m ArgMatches, name: &str) -> Result<&'m str> {
    args.value_of(name)
        .ok_or_else(|| Error::Other(format!("Missing argument <{}>", name)))
}

fn split_names(names: &str) -> Vec<String> {
    names.split(',')
        .map(|name| name.trim())
        .filter(|name| !name.is_empty())
        .map(|name| name.to_string())
        .collect()
}
