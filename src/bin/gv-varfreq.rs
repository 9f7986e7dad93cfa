//! Count the SSB variables in the GAPs of one year, or of all years
//!
//! Writes `<destdir>/<year>.txt` with the variables by descending frequency and prints a
//! rank-frequency plot.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate gapvar;

use std::process;
use gapvar::aggregate::Mode;
use gapvar::config::{ScanConfig, scan_args};
use gapvar::errors::*;
use gapvar::pipeline;
use gapvar::report::rank_frequency_plot;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("{}\nExiting...", err);
        process::exit(1);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = scan_args(app_from_crate!()).get_matches();
    let config = ScanConfig::from_matches(&args)?;

    let out = pipeline::scan(&config, Mode::FrequencyOnly)?;
    if !out.suspicious.is_empty() {
        info!("{} GAPs have fewer than {} variables", out.suspicious.len(),
            config.min_variables_per_document);
    }

    print!("{}", rank_frequency_plot(&out.frequencies, config.max_variables_plotted,
                                     &config.plot_skip));
    Ok(())
}
