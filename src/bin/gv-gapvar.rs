//! Count the SSB variables in GAPs, and list which variables every GAP uses
//!
//! Besides `<destdir>/<year>.txt` this writes `<destdir>/GAP_<year>.txt`, one line per GAP with
//! its year and variables.

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

    let out = pipeline::scan(&config, Mode::DocumentIndexed)?;
    if let Some(ref index) = out.index {
        info!("Indexed {} GAPs", index.len());
    }
    for path in &out.written {
        println!("{} written", path.display());
    }

    print!("{}", rank_frequency_plot(&out.frequencies, config.max_variables_plotted,
                                     &config.plot_skip));
    Ok(())
}
