//! Make a variables x years frequency matrix from the frequency files of earlier scans
//!
//! ```text
//! VARNAAM,all,EIGENAAR,2016,2017
//! RINPERSOON,xxx,CBS,xxx,xxx
//! ```
//!
//! The owner (and whatever else is in the variable information table) is joined in by VARNAAM.

// argument parsing
#[macro_use] extern crate clap;
// logging
#[macro_use] extern crate log;
extern crate env_logger;
// lastly, this library
extern crate gapvar;

use std::process;
use gapvar::config::{MergeConfig, merge_args};
use gapvar::errors::*;
use gapvar::pipeline;

pub fn main() {
    // Main can't return a Result, and the ? operator needs the enclosing function to return Result
    if let Err(err) = inner_main() {
        eprintln!("{}\nExiting...", err);
        process::exit(1);
    }
}
pub fn inner_main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = merge_args(app_from_crate!()).get_matches();
    let config = MergeConfig::from_matches(&args)?;

    let out = pipeline::merge_frequencies(&config)?;
    info!("{} variables over {} years", out.matrix.len(), out.matrix.years.len());
    println!("{} written", out.written.display());
    Ok(())
}
