//! Count how often SSB variables are used in GAP documents
//!
//! The binaries scan directories of GAP text files (one subdirectory per year), look for the
//! variables of the SSB variable list, and write frequency tables per year. A last step merges
//! those tables and the variable ownership table into a single variable by year matrix.


#[macro_use] extern crate log;
extern crate clap;
extern crate csv;
extern crate ndarray;
extern crate regex;
extern crate farmhash;
extern crate unicode_segmentation;
#[cfg(test)] extern crate tempfile;
pub mod errors;
pub mod farm;
pub mod config;
pub mod guard;
pub mod files;
pub mod tokenize;
pub mod matcher;
pub mod aggregate;
pub mod merge;
pub mod report;
pub mod pipeline;
