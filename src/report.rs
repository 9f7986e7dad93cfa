//! Write results to disk, and draw the rank-frequency plot
use std::fmt::Write as FmtWrite;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use csv::Writer;
use aggregate::{DocumentVariableIndex, FrequencyTable, KEY_COLUMN};
use merge::YearFrequencyMatrix;
use errors::*;

pub const MATRIX_FILE: &str = "varyearfreqmatrix.csv";
const PLOT_WIDTH: usize = 60;

/// Save `table` as `<dir>/<label>.txt`, one "VARIABLE, count" line each, in table order
pub fn write_frequency_table(table: &FrequencyTable, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(format!("{}.txt", table.label()));
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "{}, {}", KEY_COLUMN, table.label())?;
    for &(ref name, count) in table.entries() {
        writeln!(out, "{}, {}", name, count)?;
    }
    out.flush()?;
    info!("Wrote {} variables to {}", table.len(), path.display());
    Ok(path)
}

/// Save `index` as `<dir>/GAP_<label>.txt`, one "name,year,variables..." line per GAP
pub fn write_document_index(index: &DocumentVariableIndex, dir: &Path, label: &str)
    -> Result<PathBuf> {
    let path = dir.join(format!("GAP_{}.txt", label));
    let mut out = BufWriter::new(File::create(&path)?);
    writeln!(out, "GAPNAAM, year of GAP, list of variables in that GAP")?;
    for entry in index.entries() {
        writeln!(out, "{},{}", entry.name, entry.year_and_variables().join(","))?;
    }
    out.flush()?;
    info!("Wrote the variables of {} GAPs to {}", index.len(), path.display());
    Ok(path)
}

/// Save `matrix` as a CSV in `dir`. Missing counts and information are empty fields.
pub fn write_matrix(matrix: &YearFrequencyMatrix, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(MATRIX_FILE);
    let mut out = Writer::from_path(&path)?;
    let mut header = vec![KEY_COLUMN, matrix.all_label.as_str()];
    header.extend(matrix.info_columns.iter().map(|c| c.as_str()));
    header.extend(matrix.years.iter().map(|y| y.as_str()));
    out.write_record(&header)?;

    let blank_info = vec![String::new(); matrix.info_columns.len()];
    for (row, variable) in matrix.variables.iter().enumerate() {
        let mut record = vec![variable.clone(), matrix.all[row].to_string()];
        match matrix.info[row] {
            Some(ref values) => record.extend(values.iter().cloned()),
            None => record.extend(blank_info.iter().cloned()),
        }
        record.extend(matrix.counts.row(row).iter()
            .map(|count| count.map(|c| c.to_string()).unwrap_or_default()));
        out.write_record(&record)?;
    }
    out.flush()?;
    info!("{} written in dir {}", MATRIX_FILE, dir.display());
    Ok(path)
}

/// Text chart of the counts by rank, at most `max_ranks` ranks.
///
/// Leading variables listed in `skip` (RINPERSOON and friends) are in almost every GAP and would
/// squash everything else, so they are left out of the picture. The data is not changed.
pub fn rank_frequency_plot(table: &FrequencyTable, max_ranks: usize, skip: &[String]) -> String {
    let entries = table.entries();
    let skipped = entries.iter()
        .take(skip.len())
        .take_while(|e| skip.contains(&e.0))
        .count();
    let end = ::std::cmp::min(max_ranks, entries.len());
    let shown = if skipped < end { &entries[skipped..end] } else { &entries[0..0] };

    let mut plot = String::new();
    let _ = writeln!(plot, "GAP variabelen frequentie ({})", table.label());
    let top = match shown.iter().map(|e| e.1).max() {
        Some(top) if top > 0 => top,
        _ => {
            let _ = writeln!(plot, "(nothing to plot)");
            return plot;
        }
    };
    let name_width = shown.iter().map(|e| e.0.chars().count()).max().unwrap_or(0);
    for (i, &(ref name, count)) in shown.iter().enumerate() {
        let bar = (count as usize * PLOT_WIDTH + top as usize - 1) / top as usize;
        let _ = writeln!(plot, "{:>4} {:<width$} {} {}",
            skipped + i + 1, name, "#".repeat(bar), count, width = name_width);
    }
    plot
}
