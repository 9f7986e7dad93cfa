//! Decide which tokens of a GAP are SSB variables
use std::collections::BTreeSet;
use std::path::Path;
use farm::FarmSet;
use files::Document;
use tokenize::{Tokenizer, read_word_list};
use errors::*;

/// Variables found in one document, upper case and sorted
pub type MatchedVariableSet = BTreeSet<String>;

/// The known SSB variable names, as written in the variable list
pub struct ReferenceSet {
    names: FarmSet<String>,
}

impl ReferenceSet {
    pub fn new<I, S>(names: I) -> Self
        where I: IntoIterator<Item=S>, S: Into<String> {
        ReferenceSet { names: names.into_iter().map(|n| n.into()).collect() }
    }

    /// Read a whitespace separated variable list
    pub fn from_file(path: &Path) -> Result<Self> {
        let names = read_word_list(path)?;
        info!("Loaded {} SSB variables from {}", names.len(), path.display());
        Ok(ReferenceSet { names: names })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Find the variables among `tokens`.
///
/// A token counts when it is literally in the reference set, or when its upper case form is and
/// the token itself is not an ordinary word. That keeps a lowercase word that happens to spell a
/// variable code out, unless the GAP wrote it in capitals.
pub fn match_variables<'a, I, T>(tokens: I, reference: &ReferenceSet, tokenizer: &T)
    -> MatchedVariableSet
    where I: IntoIterator<Item=&'a str>, T: Tokenizer + ?Sized {
    let mut found = MatchedVariableSet::new();
    let mut seen = BTreeSet::new();
    for token in tokens {
        if !seen.insert(token) {
            continue;
        }
        let upper = token.to_uppercase();
        if reference.contains(token)
            || (reference.contains(&upper) && !tokenizer.is_known_word(token)) {
            found.insert(upper);
        }
    }
    found
}

/// Log documents that mention suspiciously few variables, they may need a manual look
pub fn report_suspicious(document: &Document, matched: usize, minimum: usize) -> bool {
    let suspicious = matched < minimum;
    if suspicious {
        info!("printsuspiciousgap: {}: aantal var: {}", document.path.display(), matched);
    }
    suspicious
}
