//! Turn GAP text into tokens, and tell ordinary words apart from variable codes
use std::fs;
use std::path::Path;
use unicode_segmentation::UnicodeSegmentation;
use farm::{FarmSet, new_farm_set};
use errors::*;

/// What the variable matcher needs from a natural language tokenizer
pub trait Tokenizer {
    /// Tokens in the order they appear in `text`
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;

    /// Whether `token`, exactly as written, is a word of the working language
    fn is_known_word(&self, token: &str) -> bool;
}

/// Unicode word boundaries plus a fixed list of known words
pub struct UnicodeTokenizer {
    vocabulary: FarmSet<String>,
}

impl UnicodeTokenizer {
    /// A tokenizer that knows no words at all
    pub fn new() -> Self {
        UnicodeTokenizer { vocabulary: new_farm_set() }
    }

    pub fn with_vocabulary<I, S>(words: I) -> Self
        where I: IntoIterator<Item=S>, S: Into<String> {
        UnicodeTokenizer {
            vocabulary: words.into_iter().map(|w| w.into()).collect(),
        }
    }

    /// Load the known words from a whitespace separated word list
    pub fn from_word_list<P: AsRef<Path>>(path: P) -> Result<Self> {
        let words = read_word_list(path.as_ref())?;
        info!("Loaded {} known words from {}", words.len(), path.as_ref().display());
        Ok(UnicodeTokenizer { vocabulary: words })
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary.len()
    }
}

impl Default for UnicodeTokenizer {
    fn default() -> Self {
        UnicodeTokenizer::new()
    }
}

impl Tokenizer for UnicodeTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // Punctuation stays a token, whitespace does not
        text.split_word_bounds()
            .filter(|segment| !segment.trim().is_empty())
            .collect()
    }

    fn is_known_word(&self, token: &str) -> bool {
        self.vocabulary.contains(token)
    }
}

/// Every whitespace separated entry of a list file, as a set
pub fn read_word_list(path: &Path) -> Result<FarmSet<String>> {
    let content = fs::read_to_string(path)
        .map_err(|err| Error::Unreadable(path.to_path_buf(), err))?;
    Ok(content.split_whitespace().map(|w| w.to_string()).collect())
}
