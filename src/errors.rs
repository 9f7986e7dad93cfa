//
// Errors
//
use std::io;
use std::result;
use std::error;
use std::num;
use std::fmt;
use std::path::PathBuf;
use csv;
use regex;

/// Type alias for gapvar errors
pub type Result<X> = result::Result<X, Error>;

/// Wrapper for many kinds of errors occuring while scanning or merging
#[derive(Debug)]
pub enum Error {
    MissingPath(PathBuf),
    Enumeration(PathBuf, io::Error),
    Unreadable(PathBuf, io::Error),
    Malformed(PathBuf, String),
    IOError(io::Error),
    CsvError(csv::Error),
    ParseIntError(num::ParseIntError),
    PatternError(regex::Error),
    Other(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::MissingPath(ref path) => {
                write!(f, "checkexist: {} does not exist", path.display())
            }
            Error::Enumeration(ref path, ref err) => {
                write!(f,
                    "Could not list the documents in {}. Wrong year? The OS error was: {}",
                    path.display(), err)
            }
            Error::Unreadable(ref path, ref err) => {
                write!(f, "Could not read document {} as text: {}", path.display(), err)
            }
            Error::Malformed(ref path, ref info) => {
                write!(f, "Unexpected layout in {}: {}", path.display(), info)
            }
            Error::IOError(ref err) => write!(f, "IO error: {}", err),
            Error::CsvError(ref err) => write!(f, "CSV error: {}", err),
            Error::ParseIntError(ref err) => write!(f, "Error parsing integer: {}", err),
            Error::PatternError(ref err) => write!(f, "Bad pattern: {}", err),
            Error::Other(ref info) => write!(f, "{}", info),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match *self {
            Error::MissingPath(_) => None,
            Error::Enumeration(_, ref err) => Some(err),
            Error::Unreadable(_, ref err) => Some(err),
            Error::Malformed(_, _) => None,
            Error::IOError(ref err) => Some(err),
            Error::CsvError(ref err) => Some(err),
            Error::ParseIntError(ref err) => Some(err),
            Error::PatternError(ref err) => Some(err),
            Error::Other(_) => None,
        }
    }
}
//
// Convert everything else into Error
//
impl From<io::Error> for Error {
    fn from(err: io::Error) -> Self {
        Error::IOError(err)
    }
}
impl From<csv::Error> for Error {
    fn from(err: csv::Error) -> Self {
        Error::CsvError(err)
    }
}
impl From<num::ParseIntError> for Error {
    fn from(err: num::ParseIntError) -> Self {
        Error::ParseIntError(err)
    }
}
impl From<regex::Error> for Error {
    fn from(err: regex::Error) -> Self {
        Error::PatternError(err)
    }
}

//
// Convert Error into a general io Error
//
impl From<Error> for io::Error {
    fn from(err: Error) -> Self {
        io::Error::new(io::ErrorKind::Other, err)
    }
}
