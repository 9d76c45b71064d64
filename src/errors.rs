use std::error::Error;
use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayError {
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum PagerError {
    /// A navigation call arrived while a page was still loading.
    NavigationInProgress,
    OutOfRange { page: i64, max: i64 },
    Fetch(FetchError),
    Display(DisplayError),
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FetchError::Failed(reason) => write!(f, "Fetch failed: {}", reason),
        }
    }
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DisplayError::Failed(reason) => write!(f, "Display failed: {}", reason),
        }
    }
}

impl fmt::Display for PagerError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            PagerError::NavigationInProgress => write!(f, "Navigation already in progress"),
            PagerError::OutOfRange { page, max } => {
                write!(f, "Page {} is out of range [1, {}]", page, max)
            }
            PagerError::Fetch(err) => write!(f, "Pager error: {}", err),
            PagerError::Display(err) => write!(f, "Pager error: {}", err),
        }
    }
}

impl Error for FetchError {}
impl Error for DisplayError {}
impl Error for PagerError {}

impl From<FetchError> for PagerError {
    fn from(err: FetchError) -> PagerError {
        PagerError::Fetch(err)
    }
}

impl From<DisplayError> for PagerError {
    fn from(err: DisplayError) -> PagerError {
        PagerError::Display(err)
    }
}
