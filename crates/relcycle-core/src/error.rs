use thiserror::Error;

/// Raised when a reference override is neither `"now"` nor an ISO-8601 date.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid date \"{input}\": expected an ISO-8601 date or \"now\"")]
pub struct InvalidDateError {
    input: String,
}

impl InvalidDateError {
    pub fn new<T: Into<String>>(input: T) -> Self {
        Self {
            input: input.into(),
        }
    }

    /// The string that failed to parse.
    pub fn input(&self) -> &str {
        &self.input
    }
}
