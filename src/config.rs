use crate::error::{BayesError, Result};

/// Number of tracked words in the Spambase feature vectors.
pub const DEFAULT_WORD_SET_SIZE: usize = 57;

/// Added to every frequency so no word ever has zero probability.
pub const DEFAULT_OFFSET: f64 = 1.0 / 4000.0;

/// What to do with a line that doesn't parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MalformedPolicy {
    /// Abort the current phase on the first bad line.
    #[default]
    Reject,
    /// Log the bad line and keep going.
    Skip,
}

/// Settings shared by training and testing. A trained classifier keeps its own copy
/// so both phases always agree on `K` and the offset.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    word_set_size: usize,
    offset: f64,
    delimiter: u8,
    malformed: MalformedPolicy,
}

impl Config {
    pub fn new(word_set_size: usize, offset: f64) -> Result<Self> {
        if word_set_size == 0 {
            return Err(BayesError::InvalidConfig(
                "word set size must be at least 1".to_string(),
            ));
        }
        if !offset.is_finite() || offset <= 0.0 {
            return Err(BayesError::InvalidConfig(format!(
                "smoothing offset must be a positive number, got {offset}"
            )));
        }

        Ok(Config {
            word_set_size,
            offset,
            delimiter: b',',
            malformed: MalformedPolicy::default(),
        })
    }

    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn with_malformed_policy(mut self, malformed: MalformedPolicy) -> Self {
        self.malformed = malformed;
        self
    }

    pub fn word_set_size(&self) -> usize {
        self.word_set_size
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }

    pub fn delimiter(&self) -> u8 {
        self.delimiter
    }

    pub fn malformed_policy(&self) -> MalformedPolicy {
        self.malformed
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            word_set_size: DEFAULT_WORD_SET_SIZE,
            offset: DEFAULT_OFFSET,
            delimiter: b',',
            malformed: MalformedPolicy::Reject,
        }
    }
}
