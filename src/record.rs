use std::fmt;

use crate::config::Config;
use crate::error::RecordError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    Spam,
    Ham,
}

impl Label {
    pub const ALL: [Label; 2] = [Label::Spam, Label::Ham];

    /// Corpus encoding: 0 is spam, 1 is ham.
    pub fn code(self) -> u8 {
        match self {
            Label::Spam => 0,
            Label::Ham => 1,
        }
    }

    pub(crate) fn index(self) -> usize {
        self.code() as usize
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Spam => f.write_str("spam"),
            Label::Ham => f.write_str("ham"),
        }
    }
}

/// One email: smoothed word frequencies plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailRecord {
    features: Vec<f64>,
    label: Label,
    total_words: f64,
}

impl EmailRecord {
    /// Parses a single delimited line, e.g. `0,0.64,...,1`.
    pub fn parse(line: &str, config: &Config) -> Result<Self, RecordError> {
        let delimiter = char::from(config.delimiter());
        Self::from_fields(line.split(delimiter), config)
    }

    /// Builds a record from exactly `K + 1` tokens: `K` frequencies then the label.
    pub fn from_fields<'a, I>(fields: I, config: &Config) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let fields: Vec<&str> = fields.into_iter().map(str::trim).collect();
        let k = config.word_set_size();
        if fields.len() != k + 1 {
            return Err(RecordError::TokenCount {
                expected: k + 1,
                actual: fields.len(),
            });
        }

        let mut features = Vec::with_capacity(k);
        for (index, token) in fields[..k].iter().enumerate() {
            let value: f64 = token.parse().map_err(|_| RecordError::InvalidNumber {
                index,
                token: token.to_string(),
            })?;
            if !value.is_finite() || value < 0.0 {
                return Err(RecordError::InvalidFrequency { index, value });
            }
            features.push(value + config.offset());
        }

        let label = match fields[k] {
            "0" => Label::Spam,
            "1" => Label::Ham,
            other => return Err(RecordError::InvalidLabel(other.to_string())),
        };

        Self::new(features, label)
    }

    /// Same as `from_fields`, for raw fields that still need UTF-8 decoding.
    pub fn from_byte_fields<'a, I>(fields: I, config: &Config) -> Result<Self, RecordError>
    where
        I: IntoIterator<Item = &'a [u8]>,
    {
        let fields = fields
            .into_iter()
            .enumerate()
            .map(|(index, field)| {
                std::str::from_utf8(field).map_err(|_| RecordError::InvalidUtf8 { index })
            })
            .collect::<Result<Vec<&str>, _>>()?;
        Self::from_fields(fields, config)
    }

    /// Wraps already-smoothed features. Every feature must be finite and strictly positive.
    pub fn new(features: Vec<f64>, label: Label) -> Result<Self, RecordError> {
        if let Some((index, &value)) = features
            .iter()
            .enumerate()
            .find(|(_, v)| !v.is_finite() || **v <= 0.0)
        {
            return Err(RecordError::InvalidFrequency { index, value });
        }

        let total_words = features.iter().sum();
        Ok(EmailRecord {
            features,
            label,
            total_words,
        })
    }

    pub fn features(&self) -> &[f64] {
        &self.features
    }

    pub fn label(&self) -> Label {
        self.label
    }

    pub fn total_words(&self) -> f64 {
        self.total_words
    }
}
