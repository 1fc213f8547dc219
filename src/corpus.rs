use std::{fs::File, io, path::Path};

use csv::{ByteRecordsIntoIter, ReaderBuilder, Trim};
use tracing::warn;

use crate::config::{Config, MalformedPolicy};
use crate::error::{BayesError, Result};
use crate::record::EmailRecord;

/// Streams parsed records out of a delimited source, one per line, until the
/// source is exhausted. Blank and whitespace-only lines are not records.
pub struct Corpus<R> {
    records: ByteRecordsIntoIter<R>,
    config: Config,
    skipped: usize,
}

impl Corpus<File> {
    pub fn from_path<P: AsRef<Path>>(path: P, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let reader = Self::builder(config)
            .from_path(path)
            .map_err(|source| BayesError::Open {
                path: path.to_path_buf(),
                source,
            })?;

        Ok(Corpus {
            records: reader.into_byte_records(),
            config: config.clone(),
            skipped: 0,
        })
    }
}

impl<R: io::Read> Corpus<R> {
    pub fn from_reader(reader: R, config: &Config) -> Self {
        Corpus {
            records: Self::builder(config).from_reader(reader).into_byte_records(),
            config: config.clone(),
            skipped: 0,
        }
    }

    /// Lines dropped so far under `MalformedPolicy::Skip`.
    pub fn skipped(&self) -> usize {
        self.skipped
    }
}

impl<R> Corpus<R> {
    fn builder(config: &Config) -> ReaderBuilder {
        let mut builder = ReaderBuilder::new();
        // Field counts and UTF-8 are checked by the record parser so errors carry a line number.
        builder
            .has_headers(false)
            .flexible(true)
            .trim(Trim::All)
            .delimiter(config.delimiter());
        builder
    }
}

impl<R: io::Read> Iterator for Corpus<R> {
    type Item = Result<EmailRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let record = match self.records.next()? {
                Ok(record) => record,
                Err(err) => return Some(Err(err.into())),
            };
            if record.len() == 1 && record[0].is_empty() {
                continue;
            }
            let line = record.position().map_or(0, |pos| pos.line());

            match EmailRecord::from_byte_fields(record.iter(), &self.config) {
                Ok(email) => return Some(Ok(email)),
                Err(source) => match self.config.malformed_policy() {
                    MalformedPolicy::Reject => {
                        return Some(Err(BayesError::Malformed { line, source }))
                    }
                    MalformedPolicy::Skip => {
                        warn!(line, %source, "skipping malformed record");
                        self.skipped += 1;
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecordError;
    use crate::record::Label;

    fn config() -> Config {
        Config::new(2, 0.5).unwrap()
    }

    #[test]
    fn reads_until_exhausted() {
        let data = "1,0,0\n0,1,1\n";
        let records: Vec<_> = Corpus::from_reader(data.as_bytes(), &config())
            .collect::<Result<_>>()
            .unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label(), Label::Spam);
        assert_eq!(records[1].label(), Label::Ham);
        assert_eq!(records[1].features(), &[0.5, 1.5]);
    }

    #[test]
    fn ignores_blank_lines() {
        let data = "1,0,0\n\n   \n0,1,1\n\t\n   \n";
        let records: Vec<_> = Corpus::from_reader(data.as_bytes(), &config())
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn invalid_utf8_follows_policy() {
        let data: &[u8] = b"1,0,0\n0,1,1\n\xff,0,0\n";

        let err = Corpus::from_reader(data, &config())
            .collect::<Result<Vec<_>>>()
            .unwrap_err();
        assert!(matches!(
            err,
            BayesError::Malformed {
                line: 3,
                source: RecordError::InvalidUtf8 { index: 0 }
            }
        ));

        let config = config().with_malformed_policy(MalformedPolicy::Skip);
        let mut corpus = Corpus::from_reader(data, &config);
        let records: Vec<_> = corpus.by_ref().collect::<Result<_>>().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(corpus.skipped(), 1);
    }

    #[test]
    fn rejects_malformed_line_with_position() {
        let data = "1,0,0\n1,0\n0,1,1\n";
        let err = Corpus::from_reader(data.as_bytes(), &config())
            .collect::<Result<Vec<_>>>()
            .unwrap_err();

        match err {
            BayesError::Malformed { line, source } => {
                assert_eq!(line, 2);
                assert_eq!(
                    source,
                    RecordError::TokenCount {
                        expected: 3,
                        actual: 2
                    }
                );
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skips_malformed_lines_when_asked() {
        let config = config().with_malformed_policy(MalformedPolicy::Skip);
        let data = "1,0,0\nx,0,1\n0,1,1\n0,1,7\n";
        let mut corpus = Corpus::from_reader(data.as_bytes(), &config);
        let records: Vec<_> = corpus.by_ref().collect::<Result<_>>().unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(corpus.skipped(), 2);
    }

    #[test]
    fn honours_custom_delimiter() {
        let config = config().with_delimiter(b';');
        let records: Vec<_> = Corpus::from_reader("2;3;0\n".as_bytes(), &config)
            .collect::<Result<_>>()
            .unwrap();
        assert_eq!(records[0].features(), &[2.5, 3.5]);
    }

    #[test]
    fn missing_file_is_an_open_error() {
        let result = Corpus::from_path("/definitely/not/here.data", &config());
        assert!(matches!(result, Err(BayesError::Open { .. })));
    }
}
