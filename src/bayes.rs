use anyhow::{Context, Result};
use std::{fs::File, io, path::Path};
use tracing::info;

use crate::accumulator::ClassAccumulator;
use crate::config::Config;
use crate::corpus::Corpus;
use crate::error::BayesError;
use crate::evaluation::{ClassCounts, ConfusionMatrix, EvaluationReport};
use crate::model::{Prediction, ProbabilityModel};
use crate::record::{EmailRecord, Label};

/// A trained spam filter. Training runs to completion inside the constructor,
/// so every method here sees a frozen model.
pub struct NaiveBayesClassifier {
    config: Config,
    model: ProbabilityModel,
    training: ClassCounts,
}

/// Outcome of running a test corpus through the classifier.
#[derive(Debug, Clone)]
pub struct TestRun {
    pub confusion: ConfusionMatrix,
    pub predictions: Vec<(Label, Prediction)>,
    pub skipped: usize,
}

impl NaiveBayesClassifier {
    pub fn new<P: AsRef<Path>>(path: P, config: Config) -> Result<Self> {
        let path = path.as_ref();
        let mut corpus = Corpus::from_path(path, &config)?;
        Self::train_corpus(&mut corpus, config)
            .with_context(|| format!("failed to train on {}", path.display()))
    }

    pub fn from_reader<R: io::Read>(reader: R, config: Config) -> Result<Self> {
        let mut corpus = Corpus::from_reader(reader, &config);
        Ok(Self::train_corpus(&mut corpus, config)?)
    }

    /// Trains on already-parsed records.
    pub fn train<I>(records: I, config: Config) -> Result<Self, BayesError>
    where
        I: IntoIterator<Item = EmailRecord>,
    {
        let accumulator = accumulate(records.into_iter().map(Ok), &config)?;
        Self::finish(accumulator, config, 0)
    }

    fn train_corpus<R: io::Read>(
        corpus: &mut Corpus<R>,
        config: Config,
    ) -> Result<Self, BayesError> {
        // Drain the corpus first so the skip count is final.
        let accumulator = accumulate(corpus.by_ref(), &config)?;
        Self::finish(accumulator, config, corpus.skipped())
    }

    fn finish(
        accumulator: ClassAccumulator,
        config: Config,
        skipped: usize,
    ) -> Result<Self, BayesError> {
        let training = ClassCounts {
            spam: accumulator.count(Label::Spam),
            ham: accumulator.count(Label::Ham),
            skipped,
        };
        info!(
            records = training.total(),
            spam = training.spam,
            ham = training.ham,
            skipped,
            "training pass complete"
        );

        let model = accumulator.finish()?;

        Ok(NaiveBayesClassifier {
            config,
            model,
            training,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn model(&self) -> &ProbabilityModel {
        &self.model
    }

    pub fn training_counts(&self) -> ClassCounts {
        self.training
    }

    pub fn predict_one(&self, record: &EmailRecord) -> Result<Prediction, BayesError> {
        self.model.predict(record)
    }

    /// Parses one line with the training configuration and scores it.
    pub fn predict_line(&self, line: &str) -> Result<Prediction> {
        let record = EmailRecord::parse(line, &self.config)
            .with_context(|| format!("malformed record: {line:?}"))?;
        Ok(self.predict_one(&record)?)
    }

    /// Scores every record of a test corpus.
    pub fn test<P: AsRef<Path>>(&self, path: P) -> Result<TestRun> {
        let path = path.as_ref();
        let mut corpus = Corpus::from_path(path, &self.config)?;
        self.test_corpus(&mut corpus)
            .with_context(|| format!("failed to test on {}", path.display()))
    }

    pub fn test_reader<R: io::Read>(&self, reader: R) -> Result<TestRun> {
        let mut corpus = Corpus::from_reader(reader, &self.config);
        Ok(self.test_corpus(&mut corpus)?)
    }

    fn test_corpus<R: io::Read>(&self, corpus: &mut Corpus<R>) -> Result<TestRun, BayesError> {
        let mut confusion = ConfusionMatrix::new();
        let mut predictions = Vec::new();
        for record in corpus.by_ref() {
            let record = record?;
            let prediction = self.predict_one(&record)?;
            confusion.record(record.label(), prediction.label);
            predictions.push((record.label(), prediction));
        }

        info!(
            records = confusion.total(),
            correct = confusion.correct(),
            skipped = corpus.skipped(),
            "test pass complete"
        );

        Ok(TestRun {
            confusion,
            predictions,
            skipped: corpus.skipped(),
        })
    }

    /// Runs a test corpus and writes one prediction per record to `outpath`.
    pub fn predict<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        inpath: P,
        outpath: Q,
    ) -> Result<EvaluationReport> {
        let run = self.test(inpath)?;
        let outpath = outpath.as_ref();
        let file = File::create(outpath)
            .with_context(|| format!("cannot create {}", outpath.display()))?;
        write_predictions(file, &run)?;
        info!(path = %outpath.display(), "wrote predictions");
        Ok(self.report(&run))
    }

    /// Runs a test corpus and summarizes it.
    pub fn evaluate<P: AsRef<Path>>(&self, path: P) -> Result<EvaluationReport> {
        let run = self.test(path)?;
        Ok(self.report(&run))
    }

    pub fn report(&self, run: &TestRun) -> EvaluationReport {
        EvaluationReport {
            training: self.training,
            confusion: run.confusion,
            test_skipped: run.skipped,
        }
    }
}

fn accumulate<I>(records: I, config: &Config) -> Result<ClassAccumulator, BayesError>
where
    I: Iterator<Item = Result<EmailRecord, BayesError>>,
{
    let mut accumulator = ClassAccumulator::new(config.word_set_size());
    for record in records {
        accumulator.add(&record?)?;
    }
    Ok(accumulator)
}

/// Writes `ID,Label,Predicted,LogRatio` rows, IDs starting at 1.
pub fn write_predictions<W: io::Write>(writer: W, run: &TestRun) -> Result<()> {
    let mut writer = csv::Writer::from_writer(writer);

    writer.write_record(["ID", "Label", "Predicted", "LogRatio"])?;
    for (i, (truth, prediction)) in run.predictions.iter().enumerate() {
        writer.write_record(&[
            (i + 1).to_string(),
            truth.to_string(),
            prediction.label.to_string(),
            prediction.log_ratio.to_string(),
        ])?;
    }
    writer.flush()?;

    Ok(())
}
