use anyhow::Result;
use clap::Parser;
use spam_bayes::config::{DEFAULT_OFFSET, DEFAULT_WORD_SET_SIZE};
use spam_bayes::{Config, MalformedPolicy, NaiveBayesClassifier};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trains a naive Bayes spam filter on word-frequency vectors and reports how it
/// does on a held-out test set.
#[derive(Debug, Parser)]
#[clap(version, about, long_about = None)]
struct CommandArgs {
    /// Training corpus, one `v1,...,vK,label` record per line
    #[clap(long, default_value = "training_set.data")]
    train: PathBuf,
    /// Test corpus, same format as the training corpus
    #[clap(long, default_value = "test_set.data")]
    test: PathBuf,
    /// Number of word frequencies per record
    #[clap(short = 'k', long, default_value_t = DEFAULT_WORD_SET_SIZE)]
    word_set_size: usize,
    /// Smoothing offset added to every frequency
    #[clap(long, default_value_t = DEFAULT_OFFSET)]
    offset: f64,
    /// Drop malformed lines instead of aborting
    #[clap(long)]
    skip_malformed: bool,
    /// Write per-record predictions as CSV
    #[clap(short, long)]
    output: Option<PathBuf>,
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = CommandArgs::parse();

    let default_filter = if cli.verbose {
        "spam_bayes=debug"
    } else {
        "spam_bayes=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let policy = if cli.skip_malformed {
        MalformedPolicy::Skip
    } else {
        MalformedPolicy::Reject
    };
    let config = Config::new(cli.word_set_size, cli.offset)?.with_malformed_policy(policy);

    info!(path = %cli.train.display(), k = config.word_set_size(), offset = config.offset(), "training");
    let classifier = NaiveBayesClassifier::new(&cli.train, config)?;

    info!(path = %cli.test.display(), "testing");
    let report = match &cli.output {
        Some(output) => classifier.predict(&cli.test, output)?,
        None => classifier.evaluate(&cli.test)?,
    };

    println!("{report}");

    Ok(())
}
