pub mod accumulator;
pub mod bayes;
pub mod config;
pub mod corpus;
pub mod error;
pub mod evaluation;
pub mod model;
pub mod record;
pub mod vector;

pub use accumulator::ClassAccumulator;
pub use bayes::{NaiveBayesClassifier, TestRun};
pub use config::{Config, MalformedPolicy};
pub use error::{BayesError, RecordError, Result};
pub use evaluation::{ClassCounts, ConfusionMatrix, EvaluationReport};
pub use model::{Prediction, ProbabilityModel};
pub use record::{EmailRecord, Label};
