//! Simple baseline models, used for testing and demonstration.

mod naive_bayes_classifier;

pub use self::naive_bayes_classifier::NaiveBayesClassifier;
