//! Evaluation settings

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::error::Result;

/// Settings shared by every evaluation run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationConfig {
    /// number of (outer) folds
    pub folds: usize,

    /// seed for fold shuffling; `None` draws from OS entropy
    pub seed: Option<u64>,
}

impl Default for EvaluationConfig {
    fn default() -> Self {
        EvaluationConfig {
            folds: 10,
            seed: None,
        }
    }
}

impl EvaluationConfig {
    pub fn with_folds(folds: usize) -> Self {
        EvaluationConfig {
            folds,
            ..Default::default()
        }
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    pub(crate) fn rng(&self) -> StdRng {
        match self.seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        }
    }
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let cfg = EvaluationConfig::from_json(r#"{"seed": 3}"#).unwrap();
    assert_eq!(cfg.folds, 10);
    assert_eq!(cfg.seed, Some(3));

    let cfg = EvaluationConfig::from_json("{}").unwrap();
    assert_eq!(cfg, EvaluationConfig::default());
}

#[test]
fn builder() {
    let cfg = EvaluationConfig::with_folds(5).seed(9);
    assert_eq!(cfg.folds, 5);
    assert_eq!(cfg.seed, Some(9));
}
