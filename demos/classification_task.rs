extern crate log;
extern crate rand;
extern crate serde_json;
extern crate simple_logger;
extern crate treeval;

use log::Level;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use treeval::baseline::NaiveBayesClassifier;
use treeval::prelude::*;
use treeval::Dataset;

fn main() {
    simple_logger::init_with_level(Level::Info).unwrap();

    // three noisy clusters in the plane, one per class
    let mut rng = StdRng::seed_from_u64(2024);
    let centers = [(0.0, 0.0), (3.0, 0.5), (1.5, 3.0)];
    let mut rows = Vec::new();
    let mut labels = Vec::new();
    for (class, &(cx, cy)) in centers.iter().enumerate() {
        for _ in 0..40 {
            rows.push(vec![
                cx + rng.gen_range(-1.2..1.2),
                cy + rng.gen_range(-1.2..1.2),
            ]);
            labels.push(class as u32 + 1);
        }
    }
    let data = Dataset::from_rows(&rows, labels).unwrap();

    let mut eval = Evaluation::new(EvaluationConfig::with_folds(10).seed(7));
    let mut model = NaiveBayesClassifier::new();

    let matrix = eval
        .cross_validate(&mut model, data.x(), data.y())
        .unwrap();
    println!("Averaged confusion matrix:\n{}", matrix);

    let report = eval.report().unwrap();
    println!("{}", report);
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
