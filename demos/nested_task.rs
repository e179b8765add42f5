extern crate log;
extern crate simple_logger;
extern crate treeval;

use log::Level;

use treeval::baseline::NaiveBayesClassifier;
use treeval::prelude::*;
use treeval::Dataset;

const DATA: &str = "@RELATION rooms
@ATTRIBUTE wifi1 NUMERIC
@ATTRIBUTE wifi2 NUMERIC
@ATTRIBUTE wifi3 NUMERIC
@ATTRIBUTE room {one,two,three}
@DATA
-64,-56,-61,one
-68,-57,-61,one
-63,-60,-60,one
-61,-60,-68,one
-63,-65,-60,one
-64,-55,-63,one
-39,-47,-56,two
-38,-54,-54,two
-41,-49,-52,two
-36,-48,-55,two
-40,-50,-57,two
-43,-45,-53,two
-52,-56,-41,three
-55,-57,-40,three
-51,-55,-44,three
-56,-52,-42,three
-50,-54,-39,three
-53,-58,-43,three
";

fn main() {
    simple_logger::init_with_level(Level::Debug).unwrap();

    // nominal classes are read as their index in the declared value list
    let data: Dataset<u8> = Dataset::from_arff(DATA, "room").unwrap();

    let config = EvaluationConfig::from_json(r#"{"folds": 3, "seed": 42}"#).unwrap();
    let mut eval = Evaluation::new(config);
    let mut model = NaiveBayesClassifier::new();

    let matrix = eval
        .nested_cross_validate(&mut model, data.x(), data.y())
        .unwrap();
    println!("Nested confusion matrix:\n{}", matrix);

    println!("accuracy:  {:.3}", eval.accuracy_from_confusion().unwrap());
    println!("recall:    {:?}", eval.recall().unwrap());
    println!("precision: {:?}", eval.precision().unwrap());
    println!("F1:        {:?}", eval.f1().unwrap());
}
