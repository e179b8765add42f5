//! A classifier that records which rows it is shown.
//!
//! Rows carry their own index in feature column 0 and their label in column 1.

use std::cell::RefCell;

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::model::Classifier;

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    Fit(Vec<usize>),
    Prune { train: Vec<usize>, val: Vec<usize> },
    Predict(Vec<usize>),
}

#[derive(Debug, Default)]
pub struct Recorder {
    pub events: RefCell<Vec<Event>>,
    /// validation rows of the last prune
    pub val: Vec<usize>,
    /// predict correctly only while the last prune validated on this row
    pub good_row: Option<usize>,
    pub drop_last: bool,
    pub fail_fit: bool,
}

impl Recorder {
    pub fn dataset(labels: &[u32]) -> (Array2<f64>, Array1<u32>) {
        let x = Array2::from_shape_fn((labels.len(), 2), |(i, j)| match j {
            0 => i as f64,
            _ => labels[i] as f64,
        });
        (x, Array1::from(labels.to_vec()))
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.borrow().clone()
    }

    fn ids(x: ArrayView2<f64>) -> Vec<usize> {
        x.column(0).iter().map(|&v| v as usize).collect()
    }
}

impl Classifier<u32> for Recorder {
    fn fit(&mut self, x: ArrayView2<f64>, _y: ArrayView1<u32>) -> Result<()> {
        if self.fail_fit {
            return Err(Error::model("refusing to fit"));
        }
        self.events.borrow_mut().push(Event::Fit(Recorder::ids(x)));
        self.val.clear();
        Ok(())
    }

    fn predict(&self, x: ArrayView2<f64>) -> Result<Array1<u32>> {
        self.events
            .borrow_mut()
            .push(Event::Predict(Recorder::ids(x)));

        let correct = self.good_row.map_or(true, |g| self.val.contains(&g));
        let mut labels: Vec<u32> = x
            .column(1)
            .iter()
            .map(|&v| if correct { v as u32 } else { v as u32 + 1 })
            .collect();
        if self.drop_last {
            labels.pop();
        }
        Ok(Array1::from(labels))
    }

    fn prune(
        &mut self,
        x_train: ArrayView2<f64>,
        _y_train: ArrayView1<u32>,
        x_val: ArrayView2<f64>,
        _y_val: ArrayView1<u32>,
    ) -> Result<()> {
        let val = Recorder::ids(x_val);
        self.events.borrow_mut().push(Event::Prune {
            train: Recorder::ids(x_train),
            val: val.clone(),
        });
        self.val = val;
        Ok(())
    }
}
