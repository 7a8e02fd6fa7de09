//! Datasets
//!
//! This module implements the dataset struct used across the analysis: a feature matrix
//! paired row-by-row with a target vector, together with the few helpers the workflow
//! needs (column selection, seeded shuffling and splitting).
use ndarray::{Array1, Array2, ArrayBase, Axis, Data, Ix1, Ix2, NdFloat};
use num_traits::{FromPrimitive, NumCast};
use rand::seq::SliceRandom;
use rand::Rng;

use std::fmt;
use std::iter::Sum;

use crate::error::{Error, Result};

/// Floating point numbers
///
/// Implemented for `f32` and `f64`, used for the records of a dataset and for regression
/// targets.
pub trait Float:
    NdFloat + FromPrimitive + Default + Sum + approx::AbsDiffEq<Epsilon = Self> + fmt::Display
{
    fn cast<T: NumCast>(x: T) -> Self {
        NumCast::from(x).unwrap()
    }
}

impl Float for f32 {}
impl Float for f64 {}

/// Records paired with targets
///
/// The records are a two-dimensional array with one observation per row, the targets a
/// one-dimensional array aligned by row index. Feature names are optional.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetBase<R, T> {
    records: R,
    targets: T,
    feature_names: Vec<String>,
}

/// Owned dataset
pub type Dataset<F, T> = DatasetBase<Array2<F>, Array1<T>>;

impl<F, T> Dataset<F, T> {
    /// Create a new dataset from records and targets
    ///
    /// # Panics
    ///
    /// Panics if the number of rows in `records` differs from the number of `targets`. Use
    /// [`Dataset::try_new`] for a checked construction.
    pub fn new(records: Array2<F>, targets: Array1<T>) -> Self {
        assert_eq!(
            records.nrows(),
            targets.len(),
            "records and targets must have the same number of rows"
        );
        DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        }
    }

    /// Create a new dataset, failing with `DimensionMismatch` for misaligned inputs
    pub fn try_new(records: Array2<F>, targets: Array1<T>) -> Result<Self> {
        if records.nrows() != targets.len() {
            return Err(Error::mismatch(
                "dataset targets",
                records.nrows(),
                targets.len(),
            ));
        }
        Ok(DatasetBase {
            records,
            targets,
            feature_names: Vec::new(),
        })
    }

    /// Attach a name to every feature column
    pub fn with_feature_names<I: Into<String>>(mut self, names: Vec<I>) -> Self {
        self.feature_names = names.into_iter().map(Into::into).collect();
        self
    }
}

impl<R, T> DatasetBase<R, T> {
    pub fn records(&self) -> &R {
        &self.records
    }

    pub fn targets(&self) -> &T {
        &self.targets
    }
}

impl<F, S, T, U> DatasetBase<ArrayBase<S, Ix2>, ArrayBase<U, Ix1>>
where
    F: Clone,
    T: Clone,
    S: Data<Elem = F>,
    U: Data<Elem = T>,
{
    /// Number of observations
    pub fn nsamples(&self) -> usize {
        self.records.nrows()
    }

    /// Number of predictors
    pub fn nfeatures(&self) -> usize {
        self.records.ncols()
    }

    /// Names of the feature columns
    ///
    /// Falls back to `feature-{index}` if no complete set of names was attached.
    pub fn feature_names(&self) -> Vec<String> {
        if self.feature_names.len() == self.nfeatures() {
            self.feature_names.clone()
        } else {
            (0..self.nfeatures())
                .map(|idx| format!("feature-{}", idx))
                .collect()
        }
    }

    /// Keep only the feature columns listed in `indices`, in the given order
    pub fn select_features(&self, indices: &[usize]) -> Result<Dataset<F, T>> {
        if let Some(idx) = indices.iter().find(|idx| **idx >= self.nfeatures()) {
            return Err(Error::InvalidArgument(format!(
                "feature index {} out of range for {} features",
                idx,
                self.nfeatures()
            )));
        }

        let names = self.feature_names();

        Ok(DatasetBase {
            records: self.records.select(Axis(1), indices),
            targets: self.targets.to_owned(),
            feature_names: indices.iter().map(|idx| names[*idx].clone()).collect(),
        })
    }

    /// Shuffle the observations with the given random number generator
    pub fn shuffle<G: Rng>(&self, rng: &mut G) -> Dataset<F, T> {
        let mut indices = (0..self.nsamples()).collect::<Vec<_>>();
        indices.shuffle(rng);

        DatasetBase {
            records: self.records.select(Axis(0), &indices),
            targets: self.targets.select(Axis(0), &indices),
            feature_names: self.feature_names.clone(),
        }
    }

    /// Split the dataset into two parts, the first one holding `ratio` of the observations
    ///
    /// The split keeps the current row order, shuffle the dataset first for a random split.
    pub fn split_with_ratio(&self, ratio: f32) -> Result<(Dataset<F, T>, Dataset<F, T>)> {
        if !(0.0..=1.0).contains(&ratio) {
            return Err(Error::InvalidArgument(format!(
                "split ratio should be in range [0, 1], but is {}",
                ratio
            )));
        }

        let n = (self.nsamples() as f32 * ratio).round() as usize;
        let (first, second) = self.records.view().split_at(Axis(0), n);
        let (first_targets, second_targets) = self.targets.view().split_at(Axis(0), n);

        Ok((
            DatasetBase {
                records: first.to_owned(),
                targets: first_targets.to_owned(),
                feature_names: self.feature_names.clone(),
            },
            DatasetBase {
                records: second.to_owned(),
                targets: second_targets.to_owned(),
                feature_names: self.feature_names.clone(),
            },
        ))
    }

    /// Shuffle and split into `(train, test)`, with `test_ratio` of the rows held out
    pub fn train_test_split<G: Rng>(
        &self,
        test_ratio: f32,
        rng: &mut G,
    ) -> Result<(Dataset<F, T>, Dataset<F, T>)> {
        let (test, train) = self.shuffle(rng).split_with_ratio(test_ratio)?;
        Ok((train, test))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;
    use rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn dataset_implements_required_methods() {
        let dataset = Dataset::new(
            array![[1., 2.], [3., 4.], [5., 6.], [7., 8.]],
            array![0., 1., 0., 1.],
        );

        assert_eq!(dataset.nsamples(), 4);
        assert_eq!(dataset.nfeatures(), 2);

        let (first, second) = dataset.split_with_ratio(0.25).unwrap();
        assert_eq!(first.nsamples(), 1);
        assert_eq!(second.nsamples(), 3);
        assert_eq!(first.records(), &array![[1., 2.]]);

        let selected = dataset.select_features(&[1]).unwrap();
        assert_eq!(selected.records(), &array![[2.], [4.], [6.], [8.]]);
        assert_eq!(selected.targets(), dataset.targets());
    }

    #[test]
    fn misaligned_targets_are_rejected() {
        let res = Dataset::try_new(array![[1., 2.], [3., 4.]], array![1.]);
        assert!(matches!(
            res,
            Err(Error::DimensionMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }

    #[test]
    fn out_of_range_feature_is_rejected() {
        let dataset = Dataset::new(array![[1., 2.]], array![1.]);
        assert!(dataset.select_features(&[2]).is_err());
        assert!(dataset.split_with_ratio(1.5).is_err());
    }

    #[test]
    fn train_test_split_is_reproducible() {
        let records = Array2::from_shape_fn((20, 3), |(i, j)| (i * 3 + j) as f64);
        let targets = Array1::from_shape_fn(20, |i| i as f64);
        let dataset = Dataset::new(records, targets);

        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let (train, test) = dataset.train_test_split(0.3, &mut rng).unwrap();
        assert_eq!(test.nsamples(), 6);
        assert_eq!(train.nsamples(), 14);

        let mut rng = Xoshiro256Plus::seed_from_u64(42);
        let (train2, test2) = dataset.train_test_split(0.3, &mut rng).unwrap();
        assert_eq!(train, train2);
        assert_eq!(test, test2);

        // rows and targets stay aligned after shuffling
        for (row, target) in train.records().rows().into_iter().zip(train.targets()) {
            assert_eq!(row[0], target * 3.);
        }
    }

    #[test]
    fn feature_names_follow_selection() {
        let dataset = Dataset::new(array![[1., 2., 3.]], array![1.]);
        assert_eq!(dataset.feature_names(), vec!["feature-0", "feature-1", "feature-2"]);

        let dataset = dataset.with_feature_names(vec!["age", "balance", "duration"]);
        let selected = dataset.select_features(&[2, 0]).unwrap();
        assert_eq!(selected.feature_names(), vec!["duration", "age"]);
        assert_eq!(selected.records(), &array![[3., 1.]]);
    }
}
