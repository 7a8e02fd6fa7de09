//! Utility functions for randomly generating datasets

use ndarray::{s, Array, Array1, Array2, ArrayBase, Data, Ix1, Ix2};
use ndarray_rand::{
    rand::{seq::SliceRandom, Rng},
    rand_distr::{Bernoulli, Distribution, StandardNormal, Uniform},
    RandomExt,
};
use regpath::{Dataset, Result};

/// Sparse coefficient vector with `ninformative` non-zero entries
///
/// The informative features are the first `ninformative` columns, their coefficients are drawn
/// uniformly from `[1, 3)` with a random sign. `ninformative` is clamped to `nfeatures`.
pub fn sparse_coefficients(
    nfeatures: usize,
    ninformative: usize,
    rng: &mut impl Rng,
) -> Array1<f64> {
    let ninformative = ninformative.min(nfeatures);
    let mut coefficients = Array1::zeros(nfeatures);

    let magnitudes = Array::random_using(ninformative, Uniform::new(1.0, 3.0), rng);
    for (coef, magnitude) in coefficients
        .slice_mut(s![..ninformative])
        .iter_mut()
        .zip(magnitudes.iter())
    {
        *coef = if rng.gen::<bool>() { *magnitude } else { -magnitude };
    }

    coefficients
}

/// Linear regression problem with a sparse ground truth
///
/// Records are standard normal, targets are `intercept + X·w` plus gaussian noise with standard
/// deviation `noise_std`. Returns the dataset together with the true coefficients `w`, see
/// [`sparse_coefficients`] for their layout.
pub fn sparse_regression(
    nsamples: usize,
    nfeatures: usize,
    ninformative: usize,
    intercept: f64,
    noise_std: f64,
    rng: &mut impl Rng,
) -> (Dataset<f64, f64>, Array1<f64>) {
    let coefficients = sparse_coefficients(nfeatures, ninformative, rng);
    let records: Array2<f64> = Array::random_using((nsamples, nfeatures), StandardNormal, rng);
    let noise: Array1<f64> = Array::random_using(nsamples, StandardNormal, rng);

    let targets = records.dot(&coefficients) + intercept + noise * noise_std;

    (Dataset::new(records, targets), coefficients)
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

/// Draw binary labels from the logistic model `P(y = 1) = σ(bias + x·w)`
pub fn logistic_labels(
    records: &ArrayBase<impl Data<Elem = f64>, Ix2>,
    coefficients: &ArrayBase<impl Data<Elem = f64>, Ix1>,
    bias: f64,
    rng: &mut impl Rng,
) -> Array1<bool> {
    records
        .dot(coefficients)
        .iter()
        .map(|logit| {
            // a probability in [0, 1] is always a valid Bernoulli parameter
            Bernoulli::new(sigmoid(bias + logit))
                .map(|dist| dist.sample(rng))
                .unwrap_or(false)
        })
        .collect()
}

/// Binary classification problem following a sparse logistic model
///
/// Records are standard normal, labels are drawn with [`logistic_labels`] from the coefficients
/// returned next to the dataset.
pub fn binary_classification(
    nsamples: usize,
    nfeatures: usize,
    ninformative: usize,
    rng: &mut impl Rng,
) -> (Dataset<f64, bool>, Array1<f64>) {
    let coefficients = sparse_coefficients(nfeatures, ninformative, rng);
    let records: Array2<f64> = Array::random_using((nsamples, nfeatures), StandardNormal, rng);
    let labels = logistic_labels(&records, &coefficients, 0.0, rng);

    (Dataset::new(records, labels), coefficients)
}

const NUMERIC_FEATURES: [&str; 7] = [
    "age", "balance", "day", "duration", "campaign", "pdays", "previous",
];

const DUMMY_FEATURES: [(&str, f64); 12] = [
    ("job_blue-collar", 0.21),
    ("job_management", 0.21),
    ("job_retired", 0.05),
    ("job_student", 0.02),
    ("marital_married", 0.62),
    ("marital_single", 0.26),
    ("education_tertiary", 0.30),
    ("housing_yes", 0.57),
    ("loan_yes", 0.15),
    ("contact_unknown", 0.29),
    ("month_may", 0.31),
    ("poutcome_success", 0.03),
];

/// Synthetic stand-in for the bank marketing campaign data
///
/// Seven standardized numeric columns are followed by twelve binary dummy columns with
/// realistic frequencies. The target (`1.0` if the client subscribed a term deposit) follows an
/// imbalanced logistic model driven mostly by the call duration, the success of a previous
/// campaign, the housing loan and the contact type. The columns are named.
pub fn bank_marketing(nsamples: usize, rng: &mut impl Rng) -> Dataset<f64, f64> {
    let nnumeric = NUMERIC_FEATURES.len();
    let nfeatures = nnumeric + DUMMY_FEATURES.len();

    let mut records = Array2::zeros((nsamples, nfeatures));
    let numeric: Array2<f64> = Array::random_using((nsamples, nnumeric), StandardNormal, rng);
    records.slice_mut(s![.., ..nnumeric]).assign(&numeric);

    for (idx, (_, frequency)) in DUMMY_FEATURES.iter().enumerate() {
        let column = Array::random_using(nsamples, Uniform::new(0.0, 1.0), rng)
            .mapv(|u: f64| if u < *frequency { 1.0 } else { 0.0 });
        records.column_mut(nnumeric + idx).assign(&column);
    }

    #[rustfmt::skip]
    let coefficients = ndarray::array![
        0.05, 0.1, 0.0, 1.6, -0.4, 0.0, 0.15,
        -0.3, 0.0, 0.4, 0.6, -0.2, 0.0, 0.25, -0.6, -0.4, -1.1, -0.5, 2.2
    ];
    let labels = logistic_labels(&records, &coefficients, -2.0, rng);

    let mut names = NUMERIC_FEATURES.to_vec();
    names.extend(DUMMY_FEATURES.iter().map(|(name, _)| *name));

    Dataset::new(records, labels.mapv(|l| if l { 1.0 } else { 0.0 })).with_feature_names(names)
}

/// Permute the feature columns of a dataset, returning the permutation applied
///
/// Column `i` of the result is column `permutation[i]` of the input, feature names move with
/// their columns.
///
/// # Errors
///
/// Fails only if the dataset rejects the column selection, which a permutation of its own
/// columns never triggers.
pub fn shuffle_features<T: Clone>(
    dataset: &Dataset<f64, T>,
    rng: &mut impl Rng,
) -> Result<(Dataset<f64, T>, Vec<usize>)> {
    let mut permutation = (0..dataset.nfeatures()).collect::<Vec<_>>();
    permutation.shuffle(rng);

    let shuffled = dataset.select_features(&permutation)?;

    Ok((shuffled, permutation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray_rand::rand::SeedableRng;
    use rand_xoshiro::Xoshiro256Plus;

    #[test]
    fn sparse_regression_has_requested_support() {
        let mut rng = Xoshiro256Plus::seed_from_u64(3);
        let (dataset, coefficients) = sparse_regression(50, 8, 3, 1.0, 0.0, &mut rng);

        assert_eq!(dataset.records().dim(), (50, 8));
        assert_eq!(coefficients.iter().filter(|c| **c != 0.0).count(), 3);
        assert!(coefficients.slice(s![..3]).iter().all(|c| c.abs() >= 1.0));

        // without noise the targets are exactly linear
        let expected = dataset.records().dot(&coefficients) + 1.0;
        assert_abs_diff_eq!(dataset.targets(), &expected, epsilon = 1e-12);
    }

    #[test]
    fn same_seed_same_data() {
        let (a, _) = sparse_regression(20, 4, 2, 0.0, 0.5, &mut Xoshiro256Plus::seed_from_u64(9));
        let (b, _) = sparse_regression(20, 4, 2, 0.0, 0.5, &mut Xoshiro256Plus::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn bank_marketing_is_imbalanced_and_named() {
        let mut rng = Xoshiro256Plus::seed_from_u64(1);
        let dataset = bank_marketing(2000, &mut rng);

        assert_eq!(dataset.nfeatures(), 19);
        assert_eq!(dataset.feature_names()[3], "duration");
        assert!(dataset.targets().iter().all(|t| *t == 0.0 || *t == 1.0));

        let positive_rate = dataset.targets().sum() / 2000.0;
        assert!(positive_rate > 0.05 && positive_rate < 0.4);
    }

    #[test]
    fn classification_labels_follow_the_logit() {
        let mut rng = Xoshiro256Plus::seed_from_u64(5);
        let (dataset, coefficients) = binary_classification(1000, 5, 2, &mut rng);

        let logits = dataset.records().dot(&coefficients);
        let agree = logits
            .iter()
            .zip(dataset.targets())
            .filter(|(logit, label)| (**logit > 0.0) == **label)
            .count();
        assert!(agree > 600);
    }

    #[test]
    fn features_are_permuted() {
        let mut rng = Xoshiro256Plus::seed_from_u64(2);
        let (dataset, _) = sparse_regression(10, 6, 2, 0.0, 0.1, &mut rng);
        let dataset = dataset.with_feature_names(vec!["a", "b", "c", "d", "e", "f"]);
        let (shuffled, permutation) = shuffle_features(&dataset, &mut rng).unwrap();

        let mut sorted = permutation.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..6).collect::<Vec<_>>());

        let names = dataset.feature_names();
        for (new, old) in permutation.iter().enumerate() {
            assert_eq!(shuffled.records().column(new), dataset.records().column(*old));
            assert_eq!(shuffled.feature_names()[new], names[*old]);
        }
        assert_eq!(shuffled.targets(), dataset.targets());
    }
}
