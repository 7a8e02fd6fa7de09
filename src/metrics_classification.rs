//! Common metrics for performance evaluation of binary classifiers
//!
//! Scoring is essential for classification tasks. This module implements the confusion
//! matrix with its derived scores (precision, accuracy, recall, f1-score), the ROC curve and
//! the ROC Area-Under-Curve for predicted probabilities of the positive class.
use std::cmp::Ordering;
use std::fmt;

use log::debug;
use ndarray::{Array2, ArrayBase, Data, Ix1};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Float;
use crate::error::{Error, Result};

/// Ground truth labels of a binary task
///
/// Only `0` and `1` (or `false` and `true`) are valid labels, everything else is rejected.
pub trait BinaryLabel: Copy {
    fn to_binary(self) -> Option<bool>;
}

impl BinaryLabel for bool {
    fn to_binary(self) -> Option<bool> {
        Some(self)
    }
}

macro_rules! impl_binary_label {
    ($($t:ty),*) => {
        $(
            impl BinaryLabel for $t {
                #[allow(clippy::float_cmp)]
                fn to_binary(self) -> Option<bool> {
                    if self == (0 as $t) {
                        Some(false)
                    } else if self == (1 as $t) {
                        Some(true)
                    } else {
                        None
                    }
                }
            }
        )*
    };
}

impl_binary_label!(u8, u32, u64, usize, i32, i64, f32, f64);

fn to_bool_labels<L: BinaryLabel, D: Data<Elem = L>>(y: &ArrayBase<D, Ix1>) -> Result<Vec<bool>> {
    y.iter()
        .enumerate()
        .map(|(idx, label)| {
            label.to_binary().ok_or_else(|| {
                Error::InvalidArgument(format!("label at index {} is neither 0 nor 1", idx))
            })
        })
        .collect()
}

/// Confusion matrix for binary evaluation
///
/// Rows correspond to the ground truth, columns to the prediction, negatives first:
///
/// ```text
/// | tn | fp |
/// | fn | tp |
/// ```
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Clone, PartialEq)]
pub struct ConfusionMatrix {
    matrix: Array2<usize>,
}

impl ConfusionMatrix {
    fn from_predictions(ground_truth: &[bool], predicted: impl Iterator<Item = bool>) -> Self {
        let mut matrix = Array2::zeros((2, 2));
        for (truth, pred) in ground_truth.iter().zip(predicted) {
            matrix[(*truth as usize, pred as usize)] += 1;
        }

        ConfusionMatrix { matrix }
    }

    /// Counts in the layout `[[tn, fp], [fn, tp]]`
    pub fn matrix(&self) -> &Array2<usize> {
        &self.matrix
    }

    pub fn true_negatives(&self) -> usize {
        self.matrix[(0, 0)]
    }

    pub fn false_positives(&self) -> usize {
        self.matrix[(0, 1)]
    }

    pub fn false_negatives(&self) -> usize {
        self.matrix[(1, 0)]
    }

    pub fn true_positives(&self) -> usize {
        self.matrix[(1, 1)]
    }

    /// Precision is the number of true positives divided by the number of predicted positives
    pub fn precision(&self) -> f64 {
        let tp = self.true_positives() as f64;
        tp / (tp + self.false_positives() as f64)
    }

    /// Recall is the number of true positives divided by the number of ground truth positives
    pub fn recall(&self) -> f64 {
        let tp = self.true_positives() as f64;
        tp / (tp + self.false_negatives() as f64)
    }

    /// Return mean accuracy
    pub fn accuracy(&self) -> f64 {
        self.matrix.diag().sum() as f64 / self.matrix.sum() as f64
    }

    /// Return the beta score
    pub fn f_score(&self, beta: f64) -> f64 {
        let sb = beta * beta;
        let p = self.precision();
        let r = self.recall();

        (1.0 + sb) * (p * r) / (sb * p + r)
    }

    /// Return the beta=1 score
    pub fn f1_score(&self) -> f64 {
        self.f_score(1.0)
    }
}

/// Print a confusion matrix
impl fmt::Debug for ConfusionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{:-<21}", "")?;
        writeln!(f, "| {:^8} | {:^6} |", "", "pred")?;
        writeln!(f, "| {:^8} | {:>2} {:>2} |", "", 0, 1)?;
        for (label, row) in self.matrix.rows().into_iter().enumerate() {
            writeln!(f, "| truth {:>2} | {:>2} {:>2} |", label, row[0], row[1])?;
        }
        write!(f, "{:-<21}", "")
    }
}

/// Integration using the trapezoidal rule.
fn trapezoidal<A: Float>(vals: &[(A, A)]) -> A {
    let mut prev_x = vals[0].0;
    let mut prev_y = vals[0].1;
    let mut integral = A::zero();

    for (x, y) in vals.iter().skip(1) {
        integral += (*x - prev_x) * (prev_y + *y) / A::cast(2.0);
        prev_x = *x;
        prev_y = *y;
    }
    integral
}

/// Receiver operating characteristic of a scoring classifier
///
/// The curve holds `(false positive rate, true positive rate)` pairs, starting at `(0, 0)` and
/// ending at `(1, 1)`. Threshold `i` is the smallest score predicted positive at point `i`, the
/// first one is infinite.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverOperatingCharacteristic<A> {
    curve: Vec<(A, A)>,
    thresholds: Vec<A>,
}

impl<A: Float> ReceiverOperatingCharacteristic<A> {
    pub fn get_curve(&self) -> Vec<(A, A)> {
        self.curve.clone()
    }

    pub fn get_thresholds(&self) -> Vec<A> {
        self.thresholds.clone()
    }

    pub fn false_positive_rates(&self) -> Vec<A> {
        self.curve.iter().map(|(fpr, _)| *fpr).collect()
    }

    pub fn true_positive_rates(&self) -> Vec<A> {
        self.curve.iter().map(|(_, tpr)| *tpr).collect()
    }

    pub fn area_under_curve(&self) -> A {
        trapezoidal(&self.curve)
    }
}

/// Confusion counts, ROC curve and AUC of a probabilistic binary classifier
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryEvaluation<A> {
    pub confusion_matrix: ConfusionMatrix,
    pub roc: ReceiverOperatingCharacteristic<A>,
    pub auc: A,
}

/// Binary classification metrics for predicted probabilities of the positive class
pub trait BinaryClassification<A> {
    /// Confusion matrix of the predictions `probability >= threshold` against `y`
    fn confusion_matrix<L, D>(
        &self,
        y: &ArrayBase<D, Ix1>,
        threshold: A,
    ) -> Result<ConfusionMatrix>
    where
        L: BinaryLabel,
        D: Data<Elem = L>;

    /// The ROC curve gives insight about the separability of a binary classification task.
    /// This function returns the ROC curve and the threshold belonging to each position on
    /// the curve.
    fn roc<L, D>(&self, y: &ArrayBase<D, Ix1>) -> Result<ReceiverOperatingCharacteristic<A>>
    where
        L: BinaryLabel,
        D: Data<Elem = L>;
}

impl<A: Float, S: Data<Elem = A>> BinaryClassification<A> for ArrayBase<S, Ix1> {
    fn confusion_matrix<L, D>(
        &self,
        y: &ArrayBase<D, Ix1>,
        threshold: A,
    ) -> Result<ConfusionMatrix>
    where
        L: BinaryLabel,
        D: Data<Elem = L>,
    {
        if threshold.is_nan() || threshold < A::zero() || threshold > A::one() {
            return Err(Error::InvalidArgument(format!(
                "threshold should be in range [0, 1], but is {}",
                threshold
            )));
        }
        let ground_truth = check_inputs(self, y)?;

        Ok(ConfusionMatrix::from_predictions(
            &ground_truth,
            self.iter().map(|p| *p >= threshold),
        ))
    }

    fn roc<L, D>(&self, y: &ArrayBase<D, Ix1>) -> Result<ReceiverOperatingCharacteristic<A>>
    where
        L: BinaryLabel,
        D: Data<Elem = L>,
    {
        let ground_truth = check_inputs(self, y)?;

        let positives = ground_truth.iter().filter(|t| **t).count();
        let negatives = ground_truth.len() - positives;
        if positives == 0 || negatives == 0 {
            return Err(Error::InvalidArgument(
                "ROC curve needs both classes in the ground truth".to_string(),
            ));
        }

        let mut tuples = self
            .iter()
            .copied()
            .zip(ground_truth.iter().copied())
            .collect::<Vec<(A, bool)>>();

        // descending by score, scores are checked to be comparable
        tuples.sort_unstable_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(Ordering::Equal));

        let (max_tp, max_fp) = (A::cast(positives), A::cast(negatives));
        let (mut tp, mut fp) = (A::zero(), A::zero());
        let mut curve = vec![(A::zero(), A::zero())];
        let mut thresholds = vec![A::infinity()];

        for (idx, (score, truth)) in tuples.iter().enumerate() {
            if *truth {
                tp += A::one();
            } else {
                fp += A::one();
            }

            // close the staircase step once every sample of this score is counted
            let last_of_score = tuples
                .get(idx + 1)
                .map(|(next, _)| next != score)
                .unwrap_or(true);
            if last_of_score {
                curve.push((fp / max_fp, tp / max_tp));
                thresholds.push(*score);
            }
        }

        debug!(
            "ROC curve with {} points over {} positives and {} negatives",
            curve.len(),
            positives,
            negatives
        );

        Ok(ReceiverOperatingCharacteristic { curve, thresholds })
    }
}

fn check_inputs<A, S, L, D>(scores: &ArrayBase<S, Ix1>, y: &ArrayBase<D, Ix1>) -> Result<Vec<bool>>
where
    A: Float,
    S: Data<Elem = A>,
    L: BinaryLabel,
    D: Data<Elem = L>,
{
    if scores.len() != y.len() {
        return Err(Error::mismatch("predicted probabilities", y.len(), scores.len()));
    }
    if y.is_empty() {
        return Err(Error::EmptyInput);
    }
    if scores.iter().any(|s| s.is_nan()) {
        return Err(Error::InvalidArgument(
            "predicted probabilities contain NaN".to_string(),
        ));
    }

    to_bool_labels(y)
}

/// Evaluate predicted probabilities of the positive class against binary labels
///
/// ```rust
/// use ndarray::array;
/// use regpath::metrics::evaluate;
///
/// let eval = evaluate(&array![1, 0, 1, 0], &array![0.9, 0.1, 0.8, 0.2], 0.5)?;
/// assert_eq!(eval.confusion_matrix.false_positives(), 0);
/// assert_eq!(eval.auc, 1.0);
/// # Ok::<(), regpath::Error>(())
/// ```
///
/// # Errors
///
/// Returns `InvalidArgument` for labels outside `{0, 1}`, a threshold outside `[0, 1]` or a
/// ground truth with a single class, `DimensionMismatch` if the lengths differ and
/// `EmptyInput` for empty inputs.
pub fn evaluate<A, L, S, D>(
    y_true: &ArrayBase<D, Ix1>,
    y_pred_proba: &ArrayBase<S, Ix1>,
    threshold: A,
) -> Result<BinaryEvaluation<A>>
where
    A: Float,
    L: BinaryLabel,
    S: Data<Elem = A>,
    D: Data<Elem = L>,
{
    let confusion_matrix = y_pred_proba.confusion_matrix(y_true, threshold)?;
    let roc = y_pred_proba.roc(y_true)?;
    let auc = roc.area_under_curve();

    Ok(BinaryEvaluation {
        confusion_matrix,
        roc,
        auc,
    })
}
