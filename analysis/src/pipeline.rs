use std::fmt;

use log::{info, warn};
use ndarray::Array1;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256Plus;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use regpath::metrics::{evaluate, BinaryEvaluation, Regression};
use regpath::prelude::*;
use regpath_elasticnet::{ElasticNet, ElasticNetError};
use regpath_logistic::{FittedLogisticRegression, LogisticRegression};

use crate::error::Result;
use crate::hyperparams::AnalysisValidParams;

/// Logistic regression fitted on the influential features and its held-out evaluation
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationReport {
    pub model: FittedLogisticRegression<f64>,
    pub evaluation: BinaryEvaluation<f64>,
}

/// Everything a regularization analysis produced
///
/// The held-out metrics refer to the selected model, the classification is missing if the
/// selected model has no influential feature.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisReport {
    pub path: RegularizationPath<f64>,
    pub costs: Array1<f64>,
    pub selection: SelectionResult<f64>,
    pub influential: Vec<usize>,
    pub influential_names: Vec<String>,
    pub held_out_mse: f64,
    pub held_out_r2: f64,
    pub classification: Option<ClassificationReport>,
}

impl AnalysisReport {
    pub fn kind(&self) -> RegressionKind {
        self.path.kind()
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(
            f,
            "{} path over {} penalties in [{:e}, {:e}]",
            self.kind(),
            self.path.len(),
            self.path.grid().first(),
            self.path.grid().last()
        )?;
        writeln!(
            f,
            "selected penalty {:e} (index {}) with held-out cost {:.4}",
            self.selection.penalty(),
            self.selection.index(),
            self.selection.cost()
        )?;
        writeln!(
            f,
            "held-out mse {:.4}, r2 {:.4}",
            self.held_out_mse, self.held_out_r2
        )?;
        writeln!(f, "influential features: {}", self.influential_names.join(", "))?;

        match &self.classification {
            Some(classification) => {
                let cm = &classification.evaluation.confusion_matrix;
                writeln!(
                    f,
                    "logistic regression: auc {:.4}, accuracy {:.4}, precision {:.4}, recall {:.4}",
                    classification.evaluation.auc,
                    cm.accuracy(),
                    cm.precision(),
                    cm.recall()
                )?;
                write!(f, "{:?}", cm)
            }
            None => write!(f, "no influential feature, classification skipped"),
        }
    }
}

/// Penalty path analysis of a binary outcome
///
/// The pipeline splits the dataset with the configured seed, fits a ridge or lasso path on
/// the training part, selects the penalty with the smallest held-out regularized cost,
/// derives the influential features of the selected model and finally fits a logistic
/// regression on those features, evaluated on the held-out part.
///
/// ```rust,ignore
/// let analysis = RegularizationAnalysis::new(AnalysisParams::ridge().check()?);
/// let report = analysis.run(&dataset)?;
/// println!("{}", report);
/// ```
#[derive(Debug, Clone)]
pub struct RegularizationAnalysis {
    params: AnalysisValidParams,
}

impl RegularizationAnalysis {
    pub fn new(params: AnalysisValidParams) -> Self {
        RegularizationAnalysis { params }
    }

    pub fn params(&self) -> &AnalysisValidParams {
        &self.params
    }

    /// Run the pipeline on a dataset with `0`/`1` targets
    ///
    /// # Errors
    ///
    /// Fails if the dataset is too small to be split, if any stage rejects its input, for
    /// example `top_k` exceeding the number of features, or if the targets are not binary.
    pub fn run(&self, dataset: &Dataset<f64, f64>) -> Result<AnalysisReport> {
        let params = &self.params;

        let mut rng = Xoshiro256Plus::seed_from_u64(params.seed());
        let (train, test) = dataset.train_test_split(params.test_ratio(), &mut rng)?;
        info!(
            "split {} observations into {} for training and {} held out",
            dataset.nsamples(),
            train.nsamples(),
            test.nsamples()
        );

        let (start, end) = params.penalty_range();
        let grid = PenaltyGrid::generate_with_base(start, end, params.grid_count(), params.base())?;

        let solver = ElasticNet::params_for(params.kind())
            .tolerance(params.solver_tolerance())
            .max_iterations(params.max_iterations());
        let path = PathFitter::new(solver)
            .fit_path::<f64, ElasticNetError, ElasticNet<f64>>(&train, &grid)?;

        let costs = cost_path(
            &path,
            test.records(),
            test.targets(),
            params.penalize_intercept(),
        )?;
        let selection = select_from_path(&costs, &path)?;
        info!(
            "selected penalty {} at index {} with cost {}",
            selection.penalty(),
            selection.index(),
            selection.cost()
        );

        let predictions = test.records().dot(selection.coefficients()) + selection.intercept();
        let held_out_mse = predictions.mean_squared_error(test.targets())?;
        let held_out_r2 = predictions.r2(test.targets())?;

        let policy =
            InfluencePolicy::for_kind(params.kind(), params.top_k(), params.lasso_tolerance());
        let influential = policy.rank(selection.coefficients())?;
        let names = dataset.feature_names();
        let influential_names = influential
            .iter()
            .map(|idx| names[*idx].clone())
            .collect::<Vec<_>>();
        info!("influential features: {:?}", influential_names);

        let classification = if influential.is_empty() {
            warn!("the selected model has no influential feature, skipping classification");
            None
        } else {
            Some(self.classify(&train, &test, &influential)?)
        };

        Ok(AnalysisReport {
            path,
            costs,
            selection,
            influential,
            influential_names,
            held_out_mse,
            held_out_r2,
            classification,
        })
    }

    /// Fit the logistic regression on the selected columns and evaluate it on the held-out part
    fn classify(
        &self,
        train: &Dataset<f64, f64>,
        test: &Dataset<f64, f64>,
        features: &[usize],
    ) -> Result<ClassificationReport> {
        let train = train.select_features(features)?;
        let test = test.select_features(features)?;

        let model = LogisticRegression::default()
            .alpha(self.params.logistic_alpha())
            .max_iterations(self.params.logistic_max_iterations())
            .fit(&train)?
            .set_threshold(self.params.threshold())?;

        let probabilities = model.predict_probabilities(test.records());
        let evaluation = evaluate(test.targets(), &probabilities, self.params.threshold())?;
        info!("held-out auc {:.4}", evaluation.auc);

        Ok(ClassificationReport { model, evaluation })
    }
}
