//! Penalty selection
//!
//! Picks the grid value whose model reaches the smallest held-out cost.
use log::{info, warn};
use ndarray::{Array1, Array2, ArrayBase, Data, Ix1};

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Float;
use crate::error::{Error, Result};
use crate::grid::PenaltyGrid;
use crate::path::RegularizationPath;

/// Model with the smallest held-out cost along a path
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionResult<F> {
    index: usize,
    penalty: F,
    cost: F,
    coefficients: Array1<F>,
    intercept: F,
}

impl<F: Float> SelectionResult<F> {
    /// Grid index of the selected model
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn penalty(&self) -> F {
        self.penalty
    }

    pub fn cost(&self) -> F {
        self.cost
    }

    pub fn coefficients(&self) -> &Array1<F> {
        &self.coefficients
    }

    pub fn intercept(&self) -> F {
        self.intercept
    }
}

/// Index of the smallest value, the first one wins among equal minima
///
/// NaN values are skipped, `None` is returned if no comparable value exists.
pub fn argmin_first<F: Float, D: Data<Elem = F>>(values: &ArrayBase<D, Ix1>) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .filter(|(_, v)| !v.is_nan())
        .fold(None, |best: Option<(usize, F)>, (idx, v)| match best {
            Some((_, b)) if b <= *v => best,
            _ => Some((idx, *v)),
        })
        .map(|(idx, _)| idx)
}

/// Select the penalty with the smallest cost
///
/// `costs` and `grid` are aligned, `coefficients` has one column per grid value. Ties are
/// broken by the first occurrence, which is the smallest penalty among the minimal costs.
///
/// # Errors
///
/// Returns `EmptyInput` if there are no costs, `DimensionMismatch` if the inputs are not
/// aligned, and `InvalidArgument` if every cost is NaN.
pub fn select<F, D>(
    costs: &ArrayBase<D, Ix1>,
    grid: &PenaltyGrid<F>,
    coefficients: &Array2<F>,
) -> Result<SelectionResult<F>>
where
    F: Float,
    D: Data<Elem = F>,
{
    select_with_intercepts(costs, grid, coefficients, None)
}

/// Select the penalty with the smallest cost from a fitted path
///
/// Same as [`select`], the intercept of the selected model is carried over.
pub fn select_from_path<F, D>(
    costs: &ArrayBase<D, Ix1>,
    path: &RegularizationPath<F>,
) -> Result<SelectionResult<F>>
where
    F: Float,
    D: Data<Elem = F>,
{
    select_with_intercepts(
        costs,
        path.grid(),
        path.coefficients(),
        Some(path.intercepts()),
    )
}

fn select_with_intercepts<F, D>(
    costs: &ArrayBase<D, Ix1>,
    grid: &PenaltyGrid<F>,
    coefficients: &Array2<F>,
    intercepts: Option<&Array1<F>>,
) -> Result<SelectionResult<F>>
where
    F: Float,
    D: Data<Elem = F>,
{
    if costs.is_empty() || coefficients.ncols() == 0 {
        return Err(Error::EmptyInput);
    }
    if costs.len() != grid.len() {
        return Err(Error::mismatch("cost vector", grid.len(), costs.len()));
    }
    if coefficients.ncols() != grid.len() {
        return Err(Error::mismatch(
            "coefficient matrix columns",
            grid.len(),
            coefficients.ncols(),
        ));
    }

    let nan_count = costs.iter().filter(|c| c.is_nan()).count();
    if nan_count > 0 {
        warn!("{} of {} costs are NaN and ignored", nan_count, costs.len());
    }

    let index = argmin_first(costs).ok_or_else(|| {
        Error::InvalidArgument("every cost along the path is NaN".to_string())
    })?;

    let result = SelectionResult {
        index,
        penalty: grid.values()[index],
        cost: costs[index],
        coefficients: coefficients.column(index).to_owned(),
        intercept: intercepts.map(|i| i[index]).unwrap_or_else(F::zero),
    };

    info!(
        "selected penalty {} at grid index {} with cost {}",
        result.penalty, result.index, result.cost
    );

    Ok(result)
}
