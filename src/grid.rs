//! Penalty grids
//!
//! A penalty grid is the sequence of regularization strengths a path is computed on. Grids
//! are conventionally spaced evenly in log-space, like `numpy.logspace`.
use ndarray::Array1;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

use crate::dataset::Float;
use crate::error::{Error, Result};

/// Strictly increasing sequence of strictly positive penalty strengths
///
/// The invariants are checked on construction, a `PenaltyGrid` is never empty.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct PenaltyGrid<F> {
    values: Array1<F>,
}

impl<F: Float> PenaltyGrid<F> {
    /// Generate `count` penalties evenly spaced in log-space between `10^start_exponent` and
    /// `10^end_exponent`, both ends included
    ///
    /// ```rust
    /// use regpath::PenaltyGrid;
    ///
    /// let grid = PenaltyGrid::<f64>::generate(-2.0, 6.0, 100)?;
    /// assert_eq!(grid.len(), 100);
    /// # Ok::<(), regpath::Error>(())
    /// ```
    pub fn generate(start_exponent: F, end_exponent: F, count: usize) -> Result<Self> {
        Self::generate_with_base(start_exponent, end_exponent, count, F::cast(10.0))
    }

    /// Generate `count` penalties evenly spaced in log-space between `base^start_exponent`
    /// and `base^end_exponent`, both ends included
    ///
    /// # Errors
    ///
    /// Returns `InvalidArgument` if `count` is zero, `base` is not a finite number larger than
    /// one, an exponent is not finite, or `start_exponent >= end_exponent` for more than a
    /// single grid point.
    pub fn generate_with_base(
        start_exponent: F,
        end_exponent: F,
        count: usize,
        base: F,
    ) -> Result<Self> {
        if count < 1 {
            return Err(Error::InvalidArgument(
                "penalty grid needs at least one value".to_string(),
            ));
        }
        if !base.is_finite() || base <= F::one() {
            return Err(Error::InvalidArgument(format!(
                "grid base should be finite and larger than one, but is {}",
                base
            )));
        }
        if !start_exponent.is_finite() || !end_exponent.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "grid exponents should be finite, but are {} and {}",
                start_exponent, end_exponent
            )));
        }
        if count > 1 && start_exponent >= end_exponent {
            return Err(Error::InvalidArgument(format!(
                "start exponent {} should be smaller than end exponent {}",
                start_exponent, end_exponent
            )));
        }

        let mut values = Array1::logspace(base, start_exponent, end_exponent, count);
        // pin both ends, the accumulated linspace step may miss the upper one
        values[0] = base.powf(start_exponent);
        if count > 1 {
            values[count - 1] = base.powf(end_exponent);
        }

        Self::from_values(values.to_vec())
    }

    /// Construct a grid from explicit penalty values
    ///
    /// # Errors
    ///
    /// Returns `EmptyInput` for an empty vector and `InvalidArgument` if any value is not
    /// finite and strictly positive, or the values are not strictly increasing.
    pub fn from_values(values: Vec<F>) -> Result<Self> {
        if values.is_empty() {
            return Err(Error::EmptyInput);
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v <= F::zero()) {
            return Err(Error::InvalidArgument(format!(
                "penalty strengths must be finite and positive, but got {}",
                v
            )));
        }
        if let Some(w) = values.windows(2).find(|w| w[0] >= w[1]) {
            return Err(Error::InvalidArgument(format!(
                "penalty grid must be strictly increasing, but {} is followed by {}",
                w[0], w[1]
            )));
        }

        Ok(PenaltyGrid {
            values: Array1::from(values),
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`, grids hold at least one value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &Array1<F> {
        &self.values
    }

    pub fn as_slice(&self) -> &[F] {
        // owned, contiguous and in standard layout
        self.values.as_slice().unwrap_or(&[])
    }

    pub fn iter(&self) -> impl Iterator<Item = &F> + '_ {
        self.values.iter()
    }

    pub fn get(&self, index: usize) -> Option<F> {
        self.values.get(index).copied()
    }

    /// Smallest penalty of the grid
    pub fn first(&self) -> F {
        self.values[0]
    }

    /// Largest penalty of the grid
    pub fn last(&self) -> F {
        self.values[self.values.len() - 1]
    }
}
