//! `regpath-datasets` provides seeded synthetic datasets for tests, benchmarks and demos of the
//! `regpath` crates.
//!
//! ## Current State
//!
//! Currently the following generators are provided:
//!
//! * `sparse_regression` : linear targets from a sparse ground truth with gaussian noise
//! * `binary_classification` : labels drawn from a sparse logistic model
//! * `bank_marketing` : an imbalanced, named stand-in for the bank marketing campaign data
//!
//! All generators take the random number generator as argument, seeding it makes the data
//! reproducible.
//!
//! ## Using a dataset
//!
//! ```ignore
//! use rand_xoshiro::Xoshiro256Plus;
//!
//! let mut rng = Xoshiro256Plus::seed_from_u64(42);
//! let (train, valid) = regpath_datasets::generate::bank_marketing(4000, &mut rng)
//!     .split_with_ratio(0.7);
//! ```

pub mod generate;

pub use generate::{bank_marketing, binary_classification, sparse_regression};
