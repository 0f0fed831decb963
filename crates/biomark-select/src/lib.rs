//! biomark-select: consensus feature selection for expression biomarkers.
//!
//! Three selectors rank every feature against a binary disease label: an
//! L1-penalized linear model, a seeded random forest and recursive feature
//! elimination driven by a linear SVM. The features all three keep are
//! intersected and checked with a two-sample t-test.
//!
//! The learners come from linfa (`linfa-elasticnet`, `linfa-trees`,
//! `linfa-svm`). This crate owns the bagging, elimination, ranking and
//! intersection bookkeeping around them.
pub mod config;
pub mod data_handling;
pub mod error;
pub mod feature_selection;
pub mod io;
pub mod math;
pub mod models;
pub mod pipeline;
pub mod preprocessing;
pub mod stats;
