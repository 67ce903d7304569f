//! Trialgraph Features - outcome-model feature matrix
//!
//! One-hot phase, sponsor and intervention type, plus binarized biomarker
//! mentions from trial titles. The label is the trial outcome.

pub mod biomarker;
pub mod encode;

pub use biomarker::{BIOMARKERS, extract_biomarkers};
pub use encode::{FEATURES_TABLE, FeatureMatrix, encode_trial, extract_features, write_features};
