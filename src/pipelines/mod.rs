//! Pipelines.
//!
//! The module provides a light [pipeline::Pipeline] trait,
//! and the [Lemmatization] pipeline that augments a tabular file with lemmatized text.
pub mod lemmatize;
#[allow(clippy::module_inception)]
pub mod pipeline;

pub use lemmatize::{Lemmatization, LemmatizeConfig, RunReport, State, Verification};
pub use pipeline::Pipeline;
