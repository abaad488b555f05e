//! # pead
//!
//! Event study of post-earnings-announcement drift.
//!
//! This crate provides a unified interface to the PEAD crates: earnings surprise,
//! market-model abnormal returns, cumulative abnormal returns and the
//! cross-sectional regression of CAR on surprise. Individual components can be
//! enabled via feature flags.
//!
//! ## Features
//!
//! - `full` (default): Enables all components
//! - `primitives`: Core type definitions
//! - `traits`: Trait abstractions
//! - `math`: OLS, robust covariance and outlier handling
//! - `model`: The event-study engine
//! - `utils`: DataFrame conversion, CSV export and the CSV earnings calendar
//! - `cli`: The `pead` binary with Yahoo Finance price download
//!
//! ## Example
//!
//! ```rust,ignore
//! use pead::model::{EventStudy, PriceStore, StudyConfig};
//!
//! let study = EventStudy::new(StudyConfig::default())?;
//! let report = study.run(&events, &prices);
//! for result in &report.regressions {
//!     println!("{}: slope {:.5} (p = {:.3})", result.horizon_label(), result.slope, result.p_value);
//! }
//! ```

#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]

#[cfg(feature = "primitives")]
#[doc(inline)]
pub use pead_primitives as primitives;
#[cfg(feature = "traits")]
#[doc(inline)]
pub use pead_traits as traits;
#[cfg(feature = "math")]
#[doc(inline)]
pub use pead_math as math;
#[cfg(feature = "model")]
#[doc(inline)]
pub use pead_model as model;
#[cfg(feature = "utils")]
#[doc(inline)]
pub use pead_utils as utils;
