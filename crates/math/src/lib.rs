#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod linalg;
pub use linalg::{OlsResult, classical_covariance, hc1_covariance, invert, least_squares};

mod stats;
pub use stats::{mean, sample_variance, student_t_p_value};

mod winsorize;
pub use winsorize::{Winsorizer, quantile, trim_mask, winsorize};

mod error;
pub use error::MathError;
