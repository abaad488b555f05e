#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod frames;
pub use frames::{
    abnormal_returns_frame, car_frame, exclusion_frame, fit_frame, regression_frame,
    regression_input_frame, skipped_frame, summary_frame,
};

mod export;
pub use export::{export_report, write_csv};

mod earnings;
pub use earnings::EarningsFile;

mod error;
pub use error::UtilsError;
