#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod surprise;
pub use surprise::{SurpriseCalculator, surprise_pct};

mod market_model;
pub use market_model::MarketModelEstimator;

mod abnormal;
pub use abnormal::{AbnormalReturnEngine, cumulative_abnormal_returns};

mod calendar;
pub use calendar::{TradingCalendar, aligned_returns};

mod regression;
pub use regression::CrossSectionalRegressor;

mod summary;
pub use summary::summarize;

mod study;
pub use study::{EventOutcome, EventStudy, StudyReport};

mod store;
pub use store::PriceStore;

mod config;
pub use config::{
    MAX_WINDOW_DAYS, MarketModelConfig, OutlierPolicy, RegressionConfig, StudyConfig,
};

mod error;
pub use error::ModelError;

/// Re-export commonly used types.
pub mod prelude {
    pub use pead_traits::{ExpectedReturn, NormalReturnEstimator, PriceProvider};

    pub use super::{EventStudy, ModelError, PriceStore, StudyConfig, StudyReport};
}
