#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod asset;
pub use asset::Symbol;

mod event;
pub use event::{EarningsEvent, EventKey};

mod returns;
pub use returns::{InvalidPrice, PriceSeries, ReturnSeries};

mod window;
pub use window::{EstimationWindow, EventWindow, Horizon, TradingSpan, offset_label};

mod records;
pub use records::{AbnormalReturnRecord, CarRecord, MarketModelFit};

mod regression;
pub use regression::{CarSummary, RegressionInput, RegressionResult, RegressionTable, SkippedHorizon};

mod audit;
pub use audit::{Exclusion, ExclusionReason};

/// Re-export common date type.
pub type Date = chrono::NaiveDate;
