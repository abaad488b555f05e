#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod estimator;
pub use estimator::{ExpectedReturn, NormalReturnEstimator};

mod provider;
pub use provider::{EarningsProvider, PriceProvider, ProviderError};
