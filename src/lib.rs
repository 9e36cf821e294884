pub mod config;
pub mod core;
pub mod logging;
pub mod report;

pub use config::{Config, GrayscaleMethod, HashConfig, NormConfig, ScanConfig};
pub use crate::core::compare::{CompareError, NormDistances};
pub use crate::core::dhash::{DHash, DHasher};
pub use crate::core::driver::{Distance, PairOutcome, PassReport, Window};
