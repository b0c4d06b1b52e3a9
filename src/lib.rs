mod ioutil;
mod aggregate;
mod config;
mod daily;
mod dataset;
mod dates;
mod error;
mod metrics;
mod model;
mod progress;
mod reference;
mod tables;

pub use ioutil::{magic_open, is_report_file};
pub use aggregate::*;
pub use config::*;
pub use daily::*;
pub use dataset::*;
pub use dates::*;
pub use error::*;
pub use metrics::*;
pub use model::*;
pub use progress::*;
pub use reference::*;
pub use tables::*;
