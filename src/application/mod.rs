//! Application layer: services and use cases
//!
//! This layer reads outline files, runs the domain pipeline and renders reports.

pub mod error;
pub mod error_ext;
pub mod report;
pub mod services;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use report::{render_report, NO_CHANGES};
