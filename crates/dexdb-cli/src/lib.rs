//! Library half of the `dexdb` binary: logging setup, dataset checkout and
//! the store build pipeline.

pub mod logging;
pub mod pipeline;
pub mod source;
pub mod summary;
pub mod types;
