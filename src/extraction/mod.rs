//! Archive extraction for key batches
//!
//! Each published batch is a ZIP container holding the binary export (and,
//! usually, its signature file). Only the named export member is read.

mod zip;

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests;

pub use zip::ZipExtractor;
