//! Runtime abstraction for system operations.
//!
//! The renderer only touches the outside world through this trait (reading
//! the template, writing the output, asking for today's date), so tests can
//! swap in a mock.

mod clock;
mod fs;

use anyhow::Result;
use chrono::NaiveDate;
use std::path::Path;

#[cfg_attr(test, mockall::automock)]
pub trait Runtime: Send + Sync {
    // File System
    fn read_to_string(&self, path: &Path) -> Result<String>;

    /// Write `contents` to `path`, creating it or truncating any prior content.
    fn write(&self, path: &Path, contents: &[u8]) -> Result<()>;

    // Clock
    /// Today's date in the local time zone.
    fn today(&self) -> NaiveDate;
}

pub struct RealRuntime;

impl Runtime for RealRuntime {
    fn read_to_string(&self, path: &Path) -> Result<String> {
        self.read_to_string_impl(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> Result<()> {
        self.write_impl(path, contents)
    }

    fn today(&self) -> NaiveDate {
        self.today_impl()
    }
}
