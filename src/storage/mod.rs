//! Storage module for persisting fetched pages
//!
//! Pages land as flat files in a single output directory, one file per
//! page, named by a hash of the page URL. Each file starts with the URL
//! itself and the response headers, so a saved page can always be traced
//! back to where it came from.

mod pages;

pub use pages::{page_file_name, PageStore, StoreError};

use std::io;
use std::path::Path;

/// Creates the output directory if it does not exist yet
///
/// Safe to call on every start; an existing directory is left untouched.
///
/// # Arguments
///
/// * `path` - Path to the output directory
pub fn ensure_output_dir(path: &Path) -> io::Result<()> {
    std::fs::create_dir_all(path)
}
