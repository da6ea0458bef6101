use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while saving a page
#[derive(Debug, Error)]
pub enum StoreError {
    /// The page file could not be written
    #[error("could not write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Two different URLs hashed to the same file name
    #[error("{} already holds a page for {existing_url}", .path.display())]
    Collision {
        path: PathBuf,
        existing_url: String,
    },
}

/// Writes fetched pages into the output directory
///
/// The store remembers which URL produced each file name, so a hash
/// collision between two different URLs is reported instead of silently
/// overwriting the first page. One store spans the whole run; the caller
/// creates the directory before the first save.
#[derive(Debug)]
pub struct PageStore {
    root: PathBuf,
    written: HashMap<String, String>,
}

impl PageStore {
    /// Creates a store rooted at an existing directory
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            written: HashMap::new(),
        }
    }

    /// Saves one fetched page and returns the path it was written to
    ///
    /// The file holds the page URL on its own line, then the response
    /// header block, then the body verbatim. Saving the same URL again
    /// overwrites its file.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL the page was fetched from, after redirects
    /// * `header_block` - Response headers, terminated by a blank line
    /// * `body` - The page body
    pub fn save(
        &mut self,
        url: &str,
        header_block: &str,
        body: &str,
    ) -> Result<PathBuf, StoreError> {
        let file_name = page_file_name(url);
        let path = self.root.join(&file_name);

        if let Some(existing_url) = self.written.get(&file_name) {
            if existing_url != url {
                return Err(StoreError::Collision {
                    path,
                    existing_url: existing_url.clone(),
                });
            }
        }

        let mut contents =
            String::with_capacity(url.len() + 1 + header_block.len() + body.len());
        contents.push_str(url);
        contents.push('\n');
        contents.push_str(header_block);
        contents.push_str(body);

        fs::write(&path, contents).map_err(|source| StoreError::Io {
            path: path.clone(),
            source,
        })?;

        self.written.insert(file_name, url.to_string());
        println!("-- Saved to {}", path.display());
        Ok(path)
    }

    /// Number of distinct page files written so far
    pub fn pages_written(&self) -> usize {
        self.written.len()
    }
}

/// File name for a page: the SHA-256 digest of its URL in hex, with an
/// `.html` suffix
pub fn page_file_name(url: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(url.as_bytes());
    let digest = hasher.finalize();
    format!("{}.html", hex::encode(digest))
}
