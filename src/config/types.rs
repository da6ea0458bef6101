use std::time::Duration;

/// Pacing delay applied between fetches unless overridden with `-w`
pub const DEFAULT_WAIT_SECS: u64 = 2;

/// Crawl behavior settings collected from the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrawlConfig {
    /// Stop after this many successfully fetched HTML pages
    ///
    /// Only honored when `recursive` is set; without link-following a
    /// session never fetches more than the seed anyway.
    pub page_limit: Option<u32>,

    /// Follow same-host links found on fetched pages
    pub recursive: bool,

    /// Pacing delay between consecutive fetch attempts
    pub wait: Duration,

    /// Print the usage text
    pub help: bool,
}

impl Default for CrawlConfig {
    fn default() -> Self {
        Self {
            page_limit: None,
            recursive: false,
            wait: Duration::from_secs(DEFAULT_WAIT_SECS),
            help: false,
        }
    }
}

impl CrawlConfig {
    /// The page limit that actually applies to a session
    ///
    /// `None` when no limit was given or when link-following is off.
    pub fn effective_limit(&self) -> Option<u32> {
        if self.recursive {
            self.page_limit
        } else {
            None
        }
    }
}
