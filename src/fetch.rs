//! Page fetching.
//!
//! Fetch failures are never fatal: a page that cannot be retrieved is logged as a warning and
//! reported as `None`, which every caller treats as "no data".

use std::cell::RefCell;
use std::collections::HashMap;

use scraper::Html;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::error::{LyricWikiError, Result};

pub trait Fetcher {
    /// Retrieves and parses the page at `url`, or `None` if it is unavailable.
    fn fetch(&self, url: &str) -> Option<Html>;
}

/// Blocking HTTP fetcher. Requests are issued one at a time, each preceded by the configured delay.
pub struct HttpFetcher {
    agent: ureq::Agent,
    config: Config,
}

impl HttpFetcher {
    pub fn new(config: Config) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(&config.user_agent).build();
        Self { agent, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    fn get(&self, url: &str) -> Result<String> {
        let response = self.agent.get(url).call().map_err(|e| LyricWikiError::Http(e.to_string()))?;
        Ok(response.into_string()?)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Option<Html> {
        if !self.config.sleep.is_zero() {
            std::thread::sleep(self.config.sleep);
        }
        match self.get(url) {
            Ok(body) => {
                if self.config.verbose {
                    info!("Successfully connected to {url}");
                } else {
                    debug!("Fetched {url}");
                }
                Some(Html::parse_document(&body))
            }
            Err(e) => {
                warn!("{e}. Failed to connect to {url}. Please verify the spelling or make sure that this page exists");
                None
            }
        }
    }
}

/// In-memory pages keyed by URL, for offline scraping of saved pages. Every request is recorded,
/// including requests for pages the store does not have.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: HashMap<String, String>,
    requests: RefCell<Vec<String>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, url: impl Into<String>, html: impl Into<String>) {
        self.pages.insert(url.into(), html.into());
    }

    pub fn with_page(mut self, url: impl Into<String>, html: impl Into<String>) -> Self {
        self.insert(url, html);
        self
    }

    /// URLs requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.borrow().clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        self.requests.borrow().iter().filter(|u| u.as_str() == url).count()
    }
}

impl Fetcher for PageStore {
    fn fetch(&self, url: &str) -> Option<Html> {
        self.requests.borrow_mut().push(url.to_string());
        match self.pages.get(url) {
            Some(html) => {
                debug!("Serving stored page {url}");
                Some(Html::parse_document(html))
            }
            None => {
                warn!("No stored page for {url}. `None` was returned");
                None
            }
        }
    }
}
