//! Shared per-run crawl state
//!
//! Page store, contact sets and counters live in one [`CrawlState`] behind a
//! single mutex. Workers only ever see it through [`SharedState`], whose
//! methods take the lock for a short, I/O-free critical section.

use crate::contacts::Contacts;
use crate::crawler::ParsedPage;
use crate::CrawlError;
use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A page that was fetched and parsed, together with its contacts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    pub page: ParsedPage,
    pub contacts: Contacts,
}

/// Normalized URL to fetched page
pub type PageStore = HashMap<String, PageRecord>;

/// Everything a single run accumulates
#[derive(Debug, Default)]
pub struct CrawlState {
    /// Successfully fetched and parsed pages
    pages: PageStore,

    /// Union of the contacts of every page
    contacts: Contacts,

    /// Pages given up on after NoContent or exhausted retries
    pages_skipped: usize,
}

impl CrawlState {
    /// Creates an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pages stored
    pub fn pages_parsed(&self) -> usize {
        self.pages.len()
    }

    /// Number of pages skipped
    pub fn pages_skipped(&self) -> usize {
        self.pages_skipped
    }

    /// Returns true once `max_pages` pages are stored
    pub fn budget_reached(&self, max_pages: usize) -> bool {
        self.pages.len() >= max_pages
    }

    /// Stores a page and unions its contacts in one step
    ///
    /// Returns false without storing anything if the URL is already present
    /// or the budget is already reached.
    pub fn record_page(
        &mut self,
        url: String,
        page: ParsedPage,
        contacts: Contacts,
        max_pages: usize,
    ) -> bool {
        if self.budget_reached(max_pages) || self.pages.contains_key(&url) {
            return false;
        }

        self.contacts.merge(&contacts);
        self.pages.insert(url, PageRecord { page, contacts });
        true
    }

    /// Counts a page that produced no content
    pub fn record_skip(&mut self) {
        self.pages_skipped += 1;
    }

    /// All stored pages
    pub fn pages(&self) -> &PageStore {
        &self.pages
    }

    /// Union of all emails found so far
    pub fn emails(&self) -> &BTreeSet<String> {
        &self.contacts.emails
    }

    /// Union of all phone variants found so far
    pub fn phones(&self) -> &BTreeSet<String> {
        &self.contacts.phones
    }

    /// Gives up the page store once the run is over
    pub fn into_pages(self) -> PageStore {
        self.pages
    }
}

/// Cloneable handle to the run's [`CrawlState`]
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<CrawlState>>,
}

impl SharedState {
    /// Creates a handle to fresh, empty state
    pub fn new() -> Self {
        Self::default()
    }

    // The state is plain data, so a panicked holder cannot leave it torn
    fn lock(&self) -> MutexGuard<'_, CrawlState> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Fails with `MaxPagesReached` if the budget is used up
    pub fn check_budget(&self, max_pages: usize) -> Result<(), CrawlError> {
        if self.lock().budget_reached(max_pages) {
            Err(CrawlError::MaxPagesReached { limit: max_pages })
        } else {
            Ok(())
        }
    }

    /// Stores a page with its contacts; see [`CrawlState::record_page`]
    pub fn record_page(
        &self,
        url: String,
        page: ParsedPage,
        contacts: Contacts,
        max_pages: usize,
    ) -> bool {
        self.lock().record_page(url, page, contacts, max_pages)
    }

    /// Counts a skipped page
    pub fn record_skip(&self) {
        self.lock().record_skip();
    }

    /// Number of pages stored so far
    pub fn pages_parsed(&self) -> usize {
        self.lock().pages_parsed()
    }

    /// Takes the accumulated state out of the handle
    ///
    /// Other live handles keep a reference to an emptied state.
    pub fn into_inner(self) -> CrawlState {
        match Arc::try_unwrap(self.inner) {
            Ok(mutex) => mutex.into_inner().unwrap_or_else(PoisonError::into_inner),
            Err(shared) => {
                let mut state = shared.lock().unwrap_or_else(PoisonError::into_inner);
                std::mem::take(&mut *state)
            }
        }
    }
}
