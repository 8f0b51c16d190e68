//! Fetched-collection state shared by the marketplace pages.
//!
//! DESIGN
//! ======
//! Each page keeps one `RwSignal<Listing<T>>` per collection it shows. A
//! failed reload keeps the rows already on screen and only sets `error`.

#[cfg(test)]
#[path = "listing_test.rs"]
mod listing_test;

use crate::net::api::ApiError;

/// Rows of one API collection plus its load status.
#[derive(Clone, Debug, PartialEq)]
pub struct Listing<T> {
    pub items: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
}

impl<T> Default for Listing<T> {
    fn default() -> Self {
        Self { items: Vec::new(), loading: true, error: None }
    }
}

impl<T> Listing<T> {
    /// Apply a fetch result; on failure `fallback` is shown unless the
    /// server sent its own message.
    pub fn loaded(&mut self, result: Result<Vec<T>, ApiError>, fallback: &str) {
        self.loading = false;
        match result {
            Ok(items) => {
                self.items = items;
                self.error = None;
            }
            Err(e) => {
                log::warn!("listing: load failed: {e}");
                self.error = Some(e.user_message(fallback));
            }
        }
    }

    /// True once loaded with nothing to show.
    pub fn is_empty(&self) -> bool {
        !self.loading && self.items.is_empty()
    }

    pub fn remove_where(&mut self, pred: impl Fn(&T) -> bool) {
        self.items.retain(|item| !pred(item));
    }

    pub fn update_where(&mut self, pred: impl Fn(&T) -> bool, apply: impl Fn(&mut T)) {
        self.items.iter_mut().filter(|item| pred(item)).for_each(apply);
    }
}
