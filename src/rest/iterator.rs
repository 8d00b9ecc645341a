//! Lazy iteration over paginated listings.
//!
//! [`PageIterator`] walks a listing one page at a time through a page-fetch
//! callback. A page is fetched only when the buffered items run out and the
//! previous page announced a successor.
//!
//! # Example
//!
//! ```rust
//! use scalr_api::jsonapi::Pagination;
//! use scalr_api::rest::{Page, PageIterator};
//!
//! # tokio_test::block_on(async {
//! let mut iter = PageIterator::new(Default::default(), |options| {
//!     Box::pin(async move {
//!         let next_page = (options.number < 2).then_some(options.number + 1);
//!         Ok(Page {
//!             items: vec![options.number * 10, options.number * 10 + 1],
//!             pagination: Some(Pagination {
//!                 current_page: options.number,
//!                 next_page,
//!                 total_pages: 2,
//!                 total_count: 4,
//!                 ..Pagination::default()
//!             }),
//!         })
//!     })
//! });
//!
//! assert_eq!(iter.next().await.unwrap().unwrap(), 10);
//! assert_eq!(iter.remaining(), Some(3));
//! assert_eq!(iter.collect_all().await.unwrap(), vec![11, 20, 21]);
//! # });
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::jsonapi::{PageOptions, Pagination};
use crate::rest::ResourceError;

/// One page of a listing.
#[derive(Clone, Debug, PartialEq)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// The pagination metadata returned with the page.
    pub pagination: Option<Pagination>,
}

/// The future returned by a page-fetch callback.
pub type PageFuture<'a, T> = Pin<Box<dyn Future<Output = Result<Page<T>, ResourceError>> + 'a>>;

type FetchFn<'a, T> = Box<dyn FnMut(PageOptions) -> PageFuture<'a, T> + 'a>;

/// Lazily yields the items of a paginated listing.
///
/// A fetch error is yielded once and ends the iteration.
pub struct PageIterator<'a, T> {
    fetch: FetchFn<'a, T>,
    options: PageOptions,
    buffer: VecDeque<T>,
    next_page: Option<u32>,
    current_page: Option<u32>,
    total_count: Option<u64>,
    position: u64,
    finished: bool,
}

impl<'a, T> PageIterator<'a, T> {
    /// Creates an iterator starting at `options.number`.
    pub fn new<F>(options: PageOptions, fetch: F) -> Self
    where
        F: FnMut(PageOptions) -> PageFuture<'a, T> + 'a,
    {
        Self {
            fetch: Box::new(fetch),
            options,
            buffer: VecDeque::new(),
            next_page: Some(options.number),
            current_page: None,
            total_count: None,
            position: 0,
            finished: false,
        }
    }

    /// Returns the next item, fetching the next page if needed.
    ///
    /// Returns `None` once the listing is exhausted or after an error has
    /// been yielded.
    pub async fn next(&mut self) -> Option<Result<T, ResourceError>> {
        loop {
            if let Some(item) = self.buffer.pop_front() {
                self.position += 1;
                return Some(Ok(item));
            }

            if self.finished {
                return None;
            }

            let Some(number) = self.next_page else {
                self.finished = true;
                return None;
            };

            tracing::debug!(page = number, size = self.options.size, "Fetching page");

            match (self.fetch)(self.options.page(number)).await {
                Ok(page) => self.absorb(number, page),
                Err(error) => {
                    self.finished = true;
                    self.buffer.clear();
                    return Some(Err(error));
                }
            }
        }
    }

    fn absorb(&mut self, requested: u32, page: Page<T>) {
        let pagination = page.pagination;

        self.current_page = Some(
            pagination
                .map(|p| p.current_page)
                .filter(|&current| current > 0)
                .unwrap_or(requested),
        );
        if let Some(pagination) = pagination {
            self.total_count = Some(pagination.total_count);
        }

        // An empty page or a page that does not move forward ends the walk.
        self.next_page = pagination
            .and_then(|p| p.next_page)
            .filter(|&next| next > requested && !page.items.is_empty());

        self.buffer.extend(page.items);
    }

    /// Returns the number of items yielded so far.
    #[must_use]
    pub const fn position(&self) -> u64 {
        self.position
    }

    /// Returns the number of items not yet yielded, once a page has been
    /// fetched.
    #[must_use]
    pub fn remaining(&self) -> Option<u64> {
        self.total_count
            .map(|total| total.saturating_sub(self.position))
    }

    /// Returns the number of the last fetched page.
    #[must_use]
    pub const fn current_page(&self) -> Option<u32> {
        self.current_page
    }

    /// Returns the total number of items, once a page has been fetched.
    #[must_use]
    pub const fn total_count(&self) -> Option<u64> {
        self.total_count
    }

    /// Drains the iterator into a vector.
    ///
    /// # Errors
    ///
    /// Returns the first fetch error.
    pub async fn collect_all(mut self) -> Result<Vec<T>, ResourceError> {
        let mut items = Vec::with_capacity(self.buffer.len());
        while let Some(item) = self.next().await {
            items.push(item?);
        }
        Ok(items)
    }
}

impl<T> fmt::Debug for PageIterator<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageIterator")
            .field("options", &self.options)
            .field("buffered", &self.buffer.len())
            .field("next_page", &self.next_page)
            .field("current_page", &self.current_page)
            .field("total_count", &self.total_count)
            .field("position", &self.position)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}
