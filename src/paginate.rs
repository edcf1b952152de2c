// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paging through a result list with a "view more?" prompt
//!
//! Pages are rendered strictly one after another. The next slice is only
//! computed after the user has answered the prompt for the current one.

use tracing::debug;

use crate::errors::{Result, SearchError};

/// A window over a longer sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    offset: usize,
    page_size: usize,
}

impl Page {
    /// First page. `page_size` must be non-zero.
    pub fn first(page_size: usize) -> Result<Self> {
        if page_size == 0 {
            return Err(SearchError::InvalidConfig(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            offset: 0,
            page_size,
        })
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// End of this page's slice within a sequence of `len` items
    pub fn end(&self, len: usize) -> usize {
        (self.offset + self.page_size).min(len)
    }

    /// Whether items remain after this page
    pub fn has_more(&self, len: usize) -> bool {
        self.offset + self.page_size < len
    }

    fn next(self) -> Self {
        Self {
            offset: self.offset + self.page_size,
            ..self
        }
    }
}

/// Where the user is after a page has been rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageStatus {
    /// 1-based number of the page just shown
    pub page: usize,
    pub total_pages: usize,
    /// Items shown so far, including this page
    pub shown: usize,
    pub total_items: usize,
}

/// How a pagination run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    /// Nothing to show; the no-results notice was rendered
    Empty,
    /// Every page was shown
    Exhausted { pages: usize },
    /// The user declined to continue
    Declined { pages: usize },
}

/// Presentation hooks the paginator drives
pub trait PageView<T> {
    fn render(&mut self, item: &T) -> Result<()>;

    /// Called once, only when there is nothing to show
    fn no_results(&mut self) -> Result<()>;

    /// Ask whether to show the page after `status`; blocks until answered
    fn confirm_next(&mut self, status: &PageStatus) -> Result<bool>;
}

/// Render `items` page by page until exhausted or declined.
pub fn paginate<T, V>(items: &[T], page_size: usize, view: &mut V) -> Result<PageOutcome>
where
    V: PageView<T> + ?Sized,
{
    let mut page = Page::first(page_size)?;

    if items.is_empty() {
        view.no_results()?;
        return Ok(PageOutcome::Empty);
    }

    let total_pages = items.len().div_ceil(page_size);
    let mut pages = 0;

    loop {
        let end = page.end(items.len());
        for item in &items[page.offset()..end] {
            view.render(item)?;
        }
        pages += 1;

        if !page.has_more(items.len()) {
            debug!(pages, "all pages shown");
            return Ok(PageOutcome::Exhausted { pages });
        }

        let status = PageStatus {
            page: pages,
            total_pages,
            shown: end,
            total_items: items.len(),
        };
        if !view.confirm_next(&status)? {
            debug!(pages, total_pages, "paging declined");
            return Ok(PageOutcome::Declined { pages });
        }
        page = page.next();
    }
}
