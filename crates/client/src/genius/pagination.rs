//! Adaptive pagination over collection endpoints.
//!
//! Two modes:
//! - [`PageTarget::Exactly`]: each request asks for `min(ceiling, remaining)`
//!   items so the total never overshoots; the last page shrinks.
//! - [`PageTarget::All`]: each request asks for the full ceiling until the
//!   server's `next_page` cursor is zero or absent.
//!
//! The next page number always comes from the server. A failure on any page
//! aborts the whole fetch and discards the pages already collected.

use async_trait::async_trait;

use crate::genius::GeniusError;
use crate::genius::response::Page;

/// How many items a paginated fetch should return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageTarget {
    /// Exactly this many items, or fewer if the server runs out.
    Exactly(usize),
    /// Everything the server has.
    All,
}

impl PageTarget {
    /// `None` means unbounded.
    pub fn from_limit(limit: Option<usize>) -> Self {
        limit.map_or(PageTarget::All, PageTarget::Exactly)
    }
}

/// Cursor state threaded through one paginated fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageCursor {
    page: u32,
    per_page: u32,
    fetched: usize,
    target: Option<usize>,
}

impl PageCursor {
    pub fn new(per_page: u32, target: PageTarget) -> Result<Self, GeniusError> {
        if per_page == 0 {
            return Err(GeniusError::InvalidInput("per_page must be at least 1".to_string()));
        }

        let target = match target {
            PageTarget::Exactly(n) => Some(n),
            PageTarget::All => None,
        };

        Ok(Self { page: 1, per_page, fetched: 0, target })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn fetched(&self) -> usize {
        self.fetched
    }

    /// Items still wanted, or `None` when unbounded.
    pub fn remaining(&self) -> Option<usize> {
        self.target.map(|target| target - self.fetched)
    }

    /// Page size for the next request, or `None` once the target is met.
    pub fn next_request_size(&self) -> Option<u32> {
        match self.remaining() {
            None => Some(self.per_page),
            Some(0) => None,
            Some(remaining) => Some(u32::try_from(remaining).map_or(self.per_page, |r| r.min(self.per_page))),
        }
    }

    /// Record a received page; returns how many of its items to keep.
    fn accept(&mut self, received: usize) -> usize {
        let kept = self.remaining().map_or(received, |remaining| received.min(remaining));
        self.fetched += kept;
        kept
    }

    /// Move to the server-supplied next page. Returns `false` when exhausted.
    fn advance(&mut self, next_page: Option<u32>) -> bool {
        match next_page {
            Some(next) if next > 0 => {
                self.page = next;
                true
            }
            _ => false,
        }
    }
}

/// Source of pages for a single collection.
#[async_trait]
pub trait PageSource: Send + Sync {
    type Item: Send;

    /// Fetch page `page` holding up to `per_page` items.
    async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page<Self::Item>, GeniusError>;
}

/// Drive `source` until the target is met or the server is exhausted.
pub async fn paginate<S>(source: &S, per_page: u32, target: PageTarget) -> Result<Vec<S::Item>, GeniusError>
where
    S: PageSource + ?Sized,
{
    let mut cursor = PageCursor::new(per_page, target)?;
    let mut items = Vec::new();

    while let Some(size) = cursor.next_request_size() {
        let page = source.fetch_page(cursor.page(), size).await?;
        let received = page.items.len();
        let kept = cursor.accept(received);
        items.extend(page.items.into_iter().take(kept));

        tracing::debug!(
            page = cursor.page(),
            per_page = size,
            received,
            fetched = cursor.fetched(),
            next_page = ?page.next_page,
            "fetched page"
        );

        if !cursor.advance(page.next_page) {
            break;
        }
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Serves `total` numbered items sequentially and records every request.
    struct FakeSource {
        total: usize,
        served: Mutex<usize>,
        requests: Mutex<Vec<(u32, u32)>>,
        fail_on_page: Option<u32>,
        oversize: bool,
    }

    impl FakeSource {
        fn new(total: usize) -> Self {
            Self { total, served: Mutex::new(0), requests: Mutex::new(Vec::new()), fail_on_page: None, oversize: false }
        }

        fn requests(&self) -> Vec<(u32, u32)> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PageSource for FakeSource {
        type Item = usize;

        async fn fetch_page(&self, page: u32, per_page: u32) -> Result<Page<usize>, GeniusError> {
            self.requests.lock().unwrap().push((page, per_page));

            if self.fail_on_page == Some(page) {
                return Err(GeniusError::Upstream { status: 500, url: format!("page {page}"), body: "boom".into() });
            }

            let mut served = self.served.lock().unwrap();
            let size = if self.oversize { per_page as usize * 2 } else { per_page as usize };
            let end = (*served + size).min(self.total);
            let items: Vec<usize> = (*served..end).collect();
            *served = end;

            let next_page = if end < self.total { Some(page + 1) } else { None };
            Ok(Page { items, next_page })
        }
    }

    #[tokio::test]
    async fn test_bounded_shrinks_last_page() {
        let source = FakeSource::new(500);
        let items = paginate(&source, 50, PageTarget::Exactly(125)).await.unwrap();

        assert_eq!(items.len(), 125);
        assert_eq!(items, (0..125).collect::<Vec<_>>());
        assert_eq!(source.requests(), vec![(1, 50), (2, 50), (3, 25)]);
    }

    #[tokio::test]
    async fn test_bounded_smaller_than_page() {
        let source = FakeSource::new(500);
        let items = paginate(&source, 50, PageTarget::Exactly(7)).await.unwrap();

        assert_eq!(items.len(), 7);
        assert_eq!(source.requests(), vec![(1, 7)]);
    }

    #[tokio::test]
    async fn test_bounded_zero_issues_no_request() {
        let source = FakeSource::new(500);
        let items = paginate(&source, 50, PageTarget::Exactly(0)).await.unwrap();

        assert!(items.is_empty());
        assert!(source.requests().is_empty());
    }

    #[tokio::test]
    async fn test_bounded_stops_when_server_exhausted() {
        let source = FakeSource::new(60);
        let items = paginate(&source, 50, PageTarget::Exactly(125)).await.unwrap();

        assert_eq!(items.len(), 60);
        assert_eq!(source.requests(), vec![(1, 50), (2, 50)]);
    }

    #[tokio::test]
    async fn test_bounded_truncates_oversized_page() {
        let mut source = FakeSource::new(500);
        source.oversize = true;
        let items = paginate(&source, 50, PageTarget::Exactly(30)).await.unwrap();

        assert_eq!(items.len(), 30);
        assert_eq!(source.requests(), vec![(1, 30)]);
    }

    #[tokio::test]
    async fn test_unbounded_runs_until_cursor_exhausted() {
        let source = FakeSource::new(120);
        let items = paginate(&source, 50, PageTarget::All).await.unwrap();

        assert_eq!(items.len(), 120);
        assert_eq!(source.requests(), vec![(1, 50), (2, 50), (3, 50)]);
    }

    #[tokio::test]
    async fn test_unbounded_trusts_server_cursor() {
        struct Jumping;

        #[async_trait]
        impl PageSource for Jumping {
            type Item = u32;

            async fn fetch_page(&self, page: u32, _per_page: u32) -> Result<Page<u32>, GeniusError> {
                let next_page = match page {
                    1 => Some(7),
                    7 => Some(0),
                    _ => return Err(GeniusError::InvalidInput(format!("unexpected page {page}"))),
                };
                Ok(Page { items: vec![page], next_page })
            }
        }

        let items = paginate(&Jumping, 50, PageTarget::All).await.unwrap();
        assert_eq!(items, vec![1, 7]);
    }

    #[tokio::test]
    async fn test_failure_discards_collected_pages() {
        let mut source = FakeSource::new(500);
        source.fail_on_page = Some(2);

        let result = paginate(&source, 50, PageTarget::All).await;

        assert!(matches!(result, Err(GeniusError::Upstream { status: 500, .. })));
        assert_eq!(source.requests(), vec![(1, 50), (2, 50)]);
    }

    #[tokio::test]
    async fn test_zero_per_page_rejected() {
        let source = FakeSource::new(10);
        let result = paginate(&source, 0, PageTarget::All).await;

        assert!(matches!(result, Err(GeniusError::InvalidInput(_))));
        assert!(source.requests().is_empty());
    }

    #[test]
    fn test_cursor_sizes() {
        let cursor = PageCursor::new(50, PageTarget::Exactly(125)).unwrap();
        assert_eq!(cursor.page(), 1);
        assert_eq!(cursor.remaining(), Some(125));
        assert_eq!(cursor.next_request_size(), Some(50));

        let cursor = PageCursor::new(50, PageTarget::All).unwrap();
        assert_eq!(cursor.remaining(), None);
        assert_eq!(cursor.next_request_size(), Some(50));
    }

    #[test]
    fn test_target_from_limit() {
        assert_eq!(PageTarget::from_limit(Some(3)), PageTarget::Exactly(3));
        assert_eq!(PageTarget::from_limit(None), PageTarget::All);
    }
}
