use aws_sdk_dynamodb::operation::query::QueryInput;
use aws_sdk_dynamodb::operation::scan::ScanInput;
use futures_util::stream;
use std::future::Future;
use tokio_stream::Stream;
use tracing::{debug, trace};

use crate::error::Error;
use crate::wrapper::types::{Item, Key, Page};

/// Input of a paginated read that can be resumed from a continuation key
pub(crate) trait ExclusiveStart: Clone {
    /// Resume after `key`
    fn set_exclusive_start_key(&mut self, key: Key);
}

impl ExclusiveStart for QueryInput {
    fn set_exclusive_start_key(&mut self, key: Key) {
        self.exclusive_start_key = Some(key);
    }
}

impl ExclusiveStart for ScanInput {
    fn set_exclusive_start_key(&mut self, key: Key) {
        self.exclusive_start_key = Some(key);
    }
}

/// Fetch every page of a paginated read and concatenate the items
///
/// Keeps following `last_evaluated_key` until a page comes back without one;
/// an empty page that still carries a key does not end the read. The first
/// failed fetch aborts the read and its error is returned as-is.
pub(crate) async fn drain_pages<P, F, Fut>(params: P, mut fetch: F) -> Result<Vec<Item>, Error>
where
    P: ExclusiveStart,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<Page, Error>>,
{
    let mut params = params;
    let mut items = Vec::new();
    let mut page_count = 0usize;

    loop {
        let page = fetch(params.clone()).await?;
        page_count += 1;

        trace!(page = page_count, items = page.items.len(), "fetched page");
        items.extend(page.items);

        match page.last_evaluated_key {
            Some(key) => params.set_exclusive_start_key(key),
            None => break,
        }
    }

    debug!(pages = page_count, items = items.len(), "drained paginated read");

    Ok(items)
}

/// Lazily fetch the pages of a paginated read
///
/// The next page is requested only after the previous one has been yielded.
/// The stream ends after the first page without a continuation key, or right
/// after yielding the first error.
pub(crate) fn page_stream<P, F, Fut>(params: P, fetch: F) -> impl Stream<Item = Result<Page, Error>>
where
    P: ExclusiveStart,
    F: FnMut(P) -> Fut,
    Fut: Future<Output = Result<Page, Error>>,
{
    stream::try_unfold((Some(params), fetch), |(params, mut fetch)| async move {
        let Some(mut params) = params else {
            return Ok::<_, Error>(None);
        };

        let page = fetch(params.clone()).await?;
        trace!(items = page.items.len(), "streamed page");

        let next = page.last_evaluated_key.clone().map(|key| {
            params.set_exclusive_start_key(key);
            params
        });

        Ok(Some((page, (next, fetch))))
    })
}
