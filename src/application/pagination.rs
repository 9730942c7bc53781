use std::collections::HashSet;
use std::marker::PhantomData;

use reqwest::Url;
use serde::de::DeserializeOwned;

use crate::application::kounta_client::KountaClient;
use crate::domain::Transport;
use crate::errors::KountaResult;

/// Lazy, restartable walk over a listing Kounta splits across pages.
///
/// Each call to [`Pages::next_page`] issues one request. The URL of the
/// following page comes from the `X-Next-Page` header of the previous
/// response; the walk ends when that header is missing, empty, unparsable,
/// or names a page already fetched in this walk.
pub struct Pages<'a, T, R> {
    client: &'a KountaClient<T>,
    token: String,
    first: Url,
    next: Option<Url>,
    visited: HashSet<Url>,
    context: &'static str,
    _item: PhantomData<fn() -> R>,
}

impl<'a, T: Transport, R: DeserializeOwned> Pages<'a, T, R> {
    pub(crate) fn new(
        client: &'a KountaClient<T>,
        token: &str,
        first: Url,
        context: &'static str,
    ) -> Self {
        Self {
            client,
            token: token.to_string(),
            next: Some(first.clone()),
            first,
            visited: HashSet::new(),
            context,
            _item: PhantomData,
        }
    }

    /// Fetch the page under the cursor and advance past it.
    ///
    /// On error the cursor stays put, so calling again retries the same page.
    pub async fn next_page(&mut self) -> KountaResult<Option<Vec<R>>> {
        let Some(url) = self.next.clone() else {
            return Ok(None);
        };

        let (items, next_page) = self
            .client
            .fetch_json::<Vec<R>>(&self.token, url.clone(), self.context)
            .await?;

        self.visited.insert(url.clone());
        let next = next_page
            .as_deref()
            .map(str::trim)
            .filter(|next| !next.is_empty())
            .and_then(|next| self.follow(&url, next));
        self.next = next;

        Ok(Some(items))
    }

    fn follow(&self, current: &Url, next: &str) -> Option<Url> {
        let next = match current.join(next) {
            Ok(next) => next,
            Err(e) => {
                log::warn!("{}: unreadable next page '{}': {}, stopping", self.context, next, e);
                return None;
            }
        };
        if self.visited.contains(&next) {
            log::warn!("{}: next page {} was already fetched, stopping", self.context, next);
            return None;
        }
        log::debug!("following next page {}", next);
        Some(next)
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Rewind to the first page.
    pub fn restart(&mut self) {
        self.visited.clear();
        self.next = Some(self.first.clone());
    }

    /// Drain every remaining page into one list, in page order.
    pub async fn collect_all(mut self) -> KountaResult<Vec<R>> {
        let mut all = Vec::new();
        while let Some(page) = self.next_page().await? {
            all.extend(page);
        }
        Ok(all)
    }
}
