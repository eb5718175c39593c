// Copyright 2022 Xayn AG
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as
// published by the Free Software Foundation, version 3.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.

//! Paging through the headlines of a category section.

use tracing::debug;

use crate::{Article, Category, Error, HeadlinesProvider};

/// The headlines of a single category, one page at a time.
pub struct CategoryFeed<P> {
    provider: P,
    category: Category,
    next_page: usize,
    fetched: usize,
    exhausted: bool,
}

impl<P> CategoryFeed<P>
where
    P: HeadlinesProvider,
{
    pub fn new(provider: P, category: Category) -> Self {
        Self {
            provider,
            category,
            next_page: 1,
            fetched: 0,
            exhausted: false,
        }
    }

    pub fn category(&self) -> Category {
        self.category
    }

    /// Title of the section showing this feed.
    pub fn title(&self) -> &'static str {
        self.category.title()
    }

    pub fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    /// Fetches the next page.
    ///
    /// Returns `None` once all headlines reported by the API were fetched.
    /// On failure the page is not advanced, calling again retries it.
    pub async fn next_page(&mut self) -> Result<Option<Vec<Article>>, Error> {
        if self.exhausted {
            return Ok(None);
        }

        let response = self
            .provider
            .query_headlines(self.category, self.next_page)
            .await?;

        self.fetched += response.articles.len();
        self.exhausted = response.articles.is_empty() || self.fetched >= response.total_results;
        debug!(
            category = %self.category,
            page = self.next_page,
            fetched = self.fetched,
            total = response.total_results,
            "fetched headlines page",
        );
        self.next_page += 1;

        if response.articles.is_empty() {
            Ok(None)
        } else {
            Ok(Some(response.articles))
        }
    }

    /// Starts again with the first page.
    pub fn reset(&mut self) {
        self.next_page = 1;
        self.fetched = 0;
        self.exhausted = false;
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::{ArticleSource, HeadlinesResponse};

    /// Serves `total` headlines in pages of `page_size`.
    struct FakeHeadlines {
        total: usize,
        page_size: usize,
        fail_next: Mutex<bool>,
        requested: Mutex<Vec<(Category, usize)>>,
    }

    impl FakeHeadlines {
        fn new(total: usize, page_size: usize) -> Self {
            Self {
                total,
                page_size,
                fail_next: Mutex::new(false),
                requested: Mutex::new(Vec::new()),
            }
        }
    }

    fn article(index: usize) -> Article {
        Article {
            source: ArticleSource {
                id: Some("the-verge".into()),
                name: "The Verge".into(),
            },
            author: None,
            title: format!("headline {index}"),
            description: None,
            url: format!("https://example.com/{index}"),
            url_to_image: None,
            published_at: Utc.timestamp_opt(1_643_290_000, 0).unwrap(),
            content: None,
        }
    }

    #[async_trait]
    impl<'a> HeadlinesProvider for &'a FakeHeadlines {
        async fn query_headlines(
            &self,
            category: Category,
            page: usize,
        ) -> Result<HeadlinesResponse, Error> {
            self.requested.lock().unwrap().push((category, page));
            if std::mem::take(&mut *self.fail_next.lock().unwrap()) {
                return Err(Error::MissingBody);
            }

            let start = ((page - 1) * self.page_size).min(self.total);
            let end = (start + self.page_size).min(self.total);
            Ok(HeadlinesResponse {
                status: "ok".into(),
                total_results: self.total,
                articles: (start..end).map(article).collect(),
            })
        }
    }

    #[tokio::test]
    async fn test_pages_until_total() {
        let fake = FakeHeadlines::new(5, 2);
        let mut feed = CategoryFeed::new(&fake, Category::Technology);
        assert_eq!(feed.title(), "Technology");

        let mut sizes = Vec::new();
        while let Some(articles) = feed.next_page().await.unwrap() {
            sizes.push(articles.len());
        }

        assert_eq!(sizes, [2, 2, 1]);
        assert!(feed.is_exhausted());
        assert_eq!(
            *fake.requested.lock().unwrap(),
            [
                (Category::Technology, 1),
                (Category::Technology, 2),
                (Category::Technology, 3),
            ],
        );
        assert!(feed.next_page().await.unwrap().is_none());
        assert_eq!(fake.requested.lock().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_empty_category() {
        let fake = FakeHeadlines::new(0, 10);
        let mut feed = CategoryFeed::new(&fake, Category::Science);

        assert!(feed.next_page().await.unwrap().is_none());
        assert!(feed.is_exhausted());
    }

    #[tokio::test]
    async fn test_failure_retries_same_page() {
        let fake = FakeHeadlines::new(4, 2);
        let mut feed = CategoryFeed::new(&fake, Category::Sports);

        feed.next_page().await.unwrap();
        *fake.fail_next.lock().unwrap() = true;
        assert!(feed.next_page().await.is_err());
        assert_eq!(feed.next_page().await.unwrap().unwrap()[0].title, "headline 2");

        let pages = fake
            .requested
            .lock()
            .unwrap()
            .iter()
            .map(|(_, page)| *page)
            .collect::<Vec<_>>();
        assert_eq!(pages, [1, 2, 2]);
    }

    #[tokio::test]
    async fn test_reset() {
        let fake = FakeHeadlines::new(2, 2);
        let mut feed = CategoryFeed::new(&fake, Category::Business);

        assert!(feed.next_page().await.unwrap().is_some());
        assert!(feed.is_exhausted());

        feed.reset();
        assert!(!feed.is_exhausted());
        assert_eq!(feed.next_page().await.unwrap().unwrap()[0].title, "headline 0");
    }
}
