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

//! Client to get news from the news API.

use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::{
    helpers::{in_flight::InFlight, rest_endpoint::RestEndpoint},
    ArticlesResponse,
    Category,
    Config,
    Error,
    HeadlinesProvider,
    HeadlinesResponse,
    QueryDefaults,
    QueryIntent,
    SourcesResponse,
};

/// Client that issues one request per query intent.
///
/// Every operation returns immediately. Contract violations like an empty
/// keyword are returned as [`Error::InvalidQuery`], everything else is
/// delivered through the returned [`InFlight`] handle.
///
/// The operations spawn onto the current tokio runtime and panic when
/// called outside of one.
#[derive(Clone, Debug)]
pub struct NewsApiClient {
    endpoint: Arc<RestEndpoint>,
    defaults: Arc<QueryDefaults>,
}

impl NewsApiClient {
    /// Create a new client.
    pub fn new(config: Config) -> Result<Self, Error> {
        config.check_page_size()?;
        Ok(Self {
            endpoint: Arc::new(RestEndpoint::new(&config)?),
            defaults: Arc::new(config.query_defaults()),
        })
    }

    pub fn defaults(&self) -> &QueryDefaults {
        &self.defaults
    }

    /// Articles matching the keyword.
    pub fn search_articles(
        &self,
        keyword: &str,
        page: usize,
    ) -> Result<InFlight<ArticlesResponse>, Error> {
        let intent = QueryIntent::search(keyword, page)?;
        Ok(self.dispatch::<ArticlesResponse>(&intent))
    }

    /// Articles of a single source.
    pub fn articles_by_source(
        &self,
        source: &str,
        page: usize,
    ) -> Result<InFlight<ArticlesResponse>, Error> {
        let intent = QueryIntent::by_source(source, page)?;
        Ok(self.dispatch::<ArticlesResponse>(&intent))
    }

    /// Top headlines of a category.
    pub fn top_headlines(
        &self,
        category: Category,
        page: usize,
    ) -> Result<InFlight<HeadlinesResponse>, Error> {
        let intent = QueryIntent::top_headlines(category, page)?;
        Ok(self.dispatch::<HeadlinesResponse>(&intent))
    }

    /// Latest articles of the default sources.
    pub fn everything(&self, page: usize) -> Result<InFlight<ArticlesResponse>, Error> {
        let intent = QueryIntent::everything(page)?;
        Ok(self.dispatch::<ArticlesResponse>(&intent))
    }

    /// Sources publishing in a category and language.
    pub fn sources(
        &self,
        category: Category,
        language: &str,
    ) -> Result<InFlight<SourcesResponse>, Error> {
        let intent = QueryIntent::sources(category, language)?;
        Ok(self.dispatch::<SourcesResponse>(&intent))
    }

    /// The url a request for the intent is sent to, including the credential.
    pub fn request_target(&self, intent: &QueryIntent) -> Result<Url, Error> {
        self.endpoint
            .request_url(intent.endpoint(), &intent.params(&self.defaults))
    }

    fn dispatch<D>(&self, intent: &QueryIntent) -> InFlight<D>
    where
        D: DeserializeOwned + Send + 'static,
    {
        let endpoint = Arc::clone(&self.endpoint);
        let target = intent.endpoint();
        let params = intent.params(&self.defaults);

        InFlight::spawn(async move { endpoint.get_request::<D>(target, &params).await })
    }
}

#[async_trait]
impl HeadlinesProvider for NewsApiClient {
    async fn query_headlines(
        &self,
        category: Category,
        page: usize,
    ) -> Result<HeadlinesResponse, Error> {
        self.top_headlines(category, page)?
            .await
            .unwrap_or(Err(Error::Cancelled))
    }
}
