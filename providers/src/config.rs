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

use std::time::Duration;

use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::{
    error::Error,
    helpers::serde::{serde_opt_duration_as_millis, serialize_redacted},
    models::QueryDefaults,
    newsapi::NewsApiClient,
};

/// The provider configurations.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
#[cfg_attr(test, serde(deny_unknown_fields))]
#[must_use]
pub struct Config {
    /// The url to the news API, the endpoints are resolved relative to it.
    pub base_url: Url,
    /// The key to the news API.
    #[serde(serialize_with = "serialize_redacted")]
    pub api_key: Secret<String>,
    /// Language of searched and listed articles.
    pub language: String,
    /// How many articles to request per page.
    pub page_size: usize,
    /// Country of the top headlines.
    pub country: String,
    /// Source ids of the general feed.
    pub default_sources: Vec<String>,
    /// The request timeout in milliseconds.
    ///
    /// Unset by default, requests then wait for the transport to finish.
    #[serde(with = "serde_opt_duration_as_millis")]
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Url::parse(Self::BASE_URL).unwrap(/* valid constant url */),
            api_key: String::new().into(),
            language: "en".into(),
            page_size: 10,
            country: "us".into(),
            default_sources: [
                "abc-news",
                "bbc-news",
                "bloomberg",
                "cnn",
                "reuters",
                "techcrunch",
                "the-verge",
                "the-wall-street-journal",
                "the-washington-post",
            ]
            .into_iter()
            .map(Into::into)
            .collect(),
            timeout: None,
        }
    }
}

impl Config {
    pub(crate) const BASE_URL: &'static str = "https://newsapi.org/v2/";
    pub(crate) const MAX_PAGE_SIZE: usize = 100;

    /// Creates the default configuration for the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            ..Self::default()
        }
    }

    pub fn with_base_url(mut self, base: &str) -> Result<Self, Error> {
        self.base_url = Url::parse(base).map_err(|error| Error::InvalidUrlBase(Some(error)))?;
        Ok(self)
    }

    pub fn with_timeout(mut self, millis: u64) -> Self {
        self.timeout = Some(Duration::from_millis(millis));
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn build(self) -> Result<NewsApiClient, Error> {
        NewsApiClient::new(self)
    }

    /// Checks that the key is set and returns the url the endpoints are joined onto.
    pub(crate) fn endpoint_base(&self) -> Result<Url, Error> {
        if self.api_key.expose_secret().trim().is_empty() {
            return Err(Error::MissingApiKey);
        }
        if self.base_url.cannot_be_a_base() {
            return Err(Error::InvalidUrlBase(None));
        }

        let mut base = self.base_url.clone();
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.set_query(None);

        Ok(base)
    }

    pub(crate) fn check_page_size(&self) -> Result<(), Error> {
        if (1..=Self::MAX_PAGE_SIZE).contains(&self.page_size) {
            Ok(())
        } else {
            Err(Error::InvalidPageSize(self.page_size))
        }
    }

    pub(crate) fn query_defaults(&self) -> QueryDefaults {
        QueryDefaults {
            language: self.language.clone(),
            page_size: self.page_size,
            country: self.country.clone(),
            sources: self.default_sources.clone(),
            sort_by: QueryDefaults::SORT_BY.into(),
        }
    }
}
