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

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    helpers::serde::{deserialize_null_default, deserialize_parsed_or_none},
    Category,
};

/// A news article
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub source: ArticleSource,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub url: String,

    #[serde(default)]
    pub url_to_image: Option<String>,

    pub published_at: DateTime<Utc>,

    #[serde(default)]
    pub content: Option<String>,
}

/// The source an article was published by.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,
}

/// Response of the `everything` endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    pub status: String,

    /// Total articles available
    #[serde(default)]
    pub total_results: usize,

    #[serde(default)]
    pub articles: Vec<Article>,
}

/// Response of the `top-headlines` endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadlinesResponse {
    pub status: String,

    /// Total headlines available
    #[serde(default)]
    pub total_results: usize,

    #[serde(default)]
    pub articles: Vec<Article>,
}

/// A source as listed by the `sources` endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct NewsSource {
    pub id: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub name: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub url: String,

    /// `None` if the API lists the source under a category unknown to this client.
    #[serde(default, deserialize_with = "deserialize_parsed_or_none")]
    pub category: Option<Category>,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub language: String,

    #[serde(default, deserialize_with = "deserialize_null_default")]
    pub country: String,
}

/// Response of the `sources` endpoint.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct SourcesResponse {
    pub status: String,

    #[serde(default)]
    pub sources: Vec<NewsSource>,
}

/// Body the API sends along with a non-successful status code.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorResponse {
    #[serde(default)]
    pub(crate) code: String,

    #[serde(default)]
    pub(crate) message: String,
}

impl ErrorResponse {
    /// Extracts the message of an error body, if it is one.
    pub(crate) fn message_from(body: &[u8]) -> Option<String> {
        let response = serde_json::from_slice::<Self>(body).ok()?;
        match (response.code.is_empty(), response.message.is_empty()) {
            (_, true) => None,
            (true, false) => Some(response.message),
            (false, false) => Some(format!("{}: {}", response.code, response.message)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_articles() {
        let response: ArticlesResponse =
            serde_json::from_str(include_str!("../../test-fixtures/newsapi/everything.json"))
                .unwrap();

        assert_eq!(response.status, "ok");
        assert_eq!(response.total_results, 3254);
        assert_eq!(response.articles.len(), 2);

        let article = &response.articles[0];
        assert_eq!(article.source.id.as_deref(), Some("wired"));
        assert_eq!(article.title, "Bitcoin Is Having a Weird Week");
        assert_eq!(
            article.published_at.to_rfc3339(),
            "2022-01-27T13:24:33+00:00",
        );

        let article = &response.articles[1];
        assert!(article.source.id.is_none());
        assert_eq!(article.source.name, "Gizmodo.com");
        assert!(article.author.is_none());
        assert!(article.description.is_none());
        assert!(article.url_to_image.is_none());
    }

    #[test]
    fn test_decode_headlines() {
        let response: HeadlinesResponse = serde_json::from_str(include_str!(
            "../../test-fixtures/newsapi/top-headlines.json"
        ))
        .unwrap();

        assert_eq!(response.total_results, 3);
        assert_eq!(response.articles[1].source.name, "TechCrunch");
    }

    #[test]
    fn test_decode_sources() {
        let response: SourcesResponse =
            serde_json::from_str(include_str!("../../test-fixtures/newsapi/sources.json"))
                .unwrap();

        assert_eq!(response.sources.len(), 2);
        assert_eq!(response.sources[0].id, "ars-technica");
        assert_eq!(response.sources[0].category, Some(Category::Technology));
        assert_eq!(response.sources[1].description, "");
    }

    #[test]
    fn test_unknown_source_category() {
        let response: SourcesResponse = serde_json::from_str(
            r#"{
                "status": "ok",
                "sources": [
                    { "id": "weather-now", "name": "Weather Now", "category": "weather" },
                    { "id": "misc", "name": "Misc", "category": null },
                    { "id": "bbc-sport", "name": "BBC Sport", "category": "Sports" }
                ]
            }"#,
        )
        .unwrap();

        let categories = response
            .sources
            .iter()
            .map(|source| source.category)
            .collect::<Vec<_>>();
        assert_eq!(categories, [None, None, Some(Category::Sports)]);
    }

    #[test]
    fn test_error_message() {
        let message =
            ErrorResponse::message_from(include_bytes!("../../test-fixtures/newsapi/error.json"))
                .unwrap();
        assert!(message.starts_with("apiKeyInvalid: Your API key is invalid"));

        assert_eq!(
            ErrorResponse::message_from(br#"{"message": "rate limited"}"#).as_deref(),
            Some("rate limited"),
        );
        assert!(ErrorResponse::message_from(b"<html>Bad Gateway</html>").is_none());
        assert!(ErrorResponse::message_from(b"{}").is_none());
    }
}
