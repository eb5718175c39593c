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

use std::{fmt, num::NonZeroUsize};

use derive_more::{Deref, Display, From};
use itertools::Itertools;

use crate::{Category, Config, Error};

/// The remote resource a query is sent to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Everything,
    TopHeadlines,
    Sources,
}

impl Endpoint {
    /// Path of the endpoint relative to the API base url.
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::Everything => "everything",
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Sources => "sources",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A scalar query parameter value.
#[derive(Clone, Debug, From, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(usize),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Number(number) => write!(f, "{number}"),
        }
    }
}

/// Query parameters in the order they are appended to the request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestParams(Vec<(&'static str, ParamValue)>);

impl RequestParams {
    #[must_use]
    fn with(mut self, name: &'static str, value: impl Into<ParamValue>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0
            .iter()
            .find_map(|(key, value)| (*key == name).then_some(value))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &ParamValue)> {
        self.0.iter().map(|(name, value)| (*name, value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for RequestParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}",
            self.0
                .iter()
                .format_with("&", |(name, value), f| f(&format_args!("{name}={value}"))),
        )
    }
}

/// Values which are the same for all queries of a client.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QueryDefaults {
    pub language: String,
    pub page_size: usize,
    pub country: String,
    /// Sources of the general feed.
    pub sources: Vec<String>,
    pub sort_by: String,
}

impl QueryDefaults {
    pub(crate) const SORT_BY: &'static str = "publishedAt";
}

impl Default for QueryDefaults {
    fn default() -> Self {
        Config::default().query_defaults()
    }
}

/// Trimmed, non-empty text of a query, e.g. a keyword or a source id.
///
/// Only created by the [`QueryIntent`] constructors.
#[derive(Clone, Debug, Deref, Display, PartialEq, Eq)]
pub struct QueryText(String);

impl QueryText {
    fn new(field: &str, value: &str) -> Result<Self, Error> {
        let value = value.trim();
        if value.is_empty() {
            Err(Error::InvalidQuery(format!("{field} must not be empty")))
        } else {
            Ok(Self(value.into()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<QueryText> for ParamValue {
    fn from(text: QueryText) -> Self {
        ParamValue::Text(text.0)
    }
}

/// What kind of news listing is requested.
///
/// Every variant holds exactly the fields needed for its request, so the
/// parameters can always be built. The fields can't hold empty text or
/// page `0`, an intent is only obtained through the validating constructors.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QueryIntent {
    /// Articles matching a keyword.
    Search {
        keyword: QueryText,
        page: NonZeroUsize,
    },
    /// Articles of a single source.
    BySource {
        source: QueryText,
        page: NonZeroUsize,
    },
    /// Top headlines of a category.
    TopHeadlines {
        category: Category,
        page: NonZeroUsize,
    },
    /// Latest articles of the default sources.
    Everything { page: NonZeroUsize },
    /// Sources publishing in a category.
    Sources {
        category: Category,
        language: QueryText,
    },
}

impl QueryIntent {
    pub fn search(keyword: &str, page: usize) -> Result<Self, Error> {
        Ok(Self::Search {
            keyword: QueryText::new("keyword", keyword)?,
            page: first_page_is_one(page)?,
        })
    }

    pub fn by_source(source: &str, page: usize) -> Result<Self, Error> {
        Ok(Self::BySource {
            source: QueryText::new("source", source)?,
            page: first_page_is_one(page)?,
        })
    }

    pub fn top_headlines(category: Category, page: usize) -> Result<Self, Error> {
        Ok(Self::TopHeadlines {
            category,
            page: first_page_is_one(page)?,
        })
    }

    pub fn everything(page: usize) -> Result<Self, Error> {
        Ok(Self::Everything {
            page: first_page_is_one(page)?,
        })
    }

    pub fn sources(category: Category, language: &str) -> Result<Self, Error> {
        Ok(Self::Sources {
            category,
            language: QueryText::new("language", language)?,
        })
    }

    pub fn endpoint(&self) -> Endpoint {
        match self {
            Self::Search { .. } | Self::BySource { .. } | Self::Everything { .. } => {
                Endpoint::Everything
            }
            Self::TopHeadlines { .. } => Endpoint::TopHeadlines,
            Self::Sources { .. } => Endpoint::Sources,
        }
    }

    /// Builds the query parameters, a pure function of the intent and the defaults.
    pub fn params(&self, defaults: &QueryDefaults) -> RequestParams {
        let params = RequestParams::default();
        match self {
            Self::Search { keyword, page } => params
                .with("page", page.get())
                .with("pageSize", defaults.page_size)
                .with("language", defaults.language.clone())
                .with("q", keyword.clone()),
            Self::BySource { source, page } => params
                .with("sources", source.clone())
                .with("pageSize", defaults.page_size)
                .with("page", page.get())
                .with("language", defaults.language.clone()),
            Self::TopHeadlines { category, page } => params
                .with("country", defaults.country.clone())
                .with("pageSize", defaults.page_size)
                .with("page", page.get())
                .with("category", category.to_string()),
            Self::Everything { page } => params
                .with("page", page.get())
                .with("pageSize", defaults.page_size)
                .with("language", defaults.language.clone())
                .with("sources", defaults.sources.join(","))
                .with("sortBy", defaults.sort_by.clone()),
            Self::Sources { category, language } => params
                .with("category", category.to_string())
                .with("language", language.clone()),
        }
    }
}

fn first_page_is_one(page: usize) -> Result<NonZeroUsize, Error> {
    NonZeroUsize::new(page).ok_or_else(|| Error::InvalidQuery("paging starts with 1".into()))
}
