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

//! Providers.
//!
//! Typed access to the news aggregation API: every query intent becomes
//! exactly one GET request whose JSON body is decoded into the model of
//! the endpoint it was sent to. Requests run on the tokio runtime and are
//! handed out as cancellable [`InFlight`] handles.

#![forbid(unsafe_code, unsafe_op_in_unsafe_fn)]
#![deny(
    clippy::future_not_send,
    clippy::pedantic,
    noop_method_call,
    rust_2018_idioms,
    unused_qualifications
)]
#![warn(unreachable_pub, rustdoc::missing_crate_level_docs)]
#![allow(
    clippy::items_after_statements,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions,
    clippy::must_use_candidate
)]

mod config;
mod error;
mod feed;
mod helpers;
mod models;
mod newsapi;

use async_trait::async_trait;

pub use crate::{
    config::Config,
    error::Error,
    feed::CategoryFeed,
    helpers::in_flight::{Canceller, InFlight},
    models::{
        Article,
        ArticleSource,
        ArticlesResponse,
        Category,
        Endpoint,
        HeadlinesResponse,
        NewsSource,
        ParamValue,
        QueryDefaults,
        QueryIntent,
        QueryText,
        RequestParams,
        SourcesResponse,
    },
    newsapi::NewsApiClient,
};

/// Provider for the top headlines of a category.
#[async_trait]
pub trait HeadlinesProvider: Send + Sync {
    async fn query_headlines(
        &self,
        category: Category,
        page: usize,
    ) -> Result<HeadlinesResponse, Error>;
}
