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

use displaydoc::Display as DisplayDoc;
use reqwest::StatusCode;
use thiserror::Error;

/// Client errors.
#[derive(Error, Debug, DisplayDoc)]
pub enum Error {
    /// Invalid query: {0}
    InvalidQuery(String),
    /// Unknown news category: {0}
    UnknownCategory(String),
    /// No API key is configured
    MissingApiKey,
    /// Invalid page size {0}, the API serves 1 to 100 articles per page
    InvalidPageSize(usize),
    /// Invalid API Url base
    InvalidUrlBase(Option<url::ParseError>),
    /// Failed to execute the HTTP request: {0}
    RequestExecution(#[source] reqwest::Error),
    /// Server returned the non-successful status code {status}: {message}
    UnexpectedStatus { status: StatusCode, message: String },
    /// Failed to fetch from the server: {0}
    Fetching(#[source] reqwest::Error),
    /// Server returned a response without a body
    MissingBody,
    /// Failed to decode the server's response at JSON path {0}: {1}
    DecodingAtPath(
        String,
        #[source] serde_path_to_error::Error<serde_json::Error>,
    ),
    /// The request was cancelled before it completed
    Cancelled,
}
