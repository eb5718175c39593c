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

use std::{sync::Arc, time::Duration};

use once_cell::sync::OnceCell;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use tracing::{debug, trace, warn};
use url::Url;

use crate::{
    config::Config,
    error::Error,
    models::{Endpoint, ErrorResponse, RequestParams},
};

/// Preferably all endpoints should share the same [`Client`] instance.
static SHARED_CLIENT: OnceCell<Arc<Client>> = OnceCell::new();

/// A simple abstraction over the endpoints of the news API.
#[derive(Debug)]
pub(crate) struct RestEndpoint {
    client: Arc<Client>,
    base: Url,
    api_key: Secret<String>,
    timeout: Option<Duration>,
}

impl RestEndpoint {
    pub(crate) const API_KEY_PARAM: &'static str = "apiKey";

    pub(crate) fn new(config: &Config) -> Result<Self, Error> {
        let client = SHARED_CLIENT
            .get_or_init(|| {
                // Note: If we need to use a ClientBuilder we should pass the `Arc<Client>` as
                //       argument to `new` instead.
                Arc::new(Client::new())
            })
            .clone();

        Ok(Self {
            client,
            base: config.endpoint_base()?,
            api_key: config.api_key.clone(),
            timeout: config.timeout,
        })
    }

    /// The full request target: endpoint url, credential, then the parameters in order.
    pub(crate) fn request_url(
        &self,
        endpoint: Endpoint,
        params: &RequestParams,
    ) -> Result<Url, Error> {
        let mut url = self
            .base
            .join(endpoint.path())
            .map_err(|error| Error::InvalidUrlBase(Some(error)))?;

        let mut query = url.query_pairs_mut();
        query.append_pair(Self::API_KEY_PARAM, self.api_key.expose_secret());
        for (name, value) in params.iter() {
            query.append_pair(name, &value.to_string());
        }
        drop(query);

        Ok(url)
    }

    /// Sends a single GET request and decodes the body as `D`.
    pub(crate) async fn get_request<D>(
        &self,
        endpoint: Endpoint,
        params: &RequestParams,
    ) -> Result<D, Error>
    where
        D: DeserializeOwned,
    {
        let url = self.request_url(endpoint, params)?;
        debug!(%endpoint, %params, "sending news api request");

        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request.send().await.map_err(Error::RequestExecution)?;

        let status = response.status();
        let raw_response = response.bytes().await.map_err(Error::Fetching)?;
        trace!(%endpoint, %status, bytes = raw_response.len(), "received news api response");

        if status != StatusCode::OK {
            let message = ErrorResponse::message_from(&raw_response).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("unknown reason")
                    .to_string()
            });
            warn!(%endpoint, %status, %message, "news api request failed");
            return Err(Error::UnexpectedStatus { status, message });
        }

        if raw_response.is_empty() {
            warn!(%endpoint, "news api response has no body");
            return Err(Error::MissingBody);
        }

        let deserializer = &mut serde_json::Deserializer::from_slice(&raw_response);
        serde_path_to_error::deserialize(deserializer)
            .map_err(|error| Error::DecodingAtPath(error.path().to_string(), error))
    }
}
