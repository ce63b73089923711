// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::config::ClientConfig;
use crate::error::ClientError;
use crewdash::{OptimizerService, RosterFetch, ServiceError};
use crewdash_domain::{DisruptionResult, DisruptionTarget, Roster, SystemStats};
use reqwest::{Client, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

/// `OptimizerService` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpOptimizerClient {
    http: Client,
    base_url: Url,
}

impl HttpOptimizerClient {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the TLS backend cannot be initialised.
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let http: Client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self {
            http,
            base_url: config.base_url().clone(),
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url: Url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, ServiceError> {
        let response: Response = request.send().await.map_err(|e| convert(&e))?;
        debug!(url = %response.url(), status = %response.status(), "Optimizer responded");
        Ok(response)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ServiceError> {
    let response: Response = response.error_for_status().map_err(|e| convert(&e))?;
    response.json::<T>().await.map_err(|e| convert(&e))
}

fn convert(err: &reqwest::Error) -> ServiceError {
    if err.is_timeout() {
        ServiceError::Timeout
    } else if err.is_decode() {
        ServiceError::Decode(err.to_string())
    } else if let Some(status) = err.status() {
        ServiceError::Status {
            status: status.as_u16(),
        }
    } else {
        ServiceError::Transport(err.to_string())
    }
}

impl OptimizerService for HttpOptimizerClient {
    async fn fetch_roster(&self) -> Result<RosterFetch, ServiceError> {
        let url: Url = self.endpoint(&["api", "roster"]);
        let response: Response = self.send(self.http.get(url)).await?;

        if !response.status().is_success() {
            return Ok(RosterFetch::Unavailable {
                status: response.status().as_u16(),
            });
        }
        decode::<Roster>(response).await.map(RosterFetch::Available)
    }

    async fn fetch_stats(&self) -> Result<SystemStats, ServiceError> {
        let url: Url = self.endpoint(&["api", "stats"]);
        let response: Response = self.send(self.http.get(url)).await?;
        decode(response).await
    }

    async fn generate_roster(&self) -> Result<(), ServiceError> {
        let url: Url = self.endpoint(&["api", "generate-roster"]);
        let response: Response = self.send(self.http.post(url)).await?;
        response.error_for_status().map_err(|e| convert(&e))?;
        Ok(())
    }

    async fn submit_disruption(
        &self,
        target: &DisruptionTarget,
    ) -> Result<DisruptionResult, ServiceError> {
        let url: Url = self.endpoint(&["api", "disrupt", &target.crew_id, &target.flight_id]);
        let response: Response = self.send(self.http.post(url)).await?;
        decode(response).await
    }
}
