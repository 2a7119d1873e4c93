use reqwest::{Client, StatusCode, Url};
use tracing::debug;

use crate::config::Config;
use crate::error::{DeliveryError, SimulatorError};
use crate::event::DetectionEvent;

/// POSTs detection events to the live-data endpoint.
#[derive(Debug, Clone)]
pub struct Publisher {
    client: Client,
    endpoint: Url,
}

impl Publisher {
    pub fn new(config: &Config) -> Result<Self, SimulatorError> {
        let endpoint = config.endpoint().map_err(SimulatorError::from)?;
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(SimulatorError::Client)?;
        Ok(Self { client, endpoint })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Only status 200 counts as delivered; every other status is a rejection.
    pub async fn publish(&self, event: &DetectionEvent) -> Result<(), DeliveryError> {
        debug!(event_id = %event.id, endpoint = %self.endpoint, "posting detection");

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(event)
            .send()
            .await?;

        match response.status() {
            StatusCode::OK => Ok(()),
            status => Err(DeliveryError::Rejected(status)),
        }
    }
}
