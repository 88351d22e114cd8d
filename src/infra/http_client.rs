use crate::app::ports::PageFetcher;
use crate::config::ScraperConfig;
use crate::error::{FetchFailure, Result};
use metrics::counter;
use reqwest::blocking::Client;
use std::thread;
use std::time::Duration;
use tracing::{error, info, instrument, warn};

/// Blocking `reqwest` fetcher with a fixed number of attempts per URL.
pub struct ReqwestFetcher {
    client: Client,
    max_retries: u32,
    retry_delay: Duration,
}

impl ReqwestFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout())
            .build()?;
        Ok(Self {
            client,
            max_retries: config.max_retries.max(1),
            retry_delay: config.retry_delay(),
        })
    }

    fn attempt(&self, url: &str) -> std::result::Result<String, reqwest::Error> {
        let resp = self.client.get(url).send()?.error_for_status()?;
        resp.text()
    }
}

impl PageFetcher for ReqwestFetcher {
    #[instrument(skip(self))]
    fn fetch(&self, url: &str) -> std::result::Result<String, FetchFailure> {
        let mut last_error = String::new();

        for attempt in 1..=self.max_retries {
            info!("Fetching: {}", url);
            counter!("hoa_fetch_attempts_total").increment(1);

            match self.attempt(url) {
                Ok(body) => return Ok(body),
                Err(e) => {
                    warn!("Attempt {} failed for {}: {}", attempt, url, e);
                    last_error = e.to_string();
                    if attempt < self.max_retries {
                        thread::sleep(self.retry_delay);
                    }
                }
            }
        }

        error!(
            "Failed to fetch {} after {} attempts",
            url, self.max_retries
        );
        counter!("hoa_fetch_failures_total").increment(1);
        Err(FetchFailure {
            url: url.to_string(),
            attempts: self.max_retries,
            last_error,
        })
    }
}
