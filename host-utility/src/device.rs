// HTTP client for the display's web server
//
// The device answers `GET /` with a status text and accepts a raw frame as the
// body of `POST /display`.

use anyhow::{Context, Result};

use crate::constants::DISPLAY_PATH;
use crate::utils::create_http_agent;

/// Text reply from the display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceReply {
    pub status: u16,
    pub body: String,
}

impl DeviceReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub struct DeviceClient {
    agent: ureq::Agent,
    base_url: String,
}

impl DeviceClient {
    pub fn new(base_url: &str, timeout_secs: u64) -> Self {
        let mut base_url = base_url.trim().to_string();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            agent: create_http_agent(timeout_secs),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn display_url(&self) -> String {
        format!("{}{DISPLAY_PATH}", self.base_url)
    }

    /// `GET /`
    pub fn status(&self) -> Result<DeviceReply> {
        log::debug!("GET {}", self.base_url);
        let mut response = self
            .agent
            .get(self.base_url.as_str())
            .call()
            .with_context(|| format!("HTTP request failed: {}", self.base_url))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response from {}", self.base_url))?;

        Ok(Self::reply(&self.base_url, status, body))
    }

    /// `POST /display` with `frame` as the raw body
    pub fn display(&self, frame: &[u8]) -> Result<DeviceReply> {
        let url = self.display_url();
        log::debug!("POST {url} ({} bytes)", frame.len());
        let mut response = self
            .agent
            .post(url.as_str())
            .send(frame)
            .with_context(|| format!("Failed to upload frame to {url}"))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .with_context(|| format!("Failed to read response from {url}"))?;

        Ok(Self::reply(&url, status, body))
    }

    fn reply(url: &str, status: u16, body: String) -> DeviceReply {
        let reply = DeviceReply { status, body };
        if reply.is_success() {
            log::debug!("HTTP {status} from {url}");
        } else {
            log::warn!("HTTP {status} from {url}");
        }
        reply
    }
}
