use std::net::Ipv6Addr;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::error::Result;

/// Everything needed to post a license to the director API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseRequest {
    pub virtual_ip: String,
    pub key: String,
    pub username: String,
    pub password: String,
}

/// Posts license keys to the fabric director.
pub trait LicenseClient {
    /// `Ok(true)` when the director accepted the key. Connection failures and
    /// rejections are `Ok(false)`; the director may simply not be up yet.
    fn post_license(&self, request: &LicenseRequest) -> Result<bool>;
}

#[derive(Debug, Serialize)]
struct LicenseBody<'a> {
    user_name: &'a str,
    password: &'a str,
    license: &'a str,
}

/// HTTPS client for the director's tenant manager.
pub struct DirectorApi {
    client: reqwest::blocking::Client,
}

impl DirectorApi {
    pub fn new() -> Result<Self> {
        // The director serves a self-signed certificate.
        let client = reqwest::blocking::Client::builder()
            .danger_accept_invalid_certs(true)
            .timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { client })
    }

    pub fn license_url(virtual_ip: &str) -> Result<Url> {
        let host = if virtual_ip.parse::<Ipv6Addr>().is_ok() {
            format!("[{virtual_ip}]")
        } else {
            virtual_ip.to_string()
        };
        Ok(Url::parse(&format!(
            "https://{host}/0/tenant_manager/license_key"
        ))?)
    }

    fn post_to(&self, url: &Url, request: &LicenseRequest) -> bool {
        let body = LicenseBody {
            user_name: &request.username,
            password: &request.password,
            license: &request.key,
        };
        let response = self
            .client
            .post(url.clone())
            .basic_auth(&request.username, Some(&request.password))
            .json(&body)
            .send()
            .map(|resp| resp.status());
        license_accepted(url, response)
    }
}

/// Any 2xx accepts the key; everything else, including no response at all,
/// is worth another try later.
fn license_accepted(url: &Url, response: reqwest::Result<StatusCode>) -> bool {
    match response {
        Ok(status) if status.is_success() => {
            info!(%url, "license accepted");
            true
        }
        Ok(status) => {
            warn!(%url, %status, "license rejected");
            false
        }
        Err(e) => {
            warn!(%url, error = %e, "no response from director virtual ip");
            false
        }
    }
}

impl LicenseClient for DirectorApi {
    fn post_license(&self, request: &LicenseRequest) -> Result<bool> {
        let url = Self::license_url(&request.virtual_ip)?;
        Ok(self.post_to(&url, request))
    }
}
