//! Configuration model loaded from external sources.

use serde::Deserialize;

fn default_estimate_prefix() -> String {
    "EST".to_string()
}

fn default_job_prefix() -> String {
    "JOB".to_string()
}

fn default_invoice_prefix() -> String {
    "INV".to_string()
}

#[derive(Clone, Debug, Deserialize)]
/// Settings shared across handlers.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    /// HS256 secret shared with the auth service; also keys the cookies.
    pub secret: String,
    pub auth_service_url: String,
    #[serde(default = "default_estimate_prefix")]
    pub estimate_prefix: String,
    #[serde(default = "default_job_prefix")]
    pub job_prefix: String,
    #[serde(default = "default_invoice_prefix")]
    pub invoice_prefix: String,
}

impl ServerConfig {
    /// Location of the external sign-in page.
    pub fn signin_url(&self) -> String {
        format!("{}/auth/signin", self.auth_service_url.trim_end_matches('/'))
    }
}
