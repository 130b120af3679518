mod flutterwave;
mod pesapal;

pub use self::flutterwave::{FlutterwaveCardGateway, FlutterwaveMomoGateway};
pub use self::pesapal::PesapalGateway;

use anyhow::{Context, Result};
use std::time::Duration;

/// All provider calls share one client with a hard request timeout, so a
/// hung provider surfaces as a provider error instead of a stuck request.
pub fn build_http_client(timeout_secs: u64) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .context("Failed to build payment gateway HTTP client")
}
