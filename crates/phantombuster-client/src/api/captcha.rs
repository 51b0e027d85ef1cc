//! Captcha API.

use crate::client::PhantombusterClient;
use crate::error::Result;
use crate::types::{CaptchaRequest, CaptchaSolution};

/// Captcha API client.
pub struct CaptchaApi {
    client: PhantombusterClient,
}

impl CaptchaApi {
    pub(crate) fn new(client: PhantombusterClient) -> Self {
        Self { client }
    }

    /// Solve an hCaptcha challenge.
    pub async fn solve_hcaptcha(&self, sitekey: &str, pageurl: &str) -> Result<CaptchaSolution> {
        self.client
            .post("/hcaptcha", &CaptchaRequest { sitekey, pageurl })
            .await
    }

    /// Solve a reCAPTCHA challenge.
    pub async fn solve_recaptcha(&self, sitekey: &str, pageurl: &str) -> Result<CaptchaSolution> {
        self.client
            .post("/recaptcha", &CaptchaRequest { sitekey, pageurl })
            .await
    }
}
