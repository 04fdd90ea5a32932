use anyhow::Context;
use reqwest::{Client, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;

use crate::domain::SubscriberEmail;

#[derive(Clone)]
pub struct EmailClient {
    http_client: Client,
    endpoint: Url,
    sender: String,
    auth_token: SecretString,
}

#[derive(Serialize)]
struct SendEmailRequest<'a> {
    from: &'a str,
    to: Vec<&'a str>,
    subject: &'a str,
    text: &'a str,
    html: &'a str,
}

#[derive(thiserror::Error, Debug)]
pub enum SendEmailError {
    #[error("Failed to reach the email provider.")]
    Transport(#[from] reqwest::Error),
    #[error("The email provider answered {status}: {detail}")]
    Rejected {
        status: reqwest::StatusCode,
        detail: String,
    },
}

impl EmailClient {
    /// `sender` is used verbatim as the `from` field, so it may carry a display
    /// name (`Name <address>`).
    pub fn new(
        base_url: &str,
        sender: String,
        auth_token: SecretString,
    ) -> Result<Self, anyhow::Error> {
        let http_client = Client::builder()
            .build()
            .context("Failed to build the email HTTP client.")?;
        let endpoint = Url::parse(base_url)
            .and_then(|url| url.join("emails"))
            .with_context(|| format!("Failed parsing base email api url {base_url}."))?;
        Ok(Self {
            http_client,
            endpoint,
            sender,
            auth_token,
        })
    }

    #[tracing::instrument(name = "Sending an email", skip(self, html_content, text_content))]
    pub async fn send_email(
        &self,
        recipient: &SubscriberEmail,
        subject: &str,
        html_content: &str,
        text_content: &str,
    ) -> Result<(), SendEmailError> {
        let body = SendEmailRequest {
            from: &self.sender,
            to: vec![recipient.as_ref()],
            subject,
            text: text_content,
            html: html_content,
        };

        let response = self
            .http_client
            .post(self.endpoint.clone())
            .bearer_auth(self.auth_token.expose_secret())
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            let detail = if detail.trim().is_empty() {
                "Email provider error".to_string()
            } else {
                detail
            };
            return Err(SendEmailError::Rejected { status, detail });
        }

        Ok(())
    }
}
