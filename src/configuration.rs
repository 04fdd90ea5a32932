use std::path::PathBuf;

use anyhow::Context;
use secrecy::{ExposeSecret, SecretString};
use serde_aux::field_attributes::deserialize_number_from_string;

use crate::domain::SubscriberEmail;
use crate::email_client::EmailClient;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct Settings {
    pub application: ApplicationSettings,
    pub email_client: EmailClientSettings,
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct EmailClientSettings {
    pub base_url: String,
    pub sender_email: String,
    pub owner_email: String,
    pub auth_token: Option<SecretString>,
}

impl EmailClientSettings {
    /// `None` when no provider credential is configured; the subscribe
    /// endpoint reports the missing credential instead of sending.
    pub fn client(&self) -> Result<Option<EmailClient>, anyhow::Error> {
        let Some(auth_token) = self
            .auth_token
            .as_ref()
            .filter(|token| !token.expose_secret().is_empty())
        else {
            return Ok(None);
        };
        let client = EmailClient::new(
            &self.base_url,
            self.sender_email.clone(),
            auth_token.clone(),
        )?;
        Ok(Some(client))
    }

    pub fn owner(&self) -> Result<SubscriberEmail, anyhow::Error> {
        SubscriberEmail::parse(self.owner_email.clone())
            .map_err(anyhow::Error::msg)
            .context("Invalid owner email address.")
    }
}

#[derive(serde::Deserialize, Debug, Clone)]
pub struct ApplicationSettings {
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
    pub host: String,
    pub content_root: PathBuf,
    pub index_file: String,
}

impl ApplicationSettings {
    /// Absolute, canonical form of `content_root`, resolved against the
    /// process working directory.
    pub fn content_root(&self) -> Result<PathBuf, anyhow::Error> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        cwd.join(&self.content_root)
            .canonicalize()
            .with_context(|| {
                format!(
                    "Content root {} is not accessible",
                    self.content_root.display()
                )
            })
    }
}

pub enum Environment {
    Local,
    Production,
}

impl Environment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Environment::Local => "local",
            Environment::Production => "production",
        }
    }
}

impl TryFrom<String> for Environment {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "local" => Ok(Environment::Local),
            "production" => Ok(Environment::Production),
            other => Err(format!(
                "{other} is not supported environment. Try to use `local` or `production`",
            )),
        }
    }
}

fn plain_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|value| !value.is_empty())
}

pub fn get_configuration() -> Result<Settings, anyhow::Error> {
    let base_path = std::env::current_dir().context("Failed to determine current directory")?;
    let conf_dir = base_path.join("configuration");
    let env: Environment = std::env::var("APP_ENVIRONMENT")
        .unwrap_or_else(|_| "local".into())
        .try_into()
        .map_err(anyhow::Error::msg)
        .context("Failed to parse APP_ENVIRONMENT")?;

    let settings = config::Config::builder()
        .set_default("application.port", 3000)?
        .set_default("application.host", "127.0.0.1")?
        .set_default("application.content_root", ".")?
        .set_default("application.index_file", "index.html")?
        .set_default("email_client.base_url", "https://api.resend.com")?
        .set_default("email_client.sender_email", "Julian from a68 <julian@a68.io>")?
        .set_default("email_client.owner_email", "julian@a68.io")?
        .add_source(config::File::from(conf_dir.join("base")).required(false))
        .add_source(config::File::from(conf_dir.join(env.as_str())).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .separator("__")
                .prefix_separator("_"),
        )
        .set_override_option("application.port", plain_var("PORT"))?
        .set_override_option("email_client.auth_token", plain_var("RESEND_API_KEY"))?
        .set_override_option("email_client.sender_email", plain_var("FROM_EMAIL"))?
        .set_override_option("email_client.owner_email", plain_var("OWNER_EMAIL"))?
        .build()?;

    settings
        .try_deserialize::<Settings>()
        .context("Failed to deserialize settings")
}
