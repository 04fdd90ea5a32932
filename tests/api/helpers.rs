use std::path::PathBuf;

use landing::{
    configuration::{Settings, get_configuration},
    startup::Application,
    telemetry::{get_subscriber, init_subscriber},
};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use wiremock::MockServer;

static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_level, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub const OWNER_EMAIL: &str = "owner@example.com";
pub const SENDER_EMAIL: &str = "Newsletter <newsletter@example.com>";

pub struct TestApp {
    pub address: String,
    pub email_server: MockServer,
    pub api_client: reqwest::Client,
    pub content_root: PathBuf,
}

impl TestApp {
    pub async fn post_subscribe(&self, body: impl Into<reqwest::Body>) -> reqwest::Response {
        self.api_client
            .post(format!("{}/api/subscribe", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.api_client
            .get(format!("{}{}", &self.address, path))
            .send()
            .await
            .expect("Failed to execute request.")
    }

    pub fn fixture(&self, relative: &str) -> Vec<u8> {
        std::fs::read(self.content_root.join(relative)).expect("Failed to read fixture")
    }

    /// Bodies of every request the mocked email provider received, in order.
    pub async fn sent_emails(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

/// Start the application on a random port with the email provider pointed at
/// a fresh mock server. `customize` runs last, after the test defaults.
pub async fn spawn_app_with(customize: impl FnOnce(&mut Settings)) -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;

    let config = {
        let mut c = get_configuration().expect("Failed to read configuration");
        c.application.host = "127.0.0.1".into();
        c.application.port = 0;
        c.application.content_root = PathBuf::from("tests/fixtures/site");
        c.application.index_file = "index.html".into();
        c.email_client.base_url = email_server.uri();
        c.email_client.sender_email = SENDER_EMAIL.into();
        c.email_client.owner_email = OWNER_EMAIL.into();
        c.email_client.auth_token = Some(SecretString::from("test-api-key".to_string()));
        customize(&mut c);
        c
    };
    let content_root = config
        .application
        .content_root()
        .expect("Failed to resolve the content root");

    let application = Application::build(config)
        .await
        .expect("Failed to build application.");
    let port = application.get_port();
    let _ = tokio::spawn(application.run_until_stopped());

    TestApp {
        address: format!("http://127.0.0.1:{port}"),
        email_server,
        api_client: reqwest::Client::new(),
        content_root,
    }
}
