use std::net::TcpListener;

use actix_web::dev::Server;
use actix_web::{App, HttpServer, web};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use crate::configuration::Settings;
use crate::domain::SubscriberEmail;
use crate::email_client::EmailClient;
use crate::routes::{ContentRoot, serve_static, subscribe, subscribe_method_not_allowed};

pub struct Application {
    port: u16,
    server: Server,
}

/// Address notified about every successful signup.
pub struct OwnerEmail(pub SubscriberEmail);

impl Application {
    pub async fn build(config: Settings) -> Result<Self, anyhow::Error> {
        let email_client = config.email_client.client()?;
        if email_client.is_none() {
            tracing::warn!("No email provider credential configured, subscriptions will fail.");
        }
        let owner = config.email_client.owner()?;
        let content_root = ContentRoot::new(
            config.application.content_root()?,
            config.application.index_file,
        );

        let address = format!("{}:{}", config.application.host, config.application.port);
        let listener =
            TcpListener::bind(&address).with_context(|| format!("Failed to bind {address}"))?;
        let port = listener.local_addr()?.port();
        tracing::info!(
            content_root = %content_root.path().display(),
            "Server running on http://localhost:{port}"
        );
        let server = run(listener, content_root, email_client, owner)?;

        Ok(Self { port, server })
    }

    pub fn get_port(&self) -> u16 {
        self.port
    }

    pub async fn run_until_stopped(self) -> Result<(), std::io::Error> {
        self.server.await
    }
}

pub fn run(
    listener: TcpListener,
    content_root: ContentRoot,
    email_client: Option<EmailClient>,
    owner: SubscriberEmail,
) -> Result<Server, anyhow::Error> {
    let content_root = web::Data::new(content_root);
    let email_client = web::Data::new(email_client);
    let owner = web::Data::new(OwnerEmail(owner));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .service(
                web::resource("/api/subscribe")
                    .route(web::post().to(subscribe))
                    .default_service(web::to(subscribe_method_not_allowed)),
            )
            .default_service(web::to(serve_static))
            .app_data(content_root.clone())
            .app_data(email_client.clone())
            .app_data(owner.clone())
    })
    .listen(listener)?
    .run();

    Ok(server)
}
