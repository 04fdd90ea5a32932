use actix_web::{HttpResponse, web};
use anyhow::Context;
use serde_json::Value;

use crate::{
    domain::{NewSubscriber, SubscriberEmail},
    email_client::EmailClient,
    startup::OwnerEmail,
};

use super::{
    errors::SubscribeError,
    helpers::{owner_notice_email, welcome_email},
};

pub const MAX_BODY_BYTES: usize = 1_000_000;

#[tracing::instrument(
    name = "Adding a new subscriber",
    skip(payload, email_client, owner),
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    payload: web::Payload,
    email_client: web::Data<Option<EmailClient>>,
    owner: web::Data<OwnerEmail>,
) -> Result<HttpResponse, SubscribeError> {
    let email_client = email_client
        .get_ref()
        .as_ref()
        .ok_or(SubscribeError::MissingCredential)?;

    let body = read_body(payload).await?;
    let payload = parse_payload(&body)?;

    let new_subscriber = NewSubscriber::try_from(&payload)
        .map_err(|e| SubscribeError::InvalidEmail(anyhow::anyhow!(e)))?;
    tracing::Span::current().record(
        "subscriber_email",
        tracing::field::display(&new_subscriber.email),
    );

    // The owner is only notified once the welcome email has gone out.
    send_welcome_email(email_client, &new_subscriber)
        .await
        .context("Failed to send the welcome email.")
        .map_err(SubscribeError::SendFailed)?;
    notify_owner(email_client, &owner.0, &new_subscriber)
        .await
        .context("Failed to notify the owner about a new signup.")
        .map_err(SubscribeError::SendFailed)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({ "ok": true })))
}

pub async fn subscribe_method_not_allowed() -> Result<HttpResponse, SubscribeError> {
    Err(SubscribeError::MethodNotAllowed)
}

#[tracing::instrument(name = "Reading the subscription request body", skip_all)]
async fn read_body(payload: web::Payload) -> Result<web::Bytes, SubscribeError> {
    match payload.to_bytes_limited(MAX_BODY_BYTES).await {
        Ok(Ok(body)) => Ok(body),
        Ok(Err(e)) => Err(SubscribeError::InvalidJson(anyhow::anyhow!(
            "Failed to read the request body: {e}"
        ))),
        Err(_) => Err(SubscribeError::PayloadTooLarge),
    }
}

/// An empty body stands for `{}`.
fn parse_payload(body: &[u8]) -> Result<Value, SubscribeError> {
    if body.is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body)
        .context("The request body is not valid JSON.")
        .map_err(SubscribeError::InvalidJson)
}

#[tracing::instrument(name = "Sending a welcome email to the new subscriber", skip_all)]
async fn send_welcome_email(
    email_client: &EmailClient,
    new_subscriber: &NewSubscriber,
) -> Result<(), anyhow::Error> {
    let content = welcome_email().context("Failed to render the welcome email.")?;
    email_client
        .send_email(
            &new_subscriber.email,
            content.subject,
            &content.html,
            &content.text,
        )
        .await?;
    Ok(())
}

#[tracing::instrument(name = "Notifying the owner about a new signup", skip_all)]
async fn notify_owner(
    email_client: &EmailClient,
    owner: &SubscriberEmail,
    new_subscriber: &NewSubscriber,
) -> Result<(), anyhow::Error> {
    let content = owner_notice_email(&new_subscriber.email)
        .context("Failed to render the owner notice.")?;
    email_client
        .send_email(owner, content.subject, &content.html, &content.text)
        .await?;
    Ok(())
}
