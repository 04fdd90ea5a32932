use std::{
    pin::Pin,
    task::{Context, Poll},
};

use actix_web::{
    HttpResponse, ResponseError,
    body::{BodySize, MessageBody},
    http::{StatusCode, header},
    web::Bytes,
};

use crate::routes::helpers::error_chain_fmt;

/// The `Display` text of each variant is the message handed back to the
/// caller; causes are only logged.
#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("Method not allowed")]
    MethodNotAllowed,
    #[error("Missing RESEND_API_KEY")]
    MissingCredential,
    #[error("Payload too large")]
    PayloadTooLarge,
    #[error("Invalid JSON")]
    InvalidJson(#[source] anyhow::Error),
    #[error("Invalid email")]
    InvalidEmail(#[source] anyhow::Error),
    #[error("Failed to send email")]
    SendFailed(#[source] anyhow::Error),
}

impl std::fmt::Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            SubscribeError::PayloadTooLarge => StatusCode::PAYLOAD_TOO_LARGE,
            SubscribeError::InvalidJson(_) | SubscribeError::InvalidEmail(_) => {
                StatusCode::BAD_REQUEST
            }
            SubscribeError::MissingCredential | SubscribeError::SendFailed(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut response = HttpResponse::build(self.status_code());
        match self {
            // No response reaches the client: the connection is dropped.
            SubscribeError::PayloadTooLarge => response.body(AbortedBody),
            SubscribeError::MethodNotAllowed => response
                .insert_header((header::ALLOW, "POST"))
                .json(serde_json::json!({ "error": self.to_string() })),
            _ => response.json(serde_json::json!({ "error": self.to_string() })),
        }
    }
}

/// A body that fails on its first poll. actix-http tears the connection down
/// when a response body errors, before the response head is flushed.
struct AbortedBody;

impl MessageBody for AbortedBody {
    type Error = std::io::Error;

    fn size(&self) -> BodySize {
        BodySize::Stream
    }

    fn poll_next(
        self: Pin<&mut Self>,
        _cx: &mut Context<'_>,
    ) -> Poll<Option<Result<Bytes, Self::Error>>> {
        Poll::Ready(Some(Err(std::io::Error::new(
            std::io::ErrorKind::ConnectionAborted,
            "request body exceeded the size limit",
        ))))
    }
}
