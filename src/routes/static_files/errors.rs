use actix_web::{
    HttpResponse, ResponseError,
    http::{StatusCode, header::ContentType},
};

use crate::routes::helpers::error_chain_fmt;

#[derive(thiserror::Error)]
pub enum StaticFileError {
    #[error("The decoded request path is not valid UTF-8.")]
    BadRequest,
    #[error("The request path resolves outside of the content root.")]
    Forbidden,
    #[error("There is no regular file at the requested path.")]
    NotFound,
    #[error(transparent)]
    UnexpectedError(#[from] anyhow::Error),
}

impl std::fmt::Debug for StaticFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for StaticFileError {
    fn status_code(&self) -> StatusCode {
        match self {
            StaticFileError::BadRequest => StatusCode::BAD_REQUEST,
            StaticFileError::Forbidden => StatusCode::FORBIDDEN,
            StaticFileError::NotFound => StatusCode::NOT_FOUND,
            StaticFileError::UnexpectedError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let body = match self {
            StaticFileError::BadRequest => "Bad request",
            StaticFileError::Forbidden => "Forbidden",
            StaticFileError::NotFound => "Not found",
            StaticFileError::UnexpectedError(_) => "Internal server error",
        };
        HttpResponse::build(self.status_code())
            .content_type(ContentType::plaintext())
            .body(body)
    }
}
