use std::io::ErrorKind;

use actix_web::{HttpRequest, HttpResponse, body::SizedStream, web};
use tokio::fs;
use tokio_util::io::ReaderStream;

use super::{ContentRoot, StaticFileError, mime};

#[tracing::instrument(
    name = "Serving a static file",
    skip(request, content_root),
    fields(request_path = %request.uri().path())
)]
pub async fn serve_static(
    request: HttpRequest,
    content_root: web::Data<ContentRoot>,
) -> Result<HttpResponse, StaticFileError> {
    let file_path = content_root.resolve(request.uri().path())?;

    let metadata = match fs::metadata(&file_path).await {
        Ok(metadata) if metadata.is_file() => metadata,
        _ => return Err(StaticFileError::NotFound),
    };

    let file = match fs::File::open(&file_path).await {
        Ok(file) => file,
        Err(e) if e.kind() == ErrorKind::NotFound => return Err(StaticFileError::NotFound),
        Err(e) => {
            let e = anyhow::Error::new(e).context(format!("Failed to open {}", file_path.display()));
            return Err(StaticFileError::UnexpectedError(e));
        }
    };

    let content_type = mime::content_type(file_path.extension());
    let body = SizedStream::new(metadata.len(), ReaderStream::new(file));

    Ok(HttpResponse::Ok().content_type(content_type).body(body))
}
