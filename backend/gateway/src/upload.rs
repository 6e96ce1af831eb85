//! Upload-echo handler: persist an inbound voice message and send the same
//! bytes straight back as a download.

use axum::{
    extract::{Multipart, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use bytes::Bytes;
use tracing::{error, info};

use crate::server::AppState;

/// Echoed content type. The client records webm/opus; content is not
/// inspected, so this is asserted rather than detected.
const ECHO_CONTENT_TYPE: &str = "audio/webm";

/// POST /api/send_message — accept one uploaded audio file, persist it under
/// a generated name, and echo the identical bytes back as an attachment.
pub async fn send_message(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Response, StatusCode> {
    let content = read_file_field(&mut multipart).await?;

    let artifact = match state.store.store(&content).await {
        Ok(artifact) => artifact,
        Err(e) => {
            error!(error = %e, "Failed to store uploaded audio");
            return Err(StatusCode::INTERNAL_SERVER_ERROR);
        }
    };

    info!(filename = %artifact.filename, size_bytes = content.len(), "Echoing stored upload");

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, ECHO_CONTENT_TYPE.parse().unwrap());
    headers.insert(
        header::CONTENT_DISPOSITION,
        format!("attachment; filename={}", artifact.filename)
            .parse()
            .unwrap(),
    );
    headers.insert(
        header::CONTENT_LENGTH,
        content.len().to_string().parse().unwrap(),
    );

    Ok((StatusCode::OK, headers, content).into_response())
}

/// Pull the `file` part out of the multipart body, fully buffered.
///
/// Parts under other names are skipped. A body with no `file` part, or one
/// that fails to parse, is a client error.
async fn read_file_field(multipart: &mut Multipart) -> Result<Bytes, StatusCode> {
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(StatusCode::BAD_REQUEST),
            Err(e) => {
                error!(error = %e, "Malformed multipart body");
                return Err(StatusCode::BAD_REQUEST);
            }
        };

        if field.name() != Some("file") {
            continue;
        }

        return field.bytes().await.map_err(|e| {
            error!(error = %e, "Failed to read uploaded file");
            StatusCode::BAD_REQUEST
        });
    }
}
