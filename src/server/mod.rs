//! HTTP surface: `POST /chat` and `GET /audio/{filename}`.

use crate::chat::orchestrator::AUDIO_ROUTE;
use crate::chat::{ChatOrchestrator, ChatRequest, ChatResponse};
use crate::error::RelayError;
use std::convert::Infallible;
use std::future::Future;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use warp::http::StatusCode;
use warp::{Filter, Rejection, Reply};

#[cfg(test)]
mod tests;

/// Maximum `/chat` body size: 64 KB
pub(crate) const MAX_BODY_SIZE: u64 = 64 * 1024;

/// All routes, with CORS and JSON error bodies for rejections.
pub fn routes(
    orchestrator: Arc<ChatOrchestrator>,
) -> impl Filter<Extract = (impl Reply,), Error = Infallible> + Clone {
    let audio_dir = orchestrator.audio_dir().to_path_buf();

    let chat_route = warp::path("chat")
        .and(warp::path::end())
        .and(warp::post())
        .and(warp::body::content_length_limit(MAX_BODY_SIZE))
        .and(warp::body::json::<ChatRequest>())
        .and(warp::any().map(move || orchestrator.clone()))
        .and_then(handle_chat);

    let audio_route = warp::path(AUDIO_ROUTE)
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::any().map(move || audio_dir.clone()))
        .and_then(serve_audio);

    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST"])
        .allow_headers(vec!["content-type"]);

    // Error bodies are recovered inside the CORS wrapper so browsers can read them.
    // The outer recover only sees CORS rejections.
    chat_route
        .or(audio_route)
        .recover(handle_rejection)
        .with(cors)
        .with(warp::trace::request())
        .recover(handle_rejection)
}

/// Bind the server. The returned future runs until `shutdown` resolves.
pub fn bind(
    orchestrator: Arc<ChatOrchestrator>,
    addr: SocketAddr,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>), RelayError> {
    warp::serve(routes(orchestrator))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .map_err(|e| RelayError::Config(format!("Failed to bind {}: {}", addr, e)))
}

async fn handle_chat(
    req: ChatRequest,
    orchestrator: Arc<ChatOrchestrator>,
) -> Result<impl Reply, Rejection> {
    let response = orchestrator.handle(&req).await;
    Ok(warp::reply::json(&response))
}

/// Serve a file from the audio directory with path traversal protection.
async fn serve_audio(filename: String, dir: PathBuf) -> Result<impl Reply, Rejection> {
    // Only plain file names like song.mp3
    if filename.is_empty()
        || filename.starts_with('.')
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
        || filename.contains('%')
    {
        return Err(warp::reject::not_found());
    }

    let path = dir.join(&filename);
    if !path.starts_with(&dir) {
        return Err(warp::reject::not_found());
    }

    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|_| warp::reject::not_found())?;

    let mime = match path.extension().and_then(|e| e.to_str()) {
        Some("mp3") => "audio/mpeg",
        Some("wav") => "audio/wav",
        Some("ogg") => "audio/ogg",
        _ => "application/octet-stream",
    };

    Ok(warp::reply::with_header(
        warp::reply::with_header(bytes, "Content-Type", mime),
        "Cache-Control",
        "no-store",
    ))
}

async fn handle_rejection(err: Rejection) -> Result<impl Reply, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not found".to_string())
    } else if let Some(e) = err.find::<warp::filters::body::BodyDeserializeError>() {
        (StatusCode::BAD_REQUEST, format!("Invalid request body: {}", e))
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large".to_string())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_string())
    } else if err.find::<warp::reject::UnsupportedMediaType>().is_some() {
        (
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            "Unsupported media type".to_string(),
        )
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method not allowed".to_string())
    } else if let Some(e) = err.find::<warp::filters::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, e.to_string())
    } else {
        tracing::error!("[Server] Unhandled rejection: {:?}", err);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_string(),
        )
    };

    Ok(warp::reply::with_status(
        warp::reply::json(&ChatResponse::error(message)),
        status,
    ))
}
