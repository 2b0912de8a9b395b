//! Front-end routing: serve the page on GET, forward POST to the summarizer.

use lambda_http::http::{header, Method, StatusCode};
use lambda_http::{Body, Response};
use tracing::{error, info, warn};

use crate::http::{error_response, response};
use crate::invoke::SummarizerInvoker;

/// The summarizer page, inlined at compile time.
pub const INDEX_HTML: &str = include_str!("index.html");

/// Route a gateway request.
pub async fn route<I>(method: &Method, body: &[u8], invoker: &I) -> Response<Body>
where
    I: SummarizerInvoker + ?Sized,
{
    match *method {
        Method::GET => response(200, "text/html; charset=utf-8", INDEX_HTML),
        Method::POST => forward(body, invoker).await,
        _ => {
            warn!("Rejected {} request", method);
            let mut rejected = error_response(405, "Method not allowed");
            rejected
                .headers_mut()
                .insert(header::ALLOW, header::HeaderValue::from_static("GET, POST"));
            rejected
        }
    }
}

async fn forward<I>(body: &[u8], invoker: &I) -> Response<Body>
where
    I: SummarizerInvoker + ?Sized,
{
    if body.iter().all(u8::is_ascii_whitespace) {
        return error_response(400, "Missing request body");
    }

    // The Lambda API only accepts JSON payloads.
    if serde_json::from_slice::<serde_json::Value>(body).is_err() {
        return error_response(400, "Invalid request body");
    }

    info!("Forwarding summarize request ({} bytes)", body.len());

    match invoker.invoke(body.to_vec()).await {
        Ok(envelope) => match StatusCode::from_u16(envelope.status_code) {
            Ok(status) => response(status.as_u16(), "application/json", envelope.body),
            Err(_) => {
                error!("Summarizer returned invalid status {}", envelope.status_code);
                error_response(502, "Summarizer unavailable")
            }
        },
        Err(e) => {
            error!("Summarizer invocation failed: {}", e);
            error_response(502, "Summarizer unavailable")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_posts_youtube_url() {
        assert!(INDEX_HTML.contains("id=\"summarizer-form\""));
        assert!(INDEX_HTML.contains("youtube_url"));
        assert!(INDEX_HTML.contains("escapeHtml"));
    }
}
