//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: validates the path against the
//! route table, reads the form body for saves, and hands the extracted title
//! to the wiki handlers.

use crate::config::AppState;
use crate::http::{self, FormError};
use crate::logger::{self, AccessLogEntry};
use crate::routing::{self, Operation, RouteMatch};
use crate::wiki::WikiHandlers;
use http_body_util::{BodyExt, Full, Limited};
use hyper::body::{Body, Bytes};
use hyper::header::{CONTENT_LENGTH, CONTENT_TYPE, USER_AGENT};
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer_addr: SocketAddr,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let started = Instant::now();
    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.http_version = format_version(req.version());
    entry.user_agent = req
        .headers()
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);

    let response = route_request(req, &state.wiki, state.config.http.max_body_size).await;
    let response = http::with_server_header(response, &state.config.http.server_name);

    if state.config.logging.access_log {
        entry.status = response.status().as_u16();
        entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
            .unwrap_or(usize::MAX);
        entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

/// Validate the request path and dispatch to the matching handler.
///
/// Paths outside the route table get a bare 404 and no handler runs.
pub async fn route_request<B, H>(
    req: Request<B>,
    handlers: &H,
    max_body_size: u64,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
    H: WikiHandlers,
{
    let Some(route) = routing::match_route(req.method(), req.uri().path(), routing::WIKI_ROUTES)
    else {
        logger::log_debug(&format!("No route for {} {}", req.method(), req.uri().path()));
        return http::build_404_response();
    };

    let is_head = req.method() == Method::HEAD;
    let body = if route.operation == Operation::Save {
        match read_page_text(req, max_body_size).await {
            Ok(body) => body,
            Err(resp) => return resp,
        }
    } else {
        Vec::new()
    };

    dispatch(handlers, route, body, is_head).await
}

/// Invoke the handler selected by the route
pub async fn dispatch<H: WikiHandlers>(
    handlers: &H,
    route: RouteMatch,
    body: Vec<u8>,
    is_head: bool,
) -> Response<Full<Bytes>> {
    match route.operation {
        Operation::View => handlers.view(route.title, is_head).await,
        Operation::Edit => handlers.edit(route.title, is_head).await,
        Operation::Save => handlers.save(route.title, body).await,
    }
}

/// Read the `body` field of a save form.
///
/// A form without the field saves an empty page; a body that is not a form
/// is refused with 415 and a malformed multipart body with 400.
async fn read_page_text<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<Vec<u8>, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    let content_type = req
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(ToString::to_string);
    let form = read_form_body(req, max_body_size).await?;

    match http::form_field(content_type.as_deref(), form, http::BODY_FIELD).await {
        Ok(value) => Ok(value.unwrap_or_default()),
        Err(e @ FormError::UnsupportedContentType(_)) => {
            logger::log_warning(&format!("Rejected save: {e}"));
            Err(http::build_415_response())
        }
        Err(e @ FormError::Multipart(_)) => {
            logger::log_warning(&format!("Rejected save: {e}"));
            Err(http::build_400_response(e.to_string()))
        }
    }
}

/// Collect the request body, refusing anything over `max_body_size`
async fn read_form_body<B>(
    req: Request<B>,
    max_body_size: u64,
) -> Result<Bytes, Response<Full<Bytes>>>
where
    B: Body<Data = Bytes>,
    B::Error: std::error::Error + Send + Sync + 'static,
{
    if let Some(size) = declared_length(&req) {
        if size > max_body_size {
            logger::log_warning(&format!(
                "Request body too large: {size} bytes (max: {max_body_size})"
            ));
            return Err(http::build_413_response());
        }
    }

    let limit = usize::try_from(max_body_size).unwrap_or(usize::MAX);
    match Limited::new(req.into_body(), limit).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) => {
            logger::log_warning(&format!("Rejected request body: {e}"));
            Err(http::build_413_response())
        }
    }
}

/// Parsed `Content-Length`, ignoring malformed values
fn declared_length<B>(req: &Request<B>) -> Option<u64> {
    req.headers()
        .get(CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

fn format_version(version: hyper::Version) -> String {
    let text = format!("{version:?}");
    text.strip_prefix("HTTP/").unwrap_or(&text).to_string()
}
