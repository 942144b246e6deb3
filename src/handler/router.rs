//! Request dispatch module
//!
//! Entry point for HTTP request processing: method validation, body size
//! bounds, route lookup, and access logging.

use crate::config::AppState;
use crate::handler::home;
use crate::http;
use crate::logger::{self, AccessLogEntry};
use crate::routing::RouteTarget;
use crate::view::ViewModel;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Method, Request, Response, Version};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Handle one HTTP request.
///
/// Generic over the body type: no route consumes a request body, and tests
/// dispatch with an empty one.
pub fn handle_request<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    let started = Instant::now();
    let method = req.method();
    let path = req.uri().path();
    let is_head = *method == Method::HEAD;

    let response = if let Some(resp) = check_http_method(method, state.config.http.enable_cors) {
        resp
    } else if let Some(resp) = check_body_size(req, state.config.http.max_body_size) {
        resp
    } else {
        logger::log_headers_count(req.headers().len(), state.config.logging.show_headers);
        route_request(path, is_head, state)
    };

    finish(req, peer_addr, state, response, started)
}

/// Check HTTP method and return appropriate response for non-GET/HEAD methods
fn check_http_method(method: &Method, enable_cors: bool) -> Option<Response<Full<Bytes>>> {
    match method {
        &Method::GET | &Method::HEAD => None,
        &Method::OPTIONS => Some(http::build_options_response(enable_cors)),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method}"));
            Some(http::build_405_response())
        }
    }
}

/// Validate Content-Length header and return 413 if exceeded.
///
/// No route reads a body, but the server still refuses to take oversized
/// ones off the wire.
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_error(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            Err(_) => {
                logger::log_warning(&format!(
                    "Invalid Content-Length value: '{size_str}', skipping size check"
                ));
                None
            }
            _ => None,
        },
    )
}

/// Route request based on path
fn route_request(path: &str, is_head: bool, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    match state.router.lookup(path) {
        Some(RouteTarget::Home) => serve_home(is_head, state),
        Some(RouteTarget::Liveness | RouteTarget::Readiness) => http::build_health_response("ok"),
        None => http::build_404_response(),
    }
}

/// Serve the home page: run the page handler, render the view it names
fn serve_home(is_head: bool, state: &Arc<AppState>) -> Response<Full<Bytes>> {
    let mut model = ViewModel::new();
    let view = home::home(&mut model);

    match state.renderer.render(view, &model) {
        Ok(html) => http::build_html_response(html, is_head),
        Err(err) => {
            logger::log_error(&format!("Rendering view '{view}' failed: {err}"));
            http::build_500_response()
        }
    }
}

/// Stamp the Server header and emit the access log entry
fn finish<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    state: &Arc<AppState>,
    mut response: Response<Full<Bytes>>,
    started: Instant,
) -> Response<Full<Bytes>> {
    if let Ok(value) = hyper::header::HeaderValue::from_str(&state.config.http.server_name) {
        response.headers_mut().insert(hyper::header::SERVER, value);
    }

    let access_log = state
        .cached_access_log
        .load(std::sync::atomic::Ordering::Relaxed);
    if access_log {
        let entry = build_access_entry(req, peer_addr, &response, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    response
}

fn build_access_entry<B>(
    req: &Request<B>,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    started: Instant,
) -> AccessLogEntry {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.ip().to_string(),
        req.method().to_string(),
        req.uri().path().to_string(),
    );
    entry.query = req.uri().query().map(ToString::to_string);
    entry.http_version = version_str(req.version()).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);
    entry.referer = header("referer");
    entry.user_agent = header("user-agent");
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    entry
}

fn version_str(version: Version) -> &'static str {
    if version == Version::HTTP_10 {
        "1.0"
    } else if version == Version::HTTP_2 {
        "2"
    } else {
        "1.1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::routing::Router;
    use crate::view::{RenderError, Templates, ViewRenderer};

    struct FailingRenderer;

    impl ViewRenderer for FailingRenderer {
        fn render(&self, view: &str, _model: &ViewModel) -> Result<String, RenderError> {
            Err(RenderError::UnknownView(view.to_string()))
        }
    }

    fn test_state(renderer: Box<dyn ViewRenderer>) -> Arc<AppState> {
        let config = Config::load_from("nonexistent-config").unwrap();
        let router = Router::from_config(&config.routes);
        Arc::new(AppState::new(config, router, renderer))
    }

    fn default_state() -> Arc<AppState> {
        test_state(Box::new(Templates::new().unwrap()))
    }

    fn peer() -> SocketAddr {
        "127.0.0.1:40000".parse().unwrap()
    }

    fn request(method: Method, path: &str) -> Request<()> {
        Request::builder().method(method).uri(path).body(()).unwrap()
    }

    #[test]
    fn test_get_root_renders_home_page() {
        let response = handle_request(&request(Method::GET, "/"), peer(), &default_state());

        assert_eq!(response.status(), 200);
        assert_eq!(
            response.headers().get("Content-Type").unwrap(),
            "text/html; charset=utf-8"
        );
        // Body carries the rendered model values
        let length: usize = response
            .headers()
            .get("Content-Length")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(length > 0);
    }

    #[test]
    fn test_head_root_has_headers_only() {
        let response = handle_request(&request(Method::HEAD, "/"), peer(), &default_state());

        assert_eq!(response.status(), 200);
        // Content-Length still reflects the GET body size
        let length: usize = response
            .headers()
            .get("Content-Length")
            .unwrap()
            .to_str()
            .unwrap()
            .parse()
            .unwrap();
        assert!(length > 0);
    }

    #[test]
    fn test_unknown_path_is_404() {
        let response = handle_request(&request(Method::GET, "/nope"), peer(), &default_state());
        assert_eq!(response.status(), 404);
    }

    #[test]
    fn test_post_is_405() {
        let response = handle_request(&request(Method::POST, "/"), peer(), &default_state());

        assert_eq!(response.status(), 405);
        assert_eq!(
            response.headers().get("Allow").unwrap(),
            "GET, HEAD, OPTIONS"
        );
    }

    #[test]
    fn test_options_is_204() {
        let response = handle_request(&request(Method::OPTIONS, "/"), peer(), &default_state());
        assert_eq!(response.status(), 204);
    }

    #[test]
    fn test_health_probes() {
        let state = default_state();
        let live = handle_request(&request(Method::GET, "/healthz"), peer(), &state);
        let ready = handle_request(&request(Method::GET, "/readyz"), peer(), &state);

        assert_eq!(live.status(), 200);
        assert_eq!(ready.status(), 200);
    }

    #[test]
    fn test_oversized_content_length_is_413() {
        let state = default_state();
        let req = Request::builder()
            .method(Method::GET)
            .uri("/")
            .header("content-length", "999999999")
            .body(())
            .unwrap();

        let response = handle_request(&req, peer(), &state);
        assert_eq!(response.status(), 413);
    }

    #[test]
    fn test_render_failure_is_500() {
        let state = test_state(Box::new(FailingRenderer));
        let response = handle_request(&request(Method::GET, "/"), peer(), &state);

        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_server_header_stamped() {
        let response = handle_request(&request(Method::GET, "/"), peer(), &default_state());
        assert_eq!(response.headers().get("Server").unwrap(), "Homepage/0.1");
    }
}
