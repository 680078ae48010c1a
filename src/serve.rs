//! Local preview server for the generated site.
//!
//! Single-threaded, no caching; enough to eyeball the output of
//! `build-config` + `build-site` before pushing. Binds all interfaces so the
//! preview works from containers and LAN devices.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tiny_http::{Header, Response, Server};

pub const DEFAULT_PORT: u16 = 8033;

#[derive(Error, Debug)]
pub enum ServeError {
    #[error("could not bind port {port}: {reason}")]
    Bind { port: u16, reason: String },
}

/// Serve `site_dir` on `0.0.0.0:<port>` until the process is interrupted.
pub fn serve(site_dir: &Path, port: u16) -> Result<(), ServeError> {
    let server = Server::http(("0.0.0.0", port)).map_err(|err| ServeError::Bind {
        port,
        reason: err.to_string(),
    })?;
    println!("Serving {} at http://localhost:{port}", site_dir.display());

    for request in server.incoming_requests() {
        let (status, body, content_type) = load_response(site_dir, request.url());
        let mut response = Response::from_data(body).with_status_code(status);
        if let Some(header) = content_type_header(content_type) {
            response = response.with_header(header);
        }
        // A client hanging up mid-response is its problem, not ours.
        let _ = request.respond(response);
    }
    Ok(())
}

fn load_response(site_dir: &Path, url: &str) -> (u16, Vec<u8>, &'static str) {
    match resolve_path(site_dir, url) {
        Some(path) => match fs::read(&path) {
            Ok(body) => (200, body, content_type_for(&path)),
            Err(_) => (500, b"internal error".to_vec(), "text/plain"),
        },
        None => (404, b"not found".to_vec(), "text/plain"),
    }
}

/// Map a request URL onto a file under the site root. Query strings and
/// fragments are ignored, directories fall back to their `index.html`, and
/// traversal outside the root is rejected.
fn resolve_path(site_dir: &Path, url: &str) -> Option<PathBuf> {
    let path = url.split(['?', '#']).next().unwrap_or(url);
    let mut resolved = site_dir.to_path_buf();
    for part in path.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return None;
        }
        resolved.push(part);
    }
    if resolved.is_dir() {
        resolved.push("index.html");
    }
    resolved.is_file().then_some(resolved)
}

fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("html") => "text/html; charset=utf-8",
        Some("css") => "text/css",
        Some("js") => "application/javascript",
        Some("json") => "application/json",
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("ico") => "image/x-icon",
        Some("pdf") => "application/pdf",
        Some("woff2") => "font/woff2",
        _ => "application/octet-stream",
    }
}

fn content_type_header(value: &str) -> Option<Header> {
    Header::from_bytes(&b"Content-Type"[..], value.as_bytes()).ok()
}
