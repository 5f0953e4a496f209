//! Per-request access logging.

use chrono::Local;
use hyper::{Method, Uri};

/// Format one access log line: local timestamp, method, path, query.
pub fn request_line(method: &Method, uri: &Uri) -> String {
    let now = Local::now().format("%Y-%m-%d %H:%M:%S");
    match uri.query() {
        Some(query) => format!("[{now}] {method} {}?{query}", uri.path()),
        None => format!("[{now}] {method} {}", uri.path()),
    }
}

/// Log a request to stdout.
pub fn log_request(method: &Method, uri: &Uri) {
    println!("{}", request_line(method, uri));
}
