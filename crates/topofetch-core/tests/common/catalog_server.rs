//! Minimal HTTP/1.1 server for integration tests: a paginated products
//! catalog under `/products` and static file bodies under `/files/<path>`.
//!
//! Pages are computed from the served file list, so the JSON the crawler sees
//! always matches what the file endpoints serve. Options inject the failure
//! shapes the pipeline has to tolerate (500 pages, 404 files, linkless items).

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;

#[derive(Debug, Clone, Default)]
pub struct CatalogServerOptions {
    /// Offset at which the catalog returns HTTP 500 instead of a page.
    pub fail_at_offset: Option<u64>,
    /// File paths (as passed in `files`) whose GET returns 404.
    pub missing: Vec<String>,
    /// File paths whose GET advertises the full Content-Length but closes the
    /// connection after the given byte count, mid-body.
    pub truncate: Vec<(String, usize)>,
    /// Items without a `downloadURL` field, placed at the front of the list.
    pub linkless_items: usize,
}

struct State {
    base: String,
    /// Path under `/files/` and the body served there. Duplicate paths are
    /// allowed and yield duplicate catalog links.
    files: Vec<(String, Vec<u8>)>,
    page_size: usize,
    opts: CatalogServerOptions,
}

impl State {
    /// Catalog entries in order: linkless placeholders, then one link per file.
    fn entries(&self) -> Vec<Option<String>> {
        let mut entries: Vec<Option<String>> = vec![None; self.opts.linkless_items];
        for (path, _) in &self.files {
            entries.push(Some(format!("{}files/{}", self.base, path)));
        }
        entries
    }
}

/// Starts a server in a background thread. Returns the base URL (for the
/// catalog endpoint, append `products`). Runs until the process exits.
pub fn start(files: Vec<(String, Vec<u8>)>, page_size: usize) -> String {
    start_with_options(files, page_size, CatalogServerOptions::default())
}

pub fn start_with_options(
    files: Vec<(String, Vec<u8>)>,
    page_size: usize,
    opts: CatalogServerOptions,
) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let base = format!("http://127.0.0.1:{}/", port);
    let state = Arc::new(State {
        base: base.clone(),
        files,
        page_size,
        opts,
    });
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let state = Arc::clone(&state);
            thread::spawn(move || handle(stream, &state));
        }
    });
    base
}

fn handle(mut stream: TcpStream, state: &State) {
    let _ = stream.set_read_timeout(Some(std::time::Duration::from_secs(2)));
    let _ = stream.set_write_timeout(Some(std::time::Duration::from_secs(2)));
    let mut buf = [0u8; 8192];
    let n = match stream.read(&mut buf) {
        Ok(0) | Err(_) => return,
        Ok(n) => n,
    };
    let request = match std::str::from_utf8(&buf[..n]) {
        Ok(s) => s,
        Err(_) => return,
    };
    let mut first_line = request.lines().next().unwrap_or("").split_whitespace();
    let method = first_line.next().unwrap_or("");
    let target = first_line.next().unwrap_or("");
    if !method.eq_ignore_ascii_case("GET") {
        respond(&mut stream, "405 Method Not Allowed", "text/plain", b"");
        return;
    }

    let (path, query) = target.split_once('?').unwrap_or((target, ""));
    if path == "/products" {
        serve_page(&mut stream, state, query);
    } else if let Some(name) = path.strip_prefix("/files/") {
        serve_file(&mut stream, state, name);
    } else {
        respond(&mut stream, "404 Not Found", "text/plain", b"no such path");
    }
}

fn serve_page(stream: &mut TcpStream, state: &State, query: &str) {
    let offset: u64 = query
        .split('&')
        .find_map(|pair| pair.strip_prefix("offset="))
        .and_then(|v| v.parse().ok())
        .unwrap_or(0);

    if state.opts.fail_at_offset == Some(offset) {
        respond(
            stream,
            "500 Internal Server Error",
            "text/plain",
            b"catalog exploded",
        );
        return;
    }

    let entries = state.entries();
    let items: Vec<serde_json::Value> = entries
        .iter()
        .skip(offset as usize)
        .take(state.page_size)
        .map(|entry| match entry {
            Some(url) => serde_json::json!({ "downloadURL": url, "title": "quad" }),
            None => serde_json::json!({ "title": "no link" }),
        })
        .collect();
    let body = serde_json::json!({ "total": entries.len(), "items": items }).to_string();
    respond(stream, "200 OK", "application/json", body.as_bytes());
}

fn serve_file(stream: &mut TcpStream, state: &State, name: &str) {
    if state.opts.missing.iter().any(|m| m == name) {
        respond(stream, "404 Not Found", "text/plain", b"gone");
        return;
    }
    let Some((_, body)) = state.files.iter().find(|(path, _)| path == name) else {
        respond(stream, "404 Not Found", "text/plain", b"unknown file");
        return;
    };
    if let Some((_, keep)) = state.opts.truncate.iter().find(|(path, _)| path == name) {
        // Full length in the header, partial body, then close: the client
        // sees a premature end of transfer.
        let header = format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/octet-stream\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            body.len()
        );
        let _ = stream.write_all(header.as_bytes());
        let _ = stream.write_all(&body[..(*keep).min(body.len())]);
        let _ = stream.shutdown(std::net::Shutdown::Both);
        return;
    }
    respond(stream, "200 OK", "application/octet-stream", body);
}

fn respond(stream: &mut TcpStream, status: &str, content_type: &str, body: &[u8]) {
    let header = format!(
        "HTTP/1.1 {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        status,
        content_type,
        body.len()
    );
    let _ = stream.write_all(header.as_bytes());
    let _ = stream.write_all(body);
}
