//! Minimal blocking HTTP server exposing the resolution engine. Card data
//! is indexed once at startup; every request reads the shared state.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::Path;

pub mod api;
pub mod routes;

use api::AppState;

/// Upper bound on an accepted request; anything larger is dropped.
const MAX_REQUEST_BYTES: usize = 1 << 20;

pub fn run_server(bind_addr: &str, data_root: &Path) -> std::io::Result<()> {
    let state = AppState::load(data_root)
        .map_err(|err| std::io::Error::new(std::io::ErrorKind::NotFound, err.to_string()))?;

    let listener = TcpListener::bind(bind_addr)?;
    println!("holotable server listening on http://{bind_addr}");

    for stream in listener.incoming() {
        match stream {
            Ok(mut stream) => {
                if let Err(err) = handle_connection(&mut stream, &state) {
                    eprintln!("request error: {err}");
                }
            }
            Err(err) => eprintln!("connection failed: {err}"),
        }
    }

    Ok(())
}

fn handle_connection(stream: &mut TcpStream, state: &AppState) -> std::io::Result<()> {
    let Some(request) = read_request(stream)? else {
        return Ok(());
    };

    let response =
        routes::route_request(&request.method, &request.path, &request.body, state)
            .to_http_string();
    stream.write_all(response.as_bytes())?;
    stream.flush()?;
    Ok(())
}

struct HttpRequest {
    method: String,
    path: String,
    body: String,
}

/// Position and length of the blank-line header terminator.
fn find_header_end(raw: &[u8]) -> Option<(usize, usize)> {
    raw.windows(4)
        .position(|window| window == b"\r\n\r\n")
        .map(|pos| (pos, 4))
        .or_else(|| {
            raw.windows(2)
                .position(|window| window == b"\n\n")
                .map(|pos| (pos, 2))
        })
}

/// Read one request: first until the header terminator, then until
/// Content-Length bytes of body have arrived. Requests may span any number
/// of reads. Returns None for an empty or oversized request.
fn read_request<R: Read>(stream: &mut R) -> std::io::Result<Option<HttpRequest>> {
    let mut raw = Vec::new();
    let mut chunk = [0_u8; 4096];

    let (header_end, separator_len) = loop {
        if let Some(found) = find_header_end(&raw) {
            break found;
        }
        if raw.len() > MAX_REQUEST_BYTES {
            return Ok(None);
        }
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            return Ok(None);
        }
        raw.extend_from_slice(&chunk[..bytes_read]);
    };

    let headers = String::from_utf8_lossy(&raw[..header_end]).into_owned();
    let mut lines = headers.lines();
    let request_line = lines.next().unwrap_or_default();
    let mut request_parts = request_line.split_whitespace();
    let method = request_parts.next().unwrap_or("GET").to_string();
    let path = request_parts.next().unwrap_or("/").to_string();

    let content_length = lines
        .filter_map(|line| line.split_once(':'))
        .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    if content_length > MAX_REQUEST_BYTES {
        return Ok(None);
    }

    let body_start = header_end + separator_len;
    while raw.len() < body_start + content_length {
        let bytes_read = stream.read(&mut chunk)?;
        if bytes_read == 0 {
            break;
        }
        raw.extend_from_slice(&chunk[..bytes_read]);
    }
    let body_end = (body_start + content_length).min(raw.len());
    let body = String::from_utf8_lossy(&raw[body_start..body_end]).into_owned();

    Ok(Some(HttpRequest { method, path, body }))
}
