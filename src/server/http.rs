//! Minimal HTTP/1.1 wire handling: one request per connection, JSON out.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{SocketAddr, TcpListener, TcpStream};
use std::time::Duration;

use crate::error::{Result, ValidatorError};

use super::ApiResponse;

const IO_TIMEOUT: Duration = Duration::from_secs(10);
/// Budget for the request line and headers together.
const MAX_HEADER_BYTES: usize = 16 * 1024;
/// Longest request-line excerpt echoed back in errors.
const ECHO_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Other(String),
}

impl Method {
    fn parse(token: &str) -> Self {
        match token {
            "GET" => Self::Get,
            "POST" => Self::Post,
            other => Self::Other(other.to_string()),
        }
    }
}

/// A parsed request. Only what the API surface needs is kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpRequest {
    /// Build a request from a method and a raw target such as `/?file=a.svg`.
    #[must_use]
    pub fn new(method: Method, target: &str, body: Vec<u8>) -> Self {
        let (path, query) = match target.split_once('?') {
            Some((path, query)) => (path, parse_query(query)),
            None => (target, Vec::new()),
        };
        Self {
            method,
            path: percent_decode(path, false),
            query,
            body,
        }
    }

    /// First value of the named query parameter.
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug)]
pub enum RequestError {
    Malformed(String),
    BodyTooLarge { limit: usize },
    Io(io::Error),
}

impl From<io::Error> for RequestError {
    fn from(err: io::Error) -> Self {
        Self::Io(err)
    }
}

fn parse_query(query: &str) -> Vec<(String, String)> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (percent_decode(key, true), percent_decode(value, true))
        })
        .collect()
}

fn hex_value(byte: u8) -> Option<u8> {
    match byte {
        b'0'..=b'9' => Some(byte - b'0'),
        b'a'..=b'f' => Some(byte - b'a' + 10),
        b'A'..=b'F' => Some(byte - b'A' + 10),
        _ => None,
    }
}

/// Decode `%XX` escapes; with `plus_as_space`, `+` becomes a space as in
/// form-encoded query strings. Malformed escapes are kept literally.
#[must_use]
pub fn percent_decode(input: &str, plus_as_space: bool) -> String {
    let bytes = input.as_bytes();
    let mut decoded = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => match (
                bytes.get(i + 1).copied().and_then(hex_value),
                bytes.get(i + 2).copied().and_then(hex_value),
            ) {
                (Some(hi), Some(lo)) => {
                    decoded.push((hi << 4) | lo);
                    i += 3;
                    continue;
                }
                _ => decoded.push(b'%'),
            },
            b'+' if plus_as_space => decoded.push(b' '),
            byte => decoded.push(byte),
        }
        i += 1;
    }
    String::from_utf8_lossy(&decoded).into_owned()
}

/// Read one line, consuming at most `budget + 1` bytes, and charge it to `budget`.
fn read_limited_line<R: BufRead>(
    reader: &mut R,
    budget: &mut usize,
) -> std::result::Result<String, RequestError> {
    let mut line = String::new();
    let limit = u64::try_from(*budget).unwrap_or(u64::MAX).saturating_add(1);
    let read = reader.by_ref().take(limit).read_line(&mut line)?;
    if read > *budget {
        return Err(RequestError::Malformed("request head too large".to_string()));
    }
    *budget -= read;
    Ok(line)
}

/// Read one request from `reader`, rejecting bodies above `max_body` bytes.
///
/// # Errors
/// Returns [`RequestError`] for malformed framing, oversized bodies or I/O
/// failures.
pub fn read_request<R: BufRead>(
    reader: &mut R,
    max_body: usize,
) -> std::result::Result<HttpRequest, RequestError> {
    let mut budget = MAX_HEADER_BYTES;
    let request_line = read_limited_line(reader, &mut budget)?;
    if request_line.is_empty() {
        return Err(RequestError::Malformed("empty request".to_string()));
    }
    let mut parts = request_line.split_whitespace();
    let (Some(method), Some(target), Some(version)) = (parts.next(), parts.next(), parts.next())
    else {
        let excerpt: String = request_line.trim_end().chars().take(ECHO_CHARS).collect();
        return Err(RequestError::Malformed(format!("bad request line: {excerpt}")));
    };
    if !version.starts_with("HTTP/1.") {
        return Err(RequestError::Malformed(format!("unsupported version: {version}")));
    }

    let mut content_length = 0usize;
    loop {
        let line = read_limited_line(reader, &mut budget)?;
        let eof = line.is_empty();
        let line = line.trim_end();
        if eof || line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':')
            && name.trim().eq_ignore_ascii_case("content-length")
        {
            content_length = value.trim().parse().map_err(|_| {
                RequestError::Malformed(format!("bad Content-Length: {}", value.trim()))
            })?;
        }
    }

    if content_length > max_body {
        return Err(RequestError::BodyTooLarge { limit: max_body });
    }
    let mut body = vec![0; content_length];
    reader.read_exact(&mut body)?;

    Ok(HttpRequest::new(Method::parse(method), target, body))
}

const fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    }
}

/// Write `response` as a complete HTTP/1.1 message and close semantics.
///
/// # Errors
/// Returns an error if writing to the stream fails.
pub fn write_response<W: Write>(writer: &mut W, response: &ApiResponse) -> io::Result<()> {
    write!(
        writer,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json; charset=UTF-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        response.status,
        reason_phrase(response.status),
        response.body.len()
    )?;
    writer.write_all(response.body.as_bytes())?;
    writer.flush()
}

/// Single-threaded listener that answers one connection at a time.
pub struct Server {
    listener: TcpListener,
    max_body: usize,
}

impl Server {
    /// Bind to `addr`.
    ///
    /// # Errors
    /// Returns [`ValidatorError::Server`] if the address cannot be bound.
    pub fn bind(addr: &str, max_body: usize) -> Result<Self> {
        let listener = TcpListener::bind(addr)
            .map_err(|err| ValidatorError::Server(format!("failed to bind {addr}: {err}")))?;
        Ok(Self { listener, max_body })
    }

    /// Address actually bound, useful with port 0.
    ///
    /// # Errors
    /// Returns an error if the socket address cannot be read.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serve connections until `limit` have been handled, or forever when
    /// `limit` is `None`. Per-connection failures are logged and skipped.
    pub fn serve<H>(&self, handler: H, limit: Option<usize>)
    where
        H: Fn(&HttpRequest) -> ApiResponse,
    {
        let mut handled = 0usize;
        for stream in self.listener.incoming() {
            match stream {
                Ok(stream) => {
                    if let Err(err) = self.handle_connection(stream, &handler) {
                        tracing::warn!(error = %err, "connection failed");
                    }
                }
                Err(err) => tracing::warn!(error = %err, "accept failed"),
            }
            handled += 1;
            if limit.is_some_and(|limit| handled >= limit) {
                break;
            }
        }
    }

    fn handle_connection<H>(&self, stream: TcpStream, handler: &H) -> io::Result<()>
    where
        H: Fn(&HttpRequest) -> ApiResponse,
    {
        stream.set_read_timeout(Some(IO_TIMEOUT))?;
        stream.set_write_timeout(Some(IO_TIMEOUT))?;
        let peer = stream.peer_addr().ok();
        let mut writer = stream.try_clone()?;
        let mut reader = BufReader::new(stream);

        let response = match read_request(&mut reader, self.max_body) {
            Ok(request) => {
                let response = handler(&request);
                tracing::info!(
                    peer = ?peer,
                    method = ?request.method,
                    path = %request.path,
                    status = response.status,
                    "handled request"
                );
                response
            }
            Err(RequestError::Io(err)) => return Err(err),
            Err(RequestError::BodyTooLarge { limit }) => ApiResponse::error(
                413,
                &format!("Request body exceeds {limit} bytes"),
            ),
            Err(RequestError::Malformed(reason)) => {
                tracing::debug!(peer = ?peer, %reason, "malformed request");
                ApiResponse::error(400, "Malformed request")
            }
        };
        write_response(&mut writer, &response)
    }
}

#[cfg(test)]
#[path = "http_tests.rs"]
mod tests;
