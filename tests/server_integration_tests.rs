//! Integration tests for `serve`, driving the binary over a real socket.

mod common;

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use common::{GOOD_APP, TestFixture};

struct ServerProcess {
    child: Child,
    addr: String,
}

impl ServerProcess {
    fn start(fixture: &TestFixture) -> Self {
        let port = TcpListener::bind("127.0.0.1:0")
            .and_then(|listener| listener.local_addr())
            .expect("free port")
            .port();
        let addr = format!("127.0.0.1:{port}");
        let child = Command::new(assert_cmd::cargo::cargo_bin!("svg-pwa-validator"))
            .current_dir(fixture.path())
            .args(["serve", "--no-config", "--bind", &addr])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .expect("spawn server");

        let deadline = Instant::now() + Duration::from_secs(10);
        while TcpStream::connect(&addr).is_err() {
            assert!(Instant::now() < deadline, "server did not start on {addr}");
            thread::sleep(Duration::from_millis(50));
        }
        Self { child, addr }
    }

    fn request(&self, raw: &str) -> (u16, serde_json::Value) {
        let mut stream = TcpStream::connect(&self.addr).expect("connect");
        stream.write_all(raw.as_bytes()).expect("write request");
        let mut response = String::new();
        stream.read_to_string(&mut response).expect("read response");

        let status = response
            .split_whitespace()
            .nth(1)
            .and_then(|code| code.parse().ok())
            .expect("status code");
        let body = response.split_once("\r\n\r\n").map_or("", |(_, b)| b);
        (status, serde_json::from_str(body).expect("json body"))
    }
}

impl Drop for ServerProcess {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[test]
fn get_without_file_returns_descriptor() {
    let fixture = TestFixture::new();
    let server = ServerProcess::start(&fixture);

    let (status, body) = server.request("GET / HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(status, 200);
    assert_eq!(body["name"], "SVG PWA Validator API");
    assert!(body["endpoints"].as_array().is_some_and(|e| !e.is_empty()));
}

#[test]
fn get_with_file_validates_it() {
    let fixture = TestFixture::new();
    fixture.create_file("clock.svg", GOOD_APP);
    let server = ServerProcess::start(&fixture);

    let (status, body) = server.request("GET /?file=clock.svg HTTP/1.1\r\nHost: localhost\r\n\r\n");
    assert_eq!(status, 200);
    assert_eq!(body["summary"]["status"], "PASSED");
}

#[test]
fn post_without_file_is_rejected() {
    let fixture = TestFixture::new();
    let server = ServerProcess::start(&fixture);

    let payload = r#"{"path": "clock.svg"}"#;
    let raw = format!(
        "POST / HTTP/1.1\r\nHost: localhost\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{payload}",
        payload.len()
    );
    let (status, body) = server.request(&raw);
    assert_eq!(status, 400);
    assert_eq!(body["error"], "File path is required");
}

#[test]
fn post_missing_file_reports_abort() {
    let fixture = TestFixture::new();
    let server = ServerProcess::start(&fixture);

    let payload = r#"{"file": "ghost.svg"}"#;
    let raw = format!(
        "POST / HTTP/1.1\r\nHost: localhost\r\nContent-Length: {}\r\n\r\n{payload}",
        payload.len()
    );
    let (status, body) = server.request(&raw);
    assert_eq!(status, 200);
    assert_eq!(body["summary"]["status"], "FAILED");
    assert_eq!(body["tests"][0]["name"], "file_exists");
    assert!(body["errors"][0].as_str().is_some_and(|e| e.contains("ghost.svg")));
}
