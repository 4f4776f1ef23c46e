//! Shared helpers: an isolated `hardgates` invocation and a canned HTTP
//! service running on a background thread.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use assert_cmd::Command;
use tempfile::TempDir;

/// A `hardgates` command that ignores the caller's environment and config.
#[allow(deprecated)]
pub fn hardgates(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("hardgates").unwrap();
    cmd.env("HARDGATES_CONFIG", config_path(home))
        .env("NO_COLOR", "1")
        .env_remove("HARDGATES_API_URL")
        .env_remove("HARDGATES_GITHUB_TOKEN")
        .env_remove("RUST_LOG");
    cmd
}

pub fn config_path(home: &TempDir) -> PathBuf {
    home.path().join("config.toml")
}

/// Config that polls without waiting, so runs finish in milliseconds.
pub fn write_fast_polling(home: &TempDir) {
    std::fs::write(
        config_path(home),
        "[polling]\ninitial_delay_secs = 0\ninterval_secs = 0\n",
    )
    .unwrap();
}

/// An address nothing is listening on.
pub fn closed_url() -> String {
    let port = {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };
    format!("http://127.0.0.1:{port}")
}

pub struct CannedService {
    pub url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CannedService {
    /// Answer one connection per response, in order.
    pub fn start(responses: Vec<(u16, String)>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(Vec::new()));

        let recorded = requests.clone();
        std::thread::spawn(move || {
            for (status, body) in responses {
                let Ok((mut stream, _)) = listener.accept() else {
                    return;
                };
                let request_line = read_request(&mut stream);
                recorded.lock().unwrap().push(request_line);
                let response = format!(
                    "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                    reason(status),
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self { url, requests }
    }

    pub fn request_lines(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

fn read_request(stream: &mut std::net::TcpStream) -> String {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 4096];
    let header_end = loop {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break buf.len();
        }
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos + 4;
        }
    };

    let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
    let content_length = head
        .lines()
        .filter_map(|l| l.split_once(':'))
        .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
        .and_then(|(_, value)| value.trim().parse::<usize>().ok())
        .unwrap_or(0);
    while buf.len() < header_end + content_length {
        let n = stream.read(&mut chunk).unwrap_or(0);
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }

    head.lines().next().unwrap_or_default().to_string()
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        503 => "Service Unavailable",
        _ => "Unknown",
    }
}
