//! Minimal HTTP/1.1 server standing in for the Web Store update endpoint.
//!
//! `GET /service/update2/crx?...` answers with a 302 to `/download/ext.crx`
//! (or serves the body directly), and every request target is recorded.

use std::io::{Read, Write};
use std::net::TcpListener;
use std::sync::{Arc, Mutex};
use std::thread;

pub const UPDATE_PATH: &str = "/service/update2/crx";
const DOWNLOAD_PATH: &str = "/download/ext.crx";

#[derive(Debug, Clone, Copy)]
pub struct ServerOptions {
    /// If true, the update path redirects to the download path like the real service.
    pub redirect: bool,
    /// Status line used for the body response.
    pub status: &'static str,
}

impl Default for ServerOptions {
    fn default() -> Self {
        Self {
            redirect: true,
            status: "200 OK",
        }
    }
}

pub struct CrxServer {
    /// Update endpoint URL to put in config (`http://127.0.0.1:PORT/service/update2/crx`).
    pub update_url: String,
    requests: Arc<Mutex<Vec<String>>>,
}

impl CrxServer {
    /// Request targets (path + query) seen so far, in arrival order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

pub fn start(body: Vec<u8>) -> CrxServer {
    start_with_options(body, ServerOptions::default())
}

pub fn start_with_options(body: Vec<u8>, opts: ServerOptions) -> CrxServer {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind");
    let port = listener.local_addr().unwrap().port();
    let body = Arc::new(body);
    let requests = Arc::new(Mutex::new(Vec::new()));
    let seen = Arc::clone(&requests);
    thread::spawn(move || {
        for stream in listener.incoming().flatten() {
            let body = Arc::clone(&body);
            let seen = Arc::clone(&seen);
            thread::spawn(move || handle(stream, &body, opts, &seen));
        }
    });
    CrxServer {
        update_url: format!("http://127.0.0.1:{}{}", port, UPDATE_PATH),
        requests,
    }
}

fn handle(
    mut stream: std::net::TcpStream,
    body: &[u8],
    opts: ServerOptions,
    seen: &Mutex<Vec<String>>,
) {
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
    let mut parts = request.lines().next().unwrap_or("").split_whitespace();
    let method = parts.next().unwrap_or("");
    let target = parts.next().unwrap_or("").to_string();
    seen.lock().unwrap().push(target.clone());

    if !method.eq_ignore_ascii_case("GET") {
        let _ = stream.write_all(b"HTTP/1.1 405 Method Not Allowed\r\nContent-Length: 0\r\nConnection: close\r\n\r\n");
        return;
    }
    if opts.redirect && target.starts_with(UPDATE_PATH) {
        let response = format!(
            "HTTP/1.1 302 Found\r\nLocation: {}\r\nContent-Length: 0\r\nConnection: close\r\n\r\n",
            DOWNLOAD_PATH
        );
        let _ = stream.write_all(response.as_bytes());
        return;
    }
    let response = format!(
        "HTTP/1.1 {}\r\nContent-Type: application/x-chrome-extension\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
        opts.status,
        body.len()
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.write_all(body);
}
