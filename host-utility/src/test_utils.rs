//! Loopback stand-in for the display's HTTP server

use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread::JoinHandle;

/// Request as seen by the fake display
pub struct Captured {
    pub request_line: String,
    pub body: Vec<u8>,
}

/// Serve one request per entry of `replies`, in order, then stop
///
/// Returns the base URL (no trailing slash) and a handle yielding every
/// captured request.
pub fn serve(replies: Vec<(u16, &'static str)>) -> (String, JoinHandle<Vec<Captured>>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());

    let handle = std::thread::spawn(move || {
        let mut captured = Vec::new();
        for (status, reply) in replies {
            let (stream, _) = listener.accept().unwrap();
            let mut reader = BufReader::new(stream);

            let mut request_line = String::new();
            reader.read_line(&mut request_line).unwrap();

            let mut content_length = 0;
            loop {
                let mut line = String::new();
                reader.read_line(&mut line).unwrap();
                let line = line.trim_end();
                if line.is_empty() {
                    break;
                }
                if let Some((name, value)) = line.split_once(':') {
                    if name.eq_ignore_ascii_case("content-length") {
                        content_length = value.trim().parse().unwrap();
                    }
                }
            }

            let mut body = vec![0; content_length];
            reader.read_exact(&mut body).unwrap();

            let response = format!(
                "HTTP/1.1 {status} Whatever\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{reply}",
                reply.len()
            );
            reader.get_mut().write_all(response.as_bytes()).unwrap();

            captured.push(Captured {
                request_line: request_line.trim_end().to_string(),
                body,
            });
        }
        captured
    });

    (url, handle)
}

/// Serve a single request
pub fn serve_once(status: u16, reply: &'static str) -> (String, JoinHandle<Vec<Captured>>) {
    serve(vec![(status, reply)])
}
