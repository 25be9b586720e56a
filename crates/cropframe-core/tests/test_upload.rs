mod common;

use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::thread::JoinHandle;
use std::time::Instant;

use cropframe_core::error::CropError;
use cropframe_core::upload::{HttpUploader, Uploader};
use cropframe_core::widget::{Completion, WidgetState};

use common::{loaded_widget, post_config};

/// A raw HTTP request as seen by the server.
struct CapturedRequest {
    request_line: String,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
}

impl CapturedRequest {
    fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

fn read_request(stream: &mut TcpStream) -> CapturedRequest {
    let mut reader = BufReader::new(stream);
    let mut request_line = String::new();
    reader.read_line(&mut request_line).unwrap();

    let mut headers = Vec::new();
    loop {
        let mut line = String::new();
        reader.read_line(&mut line).unwrap();
        let line = line.trim_end();
        if line.is_empty() {
            break;
        }
        let (name, value) = line.split_once(':').unwrap();
        headers.push((name.trim().to_string(), value.trim().to_string()));
    }

    let find = |name: &str| {
        headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    };

    let mut body = Vec::new();
    if let Some(length) = find("content-length") {
        body.resize(length.parse::<usize>().unwrap(), 0);
        reader.read_exact(&mut body).unwrap();
    } else if find("transfer-encoding").is_some_and(|v| v.contains("chunked")) {
        loop {
            let mut size_line = String::new();
            reader.read_line(&mut size_line).unwrap();
            let size = usize::from_str_radix(size_line.trim(), 16).unwrap();
            let mut chunk = vec![0u8; size + 2];
            reader.read_exact(&mut chunk).unwrap();
            if size == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..size]);
        }
    }

    CapturedRequest {
        request_line: request_line.trim_end().to_string(),
        headers,
        body,
    }
}

/// Accept exactly one connection, answer with `status`, hand back what was sent.
fn one_shot_server(status: &'static str) -> (String, JoinHandle<(CapturedRequest, TcpListener)>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let captured = read_request(&mut stream);
        let response =
            format!("HTTP/1.1 {status}\r\nContent-Length: 2\r\nConnection: close\r\n\r\nok");
        stream.write_all(response.as_bytes()).unwrap();
        stream.flush().unwrap();
        (captured, listener)
    });
    (format!("http://{addr}/upload"), handle)
}

#[test]
fn test_submit_posts_single_multipart_jpeg() {
    let (url, server) = one_shot_server("200 OK");
    let t0 = Instant::now();
    let mut widget = loaded_widget(post_config(&url), 640, 640, t0);

    let request = widget.submit().unwrap().unwrap();
    let uploader = HttpUploader::new().unwrap();
    let result = uploader.upload(&request);
    assert_eq!(result.as_ref().unwrap().status, 200);
    assert_eq!(widget.complete_submit(request.ticket, result), Completion::Applied);
    assert_eq!(widget.state(), WidgetState::Submitted);

    let (captured, listener) = server.join().unwrap();
    assert_eq!(captured.request_line, "POST /upload HTTP/1.1");
    let content_type = captured.header("content-type").unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="), "got: {content_type}");

    let text = captured.body_text();
    assert_eq!(text.matches("Content-Disposition").count(), 1, "got: {text}");
    assert!(text.contains("name=\"image\""), "got: {text}");
    assert!(text.contains("filename=\"image.jpg\""), "got: {text}");
    assert!(text.contains("Content-Type: image/jpeg"), "got: {text}");
    assert!(captured
        .body
        .windows(request.bytes.len())
        .any(|w| w == request.bytes.as_slice()));

    listener.set_nonblocking(true).unwrap();
    assert!(listener.accept().is_err(), "a second request was sent");
}

#[test]
fn test_custom_field_name_names_the_part() {
    let (url, server) = one_shot_server("201 Created");
    let t0 = Instant::now();
    let mut config = post_config(&url);
    config.name = "avatar".into();
    let mut widget = loaded_widget(config, 64, 64, t0);

    let request = widget.submit().unwrap().unwrap();
    let receipt = HttpUploader::new().unwrap().upload(&request).unwrap();
    assert_eq!(receipt.status, 201);

    let (captured, _) = server.join().unwrap();
    let text = captured.body_text();
    assert!(text.contains("name=\"avatar\""), "got: {text}");
    assert!(text.contains("filename=\"avatar.jpg\""), "got: {text}");
}

#[test]
fn test_server_error_is_rejection() {
    let (url, server) = one_shot_server("500 Internal Server Error");
    let t0 = Instant::now();
    let mut widget = loaded_widget(post_config(&url), 32, 32, t0);

    let request = widget.submit().unwrap().unwrap();
    let result = HttpUploader::new().unwrap().upload(&request);
    assert!(matches!(result, Err(CropError::UploadRejected { status: 500 })));

    widget.complete_submit(request.ticket, result);
    assert_eq!(widget.state(), WidgetState::Loaded);
    assert!(widget.fault().is_some());
    server.join().unwrap();
}

#[test]
fn test_unreachable_server_is_http_error() {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let t0 = Instant::now();
    let mut widget = loaded_widget(post_config(&format!("http://{addr}/upload")), 32, 32, t0);
    let request = widget.submit().unwrap().unwrap();
    let result = HttpUploader::new().unwrap().upload(&request);
    assert!(matches!(result, Err(CropError::Http(_))));
}
