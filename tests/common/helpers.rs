#![allow(dead_code)]

use axum::body::Body;
use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Router;
use futures::StreamExt;
use precache::config::TextEncoding;
use precache::report::{Level, Reporter};
use std::collections::HashMap;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Creates a temporary file with the given content
pub fn create_temp_file(dir: &Path, filename: &str, content: &[u8]) -> PathBuf {
    let file_path = dir.join(filename);
    fs::write(&file_path, content).expect("Failed to write temporary file");
    file_path
}

/// Creates test file content of specified size
pub fn create_test_content(size: usize) -> Vec<u8> {
    (0..size).map(|i| (i % 256) as u8).collect()
}

/// Asserts that a file exists and holds exactly `expected`
pub fn assert_file_content(path: &Path, expected: &[u8]) {
    let content = fs::read(path).unwrap_or_else(|e| panic!("Cannot read {:?}: {}", path, e));
    assert_eq!(content, expected, "File content mismatch at path: {:?}", path);
}

// === Configuration Helpers ===

/// Encode `text` the way a file in `encoding` would hold it, BOM included.
pub fn encode_config(text: &str, encoding: TextEncoding) -> Vec<u8> {
    let mut bytes = encoding
        .signature()
        .map(<[u8]>::to_vec)
        .unwrap_or_default();
    match encoding {
        TextEncoding::Utf8 | TextEncoding::Utf8Bom => bytes.extend_from_slice(text.as_bytes()),
        TextEncoding::Utf16 | TextEncoding::Utf16Le => {
            bytes.extend(text.encode_utf16().flat_map(u16::to_le_bytes))
        }
        TextEncoding::Utf16Be => bytes.extend(text.encode_utf16().flat_map(u16::to_be_bytes)),
        TextEncoding::Utf32Le => bytes.extend(text.chars().flat_map(|c| (c as u32).to_le_bytes())),
        TextEncoding::Utf32Be => bytes.extend(text.chars().flat_map(|c| (c as u32).to_be_bytes())),
        TextEncoding::Windows1252 => {
            let (encoded, _, unmappable) = encoding_rs::WINDOWS_1252.encode(text);
            assert!(!unmappable, "{:?} cannot be written as windows-1252", text);
            bytes.extend_from_slice(&encoded);
        }
    }
    bytes
}

/// Writes an INI file in the given encoding
pub fn write_config(dir: &Path, filename: &str, text: &str, encoding: TextEncoding) -> PathBuf {
    create_temp_file(dir, filename, &encode_config(text, encoding))
}

/// Server configuration text for a download server and playlist
pub fn server_config_text(download_server: &str, playlist: &str) -> String {
    format!(
        "[Application]\nDownloadServer = {}\nPlaylist = {}\n",
        download_server, playlist
    )
}

/// Local configuration text pointing at `directory`
pub fn local_config_text(directory: &Path) -> String {
    format!("[Application]\nDownloadDirectory = {}\n", directory.display())
}

// === Reporter Helpers ===

/// A [`Reporter`] keeping every notice in memory.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    notices: Mutex<Vec<(Level, String)>>,
}

impl RecordingReporter {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notices(&self) -> Vec<(Level, String)> {
        self.notices.lock().unwrap().clone()
    }

    pub fn messages(&self, level: Level) -> Vec<String> {
        self.notices()
            .into_iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m)
            .collect()
    }

    pub fn contains(&self, level: Level, message: &str) -> bool {
        self.messages(level).iter().any(|m| m == message)
    }
}

impl Reporter for RecordingReporter {
    fn report(&self, level: Level, message: &str) {
        self.notices
            .lock()
            .unwrap()
            .push((level, message.to_string()));
    }
}

// === Mock HTTP Server ===

/// How the mock server answers one path.
#[derive(Debug, Clone)]
pub enum Route {
    /// A body with a declared Content-Length.
    Full(StatusCode, Vec<u8>),
    /// A 200 body sent chunked, without any declared length.
    Chunked(Vec<Vec<u8>>),
    /// A 200 chunked body whose connection drops after the given chunks.
    Broken(Vec<Vec<u8>>),
}

impl Route {
    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Route::Full(StatusCode::OK, body.into())
    }

    pub fn status(status: StatusCode) -> Self {
        Route::Full(status, Vec::new())
    }
}

#[derive(Clone)]
struct MockState {
    routes: Arc<HashMap<String, Route>>,
    requests: Arc<Mutex<Vec<String>>>,
}

/// An HTTP server on 127.0.0.1 answering fixed routes and recording every
/// requested path. Unknown paths get a 404.
pub struct MockServer {
    addr: SocketAddr,
    requests: Arc<Mutex<Vec<String>>>,
    handle: JoinHandle<()>,
}

impl MockServer {
    pub async fn start(routes: Vec<(&str, Route)>) -> Self {
        let routes = routes
            .into_iter()
            .map(|(path, route)| (format!("/{}", path.trim_start_matches('/')), route))
            .collect();
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            routes: Arc::new(routes),
            requests: requests.clone(),
        };

        let app = Router::new().fallback(serve_route).with_state(state);
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("Mock server has no address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.expect("Mock server failed");
        });

        Self {
            addr,
            requests,
            handle,
        }
    }

    /// Base URL of the server, without a trailing slash.
    pub fn base(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Absolute URL of `path` on the server.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base(), path.trim_start_matches('/'))
    }

    /// Every path requested so far, in order.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn serve_route(State(state): State<MockState>, uri: Uri) -> Response {
    let path = uri.path().to_string();
    state.requests.lock().unwrap().push(path.clone());

    match state.routes.get(&path) {
        Some(Route::Full(status, body)) => (*status, body.clone()).into_response(),
        Some(Route::Chunked(chunks)) => {
            let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
                chunks.iter().cloned().map(Ok).collect();
            Body::from_stream(futures::stream::iter(chunks)).into_response()
        }
        Some(Route::Broken(chunks)) => {
            let chunks: Vec<Result<Vec<u8>, std::io::Error>> =
                chunks.iter().cloned().map(Ok).collect();
            let abort = futures::stream::once(async {
                tokio::time::sleep(Duration::from_millis(50)).await;
                Err(std::io::Error::new(
                    std::io::ErrorKind::ConnectionReset,
                    "connection dropped",
                ))
            });
            Body::from_stream(futures::stream::iter(chunks).chain(abort)).into_response()
        }
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

/// An address nothing listens on.
pub async fn unused_address() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind");
    listener.local_addr().expect("No local address")
}
