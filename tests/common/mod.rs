//! Common test utilities and fixtures for ctxdocs integration tests
//!
//! Every test works in its own temporary project directory and runs the real
//! binary. Network endpoints are pointed at in-process stub servers through a
//! per-test global configuration file, so no test touches the real network
//! or the user's `~/.ctxdocs`.

// Not every helper is used by every test file
#![allow(dead_code)]

use assert_cmd::Command;
use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;

/// A temporary project directory.
pub struct TestProject {
    temp: TempDir,
}

impl TestProject {
    /// An empty project directory.
    pub fn new() -> Self {
        Self {
            temp: TempDir::new().unwrap(),
        }
    }

    /// A directory holding `package.json` with the given content.
    pub fn with_package_json(content: &str) -> Self {
        let project = Self::new();
        project.write("package.json", content);
        project
    }

    pub fn path(&self) -> &Path {
        self.temp.path()
    }

    pub fn join(&self, relative: &str) -> PathBuf {
        self.temp.path().join(relative)
    }

    pub fn write(&self, relative: &str, content: &str) {
        let path = self.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.join(relative)).unwrap()
    }

    pub fn exists(&self, relative: &str) -> bool {
        self.join(relative).exists()
    }

    /// Point the global configuration at the given endpoints.
    pub fn write_global_config(&self, docs_url: &str, registry_url: &str) {
        self.write(
            "global.toml",
            &format!(
                "[network]\ndocs_url = \"{docs_url}\"\nregistry_url = \"{registry_url}\"\n\
                 max_concurrency = 4\ntimeout_ms = 5000\n"
            ),
        );
    }

    /// The binary, run inside the project with an isolated global configuration.
    pub fn cmd(&self) -> Command {
        let mut cmd = Command::cargo_bin("ctxdocs").unwrap();
        cmd.current_dir(self.path())
            .env("CTXDOCS_CONFIG_PATH", self.join("global.toml"))
            .env("CTXDOCS_NO_PROGRESS", "1")
            .env_remove("RUST_LOG");
        cmd
    }
}

/// An HTTP server answering every request with the same status and body.
pub struct StubServer {
    pub url: String,
    hits: Arc<AtomicUsize>,
}

impl StubServer {
    pub fn start(status: u16, body: &'static str) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = hits.clone();
        std::thread::spawn(move || {
            for stream in listener.incoming() {
                let Ok(mut stream) = stream else {
                    continue;
                };
                let mut buf = [0u8; 4096];
                let _ = stream.read(&mut buf);
                counter.fetch_add(1, Ordering::SeqCst);
                let response = format!(
                    "HTTP/1.1 {status} STUB\r\ncontent-type: text/plain\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                let _ = stream.write_all(response.as_bytes());
            }
        });

        Self {
            url,
            hits,
        }
    }

    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// A URL nothing listens on.
pub fn unreachable_url() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    url
}
