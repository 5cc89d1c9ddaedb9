#![allow(dead_code)]

use std::path::{Path, PathBuf};

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub async fn send_msg<W: AsyncWriteExt + Unpin>(writer: &mut W, msg: &str) {
    let content = format!("Content-Length: {}\r\n\r\n{}", msg.len(), msg);
    writer.write_all(content.as_bytes()).await.unwrap();
    writer.flush().await.unwrap();
}

pub async fn recv_msg<R: AsyncReadExt + Unpin>(reader: &mut R) -> Option<String> {
    let mut buffer = Vec::new();
    let mut content_length = 0;

    loop {
        let byte = reader.read_u8().await.ok()?;
        buffer.push(byte);
        if buffer.ends_with(b"\r\n\r\n") {
            let headers = String::from_utf8_lossy(&buffer);
            for line in headers.lines() {
                if line.to_lowercase().starts_with("content-length:") {
                    let parts: Vec<&str> = line.split(':').collect();
                    if parts.len() == 2 {
                        content_length = parts[1].trim().parse().unwrap_or_else(|e| {
                            panic!("Failed to parse Content-Length: {e}, header: {line}")
                        });
                    }
                }
            }
            break;
        }
    }

    if content_length == 0 {
        return None;
    }

    let mut body = vec![0u8; content_length];
    reader.read_exact(&mut body).await.ok()?;

    Some(String::from_utf8(body).unwrap())
}

/// Reads messages until one with the given method arrives.
pub async fn recv_notification<R: AsyncReadExt + Unpin>(
    reader: &mut R,
    method: &str,
) -> serde_json::Value {
    recv_matching(reader, method, |_| true).await
}

/// Reads messages until one with the given method satisfies `accept`.
pub async fn recv_matching<R, F>(reader: &mut R, method: &str, accept: F) -> serde_json::Value
where
    R: AsyncReadExt + Unpin,
    F: Fn(&serde_json::Value) -> bool,
{
    loop {
        let msg = recv_msg(reader).await.expect("stream closed");
        let value: serde_json::Value = serde_json::from_str(&msg).unwrap();
        if value["method"] == method && accept(&value["params"]) {
            return value;
        }
    }
}

/// A project directory with a shell script standing in for slim-lint.
///
/// The script reports one warning on line 1 of whatever file it is given.
pub struct FakeProject {
    dir: TempDir,
    script: PathBuf,
}

impl FakeProject {
    pub fn new() -> Self {
        Self::with_script(
            "for last; do :; done\n\
             echo \"$last:1 [W] LineLength: Line is too long. [95/80]\"",
        )
    }

    pub fn with_script(body: &str) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("fake-slim-lint.sh");
        std::fs::write(&script, format!("#!/bin/sh\n{}\n", body)).unwrap();
        Self { dir, script }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn executable_path(&self) -> String {
        format!("sh {}", self.script.display())
    }

    pub fn initialization_options(&self) -> serde_json::Value {
        serde_json::json!({ "slimLint": { "executablePath": self.executable_path() } })
    }

    /// Replaces the fake linter's script body.
    pub fn rewrite_script(&self, body: &str) {
        std::fs::write(&self.script, format!("#!/bin/sh\n{}\n", body)).unwrap();
    }

    pub fn write_document(&self, name: &str, text: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, text).unwrap();
        path
    }
}

