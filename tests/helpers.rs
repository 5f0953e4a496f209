//! Shared test utilities for landingctl tests.
#![allow(dead_code)]

use std::env;
use std::fs;
use std::net::SocketAddr;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

use landingctl::config::{Config, PreviewConfig, TargetConfig};

/// The page every test asset contains.
pub const PAGE: &str = "<!doctype html>\n<html><body><h1>Sign in</h1></body></html>\n";

/// Test environment with a temporary landing asset.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Path to the HTML asset
    pub asset: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let asset = temp_dir.path().join("index.html");
        fs::write(&asset, PAGE).expect("write asset");
        Self {
            _temp_dir: temp_dir,
            asset,
        }
    }

    /// A config pointing at this environment's asset, with both targets
    /// configured and invalidation enabled for `auth` only.
    pub fn config(&self) -> Config {
        Config {
            auth: TargetConfig {
                bucket: "auth-test-bucket".to_string(),
                distribution: Some("E1AUTHTEST".to_string()),
            },
            connect: TargetConfig {
                bucket: "connect-test-bucket".to_string(),
                distribution: None,
            },
            region: "us-east-1".to_string(),
            profile: "default".to_string(),
            asset: self.asset.clone(),
            preview: PreviewConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
        }
    }
}

/// A fake `aws` binary on PATH that records every invocation and answers the
/// JSON-producing subcommands with canned output. Restores PATH on drop.
pub struct FakeAws {
    pub _temp_dir: TempDir,
    pub log: PathBuf,
    saved_path: String,
}

impl FakeAws {
    pub fn install() -> Self {
        let temp_dir = TempDir::new().expect("create temp dir");
        let bin_dir = temp_dir.path().join("bin");
        fs::create_dir_all(&bin_dir).expect("create bin dir");

        let log = temp_dir.path().join("aws.log");
        fs::write(&log, "").expect("create spy log");

        let script = format!(
            r#"#!/bin/sh
printf '%s\n' "$*" >> "{log}"
case "$1 $2" in
  "sts get-caller-identity")
    echo '{{"UserId":"AIDEXAMPLE","Account":"123456789012","Arn":"arn:aws:iam::123456789012:user/ci"}}'
    ;;
  "cloudfront create-invalidation")
    echo '{{"Location":"https://cloudfront.amazonaws.com/2020-05-31/distribution","Invalidation":{{"Id":"I2J3EXAMPLE","Status":"InProgress"}}}}'
    ;;
esac
"#,
            log = log.display()
        );
        let aws_path = bin_dir.join("aws");
        fs::write(&aws_path, script).expect("write fake aws");
        fs::set_permissions(&aws_path, fs::Permissions::from_mode(0o755))
            .expect("chmod fake aws");

        let saved_path = env::var("PATH").unwrap_or_default();
        env::set_var("PATH", format!("{}:{saved_path}", bin_dir.display()));

        Self {
            _temp_dir: temp_dir,
            log,
            saved_path,
        }
    }

    /// Every recorded invocation, one line per `aws` call.
    pub fn lines(&self) -> Vec<String> {
        fs::read_to_string(&self.log)
            .expect("read spy log")
            .lines()
            .map(str::to_string)
            .collect()
    }
}

impl Drop for FakeAws {
    fn drop(&mut self) {
        env::set_var("PATH", &self.saved_path);
    }
}

/// Minimal HTTP/1.1 client: one request, connection closed, parsed response.
pub async fn http_request(addr: SocketAddr, target: &str) -> HttpResponse {
    let mut stream = tokio::net::TcpStream::connect(addr).await.expect("connect");
    let request = format!("GET {target} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await.expect("write request");

    let mut raw = Vec::new();
    stream.read_to_end(&mut raw).await.expect("read response");
    parse_response(&raw)
}

pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Header value by case-insensitive name.
    pub fn header(&self, name: &str) -> Option<&str> {
        let name = name.to_ascii_lowercase();
        self.headers
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }
}

fn parse_response(raw: &[u8]) -> HttpResponse {
    let split = raw
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .expect("response has a header/body split");
    let head = std::str::from_utf8(&raw[..split]).expect("header section is utf-8");
    let mut lines = head.split("\r\n");

    let status_line = lines.next().expect("status line");
    let status: u16 = status_line
        .split_whitespace()
        .nth(1)
        .expect("status code")
        .parse()
        .expect("numeric status code");

    let headers = lines
        .map(|line| {
            let (name, value) = line.split_once(':').expect("header line");
            (name.trim().to_ascii_lowercase(), value.trim().to_string())
        })
        .collect();

    HttpResponse {
        status,
        headers,
        body: raw[split + 4..].to_vec(),
    }
}
