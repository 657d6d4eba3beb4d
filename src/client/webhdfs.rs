// file: src/client/webhdfs.rs
// version: 1.0.0
// guid: 143b6a93-5db4-48d6-a516-72a27e093258

//! WebHDFS REST client

use std::time::Duration;

use reqwest::{RequestBuilder, StatusCode};
use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::{join_path, FileStatus, RemoteFileSystem};
use crate::config::NamenodeConfig;
use crate::error::{ChownError, FsError, FsErrorKind, Result};

const API_PREFIX: [&str; 2] = ["webhdfs", "v1"];
const URI_SCHEMES: [&str; 3] = ["hdfs://", "webhdfs://", "swebhdfs://"];

/// Client for the namenode's `/webhdfs/v1` endpoint
#[derive(Debug, Clone)]
pub struct WebHdfsClient {
    http: reqwest::Client,
    base: Url,
    user: Option<String>,
}

impl WebHdfsClient {
    /// Create a client for the configured namenode
    pub fn new(config: &NamenodeConfig) -> Result<Self> {
        let base = Url::parse(&config.url).map_err(|e| {
            ChownError::config(format!("Invalid namenode url {}: {}", config.url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(ChownError::config(format!(
                "Namenode url cannot carry a path: {}",
                config.url
            )));
        }

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("dfs-chown/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ChownError::client(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base,
            user: config.user.clone(),
        })
    }

    /// URL for `op` on `path`, with extra query parameters
    pub fn endpoint(
        &self,
        path: &str,
        op: &str,
        params: &[(&str, &str)],
    ) -> std::result::Result<Url, FsError> {
        let path = self.remote_path(path)?;
        let mut url = self.base.clone();

        {
            let mut segments = url
                .path_segments_mut()
                .map_err(|_| FsError::invalid_path("namenode url cannot carry a path"))?;
            segments.pop_if_empty().extend(API_PREFIX);

            let components: Vec<&str> = path.split('/').filter(|c| !c.is_empty()).collect();
            if components.is_empty() {
                // Root is addressed as `/webhdfs/v1/`
                segments.push("");
            } else {
                segments.extend(components);
            }
        }

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("op", op);
            for (key, value) in params {
                query.append_pair(key, value);
            }
            if let Some(user) = &self.user {
                query.append_pair("user.name", user);
            }
        }

        Ok(url)
    }

    /// Reduce an operand to the absolute path the namenode understands.
    ///
    /// `hdfs://host:port/p`, `webhdfs://host:port/p` and `swebhdfs://host:port/p`
    /// become `/p` when `host` is the configured namenode (or omitted, as in
    /// `hdfs:///p`); anything else must already be absolute. `.` and `..`
    /// components are refused rather than resolved.
    pub fn remote_path(&self, operand: &str) -> std::result::Result<String, FsError> {
        let path = match URI_SCHEMES
            .iter()
            .find_map(|scheme| operand.strip_prefix(*scheme))
        {
            Some(rest) => {
                let (authority, path) = match rest.find('/') {
                    Some(index) => rest.split_at(index),
                    None => {
                        return Err(FsError::invalid_path(format!(
                            "{} does not name a path",
                            operand
                        )))
                    }
                };
                let host = uri_host(authority);
                if !host.is_empty() && !self.is_namenode_host(host) {
                    return Err(FsError::invalid_path(format!(
                        "{} is not on the configured namenode",
                        operand
                    )));
                }
                path
            }
            None if operand.starts_with('/') => operand,
            None => {
                return Err(FsError::invalid_path(format!(
                    "{} is not an absolute path",
                    operand
                )))
            }
        };

        if path.split('/').any(|c| c == "." || c == "..") {
            return Err(FsError::invalid_path(format!(
                "{} contains a relative component",
                operand
            )));
        }

        Ok(path.to_string())
    }

    fn is_namenode_host(&self, host: &str) -> bool {
        let host = host.trim_start_matches('[').trim_end_matches(']');
        self.base
            .host_str()
            .map(|own| own.trim_start_matches('[').trim_end_matches(']'))
            .is_some_and(|own| own.eq_ignore_ascii_case(host))
    }

    async fn send(&self, request: RequestBuilder) -> std::result::Result<reqwest::Response, FsError> {
        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

/// Host part of a URI authority, without user info or port
fn uri_host(authority: &str) -> &str {
    let host_port = authority.rsplit('@').next().unwrap_or(authority);
    if host_port.starts_with('[') {
        return host_port
            .find(']')
            .map(|end| &host_port[..=end])
            .unwrap_or(host_port);
    }
    host_port.split(':').next().unwrap_or(host_port)
}

fn transport_error(err: reqwest::Error) -> FsError {
    if err.is_timeout() {
        FsError::timeout()
    } else {
        FsError::communication(err.to_string())
    }
}

#[derive(Debug, Deserialize)]
struct RemoteExceptionBody {
    #[serde(rename = "RemoteException")]
    remote_exception: RemoteException,
}

#[derive(Debug, Deserialize)]
struct RemoteException {
    exception: String,
    message: Option<String>,
}

/// Map a non-success response to an [`FsError`]
pub fn status_error(status: StatusCode, body: &str) -> FsError {
    let remote = serde_json::from_str::<RemoteExceptionBody>(body)
        .ok()
        .map(|body| body.remote_exception);

    let by_exception = remote.as_ref().and_then(|r| match r.exception.as_str() {
        "AccessControlException" | "SecurityException" => Some(FsErrorKind::PermissionDenied),
        "FileNotFoundException" => Some(FsErrorKind::NotFound),
        "ParentNotDirectoryException" => Some(FsErrorKind::NotADirectory),
        "InvalidPathException" => Some(FsErrorKind::InvalidPath),
        _ => None,
    });

    let kind = by_exception.unwrap_or(match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => FsErrorKind::PermissionDenied,
        StatusCode::NOT_FOUND => FsErrorKind::NotFound,
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => FsErrorKind::Timeout,
        _ => FsErrorKind::Other,
    });

    if kind == FsErrorKind::Timeout {
        return FsError::timeout();
    }

    let detail = remote
        .and_then(|r| r.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| format!("HTTP {}", status));
    FsError::new(kind, detail)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireFileStatus {
    path_suffix: String,
    #[serde(rename = "type")]
    kind: String,
    owner: String,
    group: String,
}

impl WireFileStatus {
    fn into_status(self, path: String) -> FileStatus {
        FileStatus {
            path,
            is_dir: self.kind == "DIRECTORY",
            owner: self.owner,
            group: self.group,
        }
    }
}

#[derive(Debug, Deserialize)]
struct FileStatusResponse {
    #[serde(rename = "FileStatus")]
    file_status: WireFileStatus,
}

#[derive(Debug, Deserialize)]
struct ListStatusResponse {
    #[serde(rename = "FileStatuses")]
    file_statuses: FileStatuses,
}

#[derive(Debug, Deserialize)]
struct FileStatuses {
    #[serde(rename = "FileStatus")]
    file_status: Vec<WireFileStatus>,
}

/// Decode a `GETFILESTATUS` body for `path`
pub fn parse_file_status(path: &str, body: &str) -> std::result::Result<FileStatus, FsError> {
    let response: FileStatusResponse = serde_json::from_str(body)
        .map_err(|e| FsError::other(format!("malformed GETFILESTATUS response: {}", e)))?;
    Ok(response.file_status.into_status(path.to_string()))
}

/// Decode a `LISTSTATUS` body for directory `dir`.
///
/// Listing a file yields one entry with an empty suffix; that is reported as
/// `NotADirectory`.
pub fn parse_listing(dir: &str, body: &str) -> std::result::Result<Vec<FileStatus>, FsError> {
    let response: ListStatusResponse = serde_json::from_str(body)
        .map_err(|e| FsError::other(format!("malformed LISTSTATUS response: {}", e)))?;

    let entries = response.file_statuses.file_status;
    if entries.iter().any(|entry| entry.path_suffix.is_empty()) {
        return Err(FsError::not_a_directory(format!("{} is a file", dir)));
    }

    Ok(entries
        .into_iter()
        .map(|entry| {
            let path = join_path(dir, &entry.path_suffix);
            entry.into_status(path)
        })
        .collect())
}

#[async_trait::async_trait]
impl RemoteFileSystem for WebHdfsClient {
    async fn set_owner(
        &self,
        path: &str,
        user: Option<&str>,
        group: Option<&str>,
    ) -> std::result::Result<(), FsError> {
        let mut params = Vec::new();
        if let Some(user) = user {
            params.push(("owner", user));
        }
        if let Some(group) = group {
            params.push(("group", group));
        }

        let url = self.endpoint(path, "SETOWNER", &params)?;
        debug!("PUT {}", url);
        self.send(self.http.put(url)).await?;
        Ok(())
    }

    async fn stat(&self, path: &str) -> std::result::Result<FileStatus, FsError> {
        let url = self.endpoint(path, "GETFILESTATUS", &[])?;
        debug!("GET {}", url);
        let body = self
            .send(self.http.get(url))
            .await?
            .text()
            .await
            .map_err(transport_error)?;
        parse_file_status(&self.remote_path(path)?, &body)
    }

    async fn list_children(&self, path: &str) -> std::result::Result<Vec<FileStatus>, FsError> {
        let url = self.endpoint(path, "LISTSTATUS", &[])?;
        debug!("GET {}", url);
        let body = self
            .send(self.http.get(url))
            .await?
            .text()
            .await
            .map_err(transport_error)?;
        parse_listing(&self.remote_path(path)?, &body)
    }
}
