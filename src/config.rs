use anyhow::{Context, Result};
use log::debug;
use reqwest::{
    Client,
    header::{AUTHORIZATION, HeaderMap, HeaderValue},
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::release::LATEST_RELEASE_URL;

/// Build directory used when none is given, relative to the working directory.
pub const DEFAULT_BUILD_DIR: &str = "bymr";

/// Per-request timeout used when none is given.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(300);

const USER_AGENT: &str = "bymr-patcher";

/// Immutable settings for one patcher run.
pub struct Config {
    pub endpoint: String,
    pub build_dir: PathBuf,
    pub timeout: Duration,
    pub client: Client,
}

impl Config {
    pub fn new(
        build_dir: Option<PathBuf>,
        api_url: Option<String>,
        timeout: Option<Duration>,
    ) -> Result<Self> {
        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let token = env::var("GITHUB_TOKEN").ok().filter(|t| !t.is_empty());
        let client = build_client(token.as_deref(), timeout)?;

        Ok(Self {
            endpoint: api_url.unwrap_or_else(|| LATEST_RELEASE_URL.to_string()),
            build_dir: build_dir.unwrap_or_else(|| PathBuf::from(DEFAULT_BUILD_DIR)),
            timeout,
            client,
        })
    }
}

/// Builds the shared HTTP client, authenticating with `token` when present.
pub fn build_client(token: Option<&str>, timeout: Duration) -> Result<Client> {
    let mut headers = HeaderMap::new();
    if let Some(token) = token {
        let mut auth_value = HeaderValue::from_str(&format!("Bearer {}", token))
            .context("GITHUB_TOKEN contains invalid header characters")?;
        auth_value.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth_value);
        debug!("Using GITHUB_TOKEN for authentication: {}", mask_token(token));
    }

    Client::builder()
        .user_agent(USER_AGENT)
        .default_headers(headers)
        .timeout(timeout)
        .build()
        .context("Failed to build HTTP client")
}

fn mask_token(token: &str) -> String {
    let chars: Vec<char> = token.chars().collect();
    if chars.len() <= 12 {
        return "*********".to_string();
    }
    let head: String = chars[..8].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}*********{}", head, tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;

    // when GITHUB_TOKEN is set, Config::new should use it for authentication
    #[tokio::test]
    async fn test_config_new_with_github_token() {
        let token = "test_token";
        unsafe {
            env::set_var("GITHUB_TOKEN", token);
        }

        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("Authorization", format!("Bearer {}", token).as_str())
            .create();

        let config = Config::new(None, None, None).unwrap();
        let _ = config.client.get(server.url()).send().await;

        mock.assert();
        unsafe {
            env::remove_var("GITHUB_TOKEN");
        }
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::new(None, None, None).unwrap();

        assert_eq!(config.endpoint, LATEST_RELEASE_URL);
        assert_eq!(config.build_dir, PathBuf::from("bymr"));
        assert_eq!(config.timeout, DEFAULT_TIMEOUT);
    }

    #[test]
    fn test_config_overrides() {
        let config = Config::new(
            Some(PathBuf::from("/tmp/builds")),
            Some("http://localhost:8080/latest".to_string()),
            Some(Duration::from_secs(5)),
        )
        .unwrap();

        assert_eq!(config.endpoint, "http://localhost:8080/latest");
        assert_eq!(config.build_dir, PathBuf::from("/tmp/builds"));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_client_sends_user_agent() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/")
            .match_header("User-Agent", "bymr-patcher")
            .match_header("Authorization", mockito::Matcher::Missing)
            .create_async()
            .await;

        let client = build_client(None, DEFAULT_TIMEOUT).unwrap();
        let _ = client.get(server.url()).send().await;

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_client_times_out() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and never answer
        let _server = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let client = build_client(None, Duration::from_millis(200)).unwrap();
        let err = client
            .get(format!("http://{}/", addr))
            .send()
            .await
            .unwrap_err();

        assert!(err.is_timeout());
    }

    #[test]
    fn test_build_client_rejects_invalid_token() {
        assert!(build_client(Some("bad\ntoken"), DEFAULT_TIMEOUT).is_err());
    }

    #[test]
    fn test_mask_token() {
        assert_eq!(mask_token("short"), "*********");
        assert_eq!(
            mask_token("ghp_abcdefghijklmnopqrstuvwxyz"),
            "ghp_abcd*********wxyz"
        );
    }
}
