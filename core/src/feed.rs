// SPDX-FileCopyrightText: 2026 Hostsync Developers <dev@hostsync.app>
//
// SPDX-License-Identifier: Apache-2.0

//! HTTP retrieval of iCalendar feeds.

use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};

use crate::config::Config;

const ACCEPT_CALENDAR: &str = "text/calendar, text/plain, */*";

/// HTTP client for calendar feeds.
#[derive(Debug, Clone)]
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    /// Creates a new fetcher with the configured timeout and user agent.
    ///
    /// # Errors
    ///
    /// Returns an error if HTTP client creation fails.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.fetch_timeout())
            .user_agent(&config.user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Downloads a feed and returns its body as text.
    ///
    /// # Errors
    ///
    /// Fails on non-HTTP URLs, transport errors, non-success statuses and
    /// bodies that are clearly an HTML page rather than a calendar.
    #[tracing::instrument(skip_all, fields(url = %redact(url)))]
    pub async fn fetch(&self, url: &str) -> Result<String, FetchError> {
        let url = url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(FetchError::InvalidUrl(redact(url)));
        }

        let resp = self
            .client
            .get(url)
            .header(ACCEPT, ACCEPT_CALENDAR)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            tracing::warn!(%status, "feed request failed");
            return Err(FetchError::Status { status });
        }

        let body = resp.text().await?;
        if !body.contains("BEGIN:VCALENDAR") && looks_like_html(&body) {
            return Err(FetchError::NotCalendar);
        }

        tracing::debug!(bytes = body.len(), "feed downloaded");
        Ok(body)
    }
}

/// Errors raised while downloading a feed.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The URL does not use the http or https scheme.
    #[error("invalid calendar URL: {0}")]
    InvalidUrl(String),

    /// The request could not be completed.
    #[error("failed to download calendar: {0}")]
    Transport(reqwest::Error),

    /// The server answered with a non-success status.
    #[error("{}", describe_status(.status))]
    Status {
        /// The received status.
        status: StatusCode,
    },

    /// The body is a web page, not a calendar.
    #[error("the URL returned a web page instead of a calendar")]
    NotCalendar,
}

impl FetchError {
    /// Whether retrying the request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => status.is_server_error(),
            Self::InvalidUrl(_) | Self::NotCalendar => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        // feed URLs embed access tokens
        Self::Transport(e.without_url())
    }
}

fn describe_status(status: &StatusCode) -> String {
    match *status {
        StatusCode::NOT_FOUND => "calendar feed not found (404)".to_string(),
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            format!("access to calendar feed denied ({})", status.as_u16())
        }
        status => format!("calendar feed returned HTTP {}", status.as_u16()),
    }
}

fn looks_like_html(body: &str) -> bool {
    let head: String = body.trim_start().chars().take(512).collect();
    let head = head.to_ascii_lowercase();
    head.starts_with("<!doctype") || head.starts_with("<html") || head.contains("<body")
}

/// Shortens a URL for logs and messages.
fn redact(url: &str) -> String {
    let prefix: String = url.chars().take(24).collect();
    if prefix.len() < url.len() {
        format!("{prefix}...")
    } else {
        prefix
    }
}
