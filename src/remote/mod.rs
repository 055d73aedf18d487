//! Client for the online high-score table and news messages
mod records;
mod signing;
use self::records::SignedHighScore;
pub(crate) use self::records::{HighScoreRecord, OnlineHighScore, OnlineMessage};
pub(crate) use self::signing::SigningKey;
use crate::consts;
use crate::util::ErrorChain;
use reqwest::StatusCode;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

/// A call to make to the server in the background
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Request {
    PostScore(HighScoreRecord),
    HighScores,
    Messages,
}

impl Request {
    pub(crate) fn kind(&self) -> RequestKind {
        match self {
            Request::PostScore(_) => RequestKind::PostScore,
            Request::HighScores => RequestKind::HighScores,
            Request::Messages => RequestKind::Messages,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RequestKind {
    PostScore,
    HighScores,
    Messages,
}

/// The outcome of a [`Request`], with all failures collapsed into a generic
/// "didn't work"
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) enum Reply {
    /// Whether the score was accepted
    Posted(bool),
    /// `None` if the table couldn't be fetched
    HighScores(Option<Vec<OnlineHighScore>>),
    /// Failures are reported as an empty list
    Messages(Vec<OnlineMessage>),
}

impl Reply {
    pub(crate) fn kind(&self) -> RequestKind {
        match self {
            Reply::Posted(_) => RequestKind::PostScore,
            Reply::HighScores(_) => RequestKind::HighScores,
            Reply::Messages(_) => RequestKind::Messages,
        }
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RemoteClient {
    http: reqwest::Client,
    base_url: String,
    key: SigningKey,
}

impl RemoteClient {
    pub(crate) fn new(
        base_url: &str,
        timeout: Duration,
        key: SigningKey,
    ) -> Result<RemoteClient, RemoteError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(format!("{}/{}", consts::APP_NAME, consts::APP_VERSION))
            .build()
            .map_err(RemoteError::client)?;
        Ok(RemoteClient {
            http,
            base_url: base_url.trim_end_matches('/').to_owned(),
            key,
        })
    }

    /// Carry out `req`, logging any failure
    pub(crate) async fn perform(&self, req: Request) -> Reply {
        debug!(kind = ?req.kind(), "Sending request to server");
        match req {
            Request::PostScore(record) => match self.post_high_score(&record).await {
                Ok(()) => Reply::Posted(true),
                Err(e) => {
                    warn!(error = %ErrorChain(&e), "Failed to post high score");
                    Reply::Posted(false)
                }
            },
            Request::HighScores => match self.fetch_high_scores().await {
                Ok(scores) => Reply::HighScores(Some(scores)),
                Err(e) => {
                    warn!(error = %ErrorChain(&e), "Failed to fetch high scores");
                    Reply::HighScores(None)
                }
            },
            Request::Messages => match self.fetch_messages().await {
                Ok(msgs) => Reply::Messages(msgs),
                Err(e) => {
                    debug!(error = %ErrorChain(&e), "Failed to fetch news messages");
                    Reply::Messages(Vec::new())
                }
            },
        }
    }

    fn high_scores_url(&self) -> String {
        format!("{}/api/high-scores", self.base_url)
    }

    fn messages_url(&self) -> String {
        format!("{}/api/messages", self.base_url)
    }

    /// Submit a finished round.  Only a "201 Created" response counts as
    /// success.
    pub(crate) async fn post_high_score(&self, record: &HighScoreRecord) -> Result<(), RemoteError> {
        let payload = serde_json::to_vec(record).map_err(RemoteError::serialize)?;
        let body = SignedHighScore {
            signature: self.key.sign(&payload),
            data: record,
        };
        let r = self
            .http
            .post(self.high_scores_url())
            .json(&body)
            .send()
            .await
            .map_err(RemoteError::transport)?;
        match r.status() {
            StatusCode::CREATED => Ok(()),
            status => Err(RemoteError::status(status)),
        }
    }

    pub(crate) async fn fetch_high_scores(&self) -> Result<Vec<OnlineHighScore>, RemoteError> {
        let r = self
            .http
            .get(self.high_scores_url())
            .query(&[("limit", consts::HIGH_SCORE_LIMIT)])
            .send()
            .await
            .map_err(RemoteError::transport)?;
        if r.status() != StatusCode::OK {
            return Err(RemoteError::status(r.status()));
        }
        r.json().await.map_err(RemoteError::transport)
    }

    pub(crate) async fn fetch_messages(&self) -> Result<Vec<OnlineMessage>, RemoteError> {
        let r = self
            .http
            .get(self.messages_url())
            .query(&[
                ("app_version", consts::APP_VERSION),
                ("goos", consts::APP_PLATFORM),
            ])
            .send()
            .await
            .map_err(RemoteError::transport)?;
        if !r.status().is_success() {
            return Err(RemoteError::status(r.status()));
        }
        r.json().await.map_err(RemoteError::transport)
    }
}

#[derive(Debug, Error)]
#[error("Request to high-score server failed")]
pub(crate) struct RemoteError(#[source] RemoteErrorSource);

impl RemoteError {
    fn client(e: reqwest::Error) -> Self {
        RemoteError(RemoteErrorSource::Client(e))
    }

    fn serialize(e: serde_json::Error) -> Self {
        RemoteError(RemoteErrorSource::Serialize(e))
    }

    fn transport(e: reqwest::Error) -> Self {
        RemoteError(RemoteErrorSource::Transport(e))
    }

    fn status(status: StatusCode) -> Self {
        RemoteError(RemoteErrorSource::Status(status))
    }
}

#[derive(Debug, Error)]
enum RemoteErrorSource {
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
    #[error("failed to serialize high score")]
    Serialize(#[source] serde_json::Error),
    #[error("failed to communicate with server")]
    Transport(#[source] reqwest::Error),
    #[error("server responded with unexpected status {0}")]
    Status(StatusCode),
}
