use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use crate::error::PipelineError;

/// Which responder produced the reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReplySource {
    Remote,
    Local,
}

impl ReplySource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReplySource::Remote => "remote",
            ReplySource::Local => "local",
        }
    }
}

impl fmt::Display for ReplySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Polarity in [-1, 1] and subjectivity in [0, 1]
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Sentiment {
    pub score: f64,
    pub magnitude: f64,
}

impl Sentiment {
    pub const NEUTRAL: Sentiment = Sentiment {
        score: 0.0,
        magnitude: 0.0,
    };

    pub fn new(score: f64, magnitude: f64) -> Self {
        Self {
            score: score.clamp(-1.0, 1.0),
            magnitude: magnitude.clamp(0.0, 1.0),
        }
    }
}

/// Outcome of one processed message, returned to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineResult {
    pub reply_text: String,
    pub source: ReplySource,
    pub sentiment: Sentiment,
}

/// Whether crisis text is allowed to reach the remote model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrisisPolicy {
    /// Crisis text goes to the remote model like any other; the crisis
    /// message is only guaranteed on the local path
    #[default]
    DelegateToRemote,
    /// Crisis text is answered locally before any network call
    InterceptBeforeRemote,
}

impl FromStr for CrisisPolicy {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "delegate_to_remote" | "delegate" => Ok(CrisisPolicy::DelegateToRemote),
            "intercept_before_remote" | "intercept" => Ok(CrisisPolicy::InterceptBeforeRemote),
            other => Err(PipelineError::Config(format!("unknown crisis policy: {}", other))),
        }
    }
}

/// Tunables for [`crate::Pipeline`]
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Number of most recent turns handed to the remote responder
    pub history_limit: usize,
    pub crisis_policy: CrisisPolicy,
    /// Bound on each store call; a stalled store is reported, not waited on
    pub store_timeout: Duration,
}

impl PipelineConfig {
    pub const DEFAULT_HISTORY_LIMIT: usize = 50;
    pub const DEFAULT_STORE_TIMEOUT: Duration = Duration::from_secs(2);
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            history_limit: Self::DEFAULT_HISTORY_LIMIT,
            crisis_policy: CrisisPolicy::default(),
            store_timeout: Self::DEFAULT_STORE_TIMEOUT,
        }
    }
}

/// Default bound on a whole remote call
pub const DEFAULT_REMOTE_TIMEOUT: Duration = Duration::from_secs(30);

/// Default remote model
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reply_source_serialization() {
        assert_eq!(serde_json::to_string(&ReplySource::Remote).unwrap(), "\"remote\"");
        assert_eq!(serde_json::to_string(&ReplySource::Local).unwrap(), "\"local\"");
    }

    #[test]
    fn test_sentiment_clamps() {
        let s = Sentiment::new(1.7, -0.2);
        assert_eq!(s.score, 1.0);
        assert_eq!(s.magnitude, 0.0);
    }

    #[test]
    fn test_crisis_policy_parsing() {
        assert_eq!(
            "intercept_before_remote".parse::<CrisisPolicy>().unwrap(),
            CrisisPolicy::InterceptBeforeRemote
        );
        assert_eq!("Delegate".parse::<CrisisPolicy>().unwrap(), CrisisPolicy::DelegateToRemote);
        assert!("sometimes".parse::<CrisisPolicy>().is_err());
    }

    #[test]
    fn test_result_field_names() {
        let result = PipelineResult {
            reply_text: "hi".to_string(),
            source: ReplySource::Local,
            sentiment: Sentiment::NEUTRAL,
        };
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["reply_text"], "hi");
        assert_eq!(json["source"], "local");
        assert_eq!(json["sentiment"]["magnitude"], 0.0);
    }
}
