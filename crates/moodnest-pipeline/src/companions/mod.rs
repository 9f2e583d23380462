//! Companion responders: daily plans and coping strategies.
//!
//! Both try the remote responder first and fall back to fixed templates.
//! Neither applies the crisis check and neither can fail.

pub mod coping;
pub mod planner;

pub use coping::{CopingCategory, CopingCoach};
pub use planner::{DailyPlanner, TimeOfDay};

use crate::types::ReplySource;

/// Text produced by a companion and where it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompanionReply {
    pub text: String,
    pub source: ReplySource,
}

impl CompanionReply {
    pub(crate) fn remote(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Remote,
        }
    }

    pub(crate) fn local(text: String) -> Self {
        Self {
            text,
            source: ReplySource::Local,
        }
    }
}
