use async_openai::types::RunStatus;
use derive_more::{Deref, Display, From};

// NOTE: Each remote object gets its own id type so a ThreadId can never be
// passed where a RunId is expected.
#[derive(Debug, Clone, PartialEq, Eq, From, Deref, Display)]
pub struct AssistantId(String);

#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Deref, Display)]
pub struct ThreadId(String);

#[derive(Debug, Clone, PartialEq, Eq, From, Deref, Display)]
pub struct FileId(String);

#[derive(Debug, Clone, PartialEq, Eq, From, Deref, Display)]
pub struct RunId(String);

// region:       -- Assistant

/// What the assistant is created with.
#[derive(Debug, Clone)]
pub struct CreateConfig {
    pub name: String,
    pub model: String,
    pub instructions: String,
}

// endregion:    -- Assistant

// region:       -- Run

/// Snapshot of a remote run, as returned by create/retrieve.
#[derive(Debug, Clone)]
pub struct Run {
    pub id: RunId,
    pub status: RunStatus,
    pub last_error: Option<String>,
}

/// Terminal state of a run, from this client's point of view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    Failed { reason: Option<String> },
    Cancelled,
    Expired,
    RequiresAction,
}

impl RunOutcome {
    /// `None` while the run is still `queued` or `in_progress`.
    pub fn from_run(run: &Run) -> Option<Self> {
        let outcome = match run.status {
            RunStatus::Queued | RunStatus::InProgress => return None,
            RunStatus::Completed => Self::Completed,
            RunStatus::Failed => Self::Failed {
                reason: run.last_error.clone(),
            },
            RunStatus::Cancelling | RunStatus::Cancelled => Self::Cancelled,
            RunStatus::Expired => Self::Expired,
            RunStatus::RequiresAction => Self::RequiresAction,
        };
        Some(outcome)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed)
    }
}

// endregion:    -- Run

// region:       -- Message

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Role {
    #[display("user")]
    User,
    #[display("assistant")]
    Assistant,
}

/// One thread message, reduced to its role and first text segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    pub created_at: i64,
}

// endregion:    -- Message
