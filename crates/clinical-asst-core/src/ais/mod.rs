//! The `ais` module is the interface with the hosted assistant service (OpenAI Assistants, v1 beta).
//!
//! Everything the rest of the crate needs from the service goes through the
//! [`AssistantService`] trait, implemented for the `async-openai` client. Tests plug in
//! a scripted implementation instead of the network.

// region:       -- Modules
pub mod assistant;
pub mod message;
pub mod run;
mod types;

#[cfg(test)]
pub(crate) mod fake;

pub use run::{wait_on_run, PollPolicy};
pub use types::*;

use crate::{Error, Result};
use async_openai::{config::OpenAIConfig, Client};
use std::path::Path;
// endregion:    -- Modules

// region:       -- Create Async OpenAI Client
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";

pub type OaClient = Client<OpenAIConfig>;

pub fn new_openai_client() -> Result<OaClient> {
    let Ok(api_key) = std::env::var(ENV_OPENAI_API_KEY) else {
        return Err(Error::NoOpenAIApiKeyInEnv);
    };

    Ok(Client::with_config(OpenAIConfig::new().with_api_key(api_key)))
}

// endregion:    -- Create Async OpenAI Client

// region:       -- Assistant Service

/// The remote operations consumed from the assistant service.
#[allow(async_fn_in_trait)]
pub trait AssistantService {
    async fn create_assistant(&self, config: &CreateConfig) -> Result<AssistantId>;

    /// Declares the retrieval + code interpreter tools and sets `file_ids` as the
    /// assistant's files.
    async fn attach_knowledge(&self, assistant_id: &AssistantId, file_ids: &[FileId]) -> Result<()>;

    /// Uploads with purpose `assistants`.
    async fn upload_file(&self, file: &Path) -> Result<FileId>;

    async fn create_thread(&self) -> Result<ThreadId>;

    async fn create_user_message(&self, thread_id: &ThreadId, content: &str) -> Result<()>;

    async fn create_run(&self, thread_id: &ThreadId, assistant_id: &AssistantId) -> Result<Run>;

    async fn retrieve_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<Run>;

    /// All messages of the thread, oldest first.
    async fn list_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>>;
}

// endregion:    -- Assistant Service
