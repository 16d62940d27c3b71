//! The `clinic` module ties the pipeline together.
//!
//! A [`Clinic`] is set up once per indication: fetch the openFDA labels, package them as
//! the knowledge artifact, and provision an assistant bound to that artifact. Each
//! question then goes through [`converse`] on a fresh thread.
//!
//! The clinic owns its service client; nothing is held in module-level state.

// region:       -- Modules

mod config;

pub use config::{Config, PollConfig, CLINICAL_TOML};

use crate::ais::{
    wait_on_run, AssistantId, AssistantService, CreateConfig, Message, PollPolicy, RunOutcome,
};
use crate::knowledge::{self, KnowledgeArtifact};
use crate::openfda::DrugLabelClient;
use crate::{Error, Result};
use tracing::{info, instrument, warn};

// endregion:    -- Modules

// region:       -- Transcript

/// Messages of a finished run, oldest first, along with how the run ended.
#[derive(Debug, Clone)]
pub struct Transcript {
    pub outcome: RunOutcome,
    pub messages: Vec<Message>,
}

impl Transcript {
    pub fn is_success(&self) -> bool {
        self.outcome.is_success()
    }

    /// The messages, only if the run completed.
    pub fn completed(self) -> Result<Vec<Message>> {
        if self.outcome.is_success() {
            Ok(self.messages)
        } else {
            Err(Error::RunUnsuccessful(self.outcome))
        }
    }
}

// endregion:    -- Transcript

// region:       -- Provision & Converse

/// Creates a new assistant and binds `artifact` to it as its only file.
///
/// Always creates; there is no lookup of an assistant from a previous run.
pub async fn provision<S: AssistantService>(
    service: &S,
    config: &CreateConfig,
    artifact: &KnowledgeArtifact,
) -> Result<AssistantId> {
    let assistant_id = service.create_assistant(config).await?;
    warn!(
        %assistant_id,
        name = %config.name,
        "created a new assistant, previous ones are not reused"
    );

    service
        .attach_knowledge(&assistant_id, std::slice::from_ref(&artifact.file_id))
        .await?;
    info!(%assistant_id, file_id = %artifact.file_id, "knowledge attached");

    Ok(assistant_id)
}

/// Asks `user_text` on a new thread and waits for the run to finish.
#[instrument(skip(service, user_text, policy))]
pub async fn converse<S: AssistantService>(
    service: &S,
    assistant_id: &AssistantId,
    user_text: &str,
    policy: &PollPolicy,
) -> Result<Transcript> {
    let thread_id = service.create_thread().await?;
    service.create_user_message(&thread_id, user_text).await?;
    let run = service.create_run(&thread_id, assistant_id).await?;
    info!(%thread_id, run_id = %run.id, "run created");

    let outcome = wait_on_run(service, &thread_id, run, policy).await?;
    if !outcome.is_success() {
        warn!(?outcome, "run did not complete");
    }

    let mut messages = service.list_messages(&thread_id).await?;
    // Listed ascending already; a stable sort keeps ties in listing order.
    messages.sort_by_key(|m| m.created_at);

    Ok(Transcript { outcome, messages })
}

// endregion:    -- Provision & Converse

// region:       -- Clinic

#[derive(Debug)]
pub struct Clinic<S> {
    service: S,
    config: Config,
    assistant_id: AssistantId,
    artifact: KnowledgeArtifact,
}

impl<S: AssistantService> Clinic<S> {
    /// Fetch, package and provision for `indication`.
    pub async fn setup(
        service: S,
        fda: &DrugLabelClient,
        config: Config,
        indication: &str,
    ) -> Result<Self> {
        // -- Fetch the labels
        let records = fda.fetch(indication, config.result_limit).await?;

        // -- Package and upload the knowledge artifact
        let artifact = knowledge::package(&service, &records, &config.dataset_file).await?;

        // -- Provision the assistant
        let create_config = CreateConfig::from(&config);
        let assistant_id = provision(&service, &create_config, &artifact).await?;

        Ok(Clinic {
            service,
            config,
            assistant_id,
            artifact,
        })
    }

    pub async fn ask(&self, question: &str) -> Result<Transcript> {
        converse(
            &self.service,
            &self.assistant_id,
            question,
            &self.config.poll_policy(),
        )
        .await
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn assistant_id(&self) -> &AssistantId {
        &self.assistant_id
    }

    pub fn artifact(&self) -> &KnowledgeArtifact {
        &self.artifact
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }
}

// endregion:    -- Clinic

// region:       -- Tests


// endregion:    -- Tests
