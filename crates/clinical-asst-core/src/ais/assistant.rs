// NOTE: Thin service module over the OAI client. It keeps no state of its own;
// the Clinic owns the client and the ids.
// Assistants = call models and use tools (retrieval, code interpreter) on attached files.
// Threads = conversations that runs execute on.
// Messages = live inside Threads.
// REF: https://platform.openai.com/docs/api-reference/assistants

use crate::{
    ais::message::create_user_message,
    ais::types::{AssistantId, CreateConfig, FileId, Message, Run, RunId, ThreadId},
    ais::{AssistantService, OaClient},
    Result,
};
use async_openai::types::{
    AssistantToolsCode, AssistantToolsRetrieval, CreateAssistantRequest, CreateFileRequest,
    CreateRunRequest, CreateThreadRequest, ModifyAssistantRequest, RunObject,
};
use std::path::Path;
use tracing::debug;

// region:       -- Constants

// Ascending so the user message comes first. 100 is the page maximum.
const LIST_MESSAGES_QUERY: &[(&str, &str)] = &[("order", "asc"), ("limit", "100")];
const FILE_PURPOSE: &str = "assistants";

// endregion:    -- Constants

// region:       -- Assistant CRUD

pub async fn create(oac: &OaClient, config: &CreateConfig) -> Result<AssistantId> {
    let assistant_obj = oac
        .assistants()
        .create(CreateAssistantRequest {
            model: config.model.clone(),
            name: Some(config.name.clone()),
            instructions: Some(config.instructions.clone()),
            ..Default::default()
        })
        .await?;

    Ok(assistant_obj.id.into())
}

/// Replaces the tool set with retrieval + code interpreter and the
/// file list with `file_ids`.
pub async fn attach_knowledge(
    oac: &OaClient,
    assistant_id: &AssistantId,
    file_ids: &[FileId],
) -> Result<()> {
    let modify_request = ModifyAssistantRequest {
        tools: Some(vec![
            AssistantToolsRetrieval::default().into(),
            AssistantToolsCode::default().into(),
        ]),
        file_ids: Some(file_ids.iter().map(|f| f.to_string()).collect()),
        ..Default::default()
    };

    // NOTE: AssistantId derefs to &str.
    oac.assistants().update(assistant_id, modify_request).await?;

    Ok(())
}

// endregion:    -- Assistant CRUD

// region:       -- Files

pub async fn upload_file(oac: &OaClient, file: &Path) -> Result<FileId> {
    let file_obj = oac
        .files()
        .create(CreateFileRequest {
            file: file.into(),
            purpose: FILE_PURPOSE.into(),
        })
        .await?;

    debug!(file_id = %file_obj.id, bytes = file_obj.bytes, "file uploaded");

    Ok(file_obj.id.into())
}

// endregion:    -- Files

// region:       -- Threads, Messages, Runs

pub async fn create_thread(oac: &OaClient) -> Result<ThreadId> {
    let thread_obj = oac.threads().create(CreateThreadRequest::default()).await?;

    Ok(thread_obj.id.into())
}

pub async fn post_user_message(oac: &OaClient, thread_id: &ThreadId, msg: &str) -> Result<()> {
    oac.threads()
        .messages(thread_id)
        .create(create_user_message(msg))
        .await?;

    Ok(())
}

pub async fn create_run(
    oac: &OaClient,
    thread_id: &ThreadId,
    assistant_id: &AssistantId,
) -> Result<Run> {
    let run_request = CreateRunRequest {
        assistant_id: assistant_id.to_string(),
        ..Default::default()
    };
    let run_obj = oac.threads().runs(thread_id).create(run_request).await?;

    Ok(run_obj.into())
}

pub async fn retrieve_run(oac: &OaClient, thread_id: &ThreadId, run_id: &RunId) -> Result<Run> {
    let run_obj = oac.threads().runs(thread_id).retrieve(run_id).await?;

    Ok(run_obj.into())
}

pub async fn list_messages(oac: &OaClient, thread_id: &ThreadId) -> Result<Vec<Message>> {
    let messages = oac
        .threads()
        .messages(thread_id)
        .list(LIST_MESSAGES_QUERY)
        .await?;

    Ok(messages.data.into_iter().map(Message::from).collect())
}

impl From<RunObject> for Run {
    fn from(run_obj: RunObject) -> Self {
        Run {
            id: run_obj.id.into(),
            status: run_obj.status,
            last_error: run_obj.last_error.map(|e| e.message),
        }
    }
}

// endregion:    -- Threads, Messages, Runs

// region:       -- AssistantService for the OAI Client

impl AssistantService for OaClient {
    async fn create_assistant(&self, config: &CreateConfig) -> Result<AssistantId> {
        create(self, config).await
    }

    async fn attach_knowledge(&self, assistant_id: &AssistantId, file_ids: &[FileId]) -> Result<()> {
        attach_knowledge(self, assistant_id, file_ids).await
    }

    async fn upload_file(&self, file: &Path) -> Result<FileId> {
        upload_file(self, file).await
    }

    async fn create_thread(&self) -> Result<ThreadId> {
        create_thread(self).await
    }

    async fn create_user_message(&self, thread_id: &ThreadId, content: &str) -> Result<()> {
        post_user_message(self, thread_id, content).await
    }

    async fn create_run(&self, thread_id: &ThreadId, assistant_id: &AssistantId) -> Result<Run> {
        create_run(self, thread_id, assistant_id).await
    }

    async fn retrieve_run(&self, thread_id: &ThreadId, run_id: &RunId) -> Result<Run> {
        retrieve_run(self, thread_id, run_id).await
    }

    async fn list_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>> {
        list_messages(self, thread_id).await
    }
}

// endregion:    -- AssistantService for the OAI Client

// region:       -- Tests


// endregion:    -- Tests
