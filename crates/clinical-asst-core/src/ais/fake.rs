//! Scripted in-memory `AssistantService` for tests.
//!
//! Runs start `queued`; each `retrieve_run` plays the next status from the script and
//! repeats the last one once the script runs out. When a run reaches `completed`, the fake
//! appends one assistant reply to the run's thread.

use crate::ais::types::{AssistantId, CreateConfig, FileId, Message, Role, Run, RunId, ThreadId};
use crate::ais::AssistantService;
use crate::Result;
use async_openai::types::RunStatus;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

pub(crate) const FAKE_REPLY: &str = "Fluoroquinolones such as ciprofloxacin are indicated.";

#[derive(Debug, Clone)]
pub(crate) struct FakeAssistant {
    pub id: AssistantId,
    pub config: CreateConfig,
    pub file_ids: Vec<FileId>,
    pub tools_attached: bool,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeUpload {
    pub path: PathBuf,
    pub content: String,
}

#[derive(Debug, Clone)]
pub(crate) struct FakeRun {
    pub thread_id: ThreadId,
    pub assistant_id: AssistantId,
    /// Every status this run reported, starting with the one from creation.
    pub statuses: Vec<RunStatus>,
    pub replied: bool,
}

#[derive(Debug, Default)]
struct FakeState {
    script: VecDeque<RunStatus>,
    last_scripted: Option<RunStatus>,
    assistants: Vec<FakeAssistant>,
    uploads: Vec<FakeUpload>,
    threads: HashMap<ThreadId, Vec<Message>>,
    runs: HashMap<String, FakeRun>,
    retrieve_calls: usize,
    clock: i64,
    counters: HashMap<&'static str, u32>,
}

impl FakeState {
    fn next_id(&mut self, prefix: &'static str) -> String {
        let n = self.counters.entry(prefix).or_default();
        *n += 1;
        format!("{prefix}_{n}")
    }

    fn tick(&mut self) -> i64 {
        self.clock += 1;
        self.clock
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    pub fn with_statuses(statuses: impl IntoIterator<Item = RunStatus>) -> Self {
        let fake = Self::default();
        fake.lock().script = statuses.into_iter().collect();
        fake
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, FakeState> {
        self.state.lock().expect("fake state poisoned")
    }

    pub fn retrieve_calls(&self) -> usize {
        self.lock().retrieve_calls
    }

    pub fn assistants(&self) -> Vec<FakeAssistant> {
        self.lock().assistants.clone()
    }

    pub fn uploads(&self) -> Vec<FakeUpload> {
        self.lock().uploads.clone()
    }

    pub fn runs(&self) -> Vec<FakeRun> {
        self.lock().runs.values().cloned().collect()
    }

    pub fn thread_count(&self) -> usize {
        self.lock().threads.len()
    }
}

impl AssistantService for FakeService {
    async fn create_assistant(&self, config: &CreateConfig) -> Result<AssistantId> {
        let mut state = self.lock();
        let id = AssistantId::from(state.next_id("asst"));
        state.assistants.push(FakeAssistant {
            id: id.clone(),
            config: config.clone(),
            file_ids: Vec::new(),
            tools_attached: false,
        });
        Ok(id)
    }

    async fn attach_knowledge(&self, assistant_id: &AssistantId, file_ids: &[FileId]) -> Result<()> {
        let mut state = self.lock();
        if let Some(asst) = state.assistants.iter_mut().find(|a| &a.id == assistant_id) {
            asst.file_ids = file_ids.to_vec();
            asst.tools_attached = true;
        }
        Ok(())
    }

    async fn upload_file(&self, file: &Path) -> Result<FileId> {
        let content = std::fs::read_to_string(file)?;
        let mut state = self.lock();
        let id = FileId::from(state.next_id("file"));
        state.uploads.push(FakeUpload {
            path: file.to_path_buf(),
            content,
        });
        Ok(id)
    }

    async fn create_thread(&self) -> Result<ThreadId> {
        let mut state = self.lock();
        let id = ThreadId::from(state.next_id("thread"));
        state.threads.insert(id.clone(), Vec::new());
        Ok(id)
    }

    async fn create_user_message(&self, thread_id: &ThreadId, content: &str) -> Result<()> {
        let mut state = self.lock();
        let created_at = state.tick();
        state.threads.entry(thread_id.clone()).or_default().push(Message {
            role: Role::User,
            text: content.to_string(),
            created_at,
        });
        Ok(())
    }

    async fn create_run(&self, thread_id: &ThreadId, assistant_id: &AssistantId) -> Result<Run> {
        let mut state = self.lock();
        let id = state.next_id("run");
        state.runs.insert(
            id.clone(),
            FakeRun {
                thread_id: thread_id.clone(),
                assistant_id: assistant_id.clone(),
                statuses: vec![RunStatus::Queued],
                replied: false,
            },
        );
        Ok(Run {
            id: RunId::from(id),
            status: RunStatus::Queued,
            last_error: None,
        })
    }

    async fn retrieve_run(&self, _thread_id: &ThreadId, run_id: &RunId) -> Result<Run> {
        let mut state = self.lock();
        state.retrieve_calls += 1;

        let next = state.script.pop_front();
        let status = match next {
            Some(status) => {
                state.last_scripted = Some(status.clone());
                status
            }
            None => state.last_scripted.clone().unwrap_or(RunStatus::InProgress),
        };

        let created_at = state.tick();
        let mut reply_to = None;
        if let Some(run) = state.runs.get_mut(run_id.as_str()) {
            run.statuses.push(status.clone());
            if status == RunStatus::Completed && !run.replied {
                run.replied = true;
                reply_to = Some(run.thread_id.clone());
            }
        }
        if let Some(thread_id) = reply_to {
            state.threads.entry(thread_id).or_default().push(Message {
                role: Role::Assistant,
                text: FAKE_REPLY.to_string(),
                created_at,
            });
        }

        let last_error = (status == RunStatus::Failed).then(|| "server_error".to_string());
        Ok(Run {
            id: run_id.clone(),
            status,
            last_error,
        })
    }

    async fn list_messages(&self, thread_id: &ThreadId) -> Result<Vec<Message>> {
        Ok(self.lock().threads.get(thread_id).cloned().unwrap_or_default())
    }
}
