// NOTE: The knowledge artifact is the local dataset file the assistant answers from.
// One path, overwritten on every run, uploaded once per run.
use crate::ais::{AssistantService, FileId};
use crate::openfda::DrugRecords;
use crate::Result;
use simple_fs::{ensure_dir, save_json};
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_DATASET_FILE: &str = "data/dataset.json";

#[derive(Debug, Clone)]
pub struct KnowledgeArtifact {
    pub path: PathBuf,
    pub file_id: FileId,
}

/// Writes `records` as JSON to `file`, replacing whatever was there.
pub fn write_dataset(file: &Path, records: &DrugRecords) -> Result<()> {
    if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
        ensure_dir(dir)?;
    }
    save_json(file, records)?;

    Ok(())
}

/// Writes the dataset file, then uploads it to the assistant service.
pub async fn package<S: AssistantService>(
    service: &S,
    records: &DrugRecords,
    file: impl AsRef<Path>,
) -> Result<KnowledgeArtifact> {
    let file = file.as_ref();

    write_dataset(file, records)?;
    info!(file = %file.display(), results = records.result_count(), "dataset written");

    let file_id = service.upload_file(file).await?;
    info!(%file_id, "dataset uploaded");

    Ok(KnowledgeArtifact {
        path: file.to_path_buf(),
        file_id,
    })
}

// region:       -- Tests


// endregion:    -- Tests
