//! File-based Question History
//!
//! Appends one JSON object per line to `<base>/questions.jsonl`.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs::{self, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::interview::QuestionRecord;
use crate::ports::QuestionHistory;

const HISTORY_FILE: &str = "questions.jsonl";

#[derive(Debug, Clone)]
pub struct FileQuestionHistory {
    base_path: PathBuf,
    append_lock: Arc<Mutex<()>>,
}

impl FileQuestionHistory {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    fn history_path(&self) -> PathBuf {
        self.base_path.join(HISTORY_FILE)
    }
}

#[async_trait]
impl QuestionHistory for FileQuestionHistory {
    async fn record(&self, record: &QuestionRecord) -> Result<(), DomainError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| DomainError::database(format!("Failed to serialize question: {}", e)))?;
        line.push('\n');

        let _guard = self.append_lock.lock().await;
        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.history_path())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| DomainError::database(e.to_string()))?;
        file.flush()
            .await
            .map_err(|e| DomainError::database(e.to_string()))
    }

    async fn count(
        &self,
        user_id: &UserId,
        skill: &str,
        subtopic: &str,
    ) -> Result<u64, DomainError> {
        let contents = match fs::read_to_string(self.history_path()).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(DomainError::database(e.to_string())),
        };

        let mut count = 0;
        for (number, line) in contents.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let record: QuestionRecord = serde_json::from_str(line).map_err(|e| {
                DomainError::malformed(format!("Invalid question record: {}", e))
                    .with_detail("line", (number + 1).to_string())
            })?;
            if &record.user_id == user_id && record.is_about(skill, subtopic) {
                count += 1;
            }
        }
        Ok(count)
    }
}
