//! Quiz store persisted as a JSON file.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use quizzer_core::error::StoreError;
use quizzer_core::model::{default_quizzes, Quiz, QuizDraft, QuizId};
use quizzer_core::traits::QuizStore;

/// On-disk layout of the store file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreFile {
    /// Highest id ever assigned, so deleted ids are not handed out again.
    #[serde(default)]
    last_id: QuizId,
    #[serde(default)]
    quizzes: Vec<Quiz>,
}

impl StoreFile {
    fn position(&self, id: QuizId) -> Result<usize, StoreError> {
        self.quizzes
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))
    }

    fn push(&mut self, draft: QuizDraft) -> Quiz {
        self.last_id += 1;
        let now = Utc::now();
        let quiz = Quiz {
            id: self.last_id,
            question: draft.question,
            answer: draft.answer,
            created_at: now,
            updated_at: now,
        };
        self.quizzes.push(quiz.clone());
        quiz
    }
}

/// A [`QuizStore`] backed by a single JSON file.
///
/// The whole collection is kept in memory and the file is rewritten after
/// every change. A change only becomes visible once the write succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    state: Mutex<StoreFile>,
}

impl JsonFileStore {
    /// Open the store at `path`, creating it if it does not exist.
    ///
    /// A new store starts with the default quizzes when `seed_defaults` is
    /// set, and empty otherwise.
    pub async fn open(path: impl Into<PathBuf>, seed_defaults: bool) -> Result<Self> {
        let path = path.into();

        let state = match tokio::fs::read_to_string(&path).await {
            Ok(content) => {
                let mut file: StoreFile = serde_json::from_str(&content)
                    .with_context(|| format!("failed to parse quiz store: {}", path.display()))?;
                let max_id = file.quizzes.iter().map(|q| q.id).max().unwrap_or(0);
                file.last_id = file.last_id.max(max_id);
                tracing::debug!(path = %path.display(), count = file.quizzes.len(), "loaded quiz store");
                file
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                let mut file = StoreFile::default();
                if seed_defaults {
                    for draft in default_quizzes() {
                        file.push(draft);
                    }
                }
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    tokio::fs::create_dir_all(parent)
                        .await
                        .with_context(|| format!("failed to create {}", parent.display()))?;
                }
                write_file(&path, &file)
                    .await
                    .with_context(|| format!("failed to create quiz store: {}", path.display()))?;
                tracing::info!(path = %path.display(), "created new quiz store");
                file
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read quiz store: {}", path.display()))
            }
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    /// Apply `change` to a copy of the state, persist it, then commit.
    async fn modify<T>(
        &self,
        change: impl FnOnce(&mut StoreFile) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let mut state = self.state.lock().await;
        let mut next = state.clone();
        let value = change(&mut next)?;

        write_file(&self.path, &next).await.map_err(|e| {
            tracing::warn!(path = %self.path.display(), "failed to write quiz store: {e}");
            StoreError::Unavailable(format!("cannot write {}: {e}", self.path.display()))
        })?;

        *state = next;
        Ok(value)
    }
}

async fn write_file(path: &Path, file: &StoreFile) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(file).map_err(std::io::Error::other)?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, json).await?;
    tokio::fs::rename(&tmp, path).await
}

#[async_trait]
impl QuizStore for JsonFileStore {
    async fn list(&self) -> Result<Vec<Quiz>, StoreError> {
        Ok(self.state.lock().await.quizzes.clone())
    }

    async fn get(&self, id: QuizId) -> Result<Quiz, StoreError> {
        let state = self.state.lock().await;
        let index = state.position(id)?;
        Ok(state.quizzes[index].clone())
    }

    async fn create(&self, draft: QuizDraft) -> Result<Quiz, StoreError> {
        draft.validate()?;
        let quiz = self.modify(|file| Ok(file.push(draft))).await?;
        tracing::debug!(id = quiz.id, "created quiz");
        Ok(quiz)
    }

    async fn update(&self, id: QuizId, draft: QuizDraft) -> Result<Quiz, StoreError> {
        let quiz = self
            .modify(|file| {
                let index = file.position(id)?;
                draft.validate()?;
                let quiz = &mut file.quizzes[index];
                quiz.question = draft.question;
                quiz.answer = draft.answer;
                quiz.updated_at = Utc::now();
                Ok(quiz.clone())
            })
            .await?;
        tracing::debug!(id, "updated quiz");
        Ok(quiz)
    }

    async fn delete(&self, id: QuizId) -> Result<(), StoreError> {
        self.modify(|file| {
            let index = file.position(id)?;
            file.quizzes.remove(index);
            Ok(())
        })
        .await?;
        tracing::debug!(id, "deleted quiz");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn new_store_is_seeded_and_written() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");

        let store = JsonFileStore::open(&path, true).await.unwrap();
        let quizzes = store.list().await.unwrap();
        assert_eq!(quizzes.len(), 4);
        assert_eq!(quizzes[0].id, 1);
        assert_eq!(quizzes[0].question, "Capital of Italy");
        assert!(path.exists());
    }

    #[tokio::test]
    async fn new_store_without_seed_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("quizzes.json");

        let store = JsonFileStore::open(&path, false).await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        assert!(path.exists());
    }

    #[tokio::test]
    async fn changes_survive_reopening() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");

        {
            let store = JsonFileStore::open(&path, false).await.unwrap();
            store.create(QuizDraft::new("2+2", "4")).await.unwrap();
            store.create(QuizDraft::new("3+3", "6")).await.unwrap();
            store.update(2, QuizDraft::new("3+4", "7")).await.unwrap();
            store.delete(1).await.unwrap();
        }

        let store = JsonFileStore::open(&path, true).await.unwrap();
        let quizzes = store.list().await.unwrap();
        assert_eq!(quizzes.len(), 1);
        assert_eq!(quizzes[0].question, "3+4");

        // Deleted ids are not reused after a reload.
        store.delete(2).await.unwrap();
        let next = store.create(QuizDraft::new("q", "a")).await.unwrap();
        assert_eq!(next.id, 3);
    }

    #[tokio::test]
    async fn not_found_and_validation() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("q.json"), true)
            .await
            .unwrap();

        assert_eq!(store.get(77).await, Err(StoreError::NotFound(77)));
        assert_eq!(store.delete(77).await, Err(StoreError::NotFound(77)));
        assert_eq!(
            store.update(77, QuizDraft::new("q", "a")).await,
            Err(StoreError::NotFound(77))
        );
        assert!(matches!(
            store.create(QuizDraft::new("q", "")).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.update(1, QuizDraft::new("", "a")).await,
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.get(1).await.unwrap().answer, "Rome");
    }

    #[tokio::test]
    async fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");
        std::fs::write(&path, "not json").unwrap();

        let err = JsonFileStore::open(&path, true).await.unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse quiz store"));
    }

    #[tokio::test]
    async fn failed_write_leaves_state_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quizzes.json");
        let store = JsonFileStore::open(&path, true).await.unwrap();

        // Remove the directory so the temp file cannot be written.
        drop(dir);

        let err = store.create(QuizDraft::new("q", "a")).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert_eq!(store.list().await.unwrap().len(), 4);
    }
}
