//! In-memory quiz store.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::StoreError;
use crate::model::{Quiz, QuizDraft, QuizId};
use crate::traits::QuizStore;

/// A [`QuizStore`] that keeps everything in memory.
///
/// Ids start at 1 and are never reused. Used by `--memory` sessions and by
/// tests, which can also make the store fail on demand.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    quizzes: Vec<Quiz>,
    last_id: QuizId,
    unavailable: Option<String>,
}

impl Inner {
    fn check(&self) -> Result<(), StoreError> {
        match &self.unavailable {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn position(&self, id: QuizId) -> Result<usize, StoreError> {
        self.quizzes
            .iter()
            .position(|q| q.id == id)
            .ok_or(StoreError::NotFound(id))
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-loaded with `drafts`, assigned ids 1, 2, ...
    ///
    /// Drafts are inserted as given, without validation.
    pub fn with_drafts(drafts: impl IntoIterator<Item = QuizDraft>) -> Self {
        let store = Self::new();
        {
            let mut inner = store.lock();
            for draft in drafts {
                inner.last_id += 1;
                let now = Utc::now();
                let quiz = Quiz {
                    id: inner.last_id,
                    question: draft.question,
                    answer: draft.answer,
                    created_at: now,
                    updated_at: now,
                };
                inner.quizzes.push(quiz);
            }
        }
        store
    }

    /// Make every following call fail with `reason`, or succeed again with
    /// `None`.
    pub fn set_unavailable(&self, reason: Option<&str>) {
        self.lock().unavailable = reason.map(str::to_string);
    }

    /// Number of stored quizzes.
    pub fn len(&self) -> usize {
        self.lock().quizzes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // A poisoned lock only means a panic elsewhere; the data is still consistent.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list(&self) -> Result<Vec<Quiz>, StoreError> {
        let inner = self.lock();
        inner.check()?;
        Ok(inner.quizzes.clone())
    }

    async fn get(&self, id: QuizId) -> Result<Quiz, StoreError> {
        let inner = self.lock();
        inner.check()?;
        let index = inner.position(id)?;
        Ok(inner.quizzes[index].clone())
    }

    async fn create(&self, draft: QuizDraft) -> Result<Quiz, StoreError> {
        let mut inner = self.lock();
        inner.check()?;
        draft.validate()?;

        inner.last_id += 1;
        let now = Utc::now();
        let quiz = Quiz {
            id: inner.last_id,
            question: draft.question,
            answer: draft.answer,
            created_at: now,
            updated_at: now,
        };
        inner.quizzes.push(quiz.clone());
        tracing::debug!(id = quiz.id, "created quiz");
        Ok(quiz)
    }

    async fn update(&self, id: QuizId, draft: QuizDraft) -> Result<Quiz, StoreError> {
        let mut inner = self.lock();
        inner.check()?;
        let index = inner.position(id)?;
        draft.validate()?;

        let quiz = &mut inner.quizzes[index];
        quiz.question = draft.question;
        quiz.answer = draft.answer;
        quiz.updated_at = Utc::now();
        tracing::debug!(id, "updated quiz");
        Ok(quiz.clone())
    }

    async fn delete(&self, id: QuizId) -> Result<(), StoreError> {
        let mut inner = self.lock();
        inner.check()?;
        let index = inner.position(id)?;
        inner.quizzes.remove(index);
        tracing::debug!(id, "deleted quiz");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn crud_lifecycle() {
        let store = MemoryStore::new();
        let created = store.create(QuizDraft::new("2+2", "4")).await.unwrap();
        assert_eq!(created.id, 1);
        assert_eq!(store.get(1).await.unwrap().answer, "4");

        let updated = store.update(1, QuizDraft::new("2+3", "5")).await.unwrap();
        assert_eq!(updated.question, "2+3");
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(updated.created_at, created.created_at);

        store.delete(1).await.unwrap();
        assert_eq!(store.get(1).await, Err(StoreError::NotFound(1)));
        assert_eq!(store.delete(1).await, Err(StoreError::NotFound(1)));
    }

    #[tokio::test]
    async fn ids_are_not_reused() {
        let store = MemoryStore::with_drafts(vec![QuizDraft::new("a", "b")]);
        store.delete(1).await.unwrap();
        let next = store.create(QuizDraft::new("c", "d")).await.unwrap();
        assert_eq!(next.id, 2);
    }

    #[tokio::test]
    async fn list_keeps_insertion_order() {
        let store = MemoryStore::with_drafts(vec![
            QuizDraft::new("first", "1"),
            QuizDraft::new("second", "2"),
        ]);
        let questions: Vec<_> = store
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|q| q.question)
            .collect();
        assert_eq!(questions, ["first", "second"]);
    }

    #[tokio::test]
    async fn rejects_empty_content() {
        let store = MemoryStore::with_drafts(vec![QuizDraft::new("a", "b")]);
        assert!(matches!(
            store.create(QuizDraft::new("", "x")).await,
            Err(StoreError::Validation(_))
        ));
        assert!(matches!(
            store.update(1, QuizDraft::new("q", " ")).await,
            Err(StoreError::Validation(_))
        ));
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(1).await.unwrap().answer, "b");
    }

    #[tokio::test]
    async fn update_missing_id_is_not_found() {
        let store = MemoryStore::new();
        assert_eq!(
            store.update(5, QuizDraft::new("q", "a")).await,
            Err(StoreError::NotFound(5))
        );
    }

    #[tokio::test]
    async fn unavailable_store_fails_every_call() {
        let store = MemoryStore::with_drafts(vec![QuizDraft::new("a", "b")]);
        store.set_unavailable(Some("disk on fire"));
        assert_eq!(
            store.list().await,
            Err(StoreError::Unavailable("disk on fire".into()))
        );
        assert!(store.get(1).await.is_err());

        store.set_unavailable(None);
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
