use chrono::{DateTime, SubsecRound, Utc};

use crate::{
    dto::{CreateNoteRequest, NoteResponse, UpdateNoteRequest},
    models::Note,
    repository::{NoteStore, StoreError},
};

use std::sync::Arc;

/// Current time at the precision PostgreSQL stores, so a returned note
/// matches what a later read gives back.
fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Request-facing access to the shared store.
///
/// Each call holds the store lock for exactly one store operation; the guard
/// is released when the call returns, on success or failure.
#[derive(Clone)]
pub struct NoteService {
    store: Arc<tokio::sync::Mutex<NoteStore>>,
}

impl NoteService {
    pub const fn new(store: Arc<tokio::sync::Mutex<NoteStore>>) -> Self {
        Self { store }
    }

    pub async fn create_note(&self, request: CreateNoteRequest) -> Result<NoteResponse, StoreError> {
        let mut note = Note::new(
            0,
            request.title,
            request.content,
            Some(request.status),
            now(),
        );

        self.store.lock().await.save(&mut note).await?;

        Ok(note.into())
    }

    /// Rewrites the note with `id`. `created_at` is stamped with the current
    /// time, so an updated note moves to the top of the list.
    pub async fn update_note(
        &self,
        id: i64,
        request: UpdateNoteRequest,
    ) -> Result<Option<NoteResponse>, StoreError> {
        let note = Note::new(
            id,
            request.title,
            request.content,
            Some(request.status),
            now(),
        );

        let updated = self.store.lock().await.update_note(&note).await?;

        Ok(updated.then(|| note.into()))
    }

    pub async fn delete_note(&self, id: i64) -> Result<bool, StoreError> {
        self.store.lock().await.delete_note(id).await
    }

    pub async fn get_one_note(&self, id: i64) -> Result<Option<NoteResponse>, StoreError> {
        self.store
            .lock()
            .await
            .get_note_by_id(id)
            .await
            .map(|note| note.map(NoteResponse::from))
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteResponse>, StoreError> {
        self.store
            .lock()
            .await
            .get_all_notes()
            .await
            .map(|notes| notes.into_iter().map(NoteResponse::from).collect())
    }
}
