mod embedded;
mod error;


use embedded::migrations;

pub use error::StoreError;

use tokio_postgres::{Client, NoTls, Row, Transaction};

use crate::models::Note;

/// Data access for notes.
///
/// Every public operation runs in its own transaction. The transaction is
/// committed on normal return and rolled back when it is dropped on an
/// error path, so the connection never carries an open transaction between
/// calls.
pub struct NoteStore {
    client: Client,
}

impl NoteStore {
    pub async fn connect(database_dsn: &str) -> Result<Self, StoreError> {
        let (client, con) = tokio_postgres::connect(database_dsn, NoTls).await?;

        tokio::spawn(async move {
            if let Err(e) = con.await {
                tracing::error!("connection error: {}", e);
            }
        });

        Ok(Self::from_client(client))
    }

    /// Wraps an already established session.
    pub const fn from_client(client: Client) -> Self {
        Self { client }
    }

    pub async fn migrate(&mut self) -> Result<(), StoreError> {
        let migrations_report = migrations::runner().run_async(&mut self.client).await?;

        for migration in migrations_report.applied_migrations() {
            tracing::info!(
                "Migration Applied -  Name: {}, Version: {}",
                migration.name(),
                migration.version()
            );
        }

        tracing::info!("DB migrations finished!");

        Ok(())
    }

    /// Inserts `note` as a new row and writes the assigned id back into it.
    ///
    /// Any id already present on `note` is ignored. A missing status fails
    /// with [`StoreError::Constraint`] and nothing is written.
    pub async fn save(&mut self, note: &mut Note) -> Result<bool, StoreError> {
        let tx = self.client.transaction().await?;

        let row = tx
            .query_one(
                "INSERT INTO notes (title, content, status, created_at) VALUES ($1, $2, $3, $4) RETURNING id",
                &[&note.title, &note.content, &note.status, &note.created_at],
            )
            .await?;

        tx.commit().await?;

        note.id = row.get("id");
        tracing::debug!("saved note {}", note.id);

        Ok(true)
    }

    /// All notes, most recently created first.
    pub async fn get_all_notes(&mut self) -> Result<Vec<Note>, StoreError> {
        let tx = self
            .client
            .build_transaction()
            .read_only(true)
            .start()
            .await?;

        let rows = tx
            .query(
                "SELECT id, title, content, status, created_at FROM notes ORDER BY created_at DESC, id DESC",
                &[],
            )
            .await?;

        tx.commit().await?;

        Ok(rows.iter().map(note_from_row).collect())
    }

    pub async fn get_note_by_id(&mut self, id: i64) -> Result<Option<Note>, StoreError> {
        let tx = self
            .client
            .build_transaction()
            .read_only(true)
            .start()
            .await?;

        let note = find_note(&tx, id).await?;

        tx.commit().await?;

        Ok(note)
    }

    /// Deletes the note with `id`, returning `false` when there is no such note.
    pub async fn delete_note(&mut self, id: i64) -> Result<bool, StoreError> {
        let tx = self.client.transaction().await?;

        if find_note(&tx, id).await?.is_none() {
            tx.commit().await?;
            tracing::debug!("delete skipped, note {} does not exist", id);
            return Ok(false);
        }

        tx.execute("DELETE FROM notes WHERE id = $1", &[&id]).await?;

        tx.commit().await?;
        tracing::debug!("deleted note {}", id);

        Ok(true)
    }

    /// Overwrites the row identified by `note.id` with the note's fields.
    ///
    /// Returns `false` without writing anything when the row does not exist;
    /// an update never inserts.
    pub async fn update_note(&mut self, note: &Note) -> Result<bool, StoreError> {
        let tx = self.client.transaction().await?;

        if find_note(&tx, note.id).await?.is_none() {
            tx.commit().await?;
            tracing::debug!("update skipped, note {} does not exist", note.id);
            return Ok(false);
        }

        tx.execute(
            "UPDATE notes SET title = $1, content = $2, status = $3, created_at = $4 WHERE id = $5",
            &[
                &note.title,
                &note.content,
                &note.status,
                &note.created_at,
                &note.id,
            ],
        )
        .await?;

        tx.commit().await?;
        tracing::debug!("updated note {}", note.id);

        Ok(true)
    }
}

async fn find_note(tx: &Transaction<'_>, id: i64) -> Result<Option<Note>, tokio_postgres::Error> {
    let row = tx
        .query_opt(
            "SELECT id, title, content, status, created_at FROM notes WHERE id = $1",
            &[&id],
        )
        .await?;

    Ok(row.as_ref().map(note_from_row))
}

fn note_from_row(row: &Row) -> Note {
    Note {
        id: row.get("id"),
        title: row.get::<_, Option<String>>("title").unwrap_or_default(),
        content: row.get::<_, Option<String>>("content").unwrap_or_default(),
        status: row.get("status"),
        created_at: row.get("created_at"),
    }
}
