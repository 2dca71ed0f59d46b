use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::Note;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NoteResponse {
    /// Note ID
    pub id: i64,
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Note status
    pub status: String,
    /// Creation time, refreshed on every update
    pub created_at: DateTime<Utc>,
}

impl From<Note> for NoteResponse {
    fn from(note: Note) -> Self {
        Self {
            id: note.id,
            title: note.title,
            content: note.content,
            status: note.status.unwrap_or_default(),
            created_at: note.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Note status
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UpdateNoteRequest {
    /// Note title
    pub title: String,
    /// Note content
    pub content: String,
    /// Note status
    pub status: String,
}

/// Fields submitted by the add-note form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteForm {
    pub note_title: String,
    pub note_content: String,
    pub note_status: String,
}

/// Fields submitted by the edit-note form.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateNoteForm {
    pub note_id: i64,
    pub note_title: String,
    pub note_content: String,
    pub note_status: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteNoteParams {
    pub note_id: i64,
}

/// Returns the name of the first required field that is blank.
fn first_blank(title: &str, content: &str, status: &str) -> Option<&'static str> {
    [("title", title), ("content", content), ("status", status)]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
}

impl CreateNoteRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_blank(&self.title, &self.content, &self.status)
    }
}

impl UpdateNoteRequest {
    pub fn missing_field(&self) -> Option<&'static str> {
        first_blank(&self.title, &self.content, &self.status)
    }
}

impl From<NoteForm> for CreateNoteRequest {
    fn from(form: NoteForm) -> Self {
        Self {
            title: form.note_title,
            content: form.note_content,
            status: form.note_status,
        }
    }
}

impl From<UpdateNoteForm> for UpdateNoteRequest {
    fn from(form: UpdateNoteForm) -> Self {
        Self {
            title: form.note_title,
            content: form.note_content,
            status: form.note_status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(title: &str, content: &str, status: &str) -> CreateNoteRequest {
        CreateNoteRequest {
            title: title.to_string(),
            content: content.to_string(),
            status: status.to_string(),
        }
    }

    #[test]
    fn complete_request_has_no_missing_field() {
        assert_eq!(request("A", "x", "open").missing_field(), None);
    }

    #[test]
    fn first_blank_field_is_reported() {
        assert_eq!(request("", "", "").missing_field(), Some("title"));
        assert_eq!(request("A", "  ", "open").missing_field(), Some("content"));
        assert_eq!(request("A", "x", "").missing_field(), Some("status"));
    }

    #[test]
    fn form_field_names_are_camel_case() {
        let form: UpdateNoteForm = serde_json::from_value(serde_json::json!({
            "noteId": 3,
            "noteTitle": "A",
            "noteContent": "x",
            "noteStatus": "done",
        }))
        .unwrap();

        let request = UpdateNoteRequest::from(form.clone());

        assert_eq!(form.note_id, 3);
        assert_eq!(request.title, "A");
        assert_eq!(request.status, "done");
    }

    #[test]
    fn response_from_note_keeps_fields() {
        let note = Note::new(
            5,
            "B".to_string(),
            "y".to_string(),
            Some("done".to_string()),
            DateTime::<Utc>::UNIX_EPOCH,
        );

        let response = NoteResponse::from(note);

        assert_eq!(response.id, 5);
        assert_eq!(response.status, "done");
        assert_eq!(
            serde_json::to_value(&response).unwrap()["created_at"],
            "1970-01-01T00:00:00Z"
        );
    }
}
