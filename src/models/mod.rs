use chrono::{DateTime, Utc};

/// A single user note as persisted in the `notes` table.
///
/// `status` is optional here so that a missing value can reach the store;
/// the schema rejects it with a NOT NULL violation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub status: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Note {
    pub const fn new(
        id: i64,
        title: String,
        content: String,
        status: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            title,
            content,
            status,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn default_note_is_empty() {
        let note = Note::default();

        assert_eq!(note.id, 0);
        assert!(note.title.is_empty());
        assert!(note.content.is_empty());
        assert_eq!(note.status, None);
        assert_eq!(note.created_at, DateTime::<Utc>::UNIX_EPOCH);
    }

    #[test]
    fn new_sets_every_field() {
        let at = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
        let note = Note::new(
            7,
            "Groceries".to_string(),
            "milk, eggs".to_string(),
            Some("open".to_string()),
            at,
        );

        assert_eq!(note.id, 7);
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "milk, eggs");
        assert_eq!(note.status.as_deref(), Some("open"));
        assert_eq!(note.created_at, at);
    }
}
