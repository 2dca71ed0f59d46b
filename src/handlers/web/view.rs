use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use crate::dto::NoteResponse;

const EMPTY_LIST: &str = "No notes yet.";

const ADD_FORM: &str = r#"<form method="post" action="/add">
<input name="noteTitle" placeholder="Title">
<input name="noteContent" placeholder="Content">
<input name="noteStatus" placeholder="Status">
<button type="submit">Add note</button>
</form>"#;

fn render_note(note: &NoteResponse) -> String {
    format!(
        r#"<li>
<h2>{title}</h2>
<p>{content}</p>
<p>Status: {status} | Created: {created}</p>
<form method="post" action="/update">
<input type="hidden" name="noteId" value="{id}">
<input name="noteTitle" value="{title_attr}">
<input name="noteContent" value="{content_attr}">
<input name="noteStatus" value="{status_attr}">
<button type="submit">Update</button>
</form>
<a href="/delete?noteId={id}">Delete</a>
</li>"#,
        id = note.id,
        title = text(&note.title),
        content = text(&note.content),
        status = text(&note.status),
        created = note.created_at.format("%Y-%m-%d %H:%M:%S"),
        title_attr = attr(&note.title),
        content_attr = attr(&note.content),
        status_attr = attr(&note.status),
    )
}

/// Renders the note list page, newest note first as given.
pub fn render_index(notes: &[NoteResponse], error: Option<&str>) -> String {
    let error = error
        .map(|message| format!(r#"<p class="error">{}</p>"#, text(message)))
        .unwrap_or_default();

    let list = if notes.is_empty() {
        format!("<p>{EMPTY_LIST}</p>")
    } else {
        let items: String = notes.iter().map(render_note).collect();
        format!("<ul>{items}</ul>")
    };

    format!(
        "<!DOCTYPE html>\n<html>\n<head><title>Keep Note</title></head>\n<body>\n<h1>Keep Note</h1>\n{error}\n{ADD_FORM}\n{list}\n</body>\n</html>\n"
    )
}
