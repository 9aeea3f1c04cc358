//! Minimal log-line templates over a [`Commit`].
//!
//! `{author.name}` style placeholders are substituted, `{{`/`}}` produce
//! literal braces, and `\n`, `\t`, `\\` are expanded so a template passed on
//! the command line can carry line breaks.

use crate::error::{ChurnlogError, Result};
use crate::model::{Commit, Person};

pub const DEFAULT_TEMPLATE: &str = "{author.timestamp},{author.name},{change_set.num_files_changed},{change_set.lines_added},{change_set.lines_removed}\\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Author,
    Committer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Hash,
    Message,
    Tree,
    Parents,
    IsMerge,
    PersonName(Role),
    PersonEmail(Role),
    PersonTimezone(Role),
    PersonTimestamp(Role),
    NumFilesChanged,
    LinesAdded,
    LinesRemoved,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Field(Field),
}

#[derive(Debug, Clone)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    pub fn parse(source: &str) -> Result<Self> {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut chars = source.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    let mut closed = false;
                    for c in chars.by_ref() {
                        if c == '}' {
                            closed = true;
                            break;
                        }
                        name.push(c);
                    }
                    if !closed {
                        return Err(ChurnlogError::Template(format!(
                            "unterminated placeholder '{{{name}'"
                        )));
                    }
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Field(lookup(name.trim())?));
                }
                '}' => {
                    return Err(ChurnlogError::Template("unmatched '}'".to_string()));
                }
                '\\' => match chars.next() {
                    Some('n') => literal.push('\n'),
                    Some('t') => literal.push('\t'),
                    Some('\\') => literal.push('\\'),
                    Some(other) => {
                        literal.push('\\');
                        literal.push(other);
                    }
                    None => literal.push('\\'),
                },
                _ => literal.push(c),
            }
        }
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }

        Ok(Self { segments })
    }

    pub fn render(&self, commit: &Commit) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => out.push_str(&value(*field, commit)),
            }
        }
        out
    }
}

fn lookup(name: &str) -> Result<Field> {
    let field = match name {
        "hash" => Field::Hash,
        "message" => Field::Message,
        "tree" => Field::Tree,
        "parents" => Field::Parents,
        "is_merge" | "change_set.is_merge" => Field::IsMerge,
        "change_set.num_files_changed" => Field::NumFilesChanged,
        "change_set.lines_added" => Field::LinesAdded,
        "change_set.lines_removed" => Field::LinesRemoved,
        _ => {
            let (role, attr) = match name.split_once('.') {
                Some(("author", attr)) => (Role::Author, attr),
                Some(("committer", attr)) => (Role::Committer, attr),
                _ => return Err(unknown(name)),
            };
            match attr {
                "name" => Field::PersonName(role),
                "email" => Field::PersonEmail(role),
                "timezone" => Field::PersonTimezone(role),
                "timestamp" => Field::PersonTimestamp(role),
                _ => return Err(unknown(name)),
            }
        }
    };
    Ok(field)
}

fn unknown(name: &str) -> ChurnlogError {
    ChurnlogError::Template(format!("unknown field '{name}'"))
}

fn person(commit: &Commit, role: Role) -> &Person {
    match role {
        Role::Author => &commit.author,
        Role::Committer => &commit.committer,
    }
}

fn value(field: Field, commit: &Commit) -> String {
    match field {
        Field::Hash => commit.hash.clone(),
        Field::Message => commit.message.clone(),
        Field::Tree => commit.tree.clone(),
        Field::Parents => commit.parent_hashes.join(" "),
        Field::IsMerge => commit.change_set.is_merge.to_string(),
        Field::PersonName(role) => person(commit, role).name.clone(),
        Field::PersonEmail(role) => person(commit, role).email.clone(),
        Field::PersonTimezone(role) => person(commit, role).timezone.clone(),
        Field::PersonTimestamp(role) => person(commit, role).timestamp.to_rfc3339(),
        Field::NumFilesChanged => commit.change_set.num_files_changed.to_string(),
        Field::LinesAdded => commit.change_set.lines_added.to_string(),
        Field::LinesRemoved => commit.change_set.lines_removed.to_string(),
    }
}
