use chrono::{DateTime, Utc};
use serde::{de::IgnoredAny, Deserialize, Serialize};

pub const TITLE_MAX_LEN: usize = 200;
pub const AUTHOR_MAX_LEN: usize = 100;
pub const SUMMARY_MAX_LEN: usize = 500;

/// A stored blog post, serialized with camelCase keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub author: String,
    pub summary: Option<String>,
    pub created_date: DateTime<Utc>,
    pub updated_date: Option<DateTime<Utc>>,
    pub is_published: bool,
}

/// A record ready for insertion. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: String,
    pub content: String,
    pub author: String,
    pub summary: Option<String>,
    pub created_date: DateTime<Utc>,
    pub is_published: bool,
}

/// Replacement values for every mutable field of a stored post.
#[derive(Debug, Clone)]
pub struct PostChanges {
    pub title: String,
    pub content: String,
    pub author: String,
    pub summary: Option<String>,
    pub is_published: bool,
    pub updated_date: DateTime<Utc>,
}

/// Caller-supplied fields for create and update.
///
/// Server-assigned fields are accepted on the wire so clients can send back a
/// post they received, but their values are discarded. Any other unknown
/// field fails deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PostDraft {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default = "published_by_default")]
    pub is_published: bool,

    #[serde(default, rename = "id")]
    _id: Option<IgnoredAny>,
    #[serde(default, rename = "createdDate")]
    _created_date: Option<IgnoredAny>,
    #[serde(default, rename = "updatedDate")]
    _updated_date: Option<IgnoredAny>,
}

fn published_by_default() -> bool {
    true
}

impl PostDraft {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        author: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            author: author.into(),
            summary: None,
            is_published: true,
            _id: None,
            _created_date: None,
            _updated_date: None,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn published(mut self, is_published: bool) -> Self {
        self.is_published = is_published;
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.content,
            &self.author,
            self.summary.as_deref(),
        )
    }

    pub fn into_new_post(self, created_date: DateTime<Utc>) -> NewPost {
        NewPost {
            title: self.title,
            content: self.content,
            author: self.author,
            summary: self.summary,
            created_date,
            is_published: self.is_published,
        }
    }

    pub fn into_changes(self, updated_date: DateTime<Utc>) -> PostChanges {
        PostChanges {
            title: self.title,
            content: self.content,
            author: self.author,
            summary: self.summary,
            is_published: self.is_published,
            updated_date,
        }
    }
}

impl NewPost {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.content,
            &self.author,
            self.summary.as_deref(),
        )
    }
}

impl PostChanges {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_fields(
            &self.title,
            &self.content,
            &self.author,
            self.summary.as_deref(),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{0} must not contain NUL characters")]
    NulCharacter(&'static str),
}

/// Checks the column constraints shared by drafts and stored records.
///
/// Lengths are counted in chars, matching `VARCHAR(n)` in Postgres. Postgres
/// text cannot hold U+0000, so no backend accepts it.
pub fn validate_fields(
    title: &str,
    content: &str,
    author: &str,
    summary: Option<&str>,
) -> Result<(), ValidationError> {
    no_nul("title", title)?;
    no_nul("content", content)?;
    no_nul("author", author)?;
    if let Some(summary) = summary {
        no_nul("summary", summary)?;
    }
    required("title", title)?;
    max_len("title", title, TITLE_MAX_LEN)?;
    required("content", content)?;
    required("author", author)?;
    max_len("author", author, AUTHOR_MAX_LEN)?;
    if let Some(summary) = summary {
        max_len("summary", summary, SUMMARY_MAX_LEN)?;
    }
    Ok(())
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn no_nul(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.contains('\0') {
        return Err(ValidationError::NulCharacter(field));
    }
    Ok(())
}

fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ValidationError> {
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

/// Selects records for `PostStore::find_all`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PostFilter {
    pub published: Option<bool>,
}

impl PostFilter {
    pub fn all() -> Self {
        Self { published: None }
    }

    pub fn published() -> Self {
        Self {
            published: Some(true),
        }
    }

    pub fn matches(&self, post: &BlogPost) -> bool {
        self.published.map_or(true, |p| post.is_published == p)
    }
}
