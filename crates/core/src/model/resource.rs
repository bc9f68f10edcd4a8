use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

use super::ids::ResourceId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResourceError {
    #[error("resource title cannot be empty")]
    EmptyTitle,

    #[error("resource URL must be a valid http(s) URL")]
    InvalidUrl,
}

//
// ─── ENUMS ─────────────────────────────────────────────────────────────────────
//

/// What kind of learning material a resource is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Book,
    Podcast,
    Video,
    App,
    Website,
    Course,
    #[default]
    Other,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 7] = [
        ResourceKind::Book,
        ResourceKind::Podcast,
        ResourceKind::Video,
        ResourceKind::App,
        ResourceKind::Website,
        ResourceKind::Course,
        ResourceKind::Other,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Book => "Book",
            ResourceKind::Podcast => "Podcast",
            ResourceKind::Video => "Video",
            ResourceKind::App => "App",
            ResourceKind::Website => "Website",
            ResourceKind::Course => "Course",
            ResourceKind::Other => "Other",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|k| k.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Where a resource sits in the user's pipeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    OnHold,
}

impl ResourceStatus {
    pub const ALL: [ResourceStatus; 4] = [
        ResourceStatus::Planned,
        ResourceStatus::InProgress,
        ResourceStatus::Completed,
        ResourceStatus::OnHold,
    ];

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ResourceStatus::Planned => "Planned",
            ResourceStatus::InProgress => "In progress",
            ResourceStatus::Completed => "Completed",
            ResourceStatus::OnHold => "On hold",
        }
    }

    #[must_use]
    pub fn from_label(label: &str) -> Self {
        Self::ALL
            .into_iter()
            .find(|s| s.label().eq_ignore_ascii_case(label.trim()))
            .unwrap_or_default()
    }
}

impl fmt::Display for ResourceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//
// ─── RESOURCE ──────────────────────────────────────────────────────────────────
//

/// One entry in the learning-material library.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Resource {
    id: ResourceId,
    title: String,
    kind: ResourceKind,
    url: Option<String>,
    status: ResourceStatus,
    notes: String,
    tags: Vec<String>,
}

/// Editable field set for creating or updating a resource.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceDraft {
    pub title: String,
    pub kind: ResourceKind,
    pub url: String,
    pub status: ResourceStatus,
    pub notes: String,
    pub tags: Vec<String>,
}

impl ResourceDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the draft into a `Resource` under the given id.
    ///
    /// The title must be non-empty after trimming; a non-empty URL must
    /// parse as http or https. Tags are trimmed and blanks dropped.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` on an empty title or malformed URL.
    pub fn validate(self, id: ResourceId) -> Result<Resource, ResourceError> {
        let title = self.title.trim().to_string();
        if title.is_empty() {
            return Err(ResourceError::EmptyTitle);
        }

        let url = normalize_url(&self.url)?;

        let tags = self
            .tags
            .into_iter()
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect();

        Ok(Resource {
            id,
            title,
            kind: self.kind,
            url,
            status: self.status,
            notes: self.notes,
            tags,
        })
    }
}

fn normalize_url(raw: &str) -> Result<Option<String>, ResourceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let parsed = Url::parse(trimmed).map_err(|_| ResourceError::InvalidUrl)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ResourceError::InvalidUrl);
    }
    Ok(Some(trimmed.to_string()))
}

impl Resource {
    /// Rebuilds a resource from persisted fields.
    ///
    /// # Errors
    ///
    /// Returns `ResourceError` if the persisted fields fail validation.
    pub fn from_persisted(
        id: ResourceId,
        title: String,
        kind: ResourceKind,
        url: Option<String>,
        status: ResourceStatus,
        notes: String,
        tags: Vec<String>,
    ) -> Result<Self, ResourceError> {
        ResourceDraft {
            title,
            kind,
            url: url.unwrap_or_default(),
            status,
            notes,
            tags,
        }
        .validate(id)
    }

    #[must_use]
    pub fn id(&self) -> ResourceId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> ResourceStatus {
        self.status
    }

    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// A draft pre-filled with this resource's fields, for edit forms.
    #[must_use]
    pub fn to_draft(&self) -> ResourceDraft {
        ResourceDraft {
            title: self.title.clone(),
            kind: self.kind,
            url: self.url.clone().unwrap_or_default(),
            status: self.status,
            notes: self.notes.clone(),
            tags: self.tags.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(title: &str, url: &str) -> ResourceDraft {
        ResourceDraft {
            title: title.into(),
            url: url.into(),
            ..ResourceDraft::default()
        }
    }

    #[test]
    fn validate_requires_title() {
        let err = draft("   ", "").validate(ResourceId::generate()).unwrap_err();
        assert_eq!(err, ResourceError::EmptyTitle);
    }

    #[test]
    fn validate_accepts_http_and_https_only() {
        let id = ResourceId::generate();
        assert!(draft("Tae Kim", "http://guidetojapanese.org").validate(id).is_ok());
        assert!(draft("Tae Kim", "https://guidetojapanese.org").validate(id).is_ok());
        assert_eq!(
            draft("Tae Kim", "ftp://example.org").validate(id).unwrap_err(),
            ResourceError::InvalidUrl
        );
        assert_eq!(
            draft("Tae Kim", "not a url").validate(id).unwrap_err(),
            ResourceError::InvalidUrl
        );
    }

    #[test]
    fn empty_url_becomes_none() {
        let resource = draft("Genki I", "   ").validate(ResourceId::generate()).unwrap();
        assert_eq!(resource.url(), None);
    }

    #[test]
    fn tags_are_trimmed_and_blanks_dropped() {
        let mut d = draft("Genki I", "");
        d.tags = vec![" grammar ".into(), "".into(), "JLPT".into()];
        let resource = d.validate(ResourceId::generate()).unwrap();
        assert_eq!(resource.tags(), ["grammar", "JLPT"]);
    }

    #[test]
    fn draft_roundtrip_preserves_fields() {
        let mut d = draft("Nihongo con Teppei", "https://teppei.example.org");
        d.kind = ResourceKind::Podcast;
        d.status = ResourceStatus::InProgress;
        d.notes = "episodes 1-50".into();

        let resource = d.clone().validate(ResourceId::generate()).unwrap();
        let back = resource.to_draft();
        assert_eq!(back.title, d.title);
        assert_eq!(back.kind, d.kind);
        assert_eq!(back.url, d.url);
        assert_eq!(back.status, d.status);
        assert_eq!(back.notes, d.notes);
    }

    #[test]
    fn enums_have_expected_cardinality() {
        assert_eq!(ResourceKind::ALL.len(), 7);
        assert_eq!(ResourceStatus::ALL.len(), 4);
    }
}
