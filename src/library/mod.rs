//! The proof collection: records, persistence and browsing.

pub mod catalog;
mod seed;
pub mod storage;
pub mod store;

use serde::{Deserialize, Serialize};

pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::ProofStore;

use crate::error::{Error, Result};

/// Author recorded when a draft leaves it out.
pub const DEFAULT_AUTHOR: &str = "Anonymous";

/// A stored proof. Field names match the persisted JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proof {
    pub id: String,
    pub title: String,
    #[serde(rename = "abstract")]
    pub summary: String,
    /// Markup text, see [`crate::markup`].
    pub content: String,
    pub author: String,
    pub tags: Vec<String>,
    /// Epoch milliseconds.
    pub created_at: i64,
}

impl Proof {
    /// Creation date in local time, e.g. `2024-03-14`.
    pub fn created_date(&self) -> String {
        chrono::DateTime::from_timestamp_millis(self.created_at).map_or_else(
            || "unknown date".to_string(),
            |utc| {
                utc.with_timezone(&chrono::Local)
                    .format("%Y-%m-%d")
                    .to_string()
            },
        )
    }
}

/// Fields for a new proof; id and creation time are assigned by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofDraft {
    pub title: String,
    pub summary: String,
    pub content: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
}

impl ProofDraft {
    pub fn validate(&self) -> Result<()> {
        require("title", &self.title)?;
        require("content", &self.content)?;
        require_tags(&self.tags)
    }

    /// The author to record: blank or missing becomes [`DEFAULT_AUTHOR`].
    pub fn author_or_default(&self) -> String {
        self.author
            .as_deref()
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .unwrap_or(DEFAULT_AUTHOR)
            .to_string()
    }
}

/// Partial update; `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProofPatch {
    pub title: Option<String>,
    pub summary: Option<String>,
    pub content: Option<String>,
    pub author: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl ProofPatch {
    pub fn validate(&self) -> Result<()> {
        if let Some(title) = &self.title {
            require("title", title)?;
        }
        if let Some(content) = &self.content {
            require("content", content)?;
        }
        if let Some(tags) = &self.tags {
            require_tags(tags)?;
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Overwrite every supplied field of `proof`.
    pub fn apply(self, proof: &mut Proof) {
        if let Some(title) = self.title {
            proof.title = title;
        }
        if let Some(summary) = self.summary {
            proof.summary = summary;
        }
        if let Some(content) = self.content {
            proof.content = content;
        }
        if let Some(author) = self.author {
            proof.author = author;
        }
        if let Some(tags) = self.tags {
            proof.tags = tags;
        }
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(Error::Invalid(format!("{field} must not be empty")))
    } else {
        Ok(())
    }
}

/// Tags are stored as given, so they must already be trimmed and non-empty.
fn require_tags(tags: &[String]) -> Result<()> {
    match tags.iter().find(|t| t.is_empty() || t.trim() != t.as_str()) {
        Some(tag) => Err(Error::Invalid(format!(
            "tag {tag:?} must be trimmed and non-empty"
        ))),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_field_names() {
        let proof = Proof {
            id: "abc1234".into(),
            title: "T".into(),
            summary: "S".into(),
            content: "C".into(),
            author: "A".into(),
            tags: vec!["x".into()],
            created_at: 42,
        };
        let json = serde_json::to_value(&proof).unwrap();
        assert_eq!(json["abstract"], "S");
        assert_eq!(json["createdAt"], 42);
        assert!(json.get("summary").is_none());
    }

    #[test]
    fn test_author_defaults_when_blank() {
        let mut draft = ProofDraft::default();
        assert_eq!(draft.author_or_default(), DEFAULT_AUTHOR);
        draft.author = Some("   ".into());
        assert_eq!(draft.author_or_default(), DEFAULT_AUTHOR);
        draft.author = Some(" Gauss ".into());
        assert_eq!(draft.author_or_default(), "Gauss");
    }

    #[test]
    fn test_validation_requires_title_and_content() {
        let draft = ProofDraft {
            title: "Title".into(),
            content: " ".into(),
            ..ProofDraft::default()
        };
        assert!(matches!(draft.validate(), Err(Error::Invalid(_))));

        let patch = ProofPatch {
            title: Some(String::new()),
            ..ProofPatch::default()
        };
        assert!(patch.validate().is_err());
        assert!(ProofPatch::default().validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_untrimmed_or_blank_tags() {
        let mut draft = ProofDraft {
            title: "Title".into(),
            content: "Body".into(),
            tags: vec!["Algebra".into(), "Number Theory".into()],
            ..ProofDraft::default()
        };
        assert!(draft.validate().is_ok());
        draft.tags = vec![" x ".into()];
        assert!(matches!(draft.validate(), Err(Error::Invalid(_))));
        draft.tags = vec![String::new()];
        assert!(matches!(draft.validate(), Err(Error::Invalid(_))));

        let patch = ProofPatch {
            tags: Some(vec!["ok".into(), "x\t".into()]),
            ..ProofPatch::default()
        };
        assert!(matches!(patch.validate(), Err(Error::Invalid(_))));
        let patch = ProofPatch {
            tags: Some(Vec::new()),
            ..ProofPatch::default()
        };
        assert!(patch.validate().is_ok());
    }

    #[test]
    fn test_patch_keeps_unsupplied_fields() {
        let mut proof = Proof {
            id: "1".into(),
            title: "Old".into(),
            summary: "S".into(),
            content: "C".into(),
            author: "A".into(),
            tags: vec![],
            created_at: 7,
        };
        ProofPatch {
            title: Some("New".into()),
            ..ProofPatch::default()
        }
        .apply(&mut proof);
        assert_eq!(proof.title, "New");
        assert_eq!(proof.summary, "S");
        assert_eq!(proof.created_at, 7);
    }
}
