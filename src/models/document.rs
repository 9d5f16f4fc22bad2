use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{parse_variant, ParseEnumError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DocumentCategory {
    Contracts,
    Permits,
    Safety,
    Insurance,
    Compliance,
    Licenses,
    Manuals,
    Other,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 8] = [
        DocumentCategory::Contracts,
        DocumentCategory::Permits,
        DocumentCategory::Safety,
        DocumentCategory::Insurance,
        DocumentCategory::Compliance,
        DocumentCategory::Licenses,
        DocumentCategory::Manuals,
        DocumentCategory::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            DocumentCategory::Contracts => "Contracts",
            DocumentCategory::Permits => "Permits",
            DocumentCategory::Safety => "Safety",
            DocumentCategory::Insurance => "Insurance",
            DocumentCategory::Compliance => "Compliance",
            DocumentCategory::Licenses => "Licenses",
            DocumentCategory::Manuals => "Manuals",
            DocumentCategory::Other => "Other",
        }
    }
}

impl fmt::Display for DocumentCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentCategory {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_variant("document category", &Self::ALL, Self::as_str, s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub name: String,
    pub category: DocumentCategory,
    #[serde(default)]
    pub tags: Vec<String>,
    pub file_url: String,
    pub upload_date: NaiveDate,
    /// File size in kilobytes.
    pub size: u64,
}

impl Document {
    /// Case-insensitive match of `term` against the name or any tag.
    pub fn matches_search(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name.to_lowercase().contains(&term)
            || self.tags.iter().any(|tag| tag.to_lowercase().contains(&term))
    }
}

/// `upload_date` is stamped by the service. A missing `size` gets a placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub name: String,
    pub category: DocumentCategory,
    pub tags: Vec<String>,
    pub file_url: String,
    pub size: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentPatch {
    pub name: Option<String>,
    pub category: Option<DocumentCategory>,
    pub tags: Option<Vec<String>>,
    pub file_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn document(name: &str, tags: &[&str]) -> Document {
        Document {
            id: "1".to_string(),
            name: name.to_string(),
            category: DocumentCategory::Safety,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            file_url: "https://files.example.com/doc.pdf".to_string(),
            upload_date: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            size: 420,
        }
    }

    #[test]
    fn search_matches_name_or_tags_ignoring_case() {
        let doc = document("Site Safety Manual", &["Reference", "Urgent"]);
        assert!(doc.matches_search("safety"));
        assert!(doc.matches_search("URG"));
        assert!(doc.matches_search(""));
        assert!(!doc.matches_search("permit"));
    }

    #[test]
    fn category_parses_display_strings() {
        assert_eq!("manuals".parse::<DocumentCategory>(), Ok(DocumentCategory::Manuals));
        let err = "Blueprints".parse::<DocumentCategory>().unwrap_err();
        assert_eq!(err.to_string(), "unknown document category 'Blueprints'");
    }
}
