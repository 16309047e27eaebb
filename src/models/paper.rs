//! Council paper data structures.

use serde::{Deserialize, Serialize};

/// Fallback title for papers published without a name.
pub const DEFAULT_TITLE: &str = "Kein Titel";

/// A council paper as returned by the OParl papers endpoint.
///
/// Records are kept verbatim as received; any field the API may omit is
/// optional here.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Paper {
    /// Opaque reference URL; the numeric paper id is embedded as a query parameter
    pub id: String,

    /// Paper title
    pub name: Option<String>,

    /// Paper type, e.g. "Antrag" or "Informationsvorlage"
    pub paper_type: Option<String>,

    /// Creation timestamp, ISO-8601
    pub created: Option<String>,

    /// Link to the council information system page
    pub web: Option<String>,

    /// Main document attachment
    pub main_file: Option<MainFile>,
}

impl Paper {
    /// Title for display, falling back when the source record has none.
    pub fn title(&self) -> &str {
        self.name.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Access URL of the main document, if any.
    pub fn access_url(&self) -> Option<&str> {
        self.main_file.as_ref().and_then(|f| f.access_url.as_deref())
    }
}

/// Main file attachment of a paper.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct MainFile {
    /// Direct access URL for the document (usually a PDF)
    pub access_url: Option<String>,
}

/// Top-level response body of the papers endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PaperListing {
    /// The papers array; missing in empty responses
    #[serde(default)]
    pub data: Vec<Paper>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserialize_full_record() {
        let paper: Paper = serde_json::from_str(
            r#"{
                "id": "https://example.com/oparl/paper?id=42",
                "name": "Radwegenetz 2030",
                "paperType": "Antrag",
                "created": "2026-08-06T09:30:00+02:00",
                "web": "https://example.com/vo0050.asp?id=42",
                "mainFile": { "accessUrl": "https://example.com/files/42.pdf" }
            }"#,
        )
        .unwrap();

        assert_eq!(paper.title(), "Radwegenetz 2030");
        assert_eq!(paper.paper_type.as_deref(), Some("Antrag"));
        assert_eq!(
            paper.access_url(),
            Some("https://example.com/files/42.pdf")
        );
    }

    #[test]
    fn deserialize_sparse_record() {
        let paper: Paper =
            serde_json::from_str(r#"{ "id": "https://example.com/paper?id=7" }"#).unwrap();

        assert_eq!(paper.title(), DEFAULT_TITLE);
        assert!(paper.paper_type.is_none());
        assert!(paper.access_url().is_none());
    }

    #[test]
    fn listing_without_data_is_empty() {
        let listing: PaperListing = serde_json::from_str("{}").unwrap();
        assert!(listing.data.is_empty());
    }

    #[test]
    fn listing_with_data() {
        let listing: PaperListing = serde_json::from_str(
            r#"{ "data": [ { "id": "https://example.com/paper?id=1" } ] }"#,
        )
        .unwrap();
        assert_eq!(listing.data.len(), 1);
    }
}
