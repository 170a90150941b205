//! Loading the family records document

use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Client;

use super::FamilyRecord;
use crate::error::InvitationError;

/// Where the records document lives
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordSource {
    /// JSON file on disk
    File(PathBuf),
    /// JSON document served over HTTP(S)
    Url(String),
}

impl FromStr for RecordSource {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.starts_with("http://") || s.starts_with("https://") {
            Ok(RecordSource::Url(s.to_string()))
        } else {
            Ok(RecordSource::File(PathBuf::from(s)))
        }
    }
}

impl std::fmt::Display for RecordSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordSource::File(path) => write!(f, "{}", path.display()),
            RecordSource::Url(url) => f.write_str(url),
        }
    }
}

impl RecordSource {
    /// Request timeout for remote documents
    const TIMEOUT: Duration = Duration::from_secs(15);

    /// Load the records, or fail with the underlying error
    pub async fn try_load(&self) -> Result<Vec<FamilyRecord>, InvitationError> {
        match self {
            RecordSource::File(path) => {
                let contents = tokio::fs::read_to_string(path).await?;
                Ok(serde_json::from_str(&contents)?)
            }
            RecordSource::Url(url) => {
                let client = Client::builder().timeout(Self::TIMEOUT).build()?;
                let response = client.get(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(InvitationError::RecordStatus { status: status.as_u16() });
                }
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
        }
    }

    /// Load the records; any failure is logged and yields an empty list
    ///
    /// Logins against an empty list always fail, which is how a missing
    /// document shows up to guests.
    pub async fn load(&self) -> Vec<FamilyRecord> {
        match self.try_load().await {
            Ok(records) => {
                tracing::info!(source = %self, count = records.len(), "loaded family records");
                records
            }
            Err(e) => {
                tracing::error!(
                    source = %self,
                    transient = e.is_transient(),
                    "Error loading family records: {}",
                    e
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn http_prefix_parses_as_url() {
        let source: RecordSource = "https://example.com/families.json".parse().unwrap();
        assert_eq!(source, RecordSource::Url("https://example.com/families.json".into()));
    }

    #[test]
    fn plain_path_parses_as_file() {
        let source: RecordSource = " ./families.json ".parse().unwrap();
        assert_eq!(source, RecordSource::File(PathBuf::from("./families.json")));
    }

    #[tokio::test]
    async fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"password":"Familia1","familyName":"Pérez"}}]"#).unwrap();

        let records = RecordSource::File(file.path().to_path_buf()).load().await;
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].family_name, "Pérez");
    }

    #[tokio::test]
    async fn missing_file_yields_no_records() {
        let dir = tempfile::tempdir().unwrap();
        let source = RecordSource::File(dir.path().join("missing.json"));

        assert!(matches!(source.try_load().await, Err(InvitationError::Io(_))));
        assert!(source.load().await.is_empty());
    }

    #[tokio::test]
    async fn malformed_document_yields_no_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let source = RecordSource::File(file.path().to_path_buf());

        assert!(matches!(source.try_load().await, Err(InvitationError::Json(_))));
        assert!(source.load().await.is_empty());
    }
}
