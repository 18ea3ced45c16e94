use super::{is_document_name, DocumentEntry, DocumentSource};
use crate::error::{CheckpadError, Result};
use reqwest::blocking::Client;
use reqwest::{StatusCode, Url};
use std::time::Duration;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Client for a checklist server exposing `/api/files`.
///
/// The server has no write endpoint, so [`DocumentSource::save`] always fails.
pub struct HttpSource {
    base: Url,
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: &str) -> Result<Self> {
        let base = Url::parse(base_url)
            .map_err(|e| CheckpadError::Source(format!("Invalid server url {}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(CheckpadError::Source(format!(
                "Invalid server url: {}",
                base_url
            )));
        }
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self { base, client })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CheckpadError::Source(format!("Invalid server url: {}", self.base)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

impl DocumentSource for HttpSource {
    fn list_documents(&self) -> Result<Vec<DocumentEntry>> {
        let url = self.endpoint(&["api", "files"])?;
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        if !resp.status().is_success() {
            return Err(CheckpadError::Source(format!(
                "Listing failed: HTTP {}",
                resp.status()
            )));
        }

        let names: Vec<String> = resp.json()?;
        let mut documents: Vec<DocumentEntry> = names
            .into_iter()
            .filter(|name| is_document_name(name))
            .map(DocumentEntry::new)
            .collect();
        documents.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(documents)
    }

    fn fetch(&self, name: &str) -> Result<String> {
        let url = self.endpoint(&["api", "files", name])?;
        log::debug!("GET {}", url);
        let resp = self.client.get(url).send()?;
        match resp.status() {
            StatusCode::NOT_FOUND => Err(CheckpadError::DocumentNotFound(name.to_string())),
            status if !status.is_success() => Err(CheckpadError::Source(format!(
                "Fetching {} failed: HTTP {}",
                name, status
            ))),
            _ => Ok(resp.text()?),
        }
    }

    fn save(&mut self, name: &str, _content: &str) -> Result<()> {
        Err(CheckpadError::Source(format!(
            "{} is served by {} and cannot be written back",
            name, self.base
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_segments() {
        let source = HttpSource::new("http://localhost:3000/").unwrap();
        assert_eq!(
            source.endpoint(&["api", "files"]).unwrap().as_str(),
            "http://localhost:3000/api/files"
        );
    }

    #[test]
    fn test_endpoint_escapes_document_names() {
        let source = HttpSource::new("http://localhost:3000").unwrap();
        assert_eq!(
            source
                .endpoint(&["api", "files", "my plan.md"])
                .unwrap()
                .as_str(),
            "http://localhost:3000/api/files/my%20plan.md"
        );
    }

    #[test]
    fn test_rejects_invalid_url() {
        assert!(HttpSource::new("not a url").is_err());
        assert!(HttpSource::new("mailto:someone@example.com").is_err());
    }

    #[test]
    fn test_save_is_refused() {
        let mut source = HttpSource::new("http://localhost:3000").unwrap();
        assert!(matches!(
            source.save("a.md", "text"),
            Err(CheckpadError::Source(_))
        ));
    }
}
