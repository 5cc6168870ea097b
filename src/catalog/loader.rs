use crate::catalog::Catalog;
use crate::error::CatalogUnavailable;
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Url(String),
}

impl CatalogSource {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::File(PathBuf::from(trimmed))
        }
    }
}

/// Fetches the catalog on demand. Holds no catalog state: every call goes
/// back to the source.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    source: CatalogSource,
    http: reqwest::Client,
}

impl CatalogLoader {
    pub fn new(source: CatalogSource) -> Self {
        Self {
            source,
            http: reqwest::Client::new(),
        }
    }

    pub async fn load_all(&self) -> Result<Catalog, CatalogUnavailable> {
        let bytes = match &self.source {
            CatalogSource::File(path) => {
                tokio::fs::read(path)
                    .await
                    .map_err(|source| CatalogUnavailable::Read {
                        path: path.clone(),
                        source,
                    })?
            }
            CatalogSource::Url(url) => {
                let fetch_error = |source| CatalogUnavailable::Fetch {
                    url: url.clone(),
                    source,
                };
                let response = self.http.get(url).send().await.map_err(fetch_error)?;
                let status = response.status();
                if !status.is_success() {
                    return Err(CatalogUnavailable::Status {
                        url: url.clone(),
                        status: status.as_u16(),
                    });
                }
                response.bytes().await.map_err(fetch_error)?.to_vec()
            }
        };

        let catalog = Catalog::from_json(&bytes)?;
        debug!(products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }
}
