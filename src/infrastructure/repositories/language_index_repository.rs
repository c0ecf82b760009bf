use std::collections::BTreeMap;
use std::path::PathBuf;

/// Model file name -> download URL
pub type LanguageIndex = BTreeMap<String, String>;

#[derive(Debug, thiserror::Error)]
pub enum LanguageIndexError {
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to get languages from {url}: status {status}")]
    Status { url: String, status: u16 },
    #[error("language cache {path} is unreadable: {reason}")]
    Cache { path: String, reason: String },
    #[error("failed to write language cache: {0}")]
    Io(#[from] std::io::Error),
}

/// Remote index of downloadable models, with a JSON cache file on disk.
///
/// The remote side is a plain web directory listing: one sub-directory per
/// language, each holding model files. Only files whose name starts with the
/// version prefix are indexed.
pub struct LanguageIndexRepository {
    http_client: reqwest::Client,
    index_url: String,
    version_prefix: String,
    cache_path: PathBuf,
}

impl LanguageIndexRepository {
    pub fn new(index_url: String, version_prefix: String, cache_path: PathBuf) -> Self {
        Self {
            http_client: reqwest::Client::new(),
            index_url: index_url.trim_end_matches('/').to_string(),
            version_prefix,
            cache_path,
        }
    }

    /// Return the cached index if present, otherwise crawl the remote index and
    /// persist the result.
    pub async fn list_languages(&self) -> Result<LanguageIndex, LanguageIndexError> {
        if let Some(index) = self.load_cache().await? {
            tracing::info!(
                path = %self.cache_path.display(),
                entries = index.len(),
                "Loading cached language index"
            );
            return Ok(index);
        }

        tracing::info!(url = %self.index_url, "Loading remote language index");
        let index = self.fetch_remote().await?;
        self.save_cache(&index).await?;

        tracing::info!(
            entries = index.len(),
            path = %self.cache_path.display(),
            "Language index cached"
        );

        Ok(index)
    }

    pub async fn load_cache(&self) -> Result<Option<LanguageIndex>, LanguageIndexError> {
        let bytes = match tokio::fs::read(&self.cache_path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(self.cache_error(e.to_string())),
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| self.cache_error(e.to_string()))
    }

    pub async fn save_cache(&self, index: &LanguageIndex) -> Result<(), LanguageIndexError> {
        if let Some(parent) = self.cache_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let json = serde_json::to_vec(index).map_err(|e| self.cache_error(e.to_string()))?;
        tokio::fs::write(&self.cache_path, json).await?;
        Ok(())
    }

    async fn fetch_remote(&self) -> Result<LanguageIndex, LanguageIndexError> {
        let listing = self.get_text(&self.index_url).await?;
        let mut index = LanguageIndex::new();

        for language in directory_entries(&listing) {
            let language_url = format!("{}/{}", self.index_url, language);
            let files = self.get_text(&language_url).await?;

            for file in file_entries(&files)
                .into_iter()
                .filter(|f| f.starts_with(&self.version_prefix))
            {
                tracing::debug!(language = %language, file = %file, "Indexed model file");
                index.insert(file.clone(), format!("{}/{}", language_url, file));
            }
        }

        Ok(index)
    }

    async fn get_text(&self, url: &str) -> Result<String, LanguageIndexError> {
        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|source| LanguageIndexError::Http {
                url: url.to_string(),
                source,
            })?;

        if !response.status().is_success() {
            return Err(LanguageIndexError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response.text().await.map_err(|source| LanguageIndexError::Http {
            url: url.to_string(),
            source,
        })
    }

    fn cache_error(&self, reason: String) -> LanguageIndexError {
        LanguageIndexError::Cache {
            path: self.cache_path.display().to_string(),
            reason,
        }
    }
}

/// `href` targets of every anchor in a directory listing, in page order.
fn hrefs(html: &str) -> impl Iterator<Item = &str> {
    html.split("<a href=\"")
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
}

/// Language sub-directories of the top level listing (`en/` -> `en`).
fn directory_entries(html: &str) -> Vec<String> {
    hrefs(html)
        .filter_map(|href| href.split('/').next())
        .filter(|name| is_listing_name(name))
        .map(str::to_string)
        .collect()
}

/// File names of a language listing.
fn file_entries(html: &str) -> Vec<String> {
    hrefs(html)
        .filter(|name| is_listing_name(name))
        .map(str::to_string)
        .collect()
}

// Skips parent links, sort links and anything absolute.
fn is_listing_name(name: &str) -> bool {
    let name = name.trim_end_matches('/');
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.starts_with('?')
        && !name.contains("://")
}
