//! Installed-model discovery via `GET /api/tags`.

use super::error::OllamaError;
use super::wire::{TagModel, TagsResponse};
use ensemble_domain::{ModelCategory, ModelMeta};
use std::time::Duration;
use tracing::{debug, info};

const DISCOVERY_TIMEOUT: Duration = Duration::from_secs(10);

/// Lists the models installed on an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaCatalogDiscovery {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaCatalogDiscovery {
    pub fn new(base_url: impl Into<String>) -> Result<Self, OllamaError> {
        let client = reqwest::Client::builder()
            .timeout(DISCOVERY_TIMEOUT)
            .build()
            .map_err(|e| OllamaError::Client(e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Fetch every installed model as a catalog entry.
    pub async fn discover(&self) -> Result<Vec<ModelMeta>, OllamaError> {
        let url = format!("{}/api/tags", self.base_url);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|source| {
            if source.is_connect() || source.is_timeout() {
                OllamaError::Connect {
                    url: self.base_url.clone(),
                    source,
                }
            } else {
                OllamaError::Http(source)
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(OllamaError::Status {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        let tags: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Decode(e.to_string()))?;

        let models: Vec<ModelMeta> = tags.models.iter().map(tag_to_meta).collect();
        info!("Discovered {} installed models at {}", models.len(), self.base_url);
        Ok(models)
    }
}

/// Catalog entry for a listed model; every listed model is installed.
pub fn tag_to_meta(tag: &TagModel) -> ModelMeta {
    ModelMeta::new(&tag.name)
        .with_display_name(tag.label())
        .with_size_bytes(tag.size)
        .with_category(infer_category(&tag.name))
        .with_installed(true)
}

/// Best-effort category from well-known model name fragments.
///
/// Config entries override whatever is inferred here.
pub fn infer_category(name: &str) -> ModelCategory {
    let name = name.to_lowercase();
    let base = name.split(':').next().unwrap_or(&name);

    if base.contains("embed") {
        ModelCategory::Embedding
    } else if base.contains("coder") || base.contains("code") || base.starts_with("starcoder") {
        ModelCategory::Coding
    } else if base.contains("llava") || base.contains("vision") || base.contains("-vl") {
        ModelCategory::Vision
    } else if base.contains("-r1") || base.starts_with("qwq") || base.contains("reason") {
        ModelCategory::Reasoning
    } else {
        ModelCategory::General
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ollama::wire::TagDetails;

    #[test]
    fn test_infer_category() {
        assert_eq!(infer_category("qwen2.5-coder:7b"), ModelCategory::Coding);
        assert_eq!(infer_category("codellama:13b"), ModelCategory::Coding);
        assert_eq!(infer_category("deepseek-r1:14b"), ModelCategory::Reasoning);
        assert_eq!(infer_category("qwq:32b"), ModelCategory::Reasoning);
        assert_eq!(infer_category("llava:7b"), ModelCategory::Vision);
        assert_eq!(infer_category("nomic-embed-text:latest"), ModelCategory::Embedding);
        assert_eq!(infer_category("llama3.1:8b"), ModelCategory::General);
    }

    #[test]
    fn test_tag_to_meta() {
        let tag = TagModel {
            name: "deepseek-r1:14b".to_string(),
            size: 9_000_000_000,
            details: Some(TagDetails {
                family: Some("qwen2".to_string()),
                parameter_size: Some("14.8B".to_string()),
            }),
        };

        let meta = tag_to_meta(&tag);
        assert_eq!(meta.id, "deepseek-r1:14b");
        assert_eq!(meta.name, "deepseek-r1");
        assert!(meta.display_name.starts_with("deepseek-r1:14b (14.8B"));
        assert_eq!(meta.size_bytes, 9_000_000_000);
        assert_eq!(meta.category, ModelCategory::Reasoning);
        assert!(meta.is_installed);
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let discovery = OllamaCatalogDiscovery::new("http://127.0.0.1:9").unwrap();
        assert!(discovery.discover().await.is_err());
    }
}
