//! Model metadata as reported by a model catalog

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Bytes in one GiB, used by the size-based reputation tiers.
pub const GIB: u64 = 1024 * 1024 * 1024;

/// Model category (Value Object)
///
/// Categories are free-form in catalogs; the well-known ones get their own
/// variant and everything else is preserved verbatim in `Custom`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ModelCategory {
    Coding,
    Reasoning,
    Chat,
    Vision,
    Embedding,
    #[default]
    General,
    Custom(String),
}

impl ModelCategory {
    /// Get the string identifier for this category
    pub fn as_str(&self) -> &str {
        match self {
            ModelCategory::Coding => "coding",
            ModelCategory::Reasoning => "reasoning",
            ModelCategory::Chat => "chat",
            ModelCategory::Vision => "vision",
            ModelCategory::Embedding => "embedding",
            ModelCategory::General => "general",
            ModelCategory::Custom(s) => s,
        }
    }

    /// Coding and reasoning models get the top reputation tier.
    pub fn is_specialist(&self) -> bool {
        matches!(self, ModelCategory::Coding | ModelCategory::Reasoning)
    }
}

impl std::fmt::Display for ModelCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for ModelCategory {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "coding" | "code" => ModelCategory::Coding,
            "reasoning" => ModelCategory::Reasoning,
            "chat" => ModelCategory::Chat,
            "vision" => ModelCategory::Vision,
            "embedding" => ModelCategory::Embedding,
            "general" | "" => ModelCategory::General,
            _ => ModelCategory::Custom(s.trim().to_string()),
        })
    }
}

impl Serialize for ModelCategory {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ModelCategory {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let Ok(category) = s.parse::<ModelCategory>();
        Ok(category)
    }
}

/// Catalog entry for a single model.
///
/// The orchestrator reads these but never mutates them; installation state
/// belongs to whoever owns the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMeta {
    /// Identifier passed to the generation backend (e.g. "qwen2.5-coder:7b")
    pub id: String,
    /// Human-readable name shown in results
    pub display_name: String,
    /// Short family name
    pub name: String,
    /// On-disk size of the model weights
    pub size_bytes: u64,
    pub category: ModelCategory,
    pub is_installed: bool,
}

impl ModelMeta {
    /// Create an installed model entry; display name and family default to the id.
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            display_name: id.clone(),
            name: id.split(':').next().unwrap_or_default().to_string(),
            id,
            size_bytes: 0,
            category: ModelCategory::General,
            is_installed: true,
        }
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = name.into();
        self
    }

    pub fn with_size_bytes(mut self, size: u64) -> Self {
        self.size_bytes = size;
        self
    }

    pub fn with_category(mut self, category: ModelCategory) -> Self {
        self.category = category;
        self
    }

    pub fn with_installed(mut self, installed: bool) -> Self {
        self.is_installed = installed;
        self
    }
}
