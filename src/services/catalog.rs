use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

use crate::models::Policy;

/// Errors that can occur while loading the policy catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid JSON catalog: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid TOML catalog: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("Unsupported catalog format: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid policy {id}: {reason}")]
    InvalidPolicy { id: String, reason: String },

    #[error("Catalog contains no policies")]
    Empty,
}

/// On-disk catalog format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogFormat {
    Json,
    Toml,
}

impl CatalogFormat {
    pub fn from_path(path: &Path) -> Result<Self, CatalogError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(CatalogFormat::Json),
            Some(ext) if ext.eq_ignore_ascii_case("toml") => Ok(CatalogFormat::Toml),
            _ => Err(CatalogError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

#[derive(Deserialize)]
struct JsonCatalog {
    policies: Vec<Policy>,
}

#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    policies: Vec<Policy>,
}

/// Static, validated policy catalog
///
/// Loaded once at startup and shared read-only across workers.
#[derive(Debug, Clone)]
pub struct PolicyCatalog {
    policies: Vec<Policy>,
}

impl PolicyCatalog {
    /// Build a catalog from policies, validating every entry
    pub fn new(policies: Vec<Policy>) -> Result<Self, CatalogError> {
        validate_policies(&policies)?;
        Ok(Self { policies })
    }

    /// Load the catalog from a `.json` or `.toml` file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let format = CatalogFormat::from_path(path)?;
        let content = tokio::fs::read_to_string(path).await?;

        let catalog = Self::parse(&content, format)?;
        tracing::info!("Loaded {} policies from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    /// Parse catalog content in the given format
    pub fn parse(content: &str, format: CatalogFormat) -> Result<Self, CatalogError> {
        let policies = match format {
            // A bare array or an object with a `policies` array
            CatalogFormat::Json if content.trim_start().starts_with('[') => {
                serde_json::from_str::<Vec<Policy>>(content)?
            }
            CatalogFormat::Json => serde_json::from_str::<JsonCatalog>(content)?.policies,
            CatalogFormat::Toml => toml::from_str::<TomlCatalog>(content)?.policies,
        };

        Self::new(policies)
    }

    pub fn policies(&self) -> &[Policy] {
        &self.policies
    }

    pub fn get(&self, id: &str) -> Option<&Policy> {
        self.policies.iter().find(|policy| policy.id == id)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}

fn validate_policies(policies: &[Policy]) -> Result<(), CatalogError> {
    if policies.is_empty() {
        return Err(CatalogError::Empty);
    }

    let mut seen = HashSet::with_capacity(policies.len());

    for policy in policies {
        let invalid = |reason: String| CatalogError::InvalidPolicy {
            id: policy.id.clone(),
            reason,
        };

        if policy.id.trim().is_empty() {
            return Err(invalid("id must not be empty".to_string()));
        }
        if !seen.insert(policy.id.as_str()) {
            return Err(invalid("duplicate id".to_string()));
        }
        if !policy.premium.is_finite() || policy.premium < 0.0 {
            return Err(invalid(format!("premium must be non-negative, got {}", policy.premium)));
        }
        if !policy.coverage.is_finite() || policy.coverage < 0.0 {
            return Err(invalid(format!("coverage must be non-negative, got {}", policy.coverage)));
        }
    }

    Ok(())
}
