use std::fs;
use std::path::Path;

use tracing::info;

use crate::config::ConfigError;

/// Version label of the bundled rubric. Bump when the wording changes.
pub const BUNDLED_PROMPT_VERSION: &str = "green-claims-2026.1";
const BUNDLED_PROMPT: &str = include_str!("../../prompts/green_claims_v1.md");

const CONTENT_MARKER: &str = "ANALYZE THIS CONTENT:";

/// The fixed audit instructions sent ahead of the page text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate {
    version: String,
    instruction: String,
}

impl PromptTemplate {
    pub fn new(version: impl Into<String>, instruction: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            instruction: instruction.into().trim().to_string(),
        }
    }

    /// The EU Green Claims rubric shipped with the binary.
    pub fn bundled() -> Self {
        Self::new(BUNDLED_PROMPT_VERSION, BUNDLED_PROMPT)
    }

    /// Load a replacement rubric. The version label is taken from the file name.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let instruction = fs::read_to_string(path).map_err(|source| ConfigError::PromptTemplate {
            path: path.to_path_buf(),
            source,
        })?;
        let version = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| "custom".to_string());

        Ok(Self::new(version, instruction))
    }

    /// Bundled rubric unless `path` names a replacement.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let template = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::bundled(),
        };
        info!(version = %template.version, "audit prompt loaded");
        Ok(template)
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn render(&self, page_text: &str) -> String {
        format!("{}\n\n{}\n{}", self.instruction, CONTENT_MARKER, page_text)
    }
}
