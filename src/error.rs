use thiserror::Error;

/// Errors that can occur when converting a custom editor format into a `Recipe`.
///
/// Graph operations (commits, branches, merges) never raise: missing ids come
/// back as `None` and guarded actions (deleting a last branch, merging from a
/// headless branch) are silent no-ops, since both are routine UI situations.
#[derive(Error, Debug, Clone)]
pub enum RecipeConversionError {
    #[error("Invalid recipe data: {0}")]
    ValidationError(String),

    #[error("Failed to parse recipe JSON: {0}")]
    JsonParseError(String),
}

/// Errors that can occur while persisting or restoring the history artifact.
#[derive(Error, Debug)]
pub enum ArtifactError {
    #[error("Serialization failed: {0}")]
    Encode(String),

    #[error("Deserialization failed: {0}")]
    Decode(String),

    #[error("Could not access file '{path}': {message}")]
    Io { path: String, message: String },
}
