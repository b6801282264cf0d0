//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the rireki
//! crate. Import this module to get access to the core functionality without having
//! to import each type individually.
//!
//! # Example
//!
//! ```rust,no_run
//! use rireki::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let mut history = History::new();
//! let recipe = Recipe::new("recipe-1", "Pale ale");
//! let commit = history.create_commit("recipe-1", &recipe, "Initial version", "anna", vec![]);
//!
//! // Persist the whole history and bring it back.
//! let artifact = HistoryArtifact::from_history(&history);
//! let bytes = artifact.to_bytes()?;
//! let restored = HistoryArtifact::from_bytes(&bytes)?.into_history();
//! assert!(restored.commit_snapshot(commit).is_some());
//! # Ok(())
//! # }
//! ```

// Version-control engine
pub use crate::history::{
    Branch, BranchId, Commit, CommitId, History, HistoryArtifact, MergeSource,
};

// Document model
pub use crate::recipe::{
    Block, BlockConfig, BlockKind, CalculatedVariable, CascadeActuator, CompareOp, Connection,
    ConnectionCondition, IntoRecipe, Operation, ProfilePoint, Recipe, Setpoint, UnitDefinition,
};

// Structural diffing
pub use crate::diff::{
    diff, generate_message, BlockDiff, ChangeKind, ConnectionDiff, DiffSummary, DisplayDiff,
    NameChange, OperationDiff, PropertyChange, RecipeDiff,
};

// Error types
pub use crate::error::{ArtifactError, RecipeConversionError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
