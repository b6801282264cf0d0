use crate::recipe::BlockKind;
use serde::{Deserialize, Serialize};

/// How an entity differs between the two snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// One differing field on a matched entity, with display-formatted values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyChange {
    pub property: String,
    pub old: String,
    pub new: String,
}

impl PropertyChange {
    pub fn new(
        property: impl Into<String>,
        old: impl Into<String>,
        new: impl Into<String>,
    ) -> Self {
        Self {
            property: property.into(),
            old: old.into(),
            new: new.into(),
        }
    }
}

/// The document-name comparison result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NameChange {
    pub changed: bool,
    pub old: String,
    pub new: String,
}

/// Diff of a single block.
///
/// `position_only` is set when canvas coordinates are the *only* differences,
/// so callers can treat pure repositioning as cosmetically insignificant
/// without losing the change itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BlockDiff {
    pub block_id: String,
    pub label: String,
    pub kind: BlockKind,
    pub change: ChangeKind,
    pub changes: Vec<PropertyChange>,
    pub position_only: bool,
}

/// Diff of a single connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionDiff {
    pub connection_id: String,
    pub change: ChangeKind,
    pub changes: Vec<PropertyChange>,
}

/// Diff of a single operation. Added and removed operations are recorded
/// without nested entity diffs; only matched operations recurse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperationDiff {
    pub operation_id: String,
    pub name: String,
    pub change: ChangeKind,
    pub changes: Vec<PropertyChange>,
    pub blocks: Vec<BlockDiff>,
    pub connections: Vec<ConnectionDiff>,
}

/// Rolled-up change counts across the whole document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DiffSummary {
    pub operations_added: usize,
    pub operations_removed: usize,
    pub operations_modified: usize,
    pub blocks_added: usize,
    pub blocks_removed: usize,
    pub blocks_modified: usize,
    pub connections_added: usize,
    pub connections_removed: usize,
    pub connections_modified: usize,
    pub name_changed: bool,
}

impl DiffSummary {
    /// True when the two snapshots are structurally identical.
    pub fn is_empty(&self) -> bool {
        !self.name_changed
            && self.operations_added == 0
            && self.operations_removed == 0
            && self.operations_modified == 0
            && self.blocks_added == 0
            && self.blocks_removed == 0
            && self.blocks_modified == 0
            && self.connections_added == 0
            && self.connections_removed == 0
            && self.connections_modified == 0
    }
}

/// The full hierarchical diff between two recipe snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeDiff {
    pub name: NameChange,
    pub operations: Vec<OperationDiff>,
    pub summary: DiffSummary,
}
