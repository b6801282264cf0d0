//! Structural diff engine.
//!
//! Diffs are computed by matching nested entities by stable identity —
//! operations, blocks, and connections by their ids — never by serialized or
//! positional comparison. The result is deterministic: output follows the
//! snapshot list order (new-side order for added and matched entities,
//! old-side order for removed ones), so diffing the same pair twice yields
//! identical results and diffing a snapshot against itself yields none.

mod changes;
mod config;
mod display;
mod message;

pub use changes::*;
pub use display::DisplayDiff;
pub use message::generate_message;

use crate::recipe::{Block, Connection, Operation, Recipe};
use ahash::AHashMap;
use config::{diff_block, fmt_opt_num, fmt_opt_text};

/// Computes the hierarchical diff between two recipe snapshots.
pub fn diff(old: &Recipe, new: &Recipe) -> RecipeDiff {
    let name = NameChange {
        changed: old.name != new.name,
        old: old.name.clone(),
        new: new.name.clone(),
    };
    let mut summary = DiffSummary {
        name_changed: name.changed,
        ..DiffSummary::default()
    };
    let mut operations = Vec::new();

    let old_by_id: AHashMap<&str, &Operation> = old
        .operations
        .iter()
        .map(|op| (op.id.as_str(), op))
        .collect();
    let new_by_id: AHashMap<&str, &Operation> = new
        .operations
        .iter()
        .map(|op| (op.id.as_str(), op))
        .collect();

    for operation in &new.operations {
        match old_by_id.get(operation.id.as_str()) {
            None => {
                summary.operations_added += 1;
                operations.push(OperationDiff {
                    operation_id: operation.id.clone(),
                    name: operation.name.clone(),
                    change: ChangeKind::Added,
                    changes: Vec::new(),
                    blocks: Vec::new(),
                    connections: Vec::new(),
                });
            }
            Some(old_operation) => {
                if let Some(op_diff) = diff_operation(old_operation, operation, &mut summary) {
                    summary.operations_modified += 1;
                    operations.push(op_diff);
                }
            }
        }
    }
    for operation in &old.operations {
        if !new_by_id.contains_key(operation.id.as_str()) {
            summary.operations_removed += 1;
            operations.push(OperationDiff {
                operation_id: operation.id.clone(),
                name: operation.name.clone(),
                change: ChangeKind::Removed,
                changes: Vec::new(),
                blocks: Vec::new(),
                connections: Vec::new(),
            });
        }
    }

    RecipeDiff {
        name,
        operations,
        summary,
    }
}

/// Recurses into a matched operation pair. Returns `None` when nothing inside
/// the operation differs.
fn diff_operation(
    old: &Operation,
    new: &Operation,
    summary: &mut DiffSummary,
) -> Option<OperationDiff> {
    let mut changes = Vec::new();
    if old.name != new.name {
        changes.push(PropertyChange::new(
            "Name",
            old.name.clone(),
            new.name.clone(),
        ));
    }

    let mut blocks = Vec::new();
    let old_blocks: AHashMap<&str, &Block> =
        old.blocks.iter().map(|b| (b.id.as_str(), b)).collect();
    let new_blocks: AHashMap<&str, &Block> =
        new.blocks.iter().map(|b| (b.id.as_str(), b)).collect();

    for block in &new.blocks {
        match old_blocks.get(block.id.as_str()) {
            None => {
                summary.blocks_added += 1;
                blocks.push(BlockDiff {
                    block_id: block.id.clone(),
                    label: block.label.clone(),
                    kind: block.kind,
                    change: ChangeKind::Added,
                    changes: Vec::new(),
                    position_only: false,
                });
            }
            Some(old_block) => {
                if let Some(block_diff) = diff_block(old_block, block) {
                    summary.blocks_modified += 1;
                    blocks.push(block_diff);
                }
            }
        }
    }
    for block in &old.blocks {
        if !new_blocks.contains_key(block.id.as_str()) {
            summary.blocks_removed += 1;
            blocks.push(BlockDiff {
                block_id: block.id.clone(),
                label: block.label.clone(),
                kind: block.kind,
                change: ChangeKind::Removed,
                changes: Vec::new(),
                position_only: false,
            });
        }
    }

    let mut connections = Vec::new();
    let old_connections: AHashMap<&str, &Connection> =
        old.connections.iter().map(|c| (c.id.as_str(), c)).collect();
    let new_connections: AHashMap<&str, &Connection> =
        new.connections.iter().map(|c| (c.id.as_str(), c)).collect();

    for connection in &new.connections {
        match old_connections.get(connection.id.as_str()) {
            None => {
                summary.connections_added += 1;
                connections.push(ConnectionDiff {
                    connection_id: connection.id.clone(),
                    change: ChangeKind::Added,
                    changes: Vec::new(),
                });
            }
            Some(old_connection) => {
                if let Some(connection_diff) = diff_connection(old_connection, connection) {
                    summary.connections_modified += 1;
                    connections.push(connection_diff);
                }
            }
        }
    }
    for connection in &old.connections {
        if !new_connections.contains_key(connection.id.as_str()) {
            summary.connections_removed += 1;
            connections.push(ConnectionDiff {
                connection_id: connection.id.clone(),
                change: ChangeKind::Removed,
                changes: Vec::new(),
            });
        }
    }

    if changes.is_empty() && blocks.is_empty() && connections.is_empty() {
        return None;
    }
    Some(OperationDiff {
        operation_id: new.id.clone(),
        name: new.name.clone(),
        change: ChangeKind::Modified,
        changes,
        blocks,
        connections,
    })
}

/// Compares a matched connection pair field-wise. Returns `None` when nothing
/// differs. Endpoints are not compared: a connection that moves to different
/// blocks is a different connection in the editor (new id).
fn diff_connection(old: &Connection, new: &Connection) -> Option<ConnectionDiff> {
    let mut changes = Vec::new();

    if old.branch_tag != new.branch_tag {
        changes.push(PropertyChange::new(
            "Branch tag",
            fmt_opt_text(old.branch_tag.as_deref()),
            fmt_opt_text(new.branch_tag.as_deref()),
        ));
    }
    if old.condition != new.condition {
        changes.push(PropertyChange::new(
            "Condition",
            old.condition
                .as_ref()
                .map_or_else(|| "—".to_string(), |c| c.to_string()),
            new.condition
                .as_ref()
                .map_or_else(|| "—".to_string(), |c| c.to_string()),
        ));
    }
    if old.formula != new.formula {
        changes.push(PropertyChange::new(
            "Formula",
            fmt_opt_text(old.formula.as_deref()),
            fmt_opt_text(new.formula.as_deref()),
        ));
    }
    if old.parallel_group != new.parallel_group {
        changes.push(PropertyChange::new(
            "Parallel group",
            fmt_opt_text(old.parallel_group.as_deref()),
            fmt_opt_text(new.parallel_group.as_deref()),
        ));
    }
    if old.fork_offset != new.fork_offset {
        changes.push(PropertyChange::new(
            "Fork offset",
            fmt_opt_num(old.fork_offset),
            fmt_opt_num(new.fork_offset),
        ));
    }

    if changes.is_empty() {
        return None;
    }
    Some(ConnectionDiff {
        connection_id: new.id.clone(),
        change: ChangeKind::Modified,
        changes,
    })
}
