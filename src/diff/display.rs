use super::changes::{BlockDiff, ChangeKind, ConnectionDiff, OperationDiff, PropertyChange, RecipeDiff};
use std::fmt;

/// A wrapper to display a diff as an indented tree, for terminal inspection
/// of what a commit is about to record.
pub struct DisplayDiff<'a> {
    pub diff: &'a RecipeDiff,
}

impl<'a> fmt::Display for DisplayDiff<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.diff.summary.is_empty() {
            return writeln!(f, "No changes");
        }
        writeln!(f, "Recipe changes")?;

        let total = usize::from(self.diff.name.changed) + self.diff.operations.len();
        let mut written = 0;

        if self.diff.name.changed {
            written += 1;
            let marker = if written == total { "└── " } else { "├── " };
            writeln!(
                f,
                "{}Name: \"{}\" → \"{}\"",
                marker, self.diff.name.old, self.diff.name.new
            )?;
        }
        for operation in &self.diff.operations {
            written += 1;
            let is_last = written == total;
            self.fmt_operation(operation, f, is_last)?;
        }
        Ok(())
    }
}

impl<'a> DisplayDiff<'a> {
    fn fmt_operation(
        &self,
        operation: &OperationDiff,
        f: &mut fmt::Formatter<'_>,
        is_last: bool,
    ) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        writeln!(
            f,
            "{}Operation \"{}\" [{}]",
            marker,
            operation.name,
            change_label(operation.change)
        )?;
        let child_prefix = if is_last { "    " } else { "│   " };

        let total =
            operation.changes.len() + operation.blocks.len() + operation.connections.len();
        let mut written = 0;

        for change in &operation.changes {
            written += 1;
            self.fmt_property(change, f, child_prefix, written == total)?;
        }
        for block in &operation.blocks {
            written += 1;
            self.fmt_block(block, f, child_prefix, written == total)?;
        }
        for connection in &operation.connections {
            written += 1;
            self.fmt_connection(connection, f, child_prefix, written == total)?;
        }
        Ok(())
    }

    fn fmt_block(
        &self,
        block: &BlockDiff,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        let note = if block.position_only {
            " (position only)"
        } else {
            ""
        };
        writeln!(
            f,
            "{}{}Block \"{}\" [{}]{}",
            prefix,
            marker,
            block.label,
            change_label(block.change),
            note
        )?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, change) in block.changes.iter().enumerate() {
            self.fmt_property(change, f, &child_prefix, i + 1 == block.changes.len())?;
        }
        Ok(())
    }

    fn fmt_connection(
        &self,
        connection: &ConnectionDiff,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        writeln!(
            f,
            "{}{}Connection {} [{}]",
            prefix,
            marker,
            connection.connection_id,
            change_label(connection.change)
        )?;
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        for (i, change) in connection.changes.iter().enumerate() {
            self.fmt_property(change, f, &child_prefix, i + 1 == connection.changes.len())?;
        }
        Ok(())
    }

    fn fmt_property(
        &self,
        change: &PropertyChange,
        f: &mut fmt::Formatter<'_>,
        prefix: &str,
        is_last: bool,
    ) -> fmt::Result {
        let marker = if is_last { "└── " } else { "├── " };
        writeln!(
            f,
            "{}{}{}: {} → {}",
            prefix, marker, change.property, change.old, change.new
        )
    }
}

fn change_label(change: ChangeKind) -> &'static str {
    match change {
        ChangeKind::Added => "added",
        ChangeKind::Removed => "removed",
        ChangeKind::Modified => "modified",
    }
}
