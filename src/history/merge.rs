use super::commit::{BranchId, Commit, CommitId, MergeSource};
use super::graph::History;
use chrono::Utc;

impl History {
    /// Merges one branch into another by adopting the source head's snapshot
    /// wholesale — a content-replacement merge, not a field-level three-way
    /// merge. Divergent edits on the target since the fork point are not
    /// reconciled: the source's state wins entirely. This is only sound under
    /// the single-writer assumption; do not expose it to concurrent editors
    /// without external serialization.
    ///
    /// Creates one commit on the target branch whose snapshot is an
    /// independent copy of the source head's, whose parent is the target's
    /// current head, and whose merge-source records the source head commit and
    /// the source branch's display name. The target becomes the recipe's
    /// active branch. With `delete_source`, the source branch and all its
    /// commits are removed afterwards.
    ///
    /// Returns `None` — with no state change — when either branch is missing,
    /// the branches belong to different recipes or are the same branch, or the
    /// source has no head commit.
    pub fn merge_branch(
        &mut self,
        source_branch_id: BranchId,
        target_branch_id: BranchId,
        author: &str,
        delete_source: bool,
    ) -> Option<CommitId> {
        if source_branch_id == target_branch_id {
            return None;
        }
        let source = self.branches.get(&source_branch_id)?;
        let target = self.branches.get(&target_branch_id)?;
        if source.recipe_id != target.recipe_id {
            return None;
        }
        let source_head_id = source.head_id?;
        let source_name = source.name.clone();
        let recipe_id = target.recipe_id.clone();
        let parent_id = target.head_id;
        let snapshot = self.commits.get(&source_head_id)?.snapshot.clone();

        let id = self.mint_commit_id();
        let commit = Commit {
            id,
            recipe_id: recipe_id.clone(),
            branch_id: target_branch_id,
            parent_id,
            merge_source: Some(MergeSource {
                commit_id: source_head_id,
                branch_name: source_name.clone(),
            }),
            snapshot,
            message: format!("Merged branch '{}'", source_name),
            author: author.to_string(),
            created_at: Utc::now(),
            tags: Vec::new(),
        };
        self.commits.insert(id, commit);
        if let Some(branch) = self.branches.get_mut(&target_branch_id) {
            branch.head_id = Some(id);
        }
        self.active.insert(recipe_id.clone(), target_branch_id);
        self.restored_from.remove(&recipe_id);

        tracing::info!(
            recipe = recipe_id,
            source = %source_branch_id,
            target = %target_branch_id,
            commit = %id,
            "branches merged"
        );

        if delete_source {
            self.delete_branch(source_branch_id);
        }
        Some(id)
    }
}
