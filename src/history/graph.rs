use super::commit::{Branch, BranchId, Commit, CommitId};
use crate::recipe::Recipe;
use ahash::AHashMap;
use chrono::Utc;

/// Display colors assigned to branches at creation, cycling per recipe.
const BRANCH_COLORS: [&str; 8] = [
    "#4f8cc9", "#e0913f", "#63b56c", "#c75d5d", "#8a6fc9", "#c9a44f", "#5bb8b0", "#b56fa8",
];

/// Name given to the branch that is auto-created by the first commit.
const ROOT_BRANCH_NAME: &str = "Main";

/// The append-only commit and branch graph.
///
/// Commits and branches live in id-keyed arenas; branch heads and parent
/// links are ids into those arenas, which keeps identity stable and copies
/// cheap. Every operation takes the recipe/branch/commit id explicitly — the
/// editor layer owns the notion of "what is currently displayed".
///
/// All mutation is synchronous and single-writer per recipe: callers issuing
/// concurrent operations against the same recipe must serialize them
/// externally (a per-recipe mutex or actor).
#[derive(Debug, Default)]
pub struct History {
    pub(crate) commits: AHashMap<CommitId, Commit>,
    pub(crate) branches: AHashMap<BranchId, Branch>,
    /// Active-branch pointer per recipe id.
    pub(crate) active: AHashMap<String, BranchId>,
    /// Pending restored-from marker per recipe id, consumed by the next commit.
    pub(crate) restored_from: AHashMap<String, CommitId>,
    pub(crate) next_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub(super) fn mint_commit_id(&mut self) -> CommitId {
        self.next_id += 1;
        CommitId(self.next_id)
    }

    fn mint_branch_id(&mut self) -> BranchId {
        self.next_id += 1;
        BranchId(self.next_id)
    }

    /// Appends a commit snapshotting the working recipe and advances the
    /// active branch's head. Returns the new commit's id.
    ///
    /// A root branch is auto-created if the recipe has none. The parent is
    /// the pending restored-from commit when the working state came from a
    /// restore to a non-head commit (preserving true lineage), otherwise the
    /// active branch's current head. The snapshot is deep-copied here: later
    /// edits to `snapshot` cannot alias into history.
    pub fn create_commit(
        &mut self,
        recipe_id: &str,
        snapshot: &Recipe,
        message: &str,
        author: &str,
        tags: Vec<String>,
    ) -> CommitId {
        let branch_id = self.ensure_active_branch(recipe_id);

        // A restore marker only re-parents commits on its own branch; a stale
        // marker from before a branch switch would break chain integrity.
        let parent_id = match self.restored_from.get(recipe_id) {
            Some(&marked) if self.commits.get(&marked).map(|c| c.branch_id) == Some(branch_id) => {
                Some(marked)
            }
            _ => self.branches.get(&branch_id).and_then(|b| b.head_id),
        };

        let id = self.mint_commit_id();
        let commit = Commit {
            id,
            recipe_id: recipe_id.to_string(),
            branch_id,
            parent_id,
            merge_source: None,
            snapshot: snapshot.clone(),
            message: message.to_string(),
            author: author.to_string(),
            created_at: Utc::now(),
            tags,
        };
        self.commits.insert(id, commit);
        if let Some(branch) = self.branches.get_mut(&branch_id) {
            branch.head_id = Some(id);
        }
        self.restored_from.remove(recipe_id);

        tracing::debug!(recipe = recipe_id, commit = %id, branch = %branch_id, "commit created");
        id
    }

    /// Creates a branch forking from `from_commit`, or from the active
    /// branch's head when omitted. The new branch's head starts at its fork
    /// point and it becomes the recipe's active branch.
    ///
    /// Returns `None` when an explicit `from_commit` is unknown or belongs to
    /// a different recipe.
    pub fn create_branch(
        &mut self,
        recipe_id: &str,
        name: &str,
        from_commit: Option<CommitId>,
    ) -> Option<BranchId> {
        let fork_commit_id = match from_commit {
            Some(commit_id) => {
                let commit = self.commits.get(&commit_id)?;
                if commit.recipe_id != recipe_id {
                    return None;
                }
                Some(commit_id)
            }
            None => self
                .active_branch(recipe_id)
                .and_then(|branch| branch.head_id),
        };
        let parent_id = match fork_commit_id {
            Some(commit_id) => self.commits.get(&commit_id).map(|c| c.branch_id),
            None => self.active.get(recipe_id).copied(),
        };

        let id = self.mint_branch_id();
        let color = self.next_branch_color(recipe_id);
        self.branches.insert(
            id,
            Branch {
                id,
                recipe_id: recipe_id.to_string(),
                name: name.to_string(),
                head_id: fork_commit_id,
                parent_id,
                fork_commit_id,
                created_at: Utc::now(),
                color,
            },
        );
        self.active.insert(recipe_id.to_string(), id);
        self.restored_from.remove(recipe_id);

        tracing::info!(recipe = recipe_id, branch = %id, name, "branch created");
        Some(id)
    }

    /// Moves only the active-branch pointer; commits are untouched. A no-op
    /// when the branch is unknown or belongs to another recipe.
    pub fn switch_branch(&mut self, recipe_id: &str, branch_id: BranchId) {
        let valid = self
            .branches
            .get(&branch_id)
            .is_some_and(|b| b.recipe_id == recipe_id);
        if valid {
            self.active.insert(recipe_id.to_string(), branch_id);
            // A restore marker taken on another branch no longer applies.
            self.restored_from.remove(recipe_id);
        }
    }

    /// Renames a branch. A no-op when the branch is unknown.
    pub fn rename_branch(&mut self, branch_id: BranchId, name: &str) {
        if let Some(branch) = self.branches.get_mut(&branch_id) {
            branch.name = name.to_string();
        }
    }

    /// Removes a branch and every commit on it. Silently refused when this is
    /// the recipe's last branch — a recipe always keeps at least one. If the
    /// deleted branch was active, an arbitrary surviving branch takes over.
    ///
    /// Commits unique to the branch are permanently discarded, not retained
    /// unreachable.
    pub fn delete_branch(&mut self, branch_id: BranchId) {
        let Some(branch) = self.branches.get(&branch_id) else {
            return;
        };
        let recipe_id = branch.recipe_id.clone();
        let siblings = self
            .branches
            .values()
            .filter(|b| b.recipe_id == recipe_id)
            .count();
        if siblings <= 1 {
            tracing::debug!(branch = %branch_id, "delete refused: last branch of its recipe");
            return;
        }

        self.branches.remove(&branch_id);
        self.commits.retain(|_, c| c.branch_id != branch_id);

        if self.active.get(&recipe_id) == Some(&branch_id) {
            let successor = self
                .branches
                .values()
                .filter(|b| b.recipe_id == recipe_id)
                .map(|b| b.id)
                .min();
            match successor {
                Some(next) => {
                    self.active.insert(recipe_id.clone(), next);
                }
                None => {
                    self.active.remove(&recipe_id);
                }
            }
        }
        // Drop a marker that pointed into the deleted history.
        if let Some(&marked) = self.restored_from.get(&recipe_id)
            && !self.commits.contains_key(&marked)
        {
            self.restored_from.remove(&recipe_id);
        }

        tracing::info!(recipe = recipe_id, branch = %branch_id, "branch deleted");
    }

    /// Hands back a fresh copy of a commit's snapshot for the editor to load,
    /// and records the restored-from marker so the next commit's parent
    /// preserves true lineage. Returns `None` for an unknown commit.
    pub fn restore_commit(&mut self, commit_id: CommitId) -> Option<Recipe> {
        let commit = self.commits.get(&commit_id)?;
        self.restored_from
            .insert(commit.recipe_id.clone(), commit_id);
        Some(commit.snapshot.clone())
    }

    /// Walks the parent chain from the branch head to the (possibly absent)
    /// root and returns the commits oldest-to-newest.
    pub fn commits_for_branch(&self, branch_id: BranchId) -> Vec<&Commit> {
        let mut chain = Vec::new();
        let mut cursor = self.branches.get(&branch_id).and_then(|b| b.head_id);
        while let Some(id) = cursor {
            let Some(commit) = self.commits.get(&id) else {
                // Ancestor history on a deleted parent branch is gone; stop.
                break;
            };
            chain.push(commit);
            cursor = commit.parent_id;
        }
        chain.reverse();
        chain
    }

    /// 1-based position of a commit within its own branch's chain, for
    /// display versioning ("1.N"). Not globally unique across branches.
    pub fn commit_number(&self, commit_id: CommitId) -> Option<usize> {
        let commit = self.commits.get(&commit_id)?;
        let branch_id = commit.branch_id;
        let mut number = 1;
        let mut cursor = commit.parent_id;
        while let Some(id) = cursor {
            match self.commits.get(&id) {
                Some(parent) if parent.branch_id == branch_id => {
                    number += 1;
                    cursor = parent.parent_id;
                }
                _ => break,
            }
        }
        Some(number)
    }

    /// Returns a fresh independent copy of the commit's snapshot.
    pub fn commit_snapshot(&self, commit_id: CommitId) -> Option<Recipe> {
        self.commits.get(&commit_id).map(|c| c.snapshot.clone())
    }

    pub fn commit(&self, commit_id: CommitId) -> Option<&Commit> {
        self.commits.get(&commit_id)
    }

    pub fn branch(&self, branch_id: BranchId) -> Option<&Branch> {
        self.branches.get(&branch_id)
    }

    /// All branches of a recipe, ordered by creation (id order).
    pub fn branches_for_recipe(&self, recipe_id: &str) -> Vec<&Branch> {
        let mut branches: Vec<&Branch> = self
            .branches
            .values()
            .filter(|b| b.recipe_id == recipe_id)
            .collect();
        branches.sort_by_key(|b| b.id);
        branches
    }

    pub fn active_branch(&self, recipe_id: &str) -> Option<&Branch> {
        self.active
            .get(recipe_id)
            .and_then(|id| self.branches.get(id))
    }

    /// Total number of stored commits, across all recipes and branches.
    pub fn commit_count(&self) -> usize {
        self.commits.len()
    }

    /// Appends a free-form tag to a commit. Tags are conceptually a set;
    /// callers de-duplicate before adding. Touches nothing but the tag list.
    pub fn add_tag(&mut self, commit_id: CommitId, tag: &str) {
        if let Some(commit) = self.commits.get_mut(&commit_id) {
            commit.tags.push(tag.to_string());
        }
    }

    /// Removes every occurrence of a tag from a commit.
    pub fn remove_tag(&mut self, commit_id: CommitId, tag: &str) {
        if let Some(commit) = self.commits.get_mut(&commit_id) {
            commit.tags.retain(|t| t != tag);
        }
    }

    /// Resolves the active branch for a recipe, creating the root branch on
    /// first use and repairing a dangling pointer if the active branch is gone.
    fn ensure_active_branch(&mut self, recipe_id: &str) -> BranchId {
        if let Some(&branch_id) = self.active.get(recipe_id)
            && self.branches.contains_key(&branch_id)
        {
            return branch_id;
        }
        if let Some(existing) = self
            .branches
            .values()
            .filter(|b| b.recipe_id == recipe_id)
            .map(|b| b.id)
            .min()
        {
            self.active.insert(recipe_id.to_string(), existing);
            return existing;
        }

        let id = self.mint_branch_id();
        self.branches.insert(
            id,
            Branch {
                id,
                recipe_id: recipe_id.to_string(),
                name: ROOT_BRANCH_NAME.to_string(),
                head_id: None,
                parent_id: None,
                fork_commit_id: None,
                created_at: Utc::now(),
                color: BRANCH_COLORS[0].to_string(),
            },
        );
        self.active.insert(recipe_id.to_string(), id);
        tracing::info!(recipe = recipe_id, branch = %id, "root branch auto-created");
        id
    }

    fn next_branch_color(&self, recipe_id: &str) -> String {
        let used = self
            .branches
            .values()
            .filter(|b| b.recipe_id == recipe_id)
            .count();
        BRANCH_COLORS[used % BRANCH_COLORS.len()].to_string()
    }
}
