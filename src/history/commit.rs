use crate::recipe::Recipe;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Engine-minted identifier of a commit. Ids are keys into the history arena
/// and are cheap to copy around; they carry no ordering semantics beyond
/// creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CommitId(pub u64);

impl fmt::Display for CommitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "c{}", self.0)
    }
}

/// Engine-minted identifier of a branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BranchId(pub u64);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "b{}", self.0)
    }
}

/// Provenance of a merge commit: the source branch's head at merge time and
/// its display name (kept separately so it survives source-branch deletion).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeSource {
    pub commit_id: CommitId,
    pub branch_name: String,
}

/// One immutable version record.
///
/// A commit embeds a complete, independent snapshot of the recipe — no delta
/// compression. Once created it is never mutated, except for tag add/remove.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Commit {
    pub id: CommitId,
    pub recipe_id: String,
    pub branch_id: BranchId,
    /// `None` only for the very first commit on the very first branch.
    pub parent_id: Option<CommitId>,
    /// Present only on merge commits.
    pub merge_source: Option<MergeSource>,
    pub snapshot: Recipe,
    pub message: String,
    pub author: String,
    pub created_at: DateTime<Utc>,
    /// Free-form labels. Conceptually a set; callers de-duplicate before adding.
    pub tags: Vec<String>,
}

impl Commit {
    /// Whether this commit was produced by a merge.
    pub fn is_merge(&self) -> bool {
        self.merge_source.is_some()
    }
}

/// A movable pointer into the commit graph.
///
/// Invariant: walking `parent_id` links from `head_id` reaches either `None`
/// or this branch's own `fork_commit_id` — never a commit of an unrelated
/// branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Branch {
    pub id: BranchId,
    pub recipe_id: String,
    pub name: String,
    /// `None` until the branch's first commit.
    pub head_id: Option<CommitId>,
    /// `None` for the root branch.
    pub parent_id: Option<BranchId>,
    /// The commit on the parent branch this branch diverged from.
    pub fork_commit_id: Option<CommitId>,
    pub created_at: DateTime<Utc>,
    /// Display color tag assigned at creation.
    pub color: String,
}
