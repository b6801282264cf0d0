use super::commit::{Branch, BranchId, Commit};
use super::graph::History;
use crate::error::ArtifactError;
use bincode::config::standard;
use bincode::serde::{decode_from_slice, encode_to_vec};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{Read, Write};

/// The durable layout of a history store: the full commit list, the full
/// branch list, and the recipe-to-active-branch map.
///
/// Every commit embeds its own complete recipe snapshot, so the artifact is
/// append-only in spirit and restore needs no delta resolution — at the cost
/// of storage growing linearly with version count. The transient
/// restored-from marker is session state and is not persisted.
#[derive(Serialize, Deserialize, Debug)]
pub struct HistoryArtifact {
    pub commits: Vec<Commit>,
    pub branches: Vec<Branch>,
    pub active: Vec<(String, BranchId)>,
}

impl HistoryArtifact {
    /// Captures the current state of a history store. Lists are ordered by id
    /// so the same store always encodes to the same bytes.
    pub fn from_history(history: &History) -> Self {
        let mut commits: Vec<Commit> = history.commits.values().cloned().collect();
        commits.sort_by_key(|c| c.id);
        let mut branches: Vec<Branch> = history.branches.values().cloned().collect();
        branches.sort_by_key(|b| b.id);
        let mut active: Vec<(String, BranchId)> = history
            .active
            .iter()
            .map(|(recipe, branch)| (recipe.clone(), *branch))
            .collect();
        active.sort();
        Self {
            commits,
            branches,
            active,
        }
    }

    /// Rebuilds a live history store from the persisted record.
    pub fn into_history(self) -> History {
        let mut history = History::new();
        for commit in self.commits {
            history.next_id = history.next_id.max(commit.id.0);
            history.commits.insert(commit.id, commit);
        }
        for branch in self.branches {
            history.next_id = history.next_id.max(branch.id.0);
            history.branches.insert(branch.id, branch);
        }
        for (recipe, branch) in self.active {
            history.active.insert(recipe, branch);
        }
        history
    }

    /// Encodes the artifact using the bincode format.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ArtifactError> {
        encode_to_vec(self, standard()).map_err(|e| ArtifactError::Encode(e.to_string()))
    }

    /// Decodes an artifact from a byte slice.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ArtifactError> {
        decode_from_slice(bytes, standard())
            .map(|(artifact, _)| artifact) // bincode 2 returns a tuple (data, bytes_read)
            .map_err(|e| ArtifactError::Decode(e.to_string()))
    }

    /// Saves the artifact to a file.
    pub fn save(&self, path: &str) -> Result<(), ArtifactError> {
        let bytes = self.to_bytes()?;
        let mut file = fs::File::create(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        file.write_all(&bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Ok(())
    }

    /// Loads an artifact from a file.
    pub fn from_file(path: &str) -> Result<Self, ArtifactError> {
        let mut file = fs::File::open(path).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes).map_err(|e| ArtifactError::Io {
            path: path.to_string(),
            message: e.to_string(),
        })?;
        Self::from_bytes(&bytes)
    }
}
