//! # Rireki - Structural Version Control for Process Recipes
//!
//! **Rireki** is a version-control engine for node-based process recipes. It keeps a
//! linear history of named, taggable versions organized into divergent and convergent
//! branches, and computes structural diffs between any two versions by matching nested
//! entities — operations, blocks, connections — by stable identity rather than by text.
//!
//! ## Core Workflow
//!
//! The engine is editor-agnostic. It operates on a canonical [`recipe::Recipe`] model;
//! the canvas editor keeps whatever document shape suits its rendering and translates
//! via the [`recipe::IntoRecipe`] trait. The primary workflow is:
//!
//! 1.  **Edit**: The editor mutates its working `Recipe` freely.
//! 2.  **Save**: [`history::History::create_commit`] deep-snapshots the working recipe
//!     onto the active branch. Nothing the editor does afterwards can reach into history.
//! 3.  **Compare**: [`diff::diff`] produces a hierarchical [`diff::RecipeDiff`] between
//!     any two snapshots, with per-property old/new values and a roll-up summary;
//!     [`diff::generate_message`] turns it into a one-line commit message.
//! 4.  **Branch & merge**: branches fork from any commit and merge back by
//!     content-replacement ([`history::History::merge_branch`]).
//!
//! All graph operations are synchronous and single-writer per recipe; missing ids come
//! back as `None` and guarded actions degrade to no-ops instead of raising.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rireki::prelude::*;
//!
//! fn main() {
//!     let mut history = History::new();
//!
//!     // The editor owns the working document; the engine snapshots it on save.
//!     let mut recipe = Recipe::new("recipe-1", "Lager fermentation");
//!     recipe.operations.push(Operation {
//!         id: "op-1".to_string(),
//!         position: 0,
//!         name: "Fermentation".to_string(),
//!         blocks: vec![],
//!         connections: vec![],
//!     });
//!
//!     // First save auto-creates the root branch and yields commit number 1.
//!     let first = history.create_commit("recipe-1", &recipe, "Initial version", "anna", vec![]);
//!
//!     // Edit, then preview the change against the head snapshot before saving.
//!     recipe.name = "Lager fermentation (dry hop)".to_string();
//!     let head = history.commit_snapshot(first).unwrap();
//!     let changes = diff(&head, &recipe);
//!     let message = generate_message(&changes);
//!     history.create_commit("recipe-1", &recipe, &message, "anna", vec![]);
//!
//!     // Fork a variant, commit to it, and merge it back into the root branch.
//!     let main = history.active_branch("recipe-1").unwrap().id;
//!     let variant = history
//!         .create_branch("recipe-1", "Experiment", None)
//!         .unwrap();
//!     recipe.vertical_layout = true;
//!     history.create_commit("recipe-1", &recipe, "Try vertical layout", "anna", vec![]);
//!     history.merge_branch(variant, main, "anna", true);
//! }
//! ```

pub mod diff;
pub mod error;
pub mod history;
pub mod prelude;
pub mod recipe;
