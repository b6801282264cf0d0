use super::definition::Recipe;
use crate::error::RecipeConversionError;

/// A trait for custom editor data models that can be converted into a canonical [`Recipe`].
///
/// This is the primary extension point for keeping the engine format-agnostic. The
/// canvas editor keeps whatever document shape suits its rendering; implementing this
/// trait provides the translation layer into the shape the version-control engine
/// snapshots and diffs.
///
/// # Example
///
/// ```rust,no_run
/// use rireki::prelude::*;
/// use rireki::error::RecipeConversionError;
///
/// // 1. Define your custom structs for your editor's document format.
/// struct MyCanvasNode { id: String, title: String }
/// struct MyCanvasDocument { id: String, name: String, nodes: Vec<MyCanvasNode> }
///
/// // 2. Implement `IntoRecipe` for your top-level struct.
/// impl IntoRecipe for MyCanvasDocument {
///     fn into_recipe(self) -> Result<Recipe, RecipeConversionError> {
///         let mut recipe = Recipe::new(self.id, self.name);
///         let blocks = self
///             .nodes
///             .into_iter()
///             .map(|node| Block {
///                 id: node.id,
///                 kind: BlockKind::Parameter, // Map your node types here
///                 label: node.title,
///                 subtitle: None,
///                 x: 0.0,
///                 y: 0.0,
///                 config: None,
///             })
///             .collect();
///         recipe.operations.push(Operation {
///             id: "op-1".to_string(),
///             position: 0,
///             name: "Main".to_string(),
///             blocks,
///             connections: vec![],
///         });
///         Ok(recipe)
///     }
/// }
/// ```
pub trait IntoRecipe {
    /// Consumes the object and converts it into the canonical recipe model.
    fn into_recipe(self) -> Result<Recipe, RecipeConversionError>;
}
