use serde::{Deserialize, Serialize};
use std::fmt;

/// The complete, canonical definition of a process recipe. This is the unit
/// that gets snapshotted by the version-control engine; the editor mutates it
/// freely between commits.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub operations: Vec<Operation>,
    pub calculated_variables: Vec<CalculatedVariable>,
    /// Whether the editor lays the canvas out top-to-bottom.
    pub vertical_layout: bool,
    pub units: Vec<UnitDefinition>,
}

impl Recipe {
    /// Creates an empty recipe with the given identity and display name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            ..Self::default()
        }
    }

    /// Parses a recipe from its editor-facing JSON representation.
    pub fn from_json_str(json: &str) -> Result<Self, crate::error::RecipeConversionError> {
        serde_json::from_str(json)
            .map_err(|e| crate::error::RecipeConversionError::JsonParseError(e.to_string()))
    }

    /// Serializes the recipe to the editor-facing JSON representation.
    pub fn to_json_string(&self) -> Result<String, crate::error::RecipeConversionError> {
        serde_json::to_string(self)
            .map_err(|e| crate::error::RecipeConversionError::JsonParseError(e.to_string()))
    }
}

/// A named, derived variable available to setpoint formulas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedVariable {
    pub name: String,
    pub formula: String,
}

/// A measurement unit group: the unit's name and the process variables it exposes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnitDefinition {
    pub name: String,
    pub variables: Vec<String>,
}

/// A single stage of the recipe: an ordered canvas of blocks wired by connections.
///
/// Operations are matched across versions by `id`, never by list position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub id: String,
    /// Ordinal position within the recipe, used for display ordering.
    pub position: u32,
    pub name: String,
    pub blocks: Vec<Block>,
    pub connections: Vec<Connection>,
}

/// The closed set of block types an operation canvas can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BlockKind {
    Start,
    Parameter,
    OperatorPrompt,
    Instrument,
    Wait,
    Profile,
    Condition,
    Cascade,
    End,
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BlockKind::Start => "Start",
            BlockKind::Parameter => "Parameter",
            BlockKind::OperatorPrompt => "Operator prompt",
            BlockKind::Instrument => "Instrument",
            BlockKind::Wait => "Wait",
            BlockKind::Profile => "Profile",
            BlockKind::Condition => "Condition",
            BlockKind::Cascade => "Cascade",
            BlockKind::End => "End",
        };
        write!(f, "{}", name)
    }
}

/// One node on the operation canvas.
///
/// Block identity is stable across edits and versions; only its fields change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub kind: BlockKind,
    pub label: String,
    pub subtitle: Option<String>,
    pub x: f64,
    pub y: f64,
    /// Type-specific configuration; `None` for kinds that carry none (e.g. Start/End).
    pub config: Option<BlockConfig>,
}

/// Type-specific block configuration, one variant per configurable [`BlockKind`].
///
/// This is a closed sum type on purpose: the diff engine matches exhaustively
/// over it, so adding a variant here forces the comparison code to be updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BlockConfig {
    Parameter {
        setpoints: Vec<Setpoint>,
    },
    OperatorPrompt {
        message: String,
    },
    Instrument {
        instrument: String,
        command: String,
    },
    Wait {
        minutes: f64,
    },
    Profile {
        variable: String,
        points: Vec<ProfilePoint>,
    },
    Condition {
        variable: String,
        operator: CompareOp,
        value: f64,
    },
    Cascade {
        master_variable: String,
        setpoint: f64,
        deadband: f64,
        actuators: Vec<CascadeActuator>,
    },
}

impl BlockConfig {
    /// Short human-readable summary, used when a diff replaces one
    /// configuration shape with another.
    pub fn summary(&self) -> String {
        match self {
            BlockConfig::Parameter { setpoints } => {
                format!("Parameter ({} setpoints)", setpoints.len())
            }
            BlockConfig::OperatorPrompt { message } => format!("Prompt \"{}\"", message),
            BlockConfig::Instrument {
                instrument,
                command,
            } => format!("Instrument {} ({})", instrument, command),
            BlockConfig::Wait { minutes } => format!("Wait {} min", minutes),
            BlockConfig::Profile { variable, points } => {
                format!("Profile {} ({} points)", variable, points.len())
            }
            BlockConfig::Condition {
                variable,
                operator,
                value,
            } => format!("Condition {} {} {}", variable, operator, value),
            BlockConfig::Cascade {
                master_variable,
                actuators,
                ..
            } => format!(
                "Cascade {} ({} actuators)",
                master_variable,
                actuators.len()
            ),
        }
    }
}

/// One controlled variable inside a Parameter block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setpoint {
    pub variable: String,
    pub value: f64,
    pub unit: Option<String>,
    pub low_alarm: Option<f64>,
    pub high_alarm: Option<f64>,
    /// Optional named formula overriding the literal value.
    pub formula: Option<String>,
}

/// A (time, value) pair on a profile curve. Points are ordered by time and
/// compared by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfilePoint {
    pub time: f64,
    pub value: f64,
}

/// One slave actuator of a Cascade block: its own point curve plus PID tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CascadeActuator {
    pub name: String,
    pub points: Vec<ProfilePoint>,
    pub proportional: f64,
    pub integral: f64,
    pub derivative: f64,
}

/// Comparison operators available to conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CompareOp {
    Equal,
    NotEqual,
    GreaterThan,
    GreaterThanOrEqual,
    SmallerThan,
    SmallerThanOrEqual,
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::GreaterThan => ">",
            CompareOp::GreaterThanOrEqual => ">=",
            CompareOp::SmallerThan => "<",
            CompareOp::SmallerThanOrEqual => "<=",
        };
        write!(f, "{}", symbol)
    }
}

/// A directed edge between two blocks of the same operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Connection {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    /// Which output of a multi-output block this edge leaves from.
    pub branch_tag: Option<String>,
    pub condition: Option<ConnectionCondition>,
    /// Raw formula alternative to a structured condition.
    pub formula: Option<String>,
    /// Connections sharing a group id share one logical fork.
    pub parallel_group: Option<String>,
    /// Display-only curve offset; still part of the comparable state.
    pub fork_offset: Option<f64>,
}

/// A structured guard on a connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConnectionCondition {
    pub variable: String,
    pub operator: CompareOp,
    pub value: f64,
}

impl fmt::Display for ConnectionCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.variable, self.operator, self.value)
    }
}
