//! Common test utilities for building recipe snapshots.
use rireki::prelude::*;

/// Creates a bare block with no subtitle or configuration.
#[allow(dead_code)]
pub fn block(id: &str, kind: BlockKind, label: &str, x: f64, y: f64) -> Block {
    Block {
        id: id.to_string(),
        kind,
        label: label.to_string(),
        subtitle: None,
        x,
        y,
        config: None,
    }
}

/// Creates a setpoint with no unit, alarms, or formula.
#[allow(dead_code)]
pub fn setpoint(variable: &str, value: f64) -> Setpoint {
    Setpoint {
        variable: variable.to_string(),
        value,
        unit: None,
        low_alarm: None,
        high_alarm: None,
        formula: None,
    }
}

/// Creates a plain connection with no tag, condition, or grouping.
#[allow(dead_code)]
pub fn connection(id: &str, source: &str, target: &str) -> Connection {
    Connection {
        id: id.to_string(),
        source_id: source.to_string(),
        target_id: target.to_string(),
        branch_tag: None,
        condition: None,
        formula: None,
        parallel_group: None,
        fork_offset: None,
    }
}

/// Creates a simple one-operation recipe for basic tests.
///
/// Operation "Mash": start -> parameter (one temperature setpoint) -> end.
#[allow(dead_code)]
pub fn simple_recipe() -> Recipe {
    let mut recipe = Recipe::new("recipe-1", "Pale ale");
    recipe.operations.push(Operation {
        id: "op-1".to_string(),
        position: 0,
        name: "Mash".to_string(),
        blocks: vec![
            block("b0", BlockKind::Start, "Start", 0.0, 0.0),
            Block {
                id: "b1".to_string(),
                kind: BlockKind::Parameter,
                label: "Mash temperature".to_string(),
                subtitle: Some("Single infusion".to_string()),
                x: 120.0,
                y: 0.0,
                config: Some(BlockConfig::Parameter {
                    setpoints: vec![setpoint("Temperature", 67.0)],
                }),
            },
            block("b9", BlockKind::End, "End", 240.0, 0.0),
        ],
        connections: vec![connection("c1", "b0", "b1"), connection("c2", "b1", "b9")],
    });
    recipe
}

/// Creates a recipe exercising every configuration variant, for diff
/// idempotence checks.
#[allow(dead_code)]
pub fn rich_recipe() -> Recipe {
    let mut recipe = Recipe::new("recipe-2", "Lager");
    recipe.calculated_variables.push(CalculatedVariable {
        name: "HeatRate".to_string(),
        formula: "Power / Mass".to_string(),
    });
    recipe.units.push(UnitDefinition {
        name: "Fermenter 1".to_string(),
        variables: vec!["Temperature".to_string(), "Pressure".to_string()],
    });
    recipe.operations.push(Operation {
        id: "op-1".to_string(),
        position: 0,
        name: "Fermentation".to_string(),
        blocks: vec![
            block("b0", BlockKind::Start, "Start", 0.0, 0.0),
            Block {
                id: "b1".to_string(),
                kind: BlockKind::Parameter,
                label: "Initial setpoints".to_string(),
                subtitle: None,
                x: 100.0,
                y: 0.0,
                config: Some(BlockConfig::Parameter {
                    setpoints: vec![
                        Setpoint {
                            variable: "Temperature".to_string(),
                            value: 12.0,
                            unit: Some("°C".to_string()),
                            low_alarm: Some(10.0),
                            high_alarm: Some(14.0),
                            formula: None,
                        },
                        setpoint("Pressure", 1.2),
                    ],
                }),
            },
            Block {
                id: "b2".to_string(),
                kind: BlockKind::OperatorPrompt,
                label: "Confirm yeast pitch".to_string(),
                subtitle: None,
                x: 200.0,
                y: 0.0,
                config: Some(BlockConfig::OperatorPrompt {
                    message: "Pitch yeast and confirm".to_string(),
                }),
            },
            Block {
                id: "b3".to_string(),
                kind: BlockKind::Instrument,
                label: "Start agitator".to_string(),
                subtitle: None,
                x: 300.0,
                y: 0.0,
                config: Some(BlockConfig::Instrument {
                    instrument: "Agitator".to_string(),
                    command: "run".to_string(),
                }),
            },
            Block {
                id: "b4".to_string(),
                kind: BlockKind::Wait,
                label: "Hold".to_string(),
                subtitle: None,
                x: 400.0,
                y: 0.0,
                config: Some(BlockConfig::Wait { minutes: 90.0 }),
            },
            Block {
                id: "b5".to_string(),
                kind: BlockKind::Profile,
                label: "Ramp".to_string(),
                subtitle: None,
                x: 500.0,
                y: 0.0,
                config: Some(BlockConfig::Profile {
                    variable: "Temperature".to_string(),
                    points: vec![
                        ProfilePoint {
                            time: 0.0,
                            value: 12.0,
                        },
                        ProfilePoint {
                            time: 60.0,
                            value: 18.0,
                        },
                    ],
                }),
            },
            Block {
                id: "b6".to_string(),
                kind: BlockKind::Condition,
                label: "Gravity reached".to_string(),
                subtitle: None,
                x: 600.0,
                y: 0.0,
                config: Some(BlockConfig::Condition {
                    variable: "Gravity".to_string(),
                    operator: CompareOp::SmallerThan,
                    value: 1.012,
                }),
            },
            Block {
                id: "b7".to_string(),
                kind: BlockKind::Cascade,
                label: "Jacket control".to_string(),
                subtitle: None,
                x: 700.0,
                y: 0.0,
                config: Some(BlockConfig::Cascade {
                    master_variable: "Temperature".to_string(),
                    setpoint: 12.0,
                    deadband: 0.5,
                    actuators: vec![CascadeActuator {
                        name: "Glycol valve".to_string(),
                        points: vec![ProfilePoint {
                            time: 0.0,
                            value: 0.0,
                        }],
                        proportional: 2.0,
                        integral: 0.5,
                        derivative: 0.0,
                    }],
                }),
            },
            block("b9", BlockKind::End, "End", 800.0, 0.0),
        ],
        connections: vec![
            connection("c1", "b0", "b1"),
            Connection {
                id: "c2".to_string(),
                source_id: "b6".to_string(),
                target_id: "b9".to_string(),
                branch_tag: Some("true".to_string()),
                condition: Some(ConnectionCondition {
                    variable: "Gravity".to_string(),
                    operator: CompareOp::SmallerThan,
                    value: 1.012,
                }),
                formula: None,
                parallel_group: Some("fork-1".to_string()),
                fork_offset: Some(24.0),
            },
        ],
    });
    recipe
}
