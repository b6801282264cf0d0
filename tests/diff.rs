//! Tests for the structural diff engine.
mod common;
use common::*;
use rireki::prelude::*;

#[test]
fn test_diff_identical_snapshots_is_empty() {
    let recipe = rich_recipe();
    let result = diff(&recipe, &recipe);

    assert!(result.summary.is_empty());
    assert!(result.operations.is_empty());
    assert!(!result.name.changed);
}

#[test]
fn test_diff_is_deterministic() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0]
        .blocks
        .push(block("b2", BlockKind::Wait, "Hold", 300.0, 50.0));
    new.operations[0].blocks[1].x = 150.0;

    assert_eq!(diff(&old, &new), diff(&old, &new));
}

#[test]
fn test_added_block_is_reported() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0]
        .blocks
        .push(block("b2", BlockKind::Wait, "Hold", 300.0, 50.0));

    let result = diff(&old, &new);

    assert_eq!(result.summary.blocks_added, 1);
    assert_eq!(result.summary.blocks_removed, 0);
    let op_diff = &result.operations[0];
    let added: Vec<&BlockDiff> = op_diff
        .blocks
        .iter()
        .filter(|b| b.change == ChangeKind::Added)
        .collect();
    assert_eq!(added.len(), 1);
    assert_eq!(added[0].block_id, "b2");
}

#[test]
fn test_add_remove_symmetry() {
    let a = simple_recipe();
    let mut b = simple_recipe();
    b.operations[0]
        .blocks
        .push(block("b2", BlockKind::Wait, "Hold", 300.0, 50.0));
    b.operations.push(Operation {
        id: "op-2".to_string(),
        position: 1,
        name: "Boil".to_string(),
        blocks: vec![],
        connections: vec![],
    });

    let forward = diff(&a, &b);
    let backward = diff(&b, &a);

    assert_eq!(forward.summary.blocks_added, backward.summary.blocks_removed);
    assert_eq!(forward.summary.operations_added, 1);
    assert_eq!(backward.summary.operations_removed, 1);
    let added_op = forward
        .operations
        .iter()
        .find(|o| o.change == ChangeKind::Added)
        .unwrap();
    let removed_op = backward
        .operations
        .iter()
        .find(|o| o.change == ChangeKind::Removed)
        .unwrap();
    assert_eq!(added_op.operation_id, removed_op.operation_id);
}

#[test]
fn test_position_only_move() {
    let mut old = simple_recipe();
    old.operations[0].blocks[1].x = 10.0;
    let mut new = simple_recipe();
    new.operations[0].blocks[1].x = 50.0;

    let result = diff(&old, &new);

    assert_eq!(result.summary.blocks_modified, 1);
    let block_diff = &result.operations[0].blocks[0];
    assert!(block_diff.position_only);
    assert_eq!(block_diff.changes.len(), 1);
    let change = &block_diff.changes[0];
    assert_eq!(change.property, "Position X");
    assert_eq!(change.old, "10");
    assert_eq!(change.new, "50");
}

#[test]
fn test_position_and_content_change_is_not_position_only() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].blocks[1].x = 400.0;
    new.operations[0].blocks[1].label = "Mash in".to_string();

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert!(!block_diff.position_only);
    assert_eq!(block_diff.changes.len(), 2);
}

#[test]
fn test_both_coordinates_moving_stays_position_only() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].blocks[1].x = 400.0;
    new.operations[0].blocks[1].y = 80.0;

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert!(block_diff.position_only);
    assert_eq!(block_diff.changes.len(), 2);
}

#[test]
fn test_name_change_is_reported() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.name = "India pale ale".to_string();

    let result = diff(&old, &new);

    assert!(result.name.changed);
    assert_eq!(result.name.old, "Pale ale");
    assert_eq!(result.name.new, "India pale ale");
    assert!(result.summary.name_changed);
    assert!(!result.summary.is_empty());
}

#[test]
fn test_operation_rename_is_a_property_change() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].name = "Mash in".to_string();

    let result = diff(&old, &new);

    assert_eq!(result.summary.operations_modified, 1);
    let op_diff = &result.operations[0];
    assert_eq!(op_diff.change, ChangeKind::Modified);
    assert_eq!(op_diff.changes.len(), 1);
    assert_eq!(op_diff.changes[0].property, "Name");
}

#[test]
fn test_added_operation_is_recorded_without_nested_diffs() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations.push(Operation {
        id: "op-2".to_string(),
        position: 1,
        name: "Boil".to_string(),
        blocks: vec![block("x1", BlockKind::Start, "Start", 0.0, 0.0)],
        connections: vec![],
    });

    let result = diff(&old, &new);

    assert_eq!(result.summary.operations_added, 1);
    assert_eq!(result.summary.blocks_added, 0);
    let op_diff = result
        .operations
        .iter()
        .find(|o| o.change == ChangeKind::Added)
        .unwrap();
    assert!(op_diff.blocks.is_empty());
    assert!(op_diff.connections.is_empty());
}

#[test]
fn test_config_variant_replacement_is_one_change() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].blocks[1].config = Some(BlockConfig::Wait { minutes: 30.0 });

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert_eq!(block_diff.changes.len(), 1);
    let change = &block_diff.changes[0];
    assert_eq!(change.property, "Configuration");
    assert_eq!(change.old, "Parameter (1 setpoints)");
    assert_eq!(change.new, "Wait 30 min");
}

#[test]
fn test_config_gained_from_none_is_one_change() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].blocks[0].config = Some(BlockConfig::OperatorPrompt {
        message: "Ready?".to_string(),
    });

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert_eq!(block_diff.changes.len(), 1);
    assert_eq!(block_diff.changes[0].property, "Configuration");
    assert_eq!(block_diff.changes[0].old, "—");
}

#[test]
fn test_setpoint_value_change() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    if let Some(BlockConfig::Parameter { setpoints }) = &mut new.operations[0].blocks[1].config {
        setpoints[0].value = 68.0;
    }

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert!(!block_diff.position_only);
    assert_eq!(block_diff.changes.len(), 1);
    let change = &block_diff.changes[0];
    assert_eq!(change.property, "Setpoint Temperature");
    assert_eq!(change.old, "67");
    assert_eq!(change.new, "68");
}

#[test]
fn test_setpoints_match_by_variable_not_position() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    if let Some(BlockConfig::Parameter { setpoints }) = &mut new.operations[0].blocks[1].config {
        // Prepend a new setpoint; the existing one shifts position but is unchanged.
        setpoints.insert(0, setpoint("Pressure", 1.5));
    }

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    assert_eq!(block_diff.changes.len(), 1);
    assert_eq!(block_diff.changes[0].property, "Setpoint Pressure");
    assert_eq!(block_diff.changes[0].old, "—");
}

#[test]
fn test_setpoint_alarm_and_unit_changes() {
    let old = rich_recipe();
    let mut new = rich_recipe();
    if let Some(BlockConfig::Parameter { setpoints }) = &mut new.operations[0].blocks[1].config {
        setpoints[0].high_alarm = Some(15.0);
        setpoints[0].unit = Some("K".to_string());
    }

    let result = diff(&old, &new);

    let block_diff = &result.operations[0].blocks[0];
    let properties: Vec<&str> = block_diff
        .changes
        .iter()
        .map(|c| c.property.as_str())
        .collect();
    assert!(properties.contains(&"Setpoint Temperature unit"));
    assert!(properties.contains(&"Setpoint Temperature high alarm"));
    assert_eq!(block_diff.changes.len(), 2);
}

#[test]
fn test_profile_points_compared_by_index() {
    let old = rich_recipe();
    let mut new = rich_recipe();
    if let Some(BlockConfig::Profile { points, .. }) = &mut new.operations[0].blocks[5].config {
        points[1].value = 20.0;
        points.push(ProfilePoint {
            time: 120.0,
            value: 22.0,
        });
    }

    let result = diff(&old, &new);

    let block_diff = result.operations[0]
        .blocks
        .iter()
        .find(|b| b.block_id == "b5")
        .unwrap();
    let properties: Vec<&str> = block_diff
        .changes
        .iter()
        .map(|c| c.property.as_str())
        .collect();
    assert_eq!(properties, vec!["Point 2", "Point 3"]);
    assert_eq!(block_diff.changes[0].old, "(60, 18)");
    assert_eq!(block_diff.changes[0].new, "(60, 20)");
    assert_eq!(block_diff.changes[1].old, "—");
}

#[test]
fn test_cascade_actuator_tuning_and_membership() {
    let old = rich_recipe();
    let mut new = rich_recipe();
    if let Some(BlockConfig::Cascade { actuators, .. }) = &mut new.operations[0].blocks[7].config {
        actuators[0].integral = 0.8;
        actuators.push(CascadeActuator {
            name: "Steam valve".to_string(),
            points: vec![],
            proportional: 1.0,
            integral: 0.0,
            derivative: 0.0,
        });
    }

    let result = diff(&old, &new);

    let block_diff = result.operations[0]
        .blocks
        .iter()
        .find(|b| b.block_id == "b7")
        .unwrap();
    let properties: Vec<&str> = block_diff
        .changes
        .iter()
        .map(|c| c.property.as_str())
        .collect();
    assert!(properties.contains(&"Actuator Glycol valve integral"));
    assert!(properties.contains(&"Actuator Steam valve"));
}

#[test]
fn test_connection_field_changes() {
    let old = rich_recipe();
    let mut new = rich_recipe();
    {
        let connection = &mut new.operations[0].connections[1];
        connection.branch_tag = Some("false".to_string());
        connection.condition = Some(ConnectionCondition {
            variable: "Gravity".to_string(),
            operator: CompareOp::SmallerThanOrEqual,
            value: 1.010,
        });
        connection.fork_offset = None;
    }

    let result = diff(&old, &new);

    assert_eq!(result.summary.connections_modified, 1);
    let connection_diff = &result.operations[0].connections[0];
    assert_eq!(connection_diff.connection_id, "c2");
    let properties: Vec<&str> = connection_diff
        .changes
        .iter()
        .map(|c| c.property.as_str())
        .collect();
    assert_eq!(properties, vec!["Branch tag", "Condition", "Fork offset"]);
    assert_eq!(connection_diff.changes[1].old, "Gravity < 1.012");
    assert_eq!(connection_diff.changes[1].new, "Gravity <= 1.01");
    assert_eq!(connection_diff.changes[2].new, "—");
}

#[test]
fn test_connection_added_and_removed() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.operations[0].connections.remove(0);
    new.operations[0]
        .connections
        .push(connection("c3", "b0", "b9"));

    let result = diff(&old, &new);

    assert_eq!(result.summary.connections_added, 1);
    assert_eq!(result.summary.connections_removed, 1);
    let ids: Vec<(&str, ChangeKind)> = result.operations[0]
        .connections
        .iter()
        .map(|c| (c.connection_id.as_str(), c.change))
        .collect();
    assert!(ids.contains(&("c3", ChangeKind::Added)));
    assert!(ids.contains(&("c1", ChangeKind::Removed)));
}

#[test]
fn test_summary_counts_roll_up() {
    let old = simple_recipe();
    let mut new = simple_recipe();
    new.name = "Amber ale".to_string();
    new.operations[0]
        .blocks
        .push(block("b2", BlockKind::Wait, "Hold", 300.0, 50.0));
    new.operations[0].blocks[1].y = 40.0;
    new.operations[0].connections.remove(1);
    new.operations.push(Operation {
        id: "op-2".to_string(),
        position: 1,
        name: "Boil".to_string(),
        blocks: vec![],
        connections: vec![],
    });

    let summary = diff(&old, &new).summary;

    assert_eq!(summary.blocks_added, 1);
    assert_eq!(summary.blocks_modified, 1);
    assert_eq!(summary.connections_removed, 1);
    assert_eq!(summary.operations_added, 1);
    assert_eq!(summary.operations_modified, 1);
    assert!(summary.name_changed);
    assert!(!summary.is_empty());
}
