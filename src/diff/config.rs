//! Per-variant comparison of block configurations.
//!
//! The match in [`compare_configs`] is exhaustive over [`BlockConfig`] with no
//! wildcard arm, so adding a configuration variant will not compile until its
//! comparison is written.

use super::changes::{BlockDiff, ChangeKind, PropertyChange};
use crate::recipe::{Block, BlockConfig, CascadeActuator, ProfilePoint, Setpoint};
use ahash::AHashMap;

/// Compares a matched block pair. Returns `None` when nothing differs.
pub(super) fn diff_block(old: &Block, new: &Block) -> Option<BlockDiff> {
    let mut changes = Vec::new();
    let mut position_changes = 0usize;

    if old.kind != new.kind {
        changes.push(PropertyChange::new(
            "Type",
            old.kind.to_string(),
            new.kind.to_string(),
        ));
    }
    if old.label != new.label {
        changes.push(PropertyChange::new(
            "Label",
            old.label.clone(),
            new.label.clone(),
        ));
    }
    if old.subtitle != new.subtitle {
        changes.push(PropertyChange::new(
            "Subtitle",
            fmt_opt_text(old.subtitle.as_deref()),
            fmt_opt_text(new.subtitle.as_deref()),
        ));
    }
    if old.x != new.x {
        changes.push(PropertyChange::new("Position X", fmt_num(old.x), fmt_num(new.x)));
        position_changes += 1;
    }
    if old.y != new.y {
        changes.push(PropertyChange::new("Position Y", fmt_num(old.y), fmt_num(new.y)));
        position_changes += 1;
    }

    match (&old.config, &new.config) {
        (None, None) => {}
        (Some(a), Some(b)) => compare_configs(a, b, &mut changes),
        (a, b) => changes.push(PropertyChange::new(
            "Configuration",
            a.as_ref().map_or_else(|| "—".to_string(), BlockConfig::summary),
            b.as_ref().map_or_else(|| "—".to_string(), BlockConfig::summary),
        )),
    }

    if changes.is_empty() {
        return None;
    }
    let position_only = position_changes > 0 && position_changes == changes.len();
    Some(BlockDiff {
        block_id: new.id.clone(),
        label: new.label.clone(),
        kind: new.kind,
        change: ChangeKind::Modified,
        changes,
        position_only,
    })
}

/// Field-pairwise comparison when both sides carry a configuration. Different
/// variants collapse into a single full-replace entry.
fn compare_configs(old: &BlockConfig, new: &BlockConfig, changes: &mut Vec<PropertyChange>) {
    let replaced = |changes: &mut Vec<PropertyChange>| {
        changes.push(PropertyChange::new(
            "Configuration",
            old.summary(),
            new.summary(),
        ));
    };

    match old {
        BlockConfig::Parameter { setpoints } => {
            if let BlockConfig::Parameter {
                setpoints: new_setpoints,
            } = new
            {
                compare_setpoints(setpoints, new_setpoints, changes);
            } else {
                replaced(changes);
            }
        }
        BlockConfig::OperatorPrompt { message } => {
            if let BlockConfig::OperatorPrompt {
                message: new_message,
            } = new
            {
                if message != new_message {
                    changes.push(PropertyChange::new(
                        "Message",
                        message.clone(),
                        new_message.clone(),
                    ));
                }
            } else {
                replaced(changes);
            }
        }
        BlockConfig::Instrument {
            instrument,
            command,
        } => {
            if let BlockConfig::Instrument {
                instrument: new_instrument,
                command: new_command,
            } = new
            {
                if instrument != new_instrument {
                    changes.push(PropertyChange::new(
                        "Instrument",
                        instrument.clone(),
                        new_instrument.clone(),
                    ));
                }
                if command != new_command {
                    changes.push(PropertyChange::new(
                        "Command",
                        command.clone(),
                        new_command.clone(),
                    ));
                }
            } else {
                replaced(changes);
            }
        }
        BlockConfig::Wait { minutes } => {
            if let BlockConfig::Wait {
                minutes: new_minutes,
            } = new
            {
                if minutes != new_minutes {
                    changes.push(PropertyChange::new(
                        "Wait minutes",
                        fmt_num(*minutes),
                        fmt_num(*new_minutes),
                    ));
                }
            } else {
                replaced(changes);
            }
        }
        BlockConfig::Profile { variable, points } => {
            if let BlockConfig::Profile {
                variable: new_variable,
                points: new_points,
            } = new
            {
                if variable != new_variable {
                    changes.push(PropertyChange::new(
                        "Profile variable",
                        variable.clone(),
                        new_variable.clone(),
                    ));
                }
                compare_points("Point", points, new_points, changes);
            } else {
                replaced(changes);
            }
        }
        BlockConfig::Condition {
            variable,
            operator,
            value,
        } => {
            if let BlockConfig::Condition {
                variable: new_variable,
                operator: new_operator,
                value: new_value,
            } = new
            {
                if variable != new_variable {
                    changes.push(PropertyChange::new(
                        "Condition variable",
                        variable.clone(),
                        new_variable.clone(),
                    ));
                }
                if operator != new_operator {
                    changes.push(PropertyChange::new(
                        "Condition operator",
                        operator.to_string(),
                        new_operator.to_string(),
                    ));
                }
                if value != new_value {
                    changes.push(PropertyChange::new(
                        "Condition value",
                        fmt_num(*value),
                        fmt_num(*new_value),
                    ));
                }
            } else {
                replaced(changes);
            }
        }
        BlockConfig::Cascade {
            master_variable,
            setpoint,
            deadband,
            actuators,
        } => {
            if let BlockConfig::Cascade {
                master_variable: new_master,
                setpoint: new_setpoint,
                deadband: new_deadband,
                actuators: new_actuators,
            } = new
            {
                if master_variable != new_master {
                    changes.push(PropertyChange::new(
                        "Master variable",
                        master_variable.clone(),
                        new_master.clone(),
                    ));
                }
                if setpoint != new_setpoint {
                    changes.push(PropertyChange::new(
                        "Cascade setpoint",
                        fmt_num(*setpoint),
                        fmt_num(*new_setpoint),
                    ));
                }
                if deadband != new_deadband {
                    changes.push(PropertyChange::new(
                        "Deadband",
                        fmt_num(*deadband),
                        fmt_num(*new_deadband),
                    ));
                }
                compare_actuators(actuators, new_actuators, changes);
            } else {
                replaced(changes);
            }
        }
    }
}

/// Setpoints carry a stable sub-identity (their variable name), so they are
/// matched by variable rather than by list position.
fn compare_setpoints(old: &[Setpoint], new: &[Setpoint], changes: &mut Vec<PropertyChange>) {
    let old_by_var: AHashMap<&str, &Setpoint> =
        old.iter().map(|sp| (sp.variable.as_str(), sp)).collect();
    let new_by_var: AHashMap<&str, &Setpoint> =
        new.iter().map(|sp| (sp.variable.as_str(), sp)).collect();

    for sp in new {
        match old_by_var.get(sp.variable.as_str()) {
            None => changes.push(PropertyChange::new(
                format!("Setpoint {}", sp.variable),
                "—",
                fmt_setpoint(sp),
            )),
            Some(old_sp) => {
                if old_sp.value != sp.value {
                    changes.push(PropertyChange::new(
                        format!("Setpoint {}", sp.variable),
                        fmt_num(old_sp.value),
                        fmt_num(sp.value),
                    ));
                }
                if old_sp.unit != sp.unit {
                    changes.push(PropertyChange::new(
                        format!("Setpoint {} unit", sp.variable),
                        fmt_opt_text(old_sp.unit.as_deref()),
                        fmt_opt_text(sp.unit.as_deref()),
                    ));
                }
                if old_sp.low_alarm != sp.low_alarm {
                    changes.push(PropertyChange::new(
                        format!("Setpoint {} low alarm", sp.variable),
                        fmt_opt_num(old_sp.low_alarm),
                        fmt_opt_num(sp.low_alarm),
                    ));
                }
                if old_sp.high_alarm != sp.high_alarm {
                    changes.push(PropertyChange::new(
                        format!("Setpoint {} high alarm", sp.variable),
                        fmt_opt_num(old_sp.high_alarm),
                        fmt_opt_num(sp.high_alarm),
                    ));
                }
                if old_sp.formula != sp.formula {
                    changes.push(PropertyChange::new(
                        format!("Setpoint {} formula", sp.variable),
                        fmt_opt_text(old_sp.formula.as_deref()),
                        fmt_opt_text(sp.formula.as_deref()),
                    ));
                }
            }
        }
    }
    for sp in old {
        if !new_by_var.contains_key(sp.variable.as_str()) {
            changes.push(PropertyChange::new(
                format!("Setpoint {}", sp.variable),
                fmt_setpoint(sp),
                "—",
            ));
        }
    }
}

/// Curve points have no identity of their own and are compared by index.
fn compare_points(
    prefix: &str,
    old: &[ProfilePoint],
    new: &[ProfilePoint],
    changes: &mut Vec<PropertyChange>,
) {
    for i in 0..old.len().max(new.len()) {
        match (old.get(i), new.get(i)) {
            (Some(a), Some(b)) if a != b => changes.push(PropertyChange::new(
                format!("{} {}", prefix, i + 1),
                fmt_point(a),
                fmt_point(b),
            )),
            (Some(a), None) => changes.push(PropertyChange::new(
                format!("{} {}", prefix, i + 1),
                fmt_point(a),
                "—",
            )),
            (None, Some(b)) => changes.push(PropertyChange::new(
                format!("{} {}", prefix, i + 1),
                "—",
                fmt_point(b),
            )),
            _ => {}
        }
    }
}

/// Actuators are matched by name; their point curves by index.
fn compare_actuators(
    old: &[CascadeActuator],
    new: &[CascadeActuator],
    changes: &mut Vec<PropertyChange>,
) {
    let old_by_name: AHashMap<&str, &CascadeActuator> =
        old.iter().map(|a| (a.name.as_str(), a)).collect();
    let new_by_name: AHashMap<&str, &CascadeActuator> =
        new.iter().map(|a| (a.name.as_str(), a)).collect();

    for actuator in new {
        match old_by_name.get(actuator.name.as_str()) {
            None => changes.push(PropertyChange::new(
                format!("Actuator {}", actuator.name),
                "—",
                fmt_actuator(actuator),
            )),
            Some(old_actuator) => {
                if old_actuator.proportional != actuator.proportional {
                    changes.push(PropertyChange::new(
                        format!("Actuator {} proportional", actuator.name),
                        fmt_num(old_actuator.proportional),
                        fmt_num(actuator.proportional),
                    ));
                }
                if old_actuator.integral != actuator.integral {
                    changes.push(PropertyChange::new(
                        format!("Actuator {} integral", actuator.name),
                        fmt_num(old_actuator.integral),
                        fmt_num(actuator.integral),
                    ));
                }
                if old_actuator.derivative != actuator.derivative {
                    changes.push(PropertyChange::new(
                        format!("Actuator {} derivative", actuator.name),
                        fmt_num(old_actuator.derivative),
                        fmt_num(actuator.derivative),
                    ));
                }
                compare_points(
                    &format!("Actuator {} point", actuator.name),
                    &old_actuator.points,
                    &actuator.points,
                    changes,
                );
            }
        }
    }
    for actuator in old {
        if !new_by_name.contains_key(actuator.name.as_str()) {
            changes.push(PropertyChange::new(
                format!("Actuator {}", actuator.name),
                fmt_actuator(actuator),
                "—",
            ));
        }
    }
}

fn fmt_setpoint(sp: &Setpoint) -> String {
    match &sp.unit {
        Some(unit) => format!("{} {}", fmt_num(sp.value), unit),
        None => fmt_num(sp.value),
    }
}

fn fmt_actuator(actuator: &CascadeActuator) -> String {
    format!("{} points", actuator.points.len())
}

fn fmt_point(point: &ProfilePoint) -> String {
    format!("({}, {})", fmt_num(point.time), fmt_num(point.value))
}

/// Integral values render without the fraction, matching how the editor
/// displays them.
pub(super) fn fmt_num(n: f64) -> String {
    if n.fract() == 0.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

pub(super) fn fmt_opt_num(n: Option<f64>) -> String {
    n.map_or_else(|| "—".to_string(), fmt_num)
}

pub(super) fn fmt_opt_text(text: Option<&str>) -> String {
    text.unwrap_or("—").to_string()
}
