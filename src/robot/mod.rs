//! Robot descriptions used alongside converted motions.
//!
//! - `x02`: actuator gains, home keyframe, collision and articulation settings

pub mod x02;

use crate::core::error::JointmapError;
use regex::Regex;
use serde::Serialize;

/// A position actuator applied to every joint matching one of its patterns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActuatorCfg {
    pub name: &'static str,
    pub target_names_expr: &'static [&'static str],
    pub stiffness: f64,
    pub damping: f64,
    pub effort_limit: Option<f64>,
    pub armature: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InitialState {
    pub pos: [f64; 3],
    /// `(pattern, value)` pairs; the first matching pattern wins.
    pub joint_pos: &'static [(&'static str, f64)],
    pub joint_vel: &'static [(&'static str, f64)],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollisionCfg {
    pub geom_names_expr: &'static [&'static str],
    pub condim: u32,
    pub friction: &'static [f64],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ArticulationCfg {
    pub actuators: &'static [ActuatorCfg],
    pub soft_joint_pos_limit_factor: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RobotCfg {
    pub name: &'static str,
    pub init_state: InitialState,
    pub collisions: &'static [CollisionCfg],
    pub articulation: ArticulationCfg,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActionScale {
    pub pattern: &'static str,
    pub scale: f64,
}

/// Per-joint view of a robot config for a concrete joint list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedJoint {
    pub joint: String,
    pub actuator: Option<&'static str>,
    pub action_scale: Option<f64>,
    pub default_pos: f64,
    pub default_vel: f64,
}

/// Compile a joint-name pattern that must match the whole name.
pub fn full_match(pattern: &str) -> Result<Regex, JointmapError> {
    Ok(Regex::new(&format!("^(?:{})$", pattern))?)
}

impl RobotCfg {
    /// `0.25 * effort_limit / stiffness` for every pattern of every actuator.
    pub fn action_scale(&self) -> Result<Vec<ActionScale>, JointmapError> {
        let mut scales = Vec::new();
        for a in self.articulation.actuators {
            let effort = a.effort_limit.ok_or_else(|| {
                JointmapError::ValidationError(format!(
                    "actuator '{}' has no effort limit",
                    a.name
                ))
            })?;
            for pattern in a.target_names_expr {
                scales.push(ActionScale {
                    pattern: *pattern,
                    scale: 0.25 * effort / a.stiffness,
                });
            }
        }
        Ok(scales)
    }

    /// Match each joint against actuator patterns and keyframe defaults.
    pub fn resolve_joints<S: AsRef<str>>(
        &self,
        joints: &[S],
    ) -> Result<Vec<ResolvedJoint>, JointmapError> {
        let mut actuator_patterns = Vec::new();
        for a in self.articulation.actuators {
            for pattern in a.target_names_expr {
                actuator_patterns.push((full_match(pattern)?, a));
            }
        }
        let pos_patterns = compile_pairs(self.init_state.joint_pos)?;
        let vel_patterns = compile_pairs(self.init_state.joint_vel)?;

        joints
            .iter()
            .map(|joint| {
                let joint = joint.as_ref();
                let actuator = actuator_patterns
                    .iter()
                    .find(|(re, _)| re.is_match(joint))
                    .map(|(_, a)| *a);
                Ok(ResolvedJoint {
                    joint: joint.to_string(),
                    actuator: actuator.map(|a| a.name),
                    action_scale: actuator
                        .and_then(|a| a.effort_limit.map(|e| 0.25 * e / a.stiffness)),
                    default_pos: first_value(&pos_patterns, joint),
                    default_vel: first_value(&vel_patterns, joint),
                })
            })
            .collect()
    }
}

fn compile_pairs(pairs: &[(&str, f64)]) -> Result<Vec<(Regex, f64)>, JointmapError> {
    pairs
        .iter()
        .map(|(p, v)| Ok((full_match(p)?, *v)))
        .collect()
}

fn first_value(patterns: &[(Regex, f64)], joint: &str) -> f64 {
    patterns
        .iter()
        .find(|(re, _)| re.is_match(joint))
        .map(|(_, v)| *v)
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_match_is_anchored() {
        let re = full_match("torso_joint").unwrap();
        assert!(re.is_match("torso_joint"));
        assert!(!re.is_match("upper_torso_joint"));
        assert!(!re.is_match("torso_joint_2"));
    }

    #[test]
    fn test_bad_pattern_is_error() {
        assert!(matches!(
            full_match("(unclosed"),
            Err(JointmapError::PatternError(_))
        ));
    }
}
