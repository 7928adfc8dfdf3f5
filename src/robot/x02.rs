//! BitBots x02 constants.
//!
//! PD gains and effort limits follow the HoST legged_gym x02 config; armature
//! is the HoST default for x02.

use super::{ActuatorCfg, ArticulationCfg, CollisionCfg, InitialState, RobotCfg};

pub const ARMATURE: f64 = 0.01;

pub const HIP_YAW: ActuatorCfg = ActuatorCfg {
    name: "hip_yaw",
    target_names_expr: &[".*_hip_yaw_joint"],
    stiffness: 160.0,
    damping: 4.0,
    effort_limit: Some(50.0),
    armature: ARMATURE,
};

pub const HIP_ROLL: ActuatorCfg = ActuatorCfg {
    name: "hip_roll",
    target_names_expr: &[".*_hip_roll_joint"],
    stiffness: 200.0,
    damping: 5.0,
    effort_limit: Some(50.0),
    armature: ARMATURE,
};

pub const HIP_PITCH: ActuatorCfg = ActuatorCfg {
    name: "hip_pitch",
    target_names_expr: &[".*_hip_pitch_joint"],
    stiffness: 200.0,
    damping: 5.0,
    effort_limit: Some(72.0),
    armature: ARMATURE,
};

pub const KNEE: ActuatorCfg = ActuatorCfg {
    name: "knee",
    target_names_expr: &[".*_knee_pitch_joint"],
    stiffness: 200.0,
    damping: 5.0,
    effort_limit: Some(60.0),
    armature: ARMATURE,
};

pub const ANKLE: ActuatorCfg = ActuatorCfg {
    name: "ankle",
    target_names_expr: &[".*_ankle_pitch_joint"],
    stiffness: 30.0,
    damping: 1.0,
    effort_limit: Some(30.0),
    armature: ARMATURE,
};

pub const TORSO: ActuatorCfg = ActuatorCfg {
    name: "torso",
    target_names_expr: &["torso_joint"],
    stiffness: 100.0,
    damping: 4.0,
    effort_limit: Some(50.0),
    armature: ARMATURE,
};

pub const SHOULDER: ActuatorCfg = ActuatorCfg {
    name: "shoulder",
    target_names_expr: &[
        ".*_shoulder_pitch_joint",
        ".*_shoulder_roll_joint",
        ".*_shoulder_yaw_joint",
    ],
    stiffness: 100.0,
    damping: 4.0,
    effort_limit: Some(24.0),
    armature: ARMATURE,
};

pub const ELBOW: ActuatorCfg = ActuatorCfg {
    name: "elbow",
    target_names_expr: &[".*_elbow_joint"],
    stiffness: 100.0,
    damping: 4.0,
    effort_limit: Some(24.0),
    armature: ARMATURE,
};

pub const HOME_KEYFRAME: InitialState = InitialState {
    pos: [0.0, 0.0, 0.87],
    joint_pos: &[
        (".*_hip_pitch_joint", -0.1),
        (".*_knee_pitch_joint", 0.3),
        (".*_ankle_pitch_joint", -0.2),
        (".*_shoulder_pitch_joint", 0.2),
        (".*_elbow_joint", 0.5),
    ],
    joint_vel: &[(".*", 0.0)],
};

pub const FULL_COLLISION: CollisionCfg = CollisionCfg {
    geom_names_expr: &[".*"],
    condim: 3,
    friction: &[0.6],
};

pub const ARTICULATION: ArticulationCfg = ArticulationCfg {
    actuators: &[
        HIP_YAW, HIP_ROLL, HIP_PITCH, KNEE, ANKLE, TORSO, SHOULDER, ELBOW,
    ],
    soft_joint_pos_limit_factor: 0.9,
};

/// A fresh x02 robot configuration.
pub fn robot_cfg() -> RobotCfg {
    RobotCfg {
        name: "x02",
        init_state: HOME_KEYFRAME,
        collisions: &[FULL_COLLISION],
        articulation: ARTICULATION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_scale_per_pattern() {
        let scales = robot_cfg().action_scale().unwrap();
        // one entry per pattern: 7 single-pattern groups + 3 shoulder patterns
        assert_eq!(scales.len(), 10);
        let get = |p: &str| scales.iter().find(|s| s.pattern == p).unwrap().scale;
        assert!((get(".*_hip_yaw_joint") - 0.078125).abs() < 1e-12);
        assert!((get(".*_hip_pitch_joint") - 0.09).abs() < 1e-12);
        assert!((get(".*_ankle_pitch_joint") - 0.25).abs() < 1e-12);
        assert!((get(".*_shoulder_roll_joint") - 0.06).abs() < 1e-12);
    }

    #[test]
    fn test_action_scale_requires_effort_limit() {
        const NO_LIMIT: ActuatorCfg = ActuatorCfg {
            effort_limit: None,
            ..KNEE
        };
        let mut cfg = robot_cfg();
        cfg.articulation.actuators = &[NO_LIMIT];
        assert!(cfg.action_scale().is_err());
    }

    #[test]
    fn test_keyframe_resolution() {
        let joints = ["left_knee_pitch_joint", "torso_joint", "right_elbow_joint"];
        let resolved = robot_cfg().resolve_joints(&joints).unwrap();
        assert_eq!(resolved[0].actuator, Some("knee"));
        assert_eq!(resolved[0].default_pos, 0.3);
        assert_eq!(resolved[1].actuator, Some("torso"));
        assert_eq!(resolved[1].default_pos, 0.0);
        assert_eq!(resolved[1].action_scale, Some(0.125));
        assert_eq!(resolved[2].default_pos, 0.5);
        assert!(resolved.iter().all(|j| j.default_vel == 0.0));
    }

    #[test]
    fn test_unmatched_joint_has_no_actuator() {
        let resolved = robot_cfg().resolve_joints(&["left_wrist_roll_joint"]).unwrap();
        assert_eq!(resolved[0].actuator, None);
        assert_eq!(resolved[0].action_scale, None);
    }
}
