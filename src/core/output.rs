//! Report rendering for CLI surfaces.
//!
//! Every command prints either human-readable text or a single JSON document.

use crate::core::convert::ConversionReport;
use crate::core::error::JointmapError;
use crate::core::layout::JointLayout;
use crate::core::motion::{RecordSummary, fps_label};
use crate::robot::{ActionScale, ResolvedJoint, RobotCfg};
use colored::Colorize;
use serde::Serialize;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = JointmapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(JointmapError::ValidationError(format!(
                "unknown output format '{}' (expected 'text' or 'json')",
                other
            ))),
        }
    }
}

pub fn to_json<T: Serialize>(value: &T) -> Result<String, JointmapError> {
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn render_record_list(records: &[RecordSummary]) -> String {
    let mut out = String::from("Available keys in motion archive:\n");
    for r in records {
        out.push_str(&format!(
            "  '{}' - {} frames, {} fps\n",
            r.key,
            r.frames,
            fps_label(r.fps)
        ));
    }
    out
}

pub fn render_conversion(report: &ConversionReport) -> String {
    let mut out = String::new();
    if report.key_defaulted {
        out.push_str(&format!(
            "Using motion key: '{}'\n",
            report.motion_key.as_str().bright_cyan()
        ));
    }
    out.push_str(&format!(
        "Motion: {} frames at {} FPS\n",
        report.frames,
        crate::core::motion::format_number(report.fps)
    ));
    out.push_str(&format!(
        "  root_pos: {:?}, root_rot: {:?}, dof: {:?}\n",
        report.root_pos_shape, report.root_rot_shape, report.dof_shape
    ));
    if !report.zero_filled.is_empty() {
        out.push_str(&format!(
            "  zero-filled ({}): {}\n",
            report.zero_filled.len(),
            report.zero_filled.join(", ")
        ));
    }
    out.push_str(&format!(
        "{} Saved CSV: {} ({} frames, {} columns)\n",
        "✓".bright_green(),
        report.output_path.display(),
        report.output_shape.0,
        report.output_shape.1
    ));
    out.push_str(&format!("  sha256: {}\n", report.sha256));
    out.push_str("\nNext step - convert to NPZ:\n");
    out.push_str(&format!("  {}\n", report.next_step.as_str().bright_cyan()));
    out
}

/// One line per target joint: position, name, and its source column or `zero`.
pub fn render_layout(layout: &JointLayout) -> String {
    let map = layout.index_map();
    let mut out = format!(
        "Layout '{}': {} source joints -> {} target joints\n",
        layout.name,
        layout.source.len(),
        layout.target.len()
    );
    for (t, name) in layout.target.iter().enumerate() {
        let source = match map.source_index(t) {
            Some(s) => format!("<- [{:>2}] {}", s, layout.source[s]),
            None => "<- zero".bright_yellow().to_string(),
        };
        out.push_str(&format!("  [{:>2}] {:<24} {}\n", t, name, source));
    }
    out
}

pub fn render_robot(
    cfg: &RobotCfg,
    scales: &[ActionScale],
    joints: &[ResolvedJoint],
) -> String {
    let mut out = format!("{} {}\n", "Robot".bold(), cfg.name.bold());
    out.push_str(&format!(
        "  home pos: {:?}, soft joint pos limit factor: {}\n",
        cfg.init_state.pos, cfg.articulation.soft_joint_pos_limit_factor
    ));
    out.push_str("  actuators:\n");
    for a in cfg.articulation.actuators {
        out.push_str(&format!(
            "    {:<10} kp={:<6} kd={:<4} effort={:<6} armature={}  [{}]\n",
            a.name,
            a.stiffness,
            a.damping,
            a.effort_limit
                .map(|e| e.to_string())
                .unwrap_or_else(|| "-".into()),
            a.armature,
            a.target_names_expr.join(", ")
        ));
    }
    out.push_str("  action scale:\n");
    for s in scales {
        out.push_str(&format!("    {:<26} {:.6}\n", s.pattern, s.scale));
    }
    if !joints.is_empty() {
        out.push_str("  joints:\n");
        for j in joints {
            out.push_str(&format!(
                "    {:<26} actuator={:<10} scale={:<10} pos={} vel={}\n",
                j.joint,
                j.actuator.unwrap_or("-"),
                j.action_scale
                    .map(|s| format!("{:.6}", s))
                    .unwrap_or_else(|| "-".into()),
                j.default_pos,
                j.default_vel
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parse() {
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert!("yaml".parse::<OutputFormat>().is_err());
    }

    #[test]
    fn test_record_list_uses_placeholder_for_missing_fps() {
        let text = render_record_list(&[
            RecordSummary {
                key: "walk".into(),
                frames: 120,
                fps: Some(30.0),
            },
            RecordSummary {
                key: "jump".into(),
                frames: 0,
                fps: None,
            },
        ]);
        assert!(text.contains("'walk' - 120 frames, 30 fps"));
        assert!(text.contains("'jump' - 0 frames, ? fps"));
    }

    #[test]
    fn test_render_layout_marks_zero_fill() {
        colored::control::set_override(false);
        let layout = JointLayout::new("toy", &["a", "b"], &["b", "x", "a"]);
        let text = render_layout(&layout);
        assert!(text.contains("[ 0] b"));
        assert!(text.contains("<- [ 1] b"));
        assert!(text.contains("<- zero"));
    }
}
