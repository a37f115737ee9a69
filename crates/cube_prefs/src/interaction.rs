use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InteractionPreferences {
    /// Number of pixels the pointer must travel before a drag on a cubie
    /// counts as a move.
    pub drag_threshold: f32,
    /// Same as `drag_threshold`, but in world units for world-space drags.
    pub world_drag_threshold: f32,
    /// Minimum agreement (cosine of the angle) between the drag direction and
    /// a move's on-screen direction for the move to be accepted.
    pub drag_confidence_threshold: f32,
    /// Angle in radians by which candidate moves are probed when measuring
    /// their on-screen direction.
    pub drag_probe_angle: f32,
    /// Radians of camera rotation per pixel of orbit drag.
    pub orbit_sensitivity: f32,
    /// Manual input is disabled while more than this many moves are queued.
    pub manual_input_queue_limit: usize,
}
impl Default for InteractionPreferences {
    fn default() -> Self {
        Self {
            drag_threshold: 20.0,
            world_drag_threshold: 0.1,
            drag_confidence_threshold: 0.5,
            drag_probe_angle: 0.1,
            orbit_sensitivity: 0.01,
            manual_input_queue_limit: 5,
        }
    }
}
