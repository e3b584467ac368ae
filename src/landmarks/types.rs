use serde::{Deserialize, Serialize};

/// A single hand landmark in normalized image coordinates
///
/// x and y are in [0, 1] relative to the frame; z is depth relative to the
/// wrist (MediaPipe convention).
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Landmark {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Landmark {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<[f32; 3]> for Landmark {
    fn from(p: [f32; 3]) -> Self {
        Self { x: p[0], y: p[1], z: p[2] }
    }
}

/// One detected hand's ordered landmark points for a single frame
///
/// Ephemeral: recomputed every frame, never persisted. The hand landmark
/// model emits 21 points per hand but the pipeline does not enforce the
/// count; the remote capture service does.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct HandObservation {
    pub points: Vec<Landmark>,
}

impl HandObservation {
    pub fn new(points: Vec<Landmark>) -> Self {
        Self { points }
    }

    /// Wire form expected by the gesture engine: a list of `[x, y, z]`
    pub fn to_wire(&self) -> Vec<[f32; 3]> {
        self.points.iter().map(|p| [p.x, p.y, p.z]).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Fraction of the frame added around a hand's extent on every side
const BOX_PADDING: f32 = 0.05;

/// Padded rectangular extent of one hand observation, clamped to the frame
///
/// Recomputed from the current observation every frame; there is no identity
/// tracking between a box in frame N and frame N+1.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl BoundingBox {
    /// Compute the padded box around an observation's points
    pub fn around(hand: &HandObservation) -> Self {
        let Some(first) = hand.points.first() else {
            return Self::default();
        };

        let mut min_x = first.x;
        let mut min_y = first.y;
        let mut max_x = first.x;
        let mut max_y = first.y;

        for p in &hand.points {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }

        let x = (min_x - BOX_PADDING).max(0.0);
        let y = (min_y - BOX_PADDING).max(0.0);
        let w = (max_x + BOX_PADDING).min(1.0) - x;
        let h = (max_y + BOX_PADDING).min(1.0) - y;

        Self { x, y, w, h }
    }

    /// Whether a normalized point falls inside this box
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.w && py >= self.y && py <= self.y + self.h
    }
}
