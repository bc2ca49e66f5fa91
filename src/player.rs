// Players and the quantized gravity rule.

use serde::{Deserialize, Serialize};

use crate::geometry::{GridPoint, GridVector};
use crate::history::History;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    /// Satellite not placed yet; it follows the snapped mouse.
    PickPosition,
    /// Satellite placed; aiming the initial velocity vector.
    PickVelocity,
    /// Simulation running; Space/hold-n advance the turns.
    StepPhysics,
}

impl PlayerState {
    pub fn label(&self) -> &'static str {
        match self {
            PlayerState::PickPosition => "Pick position",
            PlayerState::PickVelocity => "Pick velocity",
            PlayerState::StepPhysics => "Step physics",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub n: u8, // 1-based player number, selects the color
    pub init_pos: GridPoint,
    pub pos: GridPoint,
    pub state: PlayerState,
    pub history: History,
}

impl Player {
    pub fn new(n: u8) -> Self {
        Self {
            n,
            init_pos: GridPoint::new(0, 0),
            pos: GridPoint::new(0, 0),
            state: PlayerState::PickPosition,
            history: History::new(),
        }
    }

    /// Back to an unplaced satellite with no history.
    pub fn reset(&mut self) {
        self.init_pos = GridPoint::new(0, 0);
        self.pos = GridPoint::new(0, 0);
        self.state = PlayerState::PickPosition;
        self.history = History::new();
    }
}

/// The nine candidate force vectors, in the order ties are broken.
const FORCE_CANDIDATES: [GridVector; 9] = [
    GridVector::new(0, 0),
    GridVector::new(-1, 0),
    GridVector::new(1, 0),
    GridVector::new(0, 1),
    GridVector::new(0, -1),
    GridVector::new(-1, -1),
    GridVector::new(-1, 1),
    GridVector::new(1, 1),
    GridVector::new(1, -1),
];

/// Gravity pulls toward the grid origin, quantized to the candidate vector
/// closest (in Euclidean distance) to the exact pull. The first minimum in
/// candidate order wins, so a satellite sitting on the origin feels (0,0).
pub fn gravity_toward_origin(pos: GridPoint) -> GridVector {
    let pull = GridVector::new(-pos.x, -pos.y);
    let mut best = FORCE_CANDIDATES[0];
    let mut best_d2 = i64::MAX;
    for n in FORCE_CANDIDATES {
        let dx = (pull.x - n.x) as i64;
        let dy = (pull.y - n.y) as i64;
        let d2 = dx * dx + dy * dy;
        if d2 < best_d2 {
            best_d2 = d2;
            best = n;
        }
    }
    best
}

/// Round-robin over 1-based player numbers.
pub fn next_player(active: u8, count: u8) -> u8 {
    let next = (active + 1) % count;
    if next == 0 { count } else { next }
}
