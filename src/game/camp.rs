use serde::{Deserialize, Serialize};

use crate::game::player::PlayerId;
use crate::util::vec2::Vector2D;

/// Stable camp identifier
pub type CampId = u32;

/// Static team-owned rectangle centered at `position`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Camp {
    pub id: CampId,
    pub player: PlayerId,
    pub position: Vector2D,
    pub width: f64,
    pub height: f64,
}

impl Camp {
    pub fn new(id: CampId, player: PlayerId, position: Vector2D, width: f64, height: f64) -> Self {
        Self {
            id,
            player,
            position,
            width,
            height,
        }
    }

    /// Camp `index` of `count`, spread evenly down the vertical center line
    pub fn layout_position(index: u32, count: u32, map_width: f64, map_height: f64) -> Vector2D {
        Vector2D::new(
            map_width * 0.5,
            map_height * (f64::from(index) + 0.5) / f64::from(count),
        )
    }

    /// Half-extent test on the plain Euclidean delta. Camps are small relative
    /// to the map, so wrap-around is ignored here.
    pub fn contains(&self, p: Vector2D) -> bool {
        let delta = self.position - p;
        2.0 * delta.x.abs() < self.width && 2.0 * delta.y.abs() < self.height
    }
}
