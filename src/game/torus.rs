//! Wrap-around topology
//!
//! All positions live modulo `(width, height)`. Distances and directions take
//! the shorter wrapped path on each axis independently.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::MapConfig;
use crate::util::vec2::Vector2D;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Torus {
    width: f64,
    height: f64,
}

impl Torus {
    /// Both dimensions must be positive; `GameConfig::validate` enforces this
    pub fn new(width: f64, height: f64) -> Self {
        debug_assert!(
            width > 0.0 && height > 0.0 && width.is_finite() && height.is_finite(),
            "torus dimensions must be positive, got {}x{}",
            width,
            height
        );
        Self { width, height }
    }

    pub fn from_config(map: &MapConfig) -> Self {
        Self::new(map.width, map.height)
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    /// Wrap a position into `[0, width) x [0, height)`.
    ///
    /// Each axis is corrected by at most one period, so callers must not pass
    /// positions that drifted further than one map size.
    pub fn normalize(&self, p: Vector2D) -> Vector2D {
        Vector2D::new(wrap(p.x, self.width), wrap(p.y, self.height))
    }

    /// Like `normalize`, but for positions any number of periods away,
    /// such as targets supplied by remote controllers
    pub fn normalize_far(&self, p: Vector2D) -> Vector2D {
        self.normalize(Vector2D::new(p.x.rem_euclid(self.width), p.y.rem_euclid(self.height)))
    }

    /// Shortest wrapped distance
    pub fn distance(&self, p0: Vector2D, p1: Vector2D) -> f64 {
        Vector2D::new(
            axis_distance(p0.x, p1.x, self.width),
            axis_distance(p0.y, p1.y, self.height),
        )
        .length()
    }

    /// Signed delta from `p0` toward the nearest image of `p1`
    pub fn difference(&self, p0: Vector2D, p1: Vector2D) -> Vector2D {
        Vector2D::new(
            axis_difference(p0.x, p1.x, self.width),
            axis_difference(p0.y, p1.y, self.height),
        )
    }

    /// Unit vector from `p0` toward `p1`, zero when they coincide
    pub fn direction(&self, p0: Vector2D, p1: Vector2D) -> Vector2D {
        self.difference(p0, p1).normalize()
    }

    /// Uniform position on the torus
    pub fn random_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector2D {
        Vector2D::new(rng.gen_range(0.0..self.width), rng.gen_range(0.0..self.height))
    }

    /// Length of the map diagonal
    pub fn diameter(&self) -> f64 {
        self.width.hypot(self.height)
    }
}

fn wrap(v: f64, size: f64) -> f64 {
    let wrapped = if v < 0.0 {
        v + size
    } else if v >= size {
        v - size
    } else {
        v
    };
    // -1e-20 + size rounds to size
    if wrapped >= size {
        wrapped - size
    } else {
        wrapped
    }
}

fn axis_distance(p0: f64, p1: f64, size: f64) -> f64 {
    let direct = (p0 - p1).abs();
    direct.min(size - direct)
}

fn axis_difference(p0: f64, p1: f64, size: f64) -> f64 {
    let direct = p1 - p0;
    if direct.abs() <= size - direct.abs() {
        direct
    } else if direct > 0.0 {
        direct - size
    } else {
        direct + size
    }
}
