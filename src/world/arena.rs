//! Arena bounds used to clamp spawn and teleport candidates.

use glam::Vec2;
use rand::Rng;
use serde::Deserialize;

/// Rectangular boss-arena region supplied by the host level.
///
/// Valid for the whole encounter; every spawn and teleport candidate is
/// clamped into it or drawn from inside it.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ArenaBounds {
    pub min: Vec2,
    pub max: Vec2,
}

impl ArenaBounds {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f32 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f32 {
        self.max.y - self.min.y
    }

    /// The floor line summoned units stand on.
    pub fn ground_y(&self) -> f32 {
        self.min.y
    }

    /// Clamps `x` into the arena shrunk by `inset` on both sides.
    /// `inset` must not exceed half the arena width.
    pub fn clamp_x_inset(&self, x: f32, inset: f32) -> f32 {
        x.clamp(self.min.x + inset, self.max.x - inset)
    }

    /// Uniform random point inside the arena shrunk by `inset` on every
    /// edge. `inset` must not exceed half the arena extent on either
    /// axis.
    pub fn random_point_inset<R: Rng + ?Sized>(&self, rng: &mut R, inset: f32) -> Vec2 {
        Vec2::new(
            rng.gen_range(self.min.x + inset..=self.max.x - inset),
            rng.gen_range(self.min.y + inset..=self.max.y - inset),
        )
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn arena() -> ArenaBounds {
        ArenaBounds::new(Vec2::new(-30.0, 0.0), Vec2::new(30.0, 12.0))
    }

    #[test]
    fn clamp_respects_the_inset() {
        let arena = arena();
        assert_eq!(arena.clamp_x_inset(-45.0, 3.0), -27.0);
        assert_eq!(arena.clamp_x_inset(45.0, 3.0), 27.0);
        assert_eq!(arena.clamp_x_inset(5.0, 3.0), 5.0);
    }

    #[test]
    fn random_points_stay_inside_the_inset_region() {
        let arena = arena();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let p = arena.random_point_inset(&mut rng, 3.0);
            assert!(p.x >= -27.0 && p.x <= 27.0, "x out of range: {p:?}");
            assert!(p.y >= 3.0 && p.y <= 9.0, "y out of range: {p:?}");
        }
    }

    #[test]
    fn ground_is_the_bottom_edge() {
        assert_eq!(arena().ground_y(), 0.0);
    }
}
