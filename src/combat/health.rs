//! Health tracking shared by enemies and the boss.

/// Hit points for anything the damage pipeline can hurt.
///
/// Behavior states never mutate health; damage and healing go through the
/// owning entity's entry points and the states only read
/// [`Health::fraction`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Health {
    pub fn new(maximum: f32) -> Self {
        Self {
            current: maximum,
            maximum,
        }
    }

    /// Applies damage, clamped so health never goes negative. Returns the
    /// damage actually dealt.
    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Restores health up to the maximum. Returns the amount actually
    /// healed.
    pub fn heal(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.maximum - self.current);
        self.current += actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }

    /// Current health over maximum, in `0.0..=1.0`. Every health-gated
    /// behavior tier keys on this value.
    pub fn fraction(&self) -> f32 {
        if self.maximum <= 0.0 {
            return 0.0;
        }
        self.current / self.maximum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_is_clamped_at_zero() {
        let mut health = Health::new(30.0);
        let dealt = health.take_damage(50.0);

        assert_eq!(dealt, 30.0);
        assert_eq!(health.current, 0.0);
        assert!(health.is_dead());
    }

    #[test]
    fn heal_is_clamped_at_maximum() {
        let mut health = Health::new(30.0);
        health.take_damage(10.0);

        let healed = health.heal(25.0);

        assert_eq!(healed, 10.0);
        assert_eq!(health.current, 30.0);
    }

    #[test]
    fn fraction_tracks_remaining_health() {
        let mut health = Health::new(200.0);
        health.take_damage(50.0);

        assert_eq!(health.fraction(), 0.75);
    }

    #[test]
    fn zero_maximum_reads_as_dead() {
        let health = Health {
            current: 0.0,
            maximum: 0.0,
        };
        assert!(health.is_dead());
        assert_eq!(health.fraction(), 0.0);
    }
}
