//! Shared enemy attribute block.

/// Tunable attributes every enemy shares, built from a RON definition.
#[derive(Debug, Clone, PartialEq)]
pub struct EnemyStats {
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl Default for EnemyStats {
    fn default() -> Self {
        Self {
            max_health: 30.0,
            damage: 10.0,
            move_speed: 2.0,
            detection_range: 8.0,
            attack_range: 1.5,
            attack_cooldown: 2.0,
        }
    }
}

impl EnemyStats {
    /// Is the target close enough to notice?
    pub fn detects(&self, distance: f32) -> bool {
        distance <= self.detection_range
    }

    /// Is the target close enough to hit?
    pub fn in_attack_range(&self, distance: f32) -> bool {
        distance <= self.attack_range
    }
}
