//! Enemy and boss definition loading from RON files.

use glam::Vec2;
use log::info;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use super::stats::EnemyStats;

/// Enemy definition loaded from a RON file.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
}

impl EnemyDefinition {
    /// Convert to an [`EnemyStats`] block.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            damage: self.damage,
            move_speed: self.move_speed,
            detection_range: self.detection_range,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

/// Probability buckets for one boss decision draw. The three fields
/// cover the unit interval; `summon` is whatever the first two leave.
#[derive(Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct DecisionWeights {
    pub teleport: f32,
    pub spell: f32,
    pub summon: f32,
}

impl DecisionWeights {
    pub const fn new(teleport: f32, spell: f32, summon: f32) -> Self {
        Self {
            teleport,
            spell,
            summon,
        }
    }
}

/// Tuning knobs for the Necromancer's decision policy, loaded as part of
/// its definition. Defaults are the shipped fight values.
#[derive(Deserialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct BossTuning {
    /// Seconds between timed battle decisions.
    pub decision_time: f32,
    pub spell_cooldown: f32,
    pub summon_cooldown: f32,
    /// Hard cap on concurrently tracked summons.
    pub max_skeletons: usize,
    /// Buckets at full health.
    pub base_weights: DecisionWeights,
    /// Buckets while the last summon choice is still recent.
    pub cooling_weights: DecisionWeights,
    /// Buckets at or below `wounded_fraction` health.
    pub wounded_weights: DecisionWeights,
    /// Health fraction at or below which the boss stops teleporting.
    pub critical_fraction: f32,
    /// Health fraction at or below which the wounded buckets apply.
    pub wounded_fraction: f32,
    /// Target distance that counts as dangerously close.
    pub emergency_distance: f32,
    /// Consecutive too-close ticks before an emergency teleport.
    pub emergency_ticks: u32,
    /// Emergency teleports allowed before the budget must rest.
    pub teleport_budget: u32,
    /// Budget while at or below `wounded_fraction` health.
    pub wounded_teleport_budget: u32,
    /// Seconds a spent budget rests before refilling.
    pub teleport_budget_rest: f32,
    /// Minimum distance a teleport destination should gain.
    pub teleport_min_distance: f32,
    /// Candidate destinations tried per teleport.
    pub teleport_attempts: u32,
    /// Margin kept from the arena edges for spawns and teleports.
    pub arena_inset: f32,
    pub preferred_min_distance: f32,
    pub preferred_max_distance: f32,
    /// Horizontal speed while backing away from the target.
    pub retreat_speed: f32,
    pub idle_time: f32,
    /// Height above the target at which spell projectiles materialize.
    pub spell_offset_y: f32,
    /// Horizontal scatter applied against a moving target.
    pub spell_jitter_x: f32,
    /// Target horizontal speed above which the scatter applies.
    pub jitter_speed_threshold: f32,
    /// Horizontal scatter around the target for summon anchors.
    pub summon_jitter_x: f32,
    /// Boss body extents used when checking teleport destinations.
    pub body_half_extents: Vec2,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            decision_time: 2.0,
            spell_cooldown: 1.5,
            summon_cooldown: 3.0,
            max_skeletons: 3,
            base_weights: DecisionWeights::new(0.10, 0.40, 0.50),
            cooling_weights: DecisionWeights::new(0.20, 0.80, 0.00),
            wounded_weights: DecisionWeights::new(0.30, 0.30, 0.40),
            critical_fraction: 0.25,
            wounded_fraction: 0.5,
            emergency_distance: 5.0,
            emergency_ticks: 2,
            teleport_budget: 3,
            wounded_teleport_budget: 7,
            teleport_budget_rest: 3.0,
            teleport_min_distance: 15.0,
            teleport_attempts: 24,
            arena_inset: 3.0,
            preferred_min_distance: 7.0,
            preferred_max_distance: 14.0,
            retreat_speed: 3.5,
            idle_time: 1.5,
            spell_offset_y: 1.5,
            spell_jitter_x: 1.0,
            jitter_speed_threshold: 0.1,
            summon_jitter_x: 1.5,
            body_half_extents: Vec2::new(0.8, 1.4),
        }
    }
}

/// Boss definition loaded from a RON file: the shared stat block plus the
/// decision-policy tuning.
#[derive(Deserialize, Clone, Debug)]
pub struct BossDefinition {
    pub name: String,
    pub max_health: f32,
    pub damage: f32,
    pub move_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    #[serde(default)]
    pub tuning: BossTuning,
}

impl BossDefinition {
    /// Convert to an [`EnemyStats`] block.
    pub fn to_stats(&self) -> EnemyStats {
        EnemyStats {
            max_health: self.max_health,
            damage: self.damage,
            move_speed: self.move_speed,
            detection_range: self.detection_range,
            attack_range: self.attack_range,
            attack_cooldown: self.attack_cooldown,
        }
    }
}

impl Default for BossDefinition {
    fn default() -> Self {
        Self {
            name: "Necromancer".to_string(),
            max_health: 300.0,
            damage: 15.0,
            move_speed: 2.4,
            detection_range: 20.0,
            attack_range: 1.5,
            attack_cooldown: 2.0,
            tuning: BossTuning::default(),
        }
    }
}

/// All loaded enemy and boss definitions, keyed by file stem.
#[derive(Default)]
pub struct DefinitionRegistry {
    pub enemies: HashMap<String, EnemyDefinition>,
    pub bosses: HashMap<String, BossDefinition>,
}

impl DefinitionRegistry {
    /// Load every definition under `<root>/enemies/` and `<root>/bosses/`.
    pub fn load_from_dir(root: &Path) -> Result<Self, DataLoadError> {
        let enemies = load_definition_dir(&root.join("enemies"))?;
        let bosses = load_definition_dir(&root.join("bosses"))?;

        info!(
            "Loaded {} enemy and {} boss definitions",
            enemies.len(),
            bosses.len()
        );

        Ok(Self { enemies, bosses })
    }

    /// Get an enemy definition by type name.
    pub fn enemy(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.enemies.get(enemy_type)
    }

    /// Get a boss definition by type name.
    pub fn boss(&self, boss_type: &str) -> Option<&BossDefinition> {
        self.bosses.get(boss_type)
    }

    pub fn require_enemy(&self, enemy_type: &str) -> Result<&EnemyDefinition, DataLoadError> {
        self.enemy(enemy_type)
            .ok_or_else(|| DataLoadError::UnknownDefinition(enemy_type.to_string()))
    }

    pub fn require_boss(&self, boss_type: &str) -> Result<&BossDefinition, DataLoadError> {
        self.boss(boss_type)
            .ok_or_else(|| DataLoadError::UnknownDefinition(boss_type.to_string()))
    }
}

/// Load every `.ron` definition in one directory, keyed by file stem.
fn load_definition_dir<T>(dir: &Path) -> Result<HashMap<String, T>, DataLoadError>
where
    T: serde::de::DeserializeOwned,
{
    if !dir.exists() {
        return Err(DataLoadError::FileNotFound(dir.display().to_string()));
    }

    let entries = fs::read_dir(dir).map_err(|e| DataLoadError::ReadError {
        path: dir.display().to_string(),
        details: e.to_string(),
    })?;

    let mut definitions = HashMap::new();

    for entry in entries.flatten() {
        let path = entry.path();

        if !path.extension().is_some_and(|ext| ext == "ron") {
            continue;
        }

        let key = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("unknown")
            .to_string();

        let contents = fs::read_to_string(&path).map_err(|e| DataLoadError::ReadError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

        let definition = ron::from_str::<T>(&contents).map_err(|e| DataLoadError::ParseError {
            path: path.display().to_string(),
            details: e.to_string(),
        })?;

        info!("Loaded definition: {} ({:?})", key, path);
        definitions.insert(key, definition);
    }

    Ok(definitions)
}
