//! The shared data and action primitives the Necromancer's states drive.

use glam::Vec2;
use log::warn;
use rand::rngs::StdRng;
use rand::Rng;

use crate::combat::{Facing, Health};
use crate::core::Cooldown;
use crate::enemies::{BossDefinition, BossTuning, EnemyStats, SkeletonCrew, SkeletonId};
use crate::world::{ArenaBounds, SpatialProbe, TargetSnapshot};

use super::signals::BossSignal;

/// How often the summon roster is reconciled against the crew, in ticks.
const SUMMON_PRUNE_INTERVAL: u64 = 30;

/// Everything the Necromancer's states read and act on: the body, health,
/// ability cooldowns, the summon roster, and the outbound signal buffer.
///
/// The action primitives never transition states; states decide, the
/// orchestrator executes.
#[derive(Debug)]
pub struct Orchestrator {
    pub stats: EnemyStats,
    pub tuning: BossTuning,
    pub health: Health,
    pub position: Vec2,
    pub velocity: Vec2,
    pub facing: Facing,
    pub(crate) arena: ArenaBounds,
    pub(crate) spell_cooldown: Cooldown,
    pub(crate) summon_cooldown: Cooldown,
    pub(crate) summoned: Vec<SkeletonId>,
    pub(crate) rng: StdRng,
    pub(crate) signals: Vec<BossSignal>,
    pub(crate) collider_enabled: bool,
    pub(crate) physics_frozen: bool,
    pub(crate) defeat_announced: bool,
    tick_count: u64,
}

impl Orchestrator {
    pub fn new(
        definition: &BossDefinition,
        position: Vec2,
        arena: ArenaBounds,
        rng: StdRng,
    ) -> Self {
        let stats = definition.to_stats();
        let mut tuning = definition.tuning;

        // An inset past the arena half-extent would invert the spawn and
        // teleport ranges.
        let max_inset = (arena.width().min(arena.height()) / 2.0).max(0.0);
        if !(tuning.arena_inset >= 0.0 && tuning.arena_inset <= max_inset) {
            warn!(
                "arena inset {} does not fit the {}x{} arena, clamping",
                tuning.arena_inset,
                arena.width(),
                arena.height()
            );
            tuning.arena_inset = tuning.arena_inset.max(0.0).min(max_inset);
        }

        Self {
            health: Health::new(stats.max_health),
            stats,
            tuning,
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            arena,
            spell_cooldown: Cooldown::ready_now(),
            summon_cooldown: Cooldown::ready_now(),
            summoned: Vec::new(),
            rng,
            signals: Vec::new(),
            collider_enabled: true,
            physics_frozen: false,
            defeat_announced: false,
            tick_count: 0,
        }
    }

    /// Per-frame upkeep that runs whatever the active state is: ability
    /// cooldowns count down and the summon roster is periodically
    /// reconciled, dropping members the crew no longer reports active.
    pub(crate) fn begin_tick(&mut self, dt: f32, crew: &SkeletonCrew) {
        self.spell_cooldown.tick(dt);
        self.summon_cooldown.tick(dt);

        self.tick_count += 1;
        if self.tick_count % SUMMON_PRUNE_INTERVAL == 0 {
            self.summoned.retain(|id| crew.is_active(*id));
        }
    }

    pub fn can_cast_spell(&self) -> bool {
        self.spell_cooldown.ready()
    }

    /// Summoning needs both a rested cooldown and roster room.
    pub fn can_summon(&self) -> bool {
        self.summon_cooldown.ready() && self.summoned.len() < self.tuning.max_skeletons
    }

    /// Teleporting is withheld at critical health.
    pub fn can_teleport_safely(&self) -> bool {
        self.health.fraction() > self.tuning.critical_fraction
    }

    pub fn summoned_count(&self) -> usize {
        self.summoned.len()
    }

    pub(crate) fn face_target(&mut self, target: &TargetSnapshot) {
        self.facing = Facing::toward(self.position.x, target.position.x);
    }

    pub(crate) fn push_signal(&mut self, signal: BossSignal) {
        self.signals.push(signal);
    }

    /// Spawns one spell projectile above the target, scattered sideways
    /// when the target is on the move, and re-arms the spell cooldown.
    /// Not gated: callers decide whether casting is allowed.
    pub(crate) fn cast_spell(&mut self, target: &TargetSnapshot) {
        let mut spawn = target.position + Vec2::new(0.0, self.tuning.spell_offset_y);
        if target.horizontal_speed > self.tuning.jitter_speed_threshold {
            let jitter = self.tuning.spell_jitter_x;
            spawn.x += self.rng.gen_range(-jitter..=jitter);
        }

        self.signals.push(BossSignal::SpellCast { spawn });
        self.spell_cooldown.arm(self.tuning.spell_cooldown);
    }

    /// Raises one skeleton on the arena floor near `anchor_x`, tracks it,
    /// and re-arms the summon cooldown. Roster room is re-checked here:
    /// the trigger that lands the summon can arrive well after the
    /// decision that chose it.
    pub(crate) fn summon_skeleton_at(&mut self, crew: &mut SkeletonCrew, anchor_x: f32) {
        if self.summoned.len() >= self.tuning.max_skeletons {
            return;
        }

        let x = self.arena.clamp_x_inset(anchor_x, self.tuning.arena_inset);
        let position = Vec2::new(x, self.arena.ground_y());
        let id = crew.spawn(position);

        self.summoned.push(id);
        self.signals.push(BossSignal::SkeletonSummoned { id, position });
        self.summon_cooldown.arm(self.tuning.summon_cooldown);
    }

    /// Searches the arena for a teleport destination: on solid ground,
    /// unblocked, and preferably at least `teleport_min_distance` away.
    /// When the attempt budget runs out, settles for the farthest clear
    /// candidate seen; `None` means every candidate was unusable.
    pub(crate) fn find_position(&mut self, probe: &dyn SpatialProbe) -> Option<Vec2> {
        let mut fallback: Option<(f32, Vec2)> = None;

        for _ in 0..self.tuning.teleport_attempts {
            let candidate = self
                .arena
                .random_point_inset(&mut self.rng, self.tuning.arena_inset);

            if !probe.ground_below(candidate) {
                continue;
            }
            if probe.region_blocked(candidate, self.tuning.body_half_extents) {
                continue;
            }

            let distance = candidate.distance(self.position);
            if distance >= self.tuning.teleport_min_distance {
                return Some(candidate);
            }
            if fallback.map_or(true, |(best, _)| distance > best) {
                fallback = Some((distance, candidate));
            }
        }

        fallback.map(|(_, candidate)| candidate)
    }

    /// Executes a teleport: relocates to a found destination, or holds
    /// position and reports the failed search.
    pub(crate) fn relocate(&mut self, probe: &dyn SpatialProbe) {
        match self.find_position(probe) {
            Some(to) => {
                let from = self.position;
                self.position = to;
                self.signals.push(BossSignal::Teleported { from, to });
            }
            None => {
                warn!("teleport search found no safe destination, holding position");
                self.signals.push(BossSignal::TeleportSearchFailed);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn arena() -> ArenaBounds {
        ArenaBounds::new(Vec2::new(-30.0, 0.0), Vec2::new(30.0, 12.0))
    }

    fn orchestrator() -> Orchestrator {
        Orchestrator::new(
            &BossDefinition::default(),
            Vec2::new(10.0, 1.0),
            arena(),
            StdRng::seed_from_u64(42),
        )
    }

    /// Probe whose answers are fixed per query kind.
    struct ScriptedProbe {
        ground: bool,
        blocked: bool,
    }

    impl SpatialProbe for ScriptedProbe {
        fn wall_ahead(&self, _from: Vec2, _facing: Facing) -> bool {
            false
        }

        fn ground_below(&self, _point: Vec2) -> bool {
            self.ground
        }

        fn region_blocked(&self, _center: Vec2, _half_extents: Vec2) -> bool {
            self.blocked
        }
    }

    #[test]
    fn casting_at_a_still_target_places_the_spell_straight_above() {
        let mut orchestrator = orchestrator();
        let target = TargetSnapshot::still_at(Vec2::new(-4.0, 0.0));

        orchestrator.cast_spell(&target);

        assert_eq!(
            orchestrator.signals,
            vec![BossSignal::SpellCast {
                spawn: Vec2::new(-4.0, 1.5)
            }]
        );
        assert!(!orchestrator.can_cast_spell());
    }

    #[test]
    fn casting_at_a_moving_target_scatters_sideways() {
        let mut orchestrator = orchestrator();
        let target = TargetSnapshot::moving_at(Vec2::new(-4.0, 0.0), 6.0);

        orchestrator.cast_spell(&target);

        let Some(BossSignal::SpellCast { spawn }) = orchestrator.signals.first().copied() else {
            panic!("expected a spell signal");
        };
        assert!((spawn.x - -4.0).abs() <= 1.0, "scatter too wide: {spawn:?}");
        assert_eq!(spawn.y, 1.5);
    }

    #[test]
    fn spell_cooldown_recovers_over_time() {
        let mut orchestrator = orchestrator();
        let crew = SkeletonCrew::new(EnemyStats::default());

        orchestrator.cast_spell(&TargetSnapshot::still_at(Vec2::ZERO));
        assert!(!orchestrator.can_cast_spell());

        for _ in 0..16 {
            orchestrator.begin_tick(0.1, &crew);
        }
        assert!(orchestrator.can_cast_spell());
    }

    #[test]
    fn summoning_clamps_the_anchor_and_spawns_on_the_ground() {
        let mut orchestrator = orchestrator();
        let mut crew = SkeletonCrew::new(EnemyStats::default());

        orchestrator.summon_skeleton_at(&mut crew, 50.0);

        let Some(BossSignal::SkeletonSummoned { id, position }) =
            orchestrator.signals.first().copied()
        else {
            panic!("expected a summon signal");
        };
        assert_eq!(position, Vec2::new(27.0, 0.0));
        assert!(crew.is_active(id));
        assert_eq!(orchestrator.summoned_count(), 1);
        assert!(!orchestrator.can_summon());
    }

    #[test]
    fn a_full_roster_swallows_the_summon() {
        let mut orchestrator = orchestrator();
        let mut crew = SkeletonCrew::new(EnemyStats::default());
        assert!(orchestrator.can_summon());

        for _ in 0..3 {
            orchestrator.summon_cooldown = Cooldown::ready_now();
            orchestrator.summon_skeleton_at(&mut crew, 0.0);
        }
        assert_eq!(orchestrator.summoned_count(), 3);

        orchestrator.signals.clear();
        orchestrator.summon_cooldown = Cooldown::ready_now();
        // Capacity alone closes the gate, whatever the cooldown says.
        assert!(!orchestrator.can_summon());
        orchestrator.summon_skeleton_at(&mut crew, 0.0);

        assert_eq!(orchestrator.summoned_count(), 3);
        assert_eq!(crew.len(), 3);
        assert!(orchestrator.signals.is_empty());
    }

    #[test]
    fn an_oversized_data_inset_is_clamped_to_the_arena() {
        let mut definition = BossDefinition::default();
        definition.tuning.arena_inset = 1_000.0;
        let mut orchestrator = Orchestrator::new(
            &definition,
            Vec2::ZERO,
            arena(),
            StdRng::seed_from_u64(42),
        );
        let mut crew = SkeletonCrew::new(EnemyStats::default());

        // The usable half-extent here is 6 (the arena is 60x12), so every
        // candidate collapses onto the x band [-24, 24] at y = 6.
        orchestrator.summon_skeleton_at(&mut crew, 50.0);
        let Some(BossSignal::SkeletonSummoned { position, .. }) =
            orchestrator.signals.first().copied()
        else {
            panic!("expected a summon signal");
        };
        assert_eq!(position, Vec2::new(24.0, 0.0));

        let probe = ScriptedProbe {
            ground: true,
            blocked: false,
        };
        let destination = orchestrator
            .find_position(&probe)
            .expect("the collapsed band still yields destinations");
        assert_eq!(destination.y, 6.0);
        assert!(destination.x.abs() <= 24.0);
    }

    #[test]
    fn the_roster_prune_drops_fallen_members() {
        let mut orchestrator = orchestrator();
        let mut crew = SkeletonCrew::new(EnemyStats::default());

        orchestrator.summon_skeleton_at(&mut crew, 0.0);
        let id = orchestrator.summoned[0];

        crew.kill(id);
        assert_eq!(orchestrator.summoned_count(), 1);

        for _ in 0..30 {
            orchestrator.begin_tick(1.0 / 60.0, &crew);
        }
        assert_eq!(orchestrator.summoned_count(), 0);
    }

    #[test]
    fn teleport_prefers_a_distant_destination() {
        let mut orchestrator = orchestrator();
        let probe = ScriptedProbe {
            ground: true,
            blocked: false,
        };

        let destination = orchestrator
            .find_position(&probe)
            .expect("open arena must yield a destination");

        assert!(destination.distance(Vec2::new(10.0, 1.0)) >= 15.0);
    }

    #[test]
    fn teleport_fails_cleanly_when_everything_is_blocked() {
        let mut orchestrator = orchestrator();
        let probe = ScriptedProbe {
            ground: true,
            blocked: true,
        };

        assert!(orchestrator.find_position(&probe).is_none());

        orchestrator.relocate(&probe);
        assert_eq!(orchestrator.position, Vec2::new(10.0, 1.0));
        assert_eq!(
            orchestrator.signals,
            vec![BossSignal::TeleportSearchFailed]
        );
    }

    #[test]
    fn teleport_skips_candidates_with_no_ground() {
        let mut orchestrator = orchestrator();
        let probe = ScriptedProbe {
            ground: false,
            blocked: false,
        };

        assert!(orchestrator.find_position(&probe).is_none());
    }

    #[test]
    fn a_cramped_arena_settles_for_the_farthest_clear_spot() {
        // Arena too small for any candidate to reach the preferred
        // distance; the search must still land somewhere clear.
        let mut orchestrator = Orchestrator::new(
            &BossDefinition::default(),
            Vec2::ZERO,
            ArenaBounds::new(Vec2::new(-8.0, -8.0), Vec2::new(8.0, 8.0)),
            StdRng::seed_from_u64(7),
        );
        let probe = ScriptedProbe {
            ground: true,
            blocked: false,
        };

        let destination = orchestrator
            .find_position(&probe)
            .expect("clear candidates exist");

        assert!(destination.distance(Vec2::ZERO) < 15.0);
        assert!(destination.x.abs() <= 5.0 && destination.y.abs() <= 5.0);
    }

    #[test]
    fn critical_health_forbids_safe_teleports() {
        let mut orchestrator = orchestrator();
        assert!(orchestrator.can_teleport_safely());

        // Exactly at the critical fraction counts as unsafe.
        orchestrator.health.take_damage(225.0);
        assert_eq!(orchestrator.health.fraction(), 0.25);
        assert!(!orchestrator.can_teleport_safely());
    }
}
