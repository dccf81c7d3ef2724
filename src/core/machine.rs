//! State machine scaffolding shared by enemies, the boss, and weapons.
//!
//! The machine holds only the identity of the active state; the state
//! values themselves live in a per-owner [`StateSet`] so they are
//! constructed once with their owner and reused for its whole lifetime.

use std::fmt;

/// A set of persistent behavior states addressed by a copyable identity
/// tag.
///
/// Implementors own one value per state; the machine addresses them by
/// `Kind` and never constructs or drops them. `Ctx` is the per-call
/// context threaded into every lifecycle method: the tick delta, world
/// snapshots, and whatever the states act on.
pub trait StateSet<Ctx> {
    /// State identity tag.
    type Kind: Copy + PartialEq + fmt::Debug;

    /// Called when `kind` becomes the active state.
    fn enter(&mut self, kind: Self::Kind, ctx: &mut Ctx);

    /// Ticks the active state. Returning `Some(next)` requests an
    /// immediate transition to `next`.
    fn update(&mut self, kind: Self::Kind, ctx: &mut Ctx) -> Option<Self::Kind>;

    /// Called when `kind` stops being the active state.
    fn exit(&mut self, kind: Self::Kind, ctx: &mut Ctx);
}

/// Holds the single active state identity and drives enter/update/exit
/// ordering.
///
/// There is no validation layer: every transition is accepted
/// unconditionally.
#[derive(Debug)]
pub struct StateMachine<K> {
    current: K,
}

impl<K: Copy + PartialEq + fmt::Debug> StateMachine<K> {
    /// Creates the machine pointing at `initial` without entering it;
    /// [`StateMachine::initialize`] performs the first enter.
    pub fn new(initial: K) -> Self {
        Self { current: initial }
    }

    /// Enters the current (initial) state. Call exactly once, before the
    /// first [`StateMachine::update`].
    pub fn initialize<Ctx, S>(&mut self, states: &mut S, ctx: &mut Ctx)
    where
        S: StateSet<Ctx, Kind = K>,
    {
        states.enter(self.current, ctx);
    }

    /// The active state's identity.
    pub fn current(&self) -> K {
        self.current
    }

    /// Exits the active state, swaps to `next`, then enters it.
    ///
    /// Always unconditional: transitioning to the state that is already
    /// active re-runs its exit and enter, and callers rely on that to
    /// restart a state from scratch.
    pub fn change_state<Ctx, S>(&mut self, states: &mut S, next: K, ctx: &mut Ctx)
    where
        S: StateSet<Ctx, Kind = K>,
    {
        states.exit(self.current, ctx);
        self.current = next;
        states.enter(next, ctx);
    }

    /// Ticks the active state and synchronously applies at most one
    /// requested transition.
    pub fn update<Ctx, S>(&mut self, states: &mut S, ctx: &mut Ctx)
    where
        S: StateSet<Ctx, Kind = K>,
    {
        if let Some(next) = states.update(self.current, ctx) {
            self.change_state(states, next, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Phase {
        Rest,
        Work,
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Call {
        Enter(Phase),
        Update(Phase),
        Exit(Phase),
    }

    /// Records every lifecycle call and can request one transition.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
        request: Option<Phase>,
    }

    impl StateSet<()> for Recorder {
        type Kind = Phase;

        fn enter(&mut self, kind: Phase, _ctx: &mut ()) {
            self.calls.push(Call::Enter(kind));
        }

        fn update(&mut self, kind: Phase, _ctx: &mut ()) -> Option<Phase> {
            self.calls.push(Call::Update(kind));
            self.request.take()
        }

        fn exit(&mut self, kind: Phase, _ctx: &mut ()) {
            self.calls.push(Call::Exit(kind));
        }
    }

    #[test]
    fn initialize_enters_initial_state_exactly_once() {
        let mut states = Recorder::default();
        let mut machine = StateMachine::new(Phase::Rest);
        machine.initialize(&mut states, &mut ());

        assert_eq!(machine.current(), Phase::Rest);
        assert_eq!(states.calls, vec![Call::Enter(Phase::Rest)]);
    }

    #[test]
    fn change_state_exits_old_then_enters_new() {
        let mut states = Recorder::default();
        let mut machine = StateMachine::new(Phase::Rest);
        machine.initialize(&mut states, &mut ());

        machine.change_state(&mut states, Phase::Work, &mut ());

        assert_eq!(machine.current(), Phase::Work);
        assert_eq!(
            states.calls,
            vec![
                Call::Enter(Phase::Rest),
                Call::Exit(Phase::Rest),
                Call::Enter(Phase::Work),
            ]
        );
    }

    #[test]
    fn same_state_transition_reruns_exit_and_enter() {
        let mut states = Recorder::default();
        let mut machine = StateMachine::new(Phase::Work);
        machine.initialize(&mut states, &mut ());
        states.calls.clear();

        machine.change_state(&mut states, Phase::Work, &mut ());

        assert_eq!(machine.current(), Phase::Work);
        assert_eq!(
            states.calls,
            vec![Call::Exit(Phase::Work), Call::Enter(Phase::Work)]
        );
    }

    #[test]
    fn update_delegates_to_active_state() {
        let mut states = Recorder::default();
        let mut machine = StateMachine::new(Phase::Rest);
        machine.initialize(&mut states, &mut ());
        states.calls.clear();

        machine.update(&mut states, &mut ());

        assert_eq!(machine.current(), Phase::Rest);
        assert_eq!(states.calls, vec![Call::Update(Phase::Rest)]);
    }

    #[test]
    fn update_applies_requested_transition_synchronously() {
        let mut states = Recorder::default();
        let mut machine = StateMachine::new(Phase::Rest);
        machine.initialize(&mut states, &mut ());
        states.calls.clear();
        states.request = Some(Phase::Work);

        machine.update(&mut states, &mut ());

        assert_eq!(machine.current(), Phase::Work);
        assert_eq!(
            states.calls,
            vec![
                Call::Update(Phase::Rest),
                Call::Exit(Phase::Rest),
                Call::Enter(Phase::Work),
            ]
        );
    }
}
