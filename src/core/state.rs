//! Book-keeping every behavior state carries: a countdown timer and the
//! animation trigger mailbox.

/// Single-slot completion flag raised into the active state from outside
/// the tick.
///
/// One producer (the host's animation-finished callback), one consumer
/// (the state's update). [`TriggerMailbox::take`] clears the slot, so a
/// raised trigger is observed at most once.
#[derive(Debug, Default)]
pub struct TriggerMailbox {
    raised: bool,
}

impl TriggerMailbox {
    /// Raises the flag. Raising twice before a take is the same as
    /// raising once.
    pub fn raise(&mut self) {
        self.raised = true;
    }

    /// Consumes a pending trigger, clearing the slot.
    pub fn take(&mut self) -> bool {
        std::mem::take(&mut self.raised)
    }

    /// Reads the slot without consuming it.
    pub fn is_raised(&self) -> bool {
        self.raised
    }

    /// Drops any pending trigger.
    pub fn clear(&mut self) {
        self.raised = false;
    }
}

/// Timer and mailbox shared by every behavior state.
///
/// The timer's meaning belongs to the concrete state; it counts down by
/// the tick delta and may go negative.
#[derive(Debug, Default)]
pub struct StateCore {
    pub timer: f32,
    pub trigger: TriggerMailbox,
}

impl StateCore {
    /// Base enter behavior: drop any trigger left over from the state's
    /// previous activation.
    pub fn begin(&mut self) {
        self.trigger.clear();
    }

    /// Arms the state timer.
    pub fn arm_timer(&mut self, secs: f32) {
        self.timer = secs;
    }

    /// Base update behavior: count the timer down.
    pub fn tick(&mut self, dt: f32) {
        self.timer -= dt;
    }

    /// True once the armed timer has fully elapsed.
    pub fn timer_elapsed(&self) -> bool {
        self.timer <= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mailbox_starts_lowered() {
        let mailbox = TriggerMailbox::default();
        assert!(!mailbox.is_raised());
    }

    #[test]
    fn take_consumes_a_raised_trigger_once() {
        let mut mailbox = TriggerMailbox::default();
        mailbox.raise();

        assert!(mailbox.take());
        assert!(!mailbox.take());
    }

    #[test]
    fn raising_twice_is_observed_once() {
        let mut mailbox = TriggerMailbox::default();
        mailbox.raise();
        mailbox.raise();

        assert!(mailbox.take());
        assert!(!mailbox.take());
    }

    #[test]
    fn begin_discards_stale_triggers() {
        let mut core = StateCore::default();
        core.trigger.raise();

        core.begin();

        assert!(!core.trigger.is_raised());
    }

    #[test]
    fn timer_counts_down_and_elapses() {
        let mut core = StateCore::default();
        core.arm_timer(0.5);
        assert!(!core.timer_elapsed());

        core.tick(0.3);
        assert!(!core.timer_elapsed());

        core.tick(0.3);
        assert!(core.timer_elapsed());
    }
}
