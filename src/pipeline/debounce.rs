use crate::pipeline::types::{ActionCommand, EngineState};
use tracing::{debug, info};

/// Admit or drop a candidate action against the pipeline's cooldown clock.
///
/// Admitted candidates stamp `now_ms` as the new dispatch time; a toggle also flips
/// `enabled`. Suppressed candidates are dropped outright and leave the state untouched.
pub fn admit(
    state: &mut EngineState,
    now_ms: i64,
    cooldown_ms: i64,
    candidate: ActionCommand,
) -> ActionCommand {
    if candidate.is_none() {
        return ActionCommand::None;
    }

    if let Some(elapsed) = state.elapsed_since_last_action(now_ms) {
        if elapsed < cooldown_ms {
            debug!(
                "Suppressed {} ({}ms since last action, cooldown {}ms)",
                candidate, elapsed, cooldown_ms
            );
            return ActionCommand::None;
        }
    }

    state.last_action_timestamp_ms = Some(now_ms);
    if candidate == ActionCommand::ToggleEnabled {
        state.enabled = !state.enabled;
        info!(
            "Gesture control {}",
            if state.enabled { "enabled" } else { "disabled" }
        );
    }
    candidate
}

/// A debounce gate bound to one pipeline's cooldown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DebounceGate {
    cooldown_ms: i64,
}

impl DebounceGate {
    pub fn new(cooldown_ms: i64) -> Self {
        Self { cooldown_ms }
    }

    pub fn cooldown_ms(&self) -> i64 {
        self.cooldown_ms
    }

    pub fn admit(
        &self,
        state: &mut EngineState,
        now_ms: i64,
        candidate: ActionCommand,
    ) -> ActionCommand {
        admit(state, now_ms, self.cooldown_ms, candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_candidate_is_always_admitted() {
        let mut state = EngineState::new();
        assert_eq!(
            admit(&mut state, i64::MIN, 700, ActionCommand::GoHome),
            ActionCommand::GoHome
        );
        assert_eq!(state.last_action_timestamp_ms, Some(i64::MIN));
    }

    #[test]
    fn none_leaves_state_untouched() {
        let mut state = EngineState::new();
        assert_eq!(
            admit(&mut state, 0, 700, ActionCommand::None),
            ActionCommand::None
        );
        assert_eq!(state, EngineState::new());
    }

    #[test]
    fn second_candidate_within_cooldown_is_dropped() {
        let mut state = EngineState::new();
        assert_eq!(
            admit(&mut state, 0, 700, ActionCommand::ScrollDown),
            ActionCommand::ScrollDown
        );
        assert_eq!(
            admit(&mut state, 699, 700, ActionCommand::ScrollDown),
            ActionCommand::None
        );
        assert_eq!(state.last_action_timestamp_ms, Some(0));
        assert_eq!(
            admit(&mut state, 700, 700, ActionCommand::ScrollDown),
            ActionCommand::ScrollDown
        );
        assert_eq!(state.last_action_timestamp_ms, Some(700));
    }

    #[test]
    fn suppressed_toggle_does_not_flip_enabled() {
        let mut state = EngineState::new();
        assert_eq!(
            admit(&mut state, 0, 700, ActionCommand::ToggleEnabled),
            ActionCommand::ToggleEnabled
        );
        assert!(!state.enabled);
        assert_eq!(
            admit(&mut state, 100, 700, ActionCommand::ToggleEnabled),
            ActionCommand::None
        );
        assert!(!state.enabled);
    }

    #[test]
    fn toggle_shares_the_action_clock() {
        let mut state = EngineState::new();
        admit(&mut state, 0, 700, ActionCommand::ScrollDown);
        assert_eq!(
            admit(&mut state, 300, 700, ActionCommand::ToggleEnabled),
            ActionCommand::None
        );
        assert!(state.enabled);
        assert_eq!(
            admit(&mut state, 800, 700, ActionCommand::ToggleEnabled),
            ActionCommand::ToggleEnabled
        );
        assert_eq!(
            admit(&mut state, 1000, 700, ActionCommand::ScrollDown),
            ActionCommand::None
        );
    }

    #[test]
    fn gate_applies_its_own_cooldown() {
        let gate = DebounceGate::new(800);
        let mut state = EngineState::new();
        let tap = ActionCommand::TapAt {
            x: 540.0,
            y: 1200.0,
        };
        assert_eq!(gate.admit(&mut state, 0, tap), tap);
        assert_eq!(gate.admit(&mut state, 799, tap), ActionCommand::None);
        assert_eq!(gate.admit(&mut state, 800, tap), tap);
        assert_eq!(state.last_action_timestamp_ms, Some(800));
    }
}
