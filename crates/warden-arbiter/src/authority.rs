use std::collections::VecDeque;

use warden_core::{AuthorityMode, GamePhase, RequesterId, StateStore, ThreatLevel};

use crate::{Priority, RequesterClass, RequesterRegistry, PRIORITY_DEFAULT, PRIORITY_LOWEST};

const MODES: usize = AuthorityMode::ALL.len();
const CLASSES: usize = RequesterClass::COUNT;

/// Rows follow `AuthorityMode` order, columns follow `RequesterClass` order:
/// defense, combat, strategy, economy, production, tech, scouting.
/// `None` falls back to the row's entry in [`MODE_DEFAULTS`].
const PRIORITY_MATRIX: [[Option<Priority>; CLASSES]; MODES] = [
    // Emergency
    [Some(0), Some(1), None, None, None, None, None],
    // Combat
    [Some(0), Some(0), Some(1), Some(2), Some(1), Some(3), Some(2)],
    // Strategy
    [Some(1), Some(1), Some(0), Some(2), Some(1), Some(2), Some(2)],
    // Economy
    [Some(1), Some(2), Some(1), Some(0), Some(0), Some(1), Some(2)],
    // Balanced
    [Some(1), Some(1), Some(1), Some(1), Some(1), Some(2), Some(2)],
];

const MODE_DEFAULTS: [Priority; MODES] = [
    PRIORITY_LOWEST,
    PRIORITY_DEFAULT,
    PRIORITY_DEFAULT,
    PRIORITY_DEFAULT,
    PRIORITY_DEFAULT,
];

const fn matrix_is_valid() -> bool {
    let mut m = 0;
    while m < MODES {
        if MODE_DEFAULTS[m] > PRIORITY_LOWEST {
            return false;
        }
        let mut c = 0;
        while c < CLASSES {
            if let Some(p) = PRIORITY_MATRIX[m][c] {
                if p > PRIORITY_LOWEST {
                    return false;
                }
                // Emergency hands the top slot to defense alone.
                if m == 0 && p == 0 && c != 0 {
                    return false;
                }
            }
            c += 1;
        }
        m += 1;
    }
    matches!(PRIORITY_MATRIX[0][0], Some(0))
}

const _: () = assert!(matrix_is_valid(), "authority priority matrix out of range");

const HISTORY_LIMIT: usize = 32;

/// A recorded mode transition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModeChange {
    pub from: AuthorityMode,
    pub to: AuthorityMode,
    pub reason: &'static str,
    pub time: f64,
    pub tick: u64,
}

/// Five-mode arbitration policy, recomputed from the store once per tick.
#[derive(Debug, Clone, Default)]
pub struct AuthorityManager {
    registry: RequesterRegistry,
    mode: AuthorityMode,
    history: VecDeque<ModeChange>,
}

impl AuthorityManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_registry(registry: RequesterRegistry) -> Self {
        Self {
            registry,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> AuthorityMode {
        self.mode
    }

    pub fn registry(&self) -> &RequesterRegistry {
        &self.registry
    }

    pub fn register_requester(
        &mut self,
        requester: RequesterId,
        class: RequesterClass,
    ) -> Option<RequesterClass> {
        self.registry.register(requester, class)
    }

    /// Most recent transitions, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &ModeChange> {
        self.history.iter()
    }

    /// Evaluates the transition rules against `store`. First match wins.
    pub fn decide(store: &StateStore) -> (AuthorityMode, &'static str) {
        let threat = store.threat();
        if threat.rushing || threat.level == ThreatLevel::Critical {
            (AuthorityMode::Emergency, "rush or critical threat")
        } else if threat.level >= ThreatLevel::High {
            (AuthorityMode::Combat, "high threat")
        } else if store.has_active_strategy() {
            (AuthorityMode::Strategy, "active strategy in progress")
        } else if threat.level == ThreatLevel::None && store.phase() == GamePhase::Opening {
            (AuthorityMode::Economy, "quiet opening")
        } else {
            (AuthorityMode::Balanced, "no dominant concern")
        }
    }

    /// Recomputes the mode and writes it into the store. Staying in the same
    /// mode touches nothing and returns `None`.
    pub fn update(&mut self, store: &mut StateStore) -> Option<ModeChange> {
        let (mode, reason) = Self::decide(store);
        let from = store.authority_mode();
        self.mode = mode;
        if !store.set_authority_mode(mode) {
            return None;
        }

        let change = ModeChange {
            from,
            to: mode,
            reason,
            time: store.mode_changed_at(),
            tick: store.tick(),
        };
        tracing::info!(
            from = %change.from,
            to = %change.to,
            reason = change.reason,
            time = change.time,
            "authority mode changed"
        );

        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(change);
        Some(change)
    }

    /// Priority for `requester` under the current mode. Pure lookup.
    pub fn get_authority_priority(&self, requester: &RequesterId) -> Priority {
        Self::priority_in(self.mode, self.registry.class_of(requester))
    }

    pub fn priority_in(mode: AuthorityMode, class: Option<RequesterClass>) -> Priority {
        class
            .and_then(|c| PRIORITY_MATRIX[mode.index()][c.index()])
            .unwrap_or(MODE_DEFAULTS[mode.index()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_mode_has_a_default_and_defense_leads_emergencies() {
        assert!(matrix_is_valid());
        for mode in AuthorityMode::ALL {
            let p = AuthorityManager::priority_in(mode, None);
            assert!(p <= PRIORITY_LOWEST);
        }
        assert_eq!(
            AuthorityManager::priority_in(AuthorityMode::Emergency, Some(RequesterClass::Defense)),
            0
        );
    }
}
