//! Presentation-facing combat events.
//!
//! A session records every [`CombatEvent`] in its turn report and forwards
//! it to an [`EventSink`] after the state change has happened. Sinks observe;
//! they cannot veto or reorder anything.

use std::sync::{Arc, Mutex};

use crate::enemy::{ActionOutcome, PendingEffect};
use crate::session::{CombatOutcome, Turn};
use crate::specialization::{AbilityEffect, Trigger};
use crate::status::StatusTick;

/// Which side a status tick or effect landed on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "lowercase")]
pub enum Side {
    Player,
    Enemy,
}

/// Structured result of a passive ability, after the session applied it.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AppliedEffect {
    pub effect: AbilityEffect,
    /// Amount that actually landed: defense granted, damage dealt, cards
    /// drawn or turns applied, depending on the effect.
    pub magnitude: u32,
}

/// Something that happened during combat.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CombatEvent {
    CombatStarted {
        enemy_id: String,
        enemy_level: u32,
    },
    /// A player command resolved.
    PlayerActed {
        description: String,
        damage_dealt: u32,
        critical: bool,
    },
    EnemyActed(ActionOutcome),
    /// The enemy lost its turn to `stunned`.
    EnemyStunned,
    StatusTicked {
        side: Side,
        tick: StatusTick,
    },
    AbilityTriggered {
        ability_id: String,
        name: String,
        trigger: Trigger,
        applied: AppliedEffect,
    },
    /// A delayed enemy effect went off or expired.
    PendingResolved {
        effect: PendingEffect,
        description: String,
        damage_dealt: u32,
    },
    TurnChanged {
        turn: Turn,
    },
    MasteryLevelUp {
        new_level: u32,
        unlocked_abilities: Vec<String>,
    },
    CombatEnded(CombatOutcome),
}

/// Receives combat events for presentation.
pub trait EventSink: Send {
    fn emit(&mut self, event: &CombatEvent);
}

/// Discards every event.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&mut self, _event: &CombatEvent) {}
}

/// Collects events into a shared buffer.
///
/// Clones share the same buffer, so a test can keep one handle and give the
/// other to a session.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<CombatEvent>>>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copies the events collected so far.
    pub fn snapshot(&self) -> Vec<CombatEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        match self.events.lock() {
            Ok(events) => events.len(),
            Err(poisoned) => poisoned.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for EventLog {
    fn emit(&mut self, event: &CombatEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_clones_share_a_buffer() {
        let log = EventLog::new();
        let mut handle = log.clone();

        handle.emit(&CombatEvent::EnemyStunned);
        handle.emit(&CombatEvent::TurnChanged { turn: Turn::Player });

        assert_eq!(log.len(), 2);
        assert_eq!(log.snapshot()[0], CombatEvent::EnemyStunned);
    }

    #[test]
    fn null_sink_accepts_anything() {
        let mut sink = NullSink;
        sink.emit(&CombatEvent::EnemyStunned);
    }
}
