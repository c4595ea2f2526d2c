//! Tick-scoped events an organism experienced.
//!
//! [`EventResults`] collects what happened to one organism during a single
//! tick. It is frozen together with the owning state and is never carried
//! over into the next tick.

use serde::{Deserialize, Serialize};

use crate::ids::{ActionId, OrganismId};

/// Something that happened to an organism during the last tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum OrganismEvent {
    /// The organism was born this tick.
    Born,
    /// The host relocated the organism.
    Teleported,
    /// The organism attacked `target`.
    Attacked {
        /// The organism that was attacked.
        target: OrganismId,
    },
    /// The organism ate from `food`.
    Ate {
        /// The plant or corpse eaten from.
        food: OrganismId,
    },
    /// The organism defended against `attacker`.
    Defended {
        /// The organism defended against.
        attacker: OrganismId,
    },
    /// A move action finished, either arriving or being blocked.
    MoveCompleted {
        /// The completed move action.
        action_id: ActionId,
        /// Whether the destination was reached.
        reached_destination: bool,
    },
    /// A reproduce action finished and offspring were placed.
    ReproduceCompleted {
        /// The completed reproduce action.
        action_id: ActionId,
    },
}

/// Error returned when pushing into a frozen [`EventResults`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event results are frozen")]
pub struct EventResultsFrozen;

/// The events of one organism for one tick.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventResults {
    events: Vec<OrganismEvent>,
    #[serde(skip)]
    frozen: bool,
}

impl EventResults {
    /// Create an empty, writable bundle.
    pub const fn new() -> Self {
        Self {
            events: Vec::new(),
            frozen: false,
        }
    }

    /// Append an event. Fails once the bundle is frozen.
    pub fn push(&mut self, event: OrganismEvent) -> Result<(), EventResultsFrozen> {
        if self.frozen {
            return Err(EventResultsFrozen);
        }
        self.events.push(event);
        Ok(())
    }

    /// Freeze the bundle. Idempotent.
    pub const fn make_immutable(&mut self) {
        self.frozen = true;
    }

    /// Whether the bundle has been frozen.
    pub const fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// All events in the order they were recorded.
    pub fn events(&self) -> &[OrganismEvent] {
        &self.events
    }

    /// Whether the organism was teleported.
    pub fn teleported(&self) -> bool {
        self.events.iter().any(|e| matches!(e, OrganismEvent::Teleported))
    }

    /// Whether the organism attacked anything.
    pub fn attacked(&self) -> bool {
        self.events.iter().any(|e| matches!(e, OrganismEvent::Attacked { .. }))
    }

    /// Whether the organism ate.
    pub fn ate(&self) -> bool {
        self.events.iter().any(|e| matches!(e, OrganismEvent::Ate { .. }))
    }

    /// Whether the organism defended itself.
    pub fn defended(&self) -> bool {
        self.events.iter().any(|e| matches!(e, OrganismEvent::Defended { .. }))
    }

    /// Whether a move action completed.
    pub fn move_completed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, OrganismEvent::MoveCompleted { .. }))
    }

    /// Whether a reproduce action completed.
    pub fn reproduce_completed(&self) -> bool {
        self.events
            .iter()
            .any(|e| matches!(e, OrganismEvent::ReproduceCompleted { .. }))
    }
}
