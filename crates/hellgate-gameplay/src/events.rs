//! Outbound simulation events.
//!
//! Death transitions, pain reactions and dropped sounds are queued on a
//! channel and drained by the host once per tick.

use crossbeam_channel::{unbounded, Receiver, Sender};
use hellgate_common::{EntityId, SoundId};
use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::entity::MobileObject;

/// Events published by the simulation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Object health crossed to zero or below
    Killed {
        /// Object that died
        target: EntityId,
        /// Attributed source of the killing blow
        source: Option<EntityId>,
    },
    /// Object flinched from a non-lethal hit
    Pain {
        /// Object that was hit
        target: EntityId,
    },
    /// Sound was beyond audible range
    SoundDropped {
        /// Sound effect
        sound_id: SoundId,
        /// Approximate distance in map units
        distance: u32,
    },
}

impl GameEvent {
    /// Whether the event may be discarded when the queue is full.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        !matches!(self, Self::Killed { .. })
    }
}

/// Receives the Alive to Dead transition of an object.
///
/// Called exactly once per object, after its health has been reduced.
pub trait DeathHandler {
    /// Handles the death of `target`, attributed to `source`.
    fn on_death(&mut self, target: &mut MobileObject, source: Option<EntityId>);
}

impl<F> DeathHandler for F
where
    F: FnMut(&mut MobileObject, Option<EntityId>),
{
    fn on_death(&mut self, target: &mut MobileObject, source: Option<EntityId>) {
        self(target, source);
    }
}

/// Ordered event queue.
///
/// `capacity` bounds the transient events (`Pain`, `SoundDropped`): once
/// that many events are pending, new transient events are discarded.
/// `Killed` is always queued, since each death is reported exactly once.
#[derive(Debug)]
pub struct EventBus {
    sender: Sender<GameEvent>,
    receiver: Receiver<GameEvent>,
    capacity: usize,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(1024)
    }
}

impl EventBus {
    /// Creates a queue holding up to `capacity` transient events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Queues an event. Returns false if a transient event was discarded.
    pub fn publish(&self, event: GameEvent) -> bool {
        if event.is_transient() && self.receiver.len() >= self.capacity {
            trace!(?event, capacity = self.capacity, "event queue full");
            return false;
        }
        // the receiver is owned by self, so the channel is never disconnected
        self.sender.send(event).is_ok()
    }

    /// Drains all pending events in publish order.
    pub fn drain(&self) -> Vec<GameEvent> {
        self.receiver.try_iter().collect()
    }

    /// Returns the number of pending events.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Returns the transient event limit.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl DeathHandler for EventBus {
    fn on_death(&mut self, target: &mut MobileObject, source: Option<EntityId>) {
        self.publish(GameEvent::Killed {
            target: target.id(),
            source,
        });
    }
}
