//! Simulation context.
//!
//! [`Simulation`] owns the constants, every mobile object, the event queue
//! and the pain RNG. The host calls [`Simulation::tick`] once per game tic
//! and routes combat hits and sound triggers through it. All state changes
//! happen on the calling thread.

use hellgate_common::{ConfigError, EntityId};
use tracing::debug;

use crate::config::SimConfig;
use crate::damage::{apply_damage, DamageOutcome, Inflictor};
use crate::entity::{EntityResult, MobileObject, MobjArena};
use crate::events::{EventBus, GameEvent};
use crate::movement;
use crate::sound::{attenuate, MapPoint, SoundOutput, SoundParams, SoundRequest};

/// Tick-driven simulation of mobile objects.
#[derive(Debug)]
pub struct Simulation {
    config: SimConfig,
    mobjs: MobjArena,
    events: EventBus,
    rng: fastrand::Rng,
    tick: u64,
}

impl Simulation {
    /// Creates an empty simulation after validating `config`.
    pub fn new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let events = EventBus::new(config.event_capacity);
        let rng = fastrand::Rng::with_seed(config.rng_seed);
        Ok(Self {
            config,
            mobjs: MobjArena::new(),
            events,
            rng,
            tick: 0,
        })
    }

    /// Simulation constants.
    #[must_use]
    pub const fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Number of completed ticks.
    #[must_use]
    pub const fn tick_count(&self) -> u64 {
        self.tick
    }

    /// All live objects.
    #[must_use]
    pub const fn mobjs(&self) -> &MobjArena {
        &self.mobjs
    }

    /// Adds an object.
    pub fn spawn(&mut self, mobj: MobileObject) -> EntityId {
        self.mobjs.spawn(mobj)
    }

    /// Removes an object.
    pub fn despawn(&mut self, id: EntityId) -> EntityResult<MobileObject> {
        self.mobjs.despawn(id)
    }

    /// Looks up an object.
    pub fn get(&self, id: EntityId) -> EntityResult<&MobileObject> {
        self.mobjs.get(id)
    }

    /// Looks up an object for mutation (e.g. floor height updates).
    pub fn get_mut(&mut self, id: EntityId) -> EntityResult<&mut MobileObject> {
        self.mobjs.get_mut(id)
    }

    /// Advances every object by one tick. Returns the new tick count.
    pub fn tick(&mut self) -> u64 {
        for mobj in self.mobjs.iter_mut() {
            movement::step(mobj, &self.config);
        }
        self.tick += 1;

        debug!(
            tick = self.tick,
            objects = self.mobjs.len(),
            pending_events = self.events.pending_count(),
            "tick complete"
        );
        self.tick
    }

    /// Resolves a hit on `target`.
    ///
    /// `inflictor` must be a live object; `source` is only forwarded for
    /// kill attribution and may refer to a removed object.
    pub fn damage(
        &mut self,
        target: EntityId,
        inflictor: Option<EntityId>,
        source: Option<EntityId>,
        amount: i32,
    ) -> EntityResult<DamageOutcome> {
        let inflictor = inflictor
            .map(|id| self.mobjs.get(id).map(Inflictor::from))
            .transpose()?;

        let mobj = self.mobjs.get_mut(target)?;
        let outcome = apply_damage(
            mobj,
            inflictor.as_ref(),
            source,
            amount,
            &self.config,
            &mut self.events,
        );

        if matches!(outcome, DamageOutcome::Damaged { .. })
            && self.rng.u16(..256) < mobj.pain_chance
        {
            self.events.publish(GameEvent::Pain { target });
        }

        Ok(outcome)
    }

    /// Plays a sound at `origin` as heard by `listener`.
    ///
    /// Returns the dispatched request, or `None` if the sound was out of
    /// range (a [`GameEvent::SoundDropped`] is queued instead).
    pub fn start_sound<O: SoundOutput + ?Sized>(
        &self,
        listener: EntityId,
        origin: EntityId,
        params: &SoundParams,
        output: &mut O,
    ) -> EntityResult<Option<SoundRequest>> {
        let listener = MapPoint::from(self.mobjs.get(listener)?);
        let origin = MapPoint::from(self.mobjs.get(origin)?);

        match attenuate(listener, origin, params, self.config.max_sound_distance) {
            Some(request) => {
                output.start_sound(&request);
                Ok(Some(request))
            },
            None => {
                self.events.publish(GameEvent::SoundDropped {
                    sound_id: params.sound_id,
                    distance: listener.approx_distance_to(origin),
                });
                Ok(None)
            },
        }
    }

    /// Drains queued events.
    pub fn drain_events(&self) -> Vec<GameEvent> {
        self.events.drain()
    }
}
