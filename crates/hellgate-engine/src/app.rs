//! Scripted demo scene.
//!
//! A player in green armor stands at the origin. An imp across the room
//! fires a projectile at the player while the player shoots back. Hits and
//! sounds are scheduled on fixed ticks so every run is identical for a
//! given config.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, info};

use hellgate_common::{EntityId, Fixed, SoundId};
use hellgate_gameplay::{
    ArmorType, GameEvent, MobileObject, MobjFlags, Player, SimConfig, Simulation, SoundOutput,
    SoundParams, SoundRequest,
};

/// Ticks the demo runs for by default.
pub const DEMO_TICKS: u64 = 70;

const SFX_PISTOL: SoundId = SoundId::new(1);
const SFX_FIREBALL: SoundId = SoundId::new(9);
const SFX_EXPLODE: SoundId = SoundId::new(17);

/// Sound output that only logs what it would play.
#[derive(Debug, Default)]
struct LogOutput {
    played: usize,
}

impl SoundOutput for LogOutput {
    fn start_sound(&mut self, request: &SoundRequest) {
        self.played += 1;
        info!(
            sound = request.sound_id.raw(),
            volume = request.volume,
            separation = request.separation,
            priority = request.priority,
            "play sound"
        );
    }
}

/// Object ids of the demo scene.
struct Scene {
    player: EntityId,
    imp: EntityId,
    fireball: EntityId,
}

impl Scene {
    fn spawn(sim: &mut Simulation) -> Self {
        let player = sim.spawn(
            MobileObject::new(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO)
                .with_player(Player::with_armor(ArmorType::Green, 100)),
        );
        let imp = sim.spawn(
            MobileObject::new(Fixed::from_int(640), Fixed::from_int(96), Fixed::ZERO)
                .with_health(60)
                .with_pain_chance(200),
        );
        let fireball = sim.spawn(
            MobileObject::new(Fixed::from_int(620), Fixed::from_int(96), Fixed::from_int(32))
                .with_flags(MobjFlags::MISSILE)
                .with_bounds(Fixed::from_int(32), Fixed::from_int(128))
                .with_momentum(Fixed::from_int(-10), Fixed::from_raw(-0x18000), Fixed::ZERO),
        );

        Self {
            player,
            imp,
            fireball,
        }
    }
}

/// Runs the demo for `ticks` ticks with the config at `config_path`.
pub fn run<P: AsRef<Path>>(config_path: P, ticks: u64) -> Result<()> {
    let config = SimConfig::load_from(config_path);
    let mut sim = Simulation::new(config).context("invalid simulation config")?;
    let scene = Scene::spawn(&mut sim);
    let mut output = LogOutput::default();

    sim.start_sound(
        scene.player,
        scene.fireball,
        &SoundParams::new(SFX_FIREBALL, 70),
        &mut output,
    )?;

    for _ in 0..ticks {
        let tick = sim.tick();

        if tick % 10 == 0 && sim.get(scene.imp)?.is_alive() {
            let outcome = sim.damage(scene.imp, Some(scene.player), Some(scene.player), 15)?;
            debug!(tick, ?outcome, "player fires");
            sim.start_sound(
                scene.player,
                scene.player,
                &SoundParams::new(SFX_PISTOL, 64),
                &mut output,
            )?;
        }

        if sim.mobjs().contains(scene.fireball) {
            let ball = sim.get(scene.fireball)?;
            let player = sim.get(scene.player)?;
            if ball.x <= player.x + Fixed::from_int(16) {
                let fireball = scene.fireball;
                sim.damage(scene.player, Some(fireball), Some(scene.imp), 20)?;
                sim.start_sound(
                    scene.player,
                    fireball,
                    &SoundParams::new(SFX_EXPLODE, 70),
                    &mut output,
                )?;
                sim.despawn(fireball)?;
            }
        }

        for event in sim.drain_events() {
            log_event(tick, &event);
        }
    }

    let player = sim.get(scene.player)?;
    info!(
        ticks = sim.tick_count(),
        player_health = player.health,
        player_armor = player.player.as_ref().map_or(0, |p| p.armor_points),
        sounds = output.played,
        "demo finished"
    );
    Ok(())
}

fn log_event(tick: u64, event: &GameEvent) {
    match event {
        GameEvent::Killed { target, source } => {
            info!(tick, target = target.raw(), source = source.map(EntityId::raw), "killed");
        },
        GameEvent::Pain { target } => {
            info!(tick, target = target.raw(), "pain");
        },
        GameEvent::SoundDropped { sound_id, distance } => {
            info!(tick, sound = sound_id.raw(), distance, "sound dropped");
        },
    }
}
