//! Damage resolution.
//!
//! A hit on a living object goes through armor first (players only), then
//! health. Crossing to zero health or below fires the death transition
//! once; dead objects ignore further damage.

use hellgate_common::{EntityId, Fixed};
use tracing::{info, trace};

use crate::config::SimConfig;
use crate::entity::{MobileObject, MobjFlags};
use crate::events::DeathHandler;
use crate::sound::approximate_distance;

/// Position and identity of the object that delivered a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inflictor {
    /// Inflicting object
    pub id: EntityId,
    /// X position at the time of the hit
    pub x: Fixed,
    /// Y position at the time of the hit
    pub y: Fixed,
}

impl From<&MobileObject> for Inflictor {
    fn from(mobj: &MobileObject) -> Self {
        Self {
            id: mobj.id(),
            x: mobj.x,
            y: mobj.y,
        }
    }
}

/// What a damage call did to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DamageOutcome {
    /// Target was already dead or invulnerable.
    Ignored,
    /// Target survived.
    Damaged {
        /// Taken by armor
        absorbed: i32,
        /// Taken by health
        dealt: i32,
    },
    /// Target died from this hit.
    Killed {
        /// Taken by armor
        absorbed: i32,
        /// Taken by health
        dealt: i32,
    },
}

impl DamageOutcome {
    /// Whether the hit changed the target's health.
    #[must_use]
    pub const fn landed(self) -> bool {
        !matches!(self, Self::Ignored)
    }
}

/// Applies `damage` to `target`.
///
/// `inflictor` is the object that made contact (it pushes the target away,
/// even a player in god mode); `source` is credited with the kill and
/// forwarded to `deaths`.
pub fn apply_damage<H: DeathHandler + ?Sized>(
    target: &mut MobileObject,
    inflictor: Option<&Inflictor>,
    source: Option<EntityId>,
    damage: i32,
    config: &SimConfig,
    deaths: &mut H,
) -> DamageOutcome {
    if target.health <= 0 {
        return DamageOutcome::Ignored;
    }

    if let Some(inflictor) = inflictor {
        if !target.flags.contains(MobjFlags::NO_CLIP) {
            apply_thrust(target, inflictor, damage, config);
        }
    }

    // invulnerable players are still pushed
    if target.player.as_ref().is_some_and(|p| p.god_mode) {
        return DamageOutcome::Ignored;
    }

    let mut damage = damage;
    let mut absorbed = 0;
    if let Some(player) = target.player.as_mut() {
        let saved = player
            .armor_type
            .absorption(damage)
            .min(player.armor_points)
            .max(0);
        player.armor_points -= saved;
        damage -= saved;
        absorbed = saved;
    }

    target.health = target.health.saturating_sub(damage);
    trace!(
        target = target.id().raw(),
        absorbed,
        dealt = damage,
        health = target.health,
        "damage applied"
    );

    if target.health <= 0 {
        info!(
            target = %target.id(),
            source = ?source.map(EntityId::raw),
            "object killed"
        );
        deaths.on_death(target, source);
        return DamageOutcome::Killed {
            absorbed,
            dealt: damage,
        };
    }

    DamageOutcome::Damaged {
        absorbed,
        dealt: damage,
    }
}

/// Pushes `target` away from `inflictor` in proportion to damage over mass.
fn apply_thrust(
    target: &mut MobileObject,
    inflictor: &Inflictor,
    damage: i32,
    config: &SimConfig,
) {
    let thrust = i64::from(damage)
        .saturating_mul(i64::from(Fixed::ONE.raw() >> 3))
        .saturating_mul(i64::from(config.knockback_scale))
        / i64::from(target.mass.max(1));
    let thrust = Fixed::from_raw(thrust.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32);
    if thrust == Fixed::ZERO {
        return;
    }

    let dx = target.x - inflictor.x;
    let dy = target.y - inflictor.y;
    let dist = approximate_distance(dx.raw(), dy.raw());
    if dist == 0 {
        return;
    }
    let dist = Fixed::from_raw(i32::try_from(dist).unwrap_or(i32::MAX));

    target.momx += thrust.fixed_mul(dx.fixed_div(dist));
    target.momy += thrust.fixed_mul(dy.fixed_div(dist));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{ArmorType, Player};

    fn target(health: i32) -> MobileObject {
        MobileObject::new(Fixed::ZERO, Fixed::ZERO, Fixed::ZERO).with_health(health)
    }

    fn player(armor_type: ArmorType, armor_points: i32) -> MobileObject {
        target(100).with_player(Player::with_armor(armor_type, armor_points))
    }

    fn no_deaths(_: &mut MobileObject, _: Option<EntityId>) {
        panic!("unexpected death");
    }

    fn armor_points(mobj: &MobileObject) -> i32 {
        mobj.player.as_ref().map_or(0, |p| p.armor_points)
    }

    #[test]
    fn test_plain_damage() {
        let config = SimConfig::default();
        let mut m = target(100);
        let outcome = apply_damage(&mut m, None, None, 30, &config, &mut no_deaths);

        assert_eq!(outcome, DamageOutcome::Damaged { absorbed: 0, dealt: 30 });
        assert_eq!(m.health, 70);
    }

    #[test]
    fn test_green_armor() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Green, 100);
        let outcome = apply_damage(&mut m, None, None, 30, &config, &mut no_deaths);

        assert_eq!(outcome, DamageOutcome::Damaged { absorbed: 10, dealt: 20 });
        assert_eq!(m.health, 80);
        assert_eq!(armor_points(&m), 90);
    }

    #[test]
    fn test_blue_armor() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Blue, 100);
        apply_damage(&mut m, None, None, 31, &config, &mut no_deaths);

        assert_eq!(m.health, 84);
        assert_eq!(armor_points(&m), 85);
    }

    #[test]
    fn test_armor_depletion_caps_absorption() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Green, 5);
        apply_damage(&mut m, None, None, 30, &config, &mut no_deaths);

        assert_eq!(m.health, 75);
        assert_eq!(armor_points(&m), 0);
    }

    #[test]
    fn test_no_armor_type_absorbs_nothing() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::None, 100);
        apply_damage(&mut m, None, None, 50, &config, &mut no_deaths);

        assert_eq!(m.health, 50);
        assert_eq!(armor_points(&m), 100);
    }

    #[test]
    fn test_negative_damage_heals_without_growing_armor() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Green, 10);
        apply_damage(&mut m, None, None, -30, &config, &mut no_deaths);

        assert_eq!(m.health, 130);
        assert_eq!(armor_points(&m), 10);
    }

    #[test]
    fn test_kill_fires_once() {
        let config = SimConfig::default();
        let killer = EntityId::from_raw(7);
        let mut deaths = Vec::new();
        let mut record = |m: &mut MobileObject, s: Option<EntityId>| deaths.push((m.id(), s));
        let mut m = target(20);

        let first = apply_damage(&mut m, None, Some(killer), 25, &config, &mut record);
        let second = apply_damage(&mut m, None, Some(killer), 25, &config, &mut record);

        assert_eq!(first, DamageOutcome::Killed { absorbed: 0, dealt: 25 });
        assert_eq!(second, DamageOutcome::Ignored);
        assert_eq!(m.health, -5);
        assert_eq!(deaths, vec![(m.id(), Some(killer))]);
    }

    #[test]
    fn test_exact_zero_is_death() {
        let config = SimConfig::default();
        let mut count = 0;
        let mut m = target(10);
        apply_damage(
            &mut m,
            None,
            None,
            10,
            &config,
            &mut |_: &mut MobileObject, _: Option<EntityId>| count += 1,
        );

        assert_eq!(m.health, 0);
        assert_eq!(count, 1);
    }

    #[test]
    fn test_dead_target_unchanged() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Blue, 50).with_health(0);
        let outcome = apply_damage(&mut m, None, None, 40, &config, &mut no_deaths);

        assert!(!outcome.landed());
        assert_eq!(m.health, 0);
        assert_eq!(armor_points(&m), 50);
    }

    #[test]
    fn test_god_mode() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Green, 50);
        if let Some(p) = m.player.as_mut() {
            p.god_mode = true;
        }

        let outcome = apply_damage(&mut m, None, None, 500, &config, &mut no_deaths);
        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(m.health, 100);
        assert_eq!(armor_points(&m), 50);
    }

    #[test]
    fn test_god_mode_still_pushed() {
        let config = SimConfig::default();
        let mut m = player(ArmorType::Blue, 50);
        if let Some(p) = m.player.as_mut() {
            p.god_mode = true;
        }
        let inflictor = Inflictor {
            id: EntityId::from_raw(3),
            x: Fixed::ZERO,
            y: Fixed::from_int(-64),
        };

        let outcome = apply_damage(&mut m, Some(&inflictor), None, 10, &config, &mut no_deaths);

        assert_eq!(outcome, DamageOutcome::Ignored);
        assert_eq!(m.momy.raw(), 81920);
        assert_eq!(m.health, 100);
        assert_eq!(armor_points(&m), 50);
    }

    #[test]
    fn test_knockback_extremes_saturate() {
        let config = SimConfig {
            knockback_scale: i32::MAX,
            ..SimConfig::default()
        };
        assert!(config.validate().is_ok());
        let inflictor = Inflictor {
            id: EntityId::from_raw(3),
            x: Fixed::from_int(-64),
            y: Fixed::ZERO,
        };

        let mut m = target(i32::MAX);
        apply_damage(&mut m, Some(&inflictor), None, 1_000_000, &config, &mut no_deaths);
        assert_eq!(m.momx, Fixed::MAX);
        assert_eq!(m.momy, Fixed::ZERO);

        let mut m = target(100);
        apply_damage(&mut m, Some(&inflictor), None, i32::MIN, &config, &mut no_deaths);
        assert_eq!(m.momx, Fixed::MIN);
        assert_eq!(m.health, i32::MAX);
    }

    #[test]
    fn test_knockback_away_from_inflictor() {
        let config = SimConfig::default();
        let mut m = target(100);
        let inflictor = Inflictor {
            id: EntityId::from_raw(3),
            x: Fixed::from_int(-64),
            y: Fixed::ZERO,
        };

        apply_damage(&mut m, Some(&inflictor), None, 10, &config, &mut no_deaths);

        // 10 * 8192 * 100 / 100 = 81920; unit x = 1.0
        assert_eq!(m.momx.raw(), 81920);
        assert_eq!(m.momy, Fixed::ZERO);
    }

    #[test]
    fn test_knockback_skipped_for_no_clip() {
        let config = SimConfig::default();
        let mut m = target(100).with_flags(MobjFlags::NO_CLIP);
        let inflictor = Inflictor {
            id: EntityId::from_raw(3),
            x: Fixed::from_int(5),
            y: Fixed::from_int(5),
        };

        apply_damage(&mut m, Some(&inflictor), None, 10, &config, &mut no_deaths);
        assert_eq!(m.momx, Fixed::ZERO);
        assert_eq!(m.momy, Fixed::ZERO);
    }

    #[test]
    fn test_knockback_coincident_inflictor() {
        let config = SimConfig::default();
        let mut m = target(100);
        let inflictor = Inflictor::from(&m);

        apply_damage(&mut m, Some(&inflictor), None, 10, &config, &mut no_deaths);
        assert_eq!(m.momx, Fixed::ZERO);
        assert_eq!(m.health, 90);
    }
}
