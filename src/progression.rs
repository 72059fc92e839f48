//! XP, levels and the upgrade draft.
//!
//! The [`UpgradeLedger`] is the one place upgrade levels live: offers are drawn
//! from it and choices are written back through it before the stat change is
//! applied to the player.

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::info;

use crate::clock::SimulationClock;
use crate::constants::{UPGRADE_OFFER_SIZE, XP_BASE, XP_PER_LEVEL};
use crate::entities::{Player, Rgb};

// ── Upgrade catalogue ────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UpgradeKind {
    Multishot,
    FireRate,
    BulletSize,
    Damage,
    MoveSpeed,
    MaxHp,
    Regen,
    Magnet,
    Pierce,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 9] = [
        UpgradeKind::Multishot,
        UpgradeKind::FireRate,
        UpgradeKind::BulletSize,
        UpgradeKind::Damage,
        UpgradeKind::MoveSpeed,
        UpgradeKind::MaxHp,
        UpgradeKind::Regen,
        UpgradeKind::Magnet,
        UpgradeKind::Pierce,
    ];

    pub fn max_level(self) -> u32 {
        match self {
            UpgradeKind::Multishot => 4,
            UpgradeKind::Regen | UpgradeKind::Pierce => 3,
            _ => 5,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            UpgradeKind::Multishot => "Multishot",
            UpgradeKind::FireRate => "Fire Rate",
            UpgradeKind::BulletSize => "Bullet Size",
            UpgradeKind::Damage => "Damage Up",
            UpgradeKind::MoveSpeed => "Swift",
            UpgradeKind::MaxHp => "Vitality",
            UpgradeKind::Regen => "Regen",
            UpgradeKind::Magnet => "Magnet",
            UpgradeKind::Pierce => "Piercing",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            UpgradeKind::Multishot => "+1 projectile per volley",
            UpgradeKind::FireRate => "Shoot 15% faster",
            UpgradeKind::BulletSize => "Bullets 30% larger",
            UpgradeKind::Damage => "+50% bullet damage",
            UpgradeKind::MoveSpeed => "+15% movement speed",
            UpgradeKind::MaxHp => "+25 max HP (heals too)",
            UpgradeKind::Regen => "+1 HP/sec regeneration",
            UpgradeKind::Magnet => "+40% XP pickup radius",
            UpgradeKind::Pierce => "Bullets pierce +1 enemy",
        }
    }

    pub fn icon_color(self) -> Rgb {
        match self {
            UpgradeKind::Multishot => Rgb::new(0, 255, 255),
            UpgradeKind::FireRate => Rgb::new(255, 255, 0),
            UpgradeKind::BulletSize => Rgb::new(255, 153, 0),
            UpgradeKind::Damage => Rgb::new(255, 51, 51),
            UpgradeKind::MoveSpeed => Rgb::new(77, 204, 255),
            UpgradeKind::MaxHp => Rgb::new(0, 255, 102),
            UpgradeKind::Regen => Rgb::new(51, 255, 153),
            UpgradeKind::Magnet => Rgb::new(204, 102, 255),
            UpgradeKind::Pierce => Rgb::new(255, 204, 51),
        }
    }

    /// Apply one level of this upgrade to the player's stat block.
    pub fn apply(self, player: &mut Player) {
        match self {
            UpgradeKind::Multishot => player.bullet_count += 1,
            UpgradeKind::FireRate => player.fire_interval *= 0.85,
            UpgradeKind::BulletSize => player.bullet_scale *= 1.3,
            UpgradeKind::Damage => player.bullet_damage *= 1.5,
            UpgradeKind::MoveSpeed => player.move_speed *= 1.15,
            UpgradeKind::MaxHp => {
                player.max_health += 25.0;
                player.heal(25.0);
            }
            UpgradeKind::Regen => player.regen_per_second += 1.0,
            UpgradeKind::Magnet => player.pickup_radius *= 1.4,
            UpgradeKind::Pierce => player.pierce_count += 1,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UpgradeInfo {
    pub kind: UpgradeKind,
    pub current_level: u32,
    pub max_level: u32,
}

impl UpgradeInfo {
    pub fn is_maxed(&self) -> bool {
        self.current_level >= self.max_level
    }
}

// ── Ledger ───────────────────────────────────────────────────────────────────

/// Per-run record of every upgrade's level. Never reset mid-run.
#[derive(Clone, Debug)]
pub struct UpgradeLedger {
    entries: [UpgradeInfo; 9],
}

impl Default for UpgradeLedger {
    fn default() -> Self {
        Self {
            entries: UpgradeKind::ALL.map(|kind| UpgradeInfo {
                kind,
                current_level: 0,
                max_level: kind.max_level(),
            }),
        }
    }
}

impl UpgradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[UpgradeInfo] {
        &self.entries
    }

    pub fn info(&self, kind: UpgradeKind) -> UpgradeInfo {
        self.entries[Self::slot(kind)]
    }

    pub fn level(&self, kind: UpgradeKind) -> u32 {
        self.info(kind).current_level
    }

    /// Kinds that can still be taken, in catalogue order.
    pub fn eligible(&self) -> Vec<UpgradeKind> {
        self.entries
            .iter()
            .filter(|info| !info.is_maxed())
            .map(|info| info.kind)
            .collect()
    }

    /// Bump `kind` by one level. Returns `false` (and changes nothing) if it
    /// is already maxed.
    pub fn advance(&mut self, kind: UpgradeKind) -> bool {
        let info = &mut self.entries[Self::slot(kind)];
        if info.is_maxed() {
            return false;
        }
        info.current_level += 1;
        true
    }

    fn slot(kind: UpgradeKind) -> usize {
        kind as usize
    }
}

// ── Progression ──────────────────────────────────────────────────────────────

/// XP needed to leave `level`.
pub fn xp_needed(level: u32) -> u32 {
    XP_BASE + level * XP_PER_LEVEL
}

/// Up to three distinct upgrades to choose from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UpgradeOffer {
    pub choices: Vec<UpgradeKind>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LevelUp {
    pub new_level: u32,
    /// `false` when every upgrade is already maxed.
    pub offered: bool,
}

#[derive(Clone, Debug)]
pub struct Progression {
    xp: u32,
    level: u32,
    ledger: UpgradeLedger,
    offer: Option<UpgradeOffer>,
}

impl Default for Progression {
    fn default() -> Self {
        Self {
            xp: 0,
            level: 1,
            ledger: UpgradeLedger::new(),
            offer: None,
        }
    }
}

impl Progression {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn xp(&self) -> u32 {
        self.xp
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn xp_needed(&self) -> u32 {
        xp_needed(self.level)
    }

    pub fn ledger(&self) -> &UpgradeLedger {
        &self.ledger
    }

    pub fn offer(&self) -> Option<&UpgradeOffer> {
        self.offer.as_ref()
    }

    pub fn is_choosing(&self) -> bool {
        self.offer.is_some()
    }

    /// Credit a collected gem and level up if the threshold is crossed.
    ///
    /// No level-up happens while an offer is already open; the XP just
    /// accumulates. When an offer opens the clock is paused.
    pub fn collect(
        &mut self,
        value: u32,
        clock: &mut SimulationClock,
        rng: &mut impl Rng,
    ) -> Option<LevelUp> {
        self.xp += value;
        if self.xp < self.xp_needed() || self.is_choosing() {
            return None;
        }

        self.xp -= self.xp_needed();
        self.level += 1;

        let offer = self.draw_offer(rng);
        let offered = offer.is_some();
        if let Some(offer) = offer {
            self.offer = Some(offer);
            clock.pause();
        }
        info!(level = self.level, carry = self.xp, offered, "level up");
        Some(LevelUp {
            new_level: self.level,
            offered,
        })
    }

    /// Shuffle the eligible upgrades and keep up to three.
    pub fn draw_offer(&self, rng: &mut impl Rng) -> Option<UpgradeOffer> {
        let mut available = self.ledger.eligible();
        if available.is_empty() {
            return None;
        }
        available.shuffle(rng);
        available.truncate(UPGRADE_OFFER_SIZE);
        Some(UpgradeOffer { choices: available })
    }

    /// Take the upgrade in slot `index` of the open offer.
    ///
    /// Returns `None` if no offer is open or the slot is empty; the offer
    /// stays open in that case.
    pub fn select(
        &mut self,
        index: usize,
        player: &mut Player,
        clock: &mut SimulationClock,
    ) -> Option<UpgradeKind> {
        let kind = *self.offer.as_ref()?.choices.get(index)?;
        if self.ledger.advance(kind) {
            kind.apply(player);
        }
        self.offer = None;
        clock.resume();
        info!(
            upgrade = kind.name(),
            level = self.ledger.level(kind),
            "upgrade chosen"
        );
        Some(kind)
    }
}
