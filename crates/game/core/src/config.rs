/// Combat balance constants and tunable parameters.
///
/// Every number the simulation compares against lives here so content files can
/// override them without touching code. [`CombatConfig::default`] carries the
/// canonical values.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CombatConfig {
    /// Damage multiplier when the attacker's element is strong against the target.
    pub element_bonus: f32,

    /// XP required for the first level-up.
    pub xp_base: f32,
    /// Geometric growth of the XP threshold per level.
    pub xp_multiplier: f32,
    /// Stat increments granted on every level-up.
    pub level_growth: LevelGrowth,

    /// Fraction of the receiver's defense subtracted from incoming damage.
    pub defense_mitigation: f32,

    /// Crit chance of regular hits (skills, projectiles).
    pub crit_chance: f32,
    pub crit_multiplier: f32,
    /// Crit chance and multiplier of ultimate hits.
    pub ultimate_crit_chance: f32,
    pub ultimate_crit_multiplier: f32,

    /// Lower bound for a skill cooldown after cooldown-reduction modifiers.
    pub min_cooldown: f32,

    /// Delay spent hovering at max range before a boomerang returns.
    pub boomerang_pause: f32,
    /// Distance to the owner at which a returning boomerang is caught.
    pub catch_radius: f32,

    /// Search range of attack skills without a projectile behavior.
    pub direct_attack_range: f32,
    /// Duration of elemental status effects applied by hits.
    pub status_duration: f32,
    /// Knockback distance applied by Earth hits.
    pub knockback_distance: f32,

    /// Number of skill choices presented at level-up.
    pub offer_size: usize,
    /// Player collision radius used for enemy contact damage.
    pub player_radius: f32,
}

/// Fixed stat increments applied per level-up.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LevelGrowth {
    pub max_health: f32,
    pub attack: f32,
    pub defense: f32,
    pub speed: f32,
    pub regen_rate: f32,
}

impl Default for LevelGrowth {
    fn default() -> Self {
        Self {
            max_health: 10.0,
            attack: 2.0,
            defense: 1.0,
            speed: 0.5,
            regen_rate: 0.2,
        }
    }
}

impl CombatConfig {
    pub const DEFAULT_ELEMENT_BONUS: f32 = 1.2;
    pub const DEFAULT_XP_BASE: f32 = 100.0;
    pub const DEFAULT_XP_MULTIPLIER: f32 = 1.5;
    pub const DEFAULT_MIN_COOLDOWN: f32 = 0.1;

    // ===== compile-time capacities =====
    /// Maximum simultaneous status effects tracked per enemy.
    pub const MAX_STATUS_EFFECTS: usize = 6;

    pub fn new() -> Self {
        Self {
            element_bonus: Self::DEFAULT_ELEMENT_BONUS,
            xp_base: Self::DEFAULT_XP_BASE,
            xp_multiplier: Self::DEFAULT_XP_MULTIPLIER,
            level_growth: LevelGrowth::default(),
            defense_mitigation: 0.5,
            crit_chance: 0.1,
            crit_multiplier: 2.0,
            ultimate_crit_chance: 0.3,
            ultimate_crit_multiplier: 1.5,
            min_cooldown: Self::DEFAULT_MIN_COOLDOWN,
            boomerang_pause: 0.2,
            catch_radius: 0.75,
            direct_attack_range: 8.0,
            status_duration: 2.0,
            knockback_distance: 1.5,
            offer_size: 3,
            player_radius: 0.5,
        }
    }

    /// XP threshold for leaving `level`: `base * multiplier^(level-1)`.
    pub fn xp_threshold(&self, level: u32) -> f32 {
        self.xp_base * self.xp_multiplier.powi(level.saturating_sub(1) as i32)
    }
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self::new()
    }
}
