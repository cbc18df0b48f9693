//! Reward stats granted by a tier

use serde::{Deserialize, Serialize};

/// Stat a tier rewards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StatKind {
    /// Flat attack (`ATK`)
    Attack,

    /// Flat defense (`DEF`)
    Defense,

    /// Maximum health (`HP`)
    Health,

    /// Health recovery per tick (`HP_REC`)
    HealthRecovery,

    /// Critical damage bonus (`CRIT_DMG`)
    CriticalDamage,

    /// Gold gain bonus (`GOLD_GAIN`)
    GoldGain,

    /// Experience gain bonus (`EXP_GAIN`)
    ExpGain,

    /// Damage reduction rate (`DMG_REDU`)
    DamageReduction,

    /// Critical chance rate (`CRIT_CH`)
    CriticalChance,

    /// Attack speed rate (`ATK_SPD`)
    AttackSpeed,

    /// Movement speed rate (`MOV_SPD`)
    MoveSpeed,
}

impl StatKind {
    /// Parse a table stat key
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "ATK" => Some(StatKind::Attack),
            "DEF" => Some(StatKind::Defense),
            "HP" => Some(StatKind::Health),
            "HP_REC" => Some(StatKind::HealthRecovery),
            "CRIT_DMG" => Some(StatKind::CriticalDamage),
            "GOLD_GAIN" => Some(StatKind::GoldGain),
            "EXP_GAIN" => Some(StatKind::ExpGain),
            "DMG_REDU" => Some(StatKind::DamageReduction),
            "CRIT_CH" => Some(StatKind::CriticalChance),
            "ATK_SPD" => Some(StatKind::AttackSpeed),
            "MOV_SPD" => Some(StatKind::MoveSpeed),
            _ => None,
        }
    }

    /// The table key for this stat
    pub fn key(&self) -> &'static str {
        match self {
            StatKind::Attack => "ATK",
            StatKind::Defense => "DEF",
            StatKind::Health => "HP",
            StatKind::HealthRecovery => "HP_REC",
            StatKind::CriticalDamage => "CRIT_DMG",
            StatKind::GoldGain => "GOLD_GAIN",
            StatKind::ExpGain => "EXP_GAIN",
            StatKind::DamageReduction => "DMG_REDU",
            StatKind::CriticalChance => "CRIT_CH",
            StatKind::AttackSpeed => "ATK_SPD",
            StatKind::MoveSpeed => "MOV_SPD",
        }
    }

    /// Rate-like stats are authored in hundredths
    pub fn is_rate_like(&self) -> bool {
        matches!(
            self,
            StatKind::DamageReduction
                | StatKind::CriticalChance
                | StatKind::AttackSpeed
                | StatKind::MoveSpeed
        )
    }
}

/// Magnitude of a reward
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StatMagnitude {
    /// Count-like stats keep the raw value
    Count(i64),

    /// Rate-like stats store `raw * 0.01`
    Rate(f64),
}

impl StatMagnitude {
    /// Magnitude as a float, whichever rule produced it
    pub fn as_f64(&self) -> f64 {
        match self {
            StatMagnitude::Count(value) => *value as f64,
            StatMagnitude::Rate(value) => *value,
        }
    }
}

/// A (stat, magnitude) reward pair
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RewardStat {
    /// Which stat is rewarded
    pub kind: StatKind,

    /// How much of it
    pub magnitude: StatMagnitude,
}

impl RewardStat {
    /// Build a reward from its raw authored value
    ///
    /// The scaling rule is fixed by `kind`: rate-like stats become a fraction,
    /// everything else stays an integer.
    ///
    /// # Examples
    ///
    /// ```
    /// use compendium_domain::{RewardStat, StatKind, StatMagnitude};
    ///
    /// let rate = RewardStat::from_raw(StatKind::CriticalChance, 550);
    /// assert_eq!(rate.magnitude, StatMagnitude::Rate(5.5));
    ///
    /// let count = RewardStat::from_raw(StatKind::Attack, 550);
    /// assert_eq!(count.magnitude, StatMagnitude::Count(550));
    /// ```
    pub fn from_raw(kind: StatKind, raw: i64) -> Self {
        let magnitude = if kind.is_rate_like() {
            StatMagnitude::Rate(raw as f64 / 100.0)
        } else {
            StatMagnitude::Count(raw)
        };
        Self { kind, magnitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_like_set() {
        let rate_like: Vec<StatKind> = [
            "ATK", "DEF", "HP", "HP_REC", "CRIT_DMG", "GOLD_GAIN", "EXP_GAIN", "DMG_REDU",
            "CRIT_CH", "ATK_SPD", "MOV_SPD",
        ]
        .iter()
        .filter_map(|key| StatKind::parse(key))
        .filter(|kind| kind.is_rate_like())
        .collect();

        assert_eq!(
            rate_like,
            vec![
                StatKind::DamageReduction,
                StatKind::CriticalChance,
                StatKind::AttackSpeed,
                StatKind::MoveSpeed,
            ]
        );
    }

    #[test]
    fn test_key_roundtrip() {
        for key in ["ATK", "HP_REC", "MOV_SPD"] {
            assert_eq!(StatKind::parse(key).map(|k| k.key()), Some(key));
        }
        assert_eq!(StatKind::parse("LUCK"), None);
    }

    #[test]
    fn test_rate_scaling() {
        let reward = RewardStat::from_raw(StatKind::DamageReduction, 550);
        assert_eq!(reward.magnitude, StatMagnitude::Rate(5.5));
        assert_eq!(reward.magnitude.as_f64(), 5.5);
    }

    #[test]
    fn test_count_is_unscaled() {
        let reward = RewardStat::from_raw(StatKind::Health, 550);
        assert_eq!(reward.magnitude, StatMagnitude::Count(550));
        assert_eq!(reward.magnitude.as_f64(), 550.0);
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn any_stat() -> impl Strategy<Value = StatKind> {
        prop_oneof![
            Just(StatKind::Attack),
            Just(StatKind::Defense),
            Just(StatKind::Health),
            Just(StatKind::GoldGain),
            Just(StatKind::DamageReduction),
            Just(StatKind::CriticalChance),
            Just(StatKind::AttackSpeed),
            Just(StatKind::MoveSpeed),
        ]
    }

    proptest! {
        /// Property: the scaling rule depends only on the stat kind
        #[test]
        fn test_scaling_follows_kind(kind in any_stat(), raw in -100_000i64..100_000) {
            let reward = RewardStat::from_raw(kind, raw);
            match reward.magnitude {
                StatMagnitude::Rate(value) => {
                    prop_assert!(kind.is_rate_like());
                    prop_assert!((value * 100.0 - raw as f64).abs() < 1e-6);
                }
                StatMagnitude::Count(value) => {
                    prop_assert!(!kind.is_rate_like());
                    prop_assert_eq!(value, raw);
                }
            }
        }
    }
}
