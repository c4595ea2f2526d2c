//! Characteristic categories and the rules that turn points into values.
//!
//! A species spends points across [`Characteristic`] categories. Each
//! category has a [`CharacteristicRule`]: what one point costs against the
//! budget, and how raw points become the derived gameplay value.

use serde::{Deserialize, Serialize};

/// A category of animal capability purchased with characteristic points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Characteristic {
    /// Energy capacity per unit radius.
    MaximumEnergy,
    /// Food consumed per tick per unit radius.
    EatingSpeed,
    /// Damage inflicted per unit radius.
    AttackDamage,
    /// Damage absorbed per unit radius.
    DefendDamage,
    /// Top speed in pixels per tick.
    MaximumSpeed,
    /// Percent odds of being invisible to other organisms.
    Camouflage,
    /// Vision radius in pixels.
    Eyesight,
}

impl Characteristic {
    /// Every category, in budget-tally order.
    pub const ALL: [Self; 7] = [
        Self::MaximumEnergy,
        Self::EatingSpeed,
        Self::AttackDamage,
        Self::DefendDamage,
        Self::MaximumSpeed,
        Self::Camouflage,
        Self::Eyesight,
    ];
}

impl core::fmt::Display for Characteristic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::MaximumEnergy => write!(f, "maximum_energy"),
            Self::EatingSpeed => write!(f, "eating_speed"),
            Self::AttackDamage => write!(f, "attack_damage"),
            Self::DefendDamage => write!(f, "defend_damage"),
            Self::MaximumSpeed => write!(f, "maximum_speed"),
            Self::Camouflage => write!(f, "camouflage"),
            Self::Eyesight => write!(f, "eyesight"),
        }
    }
}

/// How raw points in one category are costed and converted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacteristicRule {
    /// Value granted with zero points.
    pub base: f64,
    /// Value added per raw point.
    pub per_point: f64,
    /// Budget cost of one raw point.
    pub cost_per_point: u32,
    /// Upper bound on the derived value; points past it are wasted.
    #[serde(default)]
    pub cap: Option<f64>,
}

impl CharacteristicRule {
    /// Rule with no cap.
    pub const fn uncapped(base: f64, per_point: f64) -> Self {
        Self {
            base,
            per_point,
            cost_per_point: 1,
            cap: None,
        }
    }

    /// Rule whose derived value stops at `cap`.
    pub const fn capped(base: f64, per_point: f64, cap: f64) -> Self {
        Self {
            base,
            per_point,
            cost_per_point: 1,
            cap: Some(cap),
        }
    }

    /// Derived value for `raw` points, clamped to the cap.
    pub fn derive(&self, raw: u32) -> f64 {
        let value = f64::from(raw).mul_add(self.per_point, self.base);
        self.cap.map_or(value, |cap| value.min(cap))
    }

    /// Points that still raise the derived value; anything above is wasted.
    ///
    /// Returns `None` for uncapped rules.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn useful_points(&self) -> Option<u32> {
        let cap = self.cap?;
        if self.per_point <= 0.0 {
            return Some(0);
        }
        let headroom = ((cap - self.base) / self.per_point).ceil();
        Some(if headroom <= 0.0 { 0 } else { headroom as u32 })
    }
}

/// One [`CharacteristicRule`] per category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CharacteristicRules {
    /// Rule for [`Characteristic::MaximumEnergy`].
    pub maximum_energy: CharacteristicRule,
    /// Rule for [`Characteristic::EatingSpeed`].
    pub eating_speed: CharacteristicRule,
    /// Rule for [`Characteristic::AttackDamage`].
    pub attack_damage: CharacteristicRule,
    /// Rule for [`Characteristic::DefendDamage`].
    pub defend_damage: CharacteristicRule,
    /// Rule for [`Characteristic::MaximumSpeed`].
    pub maximum_speed: CharacteristicRule,
    /// Rule for [`Characteristic::Camouflage`].
    pub camouflage: CharacteristicRule,
    /// Rule for [`Characteristic::Eyesight`].
    pub eyesight: CharacteristicRule,
}

impl CharacteristicRules {
    /// The rule governing `characteristic`.
    pub const fn rule(&self, characteristic: Characteristic) -> &CharacteristicRule {
        match characteristic {
            Characteristic::MaximumEnergy => &self.maximum_energy,
            Characteristic::EatingSpeed => &self.eating_speed,
            Characteristic::AttackDamage => &self.attack_damage,
            Characteristic::DefendDamage => &self.defend_damage,
            Characteristic::MaximumSpeed => &self.maximum_speed,
            Characteristic::Camouflage => &self.camouflage,
            Characteristic::Eyesight => &self.eyesight,
        }
    }
}

impl Default for CharacteristicRules {
    fn default() -> Self {
        Self {
            maximum_energy: CharacteristicRule::uncapped(50.0, 2.5),
            eating_speed: CharacteristicRule::uncapped(1.0, 0.2),
            attack_damage: CharacteristicRule::uncapped(1.0, 0.2),
            defend_damage: CharacteristicRule::uncapped(1.0, 0.2),
            maximum_speed: CharacteristicRule::capped(2.0, 0.4, 18.0),
            camouflage: CharacteristicRule::capped(10.0, 1.0, 90.0),
            eyesight: CharacteristicRule::capped(5.0, 0.5, 25.0),
        }
    }
}
