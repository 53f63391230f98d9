//! Wire records returned by the Monster Search Service.
//!
//! Records are decoded leniently: absent or `null` collections become empty,
//! absent text becomes `""`, and integer columns accept numeric strings. A
//! half-populated monster still renders.

use serde::{Deserialize, Deserializer, Serialize};

/// One statted creature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Monster {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default = "default_challenge_rating", deserialize_with = "challenge_rating")]
    pub challenge_rating: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub alignment: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub size: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sub_category: String,

    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub strength: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub dexterity: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub constitution: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub intelligence: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub wisdom: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub charisma: i32,

    #[serde(default = "one", deserialize_with = "int_or_one")]
    pub hit_points: i32,
    #[serde(default = "one", deserialize_with = "int_or_one")]
    pub hit_dice_count: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub hit_dice_size: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub armor_class: i32,
    #[serde(default = "ten", deserialize_with = "int_or_ten")]
    pub passive_perception: i32,

    #[serde(default, deserialize_with = "null_as_default")]
    pub saving_throws: Vec<SavingThrow>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub senses: Vec<Sense>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub skills: Vec<Skill>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub speeds: Vec<Speed>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition_immunities: Vec<ConditionImmunity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_immunities: Vec<DamageImmunity>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_resistances: Vec<DamageResistance>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_vulnerabilities: Vec<DamageVulnerability>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub languages: Vec<Language>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub actions: Vec<Action>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub special_abilities: Vec<SpecialAbility>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub spells: Vec<Spell>,
}

impl Monster {
    /// A bare monster carrying the service's column defaults.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            source: String::new(),
            challenge_rating: default_challenge_rating(),
            alignment: String::new(),
            size: String::new(),
            category: String::new(),
            sub_category: String::new(),
            strength: 10,
            dexterity: 10,
            constitution: 10,
            intelligence: 10,
            wisdom: 10,
            charisma: 10,
            hit_points: 1,
            hit_dice_count: 1,
            hit_dice_size: 10,
            armor_class: 10,
            passive_perception: 10,
            saving_throws: Vec::new(),
            senses: Vec::new(),
            skills: Vec::new(),
            speeds: Vec::new(),
            condition_immunities: Vec::new(),
            damage_immunities: Vec::new(),
            damage_resistances: Vec::new(),
            damage_vulnerabilities: Vec::new(),
            languages: Vec::new(),
            actions: Vec::new(),
            special_abilities: Vec::new(),
            spells: Vec::new(),
        }
    }
}

/// Something a monster can do on its turn (or outside it).
///
/// The four flags are independent; the service does not keep them exclusive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub reaction: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub bonus_action: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub legendary_action: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lair_action: bool,
}

impl Action {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
            reaction: false,
            bonus_action: false,
            legendary_action: false,
            lair_action: false,
        }
    }

    pub fn reaction(mut self) -> Self {
        self.reaction = true;
        self
    }

    pub fn bonus_action(mut self) -> Self {
        self.bonus_action = true;
        self
    }

    pub fn legendary(mut self) -> Self {
        self.legendary_action = true;
        self
    }

    pub fn lair(mut self) -> Self {
        self.lair_action = true;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAbility {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
}

impl SpecialAbility {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: description.into(),
        }
    }
}

/// A spell a monster can cast, or a spell search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Spell {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub level: i32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub school: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub attack_save: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_effect: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub casting_time: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub range_area: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub concentration: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub ritual: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub verbal: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub somatic: bool,
    /// Material component detail. `None` when the service sends `null`,
    /// `false` or an empty string.
    #[serde(default, deserialize_with = "material")]
    pub material: Option<String>,
}

impl Spell {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            source: String::new(),
            level: 0,
            school: None,
            attack_save: String::new(),
            damage_effect: String::new(),
            description: String::new(),
            casting_time: String::new(),
            duration: String::new(),
            range_area: String::new(),
            concentration: false,
            ritual: false,
            verbal: false,
            somatic: false,
            material: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavingThrow {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub value: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub value: i32,
}

/// A sense such as darkvision; distance is in feet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sense {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Speed {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "int_or_zero")]
    pub distance: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionImmunity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub condition_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageImmunity {
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageResistance {
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DamageVulnerability {
    #[serde(default, deserialize_with = "null_as_default")]
    pub damage_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
}

// ============================================================================
// Lenient field decoding
// ============================================================================

fn ten() -> i32 {
    10
}

fn one() -> i32 {
    1
}

fn default_challenge_rating() -> String {
    "0".to_string()
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Any JSON scalar the service has been seen to put in an integer column.
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseNumber {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseNumber {
    fn as_i32(&self) -> Option<i32> {
        match self {
            LooseNumber::Int(n) => i32::try_from(*n).ok(),
            LooseNumber::Float(f) if f.is_finite() => Some(f.trunc() as i32),
            LooseNumber::Float(_) => None,
            LooseNumber::Text(s) => s.trim().trim_start_matches('+').parse().ok(),
        }
    }
}

fn int_or<'de, D>(deserializer: D, fallback: i32) -> Result<i32, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(value.and_then(|n| n.as_i32()).unwrap_or(fallback))
}

fn int_or_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    int_or(deserializer, 0)
}

fn int_or_one<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    int_or(deserializer, 1)
}

fn int_or_ten<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    int_or(deserializer, 10)
}

fn challenge_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Option::<LooseNumber>::deserialize(deserializer)?;
    Ok(match value {
        None => default_challenge_rating(),
        Some(LooseNumber::Int(n)) => n.to_string(),
        Some(LooseNumber::Text(s)) => s,
        Some(LooseNumber::Float(f)) => fractional_rating(f),
    })
}

fn fractional_rating(value: f64) -> String {
    match value {
        v if v == 0.125 => "1/8".to_string(),
        v if v == 0.25 => "1/4".to_string(),
        v if v == 0.5 => "1/2".to_string(),
        v if v.fract() == 0.0 => format!("{}", v as i64),
        v => v.to_string(),
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum MaterialField {
    Text(String),
    Flag(#[allow(dead_code)] bool),
}

fn material<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<MaterialField>::deserialize(deserializer)?;
    Ok(match value {
        // Whitespace-only text carries no description, so it counts as absent
        Some(MaterialField::Text(detail)) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    })
}
