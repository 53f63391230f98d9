//! Testing utilities for the bestiary viewer.
//!
//! This module provides tools for tests and offline demos:
//! - `MockSearch`, an in-memory stand-in for the Monster Search Service
//! - Sample monsters covering every stat-block section

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use bestiary_api::{
    Action, ConditionImmunity, DamageImmunity, DamageResistance, Error as ApiError, Language,
    Monster, SavingThrow, SearchQuery, Sense, Skill, SpecialAbility, Speed, Spell,
};

use crate::search::MonsterSearch;

/// An in-memory Monster Search Service.
///
/// Searches filter the catalogue by case-insensitive name substring and page
/// through it the way the real service does. Failures can be queued to
/// exercise error paths.
pub struct MockSearch {
    monsters: Vec<Monster>,
    spells: Vec<Spell>,
    /// Errors to return, in order, before answering normally again.
    failures: Mutex<VecDeque<ApiError>>,
    /// Every monster query received, in order.
    requests: Mutex<Vec<SearchQuery>>,
}

impl MockSearch {
    /// Create a mock serving `monsters`.
    pub fn new(monsters: Vec<Monster>) -> Self {
        Self {
            monsters,
            spells: Vec::new(),
            failures: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Also serve `spells` from the spell search.
    pub fn with_spells(mut self, spells: Vec<Spell>) -> Self {
        self.spells = spells;
        self
    }

    /// Make the next call fail with `error`.
    pub fn fail_next(&self, error: ApiError) {
        lock(&self.failures).push_back(error);
    }

    /// Queries received so far.
    pub fn requests(&self) -> Vec<SearchQuery> {
        lock(&self.requests).clone()
    }

    fn take_failure(&self) -> Option<ApiError> {
        lock(&self.failures).pop_front()
    }
}

#[async_trait]
impl MonsterSearch for MockSearch {
    async fn search_monsters(&self, query: &SearchQuery) -> Result<Vec<Monster>, ApiError> {
        lock(&self.requests).push(query.clone());
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(page(&self.monsters, query, |m| &m.name))
    }

    async fn get_monster(&self, id: i64) -> Result<Monster, ApiError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        self.monsters
            .iter()
            .find(|m| m.id == Some(id))
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    async fn search_spells(&self, query: &SearchQuery) -> Result<Vec<Spell>, ApiError> {
        if let Some(error) = self.take_failure() {
            return Err(error);
        }
        Ok(page(&self.spells, query, |s| &s.name))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Filter and page the way the service does: page defaults to 1, page size
/// to 10.
fn page<T: Clone>(items: &[T], query: &SearchQuery, name: impl Fn(&T) -> &String) -> Vec<T> {
    let needle = query.name.to_lowercase();
    let page = query.page.unwrap_or(1).max(1) as usize;
    let per_page = query.page_count.unwrap_or(10) as usize;

    items
        .iter()
        .filter(|item| name(item).to_lowercase().contains(&needle))
        .skip((page - 1) * per_page)
        .take(per_page)
        .cloned()
        .collect()
}

// ============================================================================
// Sample monsters
// ============================================================================

/// A goblin: small, few lists, one bonus action.
pub fn sample_goblin() -> Monster {
    let mut goblin = Monster::new("Goblin");
    goblin.id = Some(1);
    goblin.source = "Basic Rules".to_string();
    goblin.challenge_rating = "1/4".to_string();
    goblin.alignment = "neutral evil".to_string();
    goblin.size = "small".to_string();
    goblin.category = "humanoid".to_string();
    goblin.sub_category = "goblinoid".to_string();
    goblin.strength = 8;
    goblin.dexterity = 14;
    goblin.constitution = 10;
    goblin.intelligence = 10;
    goblin.wisdom = 8;
    goblin.charisma = 8;
    goblin.hit_points = 7;
    goblin.hit_dice_count = 2;
    goblin.hit_dice_size = 6;
    goblin.armor_class = 15;
    goblin.passive_perception = 9;
    goblin.senses = vec![Sense {
        name: "darkvision".to_string(),
        distance: 60,
    }];
    goblin.skills = vec![Skill {
        name: "Stealth".to_string(),
        value: 6,
    }];
    goblin.speeds = vec![Speed {
        name: "walk".to_string(),
        distance: 30,
    }];
    goblin.languages = vec![
        Language {
            name: "Common".to_string(),
        },
        Language {
            name: "Goblin".to_string(),
        },
    ];
    goblin.actions = vec![
        Action::new(
            "Scimitar",
            "Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 5 (1d6 + 2) slashing damage.",
        ),
        Action::new(
            "Nimble Escape",
            "The goblin can take the Disengage or Hide action.",
        )
        .bonus_action(),
    ];
    goblin
}

/// An ancient dragon: every list populated, legendary and lair actions.
pub fn sample_dragon() -> Monster {
    let mut dragon = Monster::new("Ancient Red Dragon");
    dragon.id = Some(2);
    dragon.source = "Monster Manual".to_string();
    dragon.challenge_rating = "24".to_string();
    dragon.alignment = "chaotic evil".to_string();
    dragon.size = "gargantuan".to_string();
    dragon.category = "dragon".to_string();
    dragon.strength = 30;
    dragon.dexterity = 10;
    dragon.constitution = 29;
    dragon.intelligence = 18;
    dragon.wisdom = 15;
    dragon.charisma = 23;
    dragon.hit_points = 546;
    dragon.hit_dice_count = 28;
    dragon.hit_dice_size = 20;
    dragon.armor_class = 22;
    dragon.passive_perception = 26;
    dragon.saving_throws = ["DEX 7", "CON 16", "WIS 9", "CHA 13"]
        .iter()
        .filter_map(|s| s.split_once(' '))
        .map(|(name, value)| SavingThrow {
            name: name.to_string(),
            value: value.parse().unwrap_or_default(),
        })
        .collect();
    dragon.senses = vec![
        Sense {
            name: "blindsight".to_string(),
            distance: 60,
        },
        Sense {
            name: "darkvision".to_string(),
            distance: 120,
        },
    ];
    dragon.skills = vec![
        Skill {
            name: "Perception".to_string(),
            value: 16,
        },
        Skill {
            name: "Stealth".to_string(),
            value: 7,
        },
    ];
    dragon.speeds = vec![
        Speed {
            name: "walk".to_string(),
            distance: 40,
        },
        Speed {
            name: "climb".to_string(),
            distance: 40,
        },
        Speed {
            name: "fly".to_string(),
            distance: 80,
        },
    ];
    dragon.damage_immunities = vec![DamageImmunity {
        damage_type: "fire".to_string(),
    }];
    dragon.languages = vec![
        Language {
            name: "Common".to_string(),
        },
        Language {
            name: "Draconic".to_string(),
        },
    ];
    dragon.special_abilities = vec![SpecialAbility::new(
        "Legendary Resistance (3/Day)",
        "If the dragon fails a saving throw, it can choose to succeed instead.",
    )];
    dragon.actions = vec![
        Action::new(
            "Multiattack",
            "The dragon can use its Frightful Presence. It then makes three attacks: one with its bite and two with its claws.",
        ),
        Action::new(
            "Fire Breath (Recharge 5-6)",
            "The dragon exhales fire in a 90-foot cone.\n\nEach creature in that area must make a DC 24 Dexterity saving throw.",
        ),
        Action::new("Tail Attack", "The dragon makes a tail attack.").legendary(),
        Action::new(
            "Magma Eruption",
            "Magma erupts from a point on the ground the dragon can see within 120 feet of it.",
        )
        .lair(),
    ];
    dragon
}

/// A lich: spellcaster with resistances, immunities and a reaction.
pub fn sample_lich() -> Monster {
    let mut lich = Monster::new("Lich");
    lich.id = Some(3);
    lich.source = "Monster Manual".to_string();
    lich.challenge_rating = "21".to_string();
    lich.alignment = "any evil".to_string();
    lich.size = "medium".to_string();
    lich.category = "undead".to_string();
    lich.strength = 11;
    lich.dexterity = 16;
    lich.constitution = 16;
    lich.intelligence = 20;
    lich.wisdom = 14;
    lich.charisma = 16;
    lich.hit_points = 135;
    lich.hit_dice_count = 18;
    lich.hit_dice_size = 8;
    lich.armor_class = 17;
    lich.passive_perception = 19;
    lich.damage_resistances = vec![DamageResistance {
        damage_type: "cold".to_string(),
    }];
    lich.damage_immunities = vec![DamageImmunity {
        damage_type: "poison".to_string(),
    }];
    lich.condition_immunities = ["charmed", "exhaustion", "frightened"]
        .iter()
        .map(|c| ConditionImmunity {
            condition_type: c.to_string(),
        })
        .collect();
    lich.actions = vec![
        Action::new(
            "Paralyzing Touch",
            "Melee Spell Attack: +12 to hit, reach 5 ft., one creature.",
        ),
        Action::new(
            "Counter Ward",
            "When hit by an attack, the lich gains +2 AC until the start of its next turn.",
        )
        .reaction(),
    ];
    lich.spells = vec![sample_fireball()];
    lich
}

pub fn sample_fireball() -> Spell {
    let mut spell = Spell::new("Fireball");
    spell.id = Some(1);
    spell.source = "Player's Handbook".to_string();
    spell.level = 3;
    spell.school = Some("evocation".to_string());
    spell.attack_save = "DEX Save".to_string();
    spell.damage_effect = "Fire".to_string();
    spell.description = "A bright streak flashes from your pointing finger.\nEach creature in a 20-foot-radius sphere must make a Dexterity saving throw.".to_string();
    spell.casting_time = "1 Action".to_string();
    spell.duration = "Instantaneous".to_string();
    spell.range_area = "150 ft. (20 ft.)".to_string();
    spell.verbal = true;
    spell.somatic = true;
    spell.material = Some("a tiny ball of bat guano and sulfur".to_string());
    spell
}

/// The three sample monsters.
pub fn sample_bestiary() -> Vec<Monster> {
    vec![sample_goblin(), sample_dragon(), sample_lich()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_filters_case_insensitively() {
        let mock = MockSearch::new(sample_bestiary());
        let hits = mock
            .search_monsters(&SearchQuery::by_name("DRAGON"))
            .await
            .unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Ancient Red Dragon");
    }

    #[tokio::test]
    async fn test_mock_empty_name_matches_everything() {
        let mock = MockSearch::new(sample_bestiary());
        let hits = mock.search_monsters(&SearchQuery::by_name("")).await.unwrap();
        assert_eq!(hits.len(), 3);
    }

    #[tokio::test]
    async fn test_mock_pages() {
        let mock = MockSearch::new(sample_bestiary());
        let query = SearchQuery::by_name("").with_page(2).with_page_count(2);
        let hits = mock.search_monsters(&query).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Lich");
    }

    #[tokio::test]
    async fn test_mock_queued_failure_then_recovers() {
        let mock = MockSearch::new(sample_bestiary());
        mock.fail_next(ApiError::Network("down".to_string()));

        assert!(mock.search_monsters(&SearchQuery::by_name("")).await.is_err());
        assert!(mock.search_monsters(&SearchQuery::by_name("")).await.is_ok());
        assert_eq!(mock.requests().len(), 2);
    }

    #[tokio::test]
    async fn test_mock_get_monster() {
        let mock = MockSearch::new(sample_bestiary());
        assert_eq!(mock.get_monster(3).await.unwrap().name, "Lich");
        assert!(matches!(mock.get_monster(99).await, Err(ApiError::NotFound)));
    }
}
