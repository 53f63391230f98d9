//! Full stat-block rendering of the sample monsters.
//!
//! These pin the complete plain-text layout so any change to section order,
//! omission rules or line formatting shows up as a diff.

use bestiary_core::testing::{sample_dragon, sample_goblin, sample_lich};
use bestiary_core::{render_monster, Monster, Node};

#[test]
fn test_goblin_stat_block() {
    let text = render_monster(&sample_goblin()).to_string();

    let expected = "\
# Goblin
Basic Rules | Challenge Rating: 1/4
neutral evil small humanoid (goblinoid)
7 hitpoints (2d6) | 15 AC
8 STR | 14 DEX | 10 CON
10 INT | 8 WIS | 8 CHA
## Senses
darkvision 60ft.
Passive Perception 9
## Skills
Stealth +6
Speed: walk 30
## Languages
Common, Goblin
## Actions
  ### Scimitar
  Melee Weapon Attack: +4 to hit, reach 5 ft., one target. Hit: 5 (1d6 + 2) slashing damage.
## Bonus Actions
  ### Nimble Escape
  The goblin can take the Disengage or Hide action.";

    assert_eq!(text, expected);
}

#[test]
fn test_dragon_sections_in_order() {
    let card = render_monster(&sample_dragon());

    assert_eq!(
        card.headings(),
        vec![
            "Saving Throws",
            "Senses",
            "Skills",
            "Damage Immunities",
            "Languages",
            "Special Abilities",
            "Actions",
            "Legendary Actions",
            "Lair Actions",
        ]
    );

    let lines = card.lines();
    assert!(lines.contains(&"546 hitpoints (28d20 + 252) | 22 AC".to_string()));
    assert!(lines.contains(&"DEX +7, CON +16, WIS +9, CHA +13".to_string()));
    assert!(lines.contains(&"blindsight 60ft., darkvision 120ft.".to_string()));
    assert!(lines.contains(&"Speed: walk 40 | climb 40 | fly 80".to_string()));
}

#[test]
fn test_dragon_breath_keeps_blank_paragraph() {
    let card = render_monster(&sample_dragon());
    let actions = card.section("Actions");
    let breath = actions
        .iter()
        .find(|c| c.nodes.first() == Some(&Node::Subheading("Fire Breath (Recharge 5-6)".to_string())))
        .expect("breath weapon card");

    let paragraphs: Vec<&str> = breath
        .nodes
        .iter()
        .filter_map(|n| match n {
            Node::Paragraph(p) => Some(p.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(paragraphs.len(), 3);
    assert_eq!(paragraphs[1], "");
}

#[test]
fn test_lich_reaction_and_spells() {
    let card = render_monster(&sample_lich());

    assert_eq!(
        card.headings(),
        vec![
            "Condition Immunities",
            "Damage Immunities",
            "Damage Resistances",
            "Actions",
            "Reactions",
            "Spells",
        ]
    );
    assert_eq!(card.section("Reactions").len(), 1);

    let text = card.to_string();
    assert!(text.contains("135 hitpoints (18d8 + 54) | 17 AC"));
    assert!(text.contains("charmed, exhaustion, frightened"));
    assert!(text.contains("  Components: verbal somatic material (a tiny ball of bat guano and sulfur)"));
    assert!(text.contains("  Concentration - No | Ritual - No"));
}

#[test]
fn test_action_with_two_flags_appears_twice() {
    let mut monster = Monster::new("Duelist");
    monster.actions = vec![bestiary_core::model::Action::new("Riposte", "Strike back.")
        .reaction()
        .bonus_action()];

    let card = render_monster(&monster);
    assert_eq!(card.headings(), vec!["Reactions", "Bonus Actions"]);
    assert_eq!(card.section("Reactions").len(), 1);
    assert_eq!(card.section("Bonus Actions").len(), 1);
    assert!(card.section("Actions").is_empty());
}

#[test]
fn test_sparse_record_renders() {
    let monster: Monster = serde_json::from_str(r#"{"name": "Mystery", "actions": null}"#)
        .expect("lenient decode");
    let text = render_monster(&monster).to_string();

    assert!(text.starts_with("# Mystery"));
    assert!(text.contains("1 hitpoints (1d10) | 10 AC"));
    assert!(text.contains("Speed: "));
}

#[test]
fn test_cards_serialize_as_tagged_nodes() {
    let card = render_monster(&Monster::new("Blob"));
    let json = serde_json::to_value(&card).expect("serialize");
    assert_eq!(json["nodes"][0]["kind"], "title");
    assert_eq!(json["nodes"][0]["value"], "Blob");
}
