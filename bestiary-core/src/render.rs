//! Monster stat-block rendering.
//!
//! Rendering produces a small tree of [`Node`]s rather than terminal text, so
//! the same output drives the TUI widget, headless mode and the tests.

use std::fmt;

use bestiary_api::Monster;
use serde::Serialize;

use crate::actions::{in_bucket, ActionBucket};
use crate::cards::{ability_card, action_card, spell_card, LabeledList};
use crate::format::{hit_dice_string, signed_modifier};

/// One display element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Node {
    /// Card title (the monster's name).
    Title(String),
    /// Section heading such as "Saving Throws" or "Legendary Actions".
    Heading(String),
    /// Name line of a sub-card.
    Subheading(String),
    /// A single formatted stat line.
    Line(String),
    /// One paragraph of a free-text description. May be empty.
    Paragraph(String),
    /// A nested card.
    Card(Card),
}

/// An ordered group of nodes, rendered as one bordered block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    pub nodes: Vec<Node>,
}

impl Card {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) {
        self.nodes.push(node);
    }

    pub fn extend(&mut self, nodes: impl IntoIterator<Item = Node>) {
        self.nodes.extend(nodes);
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The card's title, if it has one.
    pub fn title(&self) -> Option<&str> {
        self.nodes.iter().find_map(|node| match node {
            Node::Title(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Section headings at the top level of this card, in order.
    pub fn headings(&self) -> Vec<&str> {
        self.nodes
            .iter()
            .filter_map(|node| match node {
                Node::Heading(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Nested cards directly under `heading`, up to the next heading.
    pub fn section(&self, heading: &str) -> Vec<&Card> {
        self.nodes
            .iter()
            .skip_while(|node| !matches!(node, Node::Heading(h) if h == heading))
            .skip(1)
            .take_while(|node| !matches!(node, Node::Heading(_)))
            .filter_map(|node| match node {
                Node::Card(card) => Some(card),
                _ => None,
            })
            .collect()
    }

    /// Plain-text lines, nested cards indented by two spaces per level.
    pub fn lines(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.write_lines(0, &mut out);
        out
    }

    fn write_lines(&self, depth: usize, out: &mut Vec<String>) {
        let indent = "  ".repeat(depth);

        for node in &self.nodes {
            let text = match node {
                Node::Title(text) => format!("# {text}"),
                Node::Heading(text) => format!("## {text}"),
                Node::Subheading(text) => format!("### {text}"),
                Node::Line(text) | Node::Paragraph(text) => text.clone(),
                Node::Card(card) => {
                    card.write_lines(depth + 1, out);
                    continue;
                }
            };

            // Blank paragraphs stay blank rather than carrying indentation.
            if text.is_empty() {
                out.push(text);
            } else {
                out.push(format!("{indent}{text}"));
            }
        }
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.lines().join("\n"))
    }
}

/// Render one monster as a full stat block.
pub fn render_monster(monster: &Monster) -> Card {
    let mut card = Card::new();

    card.push(Node::Title(monster.name.clone()));
    card.push(Node::Line(format!(
        "{} | Challenge Rating: {}",
        monster.source, monster.challenge_rating
    )));
    card.push(Node::Line(type_line(monster)));
    card.push(Node::Line(format!(
        "{} hitpoints {} | {} AC",
        monster.hit_points,
        hit_dice_string(
            monster.hit_dice_count,
            monster.hit_dice_size,
            monster.constitution
        ),
        monster.armor_class
    )));
    card.push(Node::Line(format!(
        "{} STR | {} DEX | {} CON",
        monster.strength, monster.dexterity, monster.constitution
    )));
    card.push(Node::Line(format!(
        "{} INT | {} WIS | {} CHA",
        monster.intelligence, monster.wisdom, monster.charisma
    )));

    let lists = LabeledList::default();

    card.extend(lists.render(
        "Saving Throws",
        monster
            .saving_throws
            .iter()
            .map(|s| format!("{} {}", s.name, signed_modifier(s.value))),
    ));
    card.extend(lists.render(
        "Senses",
        monster
            .senses
            .iter()
            .map(|s| format!("{} {}ft.", s.name, s.distance)),
    ));
    card.push(Node::Line(format!(
        "Passive Perception {}",
        monster.passive_perception
    )));
    card.extend(lists.render(
        "Skills",
        monster
            .skills
            .iter()
            .map(|s| format!("{} {}", s.name, signed_modifier(s.value))),
    ));

    let speeds: Vec<String> = monster
        .speeds
        .iter()
        .map(|s| format!("{} {}", s.name, s.distance))
        .collect();
    card.push(Node::Line(format!("Speed: {}", speeds.join(" | "))));

    card.extend(lists.render(
        "Condition Immunities",
        monster
            .condition_immunities
            .iter()
            .map(|c| c.condition_type.clone()),
    ));
    card.extend(lists.render(
        "Damage Immunities",
        monster.damage_immunities.iter().map(|d| d.damage_type.clone()),
    ));
    card.extend(lists.render(
        "Damage Resistances",
        monster.damage_resistances.iter().map(|d| d.damage_type.clone()),
    ));
    card.extend(lists.render(
        "Damage Vulnerabilities",
        monster
            .damage_vulnerabilities
            .iter()
            .map(|d| d.damage_type.clone()),
    ));
    card.extend(lists.render(
        "Languages",
        monster.languages.iter().map(|l| l.name.clone()),
    ));

    if !monster.special_abilities.is_empty() {
        card.push(Node::Heading("Special Abilities".to_string()));
        card.extend(
            monster
                .special_abilities
                .iter()
                .map(|a| Node::Card(ability_card(a))),
        );
    }

    for bucket in ActionBucket::ALL {
        let actions = in_bucket(&monster.actions, bucket);
        if actions.is_empty() {
            continue;
        }
        card.push(Node::Heading(bucket.title().to_string()));
        card.extend(actions.into_iter().map(|a| Node::Card(action_card(a))));
    }

    if !monster.spells.is_empty() {
        card.push(Node::Heading("Spells".to_string()));
        card.extend(monster.spells.iter().map(|s| Node::Card(spell_card(s))));
    }

    card
}

/// Render every monster in a result set, in order.
pub fn render_results(monsters: &[Monster]) -> Vec<Card> {
    monsters.iter().map(render_monster).collect()
}

/// `"<alignment> <size> <category>[ (<sub_category>)]"`
fn type_line(monster: &Monster) -> String {
    let mut line = format!("{} {} {}", monster.alignment, monster.size, monster.category);
    if !monster.sub_category.is_empty() {
        line.push_str(&format!(" ({})", monster.sub_category));
    }
    line
}
