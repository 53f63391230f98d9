//! Sub-renderers for the repeating parts of a stat block.

use bestiary_api::{Action, SpecialAbility, Spell};

use crate::format::{paragraphs, yes_no};
use crate::render::{Card, Node};

const DEFAULT_SEPARATOR: &str = ", ";

/// A titled, delimiter-joined list of short strings.
///
/// Renders nothing at all, not even the title, when the list is empty.
#[derive(Debug, Clone)]
pub struct LabeledList {
    separator: String,
}

impl Default for LabeledList {
    fn default() -> Self {
        Self {
            separator: DEFAULT_SEPARATOR.to_string(),
        }
    }
}

impl LabeledList {
    pub fn with_separator(separator: impl Into<String>) -> Self {
        Self {
            separator: separator.into(),
        }
    }

    pub fn render<I, S>(&self, title: &str, items: I) -> Vec<Node>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let items: Vec<String> = items.into_iter().map(Into::into).collect();
        if items.is_empty() {
            return Vec::new();
        }

        vec![
            Node::Heading(title.to_string()),
            Node::Line(items.join(&self.separator)),
        ]
    }
}

pub fn ability_card(ability: &SpecialAbility) -> Card {
    described_card(&ability.name, &ability.description)
}

pub fn action_card(action: &Action) -> Card {
    described_card(&action.name, &action.description)
}

fn described_card(name: &str, description: &str) -> Card {
    let mut card = Card::new();
    card.push(Node::Subheading(name.to_string()));
    card.extend(paragraphs(description).into_iter().map(Node::Paragraph));
    card
}

/// A spell's full card: header, attack line, description, casting details,
/// flags and components.
pub fn spell_card(spell: &Spell) -> Card {
    let mut card = Card::new();

    card.push(Node::Subheading(spell.name.clone()));
    card.push(Node::Line(format!(
        "{} | Level {}",
        spell.source, spell.level
    )));
    card.push(Node::Line(format!(
        "Attack/Save {} | Damage/Effect {}",
        spell.attack_save, spell.damage_effect
    )));
    card.extend(paragraphs(&spell.description).into_iter().map(Node::Paragraph));
    card.push(Node::Line(format!(
        "Casting Time {} | Duration {} | Range/Area {}",
        spell.casting_time, spell.duration, spell.range_area
    )));
    card.push(Node::Line(format!(
        "Concentration - {} | Ritual - {}",
        yes_no(spell.concentration),
        yes_no(spell.ritual)
    )));
    card.push(Node::Line(components_line(spell)));

    card
}

/// A spell component the caster must supply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Component {
    Verbal,
    Somatic,
    Material(String),
}

impl Component {
    pub fn label(&self) -> String {
        match self {
            Component::Verbal => "verbal".to_string(),
            Component::Somatic => "somatic".to_string(),
            Component::Material(detail) => format!("material ({detail})"),
        }
    }
}

/// The components a spell actually requires, in V/S/M order.
pub fn components(spell: &Spell) -> Vec<Component> {
    let mut set = Vec::with_capacity(3);
    if spell.verbal {
        set.push(Component::Verbal);
    }
    if spell.somatic {
        set.push(Component::Somatic);
    }
    if let Some(detail) = &spell.material {
        set.push(Component::Material(detail.clone()));
    }
    set
}

/// `"Components: verbal material (a feather)"`. Missing components leave
/// no gap.
pub fn components_line(spell: &Spell) -> String {
    let labels: Vec<String> = components(spell).iter().map(Component::label).collect();
    if labels.is_empty() {
        "Components:".to_string()
    } else {
        format!("Components: {}", labels.join(" "))
    }
}
