//! Sorting a monster's flat action list into display buckets.
//!
//! The service marks actions with four independent flags. Buckets are
//! predicates over those flags rather than a single tag: an action flagged
//! as both a reaction and a bonus action shows up under both headings.

use bestiary_api::Action;

/// One of the five action sections on a stat block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionBucket {
    /// No flags set.
    Ordinary,
    Reaction,
    Bonus,
    Legendary,
    Lair,
}

impl ActionBucket {
    /// Display order on the card.
    pub const ALL: [ActionBucket; 5] = [
        ActionBucket::Ordinary,
        ActionBucket::Reaction,
        ActionBucket::Bonus,
        ActionBucket::Legendary,
        ActionBucket::Lair,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            ActionBucket::Ordinary => "Actions",
            ActionBucket::Reaction => "Reactions",
            ActionBucket::Bonus => "Bonus Actions",
            ActionBucket::Legendary => "Legendary Actions",
            ActionBucket::Lair => "Lair Actions",
        }
    }

    /// Whether `action` belongs in this bucket.
    pub fn contains(&self, action: &Action) -> bool {
        match self {
            ActionBucket::Ordinary => {
                !action.reaction
                    && !action.bonus_action
                    && !action.legendary_action
                    && !action.lair_action
            }
            ActionBucket::Reaction => action.reaction,
            ActionBucket::Bonus => action.bonus_action,
            ActionBucket::Legendary => action.legendary_action,
            ActionBucket::Lair => action.lair_action,
        }
    }
}

/// Every bucket `action` belongs to, in display order. Never empty.
pub fn buckets_of(action: &Action) -> Vec<ActionBucket> {
    ActionBucket::ALL
        .into_iter()
        .filter(|bucket| bucket.contains(action))
        .collect()
}

/// The actions in `bucket`, keeping their original order.
pub fn in_bucket(actions: &[Action], bucket: ActionBucket) -> Vec<&Action> {
    actions.iter().filter(|a| bucket.contains(a)).collect()
}

/// All five buckets in display order, each with its actions. Empty buckets
/// are included so callers can decide how to skip them.
pub fn classify(actions: &[Action]) -> Vec<(ActionBucket, Vec<&Action>)> {
    ActionBucket::ALL
        .into_iter()
        .map(|bucket| (bucket, in_bucket(actions, bucket)))
        .collect()
}
