//! Derived text shown on a stat block.

/// Constitution bonus added to the hit dice, per die.
///
/// Both 10 and 11 count as the zero baseline and produce no bonus clause at
/// all; everything else uses floor((con - 10) / 2).
pub fn constitution_bonus(constitution: i32) -> Option<i32> {
    match constitution {
        10 | 11 => None,
        con => Some((con - 10).div_euclid(2)),
    }
}

/// Format the hit-dice expression shown beside the hit point total.
///
/// `(2d6)` when constitution is 10 or 11, otherwise `(2d6 + <bonus>)` with
/// the per-die bonus multiplied by the dice count. A negative bonus keeps the
/// `" + "` joiner: `(2d8 + -2)`.
pub fn hit_dice_string(count: i32, size: i32, constitution: i32) -> String {
    match constitution_bonus(constitution) {
        Some(per_die) => format!("({count}d{size} + {})", per_die * count),
        None => format!("({count}d{size})"),
    }
}

/// `+3`, `0`, `-2`.
pub fn signed_modifier(value: i32) -> String {
    if value > 0 {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

/// Split a free-text description into paragraphs on `\n`.
///
/// Order is kept and blank lines survive as empty paragraphs.
pub fn paragraphs(description: &str) -> Vec<String> {
    description.split('\n').map(str::to_string).collect()
}

pub fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baseline_constitution_has_no_bonus() {
        assert_eq!(hit_dice_string(2, 6, 10), "(2d6)");
        assert_eq!(hit_dice_string(2, 6, 11), "(2d6)");
    }

    #[test]
    fn test_positive_bonus() {
        assert_eq!(hit_dice_string(3, 8, 12), "(3d8 + 3)");
        assert_eq!(hit_dice_string(19, 12, 23), "(19d12 + 114)");
    }

    #[test]
    fn test_negative_bonus_floors() {
        assert_eq!(constitution_bonus(8), Some(-1));
        assert_eq!(constitution_bonus(9), Some(-1));
        assert_eq!(constitution_bonus(7), Some(-2));
        assert_eq!(constitution_bonus(1), Some(-5));
        assert_eq!(hit_dice_string(2, 8, 8), "(2d8 + -2)");
        assert_eq!(hit_dice_string(4, 6, 9), "(4d6 + -4)");
    }

    #[test]
    fn test_odd_positive_rounds_down() {
        assert_eq!(constitution_bonus(13), Some(1));
        assert_eq!(constitution_bonus(15), Some(2));
    }

    #[test]
    fn test_signed_modifier() {
        assert_eq!(signed_modifier(3), "+3");
        assert_eq!(signed_modifier(0), "0");
        assert_eq!(signed_modifier(-2), "-2");
    }

    #[test]
    fn test_paragraphs_keep_blank_lines() {
        assert_eq!(paragraphs("A\n\nB"), vec!["A", "", "B"]);
        assert_eq!(paragraphs("single"), vec!["single"]);
        assert_eq!(paragraphs(""), vec![""]);
        assert_eq!(paragraphs("trailing\n"), vec!["trailing", ""]);
    }
}
