/// Steno keys in stroke order.
pub const STENO_KEY_ORDER: &[&str] = &[
    "#", "S-", "T-", "K-", "P-", "W-", "H-", "R-", "A-", "O-", "*", "-E", "-U", "-F", "-R", "-P",
    "-B", "-L", "-G", "-T", "-S", "-D", "-Z",
];

/// Keys whose presence makes the hyphen implicit in steno notation.
pub const IMPLICIT_HYPHEN_KEYS: &[&str] = &["A-", "O-", "5-", "0-", "-E", "-U", "*"];

/// Number-bar substitutions applied when `#` is part of a stroke.
pub const STENO_KEY_NUMBERS: &[(&str, &str)] = &[
    ("S-", "1-"),
    ("T-", "2-"),
    ("P-", "3-"),
    ("H-", "4-"),
    ("A-", "5-"),
    ("O-", "0-"),
    ("-F", "-6"),
    ("-P", "-7"),
    ("-L", "-8"),
    ("-T", "-9"),
];

/// Maps evdev keycodes to steno keys for a QWERTY keyboard used as a steno machine.
/// Several keycodes may share a label.
pub const KEYCODE_TO_STENO_KEY: &[(u16, &str)] = &[
    // Left hand, top and home rows
    (16, "S-"), // Q
    (30, "S-"), // A
    (17, "T-"), // W
    (31, "K-"), // S
    (18, "P-"), // E
    (32, "W-"), // D
    (19, "H-"), // R
    (33, "R-"), // F
    // Vowels
    (46, "A-"), // C
    (47, "O-"), // V
    // Asterisk block
    (20, "*"), // T
    (34, "*"), // G
    (21, "*"), // Y
    (35, "*"), // H
    (49, "-E"), // N
    (50, "-U"), // M
    // Right hand
    (22, "-F"), // U
    (36, "-R"), // J
    (23, "-P"), // I
    (37, "-B"), // K
    (24, "-L"), // O
    (38, "-G"), // L
    (25, "-T"), // P
    (39, "-S"), // ;
    (26, "-D"), // [
    (40, "-Z"), // '
    // Number bar
    (2, "#"),  // 1
    (3, "#"),  // 2
    (4, "#"),  // 3
    (5, "#"),  // 4
    (6, "#"),  // 5
    (7, "#"),  // 6
    (8, "#"),  // 7
    (9, "#"),  // 8
    (10, "#"), // 9
    (11, "#"), // 0
    (12, "#"), // -
    (13, "#"), // =
];

pub fn keycode_to_steno_key(code: u16) -> Option<&'static str> {
    KEYCODE_TO_STENO_KEY
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, key)| *key)
}

/// Position of a steno key in stroke order.
pub fn steno_key_index(key: &str) -> Option<usize> {
    STENO_KEY_ORDER.iter().position(|k| *k == key)
}

/// Interns a key label into its `'static` form from `STENO_KEY_ORDER`.
pub fn canonical_steno_key(key: &str) -> Option<&'static str> {
    STENO_KEY_ORDER.iter().copied().find(|k| *k == key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redundant_positions_share_label() {
        assert_eq!(keycode_to_steno_key(16), Some("S-"));
        assert_eq!(keycode_to_steno_key(30), Some("S-"));
        assert_eq!(keycode_to_steno_key(20), keycode_to_steno_key(35));
    }

    #[test]
    fn test_unmapped_keycode() {
        assert_eq!(keycode_to_steno_key(44), None); // Z
        assert_eq!(keycode_to_steno_key(57), None); // Space
    }

    #[test]
    fn test_every_label_is_ordered() {
        for (code, key) in KEYCODE_TO_STENO_KEY {
            assert!(
                steno_key_index(key).is_some(),
                "keycode {} maps to unordered key {}",
                code,
                key
            );
        }
    }
}
