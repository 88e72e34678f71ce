use crate::error::StrokeParseError;
use crate::steno_map::{
    canonical_steno_key, steno_key_index, IMPLICIT_HYPHEN_KEYS, STENO_KEY_NUMBERS,
    STENO_KEY_ORDER,
};
use std::fmt;
use tracing::debug;

/// A completed chord: the set of steno keys pressed and released together.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Stroke {
    keys: Vec<&'static str>,
    rtfcre: String,
}

impl Stroke {
    /// Builds a stroke from key labels. Duplicates collapse and the keys are
    /// put in steno order; labels outside the steno order are ignored.
    pub fn from_keys<'a, I>(labels: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut keys: Vec<&'static str> = Vec::new();
        for label in labels {
            match canonical_steno_key(label) {
                Some(key) if !keys.contains(&key) => keys.push(key),
                Some(_) => {}
                None => debug!("Ignoring unknown steno key {:?}", label),
            }
        }
        keys.sort_by_key(|k| steno_key_index(k));
        let rtfcre = render_rtfcre(&keys);
        Self { keys, rtfcre }
    }

    /// Parses steno notation such as `"KA-T"`, `"TKOG"`, `"-T"` or `"1-9"`.
    pub fn parse(notation: &str) -> Result<Self, StrokeParseError> {
        if notation.is_empty() {
            return Err(StrokeParseError::Empty);
        }

        let mut keys: Vec<&'static str> = Vec::new();
        let mut cursor = 0usize;
        let mut numeral = false;
        let right_start = steno_key_index("-E").unwrap_or(STENO_KEY_ORDER.len());

        for c in notation.chars() {
            match c {
                '-' => {
                    cursor = cursor.max(right_start);
                }
                '#' => {
                    numeral = true;
                }
                '0'..='9' => {
                    let found = STENO_KEY_NUMBERS.iter().find(|(from, to)| {
                        to.trim_matches('-').starts_with(c)
                            && steno_key_index(from).is_some_and(|i| i >= cursor)
                    });
                    let Some((from, _)) = found else {
                        return Err(StrokeParseError::UnexpectedKey {
                            key: c,
                            notation: notation.to_string(),
                        });
                    };
                    if let Some(i) = steno_key_index(from) {
                        cursor = i + 1;
                    }
                    keys.push(from);
                    numeral = true;
                }
                _ => {
                    let found = STENO_KEY_ORDER
                        .iter()
                        .enumerate()
                        .skip(cursor)
                        .find(|(_, k)| **k != "#" && k.trim_matches('-').starts_with(c));
                    let Some((i, key)) = found else {
                        return Err(StrokeParseError::UnexpectedKey {
                            key: c,
                            notation: notation.to_string(),
                        });
                    };
                    cursor = i + 1;
                    keys.push(key);
                }
            }
        }

        if numeral {
            keys.push("#");
        }
        if keys.is_empty() {
            return Err(StrokeParseError::Empty);
        }
        Ok(Self::from_keys(keys))
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Canonical steno notation for this stroke.
    pub fn rtfcre(&self) -> &str {
        &self.rtfcre
    }

    /// The lone asterisk stroke undoes the previous stroke.
    pub fn is_correction(&self) -> bool {
        self.keys == ["*"]
    }
}

impl fmt::Display for Stroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.rtfcre)
    }
}

fn render_rtfcre(ordered: &[&'static str]) -> String {
    let mut keys: Vec<&'static str> = ordered.to_vec();

    if keys.contains(&"#") {
        let mut numeral = false;
        for key in keys.iter_mut() {
            if let Some((_, number)) = STENO_KEY_NUMBERS.iter().find(|(from, _)| from == key) {
                *key = number;
                numeral = true;
            }
        }
        if numeral {
            keys.retain(|k| *k != "#");
        }
    }

    if keys.iter().any(|k| IMPLICIT_HYPHEN_KEYS.contains(k)) {
        return keys.iter().map(|k| k.trim_matches('-')).collect();
    }

    let pre: String = keys
        .iter()
        .filter(|k| k.ends_with('-') || **k == "#")
        .map(|k| k.trim_matches('-'))
        .collect();
    let post: String = keys
        .iter()
        .filter(|k| k.starts_with('-'))
        .map(|k| k.trim_matches('-'))
        .collect();

    if post.is_empty() {
        pre
    } else {
        format!("{}-{}", pre, post)
    }
}

/// Normalizes a `/`-separated steno string into a dictionary key.
pub fn normalize_steno(strokes: &str) -> Vec<String> {
    strokes
        .split('/')
        .map(|stroke| {
            let mut stroke = stroke.to_string();
            if stroke.contains('#') {
                stroke = stroke.replace('#', "");
                if !stroke.chars().any(|c| c.is_ascii_digit()) {
                    stroke.insert(0, '#');
                }
            }
            if stroke.chars().any(|c| "AOEU*50".contains(c)) {
                stroke = stroke.replace('-', "");
            }
            if stroke.ends_with('-') {
                stroke.pop();
            }
            stroke
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rtfcre_orders_keys() {
        let stroke = Stroke::from_keys(["-T", "A-", "K-"]);
        assert_eq!(stroke.rtfcre(), "KAT");
        assert_eq!(stroke.keys(), &["K-", "A-", "-T"]);
    }

    #[test]
    fn test_rtfcre_explicit_hyphen() {
        assert_eq!(Stroke::from_keys(["-T"]).rtfcre(), "-T");
        assert_eq!(Stroke::from_keys(["S-", "-S"]).rtfcre(), "S-S");
        assert_eq!(Stroke::from_keys(["T-", "K-"]).rtfcre(), "TK");
    }

    #[test]
    fn test_rtfcre_numbers() {
        assert_eq!(Stroke::from_keys(["#", "S-", "-T"]).rtfcre(), "1-9");
        assert_eq!(Stroke::from_keys(["#", "A-"]).rtfcre(), "5");
        assert_eq!(Stroke::from_keys(["#", "K-"]).rtfcre(), "#K");
    }

    #[test]
    fn test_duplicates_collapse() {
        let stroke = Stroke::from_keys(["S-", "S-", "*"]);
        assert_eq!(stroke.keys(), &["S-", "*"]);
        assert_eq!(stroke.rtfcre(), "S*");
    }

    #[test]
    fn test_is_correction() {
        assert!(Stroke::from_keys(["*"]).is_correction());
        assert!(!Stroke::from_keys(["*", "-T"]).is_correction());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Stroke::parse("KA-T").unwrap(), Stroke::from_keys(["K-", "A-", "-T"]));
        assert_eq!(
            Stroke::parse("TKOG").unwrap(),
            Stroke::from_keys(["T-", "K-", "O-", "-G"])
        );
        assert_eq!(
            Stroke::parse("HREURB").unwrap().rtfcre(),
            "HREURB"
        );
        assert_eq!(Stroke::parse("-T").unwrap(), Stroke::from_keys(["-T"]));
        assert_eq!(Stroke::parse("*").unwrap(), Stroke::from_keys(["*"]));
        assert_eq!(
            Stroke::parse("1-9").unwrap(),
            Stroke::from_keys(["#", "S-", "-T"])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Stroke::parse(""), Err(StrokeParseError::Empty));
        assert!(matches!(
            Stroke::parse("KX"),
            Err(StrokeParseError::UnexpectedKey { key: 'X', .. })
        ));
        // Left-hand key after the right bank started.
        assert!(Stroke::parse("-TS-").is_ok());
        assert!(Stroke::parse("-TK").is_err());
    }

    #[test]
    fn test_normalize_steno() {
        assert_eq!(normalize_steno("KAT/TKOG"), vec!["KAT", "TKOG"]);
        assert_eq!(normalize_steno("KA-T"), vec!["KAT"]);
        assert_eq!(normalize_steno("TK-"), vec!["TK"]);
        assert_eq!(normalize_steno("#TK"), vec!["#TK"]);
        assert_eq!(normalize_steno("#1-9"), vec!["1-9"]);
    }
}
