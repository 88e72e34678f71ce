use std::collections::HashMap;

/// Named keysyms accepted in key combinations (IBus/X11 names and values).
const NAMED_KEYSYMS: &[(&str, u32)] = &[
    // Punctuation (Latin-1 range, keysym == codepoint)
    ("space", 0x0020),
    ("exclam", 0x0021),
    ("quotedbl", 0x0022),
    ("numbersign", 0x0023),
    ("dollar", 0x0024),
    ("percent", 0x0025),
    ("ampersand", 0x0026),
    ("apostrophe", 0x0027),
    ("parenleft", 0x0028),
    ("parenright", 0x0029),
    ("asterisk", 0x002a),
    ("plus", 0x002b),
    ("comma", 0x002c),
    ("minus", 0x002d),
    ("period", 0x002e),
    ("slash", 0x002f),
    ("colon", 0x003a),
    ("semicolon", 0x003b),
    ("less", 0x003c),
    ("equal", 0x003d),
    ("greater", 0x003e),
    ("question", 0x003f),
    ("at", 0x0040),
    ("bracketleft", 0x005b),
    ("backslash", 0x005c),
    ("bracketright", 0x005d),
    ("asciicircum", 0x005e),
    ("underscore", 0x005f),
    ("grave", 0x0060),
    ("braceleft", 0x007b),
    ("bar", 0x007c),
    ("braceright", 0x007d),
    ("asciitilde", 0x007e),
    // Editing
    ("BackSpace", 0xff08),
    ("Tab", 0xff09),
    ("Linefeed", 0xff0a),
    ("Clear", 0xff0b),
    ("Return", 0xff0d),
    ("Pause", 0xff13),
    ("Scroll_Lock", 0xff14),
    ("Sys_Req", 0xff15),
    ("Escape", 0xff1b),
    ("Delete", 0xffff),
    // Navigation
    ("Home", 0xff50),
    ("Left", 0xff51),
    ("Up", 0xff52),
    ("Right", 0xff53),
    ("Down", 0xff54),
    ("Prior", 0xff55),
    ("Page_Up", 0xff55),
    ("Next", 0xff56),
    ("Page_Down", 0xff56),
    ("End", 0xff57),
    ("Begin", 0xff58),
    ("Print", 0xff61),
    ("Insert", 0xff63),
    ("Menu", 0xff67),
    ("Num_Lock", 0xff7f),
    // Keypad
    ("KP_Enter", 0xff8d),
    ("KP_Multiply", 0xffaa),
    ("KP_Add", 0xffab),
    ("KP_Subtract", 0xffad),
    ("KP_Decimal", 0xffae),
    ("KP_Divide", 0xffaf),
    ("KP_0", 0xffb0),
    ("KP_1", 0xffb1),
    ("KP_2", 0xffb2),
    ("KP_3", 0xffb3),
    ("KP_4", 0xffb4),
    ("KP_5", 0xffb5),
    ("KP_6", 0xffb6),
    ("KP_7", 0xffb7),
    ("KP_8", 0xffb8),
    ("KP_9", 0xffb9),
    // Modifiers
    ("Shift_L", 0xffe1),
    ("Shift_R", 0xffe2),
    ("Control_L", 0xffe3),
    ("Control_R", 0xffe4),
    ("Caps_Lock", 0xffe5),
    ("Meta_L", 0xffe7),
    ("Meta_R", 0xffe8),
    ("Alt_L", 0xffe9),
    ("Alt_R", 0xffea),
    ("Super_L", 0xffeb),
    ("Super_R", 0xffec),
    ("Hyper_L", 0xffed),
    ("Hyper_R", 0xffee),
    // Media
    ("XF86AudioLowerVolume", 0x1008ff11),
    ("XF86AudioMute", 0x1008ff12),
    ("XF86AudioRaiseVolume", 0x1008ff13),
    ("XF86AudioPlay", 0x1008ff14),
    ("XF86AudioStop", 0x1008ff15),
    ("XF86AudioPrev", 0x1008ff16),
    ("XF86AudioNext", 0x1008ff17),
];

/// Informal spellings mapped to their canonical keysym names.
const ALIASES: &[(&str, &str)] = &[
    ("Ctrl_L", "Control_L"),
    ("Ctrl_R", "Control_R"),
    ("Win_L", "Super_L"),
    ("Win_R", "Super_R"),
    ("Enter", "Return"),
    ("Esc", "Escape"),
];

const F_KEY_NAMES: [&str; 35] = [
    "F1", "F2", "F3", "F4", "F5", "F6", "F7", "F8", "F9", "F10", "F11", "F12", "F13", "F14", "F15",
    "F16", "F17", "F18", "F19", "F20", "F21", "F22", "F23", "F24", "F25", "F26", "F27", "F28",
    "F29", "F30", "F31", "F32", "F33", "F34", "F35",
];

const ALNUM_NAMES: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

lazy_static::lazy_static! {
    static ref KEYSYMS: HashMap<&'static str, (&'static str, u32)> = {
        let mut m = HashMap::new();
        for (i, c) in ALNUM_NAMES.char_indices() {
            let name = &ALNUM_NAMES[i..i + 1];
            m.insert(name, (name, c as u32));
        }
        for (i, name) in F_KEY_NAMES.iter().enumerate() {
            m.insert(*name, (*name, 0xffbe + i as u32));
        }
        for (name, keysym) in NAMED_KEYSYMS {
            m.insert(*name, (*name, *keysym));
        }
        for (alias, target) in ALIASES {
            if let Some(entry) = NAMED_KEYSYMS.iter().find(|(n, _)| n == target) {
                m.insert(*alias, *entry);
            }
        }
        m
    };

    static ref KEYSYMS_LOWER: HashMap<String, (&'static str, u32)> = KEYSYMS
        .iter()
        .filter(|(name, _)| name.len() > 1)
        .map(|(name, entry)| (name.to_ascii_lowercase(), *entry))
        .collect();
}

/// Resolves a key name to its canonical name and keysym value.
///
/// Exact names win; multi-character names also match case-insensitively.
pub fn lookup_keysym(name: &str) -> Option<(&'static str, u32)> {
    if let Some(entry) = KEYSYMS.get(name) {
        return Some(*entry);
    }
    if name.chars().count() > 1 {
        return KEYSYMS_LOWER.get(&name.to_ascii_lowercase()).copied();
    }
    None
}
