//! Pinyin syllable → Bopomofo (zhuyin) conversion.

/// Initials, longest first so `zh` wins over `z`.
const INITIALS: &[(&str, &str)] = &[
    ("zh", "ㄓ"),
    ("ch", "ㄔ"),
    ("sh", "ㄕ"),
    ("b", "ㄅ"),
    ("p", "ㄆ"),
    ("m", "ㄇ"),
    ("f", "ㄈ"),
    ("d", "ㄉ"),
    ("t", "ㄊ"),
    ("n", "ㄋ"),
    ("l", "ㄌ"),
    ("g", "ㄍ"),
    ("k", "ㄎ"),
    ("h", "ㄏ"),
    ("j", "ㄐ"),
    ("q", "ㄑ"),
    ("x", "ㄒ"),
    ("r", "ㄖ"),
    ("z", "ㄗ"),
    ("c", "ㄘ"),
    ("s", "ㄙ"),
];

/// Finals in their unabbreviated written form.
const FINALS: &[(&str, &str)] = &[
    ("a", "ㄚ"),
    ("o", "ㄛ"),
    ("e", "ㄜ"),
    ("ê", "ㄝ"),
    ("ai", "ㄞ"),
    ("ei", "ㄟ"),
    ("ao", "ㄠ"),
    ("ou", "ㄡ"),
    ("an", "ㄢ"),
    ("en", "ㄣ"),
    ("ang", "ㄤ"),
    ("eng", "ㄥ"),
    ("ong", "ㄨㄥ"),
    ("er", "ㄦ"),
    ("i", "ㄧ"),
    ("ia", "ㄧㄚ"),
    ("io", "ㄧㄛ"),
    ("ie", "ㄧㄝ"),
    ("iai", "ㄧㄞ"),
    ("iao", "ㄧㄠ"),
    ("iou", "ㄧㄡ"),
    ("ian", "ㄧㄢ"),
    ("in", "ㄧㄣ"),
    ("iang", "ㄧㄤ"),
    ("ing", "ㄧㄥ"),
    ("iong", "ㄩㄥ"),
    ("u", "ㄨ"),
    ("ua", "ㄨㄚ"),
    ("uo", "ㄨㄛ"),
    ("uai", "ㄨㄞ"),
    ("uei", "ㄨㄟ"),
    ("uan", "ㄨㄢ"),
    ("uen", "ㄨㄣ"),
    ("uang", "ㄨㄤ"),
    ("ueng", "ㄨㄥ"),
    ("ü", "ㄩ"),
    ("üe", "ㄩㄝ"),
    ("üan", "ㄩㄢ"),
    ("ün", "ㄩㄣ"),
];

/// Initials whose bare `i` final is silent (`zhi` → ㄓ).
const BUZZING: &[&str] = &["zh", "ch", "sh", "r", "z", "c", "s"];

/// Initials after which a written `u` is really `ü`.
const PALATAL: &[&str] = &["j", "q", "x"];

/// Converts a toneless pinyin syllable plus tone (1-4, 5 for neutral) into
/// zhuyin. Returns `None` for syllables outside the standard table, such as
/// the interjections `hm` or `ng`.
pub fn from_pinyin(syllable: &str, tone: u8) -> Option<String> {
    let (initial, final_part) = split(&syllable.to_lowercase())?;

    let mut out = String::new();
    if tone == 5 {
        out.push('˙');
    }
    if let Some(initial) = initial {
        out.push_str(lookup(INITIALS, initial)?);
    }
    if !final_part.is_empty() {
        out.push_str(lookup(FINALS, &final_part)?);
    }
    if out.is_empty() || out == "˙" {
        return None;
    }
    if let Some(mark) = tone_mark(tone) {
        out.push(mark);
    }
    Some(out)
}

fn lookup<'t>(table: &'t [(&str, &'t str)], key: &str) -> Option<&'t str> {
    table.iter().find(|(k, _)| *k == key).map(|(_, v)| *v)
}

fn tone_mark(tone: u8) -> Option<char> {
    match tone {
        2 => Some('ˊ'),
        3 => Some('ˇ'),
        4 => Some('ˋ'),
        _ => None,
    }
}

/// Splits a syllable into its initial and unabbreviated final.
fn split(syllable: &str) -> Option<(Option<&'static str>, String)> {
    let syllable = syllable.replace('v', "ü");

    if let Some(rest) = syllable.strip_prefix('y') {
        let final_part = if let Some(after) = rest.strip_prefix('u') {
            format!("ü{after}")
        } else if rest.starts_with('i') {
            rest.to_string()
        } else if rest == "ou" {
            "iou".to_string()
        } else {
            format!("i{rest}")
        };
        return Some((None, final_part));
    }

    if let Some(rest) = syllable.strip_prefix('w') {
        let final_part = match rest {
            "u" => "u".to_string(),
            "ei" => "uei".to_string(),
            "en" => "uen".to_string(),
            _ => format!("u{rest}"),
        };
        return Some((None, final_part));
    }

    let (initial, rest) = match INITIALS
        .iter()
        .find(|(k, _)| syllable.starts_with(k))
    {
        Some((k, _)) => (Some(*k), &syllable[k.len()..]),
        None => (None, syllable.as_str()),
    };

    let mut final_part = rest.to_string();
    if let Some(initial) = initial {
        if PALATAL.contains(&initial)
            && let Some(after) = final_part.strip_prefix('u')
        {
            final_part = format!("ü{after}");
        }
        if BUZZING.contains(&initial) && final_part == "i" {
            final_part.clear();
        }
        let expanded = match final_part.as_str() {
            "iu" => Some("iou"),
            "ui" => Some("uei"),
            "un" => Some("uen"),
            _ => None,
        };
        if let Some(expanded) = expanded {
            final_part = expanded.to_string();
        }
        if final_part.is_empty() && !BUZZING.contains(&initial) {
            return None;
        }
    }
    Some((initial, final_part))
}
