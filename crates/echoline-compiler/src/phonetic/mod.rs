//! # Phonetic Model
//!
//! Word segmentation (jieba) plus per-character readings (pinyin tables).
//! The segmentation dictionary is large, so the model lives in a process-wide
//! [`OnceLock`] that is built on first use and read-only afterwards. Binaries
//! call [`warm_up`] at start-up to pay that cost before the first message.
//!
//! - **`zhuyin`**: pinyin syllable → Bopomofo
//! - **`sandhi`**: tone changes inside a word

pub mod sandhi;
pub mod zhuyin;

use std::sync::OnceLock;

use jieba_rs::Jieba;
use pinyin::ToPinyin;

use crate::config::TypewritingScheme;

static MODEL: OnceLock<PhoneticModel> = OnceLock::new();

/// Builds the shared model if it does not exist yet.
pub fn warm_up() {
    PhoneticModel::global();
}

/// Whether `c` is a CJK unified ideograph (including extensions and
/// compatibility ideographs).
pub fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{3400}'..='\u{4DBF}'
            | '\u{4E00}'..='\u{9FFF}'
            | '\u{F900}'..='\u{FAFF}'
            | '\u{20000}'..='\u{2A6DF}'
            | '\u{2A700}'..='\u{2EBEF}'
            | '\u{30000}'..='\u{3134F}'
    )
}

/// Reading of one ideograph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub hanzi: char,
    /// Toneless romanization, e.g. `zhong`.
    pub plain: &'static str,
    /// 1-4, or 5 for the neutral tone.
    pub tone: u8,
}

impl Syllable {
    /// Looks up the most common reading of `hanzi`.
    pub fn lookup(hanzi: char) -> Option<Self> {
        let reading = hanzi.to_pinyin()?;
        let numbered = reading.with_tone_num_end();
        let tone = numbered
            .chars()
            .last()
            .and_then(|c| c.to_digit(10))
            .and_then(|d| u8::try_from(d).ok())
            .filter(|d| (1..=5).contains(d))
            .unwrap_or(5);
        Some(Self {
            hanzi,
            plain: reading.plain(),
            tone,
        })
    }

    pub fn render(&self, scheme: TypewritingScheme) -> String {
        match scheme {
            TypewritingScheme::Pinyin => self.plain.to_string(),
            TypewritingScheme::Zhuyin => zhuyin::from_pinyin(self.plain, self.tone)
                .unwrap_or_else(|| {
                    log::warn!("no zhuyin for {:?} ({}), using pinyin", self.hanzi, self.plain);
                    self.plain.to_string()
                }),
        }
    }
}

pub struct PhoneticModel {
    jieba: Jieba,
}

impl PhoneticModel {
    /// The process-wide model, initialized on first call.
    pub fn global() -> &'static Self {
        MODEL.get_or_init(|| {
            log::debug!("loading word segmentation dictionary");
            Self {
                jieba: Jieba::new(),
            }
        })
    }

    /// Splits `text` into words. The pieces always concatenate back to
    /// `text`; if the segmenter disagrees, every character is its own word.
    pub fn segment<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let words = self.jieba.cut(text, true);
        if words.concat() == text {
            return words;
        }
        log::warn!("segmenter output does not cover input, splitting per character");
        text.char_indices()
            .map(|(i, c)| &text[i..i + c.len_utf8()])
            .collect()
    }

    /// One phonetic token per source character, positionally aligned.
    /// Characters without a reading are passed through unchanged.
    pub fn transcribe(&self, text: &str, scheme: TypewritingScheme) -> Vec<String> {
        let mut tokens = Vec::with_capacity(text.chars().count());
        for word in self.segment(text) {
            let mut syllables: Vec<Syllable> = word
                .chars()
                .filter(|c| is_cjk(*c))
                .filter_map(|c| {
                    let found = Syllable::lookup(c);
                    if found.is_none() {
                        log::warn!("no reading for {c:?}, passing it through");
                    }
                    found
                })
                .collect();
            sandhi::apply(&mut syllables);

            let mut readings = syllables.iter();
            let mut next_reading = readings.next();
            for c in word.chars() {
                match next_reading {
                    Some(syllable) if syllable.hanzi == c && is_cjk(c) => {
                        tokens.push(syllable.render(scheme));
                        next_reading = readings.next();
                    }
                    _ => tokens.push(c.to_string()),
                }
            }
        }
        tokens
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case('中', true)]
    #[case('㐀', true)]
    #[case('a', false)]
    #[case('，', false)]
    #[case('あ', false)]
    #[case('ㄅ', false)]
    fn cjk_detection(#[case] c: char, #[case] expected: bool) {
        assert_eq!(is_cjk(c), expected);
    }

    #[test]
    fn lookup_reads_tone_numbers() {
        let zhong = Syllable::lookup('中').unwrap();
        assert_eq!(zhong.plain, "zhong");
        assert_eq!(zhong.tone, 1);
        assert_eq!(Syllable::lookup('a'), None);
    }

    #[test]
    fn segments_cover_input() {
        let model = PhoneticModel::global();
        let text = "我们今天去北京 ok?";
        assert_eq!(model.segment(text).concat(), text);
    }

    #[test]
    fn pinyin_tokens_align_with_characters() {
        let tokens = PhoneticModel::global().transcribe("中文a!", TypewritingScheme::Pinyin);
        assert_eq!(tokens, vec!["zhong", "wen", "a", "!"]);
    }

    #[test]
    fn zhuyin_applies_sandhi_inside_words() {
        let tokens = PhoneticModel::global().transcribe("你好", TypewritingScheme::Zhuyin);
        assert_eq!(tokens, vec!["ㄋㄧˊ", "ㄏㄠˇ"]);
    }

    #[test]
    fn warm_up_is_idempotent() {
        warm_up();
        warm_up();
        assert!(std::ptr::eq(PhoneticModel::global(), PhoneticModel::global()));
    }
}
