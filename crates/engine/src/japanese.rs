//! Japanese-content classification for the scan gate: scans only proceed
//! when the pointed-at character (and later, the returned token) actually
//! contains Japanese text.

/// True for characters that constitute Japanese content: kana, kanji
/// (including compatibility ideographs), iteration/repetition marks, the
/// prolonged sound mark, and halfwidth katakana. Japanese punctuation does
/// not count; pointing at a 「。」 is not pointing at a word.
pub fn is_japanese_char(c: char) -> bool {
    matches!(c,
        '\u{3005}'..='\u{3007}'          // 々 〆 〇
        | '\u{3040}'..='\u{309F}'        // hiragana
        | '\u{30A0}'..='\u{30FF}'        // katakana, prolonged sound mark
        | '\u{31F0}'..='\u{31FF}'        // katakana phonetic extensions
        | '\u{3400}'..='\u{4DBF}'        // CJK extension A
        | '\u{4E00}'..='\u{9FFF}'        // CJK unified ideographs
        | '\u{F900}'..='\u{FAFF}'        // CJK compatibility ideographs
        | '\u{FF66}'..='\u{FF9F}'        // halfwidth katakana
    )
}

pub fn contains_japanese(text: &str) -> bool {
    text.chars().any(is_japanese_char)
}
