//! Sentence extraction: the minimal terminator-delimited run of characters
//! around an anchor location, assembled across inline leaf boundaries.

use crate::traverse::{next_text_leaf, prev_text_leaf};
use crate::types::{CharLocation, ScannedSentence};
use dom::Dom;

/// Sentence terminators, Japanese and Latin. The run containing the anchor
/// ends at the first terminator at or after it (inclusive) and starts just
/// after the nearest terminator before it.
pub const TERMINATORS: &[char] = &['。', '．', '！', '？', '.', '!', '?'];

/// Closing punctuation that may trail a terminator; it closes the sentence
/// the terminator ended and must not leak into the next one's prefix.
pub const CLOSERS: &[char] = &[
    '」', '』', '）', '〉', '》', '】', '’', '”', ')', ']', '"', '\'',
];

fn is_terminator(c: char) -> bool {
    TERMINATORS.contains(&c)
}

fn is_closer(c: char) -> bool {
    CLOSERS.contains(&c)
}

/// Leaves visited per direction before giving up; a tripwire, not the
/// termination argument (traversal itself makes strict progress).
const LEAF_CAP: usize = 512;

/// Extract the sentence around `loc`. Always returns: an anchor at the very
/// start of a document yields an empty prefix, and a vanished anchor node
/// yields an empty sentence.
pub fn extract(dom: &Dom, loc: CharLocation) -> ScannedSentence {
    let Some(text) = dom.text(loc.node) else {
        return ScannedSentence {
            text: String::new(),
            char_at: 0,
        };
    };
    let chars: Vec<char> = text.chars().collect();
    let char_at = loc.char_at.min(chars.len().saturating_sub(1));

    // Backward: in-leaf first, then previous inline neighbors.
    let mut local_start = 0;
    let mut found_start = false;
    for i in (0..char_at).rev() {
        if is_terminator(chars[i]) {
            local_start = i + 1;
            while local_start < char_at && is_closer(chars[local_start]) {
                local_start += 1;
            }
            found_start = true;
            break;
        }
    }
    let mut before = String::new();
    if !found_start {
        let mut cur = loc.node;
        for _ in 0..LEAF_CAP {
            let Some(prev) = prev_text_leaf(dom, cur) else {
                break;
            };
            let pchars: Vec<char> = dom.text(prev).unwrap_or_default().chars().collect();
            let mut from = 0;
            let mut stop = false;
            for i in (0..pchars.len()).rev() {
                if is_terminator(pchars[i]) {
                    from = i + 1;
                    while from < pchars.len() && is_closer(pchars[from]) {
                        from += 1;
                    }
                    stop = true;
                    break;
                }
            }
            let fragment: String = pchars[from..].iter().collect();
            before.insert_str(0, &fragment);
            if stop {
                break;
            }
            cur = prev;
        }
    }
    before.extend(&chars[local_start..char_at]);

    // Forward: the terminator and any closers trailing it are part of the
    // sentence.
    let mut after = String::new();
    let mut found_end = false;
    let mut i = char_at;
    while i < chars.len() {
        let c = chars[i];
        after.push(c);
        i += 1;
        if is_terminator(c) {
            while i < chars.len() && is_closer(chars[i]) {
                after.push(chars[i]);
                i += 1;
            }
            found_end = true;
            break;
        }
    }
    if !found_end {
        let mut cur = loc.node;
        for _ in 0..LEAF_CAP {
            let Some(next) = next_text_leaf(dom, cur) else {
                break;
            };
            let nchars: Vec<char> = dom.text(next).unwrap_or_default().chars().collect();
            let mut i = 0;
            while i < nchars.len() {
                let c = nchars[i];
                after.push(c);
                i += 1;
                if is_terminator(c) {
                    while i < nchars.len() && is_closer(nchars[i]) {
                        after.push(nchars[i]);
                        i += 1;
                    }
                    found_end = true;
                    break;
                }
            }
            if found_end {
                break;
            }
            cur = next;
        }
    }

    let char_at = before.chars().count();
    log::trace!(
        target: "scan.sentence",
        "extracted {} chars, anchor at {}",
        char_at + after.chars().count(),
        char_at
    );
    ScannedSentence {
        text: before + &after,
        char_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dom::{Dom, NodeId};

    fn single_leaf(text: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        let root = dom.root();
        dom.append_child(root, p);
        let t = dom.create_text(text);
        dom.append_child(p, t);
        (dom, t)
    }

    #[test]
    fn single_sentence_leaf_at_first_char() {
        let (dom, t) = single_leaf("読み切りはすごい。");
        let got = extract(&dom, CharLocation { node: t, char_at: 0 });
        assert_eq!(got.text, "読み切りはすごい。");
        assert_eq!(got.char_at, 0);
    }

    #[test]
    fn middle_sentence_of_a_three_sentence_leaf() {
        let (dom, t) = single_leaf("これは文章1。これは文章2。そして最後の文章。");
        let got = extract(&dom, CharLocation { node: t, char_at: 4 });
        assert_eq!(got.text, "これは文章1。");
        assert_eq!(got.char_at, 4);

        // index 8 sits in the second sentence, whose start boundary is
        // source index 7
        let got = extract(&dom, CharLocation { node: t, char_at: 8 });
        assert_eq!(got.text, "これは文章2。");
        assert_eq!(got.char_at, 1);
    }

    #[test]
    fn spans_bold_italic_wrappers() {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        let root = dom.root();
        dom.append_child(root, p);
        let before = dom.create_text("読書は");
        dom.append_child(p, before);
        let b = dom.create_element("b");
        dom.append_child(p, b);
        let i = dom.create_element("i");
        dom.append_child(b, i);
        let inner = dom.create_text("楽しい");
        dom.append_child(i, inner);
        let after = dom.create_text("活動である。");
        dom.append_child(p, after);

        let got = extract(
            &dom,
            CharLocation {
                node: inner,
                char_at: 1,
            },
        );
        assert_eq!(got.text, "読書は楽しい活動である。");
        assert_eq!(got.char_at, 4);
    }

    #[test]
    fn skips_ruby_annotations() {
        // 読書(どくしょ)は楽(たの)しい活動(かつどう)である。
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        let root = dom.root();
        dom.append_child(root, p);
        let mut ruby_pair = |dom: &mut Dom, base: &str, reading: &str| -> NodeId {
            let ruby = dom.create_element("ruby");
            dom.append_child(p, ruby);
            let b = dom.create_text(base);
            dom.append_child(ruby, b);
            let rt = dom.create_element("rt");
            dom.append_child(ruby, rt);
            let r = dom.create_text(reading);
            dom.append_child(rt, r);
            b
        };
        let first = ruby_pair(&mut dom, "読書", "どくしょ");
        let ha = dom.create_text("は");
        dom.append_child(p, ha);
        ruby_pair(&mut dom, "楽", "たの");
        let shii = dom.create_text("しい");
        dom.append_child(p, shii);
        ruby_pair(&mut dom, "活動", "かつどう");
        let de_aru = dom.create_text("である。");
        dom.append_child(p, de_aru);

        let got = extract(
            &dom,
            CharLocation {
                node: first,
                char_at: 0,
            },
        );
        assert_eq!(got.text, "読書は楽しい活動である。");
        assert_eq!(got.char_at, 0);
    }

    #[test]
    fn closing_quotes_stay_with_their_sentence() {
        let (dom, t) = single_leaf("彼は「読む。」と言った。");

        // anchored inside the quote: the sentence ends at 。」, closer
        // included
        let got = extract(&dom, CharLocation { node: t, char_at: 3 });
        assert_eq!(got.text, "彼は「読む。」");
        assert_eq!(got.char_at, 3);

        // anchored after the quote: the closer belongs to the previous
        // sentence, not this one's prefix
        let got = extract(&dom, CharLocation { node: t, char_at: 7 });
        assert_eq!(got.text, "と言った。");
        assert_eq!(got.char_at, 0);
    }

    #[test]
    fn document_start_yields_empty_prefix() {
        let (dom, t) = single_leaf("終端記号がない");
        let got = extract(&dom, CharLocation { node: t, char_at: 0 });
        assert_eq!(got.text, "終端記号がない");
        assert_eq!(got.char_at, 0);
    }

    #[test]
    fn vanished_anchor_yields_empty_sentence() {
        let (mut dom, t) = single_leaf("消える");
        dom.remove(t);
        let got = extract(&dom, CharLocation { node: t, char_at: 1 });
        assert_eq!(got.text, "");
        assert_eq!(got.char_at, 0);
    }
}
