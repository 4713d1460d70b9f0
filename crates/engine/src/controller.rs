//! The interaction controller: pointer event in, highlight + tooltip anchor
//! out, with the external tokenizer in the middle.
//!
//! The tokenize step is the only asynchronous point, so it is split into
//! request/complete halves: `begin_scan` does all the synchronous reads and
//! hands back a sequence-stamped [`TokenizeRequest`]; the host resolves it
//! however it likes and calls `finish_scan` with the result. A single-slot
//! queue coalesces triggers: only the newest sequence number is honored, so
//! a slow tokenize response can never paint a stale highlight, and DOM
//! mutations from two scans can never interleave (each scan's mutations all
//! happen synchronously inside `finish_scan`).

use crate::config::ScanConfig;
use crate::japanese::{contains_japanese, is_japanese_char};
use crate::tokenize::{TokenizeError, TokenizeResult, Tokenizer, validate_tokenize_args};
use crate::tooltip::{TooltipAnchor, anchor_for};
use dom::Dom;
use geometry::{Rect, TextGeometry};
use highlight::Highlight;
use scan::{CharLocation, CharLocator, ScannedSentence, extract, map_token};

/// A tokenize call the host must forward to the external collaborator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenizeRequest {
    pub seq: u64,
    pub text: String,
    pub char_at: usize,
}

/// Terminal outcome of a scan step. No-op conditions are outcomes, not
/// errors; nothing here surfaces to the user as a failure.
#[derive(Debug)]
pub enum ScanOutcome {
    /// Nothing to do: no character, no Japanese content, disabled, or the
    /// page changed under us.
    NoHit,
    /// The point is inside the active highlight already.
    AlreadyHighlighted,
    /// Synchronous half done; the host owes us a `finish_scan`.
    Pending(TokenizeRequest),
    /// A newer trigger won; this result was discarded unapplied.
    Superseded,
    /// Unknown token: marked red, no tooltip.
    Marked { rects: Vec<Rect> },
    /// Highlighted with dictionary entries; show the tooltip here.
    Tooltip {
        rects: Vec<Rect>,
        anchor: TooltipAnchor,
    },
}

struct PendingScan {
    seq: u64,
    loc: CharLocation,
    /// Pointer position the scan started from, kept so the anchor can be
    /// re-located if our own unhighlight merges its leaf away.
    point: (f32, f32),
    sentence: ScannedSentence,
}

pub struct Controller {
    config: ScanConfig,
    locator: CharLocator,
    highlighter: Box<dyn Highlight>,
    seq: u64,
    pending: Option<PendingScan>,
}

impl Controller {
    pub fn new(config: ScanConfig, highlighter: Box<dyn Highlight>) -> Self {
        let mut locator = CharLocator::new();
        locator.linear_span = config.linear_span;
        Controller {
            config,
            locator,
            highlighter,
            seq: 0,
            pending: None,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.config.enabled
    }

    /// Toggle scanning. Turning it off tears down any active highlight and
    /// forgets the in-flight request.
    pub fn set_enabled(&mut self, dom: &mut Dom, enabled: bool) {
        self.config.enabled = enabled;
        if !enabled {
            self.highlighter.unhighlight(dom);
            self.pending = None;
            self.locator.invalidate();
        }
    }

    pub fn unhighlight(&mut self, dom: &mut Dom) {
        self.highlighter.unhighlight(dom);
        self.locator.invalidate();
    }

    /// Entry point for the host's selection-change listener. Lets the
    /// selection strategy notice a selection it did not write and go idle
    /// immediately, instead of waiting for the next pointer trigger to
    /// carry the stale color override along.
    pub fn selection_changed(&mut self, dom: &mut Dom) {
        self.highlighter.sync(dom);
        self.locator.invalidate();
    }

    pub fn is_highlight_active(&self) -> bool {
        self.highlighter.is_active()
    }

    pub fn set_unhighlight_hook(&mut self, hook: Box<dyn FnMut()>) {
        self.highlighter.set_unhighlight_hook(hook);
    }

    /// Synchronous half of a scan: hit-test, locate, extract, and stamp a
    /// tokenize request. Supersedes any request still in flight.
    pub fn begin_scan(
        &mut self,
        dom: &mut Dom,
        geometry: &dyn TextGeometry,
        x: f32,
        y: f32,
    ) -> ScanOutcome {
        if !self.config.enabled {
            return ScanOutcome::NoHit;
        }
        // Every new trigger supersedes the in-flight scan, including one
        // that resolves to nothing: a late tokenize result must never paint
        // a highlight for a position the pointer has already left.
        self.pending = None;
        self.highlighter.sync(dom);
        if self.highlighter.is_active()
            && self
                .highlighter
                .rects(dom, geometry)
                .iter()
                .any(|r| r.contains(x, y))
        {
            return ScanOutcome::AlreadyHighlighted;
        }

        let Some(loc) = self.locator.locate(dom, geometry, x, y) else {
            return ScanOutcome::NoHit;
        };
        let Some(c) = dom.char_at(loc.node, loc.char_at) else {
            return ScanOutcome::NoHit;
        };
        if !is_japanese_char(c) {
            return ScanOutcome::NoHit;
        }

        let sentence = extract(dom, loc);
        if let Err(err) = validate_tokenize_args(&sentence.text, sentence.char_at) {
            log::warn!(target: "engine.scan", "extracted sentence failed validation: {err}");
            return ScanOutcome::NoHit;
        }

        self.seq += 1;
        let request = TokenizeRequest {
            seq: self.seq,
            text: sentence.text.clone(),
            char_at: sentence.char_at,
        };
        self.pending = Some(PendingScan {
            seq: self.seq,
            loc,
            point: (x, y),
            sentence,
        });
        log::debug!(target: "engine.scan", "scan #{} pending tokenize", self.seq);
        ScanOutcome::Pending(request)
    }

    /// Asynchronous half: apply a tokenize result, unless a newer scan has
    /// superseded it in the meantime.
    pub fn finish_scan(
        &mut self,
        dom: &mut Dom,
        geometry: &dyn TextGeometry,
        seq: u64,
        result: TokenizeResult,
    ) -> ScanOutcome {
        if self.pending.as_ref().map(|p| p.seq) != Some(seq) {
            log::debug!(target: "engine.scan", "scan #{seq} superseded; result dropped");
            return ScanOutcome::Superseded;
        }
        let pending = self.pending.take().expect("checked above");

        let Some(token) = result.tokens.get(result.token_idx) else {
            return ScanOutcome::NoHit;
        };
        if !contains_japanese(&token.text) {
            // tokenizer led with a non-Japanese token; nothing to look up
            return ScanOutcome::NoHit;
        }
        if pending.sentence.char_at < token.start {
            log::warn!(
                target: "engine.scan",
                "token start {} is past the anchor {}; dropping scan",
                token.start,
                pending.sentence.char_at
            );
            return ScanOutcome::NoHit;
        }
        let token_offset = pending.sentence.char_at - token.start;
        let token_len = token.text.chars().count();
        if token_offset >= token_len {
            return ScanOutcome::NoHit;
        }

        // All mutations happen below, synchronously: clear the old mark
        // before splitting so re-normalization cannot eat the new leaves.
        self.highlighter.unhighlight(dom);
        self.locator.invalidate();
        // Unwrapping the old mark normalizes its parent, which can merge the
        // anchor leaf into a sibling. The text on screen is unchanged, so
        // the pointer still resolves to the same character.
        let anchor_alive = dom
            .text_char_len(pending.loc.node)
            .is_some_and(|len| pending.loc.char_at < len);
        let loc = if anchor_alive {
            pending.loc
        } else {
            let (x, y) = pending.point;
            match self.locator.locate(dom, geometry, x, y) {
                Some(loc) => loc,
                None => return ScanOutcome::NoHit,
            }
        };
        let span = map_token(dom, loc, token_len, token_offset);
        self.locator.invalidate();
        if span.is_empty() {
            return ScanOutcome::NoHit;
        }

        if result.entries.is_empty() {
            self.highlighter.highlight_red(dom, &span);
            let rects = self.highlighter.rects(dom, geometry);
            return ScanOutcome::Marked { rects };
        }
        self.highlighter.highlight(dom, &span);
        let rects = self.highlighter.rects(dom, geometry);
        match anchor_for(&rects, self.config.viewport.1) {
            Some(anchor) => ScanOutcome::Tooltip { rects, anchor },
            None => ScanOutcome::NoHit,
        }
    }

    /// Drive a whole scan against an in-process tokenizer.
    pub fn scan(
        &mut self,
        dom: &mut Dom,
        geometry: &dyn TextGeometry,
        tokenizer: &mut dyn Tokenizer,
        x: f32,
        y: f32,
    ) -> Result<ScanOutcome, TokenizeError> {
        match self.begin_scan(dom, geometry, x, y) {
            ScanOutcome::Pending(request) => {
                let result = tokenizer.tokenize(&request.text, request.char_at)?;
                Ok(self.finish_scan(dom, geometry, request.seq, result))
            }
            other => Ok(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenize::{DictionaryEntry, Token};
    use dom::NodeId;
    use geometry::LineGeometry;
    use highlight::WrapHighlight;

    fn page(text: &str) -> (Dom, NodeId) {
        let mut dom = Dom::new();
        let p = dom.create_element("p");
        let root = dom.root();
        dom.append_child(root, p);
        let t = dom.create_text(text);
        dom.append_child(p, t);
        (dom, t)
    }

    fn controller() -> Controller {
        Controller::new(ScanConfig::default(), Box::new(WrapHighlight::new()))
    }

    fn empty_result() -> TokenizeResult {
        TokenizeResult {
            tokens: Vec::new(),
            token_idx: 0,
            entries: Vec::new(),
        }
    }

    #[test]
    fn disabled_controller_does_not_scan() {
        let (mut dom, _) = page("読む");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();
        ctl.set_enabled(&mut dom, false);
        assert!(matches!(
            ctl.begin_scan(&mut dom, &geom, 5.0, 8.0),
            ScanOutcome::NoHit
        ));
    }

    #[test]
    fn non_japanese_text_is_not_scanned() {
        let (mut dom, _) = page("hello");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();
        assert!(matches!(
            ctl.begin_scan(&mut dom, &geom, 5.0, 8.0),
            ScanOutcome::NoHit
        ));
    }

    #[test]
    fn newer_scan_supersedes_the_older_one() {
        let (mut dom, _) = page("読み切りはすごい。");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();

        let ScanOutcome::Pending(first) = ctl.begin_scan(&mut dom, &geom, 5.0, 8.0) else {
            panic!("expected a pending scan");
        };
        let ScanOutcome::Pending(second) = ctl.begin_scan(&mut dom, &geom, 45.0, 8.0) else {
            panic!("expected a pending scan");
        };
        assert!(second.seq > first.seq);

        assert!(matches!(
            ctl.finish_scan(&mut dom, &geom, first.seq, empty_result()),
            ScanOutcome::Superseded
        ));
    }

    #[test]
    fn a_trigger_that_misses_still_supersedes() {
        let (mut dom, _) = page("読み切りはすごい。");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();

        let ScanOutcome::Pending(first) = ctl.begin_scan(&mut dom, &geom, 5.0, 8.0) else {
            panic!("expected a pending scan");
        };
        // pointer leaves the text before the tokenize result comes back
        assert!(matches!(
            ctl.begin_scan(&mut dom, &geom, 500.0, 8.0),
            ScanOutcome::NoHit
        ));

        let result = TokenizeResult {
            tokens: vec![Token {
                text: "読み切り".into(),
                start: 0,
                reading: "よみきり".into(),
                base: "読み切り".into(),
                pos: "名詞".into(),
            }],
            token_idx: 0,
            entries: vec![DictionaryEntry {
                term: "読み切り".into(),
                reading: "よみきり".into(),
                glosses: vec!["one-shot".into()],
            }],
        };
        assert!(matches!(
            ctl.finish_scan(&mut dom, &geom, first.seq, result),
            ScanOutcome::Superseded
        ));
        assert!(!ctl.is_highlight_active());
        assert_eq!(dom.subtree_text(dom.root()), "読み切りはすごい。");
    }

    #[test]
    fn finish_without_a_pending_scan_is_superseded() {
        let (mut dom, _) = page("読む");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();
        assert!(matches!(
            ctl.finish_scan(&mut dom, &geom, 1, empty_result()),
            ScanOutcome::Superseded
        ));
    }

    #[test]
    fn empty_token_list_is_a_no_hit() {
        let (mut dom, _) = page("読む");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();
        let ScanOutcome::Pending(req) = ctl.begin_scan(&mut dom, &geom, 5.0, 8.0) else {
            panic!("expected a pending scan");
        };
        assert!(matches!(
            ctl.finish_scan(&mut dom, &geom, req.seq, empty_result()),
            ScanOutcome::NoHit
        ));
    }

    #[test]
    fn disabling_tears_down_the_active_highlight() {
        let (mut dom, t) = page("読む");
        let geom = LineGeometry::new(80);
        let mut ctl = controller();
        let ScanOutcome::Pending(req) = ctl.begin_scan(&mut dom, &geom, 5.0, 8.0) else {
            panic!("expected a pending scan");
        };
        let result = TokenizeResult {
            tokens: vec![Token {
                text: "読む".into(),
                start: 0,
                reading: "よむ".into(),
                base: "読む".into(),
                pos: "動詞".into(),
            }],
            token_idx: 0,
            entries: Vec::new(),
        };
        assert!(matches!(
            ctl.finish_scan(&mut dom, &geom, req.seq, result),
            ScanOutcome::Marked { .. }
        ));
        assert!(ctl.is_highlight_active());

        ctl.set_enabled(&mut dom, false);
        assert!(!ctl.is_highlight_active());
        assert_eq!(dom.subtree_text(dom.root()), "読む");
        assert_eq!(dom.text(t), Some("読む"));
    }
}
