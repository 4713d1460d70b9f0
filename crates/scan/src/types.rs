use dom::NodeId;

/// One character of rendered text: a text leaf plus a character offset into
/// it. Invariant: `0 <= char_at < leaf length` at the time of creation; the
/// page may invalidate the node afterwards, which readers must tolerate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharLocation {
    pub node: NodeId,
    pub char_at: usize,
}

/// A sentence assembled across leaf boundaries, plus the anchor character's
/// offset within it. Invariant: `text.chars().nth(char_at)` is the anchor
/// character.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannedSentence {
    pub text: String,
    pub char_at: usize,
}

/// Ordered text leaves whose contributed substrings exactly tile one token:
/// no gaps, no overlaps, nothing borrowed from outside the token.
pub type NodeSpan = Vec<NodeId>;
