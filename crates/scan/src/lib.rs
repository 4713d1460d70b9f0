pub mod locate;
pub mod sentence;
pub mod token_map;
pub mod traverse;
pub mod types;

pub use crate::locate::CharLocator;
pub use crate::sentence::extract;
pub use crate::token_map::{map_token, span_text};
pub use crate::traverse::{next_text_leaf, prev_text_leaf};
pub use crate::types::{CharLocation, NodeSpan, ScannedSentence};
