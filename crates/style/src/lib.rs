pub mod flow;
pub mod values;

pub use crate::flow::{breaks_inline_adjacency, is_inline_flow, is_out_of_flow};
pub use crate::values::{ComputedStyle, Display, Position, computed, parse_display, parse_position};
