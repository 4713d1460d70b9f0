//! Hover-scan engine for Japanese text in host-rendered documents: point at
//! a character, get back the token under it, its dictionary status, and
//! where a tooltip should go.
//!
//! This crate is a facade over the workspace members; hosts embed it and
//! provide the two outward seams themselves, a [`geometry::TextGeometry`]
//! answering from their layout and an [`engine::Tokenizer`] (or the
//! request/complete halves of [`engine::Controller`] for out-of-process
//! tokenizers).

pub use dom;
pub use engine;
pub use geometry;
pub use highlight;
pub use scan;
pub use style;

pub use engine::{Controller, ScanConfig, ScanOutcome, TokenizeRequest};
pub use highlight::{EnvCapabilities, for_env};
