pub mod config;
pub mod controller;
pub mod japanese;
pub mod tokenize;
pub mod tooltip;

pub use crate::config::ScanConfig;
pub use crate::controller::{Controller, ScanOutcome, TokenizeRequest};
pub use crate::japanese::{contains_japanese, is_japanese_char};
pub use crate::tokenize::{
    DictionaryEntry, Token, TokenizeError, TokenizeResult, Tokenizer, validate_tokenize_args,
};
pub use crate::tooltip::{TooltipAnchor, TooltipPlacement, anchor_for};
