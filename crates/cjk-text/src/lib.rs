//! CJK Text - line breaking for mixed CJK and Latin text
//!
//! This crate provides:
//! - CJK character classification
//! - Break opportunities honouring punctuation rules (no line may start
//!   with closing punctuation or end with opening punctuation)
//! - Width-driven word wrapping with explicit line breaks
//!
//! # Example
//!
//! ```
//! use cjk_text::wrap_text;
//!
//! // One unit of width per character
//! let lines = wrap_text("朝聖之路，一段旅程", 4.0, |s| s.chars().count() as f64);
//! assert_eq!(lines, vec!["朝聖之", "路，一段", "旅程"]);
//! ```

mod linebreak;
mod wrap;

pub use linebreak::{
    can_break_between, find_break_points, is_cjk, is_no_break_after, is_no_break_before,
};
pub use wrap::{try_wrap_text, wrap_text};
