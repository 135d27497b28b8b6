//! Daily Art: caption compiler and publisher for daily painting posts.
//!
//! Turns a narrative [`post::Post`] into a Telegram photo caption: plain text
//! with all markup stripped plus style entities addressed in UTF-16 code
//! units. Delivery goes through the [`telegram::CaptionSink`] seam.
//!
//! See `DESIGN.md` for the module map.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod caption;
pub mod config;
pub mod logging;
pub mod post;
pub mod telegram;
