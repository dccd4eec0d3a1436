//! Pipeline stages for whiteboard analysis.
//!
//! Each submodule implements exactly one transformation step. Keeping stages
//! separate makes each independently testable and lets the coordinator in
//! [`crate::analyze`] stay a plain sequence of calls.
//!
//! ## Data Flow
//!
//! ```text
//! payload ──▶ normalize ──▶ extract ──▶ report
//! (data URL)  (base64)      (vision)    (language model)
//! ```
//!
//! 1. [`normalize`] — strip the data-URL prefix and decode base64 to bytes
//! 2. [`extract`]   — vision model reads the board into a literal transcript
//! 3. [`report`]    — language model turns the transcript (or, in
//!    single-stage mode, the image itself) into the sectioned brief
//!
//! Stages 2 and 3 each make one outbound call; stage 3 cannot start before
//! stage 2 finishes because its prompt embeds the transcript.

pub mod extract;
pub mod normalize;
pub mod report;
