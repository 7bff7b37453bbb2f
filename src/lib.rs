//! # Introduction
//!
//! framedump opens a dump of stack frames captured when a program failed and lets
//! you walk through them after the fact: move between frames, read the source
//! around each one, and inspect the globals and locals it held.
//!
//! ## Pipeline
//!
//! ```text
//! JSON dump → FrameStore → Session (cursor + namespace) → Shell (TUI or console)
//! ```
//!
//! 1. [`dump`]: decodes the dump file into an immutable [`dump::FrameStore`].
//! 2. [`source`]: reads source files and renders the window around a frame.
//! 3. [`session`]: the navigation cursor, the namespace projected from the current
//!    frame, and the frame listing.
//! 4. [`shell`]: the ratatui TUI and the rustyline console that drive a session.
//! 5. [`cli`], [`config`], [`logging`]: command-line flags, session settings, and
//!    the `tracing` subscriber.
//!
//! Errors are typed per layer in [`error`].

pub mod cli;
pub mod config;
pub mod dump;
pub mod error;
pub mod logging;
pub mod session;
pub mod shell;
pub mod source;
