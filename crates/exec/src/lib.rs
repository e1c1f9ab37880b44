// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rangewire-exec: safe execution wrapper around the range management CLI
//!
//! Structured parameters go through the [`builder`], the resulting argv is
//! run by a [`ProcessRunner`], and the captured output is turned into a
//! uniform [`ToolResult`](rangewire_core::ToolResult) by [`normalize`].

pub mod builder;
pub mod classify;
pub mod executor;
pub mod facade;
pub mod normalize;

#[cfg(any(test, feature = "test-support"))]
pub mod fake;

pub use builder::{ArgumentBuilder, BuildError, OptionKind, OptionSpec, Operation};
pub use classify::classify;
pub use executor::{ExecError, ProcessExecutor, ProcessRunner};
pub use facade::{DeployOptions, RangeCli};
pub use normalize::normalize;

#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeRunner, RunCall};
