// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! rangewire-core: data model shared by the range CLI wrapper and its host

pub mod command;
pub mod config;
pub mod env;
pub mod kind;
pub mod outcome;
pub mod result;

pub use command::Command;
pub use config::{ConfigError, TimeoutProfile, WrapperConfig};
pub use kind::ErrorKind;
pub use outcome::{ExecutionOutcome, Interruption};
pub use result::ToolResult;
