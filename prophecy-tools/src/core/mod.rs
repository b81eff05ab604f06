// Copyright 2025, Prophecy Sunya
// For licensing, see https://github.com/prophecy-sunya/prophecy-sunya/blob/main/licenses/COPYRIGHT.md

pub mod account;
pub mod artifacts;
pub mod build;
pub mod config;
pub mod deployment;
pub mod diagnostics;
pub mod manifest;
pub mod message;
pub mod node;
pub mod resolver;
pub mod role;
