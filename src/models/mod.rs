// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod matches;
pub mod prediction;
pub mod user;

pub use matches::Match;
pub use prediction::Prediction;
pub use user::{NewUser, User};
