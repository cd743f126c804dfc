// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - external clients and static configuration.

pub mod catalog;
pub mod google;

pub use catalog::MatchCatalog;
pub use google::{GoogleClient, GoogleIdentity};
