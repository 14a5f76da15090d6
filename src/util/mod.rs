// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Text utilities shared by the indexer and the query engine.

pub mod normalize;

pub use normalize::{normalize_token, Normalizer, StopWords};
