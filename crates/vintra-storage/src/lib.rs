// SPDX-FileCopyrightText: 2026 Vintra Studio
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite persistence for the Vintra support backend.
//!
//! A single tokio-rusqlite connection serializes all writes through one
//! background thread; every mutating operation is one `call` closure, so the
//! traits' atomicity guarantees hold without caller-side locking. Schema is
//! managed by embedded refinery migrations.

pub mod adapter;
pub mod database;
pub mod migrations;
pub mod queries;

pub use adapter::SqliteStorage;
pub use database::Database;
