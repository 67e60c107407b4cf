//! # Vault Architecture
//!
//! Vault is a small personal record store: named values with creation and
//! update times, kept either in a local JSON file or in a remote document
//! collection. The library is UI-agnostic; the `vault` binary is one client.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (binary: cli/, main.rs)                          │
//! │  - One-shot subcommands and the interactive menu            │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Parses ids and sort options for the active backend       │
//! │  - Writes backups after successful mutations                │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs) + Query Engine (query.rs)    │
//! │  - One function per operation, returns CmdResult            │
//! │  - Search, sort and statistics over snapshots               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - RecordStore trait                                        │
//! │  - FileStore / InMemoryStore (local), RemoteStore (remote)  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Files are only touched by the store backends, the backup
//! writer and the export command.
//!
//! ## Module Overview
//!
//! - [`api`]: Facade used by every UI
//! - [`commands`]: Per-operation logic
//! - [`query`]: Search, sort, statistics
//! - [`store`]: Storage abstraction and backends
//! - [`backup`]: Snapshot writer
//! - [`config`]: `config.json` and environment overrides
//! - [`model`]: Records, ids, timestamps
//! - [`error`]: Error types

pub mod api;
pub mod backup;
pub mod commands;
pub mod config;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
