//! Shared contracts between backend and frontend.
//!
//! Everything here is pure: no I/O, no async, compiled both natively and to WASM.
//! - `domain`: aggregates (pallet, location QR, pallet QR) and their DTOs
//! - `shared`: warehouse layout, location scheme, stats, grid, QR payloads, events

pub mod domain;
pub mod shared;
