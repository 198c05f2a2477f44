//! # SpaceWars Game Server Library
//!
//! This library implements the authoritative server for the multiplayer
//! space-combat game. It owns the canonical world state, frames the custom
//! newline-delimited TCP protocol, applies client control strings, and
//! broadcasts a world snapshot to every connected client once per frame.
//!
//! ## Core Responsibilities
//!
//! ### Authoritative Simulation
//! The server runs the only real version of the game. Ships, projectiles
//! and stars exist in its tables alone; clients merely mirror the records
//! it broadcasts. All physics, collision, scoring and respawn decisions are
//! made here.
//!
//! ### Transport and Session Management
//! Clients speak a custom text protocol with no length prefix: messages are
//! newline-delimited and may arrive split or merged across TCP segments.
//! The framing layer reassembles complete messages per connection and the
//! dispatch layer advances each connection through its protocol stages
//! (name handshake, then command streaming).
//!
//! ### State Broadcasting
//! Every frame the simulation serializes the full entity state as tagged
//! JSON records and queues the batch to all registered connections.
//! Connections whose sockets fail are swept out, and their ships removed,
//! on the pass after the failure is observed.
//!
//! ## Architecture Design
//!
//! ### One Coarse Lock
//! The world tables and the client registry live behind a single mutex.
//! Message dispatch, the simulation tick and the broadcast all acquire that
//! one lock, which keeps every table access serialized without any lock
//! ordering concerns. Tick rate, not contention, is the throughput bound.
//!
//! ### Fixed-Cadence Tick
//! A dedicated task advances the world on a monotonic interval. A tick that
//! overruns its frame time is followed immediately by the next one; there
//! is no catch-up accounting, so load shows up as drift rather than bursts.
//!
//! ### Channel-Decoupled Writes
//! Socket writes never happen under the lock. Each connection has a writer
//! task draining an unbounded channel; the broadcast only queues text.
//!
//! ## Module Organization
//!
//! - [`config`]: every tunable the simulation needs, populated before the
//!   server starts.
//! - [`framing`]: per-connection reassembly of newline-delimited messages
//!   from arbitrary byte chunks.
//! - [`client_manager`]: the roster of handshake-complete clients, their
//!   outbound channels and failure accounting.
//! - [`game`]: the world tables and the per-frame simulation pass.
//! - [`ids`]: wrap-around id sequences for clients, ships, projectiles and
//!   stars.
//! - [`network`]: the TCP accept loop, per-connection session tasks and
//!   the simulation/broadcast loop.

pub mod client_manager;
pub mod config;
pub mod framing;
pub mod game;
pub mod ids;
pub mod network;
