//! RouterOS network-configuration compiler.
//!
//! Turns a structured description of a router's desired network state into a
//! device-ready RouterOS script. The input is a [`model::TopologyModel`]
//! exported by a provisioning wizard: WAN uplinks, VLAN segments, per-port
//! access/trunk assignments, policy-routing intents and a DNS policy. The
//! output is one ordered, ASCII, newline-delimited script.
//!
//! # Architecture
//!
//! Data flows one way, and every stage is a pure function of its inputs:
//!
//! ## Input
//!
//! - [`model`]: Topology model types (serde, TOML or JSON)
//! - [`input`]: Model loading by file extension
//! - [`profile`]: Site-wide emitter constants (embedded default or file)
//!
//! ## Validation
//!
//! - [`validate`]: Structural invariants, reported as [`error::ModelError`]
//! - [`verify`]: Error/warning report used by the `verify` command
//!
//! ## Planning
//!
//! - [`plan::vlans`]: Bridge ports and per-VLAN tagged membership
//! - [`plan::failover`]: Routing tables, probe host routes, recursive and
//!   backup default routes per uplink
//! - [`plan::policy`]: Routing marks steering a network into an uplink's table
//!
//! ## Emission
//!
//! - [`emit`]: Eight fixed sections built from the model and plan
//! - [`compile`]: Validate → plan → emit → write, in one call
//! - [`report`]: Terminal rendering of plans and script summaries
//!
//! # Examples
//!
//! ```ignore
//! use chrono::Utc;
//! use ros_topology::compile::{compile, CompileOptions};
//! use ros_topology::input::load_model;
//! use ros_topology::profile::embedded_profile;
//!
//! let model = load_model("site.toml".as_ref())?;
//! let out = compile(&model, &embedded_profile(), CompileOptions::at(Utc::now()))?;
//! print!("{}", out.text);
//! ```
//!
//! # Built on ros-script-core
//!
//! Command construction, value quoting and the ASCII-safe writer live in
//! `ros-script-core`. All topology-specific logic is contained in this crate.

pub mod compile;
pub mod emit;
pub mod error;
pub mod input;
pub mod model;
pub mod plan;
pub mod profile;
pub mod report;
pub mod validate;
pub mod verify;

#[cfg(test)]
pub(crate) mod test_support;
