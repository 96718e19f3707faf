//! mulesim-core: synthetic Pix/TED transaction datasets with embedded
//! money-mule laundering cycles, for training fraud-detection models.
//!
//! A run is a pure function of (seed, target rows, reference date):
//! population -> roles -> scenario loop -> labels. See `engine` for the
//! fixed draw order.

pub mod categorical;
pub mod clock;
pub mod config;
pub mod dataset;
pub mod emitter;
pub mod engine;
pub mod error;
pub mod event;
pub mod fraud_cycle_scenario;
pub mod labels;
pub mod noise_scenario;
pub mod normal_scenario;
pub mod population;
pub mod profile_fields;
pub mod rng;
pub mod roles;
pub mod scenario;
pub mod sink;
pub mod store;
pub mod summary;
pub mod types;
pub mod weighted;
