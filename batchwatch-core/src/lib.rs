//! Batchwatch Core
//!
//! Core types shared by the batch monitor and the operator CLI.
//!
//! This crate contains:
//! - Domain types: the monitored batch job and its local state
//! - DTOs: wire documents exchanged with the batch API and the storage endpoint
//! - Manifest: the static list of batch jobs to watch

pub mod domain;
pub mod dto;
pub mod manifest;
