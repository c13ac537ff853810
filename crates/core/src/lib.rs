//! # rk-core
//!
//! Core run orchestration and persistence for research-kit.
//!
//! This crate provides:
//! - Configuration loading from the `.research-kit/` directory
//! - The research pipeline controller and its run state machine
//! - A client for the external research service
//! - Bookmark persistence over a pluggable key-value layer
//!
//! ## Modules
//!
//! - [`config`]: Configuration loading and management
//! - [`engine`]: Pipeline controller driving the agent stages
//! - [`state`]: Run transitions and the observable query state
//! - [`service`]: Research service trait, HTTP client and mock
//! - [`storage`]: Key-value persistence backends
//! - [`bookmarks`]: Bookmark store over a key-value backend
//! - [`init`]: `.research-kit/` scaffolding

pub mod bookmarks;
pub mod config;
pub mod engine;
pub mod init;
pub mod service;
pub mod state;
pub mod storage;
