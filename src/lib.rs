//! In-memory merchant administration.
//!
//! This crate holds a list of merchant records and the view state of an
//! admin page over them: case-insensitive search, single-field sorting,
//! fixed-size pagination, create/edit forms with field validation, and a
//! two-step delete confirmation. Nothing is persisted; every session starts
//! from the same seed data.
//!
//! The entry point is [`controller::MerchantList`].

extern crate alloc;

pub mod controller;
pub mod error;
pub mod form;
pub mod models;
pub mod query;
pub mod storage;
