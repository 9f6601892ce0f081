//! School Hub library
//!
//! Core of the School Hub student organizer: the persisted document, the
//! commands that change it, the views derived from it and the services
//! around it. The binary is a thin command-line front end over this crate.

pub mod app;
pub mod config;
pub mod error;
pub mod services;
pub mod storage;
pub mod store;
pub mod views;
