//! Cheap flight search server.
//!
//! A web service that answers: "where can I fly from these airports,
//! within these dates, for less than this much?" Results stream back to
//! the browser as they are found.

pub mod airports;
pub mod config;
pub mod domain;
pub mod fares;
pub mod search;
pub mod web;
