//! Party Ledger Service - unified, deduplicated party history and running balances.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod ledger;
pub mod middleware;
pub mod models;
pub mod services;
pub mod startup;
