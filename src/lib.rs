//! Item-item and user-user collaborative filtering over a dense user × item
//! interaction matrix, with a held-out true-positive-rate sweep and a
//! Kendall tau comparison against externally produced baseline rankings.

pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod models;
pub mod services;
pub mod telemetry;
