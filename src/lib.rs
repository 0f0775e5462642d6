pub mod agent;
pub mod algorithm;
pub mod common;
pub mod config;
pub mod maze;
pub mod mdp;
pub mod stat;
