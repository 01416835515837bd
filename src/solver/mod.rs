//! Brute-force multi-objective solver.
//!
//! Enumerates every candidate of a [`ProblemDefinition`](crate::problem::ProblemDefinition),
//! evaluates each one, and keeps the constrained-Pareto-optimal set.
//!
//! # Key Types
//!
//! - [`SolverConfig`]: size guards, parallelism, and seeding
//! - [`BruteForceRunner`]: executes a run
//! - [`BruteForceResult`]: archive plus run statistics

mod config;
mod runner;

pub use config::SolverConfig;
pub use runner::{solve, BruteForceResult, BruteForceRunner};
