//! Deployment module

pub mod backend;
pub mod deployer;
pub mod git;
pub mod hosted;
pub mod prereqs;
pub mod runner;
