//! sitedeploy library
//!
//! Verifies a static website's required files and publishes it to
//! GitHub Pages, Vercel or Netlify by driving their command line tools.

pub mod app;
pub mod deploy;
pub mod errors;
pub mod filesys;
pub mod logs;
pub mod models;
pub mod storage;
