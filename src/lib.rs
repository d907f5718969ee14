//! ColorHeart Can: color-psychology career diagnosis with an AI-written
//! report.

pub mod catalog;
pub mod cli;
pub mod color;
pub mod config;
pub mod diagnosis;
pub mod error;
pub mod export;
pub mod llm;
pub mod render;
pub mod report;
pub mod session;
