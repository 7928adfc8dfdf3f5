//! Core modules: joint layouts, motion archives, conversion and output.

pub mod config;
pub mod convert;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod motion;
pub mod output;
pub mod table;
