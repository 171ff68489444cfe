//! # Configuration Module
//!
//! This module provides configuration structures and validation for the
//! optimize and scale operations.

pub mod config;

pub use config::{OptimizeConfig, ScaleConfig, clamp_svg_scale, with_webp_extension};
