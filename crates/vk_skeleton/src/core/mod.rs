//! Core types shared across the skeleton

pub mod config;
