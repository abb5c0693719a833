//! Empathy AI - Emotion-Aware Conversational Backend
//!
//! This crate classifies the emotion behind each user message and uses it
//! to steer response generation, falling back to an emotion-keyed template
//! bank whenever the generation provider cannot answer.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
