//! Infrastructure layer for the chat relay.
//!
//! Contains the reqwest-backed implementations of the ports defined in
//! `chatrelay-core`: upstream adapters for the conversational API, the HTTP
//! client the chat front-end uses to reach the relay, and configuration
//! loading from a TOML file and the environment.

pub mod config;
pub mod relay_client;
pub mod upstream;
