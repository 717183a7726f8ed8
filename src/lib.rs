//! Client for the translate web app's batched-RPC endpoint
//!
//! Encodes a translate call the way the browser app does, sends it, and digs
//! the translation out of the line-oriented response stream, which is not
//! valid JSON as a whole and carries its payload doubly JSON-encoded.

pub mod error;
pub mod languages;
pub mod models;
pub mod rpc;
pub mod translator;
pub mod transport;

pub use error::{Error, Result};
pub use models::{Config, Detected, StatusPolicy, Translated, TranslatedPart};
pub use translator::Translator;
