//! Core library for turning email signatures into contacts.
//!
//! This crate provides:
//! - Markup-to-text normalization of message bodies
//! - French phone number extraction
//! - Full-name guessing from signature blocks
//! - Contact record derivation and, with the `client` feature, the
//!   contact-creation API client and scan/create actions

pub mod error;
pub mod extract;
pub mod markup;
pub mod models;

#[cfg(feature = "client")]
pub mod actions;
#[cfg(feature = "client")]
pub mod client;

pub use error::{NormalizeError, Result, SigcardError};
pub use extract::rules::{extract_phone_fr, guess_full_name};
pub use extract::{scan, ContactExtractor, ScanReport, SignatureScanner};
pub use markup::{normalize, MarkupConverter, RawBody};
pub use models::config::SigcardConfig;
pub use models::contact::{ContactRecord, CreatedContact, ExtractionResult, FieldEdits, SenderIdentity};

#[cfg(feature = "client")]
pub use actions::{create_contact, scan_message, ActionStatus};
#[cfg(feature = "client")]
pub use client::{AccessToken, ContactsApi, GraphContactsClient, StaticTokenProvider, TokenProvider};
