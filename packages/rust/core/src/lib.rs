//! Core build logic for the localized site search index.
//!
//! This crate turns the site's static data (tool catalog, standards manifest,
//! reference tables) and content tree (blog, guides, glossary) into one
//! `search-index.<locale>.json` per locale, after enforcing the standards
//! manifest and tool-doc contracts (see [`pipeline::build`]).

pub mod assembler;
pub mod catalog;
pub mod content_items;
pub mod data;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod standards;
pub mod tables;
pub mod tool_doc;
pub mod validator;
