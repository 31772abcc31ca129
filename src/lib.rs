//! ts-catalogue
//!
//! Qt Linguist (`.ts`) 翻訳カタログの読み込みと文字列解決

pub mod active;
pub mod catalogue;
pub mod cli;
pub mod config;
pub mod indexer;
pub mod language;
pub mod plural;
pub mod resolver;
pub mod types;

pub use active::{
    ActiveCatalogue,
    CatalogueStack,
};
pub use catalogue::{
    Catalogue,
    LoadOptions,
    load_file,
    load_str,
};
pub use resolver::{
    Query,
    Resolution,
    ResolveOutcome,
    Resolver,
};
