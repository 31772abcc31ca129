//! String resource catalogue: data model, `.ts` reader and writer.

/// Assembly and load-time validation
mod builder;
/// Load-time data-quality diagnostics
mod diagnostic;
/// `.ts` document reader
mod loader;
/// Contexts, units and lookup index
mod model;
/// `.ts` document writer
mod writer;

pub use builder::{
    CatalogueBuilder,
    LoadOptions,
    LoadOutcome,
};
pub use diagnostic::{
    Diagnostic,
    DiagnosticKind,
    Severity,
};
pub use loader::{
    LoadError,
    load_file,
    load_str,
};
pub use model::{
    Catalogue,
    ContextGroup,
    DEFAULT_FORMAT_VERSION,
    TranslationUnit,
};
pub use writer::{
    WriteError,
    write_file,
    write_string,
};
