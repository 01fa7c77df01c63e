mod revision_catalog;

pub use revision_catalog::RevisionCatalog;
