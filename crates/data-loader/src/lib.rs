//! # Data Loader Crate
//!
//! This crate loads the user catalog and the target username that drive a
//! recommendation run.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (User, RatedTitles, Catalog, CatalogLimits)
//! - **parser**: Read the target file and the catalog file (JSON)
//! - **index**: Build a Catalog from raw, possibly malformed, user records
//! - **error**: Error types for data loading
//!
//! ## Example Usage
//!
//! ```ignore
//! use data_loader::{parser, CatalogLimits};
//! use std::path::Path;
//!
//! let target = parser::parse_target(Path::new("Fichiers_json/target_user.json"))?;
//! let catalog = parser::parse_catalog(
//!     Path::new("Fichiers_json/ListeUtilisateurs.json"),
//!     CatalogLimits::default(),
//! )?;
//!
//! if let Some((_, user)) = catalog.find_by_username(&target) {
//!     println!("{} rated {} titles", user.username, user.rated_titles.len());
//! }
//! ```

// Public modules
pub mod error;
pub mod types;
pub mod parser;
pub mod index;

// Re-export commonly used types for convenience
pub use error::{DataLoadError, Result};
pub use types::{
    // Type aliases and constants
    UserId,
    DEFAULT_USERNAME,
    // Core types
    User,
    RatedTitles,
    Catalog,
    CatalogLimits,
    LoadReport,
};
