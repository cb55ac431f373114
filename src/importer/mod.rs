// ==========================================
// Breather Advisor - Importer Layer
// ==========================================
// File parsing plus schema resolution. Everything downstream of this
// layer operates on typed domain values only.
// ==========================================

pub mod asset_loader;
pub mod catalog_loader;
pub mod error;
pub mod file_parser;

pub use asset_loader::{AssetLoader, SurveyData, CIRCULATING_TEMPLATES, SPLASH_TEMPLATES};
pub use catalog_loader::CatalogLoader;
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawTable, UniversalFileParser};
