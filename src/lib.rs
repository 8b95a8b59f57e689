pub mod error;
pub mod report;
pub mod scanner;

// Re-export error types for convenience
pub use error::{ScanDiagnostic, ScanError};
