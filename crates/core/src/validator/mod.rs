//! Schema validation for metadata documents.
//!
//! Validates one XML document against one fixed XSD schema. Findings are
//! classified warning or error; the first error-level finding aborts
//! validation (callers rely on halt-on-first-error). A document that is not
//! well-formed XML is reported as a parse failure, distinct from a finding.
//!
//! XSD validation is backed by libxml2 through FFI; the Rust ecosystem has
//! no mature pure-Rust XML Schema validator.

mod error;
mod libxml2;
mod traits;
mod types;
mod xsd;

pub use error::ValidatorError;
pub use traits::SchemaValidator;
pub use types::{Finding, Severity};
pub use xsd::XsdValidator;
