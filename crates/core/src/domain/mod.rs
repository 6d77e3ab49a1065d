// Domain Layer - Request/result value objects, diagnostics and schema

pub mod diagnostic;
pub mod error;
pub mod request;
pub mod result;
pub mod schema;

// Re-exports
pub use diagnostic::{AttributePath, Diagnostic, Severity};
pub use error::DomainError;
pub use request::ExecutionRequest;
pub use result::{ExecutionResult, RESULT_ID};
pub use schema::{AttributeKind, DataSourceSchema, SchemaAttribute};
