pub mod dtos;
pub mod handlers;
pub mod pages;
pub mod prompt;
pub mod service;

pub use prompt::PromptTemplate;
pub use service::{AuditError, AuditReport, Auditor};
