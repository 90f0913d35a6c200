//! 数据访问层

pub mod audit_repo;
pub mod credential_repo;
pub mod document_repo;

pub use audit_repo::AuditRepository;
pub use credential_repo::CredentialRepository;
pub use document_repo::DocumentRepository;
