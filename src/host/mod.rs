//! A minimal documentation host: source scanning and incremental builds.

pub mod builder;
pub mod scanner;

pub use builder::{incremental_build, BuildReport, Builder, Unresolved};
pub use scanner::{scan, DirectiveUse, RoleUse, ScannedDocument};
