//! Image encoder abstraction
//!
//! The export core never encodes pixels itself; it hands the document to a
//! [`CompositeEncoder`] with the per-run [`EncodeOptions`](crate::domain::EncodeOptions).

pub mod command;
pub mod dry_run;
pub mod traits;

pub use command::CommandEncoder;
pub use dry_run::DryRunEncoder;
pub use traits::CompositeEncoder;
