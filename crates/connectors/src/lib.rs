//! Leaf translators for the bundled backends.
//!
//! Both connectors are driven by a [`Capabilities`] table: anything the
//! table leaves out is reported as not expressible, and the translation
//! engine widens it to "everything".

pub mod capabilities;
pub mod error;
pub mod memory;
pub mod sql;

pub use capabilities::Capabilities;
pub use error::ConnectorError;
