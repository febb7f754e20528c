//! # Overlay Fields
//!
//! Typed overlay form-field model and placeholder resolver for PDF
//! e-signature workflows.
//!
//! A signing document carries two independent descriptions of its form
//! fields:
//!
//! - a **field descriptor** (XML, root `PDFMetaData`) declaring each field's
//!   kind, name, and static attributes, and
//! - **placeholder coordinates** extracted from the rendered document by a
//!   PDF collaborator: parenthesis/color-marked tokens with normalized
//!   page-fraction geometry.
//!
//! This crate binds the two. The resolver matches every declaration to a
//! coordinate by name (case-insensitive, first match wins) and produces a
//! [`PdfFields`] aggregate, which downstream signing, rendering, and
//! persistence code merges, filters by page, and serializes.
//!
//! ## Quick start
//!
//! ```
//! use overlay_fields::{FieldCoordinate, PdfMetaData, PageFilter};
//! use overlay_fields::geometry::Rect;
//!
//! # fn main() -> overlay_fields::Result<()> {
//! let descriptor = PdfMetaData::from_xml(
//!     r#"<PDFMetaData><Fields>
//!         <Field Type="Text" Fieldname="Name" IsMandatory="true"/>
//!     </Fields></PDFMetaData>"#,
//! )?;
//!
//! let placeholders = vec![FieldCoordinate::new(
//!     "Name",
//!     Rect::new(0.1, 0.2, 0.3, 0.05),
//!     1,
//! )];
//!
//! let fields = descriptor.to_pdf_fields(&placeholders, false)?;
//! assert_eq!(fields.total_fields(), 1);
//!
//! let page1 = fields.fields_on_page(1, PageFilter::default());
//! assert_eq!(page1.text_fields[0].common.name, "Name");
//! # Ok(())
//! # }
//! ```
//!
//! The core is a pure, synchronous data transformation: no I/O beyond the
//! optional [`PdfMetaData::from_path`] helper, no shared state, and it is
//! safe to invoke concurrently with per-call inputs.

#![warn(missing_docs)]

// Error handling
pub mod error;

// Normalized page-space geometry
pub mod geometry;

// Field model and the PdfFields aggregate
pub mod fields;

// XML field-descriptor model
pub mod descriptor;

// Descriptor-to-coordinate binding
pub mod resolver;

// Fields document export
mod xml;

// Re-exports
pub use descriptor::{FieldDescriptor, GroupDescriptor, PdfMetaData};
pub use error::{Error, ErrorCode, Result};
pub use fields::{
    CheckBoxField, ChoiceField, FieldCommon, PageFilter, PdfFields, RadioField, RadioGroupField,
    SignatureField, SignatureKind, SigningType, TextField, TextFieldType,
};
pub use geometry::{Point, Rect};
pub use resolver::{FieldCoordinate, FieldKind};

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
