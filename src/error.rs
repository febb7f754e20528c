//! Error types for the overlay-fields library.
//!
//! This module defines all error types that can occur while parsing field
//! descriptors and binding them to placeholder coordinates.

use std::fmt;

/// Result type alias for overlay-fields operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during descriptor translation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A declared field has no matching physical placeholder.
    ///
    /// This is the primary validation contract of the resolver: every declared
    /// field must have a corresponding placeholder unless the caller opted
    /// into skip-validation mode. Carries [`ErrorCode::XmlPlaceholderMismatch`]
    /// so the surrounding application can render a localized message.
    #[error("No placeholder matches declared field '{0}'")]
    PlaceholderMismatch(String),

    /// A descriptor `Type` value is not in the known field-kind set.
    #[error("Unknown field type: '{0}'")]
    UnknownFieldType(String),

    /// A descriptor `Type` value parsed to a kind that is not valid at the
    /// top level (e.g. a group kind on a plain `Field` element).
    #[error("Field type '{0}' is not valid for a top-level field")]
    UnsupportedFieldType(String),

    /// A flag attribute carried a non-empty value that is not a boolean.
    #[error("Invalid boolean value '{value}' for attribute {attribute}")]
    InvalidBoolean {
        /// Attribute name (`IsMandatory`, `IsChecked`, `IsSelected`)
        attribute: String,
        /// The offending raw value
        value: String,
    },

    /// A choice group declared no child with `IsSelected="true"`.
    #[error("Choice group '{0}' has no selected option")]
    MissingSelection(String),

    /// Structurally invalid field-descriptor document
    #[error("Invalid field descriptor: {0}")]
    InvalidDescriptor(String),

    /// XML reader/writer error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A custom text-field pattern failed to compile.
    #[error("Invalid pattern on field '{field}': {reason}")]
    InvalidPattern {
        /// Field name carrying the pattern
        field: String,
        /// Compilation failure detail
        reason: String,
    },

    /// Signature image error (invalid base64 payload)
    #[error("Signature image error: {0}")]
    Image(String),
}

impl Error {
    /// The enumerable code for this error, if it has one.
    ///
    /// Only descriptor-level validation failures carry codes; programming and
    /// IO errors do not.
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            Error::PlaceholderMismatch(_) => Some(ErrorCode::XmlPlaceholderMismatch),
            Error::InvalidDescriptor(_) | Error::Xml(_) => Some(ErrorCode::InvalidXml),
            _ => None,
        }
    }
}

/// Enumerable error codes shared with the surrounding application.
///
/// Codes travel on the wire as their decimal string form, so every variant
/// pins an explicit discriminant; reordering variants must never change a
/// rendered code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum ErrorCode {
    /// Malformed or structurally invalid descriptor XML
    InvalidXml = 46,
    /// Declared field without a matching placeholder
    XmlPlaceholderMismatch = 47,
}

impl ErrorCode {
    /// Render the code in its wire form (decimal string).
    pub fn as_numeric_string(&self) -> String {
        (*self as u32).to_string()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", *self as u32)
    }
}
