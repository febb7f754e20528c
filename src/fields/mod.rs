//! Typed overlay form-field model.
//!
//! Six field kinds are supported: text, signature, checkbox, choice
//! (dropdown), radio, and radio group. Every concrete kind composes
//! [`FieldCommon`], the shared geometry/metadata block, so promoting a generic
//! field into a specific kind is a plain constructor taking `FieldCommon` by
//! value. That construction is total: it cannot fail regardless of the source
//! values.
//!
//! Field names are unique within a document and matched case-insensitively;
//! coordinates are normalized page fractions (see [`crate::geometry`]).

use crate::error::{Error, Result};
use crate::geometry::Rect;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

mod collection;

pub use collection::{PageFilter, PdfFields};

/// Geometry and metadata shared by every field kind.
///
/// Invariants: `rect.x` and `rect.y` lie in `[0, 1]` and `page >= 1`
/// (1-based page index). Constructors do not enforce them; use
/// [`FieldCommon::is_normalized`] where the caller needs the check.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldCommon {
    /// Field name, unique within a document (case-insensitive for matching)
    pub name: String,
    /// Human-readable description (empty if absent)
    pub description: String,
    /// Position and size in normalized page coordinates
    pub rect: Rect,
    /// Whether the field must be filled before signing completes
    pub mandatory: bool,
    /// 1-based page index
    pub page: u32,
}

impl FieldCommon {
    /// Create a new common block with an empty description and `mandatory`
    /// off.
    pub fn new(name: impl Into<String>, rect: Rect, page: u32) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            rect,
            mandatory: false,
            page,
        }
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the mandatory flag.
    pub fn with_mandatory(mut self, mandatory: bool) -> Self {
        self.mandatory = mandatory;
        self
    }

    /// Check the documented geometry invariant (`x`,`y` in `[0,1]`,
    /// `page >= 1`).
    pub fn is_normalized(&self) -> bool {
        self.rect.is_normalized() && self.page >= 1
    }
}

/// Semantic kind of a text field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextFieldType {
    /// Plain single-line text
    #[default]
    Text,
    /// Date input
    Date,
    /// Numeric input
    Number,
    /// Phone number
    Phone,
    /// Email address
    Email,
    /// Free-form input validated by a caller-supplied pattern
    Custom,
    /// Time of day
    Time,
    /// Multi-line text
    Multiline,
}

impl TextFieldType {
    /// Descriptor-string form of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            TextFieldType::Text => "Text",
            TextFieldType::Date => "Date",
            TextFieldType::Number => "Number",
            TextFieldType::Phone => "Phone",
            TextFieldType::Email => "Email",
            TextFieldType::Custom => "Custom",
            TextFieldType::Time => "Time",
            TextFieldType::Multiline => "Multiline",
        }
    }
}

/// A single- or multi-line text input field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    /// Shared geometry/metadata
    pub common: FieldCommon,
    /// Semantic kind of the field
    pub field_type: TextFieldType,
    /// Validation pattern; only meaningful when `field_type` is
    /// [`TextFieldType::Custom`]
    pub custom_pattern: Option<String>,
    /// Current value (empty when unfilled)
    pub value: String,
    /// Whether the field is hidden from the signer
    pub hidden: bool,
}

impl TextField {
    /// Promote a common block into a text field with an empty value.
    pub fn new(common: FieldCommon, field_type: TextFieldType) -> Self {
        Self {
            common,
            field_type,
            custom_pattern: None,
            value: String::new(),
            hidden: false,
        }
    }

    /// Set the value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    /// Set the custom validation pattern.
    pub fn with_custom_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.custom_pattern = Some(pattern.into());
        self
    }

    /// Validate the current value against the field kind.
    ///
    /// An empty value is valid unless the field is mandatory. `Custom` fields
    /// are checked against `custom_pattern` (a missing pattern accepts
    /// everything); a pattern that fails to compile is an
    /// [`Error::InvalidPattern`]. `Number`, `Email`, and `Phone` use built-in
    /// shape checks; the remaining kinds accept any text.
    pub fn validate_value(&self) -> Result<bool> {
        if self.value.is_empty() {
            return Ok(!self.common.mandatory);
        }
        match self.field_type {
            TextFieldType::Custom => match &self.custom_pattern {
                Some(pattern) => {
                    let re = regex::Regex::new(pattern).map_err(|e| Error::InvalidPattern {
                        field: self.common.name.clone(),
                        reason: e.to_string(),
                    })?;
                    Ok(re.is_match(&self.value))
                },
                None => Ok(true),
            },
            TextFieldType::Number => Ok(self.value.trim().parse::<f64>().is_ok()),
            TextFieldType::Email => {
                Ok(self.value.contains('@') && self.value.contains('.'))
            },
            TextFieldType::Phone => Ok(self
                .value
                .chars()
                .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))),
            _ => Ok(true),
        }
    }
}

/// How a signature is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SigningType {
    /// Hand-drawn or uploaded graphic signature
    #[default]
    Graphic,
    /// Server-side certificate signature
    Server,
    /// Smart-card signature
    SmartCard,
}

impl SigningType {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SigningType::Graphic => "Graphic",
            SigningType::Server => "Server",
            SigningType::SmartCard => "SmartCard",
        }
    }
}

/// Visual kind of a signature field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SignatureKind {
    /// Full signature
    #[default]
    Simple,
    /// Initials-only signature
    Initials,
}

impl SignatureKind {
    /// Stable string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            SignatureKind::Simple => "Simple",
            SignatureKind::Initials => "Initials",
        }
    }
}

/// A signature placement field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureField {
    /// Shared geometry/metadata
    pub common: FieldCommon,
    /// Base64-encoded signature image; empty means unsigned
    pub image: String,
    /// How the signature is produced
    pub signing_type: SigningType,
    /// Visual kind of the signature
    pub kind: SignatureKind,
}

impl SignatureField {
    /// Promote a common block into an unsigned signature field.
    ///
    /// `signing_type` and `kind` always start at their defaults
    /// (`Graphic`/`Simple`) regardless of where the common block came from.
    pub fn new(common: FieldCommon) -> Self {
        Self {
            common,
            image: String::new(),
            signing_type: SigningType::default(),
            kind: SignatureKind::default(),
        }
    }

    /// Set the signing type.
    pub fn with_signing_type(mut self, signing_type: SigningType) -> Self {
        self.signing_type = signing_type;
        self
    }

    /// Set the signature kind.
    pub fn with_kind(mut self, kind: SignatureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Whether a signature image has been attached.
    pub fn is_signed(&self) -> bool {
        !self.image.is_empty()
    }

    /// Attach a raw signature image, storing it base64-encoded.
    pub fn attach_image(&mut self, bytes: &[u8]) {
        self.image = BASE64.encode(bytes);
    }

    /// Decode the attached image. Returns an empty buffer when unsigned.
    pub fn image_bytes(&self) -> Result<Vec<u8>> {
        if self.image.is_empty() {
            return Ok(Vec::new());
        }
        BASE64
            .decode(&self.image)
            .map_err(|e| Error::Image(e.to_string()))
    }

    /// Whether the field occupies a visible area on its page.
    ///
    /// Zero-sized widgets are treated as hidden. The coordinate check pairs
    /// the x lower bound with the y upper bound; both are part of the stable
    /// contract of the page filters.
    pub fn occupies_page_area(&self) -> bool {
        let r = &self.common.rect;
        r.width > 0.0 && r.height > 0.0 && r.x >= 0.0 && r.y <= 1.0
    }
}

/// A checkbox field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckBoxField {
    /// Shared geometry/metadata
    pub common: FieldCommon,
    /// Whether the box is checked
    pub checked: bool,
}

impl CheckBoxField {
    /// Promote a common block into an unchecked checkbox.
    pub fn new(common: FieldCommon) -> Self {
        Self {
            common,
            checked: false,
        }
    }

    /// Set the checked state.
    pub fn with_checked(mut self, checked: bool) -> Self {
        self.checked = checked;
        self
    }
}

/// A dropdown/choice field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceField {
    /// Shared geometry/metadata
    pub common: FieldCommon,
    /// Selectable options, in declaration order
    pub options: Vec<String>,
    /// The selected option; empty means no selection
    pub selected_option: String,
}

impl ChoiceField {
    /// Promote a common block into a choice field with no selection.
    pub fn new(common: FieldCommon, options: Vec<String>) -> Self {
        Self {
            common,
            options,
            selected_option: String::new(),
        }
    }

    /// Set the selected option.
    pub fn with_selected_option(mut self, option: impl Into<String>) -> Self {
        self.selected_option = option.into();
        self
    }

    /// Invariant check: the selection, if any, must be one of the options.
    pub fn selection_is_valid(&self) -> bool {
        self.selected_option.is_empty() || self.options.contains(&self.selected_option)
    }
}

/// One radio button belonging to a [`RadioGroupField`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RadioField {
    /// Shared geometry/metadata
    pub common: FieldCommon,
    /// The option's value/label
    pub value: String,
}

impl RadioField {
    /// Promote a common block into a radio button with an empty value.
    pub fn new(common: FieldCommon) -> Self {
        Self {
            common,
            value: String::new(),
        }
    }

    /// Set the option value.
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }
}

/// A named set of mutually exclusive radio buttons, potentially spanning
/// multiple pages.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RadioGroupField {
    /// Group identifier
    pub name: String,
    /// Member radio buttons, in declaration order
    pub radios: Vec<RadioField>,
    /// Name of the selected member; empty means none selected
    pub selected_radio_name: String,
}

impl RadioGroupField {
    /// Create an empty group with no selection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            radios: Vec::new(),
            selected_radio_name: String::new(),
        }
    }

    /// The selected member radio, if any.
    pub fn selected_radio(&self) -> Option<&RadioField> {
        if self.selected_radio_name.is_empty() {
            return None;
        }
        self.radios
            .iter()
            .find(|r| r.common.name == self.selected_radio_name)
    }

    /// Invariant check: a non-empty selection must name a member radio.
    pub fn selection_is_valid(&self) -> bool {
        self.selected_radio_name.is_empty() || self.selected_radio().is_some()
    }
}
