//! Placeholder resolution: binding field descriptors to physical coordinates.
//!
//! A rendering collaborator scans a document for placeholder tokens and hands
//! this module a list of [`FieldCoordinate`]s. The resolver walks a parsed
//! [`PdfMetaData`] descriptor tree, matches every declaration to a coordinate
//! by name (case-insensitive, first match wins), and produces a populated
//! [`PdfFields`] aggregate.
//!
//! Translation either fully succeeds or fails outright. The single escape
//! hatch is `skip_validation`: with it set, a declaration without a matching
//! placeholder is silently omitted instead of raising
//! [`Error::PlaceholderMismatch`]. All other failures (unknown field kinds,
//! malformed flag values, a choice group without a selection) are fatal.

use crate::descriptor::{parse_flag, GroupDescriptor, PdfMetaData};
use crate::error::{Error, Result};
use crate::fields::{
    CheckBoxField, ChoiceField, FieldCommon, PdfFields, RadioField, RadioGroupField,
    SignatureField, SigningType, TextField, TextFieldType,
};
use crate::geometry::Rect;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// Physical placement of one placeholder found in a rendered page.
///
/// Produced by the text-extraction collaborator; the resolver only reads the
/// label, geometry, and page. The rendering metadata travels along untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldCoordinate {
    /// The placeholder's matched label, keyed against field names
    pub text: String,
    /// Position and size in normalized page coordinates
    pub rect: Rect,
    /// 1-based page index
    pub page: u32,
    /// Color of the placeholder text, if the extractor recorded it
    pub text_color: Option<String>,
    /// Font of the placeholder text
    pub font_name: Option<String>,
    /// Size of the placeholder text
    pub text_size: Option<f32>,
}

impl FieldCoordinate {
    /// Create a coordinate without rendering metadata.
    pub fn new(text: impl Into<String>, rect: Rect, page: u32) -> Self {
        Self {
            text: text.into(),
            rect,
            page,
            text_color: None,
            font_name: None,
            text_size: None,
        }
    }
}

/// The known field-kind tags a descriptor `Type` attribute may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Plain text input
    Text,
    /// Date input
    Date,
    /// Numeric input
    Number,
    /// Phone number input
    Phone,
    /// Email input
    Email,
    /// Pattern-validated input
    Custom,
    /// Time input
    Time,
    /// Multi-line input
    Multiline,
    /// Checkbox
    Checkbox,
    /// Server-side certificate signature
    ServerSignature,
    /// Hand-drawn graphic signature
    GraphicSignature,
    /// Smart-card signature
    SmartCardSignature,
    /// Radio button group (group level only)
    RadioGroup,
    /// Dropdown group (group level only)
    ChoiceGroup,
}

impl FieldKind {
    /// Parse a descriptor type tag, case-insensitively.
    ///
    /// The mapping is an explicit table; strings outside it are a fatal
    /// [`Error::UnknownFieldType`].
    pub fn parse(raw: &str) -> Result<Self> {
        let kind = match raw.trim().to_ascii_lowercase().as_str() {
            "text" => FieldKind::Text,
            "date" => FieldKind::Date,
            "number" => FieldKind::Number,
            "phone" => FieldKind::Phone,
            "email" => FieldKind::Email,
            "custom" => FieldKind::Custom,
            "time" => FieldKind::Time,
            "multiline" => FieldKind::Multiline,
            "checkbox" => FieldKind::Checkbox,
            "server_signature" => FieldKind::ServerSignature,
            "graphic_signature" => FieldKind::GraphicSignature,
            "smartcard_signature" => FieldKind::SmartCardSignature,
            "radiogroup" => FieldKind::RadioGroup,
            "choicegroup" => FieldKind::ChoiceGroup,
            _ => return Err(Error::UnknownFieldType(raw.to_string())),
        };
        Ok(kind)
    }

    /// The text-field kind this tag maps to, if it is a text kind.
    fn text_field_type(self) -> Option<TextFieldType> {
        match self {
            FieldKind::Text => Some(TextFieldType::Text),
            FieldKind::Date => Some(TextFieldType::Date),
            FieldKind::Number => Some(TextFieldType::Number),
            FieldKind::Phone => Some(TextFieldType::Phone),
            FieldKind::Email => Some(TextFieldType::Email),
            FieldKind::Custom => Some(TextFieldType::Custom),
            FieldKind::Time => Some(TextFieldType::Time),
            FieldKind::Multiline => Some(TextFieldType::Multiline),
            _ => None,
        }
    }

    /// The signing type this tag maps to, if it is a signature kind.
    fn signing_type(self) -> Option<SigningType> {
        match self {
            FieldKind::ServerSignature => Some(SigningType::Server),
            FieldKind::GraphicSignature => Some(SigningType::Graphic),
            FieldKind::SmartCardSignature => Some(SigningType::SmartCard),
            _ => None,
        }
    }
}

/// Look up the first coordinate whose label matches `name`, ignoring case.
///
/// Matching is not required to be unique; ties resolve to the first
/// occurrence in placeholder list order.
fn find_placeholder<'a>(
    placeholders: &'a [FieldCoordinate],
    name: &str,
) -> Option<&'a FieldCoordinate> {
    placeholders
        .iter()
        .find(|c| c.text.eq_ignore_ascii_case(name))
}

fn descriptor_common(
    name: &str,
    description: &str,
    is_mandatory: &str,
    coordinate: &FieldCoordinate,
) -> Result<FieldCommon> {
    Ok(FieldCommon::new(name, coordinate.rect, coordinate.page)
        .with_description(description)
        .with_mandatory(parse_flag("IsMandatory", is_mandatory)?))
}

impl PdfMetaData {
    /// Bind every declared field to its placeholder coordinate.
    ///
    /// With `skip_validation` off, a declaration without a matching
    /// placeholder fails the whole translation with
    /// [`Error::PlaceholderMismatch`]; with it on, the declaration is
    /// omitted. No partial aggregate is ever returned on a fatal error.
    pub fn to_pdf_fields(
        &self,
        placeholders: &[FieldCoordinate],
        skip_validation: bool,
    ) -> Result<PdfFields> {
        let mut out = PdfFields::new();

        for field in &self.fields {
            let kind = FieldKind::parse(&field.field_type)?;
            let coordinate = match find_placeholder(placeholders, &field.name) {
                Some(c) => c,
                None if skip_validation => {
                    debug!("skipping field '{}': no placeholder", field.name);
                    continue;
                },
                None => return Err(Error::PlaceholderMismatch(field.name.clone())),
            };
            let common = descriptor_common(
                &field.name,
                &field.description,
                &field.is_mandatory,
                coordinate,
            )?;

            if let Some(text_type) = kind.text_field_type() {
                out.text_fields
                    .push(TextField::new(common, text_type).with_value(field.value.clone()));
            } else if kind == FieldKind::Checkbox {
                out.check_box_fields.push(
                    CheckBoxField::new(common)
                        .with_checked(parse_flag("IsChecked", &field.is_checked)?),
                );
            } else if let Some(signing_type) = kind.signing_type() {
                out.signature_fields
                    .push(SignatureField::new(common).with_signing_type(signing_type));
            } else {
                // Group kinds are not valid on a plain Field element.
                return Err(Error::UnsupportedFieldType(field.field_type.clone()));
            }
        }

        for group in &self.groups {
            match FieldKind::parse(&group.group_type) {
                Ok(FieldKind::RadioGroup) => {
                    self.resolve_radio_group(group, placeholders, skip_validation, &mut out)?;
                },
                Ok(FieldKind::ChoiceGroup) => {
                    self.resolve_choice_group(group, placeholders, skip_validation, &mut out)?;
                },
                // Unknown group kinds are skipped, not fatal.
                _ => trace!(
                    "ignoring group '{}' with type '{}'",
                    group.group_name,
                    group.group_type
                ),
            }
        }

        debug!(
            "resolved {} fields from {} placeholders",
            out.total_fields(),
            placeholders.len()
        );
        Ok(out)
    }

    /// Build one [`RadioGroupField`] from a `RadioGroup` descriptor.
    ///
    /// Every child resolves its own placeholder (same mismatch/skip rules as
    /// top-level fields) and inherits the group's mandatory flag and
    /// description. The selection is the first resolved child with
    /// `IsSelected="true"`.
    fn resolve_radio_group(
        &self,
        group: &GroupDescriptor,
        placeholders: &[FieldCoordinate],
        skip_validation: bool,
        out: &mut PdfFields,
    ) -> Result<()> {
        let mandatory = parse_flag("IsMandatory", &group.is_mandatory)?;
        let mut resolved = RadioGroupField::new(group.group_name.clone());

        for child in &group.fields {
            let coordinate = match find_placeholder(placeholders, &child.name) {
                Some(c) => c,
                None if skip_validation => {
                    debug!(
                        "skipping radio '{}' in group '{}': no placeholder",
                        child.name, group.group_name
                    );
                    continue;
                },
                None => return Err(Error::PlaceholderMismatch(child.name.clone())),
            };
            let common = FieldCommon::new(&child.name, coordinate.rect, coordinate.page)
                .with_description(group.description.clone())
                .with_mandatory(mandatory);

            if parse_flag("IsSelected", &child.is_selected)?
                && resolved.selected_radio_name.is_empty()
            {
                resolved.selected_radio_name = child.name.clone();
            }
            resolved
                .radios
                .push(RadioField::new(common).with_value(child.value.clone()));
        }

        out.radio_group_fields.push(resolved);
        Ok(())
    }

    /// Build one [`ChoiceField`] from a `ChoiceGroup` descriptor.
    ///
    /// The placeholder is keyed by the group's own `Fieldname`, not
    /// per-child. Options are the children's `Option` values in declaration
    /// order; the selection is the first child with `IsSelected="true"`, and
    /// a group with no selected child is a fatal
    /// [`Error::MissingSelection`].
    fn resolve_choice_group(
        &self,
        group: &GroupDescriptor,
        placeholders: &[FieldCoordinate],
        skip_validation: bool,
        out: &mut PdfFields,
    ) -> Result<()> {
        let coordinate = match find_placeholder(placeholders, &group.name) {
            Some(c) => c,
            None if skip_validation => {
                debug!(
                    "skipping choice group '{}': no placeholder",
                    group.group_name
                );
                return Ok(());
            },
            None => return Err(Error::PlaceholderMismatch(group.name.clone())),
        };
        let common = descriptor_common(
            &group.name,
            &group.description,
            &group.is_mandatory,
            coordinate,
        )?;

        let options: Vec<String> = group.fields.iter().map(|c| c.option.clone()).collect();
        let mut selected: Option<String> = None;
        for child in &group.fields {
            if parse_flag("IsSelected", &child.is_selected)? && selected.is_none() {
                selected = Some(child.option.clone());
            }
        }
        let selected =
            selected.ok_or_else(|| Error::MissingSelection(group.group_name.clone()))?;

        out.choice_fields
            .push(ChoiceField::new(common, options).with_selected_option(selected));
        Ok(())
    }
}
