//! The `PdfFields` aggregate: ordered collections of every field kind with
//! merge and page-projection operations.

use super::{CheckBoxField, ChoiceField, RadioGroupField, SignatureField, TextField};
use log::trace;
use serde::{Deserialize, Serialize};

/// Options for [`PdfFields::fields_on_page`].
///
/// The defaults keep every field on the page: signed signature fields are
/// included and so are signature widgets without a visible area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageFilter {
    /// Keep signature fields that already carry an image
    pub include_signed: bool,
    /// Keep signature fields that do not occupy a visible page area
    pub include_hidden_signatures: bool,
}

impl Default for PageFilter {
    fn default() -> Self {
        Self {
            include_signed: true,
            include_hidden_signatures: true,
        }
    }
}

impl PageFilter {
    /// Create a filter with the default (all-inclusive) settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether already-signed signature fields are kept.
    pub fn with_signed(mut self, include: bool) -> Self {
        self.include_signed = include;
        self
    }

    /// Set whether signature fields without a visible area are kept.
    pub fn with_hidden_signatures(mut self, include: bool) -> Self {
        self.include_hidden_signatures = include;
        self
    }
}

/// Aggregate of every overlay field in a document.
///
/// Owns five ordered lists, one per field kind (radio buttons live inside
/// their groups). Created empty, populated by the resolver or by direct
/// construction, grown via [`merge`](PdfFields::merge), and consumed through
/// page-filtered projection.
///
/// # Example
///
/// ```
/// use overlay_fields::{FieldCommon, PdfFields, TextField, TextFieldType};
/// use overlay_fields::geometry::Rect;
///
/// let mut fields = PdfFields::new();
/// assert_eq!(fields.total_fields(), 0);
///
/// let common = FieldCommon::new("email", Rect::new(0.1, 0.2, 0.3, 0.05), 1);
/// fields.text_fields.push(TextField::new(common, TextFieldType::Email));
/// assert_eq!(fields.total_fields(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PdfFields {
    /// Text input fields
    pub text_fields: Vec<TextField>,
    /// Signature placement fields
    pub signature_fields: Vec<SignatureField>,
    /// Radio button groups
    pub radio_group_fields: Vec<RadioGroupField>,
    /// Checkbox fields
    pub check_box_fields: Vec<CheckBoxField>,
    /// Dropdown/choice fields
    pub choice_fields: Vec<ChoiceField>,
}

impl PdfFields {
    /// Create an empty aggregate.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of fields across all five lists.
    pub fn total_fields(&self) -> usize {
        self.text_fields.len()
            + self.signature_fields.len()
            + self.radio_group_fields.len()
            + self.check_box_fields.len()
            + self.choice_fields.len()
    }

    /// Whether the aggregate holds no fields at all.
    pub fn is_empty(&self) -> bool {
        self.total_fields() == 0
    }

    /// Append all of `other`'s lists onto this instance, in order.
    ///
    /// No deduplication happens here; callers are responsible for name
    /// uniqueness across merged sources. `other` is left untouched.
    pub fn merge(&mut self, other: &PdfFields) {
        self.text_fields.extend(other.text_fields.iter().cloned());
        self.signature_fields
            .extend(other.signature_fields.iter().cloned());
        self.radio_group_fields
            .extend(other.radio_group_fields.iter().cloned());
        self.check_box_fields
            .extend(other.check_box_fields.iter().cloned());
        self.choice_fields
            .extend(other.choice_fields.iter().cloned());
    }

    /// Project the aggregate onto a single page.
    ///
    /// Text, choice, checkbox, and signature fields are kept when their
    /// `page` matches. Signature fields additionally honor the
    /// [`PageFilter`] flags: with `include_signed` off, fields already
    /// carrying an image are dropped; with `include_hidden_signatures` off,
    /// only fields occupying a visible page area survive.
    ///
    /// Radio groups are reconstructed per page: a group appears iff at least
    /// one of its radios is on `page`, and the rebuilt group contains exactly
    /// that page's radios. The group's selection name is carried over even
    /// when the selected radio sits on another page.
    ///
    /// The returned aggregate is fully independent of `self`.
    pub fn fields_on_page(&self, page: u32, filter: PageFilter) -> PdfFields {
        let mut out = PdfFields::new();

        out.text_fields = self
            .text_fields
            .iter()
            .filter(|f| f.common.page == page)
            .cloned()
            .collect();
        out.choice_fields = self
            .choice_fields
            .iter()
            .filter(|f| f.common.page == page)
            .cloned()
            .collect();
        out.check_box_fields = self
            .check_box_fields
            .iter()
            .filter(|f| f.common.page == page)
            .cloned()
            .collect();
        out.signature_fields = self
            .signature_fields
            .iter()
            .filter(|f| f.common.page == page)
            .filter(|f| filter.include_signed || !f.is_signed())
            .filter(|f| filter.include_hidden_signatures || f.occupies_page_area())
            .cloned()
            .collect();

        for group in &self.radio_group_fields {
            let radios: Vec<_> = group
                .radios
                .iter()
                .filter(|r| r.common.page == page)
                .cloned()
                .collect();
            if radios.is_empty() {
                continue;
            }
            out.radio_group_fields.push(RadioGroupField {
                name: group.name.clone(),
                radios,
                selected_radio_name: group.selected_radio_name.clone(),
            });
        }

        trace!(
            "page {} projection: {} of {} fields",
            page,
            out.total_fields(),
            self.total_fields()
        );
        out
    }

    /// Find a text field by name (case-insensitive).
    pub fn find_text_field(&self, name: &str) -> Option<&TextField> {
        self.text_fields
            .iter()
            .find(|f| f.common.name.eq_ignore_ascii_case(name))
    }

    /// Find a signature field by name (case-insensitive).
    pub fn find_signature_field(&self, name: &str) -> Option<&SignatureField> {
        self.signature_fields
            .iter()
            .find(|f| f.common.name.eq_ignore_ascii_case(name))
    }
}
