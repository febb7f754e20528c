//! Integration tests for descriptor-to-placeholder resolution.
//!
//! Covers the binding algorithm end to end: name matching, the
//! skip-validation escape hatch, field specialization per kind, group
//! handling, and the error taxonomy.

use overlay_fields::geometry::Rect;
use overlay_fields::{
    Error, ErrorCode, FieldCoordinate, FieldDescriptor, GroupDescriptor, PdfMetaData, SigningType,
    TextFieldType,
};

fn coordinate(text: &str, x: f32, y: f32, page: u32) -> FieldCoordinate {
    FieldCoordinate::new(text, Rect::new(x, y, 0.3, 0.05), page)
}

fn field(field_type: &str, name: &str) -> FieldDescriptor {
    FieldDescriptor {
        field_type: field_type.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

/// One Text declaration, one matching placeholder: the field comes back with
/// the placeholder's geometry and the descriptor's attributes.
#[test]
fn test_single_text_field_binding() {
    let meta = PdfMetaData {
        fields: vec![FieldDescriptor {
            is_mandatory: "true".to_string(),
            ..field("Text", "Name")
        }],
        groups: vec![],
    };
    let placeholders = vec![coordinate("Name", 0.1, 0.2, 1)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.text_fields.len(), 1);
    assert_eq!(fields.total_fields(), 1);

    let text = &fields.text_fields[0];
    assert_eq!(text.common.name, "Name");
    assert!(text.common.mandatory);
    assert_eq!(text.common.rect.x, 0.1);
    assert_eq!(text.common.rect.y, 0.2);
    assert_eq!(text.common.page, 1);
    assert_eq!(text.field_type, TextFieldType::Text);
}

/// Placeholder text and field name match case-insensitively.
#[test]
fn test_name_matching_is_case_insensitive() {
    let meta = PdfMetaData {
        fields: vec![field("Graphic_Signature", "signature1")],
        groups: vec![],
    };
    let placeholders = vec![coordinate("Signature1", 0.4, 0.6, 2)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.signature_fields.len(), 1);
    assert_eq!(fields.signature_fields[0].common.name, "signature1");
    assert_eq!(fields.signature_fields[0].common.page, 2);
}

/// A declaration without a placeholder is a mismatch error, or a silent
/// omission when validation is skipped.
#[test]
fn test_mismatch_strictness_toggle() {
    let meta = PdfMetaData {
        fields: vec![field("Text", "Missing")],
        groups: vec![],
    };

    let err = meta.to_pdf_fields(&[], false).unwrap_err();
    assert!(matches!(err, Error::PlaceholderMismatch(ref name) if name == "Missing"));
    assert_eq!(err.code(), Some(ErrorCode::XmlPlaceholderMismatch));
    assert_eq!(err.code().unwrap().as_numeric_string(), "47");

    let fields = meta.to_pdf_fields(&[], true).unwrap();
    assert_eq!(fields.total_fields(), 0);
}

/// Skipped declarations never leave a partial field in any list.
#[test]
fn test_skip_omits_only_the_unmatched_field() {
    let meta = PdfMetaData {
        fields: vec![field("Text", "Present"), field("Checkbox", "Absent")],
        groups: vec![],
    };
    let placeholders = vec![coordinate("Present", 0.1, 0.1, 1)];

    let fields = meta.to_pdf_fields(&placeholders, true).unwrap();
    assert_eq!(fields.text_fields.len(), 1);
    assert!(fields.check_box_fields.is_empty());
}

/// The kind table covers every text kind and the three signature kinds.
#[test]
fn test_field_kind_specialization() {
    let meta = PdfMetaData {
        fields: vec![
            field("Date", "d"),
            field("Number", "n"),
            field("Phone", "p"),
            field("Email", "e"),
            field("Custom", "c"),
            field("Time", "t"),
            field("Multiline", "m"),
            field("Checkbox", "cb"),
            field("Server_Signature", "s1"),
            field("Graphic_Signature", "s2"),
            field("SmartCard_Signature", "s3"),
        ],
        groups: vec![],
    };
    let placeholders: Vec<_> = ["d", "n", "p", "e", "c", "t", "m", "cb", "s1", "s2", "s3"]
        .iter()
        .map(|name| coordinate(name, 0.1, 0.1, 1))
        .collect();

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.text_fields.len(), 7);
    assert_eq!(fields.check_box_fields.len(), 1);
    assert_eq!(fields.signature_fields.len(), 3);

    let types: Vec<_> = fields.text_fields.iter().map(|f| f.field_type).collect();
    assert_eq!(
        types,
        vec![
            TextFieldType::Date,
            TextFieldType::Number,
            TextFieldType::Phone,
            TextFieldType::Email,
            TextFieldType::Custom,
            TextFieldType::Time,
            TextFieldType::Multiline,
        ]
    );

    let signings: Vec<_> = fields
        .signature_fields
        .iter()
        .map(|f| f.signing_type)
        .collect();
    assert_eq!(
        signings,
        vec![
            SigningType::Server,
            SigningType::Graphic,
            SigningType::SmartCard
        ]
    );
    // Images start empty: every signature field is unsigned.
    assert!(fields.signature_fields.iter().all(|f| !f.is_signed()));
}

/// Unknown type strings are fatal even when validation is skipped.
#[test]
fn test_unknown_type_is_fatal() {
    let meta = PdfMetaData {
        fields: vec![field("Hologram", "h")],
        groups: vec![],
    };
    let err = meta.to_pdf_fields(&[], true).unwrap_err();
    assert!(matches!(err, Error::UnknownFieldType(_)));
}

/// Group kinds on a plain Field element are fatal.
#[test]
fn test_group_kind_at_top_level_is_fatal() {
    let meta = PdfMetaData {
        fields: vec![field("RadioGroup", "g")],
        groups: vec![],
    };
    let placeholders = vec![coordinate("g", 0.1, 0.1, 1)];
    let err = meta.to_pdf_fields(&placeholders, false).unwrap_err();
    assert!(matches!(err, Error::UnsupportedFieldType(_)));
}

/// Malformed boolean attributes terminate the translation.
#[test]
fn test_invalid_boolean_is_fatal() {
    let meta = PdfMetaData {
        fields: vec![FieldDescriptor {
            is_mandatory: "maybe".to_string(),
            ..field("Text", "Name")
        }],
        groups: vec![],
    };
    let placeholders = vec![coordinate("Name", 0.1, 0.1, 1)];
    let err = meta.to_pdf_fields(&placeholders, false).unwrap_err();
    assert!(matches!(err, Error::InvalidBoolean { ref attribute, .. } if attribute == "IsMandatory"));
}

/// Checkbox state comes from IsChecked, empty meaning unchecked.
#[test]
fn test_checkbox_state_parsing() {
    let meta = PdfMetaData {
        fields: vec![
            FieldDescriptor {
                is_checked: "True".to_string(),
                ..field("Checkbox", "a")
            },
            field("Checkbox", "b"),
        ],
        groups: vec![],
    };
    let placeholders = vec![coordinate("a", 0.1, 0.1, 1), coordinate("b", 0.1, 0.3, 1)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert!(fields.check_box_fields[0].checked);
    assert!(!fields.check_box_fields[1].checked);
}

/// Duplicate placeholder labels resolve to the first occurrence in list
/// order.
#[test]
fn test_duplicate_placeholders_first_wins() {
    let meta = PdfMetaData {
        fields: vec![field("Text", "Name")],
        groups: vec![],
    };
    let placeholders = vec![coordinate("Name", 0.1, 0.1, 1), coordinate("Name", 0.7, 0.7, 3)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.text_fields[0].common.page, 1);
    assert_eq!(fields.text_fields[0].common.rect.x, 0.1);
}

fn radio_group(children: Vec<FieldDescriptor>) -> GroupDescriptor {
    GroupDescriptor {
        group_type: "RadioGroup".to_string(),
        group_name: "Approval".to_string(),
        is_mandatory: "true".to_string(),
        description: "Pick one".to_string(),
        fields: children,
        ..Default::default()
    }
}

/// Radio children resolve per-child and inherit the group's mandatory flag
/// and description.
#[test]
fn test_radio_group_resolution() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![radio_group(vec![
            FieldDescriptor {
                name: "yes".to_string(),
                value: "Yes".to_string(),
                ..Default::default()
            },
            FieldDescriptor {
                name: "no".to_string(),
                value: "No".to_string(),
                is_selected: "true".to_string(),
                ..Default::default()
            },
        ])],
    };
    let placeholders = vec![coordinate("yes", 0.1, 0.1, 1), coordinate("no", 0.1, 0.1, 2)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.radio_group_fields.len(), 1);

    let group = &fields.radio_group_fields[0];
    assert_eq!(group.name, "Approval");
    assert_eq!(group.radios.len(), 2);
    assert_eq!(group.selected_radio_name, "no");
    assert_eq!(group.radios[0].value, "Yes");
    assert_eq!(group.radios[1].common.page, 2);
    assert!(group.radios.iter().all(|r| r.common.mandatory));
    assert!(group
        .radios
        .iter()
        .all(|r| r.common.description == "Pick one"));
    assert_eq!(group.selected_radio().unwrap().common.name, "no");
}

/// A radio child without a placeholder fails strictly, or drops out of the
/// group when validation is skipped.
#[test]
fn test_radio_child_mismatch() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![radio_group(vec![
            FieldDescriptor {
                name: "yes".to_string(),
                ..Default::default()
            },
            FieldDescriptor {
                name: "ghost".to_string(),
                is_selected: "true".to_string(),
                ..Default::default()
            },
        ])],
    };
    let placeholders = vec![coordinate("yes", 0.1, 0.1, 1)];

    let err = meta.to_pdf_fields(&placeholders, false).unwrap_err();
    assert!(matches!(err, Error::PlaceholderMismatch(ref name) if name == "ghost"));

    let fields = meta.to_pdf_fields(&placeholders, true).unwrap();
    let group = &fields.radio_group_fields[0];
    assert_eq!(group.radios.len(), 1);
    // A skipped child cannot become the selection.
    assert_eq!(group.selected_radio_name, "");
}

/// With several IsSelected children, the first resolved one wins.
#[test]
fn test_radio_multiple_selected_first_wins() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![radio_group(vec![
            FieldDescriptor {
                name: "a".to_string(),
                is_selected: "true".to_string(),
                ..Default::default()
            },
            FieldDescriptor {
                name: "b".to_string(),
                is_selected: "true".to_string(),
                ..Default::default()
            },
        ])],
    };
    let placeholders = vec![coordinate("a", 0.1, 0.1, 1), coordinate("b", 0.1, 0.3, 1)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.radio_group_fields[0].selected_radio_name, "a");
}

fn choice_group(children: Vec<FieldDescriptor>) -> GroupDescriptor {
    GroupDescriptor {
        group_type: "ChoiceGroup".to_string(),
        group_name: "Colors".to_string(),
        name: "Color".to_string(),
        fields: children,
        ..Default::default()
    }
}

/// A choice group resolves one placeholder keyed by its own Fieldname and
/// collects child options in declaration order.
#[test]
fn test_choice_group_resolution() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![choice_group(vec![
            FieldDescriptor {
                option: "Red".to_string(),
                is_selected: "true".to_string(),
                ..Default::default()
            },
            FieldDescriptor {
                option: "Blue".to_string(),
                is_selected: "false".to_string(),
                ..Default::default()
            },
        ])],
    };
    let placeholders = vec![coordinate("Color", 0.2, 0.4, 1)];

    let fields = meta.to_pdf_fields(&placeholders, false).unwrap();
    assert_eq!(fields.choice_fields.len(), 1);

    let choice = &fields.choice_fields[0];
    assert_eq!(choice.common.name, "Color");
    assert_eq!(choice.options, vec!["Red".to_string(), "Blue".to_string()]);
    assert_eq!(choice.selected_option, "Red");
    assert!(choice.selection_is_valid());
}

/// A choice group with no selected child is a fatal error.
#[test]
fn test_choice_group_missing_selection_is_fatal() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![choice_group(vec![FieldDescriptor {
            option: "Red".to_string(),
            ..Default::default()
        }])],
    };
    let placeholders = vec![coordinate("Color", 0.2, 0.4, 1)];

    let err = meta.to_pdf_fields(&placeholders, false).unwrap_err();
    assert!(matches!(err, Error::MissingSelection(ref name) if name == "Colors"));
}

/// A choice group without a placeholder follows the same skip/fail rules as
/// a plain field.
#[test]
fn test_choice_group_mismatch_toggle() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![choice_group(vec![FieldDescriptor {
            option: "Red".to_string(),
            is_selected: "true".to_string(),
            ..Default::default()
        }])],
    };

    let err = meta.to_pdf_fields(&[], false).unwrap_err();
    assert!(matches!(err, Error::PlaceholderMismatch(ref name) if name == "Color"));

    let fields = meta.to_pdf_fields(&[], true).unwrap();
    assert!(fields.choice_fields.is_empty());
}

/// Unknown group kinds are ignored, unlike unknown field kinds.
#[test]
fn test_unknown_group_kind_is_ignored() {
    let meta = PdfMetaData {
        fields: vec![],
        groups: vec![GroupDescriptor {
            group_type: "StampGroup".to_string(),
            group_name: "Stamps".to_string(),
            ..Default::default()
        }],
    };
    let fields = meta.to_pdf_fields(&[], false).unwrap();
    assert_eq!(fields.total_fields(), 0);
}
