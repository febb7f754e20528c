//! Field-descriptor model and XML parsing.
//!
//! A descriptor document declares the fields a signing document should carry,
//! independent of physical placement. It is XML with a `PDFMetaData` root, a
//! `Fields` container, and `Field`/`GroupField` children whose attributes are
//! all string-typed:
//!
//! ```xml
//! <PDFMetaData>
//!   <Fields>
//!     <Field Type="Text" Fieldname="Name" IsMandatory="true"/>
//!     <GroupField Type="ChoiceGroup" GroupName="Colors" Fieldname="Color">
//!       <Field Option="Red" IsSelected="true"/>
//!       <Field Option="Blue"/>
//!     </GroupField>
//!   </Fields>
//! </PDFMetaData>
//! ```
//!
//! The descriptor tree is ephemeral: it is consumed once by the resolver
//! (see [`crate::resolver`]) and discarded. Attribute values stay raw strings
//! here; interpretation (boolean flags, the field-kind table) happens at
//! translation time so that malformed input fails with a precise error.

use crate::error::{Error, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::path::Path;

/// A declared field, straight from a `Field` element's attributes.
///
/// Absent attributes are empty strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldDescriptor {
    /// `Type` attribute (field-kind tag)
    pub field_type: String,
    /// `Fieldname` attribute
    pub name: String,
    /// `IsMandatory` attribute (raw boolean string)
    pub is_mandatory: String,
    /// `IsChecked` attribute (raw boolean string, checkboxes)
    pub is_checked: String,
    /// `IsSelected` attribute (raw boolean string, group children)
    pub is_selected: String,
    /// `Value` attribute
    pub value: String,
    /// `Option` attribute (choice-group children)
    pub option: String,
    /// `Description` attribute
    pub description: String,
}

/// A declared field group, from a `GroupField` element and its children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupDescriptor {
    /// `Type` attribute (group-kind tag, e.g. `RadioGroup`, `ChoiceGroup`)
    pub group_type: String,
    /// `GroupName` attribute (group identifier)
    pub group_name: String,
    /// `Fieldname` attribute (placeholder key for choice groups)
    pub name: String,
    /// `IsMandatory` attribute, inherited by group members
    pub is_mandatory: String,
    /// `Description` attribute, inherited by group members
    pub description: String,
    /// Child `Field` elements, in declaration order
    pub fields: Vec<FieldDescriptor>,
}

/// A parsed descriptor document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfMetaData {
    /// Top-level `Field` declarations, in document order
    pub fields: Vec<FieldDescriptor>,
    /// `GroupField` declarations, in document order
    pub groups: Vec<GroupDescriptor>,
}

impl PdfMetaData {
    /// Parse a descriptor document from an XML string.
    ///
    /// Structural problems (missing `PDFMetaData` root, nested groups,
    /// malformed XML) are fatal. Unknown elements are skipped; attribute
    /// values are not interpreted here.
    pub fn from_xml(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.trim_text(true);

        let mut meta = PdfMetaData::default();
        let mut saw_root = false;
        let mut current_group: Option<GroupDescriptor> = None;

        loop {
            match reader.read_event() {
                Ok(Event::Start(ref e)) => {
                    match local_name(e).as_str() {
                        "PDFMetaData" => saw_root = true,
                        "Fields" => {},
                        "GroupField" => {
                            if current_group.is_some() {
                                return Err(Error::InvalidDescriptor(
                                    "nested GroupField elements are not allowed".to_string(),
                                ));
                            }
                            current_group = Some(group_from(e)?);
                        },
                        "Field" => {
                            let field = field_from(e)?;
                            match current_group.as_mut() {
                                Some(group) => group.fields.push(field),
                                None => meta.fields.push(field),
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::Empty(ref e)) => {
                    match local_name(e).as_str() {
                        "PDFMetaData" => saw_root = true,
                        // A childless group is legal, if useless.
                        "GroupField" => meta.groups.push(group_from(e)?),
                        "Field" => {
                            let field = field_from(e)?;
                            match current_group.as_mut() {
                                Some(group) => group.fields.push(field),
                                None => meta.fields.push(field),
                            }
                        },
                        _ => {},
                    }
                },
                Ok(Event::End(ref e)) => {
                    if e.local_name().as_ref() == b"GroupField" {
                        if let Some(group) = current_group.take() {
                            meta.groups.push(group);
                        }
                    }
                },
                Ok(Event::Eof) => break,
                Err(e) => return Err(Error::Xml(e)),
                _ => {},
            }
        }

        if !saw_root {
            return Err(Error::InvalidDescriptor(
                "missing PDFMetaData root element".to_string(),
            ));
        }
        log::debug!(
            "parsed descriptor: {} fields, {} groups",
            meta.fields.len(),
            meta.groups.len()
        );
        Ok(meta)
    }

    /// Read and parse a descriptor document from a file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let xml = std::fs::read_to_string(path)?;
        Self::from_xml(&xml)
    }
}

/// Get an attribute value from an element, unescaped.
fn attribute(e: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::InvalidDescriptor(err.to_string()))?;
        if attr.key.as_ref() == name.as_bytes() {
            let value = attr.unescape_value()?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

fn local_name(e: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(e.local_name().as_ref()).to_string()
}

fn field_from(e: &BytesStart<'_>) -> Result<FieldDescriptor> {
    Ok(FieldDescriptor {
        field_type: attribute(e, "Type")?.unwrap_or_default(),
        name: attribute(e, "Fieldname")?.unwrap_or_default(),
        is_mandatory: attribute(e, "IsMandatory")?.unwrap_or_default(),
        is_checked: attribute(e, "IsChecked")?.unwrap_or_default(),
        is_selected: attribute(e, "IsSelected")?.unwrap_or_default(),
        value: attribute(e, "Value")?.unwrap_or_default(),
        option: attribute(e, "Option")?.unwrap_or_default(),
        description: attribute(e, "Description")?.unwrap_or_default(),
    })
}

fn group_from(e: &BytesStart<'_>) -> Result<GroupDescriptor> {
    Ok(GroupDescriptor {
        group_type: attribute(e, "Type")?.unwrap_or_default(),
        group_name: attribute(e, "GroupName")?.unwrap_or_default(),
        name: attribute(e, "Fieldname")?.unwrap_or_default(),
        is_mandatory: attribute(e, "IsMandatory")?.unwrap_or_default(),
        description: attribute(e, "Description")?.unwrap_or_default(),
        fields: Vec::new(),
    })
}

/// Parse a raw flag attribute strictly.
///
/// Empty (or whitespace-only) means `false`; otherwise the value must be
/// `true` or `false`, case-insensitively. Anything else indicates a corrupted
/// descriptor and is fatal.
pub(crate) fn parse_flag(attribute: &str, raw: &str) -> Result<bool> {
    let raw = raw.trim();
    if raw.is_empty() {
        Ok(false)
    } else if raw.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if raw.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(Error::InvalidBoolean {
            attribute: attribute.to_string(),
            value: raw.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flag_strictness() {
        assert!(!parse_flag("IsMandatory", "").unwrap());
        assert!(!parse_flag("IsMandatory", "  ").unwrap());
        assert!(parse_flag("IsMandatory", "true").unwrap());
        assert!(parse_flag("IsMandatory", "True").unwrap());
        assert!(!parse_flag("IsMandatory", "FALSE").unwrap());
        assert!(matches!(
            parse_flag("IsMandatory", "yes"),
            Err(Error::InvalidBoolean { .. })
        ));
    }

    #[test]
    fn test_parse_minimal_document() {
        let xml = r#"<PDFMetaData><Fields>
            <Field Type="Text" Fieldname="Name" IsMandatory="true"/>
        </Fields></PDFMetaData>"#;

        let meta = PdfMetaData::from_xml(xml).unwrap();
        assert_eq!(meta.fields.len(), 1);
        assert!(meta.groups.is_empty());
        assert_eq!(meta.fields[0].field_type, "Text");
        assert_eq!(meta.fields[0].name, "Name");
        assert_eq!(meta.fields[0].is_mandatory, "true");
        assert_eq!(meta.fields[0].value, "");
    }

    #[test]
    fn test_parse_group_children() {
        let xml = r#"<PDFMetaData><Fields>
            <GroupField Type="ChoiceGroup" GroupName="Colors" Fieldname="Color">
                <Field Option="Red" IsSelected="true"/>
                <Field Option="Blue"/>
            </GroupField>
        </Fields></PDFMetaData>"#;

        let meta = PdfMetaData::from_xml(xml).unwrap();
        assert!(meta.fields.is_empty());
        assert_eq!(meta.groups.len(), 1);
        let group = &meta.groups[0];
        assert_eq!(group.group_name, "Colors");
        assert_eq!(group.name, "Color");
        assert_eq!(group.fields.len(), 2);
        assert_eq!(group.fields[0].option, "Red");
        assert_eq!(group.fields[1].is_selected, "");
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let err = PdfMetaData::from_xml("<Fields/>").unwrap_err();
        assert!(matches!(err, Error::InvalidDescriptor(_)));
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let xml = r#"<PDFMetaData><Fields>
            <Field Type="Text" Fieldname="A&amp;B"/>
        </Fields></PDFMetaData>"#;

        let meta = PdfMetaData::from_xml(xml).unwrap();
        assert_eq!(meta.fields[0].name, "A&B");
    }

    #[test]
    fn test_unknown_elements_are_skipped() {
        let xml = r#"<PDFMetaData>
            <Version>2</Version>
            <Fields><Field Type="Text" Fieldname="x"/></Fields>
        </PDFMetaData>"#;

        let meta = PdfMetaData::from_xml(xml).unwrap();
        assert_eq!(meta.fields.len(), 1);
    }
}
