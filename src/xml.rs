//! XML export for the [`PdfFields`] aggregate.
//!
//! The output document is the stable contract consumed by the signing,
//! rendering, and persistence layers: a `Fields` root with `TextFields`,
//! `SignatureFields`, `RadioGroupFields`, `CheckBoxFields`, and
//! `ChoiceFields` children, one element per field.

use crate::error::Result;
use crate::fields::{
    CheckBoxField, ChoiceField, FieldCommon, PdfFields, RadioGroupField, SignatureField, TextField,
};
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

impl PdfFields {
    /// Serialize the aggregate as a `Fields` XML document.
    pub fn to_xml(&self) -> Result<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

        writer.write_event(Event::Start(BytesStart::new("Fields")))?;

        writer.write_event(Event::Start(BytesStart::new("TextFields")))?;
        for field in &self.text_fields {
            write_text_field(&mut writer, field)?;
        }
        writer.write_event(Event::End(BytesEnd::new("TextFields")))?;

        writer.write_event(Event::Start(BytesStart::new("SignatureFields")))?;
        for field in &self.signature_fields {
            write_signature_field(&mut writer, field)?;
        }
        writer.write_event(Event::End(BytesEnd::new("SignatureFields")))?;

        writer.write_event(Event::Start(BytesStart::new("RadioGroupFields")))?;
        for group in &self.radio_group_fields {
            write_radio_group(&mut writer, group)?;
        }
        writer.write_event(Event::End(BytesEnd::new("RadioGroupFields")))?;

        writer.write_event(Event::Start(BytesStart::new("CheckBoxFields")))?;
        for field in &self.check_box_fields {
            write_check_box_field(&mut writer, field)?;
        }
        writer.write_event(Event::End(BytesEnd::new("CheckBoxFields")))?;

        writer.write_event(Event::Start(BytesStart::new("ChoiceFields")))?;
        for field in &self.choice_fields {
            write_choice_field(&mut writer, field)?;
        }
        writer.write_event(Event::End(BytesEnd::new("ChoiceFields")))?;

        writer.write_event(Event::End(BytesEnd::new("Fields")))?;

        Ok(String::from_utf8_lossy(&writer.into_inner()).into_owned())
    }
}

fn bool_str(value: bool) -> &'static str {
    if value {
        "true"
    } else {
        "false"
    }
}

fn push_common(el: &mut BytesStart<'_>, common: &FieldCommon) {
    el.push_attribute(("Name", common.name.as_str()));
    el.push_attribute(("Description", common.description.as_str()));
    el.push_attribute(("X", common.rect.x.to_string().as_str()));
    el.push_attribute(("Y", common.rect.y.to_string().as_str()));
    el.push_attribute(("Width", common.rect.width.to_string().as_str()));
    el.push_attribute(("Height", common.rect.height.to_string().as_str()));
    el.push_attribute(("Mandatory", bool_str(common.mandatory)));
    el.push_attribute(("Page", common.page.to_string().as_str()));
}

fn write_text_field(writer: &mut Writer<Vec<u8>>, field: &TextField) -> Result<()> {
    let mut el = BytesStart::new("TextField");
    push_common(&mut el, &field.common);
    el.push_attribute(("Type", field.field_type.as_str()));
    el.push_attribute(("Value", field.value.as_str()));
    el.push_attribute(("IsHidden", bool_str(field.hidden)));
    if let Some(pattern) = &field.custom_pattern {
        el.push_attribute(("CustomerRegex", pattern.as_str()));
    }
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

fn write_signature_field(writer: &mut Writer<Vec<u8>>, field: &SignatureField) -> Result<()> {
    let mut el = BytesStart::new("SignatureField");
    push_common(&mut el, &field.common);
    el.push_attribute(("Image", field.image.as_str()));
    el.push_attribute(("SigningType", field.signing_type.as_str()));
    el.push_attribute(("SignatureKind", field.kind.as_str()));
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

fn write_check_box_field(writer: &mut Writer<Vec<u8>>, field: &CheckBoxField) -> Result<()> {
    let mut el = BytesStart::new("CheckBoxField");
    push_common(&mut el, &field.common);
    el.push_attribute(("IsChecked", bool_str(field.checked)));
    writer.write_event(Event::Empty(el))?;
    Ok(())
}

fn write_choice_field(writer: &mut Writer<Vec<u8>>, field: &ChoiceField) -> Result<()> {
    let mut el = BytesStart::new("ChoiceField");
    push_common(&mut el, &field.common);
    el.push_attribute(("SelectedOption", field.selected_option.as_str()));
    writer.write_event(Event::Start(el))?;
    for option in &field.options {
        writer.write_event(Event::Start(BytesStart::new("Option")))?;
        writer.write_event(Event::Text(BytesText::new(option)))?;
        writer.write_event(Event::End(BytesEnd::new("Option")))?;
    }
    writer.write_event(Event::End(BytesEnd::new("ChoiceField")))?;
    Ok(())
}

fn write_radio_group(writer: &mut Writer<Vec<u8>>, group: &RadioGroupField) -> Result<()> {
    let mut el = BytesStart::new("RadioGroupField");
    el.push_attribute(("Name", group.name.as_str()));
    el.push_attribute(("SelectedRadioName", group.selected_radio_name.as_str()));
    writer.write_event(Event::Start(el))?;
    for radio in &group.radios {
        let mut radio_el = BytesStart::new("RadioField");
        push_common(&mut radio_el, &radio.common);
        radio_el.push_attribute(("Value", radio.value.as_str()));
        writer.write_event(Event::Empty(radio_el))?;
    }
    writer.write_event(Event::End(BytesEnd::new("RadioGroupField")))?;
    Ok(())
}
