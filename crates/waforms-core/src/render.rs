//! Deterministic renderer from a form definition to input markup.
//!
//! Pure given the definition: one dispatch branch per field kind,
//! structured string building with context-aware escaping instead of the
//! placeholder-token templates the builder UI historically used.

use crate::domain::field::{Field, FieldKind};
use crate::domain::form::FormDefinition;
use crate::domain::slug::normalize;

/// Escape text for an HTML text node.
pub fn esc_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape text for a double-quoted HTML attribute value.
pub fn esc_attr(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Split a raw option list on pipes, trimming each piece.
///
/// The displayed label is the trimmed raw text; the submitted value is
/// its normalized slug.
pub fn parse_options(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split('|').map(|piece| piece.trim().to_string()).collect()
}

/// Render a full form definition to markup.
///
/// Duplicate field names are emitted as-is; grouping repeated names is
/// the encoder's concern at submission time.
pub fn render(def: &FormDefinition) -> String {
    let suffix = def.routing_suffix();
    let mut html = String::new();

    html.push_str(&format!(
        "<form id=\"wpwqf-form-{}\" class=\"wpwqf-form-container\" data-whatsapp-phone=\"{}\">\n",
        esc_attr(&suffix),
        esc_attr(&def.phone),
    ));
    html.push_str(&format!(
        "  <input type=\"hidden\" name=\"form_name\" value=\"{}\" />\n",
        esc_attr(&def.name),
    ));

    for field in &def.fields {
        render_field(&mut html, field);
    }

    html.push_str(
        "  <button type=\"submit\" class=\"wpwqf-submit-button\">Send via WhatsApp</button>\n",
    );
    html.push_str(&format!(
        "  <p id=\"wpwqf-message-{}\" class=\"wpwqf-message-area\" style=\"display:none;\"></p>\n",
        esc_attr(&suffix),
    ));
    html.push_str("</form>\n");
    html
}

fn render_field(html: &mut String, field: &Field) {
    // A missing name falls back to the label's slug, matching what the
    // builder would have assigned.
    let name = if field.name.is_empty() {
        normalize(&field.label)
    } else {
        field.name.clone()
    };
    let required_attr = if field.required { " required" } else { "" };
    let style = format!(
        "width:{};border:{};",
        esc_attr(&field.width),
        esc_attr(&field.border),
    );

    html.push_str(&format!(
        "  <div class=\"wpwqf-field wpwqf-field-{}\">\n",
        field.kind.as_str(),
    ));

    let mut label = esc_html(&field.label);
    if field.required {
        label.push_str(" <span class=\"wpwqf-required-asterisk\">*</span>");
    }
    html.push_str(&format!(
        "    <label for=\"{}\">{}</label>\n",
        esc_attr(&name),
        label,
    ));

    if !field.description.is_empty() {
        html.push_str(&format!(
            "    <p class=\"wpwqf-description\">{}</p>\n",
            esc_html(&field.description),
        ));
    }

    match field.kind {
        FieldKind::Textarea => {
            html.push_str(&format!(
                "    <textarea id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" style=\"{style}\"{req}></textarea>\n",
                name = esc_attr(&name),
                placeholder = esc_attr(&field.placeholder),
                style = style,
                req = required_attr,
            ));
        }
        FieldKind::Select => {
            html.push_str(&format!(
                "    <select id=\"{name}\" name=\"{name}\" style=\"{style}\"{req}>\n",
                name = esc_attr(&name),
                style = style,
                req = required_attr,
            ));
            if !field.placeholder.is_empty() {
                html.push_str(&format!(
                    "      <option value=\"\" disabled selected>{}</option>\n",
                    esc_html(&field.placeholder),
                ));
            }
            for option in parse_options(&field.options) {
                html.push_str(&format!(
                    "      <option value=\"{}\">{}</option>\n",
                    esc_attr(&normalize(&option)),
                    esc_html(&option),
                ));
            }
            html.push_str("    </select>\n");
        }
        FieldKind::Radio | FieldKind::Checkbox => {
            // Checkboxes use an array-style name so multiple values can
            // be collected under one field.
            let input_name = if field.kind == FieldKind::Checkbox {
                format!("{}[]", name)
            } else {
                name.clone()
            };
            html.push_str(&format!(
                "    <div class=\"wpwqf-options-group\" style=\"width:{}\">\n",
                esc_attr(&field.width),
            ));
            for option in parse_options(&field.options) {
                html.push_str(&format!(
                    "      <label><input type=\"{}\" name=\"{}\" value=\"{}\"{}> {}</label>\n",
                    field.kind.as_str(),
                    esc_attr(&input_name),
                    esc_attr(&normalize(&option)),
                    required_attr,
                    esc_html(&option),
                ));
            }
            html.push_str("    </div>\n");
        }
        FieldKind::Text | FieldKind::Email | FieldKind::Number | FieldKind::Date => {
            html.push_str(&format!(
                "    <input type=\"{kind}\" id=\"{name}\" name=\"{name}\" placeholder=\"{placeholder}\" style=\"{style}\"{req} />\n",
                kind = field.kind.as_str(),
                name = esc_attr(&name),
                placeholder = esc_attr(&field.placeholder),
                style = style,
                req = required_attr,
            ));
        }
    }

    html.push_str("  </div>\n");
}
