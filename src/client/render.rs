//! Plain-text views of lightsaber records

use chrono::{DateTime, Utc};

use crate::schema::Lightsaber;

/// `Mar  5, 2023 at  4:45 PM`
const CREATED_FORMAT: &str = "%b %e, %Y at %l:%M %p";

pub fn status_glyph(is_active: bool) -> &'static str {
    if is_active {
        "●"
    } else {
        "○"
    }
}

pub fn status_label(is_active: bool) -> &'static str {
    if is_active {
        "Active"
    } else {
        "Inactive"
    }
}

pub fn format_created(created_at: &DateTime<Utc>) -> String {
    created_at.format(CREATED_FORMAT).to_string()
}

/// One line: status glyph, name, color, creator
pub fn list_line(record: &Lightsaber) -> String {
    format!(
        "{} {:<32} {:<8} {}",
        status_glyph(record.is_active),
        record.name,
        record.color.as_str(),
        record.creator
    )
}

pub fn render_list(records: &[Lightsaber]) -> String {
    if records.is_empty() {
        return "No lightsabers found.".to_string();
    }

    let mut out: Vec<String> = records.iter().map(list_line).collect();
    out.push(format!("{} lightsaber(s)", records.len()));
    out.join("\n")
}

/// Label/value rows for a single record
pub fn render_detail(record: &Lightsaber) -> String {
    let rows = [
        ("Name", record.name.clone()),
        ("Color", record.color.display_name()),
        ("Creator", record.creator.clone()),
        ("Crystal", record.crystal_type.to_string()),
        ("Hilt Material", record.hilt_material.to_string()),
        ("Status", status_label(record.is_active).to_string()),
        ("Created", format_created(&record.created_at)),
        ("ID", record.id.clone()),
    ];

    rows.iter()
        .map(|(label, value)| format!("{:<14} {}", format!("{}:", label), value))
        .collect::<Vec<_>>()
        .join("\n")
}
