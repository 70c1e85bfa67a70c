use crate::RsvpResponse;

pub const CSV_HEADERS: [&str; 7] = [
    "Name",
    "Email",
    "Phone",
    "Status",
    "Guest Count",
    "Message",
    "Date",
];

/// Serialize responses in the given order. Text cells are always quoted with
/// embedded quotes doubled; the guest count is written bare.
pub fn rsvps_to_csv(responses: &[RsvpResponse]) -> String {
    let mut lines = Vec::with_capacity(responses.len() + 1);
    lines.push(CSV_HEADERS.join(","));
    for r in responses {
        let row = [
            quote(&r.guest_name),
            quote(&r.guest_email),
            quote(r.guest_phone.as_deref().unwrap_or("")),
            quote(r.status_label()),
            r.party_size.to_string(),
            quote(r.message.as_deref().unwrap_or("")),
            quote(&r.created_at.format("%-m/%-d/%Y").to_string()),
        ];
        lines.push(row.join(","));
    }
    lines.join("\n")
}

pub fn export_file_name(slug: &str) -> String {
    format!("{slug}_rsvp_list.csv")
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}
