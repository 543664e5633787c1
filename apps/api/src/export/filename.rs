use chrono::NaiveDate;

use crate::models::PersonalInfo;

/// `CV_<firstName>_<lastName>_<yyyy-mm-dd>.pdf`. Names are used as typed,
/// minus characters that cannot appear in a file name.
pub fn export_filename(info: &PersonalInfo, date: NaiveDate) -> String {
    format!(
        "CV_{}_{}_{}.pdf",
        clean(&info.first_name),
        clean(&info.last_name),
        date.format("%Y-%m-%d")
    )
}

fn clean(part: &str) -> String {
    part.trim()
        .chars()
        .filter(|c| !c.is_control() && !matches!(c, '/' | '\\' | '"' | ':' | '*' | '?' | '<' | '>' | '|'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}

/// `Content-Disposition` value with an ASCII fallback and the exact UTF-8 name.
pub fn content_disposition(filename: &str) -> String {
    let fallback: String = filename
        .chars()
        .map(|c| if c.is_ascii() && c != '"' && c != '\\' { c } else { '_' })
        .collect();
    let mut encoded = String::with_capacity(filename.len() * 3);
    for byte in filename.bytes() {
        if byte.is_ascii_alphanumeric() || b"-._~".contains(&byte) {
            encoded.push(byte as char);
        } else {
            encoded.push_str(&format!("%{byte:02X}"));
        }
    }
    format!("attachment; filename=\"{fallback}\"; filename*=UTF-8''{encoded}")
}
