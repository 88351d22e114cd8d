use crate::types::CompanyRecord;
use once_cell::sync::Lazy;
use regex::Regex;

static VALID_EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

/// Format North American numbers as `(DDD) DDD-DDDD`.
///
/// Anything that does not reduce to 10 digits, or 11 with a leading `1`, is
/// returned exactly as given.
pub fn clean_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    let local = match digits.len() {
        10 => digits.as_str(),
        11 if digits.starts_with('1') => &digits[1..],
        _ => return phone.to_string(),
    };
    format!("({}) {}-{}", &local[..3], &local[3..6], &local[6..])
}

/// Lowercased, trimmed address, or empty if it is not `local@domain.tld`.
pub fn clean_email(email: &str) -> String {
    let email = email.trim().to_lowercase();
    if VALID_EMAIL_RE.is_match(&email) {
        email
    } else {
        String::new()
    }
}

/// Trimmed URL with `https://` added when no scheme is present.
pub fn clean_website(website: &str) -> String {
    let website = website.trim();
    if website.is_empty() || website.starts_with("http://") || website.starts_with("https://") {
        website.to_string()
    } else {
        format!("https://{}", website)
    }
}

pub fn normalize_record(mut record: CompanyRecord) -> CompanyRecord {
    record.phone = clean_phone(&record.phone);
    record.email = clean_email(&record.email);
    record.website = clean_website(&record.website);
    record
}
