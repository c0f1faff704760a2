/// Characters stripped from phone numbers before they are sent upstream.
const PHONE_SEPARATORS: [char; 3] = ['-', '.', ' '];

/// Contact details attached to an order just before placement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Customer {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    /// Phone number with separators removed (see [`normalize_phone`]).
    pub phone: String,
}

impl Customer {
    #[must_use]
    pub fn new(first_name: &str, last_name: &str, email: &str, phone: &str) -> Self {
        Self {
            first_name: first_name.trim().to_owned(),
            last_name: last_name.trim().to_owned(),
            email: email.trim().to_owned(),
            phone: normalize_phone(phone),
        }
    }
}

/// Removes `-`, `.` and spaces from a phone number, e.g.
/// `"604-555-0123"` → `"6045550123"`. Idempotent.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter(|c| !PHONE_SEPARATORS.contains(c))
        .collect()
}
