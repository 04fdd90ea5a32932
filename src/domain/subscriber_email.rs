#[derive(Debug, Clone)]
pub struct SubscriberEmail(String);

impl SubscriberEmail {
    /// Accepts the minimal `local@domain.tld` shape: exactly one `@`, no
    /// whitespace, a non-empty local part and a domain holding a `.` with at
    /// least one character on each side of it.
    pub fn parse(s: String) -> Result<Self, String> {
        if !has_address_shape(&s) {
            return Err(format!("{s} is not a valid subscriber email."));
        };
        Ok(Self(s))
    }
}

/// Whitespace as web form clients understand it: Unicode `White_Space`
/// without U+0085, plus the byte order mark U+FEFF.
pub(super) fn is_address_whitespace(c: char) -> bool {
    match c {
        '\u{85}' => false,
        '\u{FEFF}' => true,
        c => c.is_whitespace(),
    }
}

fn has_address_shape(s: &str) -> bool {
    if s.chars().any(is_address_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

impl AsRef<str> for SubscriberEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SubscriberEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
