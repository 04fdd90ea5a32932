use serde_json::Value;

use super::{SubscriberEmail, subscriber_email::is_address_whitespace};

#[derive(Debug)]
pub struct NewSubscriber {
    pub email: SubscriberEmail,
}

impl TryFrom<&Value> for NewSubscriber {
    type Error = String;

    fn try_from(payload: &Value) -> Result<Self, Self::Error> {
        let candidate = payload
            .get("email")
            .map(email_candidate)
            .unwrap_or_default();
        let email = SubscriberEmail::parse(
            candidate
                .trim_matches(is_address_whitespace)
                .to_string(),
        )?;
        Ok(Self { email })
    }
}

/// Loose string reading of the `email` member. Falsy values (`null`, `false`,
/// `0`, `""`) give an empty candidate; everything else is stringified.
fn email_candidate(value: &Value) -> String {
    let falsy = match value {
        Value::Null | Value::Bool(false) => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        _ => false,
    };
    if falsy {
        String::new()
    } else {
        stringify(value)
    }
}

/// Arrays join their items with `,` (a `null` item is empty); objects all
/// read as `[object Object]`.
fn stringify(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}
