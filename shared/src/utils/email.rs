//! Email helpers for log output

/// Mask an email address for logging, keeping the first character of the
/// local part and the domain: `alice@example.com` -> `a****@example.com`
pub fn mask_email(email: &str) -> String {
    match email.split_once('@') {
        Some((local, domain)) => {
            let mut chars = local.chars();
            match chars.next() {
                Some(first) => format!("{}{}@{}", first, "*".repeat(chars.count().max(1)), domain),
                None => format!("*@{}", domain),
            }
        }
        None if email.is_empty() => String::new(),
        None => "*".repeat(email.chars().count().min(8)),
    }
}
