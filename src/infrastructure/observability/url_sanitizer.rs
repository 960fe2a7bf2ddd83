use url::Url;

const MAX_VISIBLE_LENGTH: usize = 200;

/// Strips credentials, query and fragment from a URL before it is logged.
pub fn sanitize_url(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let sanitized = match Url::parse(trimmed) {
        Ok(mut url) => {
            if !url.username().is_empty() || url.password().is_some() {
                let _ = url.set_username("");
                let _ = url.set_password(None);
            }
            if url.query().is_some() {
                url.set_query(Some("[REDACTED]"));
            }
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => String::from("[INVALID URL]"),
    };

    truncate(sanitized)
}

fn truncate(text: String) -> String {
    if text.chars().count() > MAX_VISIBLE_LENGTH {
        let visible: String = text.chars().take(MAX_VISIBLE_LENGTH).collect();
        format!("{}... ({} chars total)", visible, text.chars().count())
    } else {
        text
    }
}
