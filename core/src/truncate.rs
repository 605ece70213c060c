// Display shortening for long resource URLs

use url::Url;

/// Default display length for resource URLs
pub const DEFAULT_TRUNCATE_LEN: usize = 60;

const ELLIPSIS: char = '…';

/// Shorten `url` for display to at most `max_len` characters
///
/// URLs that already fit are returned unchanged. Otherwise the
/// `scheme://host/…/filename` form is preferred; when the URL has no host or
/// filename, or that form is still too long, the middle is cut out instead.
/// Only the displayed text changes, never the stored URL.
pub fn truncate_url(url: &str, max_len: usize) -> String {
    if url.chars().count() <= max_len {
        return url.to_string();
    }

    if let Some(short) = origin_and_filename(url) {
        if short.chars().count() <= max_len {
            return short;
        }
    }

    head_and_tail(url, max_len)
}

fn origin_and_filename(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    let filename = parsed.path_segments()?.last().filter(|s| !s.is_empty())?;

    let origin = match parsed.port() {
        Some(port) => format!("{}://{}:{}", parsed.scheme(), host, port),
        None => format!("{}://{}", parsed.scheme(), host),
    };

    Some(format!("{}/{}/{}", origin, ELLIPSIS, filename))
}

fn head_and_tail(text: &str, max_len: usize) -> String {
    if max_len == 0 {
        return String::new();
    }

    let chars: Vec<char> = text.chars().collect();
    let keep = max_len - 1;
    let head = (keep + 1) / 2;
    let tail = keep - head;

    let mut out: String = chars[..head].iter().collect();
    out.push(ELLIPSIS);
    out.extend(&chars[chars.len() - tail..]);
    out
}
