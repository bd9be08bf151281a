//! Download naming for the held result.

/// MIME type of the downloaded brief.
pub const DOWNLOAD_MIME: &str = "text/plain; charset=utf-8";

/// `sales_insight_<product_name>.txt`, with the product name kept as typed.
pub fn download_file_name(product_name: &str) -> String {
    format!("sales_insight_{product_name}.txt")
}

/// `Content-Disposition` value for the download.
///
/// `filename` carries an ASCII-only fallback (quotes, backslashes, path
/// separators, control and non-ASCII chars replaced with `_`); `filename*`
/// carries the exact UTF-8 name, percent-encoded per RFC 5987.
pub fn content_disposition(product_name: &str) -> String {
    let name = download_file_name(product_name);
    let fallback: String = name
        .chars()
        .map(|c| match c {
            '"' | '\\' | '/' => '_',
            c if c.is_ascii_control() || !c.is_ascii() => '_',
            c => c,
        })
        .collect();

    format!(
        "attachment; filename=\"{fallback}\"; filename*=UTF-8''{}",
        percent_encode(&name)
    )
}

fn percent_encode(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_file_name() {
        assert_eq!(
            download_file_name("Acme Widget"),
            "sales_insight_Acme Widget.txt"
        );
        assert_eq!(download_file_name(""), "sales_insight_.txt");
    }

    #[test]
    fn test_content_disposition_plain_name() {
        assert_eq!(
            content_disposition("Acme"),
            "attachment; filename=\"sales_insight_Acme.txt\"; filename*=UTF-8''sales_insight_Acme.txt"
        );
    }

    #[test]
    fn test_content_disposition_escapes_unsafe_chars() {
        let value = content_disposition("a\"b/c\nd");
        assert!(value.starts_with("attachment; filename=\"sales_insight_a_b_c_d.txt\";"));
        assert!(value.ends_with("sales_insight_a%22b%2Fc%0Ad.txt"));
    }

    #[test]
    fn test_content_disposition_non_ascii() {
        let value = content_disposition("Café");
        assert!(value.contains("filename=\"sales_insight_Caf_.txt\""));
        assert!(value.contains("filename*=UTF-8''sales_insight_Caf%C3%A9.txt"));
    }
}
