//! Artwork URL upscaling
//!
//! Catalog thumbnails embed their size as an `NxNbb` token
//! (`.../100x100bb.jpg`). Swapping the token for `600x600bb` yields the
//! high-resolution variant from the same CDN.

const UPSCALED_TOKEN: &str = "600x600bb";

/// Rewrite the first square `NxNbb` token (N = 2-4 digits) to `600x600bb`
///
/// Returns `None` for a missing or empty URL. URLs without a square token,
/// including mismatched sizes such as `200x300bb`, come back unchanged.
pub fn upscale(url: Option<&str>) -> Option<String> {
    let url = url.filter(|u| !u.is_empty())?;

    match find_square_token(url.as_bytes()) {
        Some((start, end)) => {
            let mut out = String::with_capacity(url.len() + UPSCALED_TOKEN.len());
            out.push_str(&url[..start]);
            out.push_str(UPSCALED_TOKEN);
            out.push_str(&url[end..]);
            Some(out)
        }
        None => Some(url.to_string()),
    }
}

/// Byte range of the leftmost `NxNbb` token, longest N first at each start
///
/// Hand-scanned: `regex` has no backreferences for "same N twice", and its
/// non-overlapping matches would skip the `100x100bb` inside `1100x100bb`.
fn find_square_token(bytes: &[u8]) -> Option<(usize, usize)> {
    for start in 0..bytes.len() {
        for digits in (2..=4).rev() {
            let dim_end = start + digits;
            // dimension, 'x', same dimension, "bb"
            let token_end = dim_end + 1 + digits + 2;
            if token_end > bytes.len() {
                continue;
            }

            let dim = &bytes[start..dim_end];
            if !dim.iter().all(u8::is_ascii_digit) || bytes[dim_end] != b'x' {
                continue;
            }
            if &bytes[dim_end + 1..dim_end + 1 + digits] != dim {
                continue;
            }
            if &bytes[token_end - 2..token_end] == b"bb" {
                return Some((start, token_end));
            }
        }
    }
    None
}
