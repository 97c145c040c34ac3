//! Content length extraction utilities.
//!
//! The declared length of a file drives its progress bar. A server may give it
//! through `Content-Length` or as the total of a `Content-Range` header, or not
//! at all for chunked bodies.

use reqwest::{header::CONTENT_RANGE, Response};

/// Declared size of the response body, if the server announced one.
///
/// `Content-Length` wins; otherwise the total of `Content-Range` is used. A
/// chunked response with neither yields `None`.
///
/// ```rust,no_run
/// use precache::utils::declared_length;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let response = reqwest::get("http://localhost:8000/a.mp4").await?;
/// match declared_length(&response) {
///     Some(total) => println!("{total} bytes"),
///     None => println!("size unknown"),
/// }
/// # Ok(())
/// # }
/// ```
pub fn declared_length(response: &Response) -> Option<u64> {
    response.content_length().or_else(|| {
        response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|value| value.to_str().ok())
            .and_then(parse_content_range_total)
    })
}

/// Parse Content-Range header to extract total size.
///
/// Content-Range header format: "bytes start-end/total". An unknown total
/// (`*`) yields `None`.
///
/// ```rust
/// use precache::utils::parse_content_range_total;
///
/// assert_eq!(parse_content_range_total("bytes 0-1023/2048"), Some(2048));
/// assert_eq!(parse_content_range_total("bytes 0-1023/*"), None);
/// ```
pub fn parse_content_range_total(content_range: &str) -> Option<u64> {
    let (_, total) = content_range.rsplit_once('/')?;
    total.trim().parse::<u64>().ok()
}
