//! PDF inspection helpers for tests

use std::io::Read;

use flate2::read::ZlibDecoder;

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

/// Bodies of every stream object, inflated when Flate-encoded
pub(crate) fn streams(pdf: &[u8]) -> Vec<Vec<u8>> {
    let mut streams = Vec::new();
    let mut rest = pdf;
    while let Some(start) = find(rest, b"stream") {
        let mut body = &rest[start + b"stream".len()..];
        if body.starts_with(b"\r\n") {
            body = &body[2..];
        } else if body.starts_with(b"\n") {
            body = &body[1..];
        }
        let Some(end) = find(body, b"endstream") else {
            break;
        };

        let mut inflated = Vec::new();
        if ZlibDecoder::new(&body[..end]).read_to_end(&mut inflated).is_ok() {
            streams.push(inflated);
        } else {
            streams.push(body[..end].to_vec());
        }
        rest = &body[end + b"endstream".len()..];
    }
    streams
}

/// Whether some content stream draws text
pub(crate) fn has_text(pdf: &[u8]) -> bool {
    streams(pdf).iter().any(|s| {
        find(s, b"BT").is_some()
            && find(s, b" Tf").is_some()
            && (find(s, b"Tj").is_some() || find(s, b"TJ").is_some())
    })
}
