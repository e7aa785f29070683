//! Image MIME resolution for upload parts and saved outputs.
//!
//! A declared format (an `output_format` token or a file extension) wins;
//! otherwise the leading bytes decide.

/// MIME type for an image format token or file extension, case-insensitive.
pub fn mime_for_format(format: &str) -> Option<&'static str> {
    let format = format.trim().trim_start_matches('.');
    [
        ("png", "image/png"),
        ("jpeg", "image/jpeg"),
        ("jpg", "image/jpeg"),
        ("webp", "image/webp"),
        ("gif", "image/gif"),
    ]
    .into_iter()
    .find(|(token, _)| token.eq_ignore_ascii_case(format))
    .map(|(_, mime)| mime)
}

/// MIME type implied by a file name's extension.
pub fn mime_for_filename(filename: &str) -> Option<&'static str> {
    let (_, ext) = filename.rsplit_once('.')?;
    mime_for_format(ext)
}

/// MIME type recognised from the image's signature bytes.
pub fn sniff_image_mime(bytes: &[u8]) -> Option<&'static str> {
    if bytes.starts_with(b"\x89PNG") {
        Some("image/png")
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        Some("image/jpeg")
    } else if bytes.starts_with(b"GIF8") {
        Some("image/gif")
    } else if bytes.len() >= 12 && &bytes[..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        Some("image/webp")
    } else {
        None
    }
}

/// Resolves the MIME type of `bytes`, preferring `declared` when it names a
/// known format. Falls back to `image/png`.
pub fn resolve_image_mime(bytes: &[u8], declared: Option<&str>) -> &'static str {
    declared
        .and_then(mime_for_format)
        .or_else(|| sniff_image_mime(bytes))
        .unwrap_or_else(|| {
            tracing::warn!(
                "Unrecognized image format (first 4 bytes: {:02X?}), assuming image/png",
                &bytes[..bytes.len().min(4)]
            );
            "image/png"
        })
}

/// File extension (without the dot) for an image MIME type.
pub fn extension_for_mime(mime: &str) -> &'static str {
    match mime {
        "image/jpeg" => "jpg",
        "image/webp" => "webp",
        "image/gif" => "gif",
        _ => "png",
    }
}
