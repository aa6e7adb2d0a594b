//! 上传附件的类型识别
//!
//! 根据扩展名确定 MIME 类型，并用文件头部的魔术字节做二次校验。

/// 附件类型：扩展名、MIME、文件头签名（None 表示纯文本，不检查）
const ARCHIVO_KINDS: &[(&str, &str, Option<&[u8]>)] = &[
    (".pdf", "application/pdf", Some(b"%PDF")),
    (".zip", "application/zip", Some(&[0x50, 0x4B, 0x03, 0x04])),
    (".rar", "application/vnd.rar", Some(b"Rar!")),
    (
        ".7z",
        "application/x-7z-compressed",
        Some(&[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]),
    ),
    (".txt", "text/plain", None),
    (".md", "text/markdown", None),
    (
        ".doc",
        "application/msword",
        Some(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]),
    ),
    (
        ".docx",
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some(&[0x50, 0x4B, 0x03, 0x04]),
    ),
    (
        ".png",
        "image/png",
        Some(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
    ),
    (".jpg", "image/jpeg", Some(&[0xFF, 0xD8, 0xFF])),
    (".jpeg", "image/jpeg", Some(&[0xFF, 0xD8, 0xFF])),
];

fn lookup(extension: &str) -> Option<&'static (&'static str, &'static str, Option<&'static [u8]>)> {
    let extension = extension.to_lowercase();
    ARCHIVO_KINDS.iter().find(|(ext, _, _)| *ext == extension)
}

/// 提取文件名中的扩展名（小写，带点号）
pub fn extension_of(filename: &str) -> Option<String> {
    let (stem, ext) = filename.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(format!(".{}", ext.to_lowercase()))
}

/// 扩展名对应的 MIME 类型，未知类型返回 application/octet-stream
pub fn content_type_for(extension: &str) -> &'static str {
    lookup(extension)
        .map(|(_, mime, _)| *mime)
        .unwrap_or("application/octet-stream")
}

/// 验证文件内容的魔术字节是否与扩展名匹配
///
/// 空内容与未知扩展名一律拒绝，文本类型不检查文件头。
pub fn validate_magic_bytes(data: &[u8], extension: &str) -> bool {
    if data.is_empty() {
        return false;
    }

    match lookup(extension) {
        Some((_, _, Some(signature))) => data.starts_with(signature),
        Some((_, _, None)) => true,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_and_zip_signatures() {
        assert!(validate_magic_bytes(b"%PDF-1.7\n", ".pdf"));
        assert!(validate_magic_bytes(b"%PDF-1.7\n", ".PDF"));
        assert!(!validate_magic_bytes(b"%PDF-1.7\n", ".zip"));
        assert!(validate_magic_bytes(&[0x50, 0x4B, 0x03, 0x04, 0x14], ".docx"));
    }

    #[test]
    fn test_text_and_unknown() {
        assert!(validate_magic_bytes(b"# Entrega", ".md"));
        assert!(!validate_magic_bytes(b"", ".txt"));
        assert!(!validate_magic_bytes(b"MZ\x90\x00", ".exe"));
    }

    #[test]
    fn test_extension_and_mime() {
        assert_eq!(extension_of("TP1 Final.PDF").as_deref(), Some(".pdf"));
        assert_eq!(extension_of("sin_extension"), None);
        assert_eq!(extension_of(".oculto"), None);
        assert_eq!(content_type_for(".jpeg"), "image/jpeg");
        assert_eq!(content_type_for(".exe"), "application/octet-stream");
    }
}
