//! File acceptance policy. Shared by the pick and drop channels.

use crate::domain::{
    ACCEPTED_EXTENSIONS, CandidateFile, MAX_FILE_BYTES, ValidationReason, ValidationVerdict,
};

/// Decide whether `file` may be adopted. Size is checked before format.
pub fn validate(file: &CandidateFile) -> ValidationVerdict {
    if file.byte_size > MAX_FILE_BYTES {
        return ValidationVerdict::reject(ValidationReason::SizeExceeded);
    }
    if !ACCEPTED_EXTENSIONS.contains(&file.extension().as_str()) {
        return ValidationVerdict::reject(ValidationReason::UnsupportedFormat);
    }
    ValidationVerdict::accept()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(name: &str, size: u64) -> CandidateFile {
        CandidateFile::with_size(name, size, name)
    }

    #[test]
    fn accepts_pdf_and_txt_in_any_case() {
        for name in ["a.pdf", "b.TXT", "c.Pdf", "archive.tar.txt"] {
            assert!(validate(&file(name, 10)).accepted, "{name}");
        }
    }

    #[test]
    fn size_limit_is_inclusive() {
        assert!(validate(&file("a.pdf", MAX_FILE_BYTES)).accepted);
        let verdict = validate(&file("a.pdf", MAX_FILE_BYTES + 1));
        assert!(!verdict.accepted);
        assert_eq!(verdict.reason, Some(ValidationReason::SizeExceeded));
    }

    #[test]
    fn rejects_other_extensions() {
        for name in ["a.docx", "pdf", "a.pdf.exe", "a."] {
            let verdict = validate(&file(name, 1));
            assert_eq!(verdict.reason, Some(ValidationReason::UnsupportedFormat), "{name}");
        }
    }

    #[test]
    fn oversized_wrong_format_reports_size_first() {
        let verdict = validate(&file("big.docx", 12 * 1024 * 1024));
        assert_eq!(verdict.reason, Some(ValidationReason::SizeExceeded));
    }

    #[test]
    fn verdict_matches_policy_over_a_grid() {
        let names = ["x.pdf", "x.txt", "x.PDF", "x.doc", "x", "x.pdfx"];
        let sizes = [0, 1, MAX_FILE_BYTES - 1, MAX_FILE_BYTES, MAX_FILE_BYTES + 1];
        for name in names {
            for size in sizes {
                let f = file(name, size);
                let expected = ACCEPTED_EXTENSIONS.contains(&f.extension().as_str())
                    && size <= MAX_FILE_BYTES;
                assert_eq!(validate(&f).accepted, expected, "{name} {size}");
            }
        }
    }

    #[test]
    fn twelve_megabyte_pdf_message() {
        let err = validate(&file("big.pdf", 12 * 1024 * 1024))
            .into_result()
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Arquivo muito grande! Tamanho máximo: 10MB."
        );
    }
}
