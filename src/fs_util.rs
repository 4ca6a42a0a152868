use std::{io, path::PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("The document was not found: {0:?}")]
    NotFound(PathBuf),
    #[error("An I/O error occurred when reading the document: {0}")]
    Io(io::Error),
}

/// Reads the whole document as UTF-8.
///
/// Invalid UTF-8 is reported as [`ReadError::Io`] with kind [`io::ErrorKind::InvalidData`].
pub fn load_document(path: impl Into<PathBuf>) -> Result<String, ReadError> {
    let path = path.into();
    fs_err::read_to_string(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => ReadError::NotFound(path),
        _ => ReadError::Io(e),
    })
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{load_document, ReadError};

    #[test]
    fn test_missing_document() {
        let path = std::env::temp_dir().join("careerup-scraping-no-such-file.html");
        match load_document(&path) {
            Err(ReadError::NotFound(p)) => assert_eq!(p, path),
            res => panic!("Unexpected result: {res:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let path = std::env::temp_dir().join(format!(
            "careerup-scraping-invalid-{}.html",
            std::process::id()
        ));
        fs_err::write(&path, [0x3c, 0xff, 0xfe, 0x3e]).unwrap();
        let res = load_document(&path);
        fs_err::remove_file(&path).unwrap();
        match res {
            Err(ReadError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::InvalidData),
            res => panic!("Unexpected result: {res:?}"),
        }
    }

    #[test]
    fn test_utf8_document() {
        let path = std::env::temp_dir().join(format!(
            "careerup-scraping-valid-{}.html",
            std::process::id()
        ));
        fs_err::write(&path, "<p>実施日(曜日)</p>").unwrap();
        let res = load_document(&path);
        fs_err::remove_file(&path).unwrap();
        assert_eq!(res.unwrap(), "<p>実施日(曜日)</p>");
    }
}
