use std::{
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use fs_err::File;
use rand::Rng;

use crate::schema::Record;

const UTF8_BOM: &[u8] = "\u{feff}".as_bytes();
const SUFFIX_CHARS: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const SUFFIX_LEN: usize = 8;

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("An I/O error occurred when writing the records: {0}")]
    Io(#[from] io::Error),
    #[error("The records could not be written as CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// `careerup_courses_<8 random [a-z0-9]>.csv` under `dir`.
pub fn random_output_path(dir: impl AsRef<Path>) -> PathBuf {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..SUFFIX_LEN)
        .map(|_| char::from(SUFFIX_CHARS[rng.gen_range(0..SUFFIX_CHARS.len())]))
        .collect();
    dir.as_ref().join(format!("careerup_courses_{suffix}.csv"))
}

/// Writes a BOM, the header row and then one row per record.
pub fn write_records<W: Write>(mut writer: W, records: &[Record]) -> Result<(), WriteError> {
    writer.write_all(UTF8_BOM)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);
    writer.write_record(Record::HEADERS)?;
    for record in records {
        writer.serialize(record)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the records to `path` and returns the size of the written file.
pub fn save(path: impl Into<PathBuf>, records: &[Record]) -> Result<u64, WriteError> {
    let path = path.into();
    write_records(BufWriter::new(File::create(&path)?), records)?;
    Ok(fs_err::metadata(&path)?.len())
}

#[cfg(test)]
mod tests {
    use std::io;

    use super::{random_output_path, save, write_records, WriteError, UTF8_BOM};
    use crate::{date::normalize, schema::Record};

    fn record(no: &str, name: &str, venue: &str, date: &str) -> Record {
        Record::builder()
            .session_number(no.to_owned().into())
            .course_name(name.to_owned().into())
            .venue(venue.to_owned().into())
            .raw_date(date.to_owned())
            .normalized_date(normalize(date))
            .build()
    }

    fn written(records: &[Record]) -> Vec<u8> {
        let mut buf = vec![];
        write_records(&mut buf, records).unwrap();
        buf
    }

    #[test]
    fn test_write_records() {
        let records = [
            record("1", "Excel 基礎", "飯田橋校", "１２／１(月)"),
            record("2", "溶接, 初級", "不明", "未定"),
        ];
        let buf = written(&records);
        assert!(buf.starts_with(UTF8_BOM));
        let text = std::str::from_utf8(&buf[UTF8_BOM.len()..]).unwrap();
        assert_eq!(
            text,
            "No.,講座名,実施場所,実施日,実施日英語\n\
             1,Excel 基礎,飯田橋校,１２／１(月),12/01\n\
             2,\"溶接, 初級\",不明,未定,\n"
        );
    }

    #[test]
    fn test_write_no_records() {
        let buf = written(&[]);
        assert_eq!(
            std::str::from_utf8(&buf).unwrap(),
            "\u{feff}No.,講座名,実施場所,実施日,実施日英語\n"
        );
    }

    #[test]
    fn test_random_output_path() {
        let path = random_output_path("out");
        assert_eq!(path.parent().unwrap(), std::path::Path::new("out"));
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(
            regex!(r"^careerup_courses_[a-z0-9]{8}\.csv$").is_match(name),
            "{name:?}"
        );
    }

    #[test]
    fn test_save() {
        let records = [record("3", "簿記", "城東校", "3月5日")];
        let path = std::env::temp_dir().join(format!(
            "careerup-scraping-save-{}.csv",
            std::process::id()
        ));
        let size = save(&path, &records);
        let bytes = fs_err::read(&path).unwrap();
        fs_err::remove_file(&path).unwrap();
        assert_eq!(size.unwrap(), bytes.len() as u64);
        assert_eq!(bytes, written(&records));
        assert!(bytes.starts_with(UTF8_BOM));
    }

    #[test]
    fn test_save_into_missing_directory() {
        let path = std::env::temp_dir()
            .join("careerup-scraping-no-such-dir")
            .join("out.csv");
        match save(&path, &[]) {
            Err(WriteError::Io(e)) => assert_eq!(e.kind(), io::ErrorKind::NotFound),
            res => panic!("Unexpected result: {res:?}"),
        }
    }
}
