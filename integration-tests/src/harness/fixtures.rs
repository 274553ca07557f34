use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub const HEADER: &str = "timestamp,ip,method,url,status_code,response_time_ms";

pub fn fixture_path(file: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("fixtures")
        .join(file)
}

/// A throwaway access log on disk, removed on drop.
pub struct CsvFile {
    file: NamedTempFile,
    pub rows: usize,
}

impl CsvFile {
    /// Header followed by `rows` verbatim.
    pub fn with_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let mut file = NamedTempFile::new().expect("failed to create temp file");
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{}", row.as_ref()).unwrap();
        }
        file.flush().unwrap();

        Self {
            file,
            rows: rows.len(),
        }
    }

    /// `rows` generated lines; every fourth one is a 5xx, IP `i % ips`.
    pub fn generated(rows: usize, ips: usize) -> Self {
        let lines: Vec<String> = (0..rows)
            .map(|i| {
                let status = if i % 4 == 3 { 502 } else { 200 };
                format!(
                    "2024-01-15 11:00:00,10.9.0.{},GET,/r/{i},{status},{}",
                    i % ips.max(1),
                    i % 100
                )
            })
            .collect();
        Self::with_rows(&lines)
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
