mod run_tests;

use crate::pipeline::RecordRx;
use crate::record::Record;
use std::io::Write;
use tempfile::NamedTempFile;
use tokio::sync::mpsc;

//-----------------------------------------------------------------------------
// Test helpers
//-----------------------------------------------------------------------------

pub const HEADER: &str = "timestamp,ip,method,url,status_code,response_time_ms";

pub fn record(ip: &str, status: u16, response_time_ms: u64) -> Record {
    Record {
        timestamp: "2024-01-15 10:30:00".to_string(),
        ip: ip.to_string(),
        method: "GET".to_string(),
        url: "/api".to_string(),
        status,
        response_time_ms,
    }
}

/// `count` rows cycling through a few IPs and statuses.
pub fn sample_rows(count: usize) -> Vec<String> {
    const STATUSES: [u16; 5] = [200, 201, 404, 500, 302];

    (0..count)
        .map(|i| {
            format!(
                "2024-01-15 10:30:{:02},10.0.0.{},GET,/item/{i},{},{}",
                i % 60,
                i % 7,
                STATUSES[i % STATUSES.len()],
                i % 250
            )
        })
        .collect()
}

pub fn csv_text(rows: &[String]) -> String {
    let mut text = format!("{HEADER}\n");
    for row in rows {
        text.push_str(row);
        text.push('\n');
    }
    text
}

pub fn csv_file(rows: &[String]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(csv_text(rows).as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

/// A closed channel pre-filled with `records`.
pub fn channel_of(records: Vec<Record>) -> RecordRx {
    let (tx, rx) = mpsc::channel(records.len().max(1));
    for record in records {
        tx.try_send(record).unwrap();
    }
    rx
}

pub async fn collect(mut rx: RecordRx) -> Vec<Record> {
    let mut out = Vec::new();
    while let Some(record) = rx.recv().await {
        out.push(record);
    }
    out
}

pub fn sorted(mut records: Vec<Record>) -> Vec<Record> {
    records.sort_by(|a, b| {
        (&a.ip, a.status, a.response_time_ms, &a.url).cmp(&(
            &b.ip,
            b.status,
            b.response_time_ms,
            &b.url,
        ))
    });
    records
}
