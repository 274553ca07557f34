use crate::record::{MalformedRecord, Record};

pub const FIELD_DELIMITER: char = ',';
pub const FIELD_COUNT: usize = 6;

/// Parse one data line of the form
/// `timestamp,ip,method,url,status_code,response_time_ms`.
///
/// `line_number` is only used to label the error.
pub fn parse_line(line: &str, line_number: u64) -> Result<Record, MalformedRecord> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();

    let [timestamp, ip, method, url, status, response_time] = fields.as_slice() else {
        return Err(MalformedRecord::FieldCount {
            line: line_number,
            expected: FIELD_COUNT,
            found: fields.len(),
        });
    };

    let status = status
        .parse::<u16>()
        .map_err(|source| MalformedRecord::StatusCode {
            line: line_number,
            value: status.to_string(),
            source,
        })?;

    let response_time_ms =
        response_time
            .parse::<u64>()
            .map_err(|source| MalformedRecord::ResponseTime {
                line: line_number,
                value: response_time.to_string(),
                source,
            })?;

    Ok(Record {
        timestamp: timestamp.to_string(),
        ip: ip.to_string(),
        method: method.to_string(),
        url: url.to_string(),
        status,
        response_time_ms,
    })
}
