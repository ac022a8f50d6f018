//! JSON-lines I/O for the request loop
//!
//! One request object per input line, one response object per output line.
//! Blank lines are skipped.

use std::io::{BufRead, Write};

use serde_json::Value;

use super::errors::{CliError, CliResult};

/// Read JSON requests line by line.
///
/// A line that is not valid JSON yields a `BadRequest` error for that line
/// only; the iterator keeps going.
pub fn read_requests<R: BufRead>(input: R) -> impl Iterator<Item = CliResult<Value>> {
    input.lines().filter_map(|line| match line {
        Ok(line) if line.trim().is_empty() => None,
        Ok(line) => Some(
            serde_json::from_str(&line)
                .map_err(|e| CliError::bad_request(format!("invalid request JSON: {}", e))),
        ),
        Err(e) => Some(Err(CliError::from(e))),
    })
}

/// Write a success response
pub fn write_response<W: Write>(out: &mut W, data: Value) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "ok",
        "data": data
    });
    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Write an error response
pub fn write_error<W: Write>(out: &mut W, code: &str, message: &str) -> CliResult<()> {
    let response = serde_json::json!({
        "status": "error",
        "code": code,
        "message": message
    });
    serde_json::to_writer(&mut *out, &response)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_requests_skips_blank_lines() {
        let input = Cursor::new("{\"op\":\"metrics\"}\n\n   \n{\"op\":\"metrics\"}\n");
        let requests: Vec<_> = read_requests(input).collect();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.is_ok()));
    }

    #[test]
    fn test_read_requests_reports_bad_line() {
        let input = Cursor::new("nope\n{\"op\":\"metrics\"}\n");
        let requests: Vec<_> = read_requests(input).collect();
        assert_eq!(requests.len(), 2);
        assert_eq!(
            requests[0].as_ref().unwrap_err().code_str(),
            "ANSWERDB_CLI_BAD_REQUEST"
        );
        assert!(requests[1].is_ok());
    }

    #[test]
    fn test_write_error_shape() {
        let mut out = Vec::new();
        write_error(&mut out, "QA_NOT_FOUND", "gone").unwrap();
        let value: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["status"], "error");
        assert_eq!(value["code"], "QA_NOT_FOUND");
        assert_eq!(value["message"], "gone");
    }
}
