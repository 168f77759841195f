//! Field collection for the command-line front end.
//!
//! Turns user-typed UID, APPID, FIX and EMK values into one derivation
//! request, and drives batch files of `UID,APPID,FIX` lines. Fields are
//! trimmed and joined as hex text; decoding is left to [`crate::derive`].

use std::io::{self, BufRead, Write};

use thiserror::Error;

use crate::audit::Diversifier;

/// A field the user left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CollectError {
    #[error("all fields are required (UID, APPID, FIX, EMK)")]
    MissingField,

    #[error("EMK is required")]
    MissingMasterKey,

    #[error("line {line}: expected UID,APPID,FIX")]
    MalformedLine { line: usize },
}

/// Trimmed master key plus the joined diversification input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request<'a> {
    pub master_key_hex: &'a str,
    pub input_hex: String,
}

/// Concatenate trimmed UID, APPID and FIX, in that order.
pub fn join_fields(uid: &str, app_id: &str, fix: &str) -> String {
    format!("{}{}{}", uid.trim(), app_id.trim(), fix.trim())
}

/// Build a request from the four form fields. None may be blank.
pub fn card_request<'a>(
    uid: &str,
    app_id: &str,
    fix: &str,
    master_key_hex: &'a str,
) -> Result<Request<'a>, CollectError> {
    let master_key_hex = master_key_hex.trim();
    if [uid, app_id, fix, master_key_hex]
        .iter()
        .any(|f| f.trim().is_empty())
    {
        return Err(CollectError::MissingField);
    }
    Ok(Request {
        master_key_hex,
        input_hex: join_fields(uid, app_id, fix),
    })
}

/// Build a request from a pre-concatenated input. The input may be empty.
pub fn raw_request<'a>(data: &str, master_key_hex: &'a str) -> Result<Request<'a>, CollectError> {
    let master_key_hex = master_key_hex.trim();
    if master_key_hex.is_empty() {
        return Err(CollectError::MissingMasterKey);
    }
    Ok(Request {
        master_key_hex,
        input_hex: data.trim().to_string(),
    })
}

/// Parse one batch line into a joined input.
///
/// Returns `None` for blank lines and `#` comments. `line_no` is 1-based and
/// only used in the error.
pub fn parse_batch_line(line: &str, line_no: usize) -> Option<Result<String, CollectError>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return None;
    }
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    Some(match parts.as_slice() {
        [uid, app_id, fix] if !uid.is_empty() && !app_id.is_empty() && !fix.is_empty() => {
            Ok(join_fields(uid, app_id, fix))
        }
        _ => Err(CollectError::MalformedLine { line: line_no }),
    })
}

/// Counts from one batch run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub failed: usize,
}

/// Derive one key per line of `reader`, writing `LINE,KEY` or
/// `LINE,ERROR:<msg>` to `out`.
///
/// A failing line never stops the run. Only I/O errors on `reader` or `out`
/// are returned.
pub fn run_batch<R: BufRead, W: Write>(
    diversifier: &Diversifier,
    master_key_hex: &str,
    reader: R,
    mut out: W,
) -> io::Result<BatchSummary> {
    let master_key_hex = master_key_hex.trim();
    let mut summary = BatchSummary::default();

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let outcome = match parse_batch_line(&line, idx + 1) {
            None => continue,
            Some(Ok(input_hex)) => diversifier
                .derive(master_key_hex, &input_hex)
                .map_err(|e| e.to_string()),
            Some(Err(e)) => Err(e.to_string()),
        };

        summary.processed += 1;
        match outcome {
            Ok(key) => writeln!(out, "{},{}", line.trim(), key)?,
            Err(msg) => {
                summary.failed += 1;
                writeln!(out, "{},ERROR:{}", line.trim(), msg)?;
            }
        }
    }

    out.flush()?;
    Ok(summary)
}
