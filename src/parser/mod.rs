use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::SceneError;

/// Read a scene description into lines.
///
/// Lines keep at most `max_len - 1` bytes, like a fixed `max_len` line
/// buffer would (cut on a char boundary). Line endings are stripped and
/// invalid UTF-8 is replaced rather than rejected.
pub fn read_lines(path: &Path, max_len: usize) -> Result<Vec<String>, SceneError> {
    let file = File::open(path).map_err(|source| SceneError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let mut reader = BufReader::new(file);

    let limit = max_len.saturating_sub(1);
    let mut lines = Vec::new();
    let mut buf = Vec::new();

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| SceneError::Read {
                path: path.to_path_buf(),
                line: lines.len() + 1,
                source,
            })?;
        if read == 0 {
            break;
        }

        while matches!(buf.last(), Some(b'\n' | b'\r')) {
            buf.pop();
        }

        let line = String::from_utf8_lossy(&buf);
        if line.len() > limit {
            tracing::debug!(
                "{}:{} longer than {} bytes, truncated",
                path.display(),
                lines.len() + 1,
                limit
            );
        }
        lines.push(bound_line(&line, max_len).into_owned());
    }

    Ok(lines)
}

/// Cut `line` to at most `max_len - 1` bytes on a char boundary.
pub fn bound_line(line: &str, max_len: usize) -> Cow<'_, str> {
    let limit = max_len.saturating_sub(1);
    if line.len() <= limit {
        Cow::Borrowed(line)
    } else {
        Cow::Owned(line[..floor_char_boundary(line, limit)].to_owned())
    }
}

fn floor_char_boundary(s: &str, mut index: usize) -> usize {
    while !s.is_char_boundary(index) {
        index -= 1;
    }
    index
}
