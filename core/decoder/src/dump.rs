use rawtx_rlp::{RlpError, RlpReader};

/// Read the next item and append its leaves to `leaves`, depth first.
///
/// Nested lists are flattened; an empty list contributes one empty leaf so
/// that positional classification still sees a placeholder for it. When
/// `trace` is set, the item is also written to it as indented text.
pub fn dump(
    reader: &mut RlpReader<'_>,
    depth: usize,
    mut trace: Option<&mut String>,
    leaves: &mut Vec<Vec<u8>>,
) -> Result<(), RlpError> {
    let (kind, size) = reader.kind()?;

    if !kind.is_list() {
        let bytes = reader.read_bytes()?;
        if let Some(trace) = trace {
            trace.push_str(&indent(depth));
            trace.push_str(&render_leaf(bytes));
        }
        leaves.push(bytes.to_vec());
        return Ok(());
    }

    reader.enter_list()?;
    if size == 0 {
        if let Some(trace) = trace {
            trace.push_str(&indent(depth));
            trace.push_str("[]");
        }
        leaves.push(Vec::new());
        return reader.exit_list();
    }

    if let Some(trace) = trace.as_deref_mut() {
        trace.push_str(&indent(depth));
        trace.push_str("[\n");
    }
    let mut first = true;
    loop {
        match reader.kind() {
            Err(RlpError::EndOfList) => break,
            Err(e) => return Err(e),
            Ok(_) => {}
        }
        if !first {
            if let Some(trace) = trace.as_deref_mut() {
                trace.push_str(",\n");
            }
        }
        first = false;
        dump(reader, depth + 1, trace.as_deref_mut(), leaves)?;
    }
    if let Some(trace) = trace {
        trace.push('\n');
        trace.push_str(&indent(depth));
        trace.push(']');
    }
    reader.exit_list()
}

/// Printable ASCII (and the empty string) is quoted, anything else is hex.
fn render_leaf(bytes: &[u8]) -> String {
    if bytes.iter().all(|b| (32..=126).contains(b)) {
        format!("{:?}", String::from_utf8_lossy(bytes))
    } else {
        hex::encode(bytes)
    }
}

fn indent(depth: usize) -> String {
    "  ".repeat(depth)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(hex_str: &str) -> (Vec<Vec<u8>>, String) {
        let buf = hex::decode(hex_str).unwrap();
        let mut reader = RlpReader::new(&buf);
        let mut leaves = Vec::new();
        let mut trace = String::new();
        dump(&mut reader, 0, Some(&mut trace), &mut leaves).unwrap();
        (leaves, trace)
    }

    #[test]
    fn test_flattens_nested_lists() {
        // [ "cat", [ "dog", [] ], 0x0400 ]
        let (leaves, _) = run("cd83636174c583646f67c0820400");
        assert_eq!(
            leaves,
            vec![b"cat".to_vec(), b"dog".to_vec(), vec![], vec![0x04, 0x00]]
        );
    }

    #[test]
    fn test_trace_format() {
        let (_, trace) = run("cd83636174c583646f67c0820400");
        assert_eq!(
            trace,
            "[\n  \"cat\",\n  [\n    \"dog\",\n    []\n  ],\n  0400\n]"
        );
    }

    #[test]
    fn test_trace_leaf_rendering() {
        assert_eq!(render_leaf(b""), "\"\"");
        assert_eq!(render_leaf(b"say \"hi\""), "\"say \\\"hi\\\"\"");
        assert_eq!(render_leaf(&[0x02]), "02");
        assert_eq!(render_leaf(&[0x41, 0x7f]), "417f");
    }

    #[test]
    fn test_no_trace_when_disabled() {
        let buf = hex::decode("c3010203").unwrap();
        let mut reader = RlpReader::new(&buf);
        let mut leaves = Vec::new();
        dump(&mut reader, 0, None, &mut leaves).unwrap();
        assert_eq!(leaves, vec![vec![1], vec![2], vec![3]]);
        assert_eq!(reader.kind(), Err(RlpError::EndOfStream));
    }

    #[test]
    fn test_deep_nesting_is_an_error() {
                let mut buf = vec![0xc0];
        for _ in 0..5_000 {
            buf = rawtx_rlp::encode_list(&[buf]);
        }
        let mut reader = RlpReader::new(&buf);
        let err = dump(&mut reader, 0, None, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, RlpError::TooDeep { .. }));
        assert_eq!(err.kind(), rawtx_primitives::ErrorKind::MalformedInput);
    }

    #[test]
    fn test_truncated_list_fails() {
        let buf = hex::decode("c5836361").unwrap();
        let mut reader = RlpReader::new(&buf);
        let err = dump(&mut reader, 0, None, &mut Vec::new()).unwrap_err();
        assert!(!err.is_end());
    }
}
