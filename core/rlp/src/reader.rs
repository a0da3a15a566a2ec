use crate::error::RlpError;
use crate::{LIST_OFFSET, MAX_DEPTH, SHORT_PAYLOAD_MAX, STRING_OFFSET};
use rawtx_primitives::{from_be_bytes, U256};

/// Classification of the next RLP item by its prefix byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    /// A byte below 0x80 that encodes itself.
    SingleByte,
    /// String of at most 55 bytes, one-byte prefix.
    ShortString,
    /// String longer than 55 bytes, length-of-length prefix.
    LongString,
    ShortList,
    LongList,
}

impl Kind {
    pub fn is_list(self) -> bool {
        matches!(self, Kind::ShortList | Kind::LongList)
    }
}

#[derive(Debug, Clone, Copy)]
struct Header {
    kind: Kind,
    header_len: usize,
    payload_len: usize,
}

/// Cursor over an RLP buffer.
///
/// Each entered list pushes the offset where its payload ends. Reads stop at
/// the innermost boundary with [`RlpError::EndOfList`]; at the top level the
/// end of the buffer yields [`RlpError::EndOfStream`].
#[derive(Debug, Clone)]
pub struct RlpReader<'a> {
    buf: &'a [u8],
    pos: usize,
    list_ends: Vec<usize>,
}

impl<'a> RlpReader<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            buf,
            pos: 0,
            list_ends: Vec::new(),
        }
    }

    /// Byte offset of the cursor in the underlying buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Number of lists currently entered.
    pub fn depth(&self) -> usize {
        self.list_ends.len()
    }

    /// Unread bytes up to the end of the buffer, ignoring list boundaries.
    pub fn remaining(&self) -> &'a [u8] {
        &self.buf[self.pos..]
    }

    /// True when nothing is left before the innermost boundary.
    pub fn is_exhausted(&self) -> bool {
        self.pos >= self.limit()
    }

    /// Peek the next item's kind and payload size without consuming it.
    pub fn kind(&self) -> Result<(Kind, usize), RlpError> {
        let header = self.header()?;
        Ok((header.kind, header.payload_len))
    }

    /// Consume a string item and return its payload.
    pub fn read_bytes(&mut self) -> Result<&'a [u8], RlpError> {
        let header = self.header()?;
        if header.kind.is_list() {
            return Err(RlpError::ExpectedString { offset: self.pos });
        }
        let start = self.pos + header.header_len;
        let end = start + header.payload_len;
        self.pos = end;
        Ok(&self.buf[start..end])
    }

    /// Consume a string item holding a canonical big-endian integer.
    pub fn read_uint(&mut self) -> Result<U256, RlpError> {
        let offset = self.pos;
        let bytes = self.read_bytes()?;
        if bytes.first() == Some(&0) {
            return Err(RlpError::NonCanonicalInteger { offset });
        }
        Ok(from_be_bytes(bytes)?)
    }

    /// Descend into a list item, returning its payload size.
    pub fn enter_list(&mut self) -> Result<usize, RlpError> {
        let header = self.header()?;
        if !header.kind.is_list() {
            return Err(RlpError::ExpectedList { offset: self.pos });
        }
        if self.list_ends.len() >= MAX_DEPTH {
            return Err(RlpError::TooDeep { offset: self.pos });
        }
        self.pos += header.header_len;
        self.list_ends.push(self.pos + header.payload_len);
        Ok(header.payload_len)
    }

    /// Leave the innermost list. Its payload must have been fully read.
    pub fn exit_list(&mut self) -> Result<(), RlpError> {
        let end = *self.list_ends.last().ok_or(RlpError::NotInList)?;
        if self.pos < end {
            return Err(RlpError::UnreadListData {
                remaining: end - self.pos,
            });
        }
        self.list_ends.pop();
        Ok(())
    }

    fn limit(&self) -> usize {
        self.list_ends.last().copied().unwrap_or(self.buf.len())
    }

    fn header(&self) -> Result<Header, RlpError> {
        let limit = self.limit();
        if self.pos >= limit {
            return Err(if self.list_ends.is_empty() {
                RlpError::EndOfStream
            } else {
                RlpError::EndOfList
            });
        }

        let offset = self.pos;
        let prefix = self.buf[offset];
        let header = match prefix {
            0x00..=0x7f => Header {
                kind: Kind::SingleByte,
                header_len: 0,
                payload_len: 1,
            },
            0x80..=0xb7 => {
                let payload_len = (prefix - STRING_OFFSET) as usize;
                // A lone byte below 0x80 must be encoded as itself
                if payload_len == 1 && offset + 1 < limit && self.buf[offset + 1] < STRING_OFFSET {
                    return Err(RlpError::NonCanonicalSize { offset });
                }
                Header {
                    kind: Kind::ShortString,
                    header_len: 1,
                    payload_len,
                }
            }
            0xb8..=0xbf => {
                let len_of_len = (prefix - 0xb7) as usize;
                Header {
                    kind: Kind::LongString,
                    header_len: 1 + len_of_len,
                    payload_len: self.long_length(offset, len_of_len, limit)?,
                }
            }
            0xc0..=0xf7 => Header {
                kind: Kind::ShortList,
                header_len: 1,
                payload_len: (prefix - LIST_OFFSET) as usize,
            },
            0xf8..=0xff => {
                let len_of_len = (prefix - 0xf7) as usize;
                Header {
                    kind: Kind::LongList,
                    header_len: 1 + len_of_len,
                    payload_len: self.long_length(offset, len_of_len, limit)?,
                }
            }
        };

        let available = limit - offset - header.header_len;
        if header.payload_len > available {
            return Err(if self.list_ends.is_empty() {
                RlpError::ValueTooLarge {
                    offset,
                    declared: header.payload_len,
                    available,
                }
            } else {
                RlpError::ElementTooLarge { offset }
            });
        }
        Ok(header)
    }

    fn long_length(&self, offset: usize, len_of_len: usize, limit: usize) -> Result<usize, RlpError> {
        let start = offset + 1;
        if start + len_of_len > limit {
            return Err(RlpError::TruncatedHeader { offset });
        }
        let bytes = &self.buf[start..start + len_of_len];
        if bytes[0] == 0 {
            return Err(RlpError::NonCanonicalSize { offset });
        }
        if len_of_len > std::mem::size_of::<usize>() {
            return Err(RlpError::ValueTooLarge {
                offset,
                declared: usize::MAX,
                available: limit - start - len_of_len,
            });
        }
        let len = bytes.iter().fold(0usize, |acc, b| (acc << 8) | *b as usize);
        if len <= SHORT_PAYLOAD_MAX {
            return Err(RlpError::NonCanonicalSize { offset });
        }
        Ok(len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reader(hex_str: &str) -> Vec<u8> {
        hex::decode(hex_str).unwrap()
    }

    #[test]
    fn test_kind_classification() {
        let cases: &[(&str, Kind, usize)] = &[
            ("02", Kind::SingleByte, 1),
            ("80", Kind::ShortString, 0),
            ("83646f67", Kind::ShortString, 3),
            ("c0", Kind::ShortList, 0),
            ("c3010203", Kind::ShortList, 3),
        ];
        for (input, kind, size) in cases {
            let buf = reader(input);
            assert_eq!(RlpReader::new(&buf).kind().unwrap(), (*kind, *size), "{}", input);
        }

        let mut long = vec![0xb8, 56];
        long.extend_from_slice(&[0xaa; 56]);
        assert_eq!(RlpReader::new(&long).kind().unwrap(), (Kind::LongString, 56));

        let mut long_list = vec![0xf8, 56];
        long_list.extend_from_slice(&[0x01; 56]);
        assert_eq!(RlpReader::new(&long_list).kind().unwrap(), (Kind::LongList, 56));
    }

    #[test]
    fn test_kind_does_not_consume() {
        let buf = reader("83646f67");
        let mut r = RlpReader::new(&buf);
        r.kind().unwrap();
        r.kind().unwrap();
        assert_eq!(r.position(), 0);
        assert_eq!(r.read_bytes().unwrap(), b"dog");
        assert_eq!(r.position(), 4);
    }

    #[test]
    fn test_single_byte_reads_itself() {
        let buf = reader("02f8");
        let mut r = RlpReader::new(&buf);
        assert_eq!(r.read_bytes().unwrap(), &[0x02]);
    }

    #[test]
    fn test_end_of_list_vs_end_of_stream() {
        // [ "cat", [] ]
        let buf = reader("c583636174c0");
        let mut r = RlpReader::new(&buf);
        assert_eq!(r.enter_list().unwrap(), 5);
        assert_eq!(r.read_bytes().unwrap(), b"cat");
        assert_eq!(r.kind().unwrap(), (Kind::ShortList, 0));
        assert_eq!(r.enter_list().unwrap(), 0);
        assert_eq!(r.read_bytes(), Err(RlpError::EndOfList));
        r.exit_list().unwrap();
        assert_eq!(r.kind(), Err(RlpError::EndOfList));
        r.exit_list().unwrap();
        assert_eq!(r.kind(), Err(RlpError::EndOfStream));
        assert!(r.kind().unwrap_err().is_end());
    }

    fn nested(depth: usize) -> Vec<u8> {
        // each level is a short list wrapping the next; innermost is c0
        let mut buf = vec![0xc0];
        for _ in 1..depth {
            buf = crate::writer::encode_list(&[buf]);
        }
        buf
    }

    #[test]
    fn test_nesting_limit() {
        let buf = nested(crate::MAX_DEPTH);
        let mut r = RlpReader::new(&buf);
        for _ in 0..crate::MAX_DEPTH {
            r.enter_list().unwrap();
        }

        let buf = nested(crate::MAX_DEPTH + 1);
        let mut r = RlpReader::new(&buf);
        for _ in 0..crate::MAX_DEPTH {
            r.enter_list().unwrap();
        }
        let err = r.enter_list().unwrap_err();
        assert!(matches!(err, RlpError::TooDeep { .. }));
        assert!(!err.is_end());
    }

    #[test]
    fn test_declared_length_exceeds_buffer() {
        let buf = reader("8568656c6c");
        let err = RlpReader::new(&buf).read_bytes().unwrap_err();
        assert_eq!(
            err,
            RlpError::ValueTooLarge {
                offset: 0,
                declared: 5,
                available: 4
            }
        );
        assert!(!err.is_end());
    }

    #[test]
    fn test_element_larger_than_list() {
        // list claims 2 payload bytes but the inner string claims 3
        let buf = reader("c283010203");
        let mut r = RlpReader::new(&buf);
        r.enter_list().unwrap();
        assert_eq!(r.read_bytes(), Err(RlpError::ElementTooLarge { offset: 1 }));
    }

    #[test]
    fn test_truncated_long_header() {
        let buf = reader("b9");
        assert_eq!(
            RlpReader::new(&buf).kind(),
            Err(RlpError::TruncatedHeader { offset: 0 })
        );
    }

    #[test]
    fn test_non_canonical_sizes() {
        // single byte below 0x80 wrapped in a string prefix
        let buf = reader("8105");
        assert_eq!(
            RlpReader::new(&buf).kind(),
            Err(RlpError::NonCanonicalSize { offset: 0 })
        );

        // long form used for a short payload
        let mut buf = vec![0xb8, 3];
        buf.extend_from_slice(b"dog");
        assert_eq!(
            RlpReader::new(&buf).kind(),
            Err(RlpError::NonCanonicalSize { offset: 0 })
        );

        // length with a leading zero byte
        let buf = reader("b9000038");
        assert_eq!(
            RlpReader::new(&buf).kind(),
            Err(RlpError::NonCanonicalSize { offset: 0 })
        );
    }

    #[test]
    fn test_read_uint() {
        let buf = reader("80825208");
        let mut r = RlpReader::new(&buf);
        assert_eq!(r.read_uint().unwrap(), U256::zero());
        assert_eq!(r.read_uint().unwrap(), U256::from(21_000u64));

        let buf = reader("00");
        assert_eq!(
            RlpReader::new(&buf).read_uint(),
            Err(RlpError::NonCanonicalInteger { offset: 0 })
        );

        let buf = reader("820052");
        assert_eq!(
            RlpReader::new(&buf).read_uint(),
            Err(RlpError::NonCanonicalInteger { offset: 0 })
        );
    }

    #[test]
    fn test_type_mismatches() {
        let buf = reader("c0");
        assert_eq!(
            RlpReader::new(&buf).read_bytes(),
            Err(RlpError::ExpectedString { offset: 0 })
        );
        let buf = reader("80");
        assert_eq!(
            RlpReader::new(&buf).enter_list(),
            Err(RlpError::ExpectedList { offset: 0 })
        );
    }

    #[test]
    fn test_exit_list_checks() {
        let buf = reader("c20102");
        let mut r = RlpReader::new(&buf);
        assert_eq!(r.exit_list(), Err(RlpError::NotInList));
        r.enter_list().unwrap();
        r.read_bytes().unwrap();
        assert_eq!(r.exit_list(), Err(RlpError::UnreadListData { remaining: 1 }));
        r.read_bytes().unwrap();
        assert!(r.is_exhausted());
        r.exit_list().unwrap();
        assert_eq!(r.depth(), 0);
    }
}
