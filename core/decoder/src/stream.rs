use crate::classify::TxView;
use crate::dump::dump;
use crate::error::DecodeError;
use rawtx_primitives::decode_hex;
use rawtx_rlp::{RlpError, RlpReader};
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecoderConfig {
    /// Record the nested RLP structure of every item as it is read.
    pub verbose: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// A bare envelope type byte; it applies to the next list.
    TypeTag(u8),
    Transaction(TxView),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamItem {
    pub event: StreamEvent,
    /// Verbose rendering of the item; empty unless `verbose` is set.
    pub trace: String,
}

/// Walks a buffer of concatenated top-level RLP items.
///
/// A top-level string is a type tag for the list that follows it. A list
/// without a preceding tag is a legacy transaction. The tag is consumed by
/// the list it precedes.
pub struct TxStream<'a> {
    reader: RlpReader<'a>,
    config: DecoderConfig,
    pending_tag: Option<u8>,
    done: bool,
}

impl<'a> TxStream<'a> {
    pub fn new(bytes: &'a [u8], config: DecoderConfig) -> Self {
        Self {
            reader: RlpReader::new(bytes),
            config,
            pending_tag: None,
            done: false,
        }
    }

    fn next_item(&mut self) -> Result<Option<StreamItem>, DecodeError> {
        let is_list = match self.reader.kind() {
            Err(RlpError::EndOfStream) => {
                return match self.pending_tag {
                    Some(tag) => Err(DecodeError::MalformedInput(format!(
                        "type tag {} is not followed by a transaction",
                        tag
                    ))),
                    None => Ok(None),
                };
            }
            Err(e) => return Err(e.into()),
            Ok((kind, _)) => kind.is_list(),
        };

        let mut trace = String::new();
        let mut leaves = Vec::new();
        dump(
            &mut self.reader,
            0,
            self.config.verbose.then_some(&mut trace),
            &mut leaves,
        )?;
        if self.config.verbose {
            trace.push('\n');
        }

        if !is_list {
            if let Some(tag) = self.pending_tag {
                return Err(DecodeError::MalformedInput(format!(
                    "type tag {} is followed by another type tag",
                    tag
                )));
            }
            let tag = match leaves.as_slice() {
                [leaf] if leaf.len() == 1 => leaf[0],
                _ => {
                    return Err(DecodeError::MalformedInput(
                        "type tag must be a single byte".to_string(),
                    ))
                }
            };
            debug!(tag, "Read envelope type tag");
            self.pending_tag = Some(tag);
            return Ok(Some(StreamItem {
                event: StreamEvent::TypeTag(tag),
                trace,
            }));
        }

        let tag = self.pending_tag.take().unwrap_or(0);
        debug!(tag, fields = leaves.len(), "Classifying transaction");
        let view = TxView::classify(tag, leaves)?;
        Ok(Some(StreamItem {
            event: StreamEvent::Transaction(view),
            trace,
        }))
    }
}

impl Iterator for TxStream<'_> {
    type Item = Result<StreamItem, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_item() {
            Ok(Some(item)) => Some(Ok(item)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Decode every transaction in `bytes`, discarding traces.
pub fn decode_stream(bytes: &[u8], config: DecoderConfig) -> Result<Vec<TxView>, DecodeError> {
    TxStream::new(bytes, config)
        .filter_map(|item| match item {
            Ok(StreamItem {
                event: StreamEvent::Transaction(view),
                ..
            }) => Some(Ok(view)),
            Ok(_) => None,
            Err(e) => Some(Err(e)),
        })
        .collect()
}

/// Hex front end for [`decode_stream`]; accepts an optional `0x` prefix.
pub fn decode_hex_stream(input: &str, config: DecoderConfig) -> Result<Vec<TxView>, DecodeError> {
    let bytes = decode_hex(input.trim())?;
    decode_stream(&bytes, config)
}
