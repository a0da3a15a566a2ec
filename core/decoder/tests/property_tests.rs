// Property-based tests for the flattening decoder
//
// Leaves come back in encounter order regardless of nesting, and legacy
// lists of nine leaves classify field by field.

use proptest::prelude::*;
use rawtx_decoder::{decode_stream, dump, DecoderConfig, TxView};
use rawtx_rlp::{encode_bytes, encode_list, RlpReader};

fn leaf() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..33)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn nested_lists_flatten_in_order(
        head in prop::collection::vec(leaf(), 0..4),
        inner in prop::collection::vec(leaf(), 1..4),
        tail in prop::collection::vec(leaf(), 0..4),
    ) {
        let mut items: Vec<Vec<u8>> = head.iter().map(|l| encode_bytes(l)).collect();
        let nested: Vec<Vec<u8>> = inner.iter().map(|l| encode_bytes(l)).collect();
        items.push(encode_list(&nested));
        items.extend(tail.iter().map(|l| encode_bytes(l)));
        let encoded = encode_list(&items);

        let mut leaves = Vec::new();
        dump(&mut RlpReader::new(&encoded), 0, None, &mut leaves).unwrap();

        let expected: Vec<Vec<u8>> = head.into_iter().chain(inner).chain(tail).collect();
        prop_assert_eq!(leaves, expected);
    }

    #[test]
    fn legacy_leaves_classify_positionally(fields in prop::collection::vec(leaf(), 9)) {
        let encoded: Vec<Vec<u8>> = fields.iter().map(|l| encode_bytes(l)).collect();
        let views = decode_stream(&encode_list(&encoded), DecoderConfig::default()).unwrap();
        prop_assert_eq!(views.len(), 1);

        match &views[0] {
            TxView::Legacy(tx) => {
                prop_assert_eq!(&tx.nonce.raw, &fields[0]);
                prop_assert_eq!(&tx.to, &fields[3]);
                prop_assert_eq!(&tx.data, &fields[5]);
                prop_assert_eq!(&tx.s.raw, &fields[8]);
            }
            other => prop_assert!(false, "expected legacy, got {:?}", other),
        }
    }
}
