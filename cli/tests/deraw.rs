use clap::Parser;
use rawtx_cli::{run, Args};

const ETH_TX: &str = "0x02f86f0180843b9aca0085037e11d600825208940475f0d4a405a79b58f302bd22ecbdaf35b1759e843b9aca0080c001a0be8fc6f81a181ef6202f628e0380b044978411696bca5fb8b85c5279493a587ea029fbb50fd78aeccfd3192410760ac4359f7c022d0b80164e5f82ce3a786bc8f8";

const LEGACY_TX: &str = "f86d8202b28477359400825208944592d8f8d7b001e72cb26a73e4fa1806a51ac79d880de0b6b3a7640000802ca05924bde7ef10aa88db9c66dd4f5fb16b46dff2319b9968be983118b57bb50562a001b24b31010004f13d9a26b320845257a6cfc2bf819a3d55e3fc86263c5f0772";

fn deraw(argv: &[&str]) -> anyhow::Result<String> {
    let mut full = vec!["deraw"];
    full.extend_from_slice(argv);
    let args = Args::try_parse_from(full)?;
    let mut out = Vec::new();
    run(&args, &mut out)?;
    Ok(String::from_utf8(out)?)
}

#[test]
fn test_plain_dump() {
    let text = deraw(&["--raw", ETH_TX]).unwrap();
    assert!(text.starts_with("tx: (type = 2)\n chain id\t\t\t= 1 (0x01)\n"));
    assert!(text.contains(" destination\t\t\t= 0x0475f0d4a405a79b58f302bd22ecbdaf35b1759e\n"));
    assert!(text.contains(" amount\t\t\t\t= 0.000000001000000000 ETH (0x3b9aca00)\n"));
    assert!(text.contains(" access list\t\t\t= []\n"));
}

#[test]
fn test_verbose_prints_structure_first() {
    let text = deraw(&["--raw", LEGACY_TX, "--verbose"]).unwrap();
    assert!(text.starts_with("[\n  02b2,\n  77359400,\n"));
    let body = text.find("tx: (type = 0)").unwrap();
    assert!(text[..body].ends_with("\n]\n"));
}

#[test]
fn test_strict_recovers_sender() {
    let text = deraw(&["--raw", ETH_TX, "--strict"]).unwrap();
    assert!(text.contains("FeeMarket("));
    assert!(text.contains(" sender\t\t\t\t= 0xfd94748666E47A0a1E6baE17eC72429390C66348\n"));
    assert!(text.contains(" hash\t\t\t\t= 0x"));
}

#[test]
fn test_strict_legacy_with_chain_id() {
    let text = deraw(&["--raw", LEGACY_TX, "--strict"]).unwrap();
    assert!(text.contains("Legacy("));
    assert!(text.contains(" sender\t\t\t\t= 0x"));
}

#[test]
fn test_errors_are_fatal() {
    assert!(deraw(&["--raw", "0xabc"]).is_err());
    assert!(deraw(&["--raw", "f9ffff01"]).is_err());
    assert!(deraw(&["--raw", "01c0"]).is_err());
    assert!(deraw(&[]).is_err());
}

#[test]
fn test_verbosity_count() {
    let args = Args::try_parse_from(["deraw", "--raw", "c0", "-vvv"]).unwrap();
    assert_eq!(args.log_filter(), "debug");
    let args = Args::try_parse_from(["deraw", "--raw", "c0"]).unwrap();
    assert_eq!(args.log_filter(), "error");
}
