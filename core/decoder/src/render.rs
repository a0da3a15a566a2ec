use crate::classify::{FeeMarketView, LegacyView, TxView, UintField};
use rawtx_primitives::{format_units, ETHER_DECIMALS, GWEI_DECIMALS};
use std::fmt;

fn hex0x(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

fn int(field: &UintField) -> String {
    format!("{} ({})", field.value, hex0x(&field.raw))
}

fn gwei(field: &UintField) -> String {
    format!("{} GWei ({})", format_units(&field.value, GWEI_DECIMALS), hex0x(&field.raw))
}

fn ether(field: &UintField) -> String {
    format!("{} ETH ({})", format_units(&field.value, ETHER_DECIMALS), hex0x(&field.raw))
}

impl fmt::Display for LegacyView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tx: (type = 0)")?;
        writeln!(f, " nonce \t\t\t\t= {}", int(&self.nonce))?;
        writeln!(f, " gas price\t\t\t= {}", gwei(&self.gas_price))?;
        writeln!(f, " gas limit\t\t\t= {}", int(&self.gas_limit))?;
        writeln!(f, " to\t\t\t\t= {}", hex0x(&self.to))?;
        writeln!(f, " value\t\t\t\t= {}", ether(&self.value))?;
        writeln!(f, " data\t\t\t\t= {}", hex0x(&self.data))?;
        writeln!(f, " v\t\t\t\t= {}", int(&self.v))?;
        writeln!(f, " r\t\t\t\t= {}", hex0x(&self.r.raw))?;
        writeln!(f, " s\t\t\t\t= {}", hex0x(&self.s.raw))
    }
}

impl fmt::Display for FeeMarketView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "tx: (type = 2)")?;
        writeln!(f, " chain id\t\t\t= {}", int(&self.chain_id))?;
        writeln!(f, " nonce\t\t\t\t= {}", int(&self.nonce))?;
        writeln!(
            f,
            " max priority fee (per gas)\t= {}",
            gwei(&self.max_priority_fee_per_gas)
        )?;
        writeln!(f, " max fee (per gas)\t\t= {}", gwei(&self.max_fee_per_gas))?;
        writeln!(f, " gas limit\t\t\t= {}", int(&self.gas_limit))?;
        writeln!(f, " destination\t\t\t= {}", hex0x(&self.destination))?;
        writeln!(f, " amount\t\t\t\t= {}", ether(&self.amount))?;
        writeln!(f, " data\t\t\t\t= {}", hex0x(&self.data))?;

        let entries: Vec<String> = self
            .access_list
            .iter()
            .filter(|leaf| !leaf.is_empty())
            .map(|leaf| hex0x(leaf))
            .collect();
        writeln!(f, " access list\t\t\t= [{}]", entries.join(", "))?;

        writeln!(f, " y parity\t\t\t= {}", int(&self.y_parity))?;
        writeln!(f, " r\t\t\t\t= {}", hex0x(&self.r.raw))?;
        writeln!(f, " s\t\t\t\t= {}", hex0x(&self.s.raw))
    }
}

impl fmt::Display for TxView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TxView::Legacy(tx) => fmt::Display::fmt(tx, f),
            TxView::FeeMarket(tx) => fmt::Display::fmt(tx, f),
        }
    }
}
