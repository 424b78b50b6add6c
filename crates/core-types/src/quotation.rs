use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single currency-exchange quotation, e.g. USD priced in BRL.
///
/// The field names follow the wire format of the upstream quote API
/// (`codein`, `pctChange`, `varBid`), which is also the shape the server
/// hands back to its own clients. Numeric fields arrive as decimal strings and
/// are kept as `Decimal` so the scale survives the round trip: a bid received
/// as `"5.3100"` is served back as `"5.3100"`.
///
/// Fields are private. A `Quotation` is only ever produced by decoding a
/// payload and is never changed afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    ask: Decimal,
    bid: Decimal,
    code: String,
    #[serde(rename = "codein")]
    code_in: String,
    high: Decimal,
    low: Decimal,
    name: String,
    pct_change: Decimal,
    var_bid: Decimal,
}

impl Quotation {
    /// The selling price of the base currency.
    pub fn ask(&self) -> Decimal {
        self.ask
    }

    /// The buying price of the base currency.
    pub fn bid(&self) -> Decimal {
        self.bid
    }

    /// The base currency symbol (e.g., "USD").
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The quote currency symbol (e.g., "BRL").
    pub fn code_in(&self) -> &str {
        &self.code_in
    }

    pub fn high(&self) -> Decimal {
        self.high
    }

    pub fn low(&self) -> Decimal {
        self.low
    }

    /// Human readable pair name, as provided upstream.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Percentage change since the previous close.
    pub fn pct_change(&self) -> Decimal {
        self.pct_change
    }

    /// Absolute variation of the bid since the previous close.
    pub fn var_bid(&self) -> Decimal {
        self.var_bid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use serde_json::json;

    fn upstream_value() -> serde_json::Value {
        json!({
            "code": "USD",
            "codein": "BRL",
            "name": "Dólar Americano/Real Brasileiro",
            "high": "5.3562",
            "low": "5.2998",
            "varBid": "0.0214",
            "pctChange": "0.4",
            "bid": "5.31",
            "ask": "5.32",
            "timestamp": "1718900000",
            "create_date": "2024-06-20 13:33:20"
        })
    }

    #[test]
    fn decodes_string_encoded_decimals() {
        let quotation: Quotation = serde_json::from_value(upstream_value()).unwrap();

        assert_eq!(quotation.bid(), dec!(5.31));
        assert_eq!(quotation.ask(), dec!(5.32));
        assert_eq!(quotation.code(), "USD");
        assert_eq!(quotation.code_in(), "BRL");
        assert_eq!(quotation.var_bid(), dec!(0.0214));
        assert_eq!(quotation.pct_change(), dec!(0.4));
    }

    #[test]
    fn serializes_back_with_original_scale() {
        let mut value = upstream_value();
        value["bid"] = json!("5.3100");
        let quotation: Quotation = serde_json::from_value(value).unwrap();

        let encoded = serde_json::to_string(&quotation).unwrap();
        assert!(encoded.contains(r#""bid":"5.3100""#));
        assert!(encoded.contains(r#""codein":"BRL""#));
        assert!(encoded.contains(r#""pctChange":"0.4""#));
        assert!(!encoded.contains("create_date"));
    }

    #[test]
    fn rejects_malformed_numeric() {
        let mut value = upstream_value();
        value["bid"] = json!("five point three");

        assert!(serde_json::from_value::<Quotation>(value).is_err());
    }

    #[test]
    fn rejects_missing_bid() {
        let mut value = upstream_value();
        value.as_object_mut().unwrap().remove("bid");

        assert!(serde_json::from_value::<Quotation>(value).is_err());
    }
}
