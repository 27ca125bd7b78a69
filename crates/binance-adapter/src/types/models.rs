/*
[INPUT]:  Raw Binance response records (market, margin, wallet, earn)
[OUTPUT]: Typed entities decoded with per-field defaults
[POS]:    Data layer - type definitions for API communication
[UPDATE]: When API schema changes or new entities are added
*/

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use crate::decode::{Decode, DecodeResult, RawRecord, round_to};

use super::enums::{InterestType, Side, TimeInForce, TransactionStatus};

/// Rolling-window or 24hr ticker statistics for one symbol
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RollingTicker {
    pub symbol: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_change: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price_change_percent: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub weighted_avg_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub open_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub high_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub low_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub last_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub volume: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub quote_volume: Decimal,
    pub open_time: i64,
    pub close_time: i64,
    pub first_id: i64,
    pub last_id: i64,
    pub count: i64,
}

impl Decode for RollingTicker {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            symbol: record.mandatory_str("symbol")?,
            price_change: record.decimal_or_zero("priceChange")?,
            price_change_percent: record.decimal_or_zero("priceChangePercent")?,
            weighted_avg_price: record.decimal_or_zero("weightedAvgPrice")?,
            open_price: record.decimal_or_zero("openPrice")?,
            high_price: record.decimal_or_zero("highPrice")?,
            low_price: record.decimal_or_zero("lowPrice")?,
            last_price: record.decimal_or_zero("lastPrice")?,
            volume: record.decimal_or_zero("volume")?,
            quote_volume: record.decimal_or_zero("quoteVolume")?,
            open_time: record.i64_or_zero("openTime")?,
            close_time: record.i64_or_zero("closeTime")?,
            first_id: record.i64_or_zero("firstId")?,
            last_id: record.i64_or_zero("lastId")?,
            count: record.i64_or_zero("count")?,
        })
    }
}

impl RollingTicker {
    pub fn last_price_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.last_price, digits)
    }

    pub fn open_price_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.open_price, digits)
    }

    pub fn price_change_percent_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.price_change_percent, digits)
    }
}

/// One margin borrow or repay transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowRepayRecord {
    pub tx_id: i64,
    pub asset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_symbol: Option<String>,
    /// `AUTO` or `MANUAL` borrow origin
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub interest: Decimal,
    pub status: TransactionStatus,
    pub timestamp: i64,
}

impl Decode for BorrowRepayRecord {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            tx_id: record.i64_or_zero("txId")?,
            asset: record.str_or_empty("asset")?,
            isolated_symbol: non_empty(record.opt_str("isolatedSymbol")?),
            origin: record.opt_str("type")?,
            amount: record.decimal_or_zero("amount")?,
            principal: record.decimal_or_zero("principal")?,
            interest: record.decimal_or_zero("interest")?,
            status: record.enum_field("status")?,
            timestamp: record.i64_or_zero("timestamp")?,
        })
    }
}

/// One margin interest accrual
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InterestRecord {
    pub tx_id: i64,
    /// Accrual time in milliseconds; Binance spells the key `interestAccuredTime`
    #[serde(rename = "interestAccuredTime")]
    pub interest_accrued_time: i64,
    pub asset: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_asset: Option<String>,
    #[serde(with = "rust_decimal::serde::str")]
    pub principal: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub interest_rate: Decimal,
    #[serde(rename = "type")]
    pub interest_type: InterestType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isolated_symbol: Option<String>,
}

impl Decode for InterestRecord {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            tx_id: record.i64_or_zero("txId")?,
            interest_accrued_time: record.i64_or_zero("interestAccuredTime")?,
            asset: record.str_or_empty("asset")?,
            raw_asset: record.opt_str("rawAsset")?,
            principal: record.decimal_or_zero("principal")?,
            interest: record.decimal_or_zero("interest")?,
            interest_rate: record.decimal_or_zero("interestRate")?,
            interest_type: record.enum_field("type")?,
            isolated_symbol: non_empty(record.opt_str("isolatedSymbol")?),
        })
    }
}

/// An order the liquidation engine placed on the account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ForceLiquidationRecord {
    pub symbol: String,
    pub order_id: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub avg_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub executed_qty: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub qty: Decimal,
    pub side: Side,
    pub time_in_force: TimeInForce,
    pub is_isolated: bool,
    pub updated_time: i64,
}

impl Decode for ForceLiquidationRecord {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            symbol: record.mandatory_str("symbol")?,
            order_id: record.mandatory_i64("orderId")?,
            avg_price: record.decimal_or_zero("avgPrice")?,
            executed_qty: record.decimal_or_zero("executedQty")?,
            price: record.decimal_or_zero("price")?,
            qty: record.decimal_or_zero("qty")?,
            side: record.enum_field("side")?,
            time_in_force: record.enum_field("timeInForce")?,
            is_isolated: record.bool_or_false("isIsolated")?,
            updated_time: record.i64_or_zero("updatedTime")?,
        })
    }
}

/// Simple Earn flexible savings position
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlexiblePosition {
    pub asset: String,
    pub product_id: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub latest_annual_percentage_rate: Decimal,
    /// Tiered APR keyed by balance band, e.g. `"0-5BTC"`
    pub tier_annual_percentage_rate: BTreeMap<String, Decimal>,
    #[serde(with = "rust_decimal::serde::str")]
    pub yesterday_real_time_rewards: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cumulative_bonus_rewards: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cumulative_real_time_rewards: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub cumulative_total_rewards: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub collateral_amount: Decimal,
    pub can_redeem: bool,
    pub auto_subscribe: bool,
}

impl Decode for FlexiblePosition {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            asset: record.str_or_empty("asset")?,
            product_id: record.str_or_empty("productId")?,
            total_amount: record.decimal_or_zero("totalAmount")?,
            latest_annual_percentage_rate: record.decimal_or_zero("latestAnnualPercentageRate")?,
            tier_annual_percentage_rate: record.decimal_map("tierAnnualPercentageRate")?,
            yesterday_real_time_rewards: record.decimal_or_zero("yesterdayRealTimeRewards")?,
            cumulative_bonus_rewards: record.decimal_or_zero("cumulativeBonusRewards")?,
            cumulative_real_time_rewards: record.decimal_or_zero("cumulativeRealTimeRewards")?,
            cumulative_total_rewards: record.decimal_or_zero("cumulativeTotalRewards")?,
            collateral_amount: record.decimal_or_zero("collateralAmount")?,
            can_redeem: record.bool_or_false("canRedeem")?,
            auto_subscribe: record.bool_or_false("autoSubscribe")?,
        })
    }
}

/// One asset converted to BNB in a dust transfer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DustLogDetail {
    pub trans_id: i64,
    pub from_asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub transfered_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub service_charge_amount: Decimal,
    pub operate_time: i64,
}

impl Decode for DustLogDetail {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            trans_id: record.i64_or_zero("transId")?,
            from_asset: record.str_or_empty("fromAsset")?,
            amount: record.decimal_or_zero("amount")?,
            transfered_amount: record.decimal_or_zero("transferedAmount")?,
            service_charge_amount: record.decimal_or_zero("serviceChargeAmount")?,
            operate_time: record.i64_or_zero("operateTime")?,
        })
    }
}

/// One dust conversion, grouping the assets it swept
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DustLog {
    pub trans_id: i64,
    pub operate_time: i64,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_transfered_amount: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_service_charge_amount: Decimal,
    pub details: Vec<DustLogDetail>,
}

impl Decode for DustLog {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            trans_id: record.i64_or_zero("transId")?,
            operate_time: record.i64_or_zero("operateTime")?,
            total_transfered_amount: record.decimal_or_zero("totalTransferedAmount")?,
            total_service_charge_amount: record.decimal_or_zero("totalServiceChargeAmount")?,
            details: record.records("userAssetDribbletDetails", DustLogDetail::decode)?,
        })
    }
}

/// Per-asset balance inside a cross margin account
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAsset {
    pub asset: String,
    #[serde(with = "rust_decimal::serde::str")]
    pub borrowed: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub free: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub interest: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub locked: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub net_asset: Decimal,
}

impl Decode for MarginAsset {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            asset: record.str_or_empty("asset")?,
            borrowed: record.decimal_or_zero("borrowed")?,
            free: record.decimal_or_zero("free")?,
            interest: record.decimal_or_zero("interest")?,
            locked: record.decimal_or_zero("locked")?,
            net_asset: record.decimal_or_zero("netAsset")?,
        })
    }
}

impl MarginAsset {
    /// Overwrite only the balance fields present in `patch`
    ///
    /// Every field is decoded before any is written; on error the asset is untouched.
    pub fn apply_patch(&mut self, patch: &RawRecord<'_>) -> DecodeResult<()> {
        let borrowed = patch.opt_decimal("borrowed")?;
        let free = patch.opt_decimal("free")?;
        let interest = patch.opt_decimal("interest")?;
        let locked = patch.opt_decimal("locked")?;
        let net_asset = patch.opt_decimal("netAsset")?;

        let updates = [
            (&mut self.borrowed, borrowed),
            (&mut self.free, free),
            (&mut self.interest, interest),
            (&mut self.locked, locked),
            (&mut self.net_asset, net_asset),
        ];
        for (slot, value) in updates {
            if let Some(value) = value {
                *slot = value;
            }
        }
        Ok(())
    }

    pub fn total(&self) -> Decimal {
        self.free + self.locked
    }
}

/// Cross margin account snapshot; mutable so callers can patch it between snapshots
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarginAccount {
    pub borrow_enabled: bool,
    pub trade_enabled: bool,
    pub transfer_enabled: bool,
    #[serde(with = "rust_decimal::serde::str")]
    pub margin_level: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_asset_of_btc: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_liability_of_btc: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub total_net_asset_of_btc: Decimal,
    pub user_assets: Vec<MarginAsset>,
}

impl Decode for MarginAccount {
    fn decode(record: &RawRecord<'_>) -> DecodeResult<Self> {
        Ok(Self {
            borrow_enabled: record.bool_or_false("borrowEnabled")?,
            trade_enabled: record.bool_or_false("tradeEnabled")?,
            transfer_enabled: record.bool_or_false("transferEnabled")?,
            margin_level: record.decimal_or_zero("marginLevel")?,
            total_asset_of_btc: record.decimal_or_zero("totalAssetOfBtc")?,
            total_liability_of_btc: record.decimal_or_zero("totalLiabilityOfBtc")?,
            total_net_asset_of_btc: record.decimal_or_zero("totalNetAssetOfBtc")?,
            user_assets: record.records("userAssets", MarginAsset::decode)?,
        })
    }
}

impl MarginAccount {
    pub fn asset(&self, asset: &str) -> Option<&MarginAsset> {
        self.user_assets.iter().find(|entry| entry.asset == asset)
    }

    pub fn set_margin_level(&mut self, margin_level: Decimal) {
        self.margin_level = margin_level;
    }

    /// Replace the balance for `update.asset`, appending it when unseen
    pub fn apply_asset_update(&mut self, update: MarginAsset) {
        match self
            .user_assets
            .iter_mut()
            .find(|entry| entry.asset == update.asset)
        {
            Some(entry) => *entry = update,
            None => self.user_assets.push(update),
        }
    }

    /// Assets with a non-zero borrow outstanding
    pub fn borrowed_assets(&self) -> impl Iterator<Item = &MarginAsset> {
        self.user_assets
            .iter()
            .filter(|entry| !entry.borrowed.is_zero())
    }

    pub fn margin_level_rounded(&self, digits: i32) -> DecodeResult<Decimal> {
        round_to(self.margin_level, digits)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|inner| !inner.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{ModelError, PagedRowList, decode_value};
    use serde_json::json;

    fn dec(raw: &str) -> Decimal {
        raw.parse().expect("decimal literal")
    }

    #[test]
    fn test_rolling_ticker_maps_keys_by_name() {
        let value = json!({
            "symbol": "BNBBTC",
            "priceChange": "-8.00000000",
            "priceChangePercent": "-88.889",
            "weightedAvgPrice": "2.60427807",
            "openPrice": "9.00000000",
            "highPrice": "9.00000000",
            "lowPrice": "1.00000000",
            "lastPrice": "1.00000000",
            "volume": "187.00000000",
            "quoteVolume": "487.00000000",
            "openTime": 1641859200000_i64,
            "closeTime": 1642031999999_i64,
            "firstId": 0,
            "lastId": 60,
            "count": 61
        });

        let ticker: RollingTicker = decode_value(&value).expect("ticker should decode");

        assert_eq!(ticker.open_price, dec("9"));
        assert_eq!(ticker.last_price, dec("1"));
        assert_eq!(ticker.count, 61);
        assert_eq!(ticker.price_change_percent_rounded(1).unwrap(), dec("-88.9"));
    }

    #[test]
    fn test_borrow_repay_rows_decode_into_paged_list() {
        let value = json!({
            "rows": [{
                "type": "AUTO",
                "isolatedSymbol": "BNBUSDT",
                "amount": "14.00000000",
                "asset": "BNB",
                "interest": "0.01866667",
                "principal": "13.98133333",
                "status": "CONFIRMED",
                "timestamp": 1563438204000_i64,
                "txId": 2970933056_i64
            }],
            "total": 1
        });

        let list: PagedRowList<BorrowRepayRecord> =
            decode_value(&value).expect("history should decode");
        let row = list.get(0).unwrap();

        assert_eq!(list.total(), 1);
        assert_eq!(row.status, TransactionStatus::Confirmed);
        assert_eq!(row.isolated_symbol.as_deref(), Some("BNBUSDT"));
        assert_eq!(row.principal, dec("13.98133333"));
    }

    #[test]
    fn test_borrow_repay_unknown_status_fails() {
        let value = json!({ "rows": [{ "asset": "BNB", "status": "DONE" }], "total": 1 });
        let result: DecodeResult<PagedRowList<BorrowRepayRecord>> = decode_value(&value);

        assert_eq!(
            result.unwrap_err(),
            ModelError::UnknownEnumValue {
                field: "status",
                value: "DONE".to_string(),
            }
        );
    }

    #[test]
    fn test_interest_record_reads_misspelled_key() {
        let value = json!({
            "txId": 1352286576452864727_i64,
            "interestAccuredTime": 1672160400000_i64,
            "asset": "USDT",
            "rawAsset": "USDT",
            "principal": "45.3313",
            "interest": "0.00024995",
            "interestRate": "0.00013233",
            "type": "ON_BORROW",
            "isolatedSymbol": ""
        });

        let record: InterestRecord = decode_value(&value).expect("interest should decode");

        assert_eq!(record.interest_accrued_time, 1_672_160_400_000);
        assert_eq!(record.interest_type, InterestType::OnBorrow);
        assert_eq!(record.isolated_symbol, None);
    }

    #[test]
    fn test_force_liquidation_requires_identity() {
        let value = json!({ "symbol": "BNBBTC", "side": "SELL", "timeInForce": "GTC" });
        let result: DecodeResult<ForceLiquidationRecord> = decode_value(&value);

        assert_eq!(
            result.unwrap_err(),
            ModelError::MissingMandatoryField { field: "orderId" }
        );
    }

    #[test]
    fn test_flexible_position_decodes_tier_map() {
        let value = json!({
            "totalAmount": "75.46000000",
            "tierAnnualPercentageRate": { "0-5BTC": 0.05, "5-10BTC": 0.03 },
            "latestAnnualPercentageRate": "0.02599895",
            "asset": "USDT",
            "canRedeem": true,
            "collateralAmount": "232.23123213",
            "productId": "USDT001",
            "yesterdayRealTimeRewards": "0.10293829",
            "cumulativeBonusRewards": "0.22759183",
            "cumulativeRealTimeRewards": "0.22759183",
            "cumulativeTotalRewards": "0.45459183",
            "autoSubscribe": true
        });

        let position: FlexiblePosition = decode_value(&value).expect("position should decode");

        assert_eq!(position.tier_annual_percentage_rate.len(), 2);
        assert_eq!(position.tier_annual_percentage_rate["0-5BTC"], dec("0.05"));
        assert!(position.can_redeem);
    }

    #[test]
    fn test_dust_log_rows_carry_nested_details() {
        let value = json!({
            "total": 8,
            "userAssetDribblets": [{
                "operateTime": 1615985535000_i64,
                "totalTransferedAmount": "0.00132256",
                "totalServiceChargeAmount": "0.00002699",
                "transId": 45178372831_i64,
                "userAssetDribbletDetails": [
                    {
                        "transId": 4359321,
                        "serviceChargeAmount": "0.000009",
                        "amount": "0.0009",
                        "operateTime": 1615985535000_i64,
                        "transferedAmount": "0.000441",
                        "fromAsset": "USDT"
                    },
                    {
                        "transId": 4359321,
                        "serviceChargeAmount": "0.00001799",
                        "amount": "0.0009",
                        "operateTime": 1615985535000_i64,
                        "transferedAmount": "0.00088156",
                        "fromAsset": "ETH"
                    }
                ]
            }]
        });
        let record = RawRecord::from_value(&value).unwrap();

        let list = PagedRowList::decode_with(&record, "userAssetDribblets", DustLog::decode)
            .expect("dust log should decode");

        assert_eq!(list.total(), 8);
        assert_eq!(list.len(), 1);
        let details = &list.get(0).unwrap().details;
        assert_eq!(details.len(), 2);
        assert_eq!(details[1].from_asset, "ETH");
    }

    #[test]
    fn test_margin_account_accepts_local_patches() {
        let value = json!({
            "borrowEnabled": true,
            "marginLevel": "11.64405625",
            "totalAssetOfBtc": "6.82728457",
            "totalLiabilityOfBtc": "0.58633215",
            "totalNetAssetOfBtc": "6.24095242",
            "tradeEnabled": true,
            "transferEnabled": true,
            "userAssets": [
                { "asset": "BTC", "borrowed": "0.00000000", "free": "0.00499500", "interest": "0.00000000", "locked": "0.00000000", "netAsset": "0.00499500" },
                { "asset": "BNB", "borrowed": "201.66666672", "free": "2346.50000000", "interest": "0.00000000", "locked": "0.00000000", "netAsset": "2144.83333328" }
            ]
        });
        let mut account: MarginAccount = decode_value(&value).expect("account should decode");

        assert_eq!(account.borrowed_assets().count(), 1);

        let patch = json!({ "free": "1.5", "locked": "0.5" });
        let btc = account
            .user_assets
            .iter_mut()
            .find(|entry| entry.asset == "BTC")
            .unwrap();
        btc.apply_patch(&RawRecord::from_value(&patch).unwrap()).unwrap();
        assert_eq!(account.asset("BTC").unwrap().total(), dec("2"));
        assert_eq!(account.asset("BTC").unwrap().net_asset, dec("0.004995"));

        account.apply_asset_update(MarginAsset {
            asset: "ETH".to_string(),
            borrowed: Decimal::ZERO,
            free: dec("3"),
            interest: Decimal::ZERO,
            locked: Decimal::ZERO,
            net_asset: dec("3"),
        });
        account.set_margin_level(dec("12.5"));

        assert_eq!(account.user_assets.len(), 3);
        assert_eq!(account.margin_level_rounded(0).unwrap(), dec("13"));
    }

    #[test]
    fn test_failed_patch_leaves_asset_unchanged() {
        let mut asset = MarginAsset {
            asset: "BTC".to_string(),
            borrowed: Decimal::ZERO,
            free: dec("1"),
            interest: Decimal::ZERO,
            locked: Decimal::ZERO,
            net_asset: dec("1"),
        };
        let before = asset.clone();

        let patch = json!({ "free": "5", "locked": "bad" });
        let err = asset
            .apply_patch(&RawRecord::from_value(&patch).unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            ModelError::InvalidFieldValue {
                field: "locked",
                value: "bad".to_string()
            }
        );
        assert_eq!(asset, before);
    }
}
