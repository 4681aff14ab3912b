//! Types for domestic stock quotation endpoints.
//!
//! Every value arrives as text on the wire and is kept as `String` here.
//! Typed accessors that parse into [`Decimal`] are layered on top; see
//! [`crate::types::numeric`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::KisError;
use crate::types::numeric::parse_decimal;

/// Market classifier for listed stocks (`FID_COND_MRKT_DIV_CODE`).
pub const MARKET_STOCK: &str = "J";

/// Result code KIS reports for a successful call.
pub const RT_CD_SUCCESS: &str = "0";

/// Request parameters for the current price endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InquirePriceRequest {
    /// Market classifier, `"J"` for stocks.
    #[serde(rename = "FID_COND_MRKT_DIV_CODE")]
    pub market_div_code: String,
    /// Instrument short code, e.g. `"000660"`.
    #[serde(rename = "FID_INPUT_ISCD")]
    pub instrument_code: String,
}

impl InquirePriceRequest {
    /// Create a new request.
    pub fn new(market_div_code: impl Into<String>, instrument_code: impl Into<String>) -> Self {
        Self {
            market_div_code: market_div_code.into(),
            instrument_code: instrument_code.into(),
        }
    }
}

/// Aggregation period for the daily price endpoint (`FID_PERIOD_DIV_CODE`).
///
/// KIS documents `D`, `W` and `M`; any other code is passed through as
/// [`PeriodDivCode::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PeriodDivCode {
    /// One record per trading day.
    #[default]
    Day,
    /// One record per week.
    Week,
    /// One record per month.
    Month,
    /// A code sent verbatim.
    Custom(String),
}

impl PeriodDivCode {
    /// The wire code.
    pub fn as_str(&self) -> &str {
        match self {
            PeriodDivCode::Day => "D",
            PeriodDivCode::Week => "W",
            PeriodDivCode::Month => "M",
            PeriodDivCode::Custom(code) => code,
        }
    }
}

impl From<&str> for PeriodDivCode {
    fn from(code: &str) -> Self {
        match code {
            "D" => PeriodDivCode::Day,
            "W" => PeriodDivCode::Week,
            "M" => PeriodDivCode::Month,
            other => PeriodDivCode::Custom(other.to_string()),
        }
    }
}

impl std::fmt::Display for PeriodDivCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for PeriodDivCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Request parameters for the daily price endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct InquireDailyPriceRequest {
    /// Market classifier, `"J"` for stocks.
    #[serde(rename = "FID_COND_MRKT_DIV_CODE")]
    pub market_div_code: String,
    /// Instrument short code.
    #[serde(rename = "FID_INPUT_ISCD")]
    pub instrument_code: String,
    /// Aggregation period.
    #[serde(rename = "FID_PERIOD_DIV_CODE")]
    pub period: PeriodDivCode,
    /// Adjusted-price flag, e.g. `"0000000001"`.
    #[serde(rename = "FID_ORG_ADJ_PRC")]
    pub org_adj_prc: String,
}

impl InquireDailyPriceRequest {
    /// Create a new request for daily records with flag `"0000000001"`.
    pub fn new(market_div_code: impl Into<String>, instrument_code: impl Into<String>) -> Self {
        Self {
            market_div_code: market_div_code.into(),
            instrument_code: instrument_code.into(),
            period: PeriodDivCode::Day,
            org_adj_prc: "0000000001".to_string(),
        }
    }

    /// Set the aggregation period. Accepts a [`PeriodDivCode`] or a raw code.
    pub fn period(mut self, period: impl Into<PeriodDivCode>) -> Self {
        self.period = period.into();
        self
    }

    /// Set the adjusted-price flag.
    pub fn org_adj_prc(mut self, flag: impl Into<String>) -> Self {
        self.org_adj_prc = flag.into();
        self
    }
}

/// Current price response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InquirePriceResponse {
    /// Quote payload.
    pub output: PriceOutput,
    /// Result code; `"0"` on success.
    pub rt_cd: String,
    /// Message code.
    pub msg_cd: String,
    /// Message text.
    pub msg1: String,
}

impl InquirePriceResponse {
    /// Whether KIS reported success in `rt_cd`.
    pub fn is_success(&self) -> bool {
        self.rt_cd == RT_CD_SUCCESS
    }
}

/// Current price snapshot for one instrument.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PriceOutput {
    /// Instrument status code.
    pub iscd_stat_cls_code: String,
    /// Margin rate.
    pub marg_rate: String,
    /// Representative market name (Korean).
    pub rprs_mrkt_kor_name: String,
    /// Industry name (Korean).
    pub bstp_kor_isnm: String,
    /// Trading halted flag.
    pub temp_stop_yn: String,
    /// Opening price range extended flag.
    pub oprc_rang_cont_yn: String,
    /// Closing price range extended flag.
    pub clpr_rang_cont_yn: String,
    /// Credit trading available flag.
    pub crdt_able_yn: String,
    /// Deposit rate class code.
    pub grmn_rate_cls_code: String,
    /// ELW issued flag.
    pub elw_pblc_yn: String,
    /// Current price.
    pub stck_prpr: String,
    /// Change versus previous day.
    pub prdy_vrss: String,
    /// Sign of the change versus previous day.
    pub prdy_vrss_sign: String,
    /// Change rate versus previous day (percent).
    pub prdy_ctrt: String,
    /// Accumulated trade value.
    pub acml_tr_pbmn: String,
    /// Accumulated volume.
    pub acml_vol: String,
    /// Volume ratio versus previous day.
    pub prdy_vrss_vol_rate: String,
    /// Open.
    pub stck_oprc: String,
    /// High.
    pub stck_hgpr: String,
    /// Low.
    pub stck_lwpr: String,
    /// Upper price limit.
    pub stck_mxpr: String,
    /// Lower price limit.
    pub stck_llam: String,
    /// Base price.
    pub stck_sdpr: String,
    /// Volume-weighted average price.
    pub wghn_avrg_stck_prc: String,
    /// Foreign ownership exhaustion rate.
    pub hts_frgn_ehrt: String,
    /// Foreign net buy quantity.
    pub frgn_ntby_qty: String,
    /// Program trading net buy quantity.
    pub pgtr_ntby_qty: String,
    /// Pivot second resistance.
    pub pvt_scnd_dmrs_prc: String,
    /// Pivot first resistance.
    pub pvt_frst_dmrs_prc: String,
    /// Pivot point.
    pub pvt_pont_val: String,
    /// Pivot first support.
    pub pvt_frst_dmsp_prc: String,
    /// Pivot second support.
    pub pvt_scnd_dmsp_prc: String,
    /// DeMark resistance.
    pub dmrs_val: String,
    /// DeMark support.
    pub dmsp_val: String,
    /// Capital.
    pub cpfn: String,
    /// Price limit width.
    pub rstc_wdth_prc: String,
    /// Face value.
    pub stck_fcam: String,
    /// Substitute price.
    pub stck_sspr: String,
    /// Tick size.
    pub aspr_unit: String,
    /// Trading lot size.
    pub hts_deal_qty_unit_val: String,
    /// Listed shares.
    pub lstn_stcn: String,
    /// Market capitalisation.
    pub hts_avls: String,
    /// Price/earnings ratio.
    pub per: String,
    /// Price/book ratio.
    pub pbr: String,
    /// Settlement month.
    pub stac_month: String,
    /// Volume turnover rate.
    pub vol_tnrt: String,
    /// Earnings per share.
    pub eps: String,
    /// Book value per share.
    pub bps: String,
    /// 250-day high.
    pub d250_hgpr: String,
    /// Date of the 250-day high.
    pub d250_hgpr_date: String,
    /// Current price relative to the 250-day high.
    pub d250_hgpr_vrss_prpr_rate: String,
    /// 250-day low.
    pub d250_lwpr: String,
    /// Date of the 250-day low.
    pub d250_lwpr_date: String,
    /// Current price relative to the 250-day low.
    pub d250_lwpr_vrss_prpr_rate: String,
    /// Year-to-date high.
    pub stck_dryy_hgpr: String,
    /// Current price relative to the year-to-date high.
    pub dryy_hgpr_vrss_prpr_rate: String,
    /// Date of the year-to-date high.
    pub dryy_hgpr_date: String,
    /// Year-to-date low.
    pub stck_dryy_lwpr: String,
    /// Current price relative to the year-to-date low.
    pub dryy_lwpr_vrss_prpr_rate: String,
    /// Date of the year-to-date low.
    pub dryy_lwpr_date: String,
    /// 52-week high.
    pub w52_hgpr: String,
    /// Current price relative to the 52-week high.
    pub w52_hgpr_vrss_prpr_ctrt: String,
    /// Date of the 52-week high.
    pub w52_hgpr_date: String,
    /// 52-week low.
    pub w52_lwpr: String,
    /// Current price relative to the 52-week low.
    pub w52_lwpr_vrss_prpr_ctrt: String,
    /// Date of the 52-week low.
    pub w52_lwpr_date: String,
    /// Loan balance ratio.
    pub whol_loan_rmnd_rate: String,
    /// Short selling available flag.
    pub ssts_yn: String,
    /// Instrument short code.
    pub stck_shrn_iscd: String,
    /// Face value currency.
    pub fcam_cnnm: String,
    /// Capital currency.
    pub cpfn_cnnm: String,
    /// Foreign holding quantity.
    pub frgn_hldn_qty: String,
    /// Volatility interruption class code.
    pub vi_cls_code: String,
    /// After-hours volatility interruption class code.
    pub ovtm_vi_cls_code: String,
    /// Last short-sale execution quantity.
    pub last_ssts_cntg_qty: String,
    /// Investment caution flag.
    pub invt_caful_yn: String,
    /// Market warning code.
    pub mrkt_warn_cls_code: String,
    /// Short-term overheating flag.
    pub short_over_yn: String,
    /// Liquidation trading flag.
    pub sltr_yn: String,
}

impl PriceOutput {
    /// Current price.
    pub fn current_price(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("stck_prpr", &self.stck_prpr)
    }

    /// Change rate versus previous day, in percent.
    pub fn change_rate(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("prdy_ctrt", &self.prdy_ctrt)
    }

    /// Accumulated volume.
    pub fn volume(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("acml_vol", &self.acml_vol)
    }
}

/// Daily price history response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct InquireDailyPriceResponse {
    /// Records, most recent first.
    pub output: Vec<DailyPrice>,
    /// Result code; `"0"` on success.
    pub rt_cd: String,
    /// Message code.
    pub msg_cd: String,
    /// Message text.
    pub msg1: String,
}

impl InquireDailyPriceResponse {
    /// Whether KIS reported success in `rt_cd`.
    pub fn is_success(&self) -> bool {
        self.rt_cd == RT_CD_SUCCESS
    }
}

/// One period of price history.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DailyPrice {
    /// Business date (`YYYYMMDD`).
    pub stck_bsop_date: String,
    /// Open.
    pub stck_oprc: String,
    /// High.
    pub stck_hgpr: String,
    /// Low.
    pub stck_lwpr: String,
    /// Close.
    pub stck_clpr: String,
    /// Accumulated volume.
    pub acml_vol: String,
    /// Volume ratio versus previous period.
    pub prdy_vrss_vol_rate: String,
    /// Change versus previous period.
    pub prdy_vrss: String,
    /// Sign of the change versus previous period.
    pub prdy_vrss_sign: String,
    /// Change rate versus previous period (percent).
    pub prdy_ctrt: String,
    /// Foreign ownership exhaustion rate.
    pub hts_frgn_ehrt: String,
    /// Foreign net buy quantity.
    pub frgn_ntby_qty: String,
    /// Ex-rights / ex-dividend class code.
    pub flng_cls_code: String,
    /// Accumulated split ratio.
    pub acml_prtt_rate: String,
}

impl DailyPrice {
    /// Open.
    pub fn open(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("stck_oprc", &self.stck_oprc)
    }

    /// High.
    pub fn high(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("stck_hgpr", &self.stck_hgpr)
    }

    /// Low.
    pub fn low(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("stck_lwpr", &self.stck_lwpr)
    }

    /// Close.
    pub fn close(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("stck_clpr", &self.stck_clpr)
    }

    /// Accumulated volume.
    pub fn volume(&self) -> Result<Option<Decimal>, KisError> {
        parse_decimal("acml_vol", &self.acml_vol)
    }
}
