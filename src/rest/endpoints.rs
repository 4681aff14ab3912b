//! KIS REST API endpoint constants.

/// Base URL for the production API.
pub const KIS_BASE_URL: &str = "https://openapi.koreainvestment.com:9443";

/// Base URL for the paper-trading (virtual) API.
pub const KIS_PAPER_BASE_URL: &str = "https://openapivts.koreainvestment.com:29443";

/// OAuth2 endpoints.
pub mod oauth2 {
    /// Issue an access token.
    pub const TOKEN: &str = "oauth2/tokenP";
}

/// Domestic stock quotation endpoints.
pub mod domestic_stock {
    /// Current price.
    pub const INQUIRE_PRICE: &str = "/uapi/domestic-stock/v1/quotations/inquire-price";
    /// Daily/weekly/monthly price history.
    pub const INQUIRE_DAILY_PRICE: &str = "/uapi/domestic-stock/v1/quotations/inquire-daily-price";
}

/// Transaction IDs (`tr_id` header) identifying the report each request targets.
pub mod tr_id {
    /// Current price.
    pub const INQUIRE_PRICE: &str = "FHKST01010100";
    /// Daily price history.
    pub const INQUIRE_DAILY_PRICE: &str = "FHKST01010400";
}
