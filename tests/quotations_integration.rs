use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use kis_api_client::auth::Credentials;
use kis_api_client::context::RequestContext;
use kis_api_client::error::{KisError, error_codes};
use kis_api_client::rest::domestic_stock::{
    InquireDailyPriceRequest, InquirePriceRequest, MARKET_STOCK, PeriodDivCode,
};
use kis_api_client::rest::{KisApi, KisClient};
use rust_decimal::Decimal;

fn build_client(server: &MockServer) -> KisClient {
    KisClient::builder()
        .base_url(server.uri())
        .credentials(Credentials::new("test_key", "test_secret"))
        .access_token("test_token")
        .build()
        .unwrap()
}

fn daily_row(date: &str, close: &str) -> serde_json::Value {
    serde_json::json!({
        "stck_bsop_date": date,
        "stck_oprc": "130000",
        "stck_hgpr": "133000",
        "stck_lwpr": "129500",
        "stck_clpr": close,
        "acml_vol": "2841237",
        "prdy_vrss_vol_rate": "-12.35",
        "prdy_vrss": "1500",
        "prdy_vrss_sign": "2",
        "prdy_ctrt": "1.15",
        "hts_frgn_ehrt": "53.87",
        "frgn_ntby_qty": "120345",
        "flng_cls_code": "00",
        "acml_prtt_rate": "0.00"
    })
}

#[tokio::test]
async fn test_inquire_price() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "output": {
            "iscd_stat_cls_code": "55",
            "rprs_mrkt_kor_name": "KOSPI200",
            "bstp_kor_isnm": "전기.전자",
            "stck_prpr": "131500",
            "prdy_vrss": "-1500",
            "prdy_vrss_sign": "5",
            "prdy_ctrt": "-1.13",
            "acml_vol": "2841237",
            "stck_shrn_iscd": "000660",
            "per": "15.06",
            "w52_hgpr": "149500",
            "w52_hgpr_date": "20231115"
        },
        "rt_cd": "0",
        "msg_cd": "MCA00000",
        "msg1": "정상처리 되었습니다."
    });

    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-price"))
        .and(query_param("FID_COND_MRKT_DIV_CODE", "J"))
        .and(query_param("FID_INPUT_ISCD", "000660"))
        .and(header("tr_id", "FHKST01010100"))
        .and(header("appkey", "test_key"))
        .and(header("appsecret", "test_secret"))
        .and(header("authorization", "Bearer test_token"))
        .and(header("content-type", "application/json; charset=utf-8"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquirePriceRequest::new(MARKET_STOCK, "000660");
    let (price, response) = client.inquire_price(&ctx, &request).await.unwrap();

    assert!(price.is_success());
    assert_eq!(price.rt_cd, "0");
    assert_eq!(price.output.bstp_kor_isnm, "전기.전자");
    assert_eq!(price.output.stck_shrn_iscd, "000660");
    assert_eq!(price.output.w52_hgpr_date, "20231115");
    assert!(price.output.sltr_yn.is_empty());
    assert_eq!(price.output.current_price().unwrap(), Some(Decimal::from(131_500)));
    assert!(response.is_success());
}

#[tokio::test]
async fn test_inquire_daily_price() {
    let server = MockServer::start().await;
    let response = serde_json::json!({
        "output": [
            daily_row("20240105", "131500"),
            daily_row("20240104", "130000"),
            daily_row("20240103", "128500")
        ],
        "rt_cd": "0",
        "msg_cd": "MCA00000",
        "msg1": "정상처리 되었습니다."
    });

    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-daily-price"))
        .and(query_param("FID_COND_MRKT_DIV_CODE", "J"))
        .and(query_param("FID_INPUT_ISCD", "000660"))
        .and(query_param("FID_PERIOD_DIV_CODE", "D"))
        .and(query_param("FID_ORG_ADJ_PRC", "0000000001"))
        .and(header("tr_id", "FHKST01010400"))
        .and(header("authorization", "Bearer test_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(response))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquireDailyPriceRequest::new(MARKET_STOCK, "000660")
        .period(PeriodDivCode::Day)
        .org_adj_prc("0000000001");
    let (history, _) = client.inquire_daily_price(&ctx, &request).await.unwrap();

    assert_eq!(history.rt_cd, "0");
    let dates: Vec<&str> = history
        .output
        .iter()
        .map(|day| day.stck_bsop_date.as_str())
        .collect();
    assert_eq!(dates, ["20240105", "20240104", "20240103"]);
    assert_eq!(history.output[2].close().unwrap(), Some(Decimal::from(128_500)));
    assert!(history.output.iter().all(|day| day.flng_cls_code == "00"));
}

#[tokio::test]
async fn test_monthly_period_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-daily-price"))
        .and(query_param("FID_PERIOD_DIV_CODE", "M"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": [],
            "rt_cd": "0",
            "msg_cd": "MCA00000",
            "msg1": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquireDailyPriceRequest::new("J", "005930").period(PeriodDivCode::Month);
    let (history, _) = client.inquire_daily_price(&ctx, &request).await.unwrap();
    assert!(history.output.is_empty());
}

#[tokio::test]
async fn test_custom_period_code_is_sent_verbatim() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-daily-price"))
        .and(query_param("FID_PERIOD_DIV_CODE", "Y"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": [daily_row("20231228", "141500")],
            "rt_cd": "0",
            "msg_cd": "MCA00000",
            "msg1": ""
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquireDailyPriceRequest::new("J", "000660")
        .period(PeriodDivCode::Custom("Y".to_string()));
    let (history, _) = client.inquire_daily_price(&ctx, &request).await.unwrap();
    assert_eq!(history.output.len(), 1);
}

#[tokio::test]
async fn test_application_failure_is_not_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "rt_cd": "1",
            "msg_cd": "OPSQ0002",
            "msg1": "없는 서비스 코드 입니다"
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquirePriceRequest::new("J", "999999");
    let (price, _) = client.inquire_price(&ctx, &request).await.unwrap();

    assert!(!price.is_success());
    assert_eq!(price.msg_cd, "OPSQ0002");
    assert!(price.output.stck_prpr.is_empty());
}

#[tokio::test]
async fn test_expired_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-price"))
        .respond_with(ResponseTemplate::new(500).set_body_json(serde_json::json!({
            "rt_cd": "1",
            "msg_cd": "EGW00123",
            "msg1": "기간이 만료된 token 입니다.",
            "error_code": "EGW00123",
            "error_description": "기간이 만료된 token 입니다."
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    let ctx = RequestContext::background();
    let request = InquirePriceRequest::new("J", "000660");
    let err = client.inquire_price(&ctx, &request).await.unwrap_err();
    match err {
        KisError::Api(api_error) => {
            assert_eq!(api_error.error_code, error_codes::TOKEN_EXPIRED);
            let body: serde_json::Value =
                serde_json::from_slice(api_error.response().body()).unwrap();
            assert_eq!(body["msg_cd"], "EGW00123");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_through_trait() {
    async fn industry<C: KisApi>(client: &C) -> Result<String, KisError> {
        let ctx = RequestContext::background();
        let (price, _) = client
            .inquire_price(&ctx, &InquirePriceRequest::new("J", "000660"))
            .await?;
        Ok(price.output.bstp_kor_isnm)
    }

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/uapi/domestic-stock/v1/quotations/inquire-price"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "output": { "bstp_kor_isnm": "전기.전자" },
            "rt_cd": "0",
            "msg_cd": "MCA00000",
            "msg1": "정상처리 되었습니다."
        })))
        .mount(&server)
        .await;

    let client = build_client(&server);
    assert_eq!(industry(&client).await.unwrap(), "전기.전자");
}
