// Integration tests for the Moralis client against a mock server
use super::*;
use crate::error::ApiError;
use mockito::Matcher;

const TOKEN_BODY: &str = r#"[
    {
        "token_address": "0xa0b86991c6218b36c1d19d4a2e9eb0ce3606eb48",
        "symbol": "USDC",
        "name": "USD Coin",
        "logo": "https://logo.moralis.io/usdc.png",
        "thumbnail": null,
        "decimals": 6,
        "balance": "123450000",
        "possible_spam": false,
        "verified_contract": true
    },
    {
        "token_address": "0x111111111117dc0aa78b770fa6a738034120c302",
        "symbol": "1INCH",
        "name": "1INCH Token",
        "logo": null,
        "thumbnail": null,
        "decimals": 18,
        "balance": "999999999999999999999999",
        "possible_spam": true,
        "verified_contract": false
    }
]"#;

fn client_for(server: &mockito::ServerGuard) -> MoralisClient {
    MoralisClient::with_base_url(server.url(), Some("test-key".to_string())).unwrap()
}

#[tokio::test]
async fn fetch_tokens_decodes_bare_array() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/0x1234/erc20")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("chain".into(), "eth".into()),
            Matcher::UrlEncoded("exclude_spam".into(), "false".into()),
        ]))
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(TOKEN_BODY)
        .create_async()
        .await;

    let client = client_for(&server);
    let tokens = client.fetch_tokens("eth", "0x1234").await.unwrap();

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].symbol, "USDC");
    assert_eq!(tokens[0].balance, "123450000");
    assert!(tokens[0].verified_contract);
    // spam assets are passed through, not filtered
    assert!(tokens[1].possible_spam);
    assert_eq!(tokens[1].balance, "999999999999999999999999");
}

#[tokio::test]
async fn fetch_nfts_extracts_result_array() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/0x1234/nft")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("format".into(), "decimal".into()),
            Matcher::UrlEncoded("chain".into(), "sepolia".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{
                "status": "SYNCED",
                "page": 1,
                "page_size": 100,
                "cursor": null,
                "result": [
                    {
                        "token_id": "115792089237316195423570985008687907853269984665640564039457584007913129639935",
                        "token_address": "0xbc4ca0eda7647a8ab7c2061c2e118a18a936f13d",
                        "contract_type": "ERC721",
                        "last_metadata_sync": "2024-01-15T10:30:00.000Z",
                        "last_token_uri_sync": "2024-01-15T10:29:58.000Z",
                        "name": "BoredApeYachtClub",
                        "symbol": "BAYC",
                        "token_hash": "deadbeef",
                        "token_uri": "ipfs://QmeSjSinHpPnmXmspMjwiXyN6zS4E9zccariGR3jxcaWtq/1",
                        "verified_collection": true,
                        "possible_spam": false,
                        "collection_logo": null,
                        "collection_banner_image": null
                    }
                ]
            }"#,
        )
        .create_async()
        .await;

    let client = client_for(&server);
    let nfts = client.fetch_nfts("sepolia", "0x1234").await.unwrap();

    assert_eq!(nfts.len(), 1);
    assert_eq!(nfts[0].contract_type, "ERC721");
    assert_eq!(nfts[0].name.as_deref(), Some("BoredApeYachtClub"));
    // token ids larger than u64 survive as strings
    assert!(nfts[0].token_id.len() > 20);
}

#[tokio::test]
async fn fetch_nfts_follows_cursor_across_pages() {
    let mut server = mockito::Server::new_async().await;

    let nft = |id: &str| {
        format!(
            r#"{{"token_id": "{id}", "token_address": "0xabab", "contract_type": "ERC1155",
                 "last_metadata_sync": null, "last_token_uri_sync": null,
                 "name": null, "symbol": null, "token_hash": null, "token_uri": null,
                 "verified_collection": false, "possible_spam": false,
                 "collection_logo": null, "collection_banner_image": null}}"#
        )
    };

    // First page carries a cursor; mockito picks the most recently defined
    // matching mock, so the cursor-specific one must come second.
    let _page1 = server
        .mock("GET", "/0x1234/nft")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"status": "SYNCED", "page": 1, "page_size": 1, "cursor": "next-page", "result": [{}]}}"#,
            nft("1")
        ))
        .create_async()
        .await;

    let _page2 = server
        .mock("GET", "/0x1234/nft")
        .match_query(Matcher::UrlEncoded("cursor".into(), "next-page".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(format!(
            r#"{{"status": "SYNCED", "page": 2, "page_size": 1, "cursor": null, "result": [{}]}}"#,
            nft("2")
        ))
        .create_async()
        .await;

    let client = client_for(&server);
    let nfts = client.fetch_nfts("eth", "0x1234").await.unwrap();

    assert_eq!(nfts.len(), 2);
    assert_eq!(nfts[0].token_id, "1");
    assert_eq!(nfts[1].token_id, "2");
}

#[tokio::test]
async fn pagination_cap_terminates_an_endless_cursor() {
    let mut server = mockito::Server::new_async().await;

    // Every page advertises another cursor; the fetch must stop at the page
    // cap and keep what it collected instead of looping forever.
    let m = server
        .mock("GET", "/0x1234/nft")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"status": "SYNCED", "page": 1, "page_size": 1, "cursor": "more",
                "result": [
                    {"token_id": "7", "token_address": "0xabab", "contract_type": "ERC721",
                     "last_metadata_sync": null, "last_token_uri_sync": null,
                     "name": null, "symbol": null, "token_hash": null, "token_uri": null,
                     "verified_collection": false, "possible_spam": false,
                     "collection_logo": null, "collection_banner_image": null}
                ]}"#,
        )
        .expect(super::client::MAX_NFT_PAGES)
        .create_async()
        .await;

    let client = client_for(&server);
    let nfts = client.fetch_nfts("eth", "0x1234").await.unwrap();

    // one NFT per page, exactly cap pages fetched
    assert_eq!(nfts.len(), super::client::MAX_NFT_PAGES);
    m.assert_async().await;
}

#[tokio::test]
async fn unauthorized_is_an_upstream_error() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/0x1234/erc20")
        .match_query(Matcher::Any)
        .with_status(401)
        .with_body(r#"{"message": "invalid api key"}"#)
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_tokens("eth", "0x1234").await.unwrap_err();

    match err {
        ApiError::Upstream { status, .. } => assert_eq!(status, 401),
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

#[tokio::test]
async fn malformed_json_is_a_decode_error() {
    let mut server = mockito::Server::new_async().await;

    let _m = server
        .mock("GET", "/0x1234/erc20")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("{not json")
        .create_async()
        .await;

    let client = client_for(&server);
    let err = client.fetch_tokens("eth", "0x1234").await.unwrap_err();

    assert!(matches!(err, ApiError::Decode(_)), "got {err:?}");
}

#[test]
fn client_requires_an_api_key() {
    assert!(MoralisClient::new(None).is_err());
    assert!(MoralisClient::new(Some("key".to_string())).is_ok());
}
