use super::*;

fn fetcher() -> ArtworkFetcher {
    ArtworkFetcher::new(Duration::from_millis(500)).unwrap()
}

#[test]
fn zero_timeout_is_rejected() {
    let err = ArtworkFetcher::new(Duration::ZERO).unwrap_err();
    assert!(matches!(err, CardError::Validation(_)));
}

#[tokio::test]
async fn empty_url_short_circuits_to_placeholder() {
    let f = fetcher();
    let art = f.fetch("   ", [20, 20, 30, 255]).await;
    assert!(art.is_placeholder());
    assert_eq!(art.image.dimensions(), (1280, 720));
    assert_eq!(art.image.get_pixel(0, 0).0, [20, 20, 30, 255]);
    assert_eq!(art.image.get_pixel(1279, 719).0, [20, 20, 30, 255]);
}

#[tokio::test]
async fn invalid_url_falls_back_with_reason() {
    let f = fetcher();
    let art = f.fetch("not a url", [1, 2, 3, 255]).await;
    match art.source {
        ArtSource::Placeholder { reason } => assert!(reason.starts_with("fetch error")),
        ArtSource::Remote => panic!("expected placeholder"),
    }
}

#[tokio::test]
async fn try_fetch_reports_connection_refused_as_fetch_error() {
    // Bind then drop to obtain a loopback port with nothing listening.
    let port = {
        let l = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        l.local_addr().unwrap().port()
    };
    let err = fetcher()
        .try_fetch(&format!("http://127.0.0.1:{port}/art.png"))
        .await
        .unwrap_err();
    assert!(matches!(err, CardError::Fetch(_)), "{err}");
}
