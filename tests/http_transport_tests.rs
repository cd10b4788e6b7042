use chart_submit::api::{CollectingNotifier, OptionSubmitter, SubmitterConfig};
use chart_submit::core::{ChartSpec, OutputKind};
use chart_submit::error::SubmitError;
use chart_submit::transport::{HttpTransport, RenderRequest, RenderTransport};
use mockito::Matcher;
use serde_json::json;

fn transport_for(server: &mockito::Server) -> HttpTransport {
    HttpTransport::new(&SubmitterConfig::new(server.url())).expect("transport")
}

#[test]
fn render_url_only_carries_output_type_for_png() {
    let transport =
        HttpTransport::new(&SubmitterConfig::new("http://charts.local:7001")).expect("transport");
    let spec = ChartSpec::new(json!({}));

    let svg = transport.render_url(&RenderRequest::new(spec.clone(), OutputKind::Svg));
    assert_eq!(svg.as_str(), "http://charts.local:7001/");
    assert_eq!(svg.query(), None);

    let png = transport.render_url(&RenderRequest::new(spec, OutputKind::Png));
    assert_eq!(png.as_str(), "http://charts.local:7001/?outputType=png");
}

#[test]
fn svg_submission_posts_json_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_header("content-type", "application/json")
        .match_body(Matcher::Json(json!({"title": {"text": "Sales"}})))
        .with_status(200)
        .with_body("<svg>sales</svg>")
        .create();

    let mut submitter = OptionSubmitter::new(transport_for(&server), SubmitterConfig::default())
        .expect("submitter init");
    submitter.set_editor_text("option = {title: {text: 'Sales'}}");
    let result = submitter.run().expect("render");

    mock.assert();
    assert_eq!(result.kind, OutputKind::Svg);
    assert_eq!(submitter.display_markup(), "<svg>sales</svg>");
}

#[test]
fn png_submission_sends_output_type_query() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/")
        .match_query(Matcher::UrlEncoded("outputType".into(), "png".into()))
        .with_status(200)
        .with_body("iVBORw0KGgo=")
        .create();

    let mut transport = transport_for(&server);
    let request = RenderRequest::new(ChartSpec::new(json!({"series": []})), OutputKind::Png);
    let body = transport.post_render(&request).expect("render");

    mock.assert();
    assert_eq!(body, "iVBORw0KGgo=");
}

#[test]
fn server_error_keeps_display_and_notifies() {
    let mut server = mockito::Server::new();
    let ok = server
        .mock("POST", "/")
        .with_status(200)
        .with_body("<svg>ok</svg>")
        .expect(1)
        .create();

    let notifier = CollectingNotifier::default();
    let mut submitter = OptionSubmitter::new(transport_for(&server), SubmitterConfig::default())
        .expect("submitter init")
        .with_notifier(Box::new(notifier.clone()));
    submitter.set_editor_text(r#"{"series": []}"#);
    submitter.run().expect("first render");
    ok.assert();
    ok.remove();

    let failing = server
        .mock("POST", "/")
        .with_status(500)
        .with_body(r#"{"statusCode":500,"message":"unsupported series type"}"#)
        .create();
    let err = submitter.run().expect_err("server error");
    failing.assert();

    assert!(matches!(err, SubmitError::Network(_)));
    assert_eq!(submitter.display_markup(), "<svg>ok</svg>");
    assert_eq!(
        notifier.messages(),
        vec!["network error: render service returned status 500: unsupported series type".to_owned()]
    );
}

#[test]
fn ping_expects_pong() {
    let mut server = mockito::Server::new();
    let pong = server.mock("GET", "/ping").with_body("pong").create();

    let mut transport = transport_for(&server);
    transport.ping().expect("ping");
    pong.assert();
}

#[test]
fn ping_rejects_unexpected_reply() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/ping").with_body("hello").create();

    let err = transport_for(&server).ping().expect_err("wrong reply");
    assert_eq!(err.to_string(), "network error: unexpected ping reply `hello`");
}

#[test]
fn base_path_is_kept_for_render_and_ping() {
    let mut server = mockito::Server::new();
    let render = server
        .mock("POST", "/charts/")
        .with_body("<svg/>")
        .create();
    let ping = server.mock("GET", "/charts/ping").with_body("pong").create();

    let config = SubmitterConfig::new(format!("{}/charts", server.url()));
    let mut transport = HttpTransport::new(&config).expect("transport");
    transport
        .post_render(&RenderRequest::new(ChartSpec::new(json!({})), OutputKind::Svg))
        .expect("render");
    transport.ping().expect("ping");

    render.assert();
    ping.assert();
}

#[test]
fn unreachable_service_is_a_network_error() {
    // Port 9 (discard) is not expected to run an HTTP service.
    let config = SubmitterConfig::new("http://127.0.0.1:9/").with_timeout_ms(Some(2_000));
    let mut transport = HttpTransport::new(&config).expect("transport");
    let err = transport
        .post_render(&RenderRequest::new(ChartSpec::new(json!({})), OutputKind::Svg))
        .expect_err("unreachable");
    assert!(err.is_network());
    assert!(err.to_string().contains("render request failed"));
}
