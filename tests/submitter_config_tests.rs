use std::time::Duration;

use chart_submit::api::{DEFAULT_BASE_URL, SubmitterConfig};
use chart_submit::core::{OutputKind, RenderResult};
use chart_submit::error::SubmitError;

#[test]
fn empty_json_config_uses_defaults() {
    let config = SubmitterConfig::from_json_str("{}").expect("config");
    assert_eq!(config, SubmitterConfig::default());
    assert_eq!(config.base_url, DEFAULT_BASE_URL);
    assert_eq!(config.output_kind, OutputKind::Svg);
    assert_eq!(config.timeout(), None);
}

#[test]
fn json_config_round_trips_through_pretty_output() {
    let config = SubmitterConfig::new("https://render.example.com/api")
        .with_output_kind(OutputKind::Png)
        .with_timeout_ms(Some(1_500));
    let json = config.to_json_pretty().expect("serialize");
    assert!(json.contains(r#""output_kind": "png""#));

    let restored = SubmitterConfig::from_json_str(&json).expect("parse");
    assert_eq!(restored, config);
    assert_eq!(restored.timeout(), Some(Duration::from_millis(1_500)));
}

#[test]
fn base_url_path_is_normalized() {
    let config = SubmitterConfig::new("http://localhost:7001/charts");
    let url = config.base_url().expect("url");
    assert_eq!(url.as_str(), "http://localhost:7001/charts/");
}

#[test]
fn invalid_configs_are_rejected() {
    for input in [
        r#"{"base_url": "not a url"}"#,
        r#"{"base_url": "file:///tmp/chart"}"#,
        r#"{"timeout_ms": 0}"#,
        r#"{"output_kind": "gif"}"#,
        "[]",
    ] {
        let err = SubmitterConfig::from_json_str(input).expect_err(input);
        assert!(matches!(err, SubmitError::InvalidConfig(_)), "{input}: {err}");
    }
}

#[test]
fn render_result_contract_round_trip() {
    let result = RenderResult::new(OutputKind::Png, "iVBORw0KGgo=");
    let json = result.to_json_contract_v1_pretty().expect("serialize");
    assert!(json.contains(r#""schema_version": 1"#));
    assert!(json.contains(r#""kind": "png""#));

    assert_eq!(RenderResult::from_json_compat_str(&json).expect("contract"), result);
    assert_eq!(
        RenderResult::from_json_compat_str(r#"{"kind": "png", "payload": "iVBORw0KGgo="}"#)
            .expect("bare"),
        result
    );
}

#[test]
fn render_result_contract_rejects_unknown_schema() {
    let err = RenderResult::from_json_compat_str(
        r#"{"schema_version": 2, "result": {"kind": "svg", "payload": "<svg/>"}}"#,
    )
    .expect_err("unsupported");
    assert_eq!(
        err.to_string(),
        "invalid render payload: unsupported render result schema version: 2"
    );
}
