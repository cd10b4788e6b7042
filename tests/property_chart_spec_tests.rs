use chart_submit::api::{OptionSubmitter, SubmitterConfig};
use chart_submit::core::{OutputKind, parse_chart_spec};
use chart_submit::transport::RecordingTransport;
use proptest::prelude::*;
use serde_json::{Map, Number, Value};

fn json_leaf() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|v| Value::Number(v.into())),
        (-1.0e9f64..1.0e9).prop_map(|v| Number::from_f64(v).map_or(Value::Null, Value::Number)),
        "[ -~]{0,12}".prop_map(Value::String),
        any::<String>().prop_map(Value::String),
    ]
}

fn json_value() -> impl Strategy<Value = Value> {
    json_leaf().prop_recursive(4, 48, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-zA-Z_][a-zA-Z0-9_]{0,8}", inner), 0..6).prop_map(
                |entries| Value::Object(entries.into_iter().collect::<Map<String, Value>>())
            ),
        ]
    })
}

fn json_object() -> impl Strategy<Value = Value> {
    prop::collection::vec(("[a-zA-Z_][a-zA-Z0-9_]{0,8}", json_value()), 0..6)
        .prop_map(|entries| Value::Object(entries.into_iter().collect()))
}

proptest! {
    #[test]
    fn submitted_json_body_equals_input(object in json_object()) {
        let text = serde_json::to_string(&object).expect("encode");
        let mut submitter = OptionSubmitter::new(
            RecordingTransport::replying("<svg/>"),
            SubmitterConfig::default(),
        )
        .expect("submitter init");

        submitter.submit(&text, OutputKind::Svg).expect("submit");

        let sent = submitter.transport().last_request().expect("recorded");
        prop_assert_eq!(&sent.body, &object);
        prop_assert!(sent.query.is_empty());
    }

    #[test]
    fn assignment_of_json_text_matches_strict_json(object in json_object()) {
        let json_text = serde_json::to_string_pretty(&object).expect("encode");
        let strict = parse_chart_spec(&json_text).expect("strict json");
        let relaxed = parse_chart_spec(&format!("option = {json_text};")).expect("assignment");
        prop_assert_eq!(strict.as_value(), relaxed.as_value());
        prop_assert_eq!(relaxed.as_value(), &object);
    }

    #[test]
    fn png_display_always_wraps_payload(payload in "[A-Za-z0-9+/]{0,64}={0,2}") {
        let mut submitter = OptionSubmitter::new(
            RecordingTransport::replying(payload.clone()),
            SubmitterConfig::default(),
        )
        .expect("submitter init");
        submitter.set_editor_text("option = {series: []}");
        submitter.set_output_kind(OutputKind::Png);

        submitter.run().expect("render");

        let expected = format!(r#"<img src="data:image/png;base64,{payload}" />"#);
        prop_assert_eq!(submitter.display_markup(), expected.as_str());
    }
}
