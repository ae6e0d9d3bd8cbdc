// SPDX-FileCopyrightText: 2025 All contributors
//
// SPDX-License-Identifier: GPL-2.0-or-later

use amap::{
    Position, PositionResult,
    config::{AMAP_KEY_ENV, AmapConfig},
    error::AmapError,
    geolocation::{GENERIC_FAILURE_MESSAGE, GeolocationAdapter},
    loader::SdkLoader,
    sdk::{
        GeolocationOptions, GeolocationResult, PageContext, PositionAccessors, RawPosition,
        STATUS_COMPLETE,
    },
    test_helper::{MockLoader, Script, ScriptedAmap},
};
use serde_json::Value;
use std::{sync::Arc, time::Duration};

fn create_adapter(amap: Arc<ScriptedAmap>) -> (GeolocationAdapter, Arc<MockLoader>) {
    let mock = Arc::new(MockLoader::succeeding(amap));
    let loader = SdkLoader::new(
        Arc::new(PageContext::new()),
        mock.clone(),
        AmapConfig::new("key", "code"),
    );
    (GeolocationAdapter::new(Arc::new(loader)), mock)
}

#[derive(Debug)]
struct LngLatAccessors {
    lng: f64,
    lat: f64,
}

impl PositionAccessors for LngLatAccessors {
    fn get_lng(&self) -> Option<Value> {
        Some(Value::from(self.lng))
    }

    fn get_lat(&self) -> Option<Value> {
        Some(Value::from(self.lat))
    }
}

#[test_log::test(tokio::test)]
async fn resolve_complete_result() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {"lng": 120.1, "lat": 30.2}, "accuracy": 15}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let position = adapter.get_current_position().await.unwrap();

    assert_eq!(
        position,
        PositionResult::new(Position::new(&30.2, &120.1), Some(15.0))
    );
    assert_eq!(position.coords.altitude, None);
    assert_eq!(position.coords.altitude_accuracy, None);
}

#[test_log::test(tokio::test)]
async fn resolve_without_accuracy() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {"lng": 120.1, "lat": 30.2}}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let position = adapter.get_current_position().await.unwrap();

    assert_eq!(position.coords.accuracy, None);
}

#[test_log::test(tokio::test)]
async fn report_sdk_error_message() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        "error",
        r#"{"message": "permission denied"}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(
        result,
        Err(AmapError::GeolocationFailure(
            "permission denied".to_string()
        ))
    );
}

#[test_log::test(tokio::test)]
async fn report_generic_failure_without_message() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond("error", None)));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(
        result,
        Err(AmapError::GeolocationFailure(
            GENERIC_FAILURE_MESSAGE.to_string()
        ))
    );
}

#[test_log::test(tokio::test)]
async fn report_failure_when_position_is_missing() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"accuracy": 15}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(
        result,
        Err(AmapError::GeolocationFailure(
            GENERIC_FAILURE_MESSAGE.to_string()
        ))
    );
}

#[test_log::test(tokio::test)]
async fn report_unparsable_coordinates() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {}}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(result, Err(AmapError::CoordinateParseFailure));
}

#[test_log::test(tokio::test)]
async fn report_string_coordinates_as_unparsable() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {"lng": "120.1", "lat": "30.2"}}"#,
    )));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(result, Err(AmapError::CoordinateParseFailure));
}

#[test_log::test(tokio::test)]
async fn read_coordinates_through_accessors() {
    let position =
        RawPosition::default().with_accessors(Arc::new(LngLatAccessors { lng: 116.4, lat: 39.9 }));
    let amap = Arc::new(ScriptedAmap::new(Script::respond(
        STATUS_COMPLETE,
        Some(GeolocationResult {
            position: Some(position),
            accuracy: Some(Value::from(30)),
            message: None,
        }),
    )));
    let (adapter, _) = create_adapter(amap);

    let position = adapter.get_current_position().await.unwrap();

    assert_eq!(
        position,
        PositionResult::new(Position::new(&39.9, &116.4), Some(30.0))
    );
}

#[test_log::test(tokio::test)]
async fn report_failure_when_callback_is_discarded() {
    let amap = Arc::new(ScriptedAmap::new(Script::Discard));
    let (adapter, _) = create_adapter(amap);

    let result = adapter.get_current_position().await;

    assert_eq!(
        result,
        Err(AmapError::GeolocationFailure(
            GENERIC_FAILURE_MESSAGE.to_string()
        ))
    );
}

#[test_log::test(tokio::test)]
async fn query_with_fixed_options() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {"lng": 120.1, "lat": 30.2}}"#,
    )));
    let (adapter, _) = create_adapter(amap.clone());

    adapter.get_current_position().await.unwrap();

    assert_eq!(
        amap.last_options(),
        Some(GeolocationOptions {
            enable_high_accuracy: true,
            timeout: Duration::from_secs(10),
            convert: true,
            need_address: false,
        })
    );
}

#[test_log::test(tokio::test)]
async fn load_once_and_query_per_call() {
    let amap = Arc::new(ScriptedAmap::new(Script::respond_json(
        STATUS_COMPLETE,
        r#"{"position": {"lng": 120.1, "lat": 30.2}}"#,
    )));
    let (adapter, mock) = create_adapter(amap.clone());

    adapter.get_current_position().await.unwrap();
    adapter.get_current_position().await.unwrap();

    assert_eq!(mock.load_count(), 1);
    assert_eq!(amap.geolocation_count(), 2);
}

#[test_log::test(tokio::test)]
async fn propagate_loader_errors() {
    let amap = Arc::new(ScriptedAmap::new(Script::Discard));
    let mock = Arc::new(MockLoader::succeeding(amap.clone()));
    let loader = SdkLoader::new(Arc::new(PageContext::new()), mock, AmapConfig::default());
    let adapter = GeolocationAdapter::new(Arc::new(loader));

    let result = adapter.get_current_position().await;

    assert_eq!(
        result,
        Err(AmapError::MissingConfiguration(AMAP_KEY_ENV))
    );
    assert_eq!(amap.geolocation_count(), 0);
}
