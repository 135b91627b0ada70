// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Integration tests against a mock bridge using wiremock.
//!
//! The client is blocking, so each test drives it from
//! `tokio::task::spawn_blocking` while wiremock runs on the test runtime.
//! Request counts are verified through `Mock::expect` when the server is
//! dropped.

use std::time::Duration;

use huelink::{Bridge, BridgeConfig, Brightness, Error, ParseError, Saturation, StateCommand};
use serde_json::json;
use tokio::task::spawn_blocking;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "abc123";

fn config_for(server: &MockServer) -> BridgeConfig {
    let address = server.address();
    BridgeConfig::new(address.ip().to_string(), API_KEY).with_port(address.port())
}

fn light_body() -> serde_json::Value {
    json!({
        "state": {"on": true, "bri": 180, "hue": 10_000, "sat": 120, "reachable": true},
        "type": "Extended color light",
        "name": "Desk",
        "modelid": "LCT007",
        "uniqueid": "00:17:88:01:00:d4:12:08-0a",
        "bri": 200
    })
}

fn group_body() -> serde_json::Value {
    json!({
        "name": "Kitchen",
        "lights": ["1", "4"],
        "type": "Room",
        "state": {"any_on": true, "all_on": false},
        "action": {"on": true, "bri": 120}
    })
}

fn put_success() -> serde_json::Value {
    json!([{"success": {"/lights/1/state/on": true}}])
}

// ============================================================================
// Reads and caching
// ============================================================================

mod reads {
    use super::*;

    #[tokio::test]
    async fn fetch_light_parses_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let light = spawn_blocking(move || Bridge::new(config)?.fetch_light(1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(light.name(), Some("Desk"));
        assert!(light.is_on());
        assert_eq!(light.brightness(), Some(200));
        assert_eq!(light.state().hue(), Some(10_000));
    }

    #[tokio::test]
    async fn repeat_reads_are_served_from_cache() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (on, bri) = spawn_blocking(move || -> huelink::Result<(bool, u8)> {
            let mut bridge = Bridge::new(config)?;
            bridge.fetch_light(1)?;
            let on = bridge.light_is_on(1)?;
            let bri = bridge.light_brightness(1)?;
            Ok((on, bri))
        })
        .await
        .unwrap()
        .unwrap();

        assert!(on);
        assert_eq!(bri, 200);
        // expect(1) on the mock proves the two getters made no request.
    }

    #[tokio::test]
    async fn different_id_bypasses_cache() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"state": {"on": false}, "bri": 10})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (first, second) = spawn_blocking(move || -> huelink::Result<(bool, bool)> {
            let mut bridge = Bridge::new(config)?;
            let first = bridge.light_is_on(1)?;
            let second = bridge.light_is_on(2)?;
            Ok((first, second))
        })
        .await
        .unwrap()
        .unwrap();

        assert!(first);
        assert!(!second);
    }

    #[tokio::test]
    async fn group_fetch_evicts_cached_light() {
        let server = MockServer::start().await;

        // The light is fetched, evicted by the group, and fetched again.
        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/abc123/groups/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        spawn_blocking(move || -> huelink::Result<()> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            bridge.group_any_on(1)?;
            bridge.light_is_on(1)?;
            Ok(())
        })
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test]
    async fn group_getters_read_state_and_action() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/groups/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_body()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (group, any_on, bri) =
            spawn_blocking(move || -> huelink::Result<(huelink::Group, bool, u8)> {
                let mut bridge = Bridge::new(config)?;
                let group = bridge.fetch_group(2)?;
                let any_on = bridge.group_any_on(2)?;
                let bri = bridge.group_brightness(2)?;
                Ok((group, any_on, bri))
            })
            .await
            .unwrap()
            .unwrap();

        assert_eq!(group.name(), Some("Kitchen"));
        assert_eq!(group.lights(), ["1", "4"]);
        assert!(any_on);
        assert_eq!(bri, 120);
    }

    #[tokio::test]
    async fn expired_entry_is_refetched() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(2)
            .mount(&server)
            .await;

        let config = config_for(&server).with_cache_ttl(Duration::from_millis(80));
        spawn_blocking(move || -> huelink::Result<()> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            std::thread::sleep(Duration::from_millis(150));
            bridge.light_is_on(1)?;
            Ok(())
        })
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test]
    async fn zero_ttl_disables_caching() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(2)
            .mount(&server)
            .await;

        let config = config_for(&server).with_cache_ttl(Duration::ZERO);
        spawn_blocking(move || -> huelink::Result<()> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            bridge.light_is_on(1)?;
            Ok(())
        })
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test]
    async fn invalidate_forces_refetch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(2)
            .mount(&server)
            .await;

        let config = config_for(&server);
        spawn_blocking(move || -> huelink::Result<()> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            bridge.invalidate_cache();
            bridge.light_is_on(1)?;
            Ok(())
        })
        .await
        .unwrap()
        .unwrap();
    }
}

// ============================================================================
// Writes and optimistic patching
// ============================================================================

mod writes {
    use super::*;

    #[tokio::test]
    async fn power_write_sends_exact_body() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .and(body_json(json!({"on": true})))
            .respond_with(ResponseTemplate::new(200).set_body_json(put_success()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        spawn_blocking(move || Bridge::new(config)?.set_light_power(1, true))
            .await
            .unwrap()
            .unwrap();
    }

    #[tokio::test]
    async fn power_write_patches_cached_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .and(body_json(json!({"on": false})))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!([{"success": {"/lights/1/state/on": false}}])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (before, after) = spawn_blocking(move || -> huelink::Result<(bool, bool)> {
            let mut bridge = Bridge::new(config)?;
            let before = bridge.light_is_on(1)?;
            bridge.set_light_power(1, false)?;
            // Answered from the patched cache, no refetch.
            let after = bridge.light_is_on(1)?;
            Ok((before, after))
        })
        .await
        .unwrap()
        .unwrap();

        assert!(before);
        assert!(!after);
    }

    #[tokio::test]
    async fn brightness_write_patches_cached_document() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .and(body_json(json!({"bri": 42})))
            .respond_with(ResponseTemplate::new(200).set_body_json(put_success()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (before, after) = spawn_blocking(move || -> huelink::Result<(u8, u8)> {
            let mut bridge = Bridge::new(config)?;
            let before = bridge.light_brightness(1)?;
            bridge.set_light_brightness(1, Brightness::new(42)?)?;
            let after = bridge.light_brightness(1)?;
            Ok((before, after))
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(before, 200);
        assert_eq!(after, 42);
    }

    #[tokio::test]
    async fn group_write_targets_action_endpoint() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/groups/2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(group_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/groups/2/action"))
            .and(body_json(json!({"bri": 60})))
            .respond_with(ResponseTemplate::new(200).set_body_json(put_success()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let after = spawn_blocking(move || -> huelink::Result<u8> {
            let mut bridge = Bridge::new(config)?;
            bridge.group_brightness(2)?;
            bridge.set_group_brightness(2, Brightness::new(60)?)?;
            bridge.group_brightness(2)
        })
        .await
        .unwrap()
        .unwrap();

        assert_eq!(after, 60);
    }

    #[tokio::test]
    async fn full_command_sends_all_fields() {
        let server = MockServer::start().await;

        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .and(body_json(json!({
                "sat": 120, "on": true, "bri": 80, "hue": 8000, "transitiontime": 20
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(put_success()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        spawn_blocking(move || -> huelink::Result<()> {
            let command = StateCommand::new(
                true,
                Saturation::new(120)?,
                Brightness::new(80)?,
                8000,
            )
            .with_transition(huelink::Transition::new(20));
            Bridge::new(config)?.set_light(1, &command)
        })
        .await
        .unwrap()
        .unwrap();
    }

    #[tokio::test]
    async fn full_command_does_not_patch_cache() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(put_success()))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let after = spawn_blocking(move || -> huelink::Result<bool> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            bridge.set_light(1, &StateCommand::power(false))?;
            // Still the cached pre-write value; full writes leave the
            // cache alone.
            bridge.light_is_on(1)
        })
        .await
        .unwrap()
        .unwrap();

        assert!(after);
    }
}

// ============================================================================
// Failure handling
// ============================================================================

mod failures {
    use super::*;

    #[tokio::test]
    async fn connection_refused_is_a_transport_error() {
        // Bind to an ephemeral port and release it so nothing listens.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let config = BridgeConfig::new("127.0.0.1", API_KEY)
            .with_port(port)
            .with_timeout(Duration::from_secs(2));
        let error = spawn_blocking(move || Bridge::new(config)?.fetch_light(1))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(error, Error::Http(_)));
    }

    #[tokio::test]
    async fn http_error_status_is_reported() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let error = spawn_blocking(move || Bridge::new(config)?.fetch_light(1))
            .await
            .unwrap()
            .unwrap_err();

        match error {
            Error::Status(status) => assert_eq!(status.as_u16(), 404),
            other => panic!("expected status error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn malformed_body_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let error = spawn_blocking(move || Bridge::new(config)?.fetch_light(1))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(error, Error::Parse(ParseError::Json(_))));
    }

    #[tokio::test]
    async fn missing_field_is_a_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"state": {"on": true}})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let error = spawn_blocking(move || Bridge::new(config)?.light_brightness(1))
            .await
            .unwrap()
            .unwrap_err();

        assert!(matches!(
            error,
            Error::Parse(ParseError::MissingField(_))
        ));
    }

    #[tokio::test]
    async fn bridge_error_body_is_an_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/99"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "error": {
                    "type": 3,
                    "address": "/lights/99",
                    "description": "resource, /lights/99, not available"
                }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let error = spawn_blocking(move || Bridge::new(config)?.fetch_light(99))
            .await
            .unwrap()
            .unwrap_err();

        match error {
            Error::Api(api) => {
                assert_eq!(api.kind, 3);
                assert_eq!(api.address, "/lights/99");
            }
            other => panic!("expected api error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn failed_write_leaves_cache_intact() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (write_failed, still_on) = spawn_blocking(move || -> huelink::Result<(bool, bool)> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_is_on(1)?;
            let write_failed = bridge.set_light_power(1, false).is_err();
            // The cached document was not patched, and the read makes no
            // new request.
            let still_on = bridge.light_is_on(1)?;
            Ok((write_failed, still_on))
        })
        .await
        .unwrap()
        .unwrap();

        assert!(write_failed);
        assert!(still_on);
    }

    #[tokio::test]
    async fn rejected_write_is_an_api_error_and_does_not_patch() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/api/abc123/lights/1/state"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "error": {
                    "type": 201,
                    "address": "/lights/1/state/bri",
                    "description": "parameter, bri, is not modifiable. Device is set to off."
                }
            }])))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server);
        let (error, bri) = spawn_blocking(move || -> huelink::Result<(Option<Error>, u8)> {
            let mut bridge = Bridge::new(config)?;
            bridge.light_brightness(1)?;
            let error = bridge
                .set_light_brightness(1, Brightness::new(42)?)
                .err();
            let bri = bridge.light_brightness(1)?;
            Ok((error, bri))
        })
        .await
        .unwrap()
        .unwrap();

        assert!(matches!(error, Some(Error::Api(_))));
        assert_eq!(bri, 200);
    }

    #[tokio::test]
    async fn failed_refetch_keeps_previous_document() {
        let server = MockServer::start().await;

        // First fetch succeeds, the retry after expiry hits a 500.
        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(light_body()))
            .up_to_n_times(1)
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/api/abc123/lights/1"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let config = config_for(&server).with_cache_ttl(Duration::from_millis(80));
        let (refetch_failed, slot_kept) =
            spawn_blocking(move || -> huelink::Result<(bool, bool)> {
                let mut bridge = Bridge::new(config)?;
                bridge.light_is_on(1)?;
                std::thread::sleep(Duration::from_millis(150));
                let refetch_failed = bridge.light_is_on(1).is_err();
                // The stale document is still in the slot, untouched.
                let slot_kept = bridge.cache().peek().is_some();
                Ok((refetch_failed, slot_kept))
            })
            .await
            .unwrap()
            .unwrap();

        assert!(refetch_failed);
        assert!(slot_kept);
    }
}
