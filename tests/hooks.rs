//! Hook behaviour end to end: de-duplication, caching, locale fallback.

use serde_json::json;
use std::time::Duration;

use site_content::services::{ServiceQuery, Widget, WidgetKind};
use site_content::{DataHooks, Locale};

mod common;
use common::{MockApi, MockResponse};

fn services_body() -> serde_json::Value {
    json!({"data": [{"id": 1, "title": "Office cleaning"}, {"id": 2, "title": "Windows"}]})
}

#[tokio::test]
async fn test_concurrent_mounts_share_one_request() {
    let mock = MockApi::start(|_, _| MockResponse::ok(services_body()).delayed(50)).await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(Some("t1"), Some("de"));

    let mut handles: Vec<_> = (0..5)
        .map(|_| hooks.use_services(&scope, ServiceQuery::per_page(50)))
        .collect();

    let mut results = Vec::new();
    for handle in handles.iter_mut() {
        results.push(handle.settled().await);
    }

    assert_eq!(mock.hits_for("/v1/services"), 1);
    let first = results[0].data.clone().unwrap();
    assert_eq!(first.len(), 2);
    for state in &results {
        assert!(!state.loading);
        assert!(state.error.is_none());
        assert_eq!(state.data.as_deref(), Some(&*first));
    }

    let hit = &mock.hits()[0];
    assert_eq!(hit.query.as_deref(), Some("per_page=50&locale=de"));
    assert_eq!(hit.header("X-Tenant-ID"), Some("t1"));
}

#[tokio::test]
async fn test_remount_served_from_cache() {
    let mock = MockApi::start(|_, _| MockResponse::ok(services_body())).await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(None, None);

    let mut first = hooks.use_services(&scope, ServiceQuery::default());
    first.settled().await;
    drop(first);

    let second = hooks.use_services(&scope, ServiceQuery::default());
    let state = second.state();

    assert!(!state.loading);
    assert_eq!(state.data.unwrap().len(), 2);
    assert_eq!(mock.hits().len(), 1);
}

#[tokio::test]
async fn test_different_scopes_fetch_separately() {
    let mock = MockApi::start(|_, _| MockResponse::ok(services_body())).await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();

    let mut en = hooks.use_sliders(&hooks.api().scope(None, Some("en")));
    let mut de = hooks.use_sliders(&hooks.api().scope(None, Some("de")));
    en.settled().await;
    de.settled().await;

    assert_eq!(mock.hits_for("/v1/sliders"), 2);
}

#[tokio::test]
async fn test_failure_not_cached() {
    let mock = MockApi::start(|_, previous| {
        if previous == 0 {
            MockResponse::json(404, json!({"message": "Menu not found"}))
        } else {
            MockResponse::ok(json!({"data": [{"id": 1, "name": "Main", "items": []}]}))
        }
    })
    .await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(None, None);

    let mut failed = hooks.use_menus(&scope, None);
    let state = failed.settled().await;
    assert!(state.data.is_none());
    assert_eq!(state.error.as_deref(), Some("Menu not found"));
    assert!(hooks.store().is_empty());

    let mut retry = hooks.use_menus(&scope, None);
    let state = retry.settled().await;
    assert_eq!(state.data.unwrap().len(), 1);
    assert_eq!(mock.hits_for("/v1/menus"), 2);
}

#[tokio::test]
async fn test_unmount_keeps_cache_warm() {
    let mock = MockApi::start(|_, _| MockResponse::ok(json!({"data": []})).delayed(30)).await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(None, None);

    let handle = hooks.use_languages(&scope);
    handle.unmount();
    assert!(!handle.is_mounted());

    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(handle.state().loading);
    assert!(hooks.store().get::<Vec<site_content::services::Language>>(handle.key()).is_some());
}

#[tokio::test]
async fn test_widget_follows_language_fallback_once() {
    let mock = MockApi::start(|hit, _| {
        let served = match hit.query_param("locale").as_deref() {
            Some("fr") | Some("de") => "de",
            _ => "en",
        };
        MockResponse::ok(json!({
            "_meta": {"current_language": served},
            "data": {"phone": format!("+{served}"), "enabled": true}
        }))
    })
    .await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(Some("t1"), Some("fr"));

    let mut handle = hooks.use_widget(&scope, WidgetKind::Whatsapp);
    let state = handle.settled().await;

    let widget = state.data.unwrap();
    assert_eq!(widget.locale, Locale::parse("de").unwrap());
    match &widget.data {
        Widget::Whatsapp(w) => assert_eq!(w.phone.as_deref(), Some("+de")),
        other => panic!("unexpected widget {other:?}"),
    }

    let locales: Vec<_> = mock.hits().iter().filter_map(|h| h.query_param("locale")).collect();
    assert_eq!(locales, vec!["fr", "de"]);

    // Remount resolves through the cache without any request.
    let again = hooks.use_widget(&scope, WidgetKind::Whatsapp);
    assert!(!again.state().loading);
    assert_eq!(mock.hits().len(), 2);
}

#[tokio::test]
async fn test_widget_fallback_stops_on_unstable_backend() {
    let mock = MockApi::start(|hit, _| {
        let served = match hit.query_param("locale").as_deref() {
            Some("fr") => "de",
            Some("de") => "en",
            _ => "fr",
        };
        MockResponse::ok(json!({"_meta": {"current_language": served}, "data": {}}))
    })
    .await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(None, Some("fr"));

    let mut handle = hooks.use_widget(&scope, WidgetKind::Ratings);
    let state = handle.settled().await;

    assert!(state.data.is_some());
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(mock.hits_for("/widgets/ratings"), 2);
}

#[tokio::test]
async fn test_all_settings_hook_defaults() {
    let mock = MockApi::start(|_, _| MockResponse::ok(json!({"data": {"x": "y"}}))).await;
    let hooks = DataHooks::from_config(&mock.config()).unwrap();
    let scope = hooks.api().scope(None, None);

    let mut handle = hooks.use_all_settings(&scope, &[]);
    let state = handle.settled().await;

    let all = state.data.unwrap();
    let categories: Vec<_> = all.keys().map(String::as_str).collect();
    assert_eq!(categories, vec!["contact", "general", "seo", "social"]);
    assert_eq!(mock.hits().len(), 4);
}
