//! End-to-end tests for the full weatherhued stack.
//!
//! Each test wires the real adapters and services together exactly as
//! `main` does, against one throwaway axum server that plays both the
//! OpenWeatherMap API and a Hue bridge.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, State};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use weatherhue_adapter_hue::{HueBridge, HueConfig, UsernameStore};
use weatherhue_adapter_openweather::{OpenWeatherConfig, OpenWeatherSource};
use weatherhue_app::services::{ColorMapper, PollLoop, WeatherCycle};
use weatherhue_domain::color::{Brightness, Rgb};
use weatherhue_domain::error::WeatherHueError;
use weatherhue_domain::table::WeatherTable;

const USERNAME: &str = "integration-user";

const TABLE: &str = r#"
    [Rain]
    default = [[0, 0, 255], 100]
    "light rain" = [[100, 100, 255], 80]

    [Clear]
    default = [[255, 200, 0], 254]
"#;

#[derive(Default)]
struct World {
    condition: Mutex<(String, String)>,
    forecasts: Mutex<u32>,
    updates: Mutex<Vec<(String, Value)>>,
}

impl World {
    fn forecast(&self, condition: &str, description: &str) {
        *self.condition.lock().unwrap() = (condition.to_string(), description.to_string());
    }

    fn updates(&self) -> Vec<(String, Value)> {
        self.updates.lock().unwrap().clone()
    }
}

async fn forecast(State(world): State<Arc<World>>) -> Json<Value> {
    *world.forecasts.lock().unwrap() += 1;
    let (main, description) = world.condition.lock().unwrap().clone();
    Json(json!({"list": [
        {"dt": 1_700_000_000, "weather": [{"main": main, "description": description}]}
    ]}))
}

async fn register() -> Json<Value> {
    Json(json!([{"success": {"username": USERNAME}}]))
}

async fn lights() -> Json<Value> {
    Json(json!({
        "1": {"name": "Living room"},
        "2": {"name": "Hallway"},
        "3": {"name": "Bedroom"}
    }))
}

async fn state(
    State(world): State<Arc<World>>,
    Path((_username, id)): Path<(String, String)>,
    Json(body): Json<Value>,
) -> Json<Value> {
    world.updates.lock().unwrap().push((id, body));
    Json(json!([{"success": {"/lights/state/on": true}}]))
}

/// Start the fake services and return their `host:port`.
async fn serve(world: Arc<World>) -> String {
    let router = Router::new()
        .route("/forecast", get(forecast))
        .route("/api", post(register))
        .route("/api/{username}/lights", get(lights))
        .route("/api/{username}/lights/{id}/state", put(state))
        .with_state(world);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr.to_string()
}

fn cycle(addr: &str, dir: &tempfile::TempDir) -> WeatherCycle<OpenWeatherSource, HueBridge> {
    let source = OpenWeatherSource::new(OpenWeatherConfig {
        city_id: "2759794".to_string(),
        api_key: "secret".to_string(),
        base_url: format!("http://{addr}/forecast"),
        timeout_secs: 5,
    })
    .unwrap();
    let bridge = HueBridge::new(HueConfig {
        ip: addr.to_string(),
        username_file: dir.path().join("user.json"),
        bulb_pause_ms: 0,
        pairing_retry_secs: 0,
        timeout_secs: 5,
        ..HueConfig::default()
    })
    .unwrap();
    let table: WeatherTable = toml::from_str(TABLE).unwrap();
    WeatherCycle::new(
        source,
        ColorMapper::new(table),
        bridge,
        vec!["Living room".to_string(), "Hallway".to_string()],
    )
}

#[tokio::test]
async fn should_color_bulbs_after_forecast() {
    let world = Arc::new(World::default());
    world.forecast("Rain", "light rain");
    let addr = serve(world.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cycle = cycle(&addr, &dir);

    let report = cycle.run_once().await.unwrap();

    assert_eq!(report.forecast.condition, "Rain");
    assert_eq!(report.setting.color, Rgb::new(100, 100, 255));
    assert_eq!(report.setting.brightness, Brightness::new(80));
    let updates = world.updates();
    assert_eq!(
        updates.iter().map(|(id, _)| id.as_str()).collect::<Vec<_>>(),
        vec!["1", "2"]
    );
    assert_eq!(updates[0].1["bri"], 80);
    assert_eq!(
        cycle.describe(&report.forecast),
        "In the last forecast weather for your location (2759794) was thought to be Rain - light rain"
    );
}

#[tokio::test]
async fn should_store_username_after_first_pairing() {
    let world = Arc::new(World::default());
    world.forecast("Clear", "clear sky");
    let addr = serve(world.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    cycle(&addr, &dir).run_once().await.unwrap();

    let stored = UsernameStore::new(dir.path().join("user.json"))
        .load(&addr)
        .unwrap();
    assert_eq!(stored.as_deref(), Some(USERNAME));
}

#[tokio::test]
async fn should_apply_forced_weather_without_fetching() {
    let world = Arc::new(World::default());
    let addr = serve(world.clone()).await;
    let dir = tempfile::tempdir().unwrap();
    let mut cycle = cycle(&addr, &dir);

    let setting = cycle.run_forced("Clear", "default").await.unwrap();

    assert_eq!(setting.color, Rgb::new(255, 200, 0));
    assert_eq!(*world.forecasts.lock().unwrap(), 0);
    assert_eq!(world.updates().len(), 2);
    assert_eq!(world.updates()[0].1["bri"], 254);
}

#[tokio::test]
async fn should_stop_loop_on_unmapped_condition() {
    let world = Arc::new(World::default());
    world.forecast("Snow", "light snow");
    let addr = serve(world.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let Err(err) = PollLoop::new(cycle(&addr, &dir), Duration::from_secs(900))
        .run()
        .await;

    assert!(matches!(err, WeatherHueError::Lookup(_)));
    assert!(world.updates().is_empty());
}

#[tokio::test]
async fn should_poll_again_after_interval() {
    let world = Arc::new(World::default());
    world.forecast("Rain", "heavy rain");
    let addr = serve(world.clone()).await;
    let dir = tempfile::tempdir().unwrap();

    let poll = PollLoop::new(cycle(&addr, &dir), Duration::from_millis(50));
    let _ = tokio::time::timeout(Duration::from_millis(500), poll.run()).await;

    assert!(*world.forecasts.lock().unwrap() >= 2);
}

#[test]
fn should_parse_shipped_example_config() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../../weatherhue.toml.example");
    let content = std::fs::read_to_string(path).unwrap();
    let mut document: toml::Table = toml::from_str(&content).unwrap();

    let table: WeatherTable = document
        .remove("weathercolormap")
        .unwrap()
        .try_into()
        .unwrap();
    let bridge: HueConfig = document.remove("bridge").unwrap().try_into().unwrap();
    let weather: OpenWeatherConfig = document.remove("weather").unwrap().try_into().unwrap();

    assert!(table.validate().is_ok());
    for condition in table.conditions() {
        assert!(table.lookup(condition, "no such description").is_ok());
    }
    assert!(!bridge.bulbs.is_empty());
    assert!(!weather.city_id.is_empty());
}
