use dryfire::server::routes::route_request;

#[test]
fn health_endpoint_returns_ok_json() {
    let response = route_request("GET", "/api/health", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "application/json");
    assert!(response.body.contains("\"status\": \"ok\""));
    assert!(response.body.contains("\"service\": \"dryfire-api\""));
}

#[test]
fn index_serves_the_html_console() {
    let response = route_request("GET", "/", "");
    assert_eq!(response.status_code, 200);
    assert_eq!(response.content_type, "text/html; charset=utf-8");
    assert!(response.body.contains("<!doctype html>"));
}

#[test]
fn unknown_route_returns_404() {
    let response = route_request("GET", "/api/unknown", "");
    assert_eq!(response.status_code, 404);
    assert!(response.body.contains("Route not found"));
}

#[test]
fn presets_endpoint_lists_the_builtin_loadouts() {
    let response = route_request("GET", "/api/presets", "");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let presets = payload["presets"]
        .as_array()
        .expect("presets should be an array");
    let names: Vec<&str> = presets
        .iter()
        .filter_map(|preset| preset["name"].as_str())
        .collect();
    assert!(names.contains(&"blaster_baseline"));
    assert!(names.contains(&"rifle_baseline"));
}

#[test]
fn blaster_endpoint_simulates_a_full_cycle() {
    let body = r#"{
        "mode": "damage",
        "weapon_power_percent": 100,
        "attack_speed_percent": 100,
        "reload_enabled": true
    }"#;
    let response = route_request("POST", "/api/simulate/blaster", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "ok");
    assert_eq!(payload["weapon"], "blaster");
    assert_eq!(payload["magazine_size"], 180);
    assert_eq!(payload["result"]["total_damage"], 1350.0);
    assert!(payload["result"]["timeline"].as_array().is_some());
}

#[test]
fn blaster_endpoint_rejects_invalid_json() {
    let response = route_request("POST", "/api/simulate/blaster", "{bad json}");
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("Invalid request body"));
}

#[test]
fn blaster_endpoint_rejects_zero_attack_speed() {
    let body = r#"{
        "mode": "damage",
        "weapon_power_percent": 100,
        "attack_speed_percent": 0,
        "reload_enabled": true
    }"#;
    let response = route_request("POST", "/api/simulate/blaster", body);
    assert_eq!(response.status_code, 400);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["status"], "error");
    assert!(payload["message"]
        .as_str()
        .is_some_and(|message| message.contains("attack_speed_percent")));
}

#[test]
fn rifle_endpoint_returns_summary_and_result() {
    let body = r#"{
        "damage_bonus_pct": 0,
        "rate_bonus_pct": 0,
        "ability_power_pct": 0,
        "run_speed_capacity_pct": 0,
        "chaingun_enabled": false,
        "serum_enabled": false,
        "rocket_enabled": true
    }"#;
    let response = route_request("POST", "/api/simulate/rifle", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["weapon"], "rifle");
    assert_eq!(payload["summary"]["magazine_size"], 30);
    assert_eq!(payload["summary"]["effective_rate"], 9.0);
    assert_eq!(payload["result"]["total_damage"], 570.0);
    assert!(payload["result"]["burst"]["total"].as_f64().is_some());
}

#[test]
fn rifle_endpoint_rejects_out_of_range_sliders() {
    let body = r#"{
        "damage_bonus_pct": 21,
        "rate_bonus_pct": 0,
        "ability_power_pct": 0,
        "run_speed_capacity_pct": 0,
        "chaingun_enabled": false,
        "serum_enabled": false,
        "rocket_enabled": true
    }"#;
    let response = route_request("POST", "/api/simulate/rifle", body);
    assert_eq!(response.status_code, 400);
    assert!(response.body.contains("damage_bonus_pct"));
}

#[test]
fn compare_endpoint_defaults_the_baseline_to_the_stock_loadout() {
    let body = r#"{
        "weapon": "rifle",
        "current": {
            "damage_bonus_pct": 10,
            "rate_bonus_pct": 0,
            "ability_power_pct": 0,
            "run_speed_capacity_pct": 0,
            "chaingun_enabled": false,
            "serum_enabled": false,
            "rocket_enabled": true
        }
    }"#;
    let response = route_request("POST", "/api/compare", body);
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    assert_eq!(payload["weapon"], "rifle");
    assert_eq!(payload["baseline"]["total_damage"], 570.0);
    assert_eq!(payload["current"]["total_damage"], 855.0);

    let baseline_seconds = payload["baseline"]["total_duration_seconds"]
        .as_f64()
        .expect("baseline duration");
    let max_seconds = payload["max_duration_seconds"]
        .as_f64()
        .expect("max duration");
    assert!(max_seconds >= baseline_seconds);
}

#[test]
fn compare_endpoint_is_deterministic() {
    let body = r#"{
        "weapon": "blaster",
        "current": {
            "mode": "damage",
            "weapon_power_percent": 150,
            "attack_speed_percent": 130,
            "reload_enabled": true
        }
    }"#;

    let response_a = route_request("POST", "/api/compare", body);
    let response_b = route_request("POST", "/api/compare", body);
    assert_eq!(response_a.status_code, 200);
    assert_eq!(response_a.body, response_b.body);
}

#[test]
fn sweep_endpoint_covers_the_full_slider_grid() {
    let response = route_request("POST", "/api/sweep", "");
    assert_eq!(response.status_code, 200);

    let payload: serde_json::Value =
        serde_json::from_str(&response.body).expect("response should be valid json");
    let grid = payload["grid"].as_array().expect("grid should be an array");
    assert_eq!(grid.len(), 21 * 21);

    let mut prior: Option<f64> = None;
    for point in grid {
        let dps = point["sustained_dps"].as_f64().expect("dps is a number");
        if let Some(previous) = prior {
            assert!(
                previous >= dps,
                "grid should be ranked by descending sustained dps"
            );
        }
        prior = Some(dps);
    }

    assert!(payload["breakpoints"]
        .as_array()
        .is_some_and(|breakpoints| !breakpoints.is_empty()));
}
