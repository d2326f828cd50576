use crate::server::api;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn json_ok(payload: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body: payload,
    }
}

pub fn route_request(method: &str, path: &str, body: &str) -> HttpResponse {
    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => match api::health_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("GET", "/api/presets") => match api::presets_payload() {
            Ok(payload) => json_ok(payload),
            Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
        },
        ("POST", "/api/simulate/blaster") => match api::simulate_blaster_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::SimulateError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::SimulateError::Validation(msg)) => error_response(400, "Bad Request", &msg),
        },
        ("POST", "/api/simulate/rifle") => match api::simulate_rifle_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::SimulateError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::SimulateError::Validation(msg)) => error_response(400, "Bad Request", &msg),
        },
        ("POST", "/api/compare") => match api::compare_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::SimulateError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::SimulateError::Validation(msg)) => error_response(400, "Bad Request", &msg),
        },
        ("POST", "/api/sweep") => match api::sweep_payload(body) {
            Ok(payload) => json_ok(payload),
            Err(api::SimulateError::Parse(err)) => {
                error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
            }
            Err(api::SimulateError::Validation(msg)) => error_response(400, "Bad Request", &msg),
        },
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Dryfire Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Dryfire Local API</h1>
  <p>One-shot weapon cycle simulations. The full visual timeline lives in the browser front end; this console exercises the JSON endpoints.</p>

  <div class="card">
    <strong>Health</strong>
    <div><button id="health-btn">GET /api/health</button></div>
  </div>

  <div class="card">
    <strong>Blaster</strong>
    <label for="power">Weapon power %</label>
    <input id="power" type="number" min="100" max="200" step="5" value="100" />
    <label for="speed">Attack speed %</label>
    <input id="speed" type="number" min="100" max="200" step="5" value="100" />
    <div><button id="blaster-btn">POST /api/simulate/blaster</button></div>
  </div>

  <div class="card">
    <strong>Rifle</strong>
    <label for="dmg">Damage slider (0-20)</label>
    <input id="dmg" type="number" min="0" max="20" value="0" />
    <label for="rate">Rate slider (0-20)</label>
    <input id="rate" type="number" min="0" max="20" value="0" />
    <label for="serum">Serum</label>
    <select id="serum"><option value="false">off</option><option value="true">on</option></select>
    <div><button id="rifle-btn">POST /api/simulate/rifle</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      output.textContent = 'HTTP ' + response.status + '\n' + text;
    }

    document.getElementById('health-btn').addEventListener('click', () => {
      request('/api/health', { method: 'GET' });
    });

    document.getElementById('blaster-btn').addEventListener('click', () => {
      const payload = {
        mode: 'damage',
        weapon_power_percent: Number(document.getElementById('power').value) || 100,
        attack_speed_percent: Number(document.getElementById('speed').value) || 100,
        reload_enabled: true,
      };
      request('/api/simulate/blaster', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });

    document.getElementById('rifle-btn').addEventListener('click', () => {
      const payload = {
        damage_bonus_pct: Number(document.getElementById('dmg').value) || 0,
        rate_bonus_pct: Number(document.getElementById('rate').value) || 0,
        ability_power_pct: 0,
        run_speed_capacity_pct: 0,
        chaingun_enabled: false,
        serum_enabled: document.getElementById('serum').value === 'true',
        rocket_enabled: true,
      };
      request('/api/simulate/rifle', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
