//! Landing page and static assets — the only unprotected routes.
//!
//! `GET /` issues fresh session + CSRF cookies on every visit, so the
//! bundled page is all a browser needs before calling the API.

use axum::extract::State;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Response};

use crate::api::types::ApiContext;
use crate::auth::{origin, session};

/// `GET /` — serve the UI and issue session + CSRF cookies.
pub async fn root(State(ctx): State<ApiContext>, headers: HeaderMap) -> Response {
    let effective = origin::effective_origin(&headers);
    let mut response = Html(INDEX_HTML).into_response();
    session::issue_cookies(
        response.headers_mut(),
        &ctx.config.session_secret,
        effective.is_https(),
    );
    response
}

/// `GET /dev-preload.jpg` — development sample form image, served from
/// the configured asset directory. 404 when absent.
pub async fn preload_image(State(ctx): State<ApiContext>) -> Response {
    let path = ctx.config.asset_dir.join("dev-preload.jpg");
    match tokio::fs::read(&path).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, "image/jpeg")], bytes).into_response(),
        Err(_) => StatusCode::NOT_FOUND.into_response(),
    }
}

// ---------------------------------------------------------------------------
// Index page HTML (self-contained, no external resources)
// ---------------------------------------------------------------------------

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1">
  <title>Formfill</title>
  <style>
    * { box-sizing: border-box; margin: 0; padding: 0; }
    body {
      font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', system-ui, sans-serif;
      background: #fafaf9; color: #1c1917;
      min-height: 100vh; display: flex; flex-direction: column;
      align-items: center; padding: 24px;
    }
    h1 { font-size: 24px; margin-bottom: 8px; }
    p { color: #78716c; font-size: 14px; margin-bottom: 24px; text-align: center; }
    .actions { display: flex; gap: 12px; margin-bottom: 24px; }
    .btn {
      padding: 12px 20px; border-radius: 12px; font-size: 15px; font-weight: 500;
      cursor: pointer; border: none;
    }
    .btn-primary { background: #4a7c59; color: white; }
    .btn-secondary { background: white; color: #44403c; border: 1px solid #d6d3d1; }
    .btn:disabled { opacity: 0.5; cursor: not-allowed; }
    .status { margin-bottom: 16px; font-size: 14px; min-height: 20px; }
    .status.error { color: #dc2626; }
    #stage { position: relative; max-width: 90vw; }
    #preview { max-width: 100%; display: block; }
    .field-box {
      position: absolute; border: 2px solid #0080ff;
      color: #111; font-size: 13px; padding: 1px 3px;
      background: rgba(255, 255, 255, 0.6); overflow: hidden;
    }
    #file-input { display: none; }
  </style>
</head>
<body>
  <h1>Formfill</h1>
  <p>Upload a scan of a paper form to detect its writable fields and fill them with sample text.</p>

  <div class="actions">
    <button class="btn btn-secondary" id="btn-choose">Choose an image</button>
    <button class="btn btn-primary" id="btn-detect" disabled>Detect &amp; fill</button>
    <button class="btn btn-secondary" id="btn-boxes" disabled>Boxes only</button>
  </div>
  <input type="file" id="file-input" accept="image/*">
  <div class="status" id="status"></div>

  <div id="stage">
    <img id="preview" alt="">
  </div>

  <script>
    var fileInput = document.getElementById('file-input');
    var btnChoose = document.getElementById('btn-choose');
    var btnDetect = document.getElementById('btn-detect');
    var btnBoxes = document.getElementById('btn-boxes');
    var statusEl = document.getElementById('status');
    var stage = document.getElementById('stage');
    var preview = document.getElementById('preview');
    var currentFile = null;

    function csrfToken() {
      var match = document.cookie.match(/(?:^|; )formfill_csrf=([^;]+)/);
      return match ? match[1] : '';
    }

    function showStatus(text, isError) {
      statusEl.textContent = text;
      statusEl.className = isError ? 'status error' : 'status';
    }

    function clearBoxes() {
      var old = stage.querySelectorAll('.field-box');
      for (var i = 0; i < old.length; i++) old[i].remove();
    }

    function drawBoxes(boxes, texts) {
      clearBoxes();
      var w = preview.clientWidth;
      var h = preview.clientHeight;
      for (var i = 0; i < boxes.length; i++) {
        var b = boxes[i].box_2d;
        var el = document.createElement('div');
        el.className = 'field-box';
        el.style.top = (b[0] / 1000 * h) + 'px';
        el.style.left = (b[1] / 1000 * w) + 'px';
        el.style.height = ((b[2] - b[0]) / 1000 * h) + 'px';
        el.style.width = ((b[3] - b[1]) / 1000 * w) + 'px';
        el.textContent = texts ? (texts[i] || '') : '';
        stage.appendChild(el);
      }
    }

    function post(path, onDone) {
      var formData = new FormData();
      formData.append('file', currentFile);
      showStatus('Detecting fields...', false);
      fetch(path, {
        method: 'POST',
        headers: { 'X-CSRF-Token': csrfToken() },
        body: formData
      }).then(function (resp) {
        return resp.json().then(function (data) { onDone(resp.ok, data); });
      }).catch(function () {
        showStatus('Request failed.', true);
      });
    }

    btnChoose.addEventListener('click', function () { fileInput.click(); });

    fileInput.addEventListener('change', function (e) {
      currentFile = e.target.files[0];
      if (!currentFile) return;
      clearBoxes();
      preview.src = URL.createObjectURL(currentFile);
      btnDetect.disabled = false;
      btnBoxes.disabled = false;
      showStatus('', false);
    });

    btnDetect.addEventListener('click', function () {
      post('/api/form/detect', function (ok, data) {
        if (!ok) { showStatus(data.error || 'Detection failed.', true); return; }
        drawBoxes(data.boxes, data.texts);
        showStatus(data.boxes.length + ' fields in ' + data.timings_ms.total_ms + ' ms', false);
      });
    });

    btnBoxes.addEventListener('click', function () {
      post('/api/form/draw_boxes', function (ok, data) {
        if (!ok) { showStatus('Detection failed.', true); return; }
        drawBoxes(data.boxes, null);
        showStatus(data.error ? 'Degraded: ' + data.error : data.boxes.length + ' boxes', false);
      });
    });
  </script>
</body>
</html>"##;
