//! WebView-based survey window using `wry` + `tao`.
//!
//! Architecture:
//! - The single survey page is served via the `fs://` custom protocol.
//! - IPC from JS → Rust via `window.ipc.postMessage()`, carrying
//!   `{"method": ..., "params": ...}` in the RPC handler's vocabulary.
//! - Each IPC call runs on a tokio runtime; its outcome is pushed back by
//!   evaluating `window.__fs_render(state, error)` in the page.
//! - With the `browser` font source the page runs `queryLocalFonts()` itself
//!   and reports the result through `fonts.collect`.

use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoop, EventLoopBuilder, EventLoopProxy};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use crate::app::App;
use crate::rpc_handler::handle_method;
use crate::services::settings_engine::SettingsEngineTrait;
use crate::types::settings::FontSourceKind;

#[derive(Debug)]
enum UserEvent {
    EvalScript(String),
}

const SURVEY_CSS: &str = r#"
*{margin:0;padding:0;box-sizing:border-box}
body{font-family:-apple-system,BlinkMacSystemFont,"Segoe UI","Noto Sans",Helvetica,Arial,sans-serif;background:#f3f4f6;color:#1f2328;display:flex;justify-content:center;padding:24px}
.card{width:100%;max-width:56rem;background:#fff;border-radius:8px;box-shadow:0 1px 3px rgba(0,0,0,.12);padding:24px}
.card>*+*{margin-top:16px}
button{background:#1f2328;color:#fff;border:0;border-radius:6px;padding:8px 16px;font-weight:600;cursor:pointer}
button:disabled{opacity:.5;cursor:default}
.muted{color:#6b7280;font-size:14px}
.ua{background:#f3f4f6;border-radius:4px;padding:8px;font-size:12px;word-break:break-all}
.list{max-height:24rem;overflow-y:auto}
table{width:100%;border-collapse:collapse}
th,td{text-align:left;padding:6px 8px;border-bottom:1px solid #e5e7eb}
input[type=text]{width:100%;padding:6px 8px;border:1px solid #d0d7de;border-radius:6px}
.alert{border-radius:6px;padding:12px;border:1px solid}
.alert.error{border-color:#da3633;color:#da3633}
.alert.ok{border-color:#238636;color:#1a7f37}
.hidden{display:none}
"#;

const SURVEY_BODY: &str = r#"<div class="card">
<div id="step1">
<button id="collect">STEP 1</button>
<p class="muted">After clicking, you'll be asked to grant permission to access your local fonts.</p>
</div>
<div id="step2" class="hidden">
<h2>Select fonts to send:</h2>
<p class="muted">Uncheck the fonts you don't want to send. Your user-agent string will also be sent:</p>
<p class="ua" id="ua"></p>
<div class="list"><table><thead><tr><th style="width:100px">Select</th><th>Font Name</th><th>Preview</th></tr></thead><tbody id="rows"></tbody></table></div>
<label class="muted" for="os">Operating system (optional)</label>
<input type="text" id="os" placeholder="e.g. macOS 14.5" />
<button id="submit">STEP 2</button>
</div>
<div id="error" class="alert error hidden"></div>
<div id="success" class="alert ok hidden"></div>
<style id="previews"></style>
</div>"#;

const SURVEY_JS: &str = r#"
function fsCall(method, params){window.ipc.postMessage(JSON.stringify({method:method,params:params||{}}))}
async function fsBrowserReport(){
  if(!('queryLocalFonts' in window))return {unsupported:true};
  try{
    const data=await window.queryLocalFonts();
    return {fonts:data.map(function(f){return {family:f.family,fullName:f.fullName,postscriptName:f.postscriptName}})};
  }catch(e){return {error:{name:e.name||'Error',message:e.message||String(e)}}}
}
function show(id,on){document.getElementById(id).classList.toggle('hidden',!on)}
window.__fs_render=function(state,err){
  var reviewing=state.phase!=='idle'&&state.phase!=='collecting';
  show('step1',!reviewing);show('step2',reviewing);
  document.getElementById('ua').textContent=state.user_agent;
  var collect=document.getElementById('collect');collect.disabled=!state.can_collect;
  var submit=document.getElementById('submit');
  submit.disabled=!state.can_submit;
  submit.textContent=state.phase==='submitting'?'Submitting...':'STEP 2';
  var rows=document.getElementById('rows');rows.innerHTML='';
  var css='';
  state.fonts.forEach(function(f,i){
    var tr=document.createElement('tr');tr.dataset.key=f.postscript_name;
    var cb=document.createElement('input');cb.type='checkbox';cb.checked=f.included;cb.disabled=!state.can_submit;
    cb.addEventListener('change',function(){fsCall('fonts.toggle',{index:i})});
    var c1=document.createElement('td');c1.appendChild(cb);
    var c2=document.createElement('td');c2.textContent=f.full_name;
    var span=document.createElement('span');span.textContent=f.full_name;
    span.style.fontFamily=f.preview_family;span.style.fontFeatureSettings='"liga" 0, "calt" 0';
    var c3=document.createElement('td');c3.appendChild(span);
    tr.appendChild(c1);tr.appendChild(c2);tr.appendChild(c3);rows.appendChild(tr);
    css+='@font-face{font-family:'+JSON.stringify(f.preview_family)+';src:local('+JSON.stringify(f.full_name)+');font-display:block}';
  });
  document.getElementById('previews').textContent=css;
  var error=err||state.error;
  var e=document.getElementById('error');e.textContent=error?'Error: '+error:'';show('error',!!error);
  var s=document.getElementById('success');
  s.textContent=state.message?state.message+' '+(state.html_url||''):'';show('success',!!state.message);
};
document.getElementById('collect').addEventListener('click',async function(){
  this.disabled=true;
  if(window.__FS_SOURCE==='browser'){fsCall('fonts.collect',{report:await fsBrowserReport()})}
  else{fsCall('fonts.collect',{})}
});
document.getElementById('submit').addEventListener('click',function(){
  this.disabled=true;this.textContent='Submitting...';
  fsCall('fonts.submit',{declared_os:document.getElementById('os').value});
});
fsCall('survey.set_user_agent',{user_agent:navigator.userAgent});
"#;

/// Build the survey page. The configured font source decides whether the
/// page enumerates fonts itself.
fn survey_html(font_source: FontSourceKind) -> String {
    let source = match font_source {
        FontSourceKind::Browser => "browser",
        FontSourceKind::System => "system",
        FontSourceKind::None => "none",
    };
    let mut html = String::with_capacity(SURVEY_CSS.len() + SURVEY_BODY.len() + SURVEY_JS.len() + 256);
    html.push_str("<!DOCTYPE html><html><head><meta charset=\"UTF-8\"><title>Local Fonts inspector</title><style>");
    html.push_str(SURVEY_CSS);
    html.push_str("</style></head><body>");
    html.push_str(SURVEY_BODY);
    html.push_str("<script>window.__FS_SOURCE=");
    html.push_str(&json!(source).to_string());
    html.push_str(";</script><script>");
    html.push_str(SURVEY_JS);
    html.push_str("</script></body></html>");
    html
}

// ─── IPC handler ───

/// Runs one IPC call and pushes the resulting state back to the page.
fn dispatch(app: Arc<Mutex<App>>, runtime: &tokio::runtime::Handle, proxy: EventLoopProxy<UserEvent>, message: &str) {
    let Ok(msg) = serde_json::from_str::<Value>(message) else {
        log::warn!("ignoring malformed IPC message");
        return;
    };
    let method = msg.get("method").and_then(|v| v.as_str()).unwrap_or("").to_string();
    let params = msg.get("params").cloned().unwrap_or(json!({}));

    runtime.spawn(async move {
        let error = handle_method(&app, &method, &params).await.err();
        let state = match handle_method(&app, "survey.state", &json!({})).await {
            Ok(state) => state,
            Err(e) => {
                log::error!("could not read survey state: {}", e);
                return;
            }
        };
        let script = format!("window.__fs_render({},{})", state, json!(error));
        let _ = proxy.send_event(UserEvent::EvalScript(script));
    });
}

/// Opens the survey window and runs the event loop until it is closed.
pub fn run() {
    let app = match App::from_environment() {
        Ok(app) => app,
        Err(e) => {
            log::error!("failed to initialize fontsurvey: {}", e);
            std::process::exit(1);
        }
    };
    let font_source = app.settings_engine.get_settings().font_source;
    let app = Arc::new(Mutex::new(app));

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("failed to start async runtime: {}", e);
            std::process::exit(1);
        }
    };
    let handle = runtime.handle().clone();

    let event_loop: EventLoop<UserEvent> = EventLoopBuilder::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title("Local Fonts inspector")
        .with_inner_size(tao::dpi::LogicalSize::new(1000.0, 760.0))
        .build(&event_loop)
        .expect("Failed to create window");

    let builder = WebViewBuilder::new()
        .with_custom_protocol("fs".into(), move |_wv_id, _request| {
            wry::http::Response::builder()
                .header("Content-Type", "text/html; charset=utf-8")
                .body(survey_html(font_source).into_bytes().into())
                .unwrap_or_else(|_| wry::http::Response::new(Vec::new().into()))
        })
        .with_url("fs://localhost/")
        .with_ipc_handler(move |msg: wry::http::Request<String>| {
            dispatch(app.clone(), &handle, proxy.clone(), msg.body());
        })
        .with_devtools(cfg!(debug_assertions));

    #[cfg(target_os = "linux")]
    let webview = {
        use tao::platform::unix::WindowExtUnix;
        use wry::WebViewBuilderExtUnix;
        let vbox = window.default_vbox().expect("Failed to get GTK vbox");
        builder.build_gtk(vbox).expect("Failed to create WebView")
    };

    #[cfg(not(target_os = "linux"))]
    let webview = builder.build(&window).expect("Failed to create WebView");

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;
        // Keeps the runtime alive for as long as the loop runs.
        let _ = &runtime;

        match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit;
            }
            Event::UserEvent(UserEvent::EvalScript(js)) => {
                let _ = webview.evaluate_script(&js);
            }
            _ => {}
        }
    });
}
