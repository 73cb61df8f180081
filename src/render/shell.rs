//! Document shell: inline styles and the event script.
//!
//! The page is compiled into the binary. No external assets, no build
//! tools, no CDN dependencies.

use super::Html;

/// Wrap the app markup in a full document.
pub fn document(lang: &str, title: &str, app: Html) -> Html {
    let mut out = Html::raw("<!DOCTYPE html>\n<html");
    out.push_attr("lang", lang);
    out.push_raw(">\n<head>\n<meta charset=\"utf-8\">\n");
    out.push_raw("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n<title>");
    out.push_text(title);
    out.push_raw("</title>\n<style>");
    out.push_raw(STYLES);
    out.push_raw("</style>\n</head>\n<body>\n");
    out.push(app);
    out.push_raw("\n<script>");
    out.push_raw(SCRIPT);
    out.push_raw("</script>\n</body>\n</html>\n");
    out
}

const STYLES: &str = r#"
:root {
  --bg: #0d1117;
  --surface: #161b22;
  --border: #30363d;
  --text: #e6edf3;
  --text-muted: #8b949e;
  --accent: #58a6ff;
  --green: #3fb950;
  --yellow: #d29922;
  --red: #f85149;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
  --mono: 'SF Mono', 'Cascadia Code', 'Fira Code', monospace;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body { background: var(--bg); color: var(--text); font-family: var(--font); font-size: 14px; line-height: 1.5; }
.app { max-width: 1200px; margin: 0 auto; padding: 24px; }
header { margin-bottom: 24px; padding-bottom: 16px; border-bottom: 1px solid var(--border); }
header h1 { font-size: 24px; font-weight: 600; }
[hidden] { display: none !important; }

/* Tabs */
nav.tabs { display: flex; gap: 4px; margin-bottom: 24px; background: var(--surface); border-radius: var(--radius); padding: 4px; border: 1px solid var(--border); }
nav.tabs .tab { flex: 1; padding: 8px 16px; border: none; border-radius: 6px; background: transparent; color: var(--text-muted); font-size: 13px; font-weight: 500; cursor: pointer; }
nav.tabs .tab:hover { color: var(--text); background: rgba(255,255,255,0.04); }
nav.tabs .tab.active { background: var(--accent); color: #fff; }

/* Buttons */
.btn { padding: 6px 14px; border: 1px solid var(--border); border-radius: 6px; background: var(--surface); color: var(--text); font-size: 13px; cursor: pointer; }
.btn:hover { border-color: var(--accent); }
.btn-sm { padding: 3px 10px; font-size: 12px; }
.btn-primary { background: var(--accent); border-color: var(--accent); color: #fff; }
.btn-danger { border-color: var(--red); color: var(--red); }
.btn-warning { border-color: var(--yellow); color: var(--yellow); }
.btn-link { background: none; border: none; color: var(--accent); cursor: pointer; margin-left: 8px; font-size: 12px; }
.btn-close { background: none; border: none; color: var(--text-muted); font-size: 18px; cursor: pointer; margin-left: auto; }
.toolbar { display: flex; gap: 8px; justify-content: flex-end; margin-bottom: 16px; }

/* Tables and cards */
.table { width: 100%; border-collapse: collapse; background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); }
.table th, .table td { padding: 8px 12px; text-align: left; border-bottom: 1px solid var(--border); }
.table th { color: var(--text-muted); font-weight: 500; font-size: 12px; }
.table .actions { white-space: nowrap; }
code, pre, .method { font-family: var(--mono); font-size: 12px; }
.method { color: var(--accent); font-weight: 600; }
.card { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 20px; margin-bottom: 16px; }
.card h3 { font-size: 14px; margin-bottom: 12px; }
.stat-grid { display: grid; grid-template-columns: repeat(auto-fit, minmax(180px, 1fr)); gap: 12px; }
.stat-value { font-size: 28px; font-weight: 700; color: var(--accent); }
.stat-label { color: var(--text-muted); font-size: 12px; }
.top-list { list-style: none; }
.top-list li { display: flex; justify-content: space-between; padding: 6px 0; border-bottom: 1px solid var(--border); }
.badge { display: inline-flex; padding: 2px 10px; border-radius: 12px; font-size: 12px; border: 1px solid var(--border); }
.badge.ok { border-color: var(--green); color: var(--green); }
.badge.err { border-color: var(--red); color: var(--red); }

/* States */
.loading, .empty-state { padding: 40px; text-align: center; color: var(--text-muted); }
.alert { padding: 12px 16px; border-radius: var(--radius); margin-bottom: 16px; border: 1px solid; }
.alert-error { border-color: var(--red); color: var(--red); }
.alert-warning { border-color: var(--yellow); color: var(--yellow); }
.muted { color: var(--text-muted); margin-bottom: 12px; }

/* Modals */
.modal-backdrop { position: fixed; inset: 0; background: rgba(0,0,0,0.6); display: flex; align-items: center; justify-content: center; z-index: 10; }
.modal { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 20px; width: min(520px, 92vw); }
.modal-header { display: flex; align-items: center; margin-bottom: 16px; }
.modal-header h2 { font-size: 16px; }
.modal-footer { display: flex; gap: 8px; justify-content: flex-end; margin-top: 16px; }
.field { display: flex; flex-direction: column; gap: 4px; margin-bottom: 12px; }
.field.checkbox { flex-direction: row; align-items: center; gap: 8px; }
input[type=text], input[type=number], textarea { background: var(--bg); border: 1px solid var(--border); border-radius: 6px; color: var(--text); padding: 6px 10px; font-family: var(--font); width: 100%; }
.details { display: grid; grid-template-columns: max-content 1fr; gap: 6px 16px; }
.details dt { color: var(--text-muted); }

/* Playground */
.status-row { display: flex; gap: 12px; align-items: center; margin-bottom: 16px; }
#predictForm { display: flex; flex-direction: column; gap: 8px; align-items: flex-start; margin-bottom: 16px; }
pre.result { background: var(--surface); border: 1px solid var(--border); border-radius: var(--radius); padding: 12px; overflow-x: auto; }

/* Toasts */
.toast-container { position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 20; }
.toast { display: flex; gap: 12px; align-items: center; min-width: 260px; padding: 10px 14px; border-radius: var(--radius); background: var(--surface); border: 1px solid var(--border); }
.toast-success { border-color: var(--green); }
.toast-error { border-color: var(--red); }
.toast-warning { border-color: var(--yellow); }
.toast-info { border-color: var(--accent); }
"#;

const SCRIPT: &str = r#"
(function () {
  'use strict';

  async function send(event) {
    try {
      const res = await fetch('/events', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(event),
      });
      const data = await res.json();
      if (data.redirect) {
        window.location.href = data.redirect;
        return;
      }
      if (data.html !== undefined) {
        document.getElementById('app').outerHTML = data.html;
        armToasts();
      }
    } catch (e) {
      console.error('event failed', e);
    }
  }

  function armToasts() {
    document.querySelectorAll('[data-toast-ttl]').forEach(function (el) {
      const ttl = parseInt(el.dataset.toastTtl, 10) || 0;
      el.removeAttribute('data-toast-ttl');
      setTimeout(function () { el.remove(); }, ttl);
    });
  }

  function collect(form) {
    const fields = {};
    form.querySelectorAll('input, textarea, select').forEach(function (input) {
      if (!input.name) return;
      fields[input.name] = input.type === 'checkbox' ? input.checked : input.value;
    });
    return fields;
  }

  document.addEventListener('click', function (e) {
    const copy = e.target.closest('[data-copy]');
    if (copy) {
      navigator.clipboard.writeText(copy.dataset.copy)
        .then(function () { send({ type: 'key_copied' }); })
        .catch(function (err) { console.error('copy failed', err); });
      return;
    }
    const target = e.target.closest('[data-event]');
    if (!target) return;
    e.preventDefault();
    send(JSON.parse(target.dataset.event));
  });

  document.addEventListener('submit', function (e) {
    const form = e.target.closest('[data-submit]');
    if (!form) return;
    e.preventDefault();
    const event = JSON.parse(form.dataset.submit);
    const fields = collect(form);
    if (form.dataset.field) {
      event[form.dataset.field] = fields;
    } else {
      Object.assign(event, fields);
    }
    send(event);
  });

  armToasts();
})();
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_wraps_app_and_escapes_title() {
        let html = document("tr", "A & B", Html::raw("<div id=\"app\"></div>"));
        let s = html.as_str();
        assert!(s.starts_with("<!DOCTYPE html>\n<html lang=\"tr\">"));
        assert!(s.contains("<title>A &amp; B</title>"));
        assert!(s.contains("<div id=\"app\"></div>"));
        assert!(s.contains("fetch('/events'"));
    }
}
