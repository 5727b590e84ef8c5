//! Small JavaScript bridges run through `document::eval`.
//!
//! Everything here works on every renderer (web and desktop webview), so the
//! platform modules only reach for `web-sys` where a bridge cannot do the job.

use dioxus::prelude::*;
use serde::Deserialize;

/// Escape a string so it's safe to embed inside a JS string literal (double-quoted).
pub fn js_string_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            // Keep `</script>` and friends from terminating an inline script
            '<' => out.push_str("\\u003c"),
            c if c < '\x20' => {
                out.push_str(&format!("\\u{:04x}", c as u32));
            }
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

/// Move keyboard focus to the element with `id`, if it exists.
pub fn focus_element(id: &str) {
    let js = format!(
        "document.getElementById({})?.focus();",
        js_string_escape(id)
    );
    document::eval(&js);
}

/// Full page navigation through `window.location`.
pub fn navigate(url: &str) {
    let js = format!("window.location.href = {};", js_string_escape(url));
    document::eval(&js);
}

#[derive(Debug, Deserialize)]
struct CsrfProbe {
    field: Option<String>,
    cookies: Option<String>,
}

/// Read the CSRF form field and `document.cookie` once and resolve the token.
pub async fn probe_csrf_token() -> Option<String> {
    let js = format!(
        r#"(function() {{
            var input = document.querySelector('input[name={field}]');
            dioxus.send({{
                field: input ? input.value : null,
                cookies: typeof document.cookie === 'string' ? document.cookie : null
            }});
        }})();"#,
        field = js_string_escape(api::csrf::CSRF_FIELD),
    );
    let mut eval = document::eval(&js);
    match eval.recv::<CsrfProbe>().await {
        Ok(probe) => api::csrf::resolve(probe.field, probe.cookies.as_deref()),
        Err(e) => {
            tracing::debug!("CSRF probe failed: {e:?}");
            None
        }
    }
}

/// Current `window.innerWidth`, kept up to date on resize. `None` until the
/// first measurement arrives.
pub fn use_viewport_width() -> Signal<Option<f64>> {
    let mut width = use_signal(|| None::<f64>);

    use_effect(move || {
        spawn(async move {
            let js = r#"(function() {
                var send = function() { dioxus.send(window.innerWidth); };
                window.addEventListener('resize', send);
                send();
            })();"#;
            let mut eval = document::eval(js);
            while let Ok(w) = eval.recv::<f64>().await {
                width.set(Some(w));
            }
        });
    });

    width
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_string_escape() {
        assert_eq!(js_string_escape("field-start_date"), r#""field-start_date""#);
        assert_eq!(js_string_escape(r#"a"b\c"#), r#""a\"b\\c""#);
        assert_eq!(js_string_escape("line\nnext\t"), r#""line\nnext\t""#);
        assert_eq!(js_string_escape("</script>"), r#""\u003c/script>""#);
        assert_eq!(js_string_escape("\u{1}"), r#""\u0001""#);
    }
}
