// Number and XML helpers shared by the path generator and the SVG writer.

/// Formats a number the way a JavaScript template literal would (`Number#toString()`), so path
/// strings stay byte-compatible with the browser component. `-0` and non-finite values print
/// as `0`.
pub(crate) fn fmt(v: f64) -> String {
    let mut buf = ryu_js::Buffer::new();
    js_number_to_string(v, &mut buf).to_string()
}

pub(crate) fn fmt_into(out: &mut String, v: f64, buf: &mut ryu_js::Buffer) {
    out.push_str(js_number_to_string(v, buf));
}

fn js_number_to_string(mut v: f64, buf: &mut ryu_js::Buffer) -> &str {
    if !v.is_finite() {
        return "0";
    }
    if v == -0.0 {
        v = 0.0;
    }
    buf.format_finite(v)
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
