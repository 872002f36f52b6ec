//! Plain-text template substitution

/// Replace `{name}` placeholders from the given variable set. Unknown
/// placeholders are left intact so a half-filled template is visible in
/// the draft instead of silently disappearing.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = template.to_string();
    for (name, value) in vars {
        out = out.replace(&format!("{{{}}}", name), value);
    }
    out
}
