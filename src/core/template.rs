//! Message template rendering
//!
//! Substitutes `{Name}` and positional `{0}` placeholders with bound
//! property values. `{{` and `}}` escape literal braces. A format
//! specifier after `:` (e.g. `{TraceSource:l}`) is accepted and ignored.
//! Placeholders with no matching property are left verbatim.

use super::property::Property;

pub fn render(template: &str, properties: &[Property]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '{' => {
                if chars.peek() == Some(&'{') {
                    chars.next();
                    out.push('{');
                    continue;
                }

                let mut token = String::new();
                let mut closed = false;
                for t in chars.by_ref() {
                    if t == '}' {
                        closed = true;
                        break;
                    }
                    token.push(t);
                }

                if !closed {
                    out.push('{');
                    out.push_str(&token);
                    continue;
                }

                let name = token.split(':').next().unwrap_or("");
                match lookup(properties, name) {
                    Some(value) => out.push_str(&value),
                    None => {
                        out.push('{');
                        out.push_str(&token);
                        out.push('}');
                    }
                }
            }
            '}' => {
                if chars.peek() == Some(&'}') {
                    chars.next();
                }
                out.push('}');
            }
            _ => out.push(c),
        }
    }

    out
}

/// First binding wins on duplicate names
fn lookup(properties: &[Property], name: &str) -> Option<String> {
    properties
        .iter()
        .find(|p| p.name == name)
        .map(|p| p.value.to_string())
}
