//! Comment-preserving JSON editing.
//!
//! Some clients keep their config in JSONC (VS Code-style JSON with `//`
//! and `/* */` comments, trailing commas tolerated). Re-serializing such a
//! file would destroy the user's comments and formatting, so edits here are
//! textual patches: the original text is kept verbatim and only the spans
//! touched by a `set` are spliced. Untouched keys, key order, comments and
//! whitespace are byte-identical to the input.

use serde_json::Value;

/// One JSONC config file, held as source text plus patch operations.
#[derive(Debug, Clone)]
pub struct JsoncDocument {
    text: String,
}

/// Replace comments (and trailing commas) with spaces so the result parses
/// as plain JSON. String literals are left untouched.
pub fn strip_jsonc_comments(source: &str) -> String {
    let bytes = source.as_bytes();
    let mut out = bytes.to_vec();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'"' => i = skip_string(bytes, i),
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    out[i] = b' ';
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                out[i] = b' ';
                out[i + 1] = b' ';
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                        out[i] = b' ';
                        out[i + 1] = b' ';
                        i += 2;
                        break;
                    }
                    if !bytes[i].is_ascii_whitespace() {
                        out[i] = b' ';
                    }
                    i += 1;
                }
            }
            b',' => {
                // Blank out a comma whose next token closes a container.
                let next = skip_ws_and_comments(bytes, i + 1);
                if next < bytes.len() && (bytes[next] == b'}' || bytes[next] == b']') {
                    out[i] = b' ';
                }
                i += 1;
            }
            _ => i += 1,
        }
    }
    // Blanked characters lose every one of their bytes to spaces (none of
    // the scanned delimiters match a UTF-8 continuation byte), so the
    // buffer stays valid UTF-8.
    String::from_utf8(out).unwrap_or_else(|_| source.to_string())
}

impl JsoncDocument {
    /// Empty baseline document.
    pub fn new() -> Self {
        Self {
            text: "{}".to_string(),
        }
    }

    /// Accept the source only if it is a JSONC object; the caller decides
    /// what to do about anything else.
    pub fn parse(source: &str) -> Option<Self> {
        let cleaned = strip_jsonc_comments(source);
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(Value::Object(_)) => Some(Self {
                text: source.to_string(),
            }),
            _ => None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether a member exists at `path`.
    pub fn contains(&self, path: &[&str]) -> bool {
        let bytes = self.text.as_bytes();
        let Some(mut open) = root_open(bytes) else {
            return false;
        };
        for (idx, seg) in path.iter().enumerate() {
            let members = scan_members(bytes, open);
            let Some(m) = members.iter().find(|m| m.key == *seg) else {
                return false;
            };
            if idx + 1 == path.len() {
                return true;
            }
            if bytes[m.value_start] != b'{' {
                return false;
            }
            open = m.value_start;
        }
        true
    }

    /// Set `path` only when absent; used for schema bootstrap keys.
    pub fn set_if_missing(&mut self, path: &[&str], value: &Value) {
        if !self.contains(path) {
            self.set(path, value);
        }
    }

    /// Set the member at `path` to `value`, creating any missing
    /// intermediate objects. Only the affected span of the source text is
    /// rewritten.
    pub fn set(&mut self, path: &[&str], value: &Value) {
        debug_assert!(!path.is_empty());
        if root_open(self.text.as_bytes()).is_none() {
            self.text = "{}".to_string();
        }
        let mut open = root_open(self.text.as_bytes()).unwrap_or(0);
        let mut depth = 0;
        loop {
            let seg = path[depth];
            let last = depth + 1 == path.len();
            let bytes = self.text.as_bytes();
            let members = scan_members(bytes, open);
            let close = matching_brace(bytes, open).unwrap_or(bytes.len().saturating_sub(1));

            match members.iter().find(|m| m.key == seg) {
                Some(m) if !last && bytes[m.value_start] == b'{' => {
                    open = m.value_start;
                    depth += 1;
                }
                Some(m) => {
                    // Leaf member, or a non-object standing where the rest
                    // of the path needs an object: replace the value span.
                    let indent = line_indent(&self.text, m.key_start);
                    let rendered = render(&nest(&path[depth + 1..], value), &indent);
                    self.text
                        .replace_range(m.value_start..m.value_end, &rendered);
                    return;
                }
                None => {
                    let rendered_value = nest(&path[depth + 1..], value);
                    self.insert_member(open, close, &members, seg, &rendered_value);
                    return;
                }
            }
        }
    }

    fn insert_member(
        &mut self,
        open: usize,
        close: usize,
        members: &[Member],
        key: &str,
        value: &Value,
    ) {
        match members.last() {
            Some(last) => {
                let indent = line_indent(&self.text, last.key_start);
                let rendered = render(value, &indent);
                let insertion = format!(",\n{indent}\"{key}\": {rendered}");
                self.text.insert_str(last.value_end, &insertion);
            }
            None => {
                let outer = line_indent(&self.text, open);
                let indent = format!("{outer}  ");
                let rendered = render(value, &indent);
                let replacement = format!("{{\n{indent}\"{key}\": {rendered}\n{outer}}}");
                self.text.replace_range(open..close + 1, &replacement);
            }
        }
    }
}

impl Default for JsoncDocument {
    fn default() -> Self {
        Self::new()
    }
}

/// Wrap `value` in objects named by `path`, innermost last.
fn nest(path: &[&str], value: &Value) -> Value {
    let mut current = value.clone();
    for seg in path.iter().rev() {
        current = serde_json::json!({ *seg: current });
    }
    current
}

/// Pretty-print `value` with every continuation line prefixed by `indent`,
/// so the splice lines up with the member it becomes part of.
fn render(value: &Value, indent: &str) -> String {
    let pretty = serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string());
    let mut lines = pretty.lines();
    let mut out = String::from(lines.next().unwrap_or_default());
    for line in lines {
        out.push('\n');
        out.push_str(indent);
        out.push_str(line);
    }
    out
}

/// Leading whitespace of the line containing `pos`; falls back to two
/// spaces when the position does not start its line.
fn line_indent(text: &str, pos: usize) -> String {
    let line_start = text[..pos].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let prefix = &text[line_start..pos];
    if prefix.chars().all(|c| c == ' ' || c == '\t') {
        prefix.to_string()
    } else {
        "  ".to_string()
    }
}

#[derive(Debug)]
struct Member {
    key: String,
    key_start: usize,
    value_start: usize,
    value_end: usize,
}

fn root_open(bytes: &[u8]) -> Option<usize> {
    let i = skip_ws_and_comments(bytes, 0);
    (i < bytes.len() && bytes[i] == b'{').then_some(i)
}

fn skip_ws_and_comments(bytes: &[u8], mut i: usize) -> usize {
    while i < bytes.len() {
        match bytes[i] {
            b' ' | b'\t' | b'\r' | b'\n' => i += 1,
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'/' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'/' if i + 1 < bytes.len() && bytes[i + 1] == b'*' => {
                i += 2;
                while i < bytes.len() {
                    if bytes[i] == b'*' && i + 1 < bytes.len() && bytes[i + 1] == b'/' {
                        i += 2;
                        break;
                    }
                    i += 1;
                }
            }
            _ => break,
        }
    }
    i
}

/// `i` sits on an opening quote; returns the index just past the closing one.
fn skip_string(bytes: &[u8], i: usize) -> usize {
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 2,
            b'"' => return j + 1,
            _ => j += 1,
        }
    }
    j
}

/// `i` sits on the first byte of a value; returns the index just past it.
fn skip_value(bytes: &[u8], i: usize) -> usize {
    match bytes.get(i) {
        Some(b'{') | Some(b'[') => {
            let mut depth = 0usize;
            let mut j = i;
            while j < bytes.len() {
                match bytes[j] {
                    b'"' => {
                        j = skip_string(bytes, j);
                        continue;
                    }
                    b'/' => {
                        j = skip_ws_and_comments(bytes, j);
                        if bytes.get(j) != Some(&b'/') {
                            continue;
                        }
                        j += 1;
                        continue;
                    }
                    b'{' | b'[' => depth += 1,
                    b'}' | b']' => {
                        depth -= 1;
                        if depth == 0 {
                            return j + 1;
                        }
                    }
                    _ => {}
                }
                j += 1;
            }
            j
        }
        Some(b'"') => skip_string(bytes, i),
        _ => {
            let mut j = i;
            while j < bytes.len()
                && matches!(bytes[j], b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'+' | b'-' | b'.')
            {
                j += 1;
            }
            j
        }
    }
}

/// Index of the `}` matching the `{` at `open`.
fn matching_brace(bytes: &[u8], open: usize) -> Option<usize> {
    let end = skip_value(bytes, open);
    (end > open && end <= bytes.len() && bytes[end - 1] == b'}').then(|| end - 1)
}

/// Direct members of the object whose `{` sits at `open`.
fn scan_members(bytes: &[u8], open: usize) -> Vec<Member> {
    let close = match matching_brace(bytes, open) {
        Some(c) => c,
        None => return Vec::new(),
    };
    let mut members = Vec::new();
    let mut i = skip_ws_and_comments(bytes, open + 1);
    while i < close {
        if bytes[i] != b'"' {
            break;
        }
        let key_start = i;
        let key_end = skip_string(bytes, i);
        let key = decode_key(&bytes[key_start + 1..key_end.saturating_sub(1)]);
        i = skip_ws_and_comments(bytes, key_end);
        if i >= close || bytes[i] != b':' {
            break;
        }
        let value_start = skip_ws_and_comments(bytes, i + 1);
        let value_end = skip_value(bytes, value_start);
        members.push(Member {
            key,
            key_start,
            value_start,
            value_end,
        });
        i = skip_ws_and_comments(bytes, value_end);
        if i < close && bytes[i] == b',' {
            i = skip_ws_and_comments(bytes, i + 1);
        }
    }
    members
}

fn decode_key(raw: &[u8]) -> String {
    let raw = String::from_utf8_lossy(raw);
    if raw.contains('\\') {
        serde_json::from_str::<String>(&format!("\"{raw}\"")).unwrap_or_else(|_| raw.to_string())
    } else {
        raw.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn set_into_empty_document() {
        let mut doc = JsoncDocument::new();
        doc.set(&["mcp", "fs"], &json!({ "type": "local" }));
        assert_eq!(
            doc.text(),
            "{\n  \"mcp\": {\n    \"fs\": {\n      \"type\": \"local\"\n    }\n  }\n}"
        );
    }

    #[test]
    fn comments_and_unrelated_keys_survive() {
        let source = "// opencode config\n{\n  \"theme\": \"dark\", // keep me\n  \"mcp\": {}\n}\n";
        let mut doc = JsoncDocument::parse(source).expect("valid jsonc");
        doc.set(&["mcp", "fs"], &json!({ "type": "remote", "url": "http://x" }));
        let text = doc.text();
        assert!(text.starts_with("// opencode config\n"));
        assert!(text.contains("\"theme\": \"dark\", // keep me"));
        assert!(text.contains("\"fs\""));
        // The patched result must still be parseable JSON(C).
        let reparsed: Value =
            serde_json::from_str(&strip_jsonc_comments(text)).expect("patched text parses");
        assert_eq!(reparsed["mcp"]["fs"]["url"], "http://x");
        assert_eq!(reparsed["theme"], "dark");
    }

    #[test]
    fn replacing_a_member_is_idempotent() {
        let mut doc = JsoncDocument::new();
        doc.set(&["mcp", "fs"], &json!({ "enabled": true }));
        let first = doc.text().to_string();
        doc.set(&["mcp", "fs"], &json!({ "enabled": true }));
        assert_eq!(doc.text(), first);
    }

    #[test]
    fn set_if_missing_leaves_existing_value() {
        let source = "{\n  \"$schema\": \"custom\"\n}";
        let mut doc = JsoncDocument::parse(source).expect("valid jsonc");
        doc.set_if_missing(&["$schema"], &json!("default"));
        assert!(doc.text().contains("\"$schema\": \"custom\""));
    }

    #[test]
    fn appends_after_the_last_member() {
        let source = "{\n  \"a\": 1,\n  \"b\": [1, 2]\n}";
        let mut doc = JsoncDocument::parse(source).expect("valid jsonc");
        doc.set(&["c"], &json!("x"));
        assert_eq!(doc.text(), "{\n  \"a\": 1,\n  \"b\": [1, 2],\n  \"c\": \"x\"\n}");
    }

    #[test]
    fn trailing_commas_parse() {
        let source = "{\n  \"a\": 1,\n}";
        assert!(JsoncDocument::parse(source).is_some());
    }

    #[test]
    fn non_object_root_is_rejected() {
        assert!(JsoncDocument::parse("[1, 2]").is_none());
        assert!(JsoncDocument::parse("not json").is_none());
    }
}
