use serde_json::Value;

/// Content fingerprint of a document payload.
///
/// Object keys are written in sorted order at every level, so two payloads
/// that differ only in key order are equal. The crc32 is a pre-check; equal
/// checksums still compare the canonical text.
#[derive(Debug, Clone, Eq)]
pub struct ContentHash {
    crc: u32,
    canonical: String,
}

impl ContentHash {
    pub fn of(doc: &Value) -> Self {
        let mut canonical = String::new();
        write_canonical(doc, &mut canonical);
        ContentHash {
            crc: crc32fast::hash(canonical.as_bytes()),
            canonical,
        }
    }

    pub fn crc(&self) -> u32 {
        self.crc
    }

    pub fn canonical(&self) -> &str {
        &self.canonical
    }
}

impl PartialEq for ContentHash {
    fn eq(&self, other: &Self) -> bool {
        self.crc == other.crc && self.canonical == other.canonical
    }
}

fn write_canonical(value: &Value, out: &mut String) {
    match value {
        Value::Object(map) => {
            let mut keys: Vec<&String> = map.keys().collect();
            keys.sort();
            out.push('{');
            for (i, key) in keys.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                out.push_str(&Value::String(key.clone()).to_string());
                out.push(':');
                write_canonical(&map[key], out);
            }
            out.push('}');
        }
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out);
            }
            out.push(']');
        }
        scalar => out.push_str(&scalar.to_string()),
    }
}
