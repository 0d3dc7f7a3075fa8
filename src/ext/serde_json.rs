// === Module Header (agents-tooling) START ===
// header: Parsed by scripts/check_module_headers.sh for purpose/role presence; keep keys on single-line entries.
// purpose: Lenient dotted-path extraction from serde_json::Value for loosely shaped gh search payloads
// role: extension/serde_json
// outputs: JsonFetch trait and JsonFetched wrapper (typed, string and first-of helpers)
// invariants: No panics; missing paths, nulls and wrong types yield None
// tie_breakers: contracts > orchestration > correctness > performance > minimal_diffs
// === Module Header END ===

use serde::de::DeserializeOwned;

/// A located (or missing) JSON value awaiting typed extraction.
pub struct JsonFetched<'a> {
  inner: Option<&'a serde_json::Value>,
}

impl<'a> JsonFetched<'a> {
  pub fn to<T>(&self) -> Option<T>
  where
    T: DeserializeOwned,
  {
    self.inner.and_then(|v| serde_json::from_value::<T>(v.clone()).ok())
  }

  /// Non-empty string at this location; numbers are not coerced.
  pub fn text(&self) -> Option<&'a str> {
    self.inner.and_then(|v| v.as_str()).filter(|s| !s.trim().is_empty())
  }
}

/// Fetch nested values via dotted paths like "repository.nameWithOwner".
pub trait JsonFetch {
  fn fetch(&self, path: &str) -> JsonFetched<'_>;

  /// First non-empty string among `paths`, in order.
  fn first_text(&self, paths: &[&str]) -> Option<String> {
    paths.iter().find_map(|p| self.fetch(p).text().map(str::to_string))
  }
}

impl JsonFetch for serde_json::Value {
  fn fetch(&self, path: &str) -> JsonFetched<'_> {
    if path.is_empty() {
      return JsonFetched { inner: Some(self) };
    }

    let mut cur = self;

    for key in path.split('.') {
      match cur.get(key) {
        Some(next) if !next.is_null() => cur = next,
        _ => return JsonFetched { inner: None },
      }
    }

    JsonFetched { inner: Some(cur) }
  }
}
