/* src/server/core/src/route.rs */

// Conventional route table: ordered (pattern, defaults) pairs, first match wins.
// Pattern syntax: literal segments, `{name}` params, `{name=Default}` params
// with a fill-in default, and a trailing `{*name}` catch-all.

use std::collections::BTreeMap;

use crate::errors::PlinthError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
  Literal(String),
  Param { name: String, default: Option<String> },
  CatchAll { name: String },
}

fn parse_segment(raw: &str) -> Result<Segment, PlinthError> {
  if let Some(inner) = raw.strip_prefix('{').and_then(|s| s.strip_suffix('}')) {
    if let Some(name) = inner.strip_prefix('*') {
      if name.is_empty() {
        return Err(PlinthError::validation("catch-all segment is missing a name"));
      }
      return Ok(Segment::CatchAll { name: name.to_string() });
    }
    let (name, default) = match inner.split_once('=') {
      Some((n, d)) => (n, Some(d.to_string())),
      None => (inner, None),
    };
    if name.is_empty() {
      return Err(PlinthError::validation(format!("parameter segment \"{raw}\" is missing a name")));
    }
    return Ok(Segment::Param { name: name.to_string(), default });
  }
  if raw.contains('{') || raw.contains('}') {
    return Err(PlinthError::validation(format!("malformed route segment \"{raw}\"")));
  }
  Ok(Segment::Literal(raw.to_string()))
}

/// A single parsed route: URL pattern plus route-level default values.
#[derive(Debug, Clone)]
pub struct RoutePattern {
  name: String,
  segments: Vec<Segment>,
  defaults: BTreeMap<String, String>,
}

impl RoutePattern {
  /// Parse a pattern like `{controller=Default}/{action=Index}` or `{*url}`.
  /// Route-level defaults fill in values no segment captures (the ASP-style
  /// anonymous-defaults object on a catch-all route).
  pub fn parse(
    name: impl Into<String>,
    pattern: &str,
    defaults: &[(&str, &str)],
  ) -> Result<Self, PlinthError> {
    let mut segments = Vec::new();
    for raw in pattern.split('/').filter(|s| !s.is_empty()) {
      segments.push(parse_segment(raw)?);
    }
    if segments.is_empty() {
      return Err(PlinthError::validation("route pattern must contain at least one segment"));
    }
    if let Some(pos) = segments.iter().position(|s| matches!(s, Segment::CatchAll { .. }))
      && pos != segments.len() - 1
    {
      return Err(PlinthError::validation("catch-all segment must be the last segment"));
    }
    let defaults =
      defaults.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    Ok(Self { name: name.into(), segments, defaults })
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// Match a request path against this pattern. Returns captured values merged
  /// over the route-level defaults, or `None` when the path does not fit.
  pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
    let parts: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
    let mut values = self.defaults.clone();
    let mut i = 0;

    for seg in &self.segments {
      match seg {
        Segment::Literal(lit) => {
          if parts.get(i) != Some(&lit.as_str()) {
            return None;
          }
          i += 1;
        }
        Segment::Param { name, default } => {
          if let Some(part) = parts.get(i) {
            values.insert(name.clone(), (*part).to_string());
            i += 1;
          } else if let Some(d) = default {
            values.insert(name.clone(), d.clone());
          } else {
            return None;
          }
        }
        Segment::CatchAll { name } => {
          // Matches the remainder, including the empty remainder
          values.insert(name.clone(), parts[i..].join("/"));
          i = parts.len();
        }
      }
    }

    if i < parts.len() {
      return None;
    }
    Some(RouteMatch { route: self.name.clone(), values })
  }
}

/// Result of a route-table lookup: the matched route's name and the merged
/// value map (captures over defaults).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
  pub route: String,
  pub values: BTreeMap<String, String>,
}

impl RouteMatch {
  pub fn get(&self, key: &str) -> Option<&str> {
    self.values.get(key).map(String::as_str)
  }

  pub fn controller(&self) -> Option<&str> {
    self.get("controller")
  }

  pub fn action(&self) -> Option<&str> {
    self.get("action")
  }

  /// Values other than the controller/action pair (e.g. the catch-all rest).
  pub fn params(&self) -> BTreeMap<String, String> {
    self
      .values
      .iter()
      .filter(|(k, _)| k.as_str() != "controller" && k.as_str() != "action")
      .map(|(k, v)| (k.clone(), v.clone()))
      .collect()
  }
}

/// Ordered route table. Routes are evaluated in registration order; the first
/// pattern that matches wins.
#[derive(Debug, Clone, Default)]
pub struct RouteTable {
  routes: Vec<RoutePattern>,
}

impl RouteTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// The standard SPA starter table:
  ///   1. `{controller=Default}/{action=Index}` — conventional dispatch
  ///   2. `{*url}` — catch-all forcing Default/Index for client-side routes
  pub fn conventional() -> Self {
    let mut table = Self::new();
    table
      .map_route("default", "{controller=Default}/{action=Index}", &[])
      .expect("conventional default route pattern is valid");
    table
      .map_route("catch-all", "{*url}", &[("controller", "Default"), ("action", "Index")])
      .expect("conventional catch-all route pattern is valid");
    table
  }

  pub fn map_route(
    &mut self,
    name: impl Into<String>,
    pattern: &str,
    defaults: &[(&str, &str)],
  ) -> Result<&mut Self, PlinthError> {
    self.routes.push(RoutePattern::parse(name, pattern, defaults)?);
    Ok(self)
  }

  pub fn is_empty(&self) -> bool {
    self.routes.is_empty()
  }

  pub fn len(&self) -> usize {
    self.routes.len()
  }

  /// First match wins.
  pub fn resolve(&self, path: &str) -> Option<RouteMatch> {
    self.matches(path).next()
  }

  /// All matches in registration order. Dispatchers walk this so a route whose
  /// controller/action pair has no handler falls through to later routes (the
  /// ASP-style action constraint).
  pub fn matches<'a>(&'a self, path: &'a str) -> impl Iterator<Item = RouteMatch> + 'a {
    self.routes.iter().filter_map(move |r| r.match_path(path))
  }
}
