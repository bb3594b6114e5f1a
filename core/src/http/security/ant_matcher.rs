//! Ant-style Path Matcher
//!
//! Spring-style path patterns for authorization rules and CORS registrations.
//!
//! # Pattern Syntax
//!
//! - `?` matches exactly one character within a segment
//! - `*` alone matches exactly one path segment; inside a segment it
//!   matches zero or more characters
//! - `**` matches zero or more path segments
//! - `{name}` captures one path segment
//! - `{name:regex}` captures one path segment whose whole text matches `regex`
//!
//! Leading and trailing slashes are not significant: `/api/posts/` and
//! `/api/posts` are the same path.
//!
//! # Examples
//!
//! ```rust
//! use site_security_core::http::security::ant_matcher::AntMatcher;
//!
//! let matcher = AntMatcher::new("/api/*/posts/{id:\\d+}").unwrap();
//! assert!(matcher.matches("/api/v1/posts/42"));
//! assert!(!matcher.matches("/api/v1/posts/latest"));
//! assert!(!matcher.matches("/api/v1/posts/42/comments"));
//! ```
//!
//! # Spring Equivalent
//!
//! `org.springframework.web.util.pattern.PathPattern`

use std::collections::HashMap;

use regex::Regex;

use crate::http::error::ConfigError;

/// Compiled path pattern.
#[derive(Debug, Clone)]
pub struct AntMatcher {
    pattern: String,
    segments: Vec<PatternSegment>,
}

#[derive(Debug, Clone)]
enum PatternSegment {
    Literal(String),
    /// `*`
    AnySegment,
    /// `**`
    AnySegments,
    /// Segment containing `*` or `?`
    Glob(Vec<char>),
    /// `{name}` or `{name:regex}`
    Variable {
        name: String,
        constraint: Option<Regex>,
    },
}

impl AntMatcher {
    /// Compiles `pattern`.
    ///
    /// # Errors
    /// `ConfigError::InvalidPattern` when a `{name:regex}` constraint is not a
    /// valid regular expression or a variable has no name.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let segments = split_path(pattern)
            .into_iter()
            .map(|part| parse_segment(pattern, part))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AntMatcher {
            pattern: pattern.to_string(),
            segments,
        })
    }

    /// Matcher for `/**`, which accepts every path.
    pub fn match_all() -> Self {
        AntMatcher {
            pattern: "/**".to_string(),
            segments: vec![PatternSegment::AnySegments],
        }
    }

    /// Returns the pattern this matcher was compiled from.
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// True when the pattern accepts every possible path.
    pub fn is_match_all(&self) -> bool {
        !self.segments.is_empty()
            && self
                .segments
                .iter()
                .all(|s| matches!(s, PatternSegment::AnySegments))
    }

    /// Checks if `path` matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        match_segments(&self.segments, &split_path(path), &mut None)
    }

    /// Matches `path` and returns the captured `{name}` variables.
    ///
    /// ```rust
    /// use site_security_core::http::security::ant_matcher::AntMatcher;
    ///
    /// let matcher = AntMatcher::new("/posts/{postId:\\d+}/comments/{commentId:\\d+}").unwrap();
    /// let vars = matcher.extract_variables("/posts/3/comments/14").unwrap();
    /// assert_eq!(vars["postId"], "3");
    /// assert_eq!(vars["commentId"], "14");
    /// ```
    pub fn extract_variables(&self, path: &str) -> Option<HashMap<String, String>> {
        let mut variables = HashMap::new();
        if match_segments(&self.segments, &split_path(path), &mut Some(&mut variables)) {
            Some(variables)
        } else {
            None
        }
    }
}

fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn parse_segment(pattern: &str, part: &str) -> Result<PatternSegment, ConfigError> {
    if part == "**" {
        return Ok(PatternSegment::AnySegments);
    }
    if part == "*" {
        return Ok(PatternSegment::AnySegment);
    }
    if let Some(inner) = part.strip_prefix('{').and_then(|p| p.strip_suffix('}')) {
        let (name, constraint) = match inner.split_once(':') {
            Some((name, regex)) => (name, Some(regex)),
            None => (inner, None),
        };
        if name.is_empty() {
            return Err(invalid(pattern, "path variable without a name"));
        }
        let constraint = constraint
            .map(|regex| Regex::new(&format!("^(?:{})$", regex)))
            .transpose()
            .map_err(|e| invalid(pattern, &e.to_string()))?;
        return Ok(PatternSegment::Variable {
            name: name.to_string(),
            constraint,
        });
    }
    if part.contains('*') || part.contains('?') {
        return Ok(PatternSegment::Glob(part.chars().collect()));
    }
    Ok(PatternSegment::Literal(part.to_string()))
}

fn invalid(pattern: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidPattern {
        pattern: pattern.to_string(),
        reason: reason.to_string(),
    }
}

fn match_segments(
    pattern: &[PatternSegment],
    path: &[&str],
    variables: &mut Option<&mut HashMap<String, String>>,
) -> bool {
    let Some((head, rest)) = pattern.split_first() else {
        return path.is_empty();
    };

    match (head, path.split_first()) {
        // Each split point captures into its own map, kept only on success.
        (PatternSegment::AnySegments, _) => (0..=path.len()).any(|skip| match variables {
            None => match_segments(rest, &path[skip..], &mut None),
            Some(vars) => {
                let mut branch = HashMap::new();
                let matched = match_segments(rest, &path[skip..], &mut Some(&mut branch));
                if matched {
                    vars.extend(branch);
                }
                matched
            }
        }),
        (_, None) => false,
        (head, Some((segment, path_rest))) => {
            match_one(head, segment, variables) && match_segments(rest, path_rest, variables)
        }
    }
}

fn match_one(
    head: &PatternSegment,
    segment: &str,
    variables: &mut Option<&mut HashMap<String, String>>,
) -> bool {
    match head {
        PatternSegment::Literal(literal) => literal == segment,
        PatternSegment::AnySegment => true,
        PatternSegment::AnySegments => false,
        PatternSegment::Glob(glob) => glob_match(glob, segment),
        PatternSegment::Variable { name, constraint } => {
            let ok = constraint.as_ref().map_or(true, |re| re.is_match(segment));
            if ok {
                if let Some(vars) = variables {
                    vars.insert(name.clone(), segment.to_string());
                }
            }
            ok
        }
    }
}

/// Single-segment glob with `*` and `?`, matched with backtracking on the
/// last `*` seen.
fn glob_match(glob: &[char], text: &str) -> bool {
    let text: Vec<char> = text.chars().collect();
    let (mut g, mut t) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while t < text.len() {
        match glob.get(g) {
            Some('*') => {
                star = Some((g, t));
                g += 1;
            }
            Some('?') => {
                g += 1;
                t += 1;
            }
            Some(c) if *c == text[t] => {
                g += 1;
                t += 1;
            }
            _ => match star {
                Some((sg, st)) => {
                    g = sg + 1;
                    t = st + 1;
                    star = Some((sg, st + 1));
                }
                None => return false,
            },
        }
    }

    glob[g..].iter().all(|c| *c == '*')
}
