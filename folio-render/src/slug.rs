//! Anchor identifiers for headings.
use std::{collections::HashMap, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::static_regex;

static WHITESPACE_RE: LazyLock<Regex> =
  LazyLock::new(|| static_regex("WHITESPACE_RE", r"\s+"));
static NON_WORD_RE: LazyLock<Regex> =
  LazyLock::new(|| static_regex("NON_WORD_RE", r"[^a-z0-9_-]+"));
static HYPHEN_RUN_RE: LazyLock<Regex> =
  LazyLock::new(|| static_regex("HYPHEN_RUN_RE", r"-{2,}"));

/// Slugify heading text for use as an anchor ID.
///
/// Lowercases and trims the text, turns whitespace runs into `-`, spells `&`
/// as `-and-`, drops everything outside `[a-z0-9_-]` and collapses repeated
/// hyphens. Leading and trailing hyphens are kept.
///
/// ```
/// use folio_render::slugify;
///
/// assert_eq!(slugify("Hello World & Friends"), "hello-world-and-friends");
/// assert_eq!(slugify("  API Reference "), "api-reference");
/// assert_eq!(slugify(""), "");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
  let lowered = text.to_lowercase();
  let hyphenated = WHITESPACE_RE.replace_all(lowered.trim(), "-");
  let spelled = hyphenated.replace('&', "-and-");
  let cleaned = NON_WORD_RE.replace_all(&spelled, "");
  HYPHEN_RUN_RE.replace_all(&cleaned, "-").into_owned()
}

/// How identical heading texts in one document are identified.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum HeadingIds {
  /// Every heading gets its plain slug; duplicates share an ID.
  #[default]
  Verbatim,
  /// Repeated slugs get a numeric suffix: `intro`, `intro-1`, `intro-2`.
  Suffixed,
}

/// Assigns heading IDs within a single render.
#[derive(Debug, Default)]
pub struct SlugTracker {
  policy: HeadingIds,
  seen:   HashMap<String, usize>,
}

impl SlugTracker {
  #[must_use]
  pub fn new(policy: HeadingIds) -> Self {
    Self {
      policy,
      seen: HashMap::new(),
    }
  }

  /// ID for the next heading with the given text.
  pub fn assign(&mut self, text: &str) -> String {
    let base = slugify(text);
    if self.policy == HeadingIds::Verbatim {
      return base;
    }

    let Some(&next) = self.seen.get(&base) else {
      self.seen.insert(base.clone(), 1);
      return base;
    };

    let mut n = next;
    loop {
      let candidate = format!("{base}-{n}");
      n += 1;
      if !self.seen.contains_key(&candidate) {
        self.seen.insert(base, n);
        self.seen.insert(candidate.clone(), 1);
        return candidate;
      }
    }
  }
}
