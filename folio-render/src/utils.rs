use regex::Regex;

/// Compile a pattern that is known to be valid.
///
/// A failure is logged and replaced by a pattern that never matches, so a
/// typo in a static pattern degrades a single transformation instead of
/// aborting the render.
pub(crate) fn static_regex(name: &str, pattern: &str) -> Regex {
  Regex::new(pattern).unwrap_or_else(|e| {
    log::error!(
      "Failed to compile {name} regex: {e}\n Falling back to never matching \
       regex."
    );
    never_matching_regex()
  })
}

/// Create a regex that never matches anything.
#[must_use]
pub(crate) fn never_matching_regex() -> Regex {
  #[allow(
    clippy::expect_used,
    reason = "This pattern is guaranteed to be valid"
  )]
  Regex::new(r"[^\s\S]").expect("regex pattern [^\\s\\S] should always compile")
}
