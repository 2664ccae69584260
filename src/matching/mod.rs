//! Pattern matchers used by the ignore resolver.
//!
//! - [`glob`]: case-insensitive `*` / `?` matching of a single name
//! - [`gitignore`]: `/`-delimited path patterns with `**` and trailing `/`
//!
//! Both reduce to the same problem: a sequence of units (characters or path
//! segments) against a pattern where one token spans zero or more units and
//! every other token consumes exactly one unit.  [`star_match`] solves it
//! without recursion.
pub mod gitignore;
pub mod glob;

/// Match `units` against `pattern`, where tokens for which `is_star` holds
/// span zero or more units and every other token must satisfy `unit_matches`
/// against exactly one unit.
///
/// Equivalent to the exhaustive "skip the star / absorb one unit" recursion,
/// but backtracks only to the most recent star, so the cost is bounded by
/// `units.len() * pattern.len()` rather than exponential in the number of
/// stars.
pub(crate) fn star_match<U, P>(
    units: &[U],
    pattern: &[P],
    is_star: impl Fn(&P) -> bool,
    unit_matches: impl Fn(&P, &U) -> bool,
) -> bool {
    let mut u = 0;
    let mut p = 0;
    // (pattern index just past the last star, unit index it was tried at)
    let mut resume: Option<(usize, usize)> = None;

    while let Some(unit) = units.get(u) {
        match pattern.get(p) {
            Some(token) if is_star(token) => {
                p += 1;
                resume = Some((p, u));
            }
            Some(token) if unit_matches(token, unit) => {
                p += 1;
                u += 1;
            }
            _ => match resume {
                Some((star_p, star_u)) => {
                    p = star_p;
                    u = star_u + 1;
                    resume = Some((star_p, u));
                }
                None => return false,
            },
        }
    }

    pattern
        .get(p..)
        .is_some_and(|rest| rest.iter().all(|token| is_star(token)))
}
