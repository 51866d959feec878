use crate::sports::SportProfile;

/// Excluded statistics reflect poor outcomes and are never announced.
/// The exclusion list is a denylist: anything not on it is announceable.
pub fn is_announceable(profile: &SportProfile, statistic: &str) -> bool {
    let wanted = statistic.trim().to_uppercase();
    !profile.excluded_statistics.iter().any(|s| *s == wanted)
}

pub fn verb_for<'a>(profile: &'a SportProfile, statistic: &str) -> &'a str {
    let wanted = statistic.trim().to_lowercase();
    profile
        .verb_rules
        .iter()
        .find(|rule| rule.stats.iter().any(|s| *s == wanted))
        .map(|rule| rule.verb.as_str())
        .unwrap_or(profile.default_verb.as_str())
}
