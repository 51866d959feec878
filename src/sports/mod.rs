use std::fmt;
use std::str::FromStr;

use serde::Serialize;

mod baseball;
mod soccer;
mod softball;

pub const DEFAULT_VERB: &str = "recorded";

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SportKey {
    Baseball,
    Softball,
    Soccer,
}

impl SportKey {
    pub const ALL: [SportKey; 3] = [SportKey::Baseball, SportKey::Softball, SportKey::Soccer];

    pub fn as_str(&self) -> &'static str {
        match self {
            SportKey::Baseball => "baseball",
            SportKey::Softball => "softball",
            SportKey::Soccer => "soccer",
        }
    }

    pub fn profile(self, year: i32) -> SportProfile {
        let rules = match self {
            SportKey::Baseball => &baseball::RULES,
            SportKey::Softball => &softball::RULES,
            SportKey::Soccer => &soccer::RULES,
        };
        SportProfile::from_rules(self, year, rules)
    }
}

impl fmt::Display for SportKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SportKey {
    type Err = UnknownSportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        SportKey::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownSportError { requested: s.to_string() })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSportError {
    pub requested: String,
}

impl fmt::Display for UnknownSportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let known: Vec<&str> = SportKey::ALL.iter().map(SportKey::as_str).collect();
        write!(f, "unknown sport '{}' (expected one of: {})", self.requested, known.join(", "))
    }
}

impl std::error::Error for UnknownSportError {}

/// Static per-sport configuration. Everything that differs between sports
/// lives here; the detection and rendering engine is shared.
pub(crate) struct SportRules {
    pub site_slug: &'static str,
    pub table_selector: &'static [usize],
    pub excluded: &'static [&'static str],
    pub verbs: &'static [(&'static [&'static str], &'static str)],
    pub single: &'static [&'static str],
    pub multi: &'static [&'static str],
}

#[derive(Debug, Clone, PartialEq)]
pub struct VerbRule {
    /// Lower-cased statistic names this verb applies to.
    pub stats: Vec<String>,
    pub verb: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Templates {
    pub single: Vec<String>,
    pub multi: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SportProfile {
    pub key: SportKey,
    pub year: i32,
    pub site_slug: String,
    /// Positions of the season-high tables among all tables on the stats page.
    pub table_selector: Vec<usize>,
    /// Upper-cased names of statistics that are never announced.
    pub excluded_statistics: Vec<String>,
    pub verb_rules: Vec<VerbRule>,
    pub default_verb: String,
    pub templates: Templates,
}

impl SportProfile {
    fn from_rules(key: SportKey, year: i32, rules: &SportRules) -> Self {
        SportProfile {
            key,
            year,
            site_slug: rules.site_slug.to_string(),
            table_selector: rules.table_selector.to_vec(),
            excluded_statistics: rules.excluded.iter().map(|s| s.to_uppercase()).collect(),
            verb_rules: rules
                .verbs
                .iter()
                .map(|(stats, verb)| VerbRule {
                    stats: stats.iter().map(|s| s.to_lowercase()).collect(),
                    verb: verb.to_string(),
                })
                .collect(),
            default_verb: DEFAULT_VERB.to_string(),
            templates: Templates {
                single: rules.single.iter().map(|s| s.to_string()).collect(),
                multi: rules.multi.iter().map(|s| s.to_string()).collect(),
            },
        }
    }

    pub fn stats_url(&self, base_url: &str) -> String {
        format!("{}/sports/{}/stats/{}", base_url.trim_end_matches('/'), self.site_slug, self.year)
    }
}

pub fn profile_for(sport_key: &str, year: i32) -> Result<SportProfile, UnknownSportError> {
    Ok(sport_key.parse::<SportKey>()?.profile(year))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn baseball_profile_urls_and_tables() {
        let p = profile_for("baseball", 2024).unwrap();
        assert_eq!(p.year, 2024);
        assert_eq!(p.stats_url("https://gvsulakers.com"), "https://gvsulakers.com/sports/baseball/stats/2024");
        assert_eq!(p.table_selector, vec![11, 12, 13]);
    }

    #[test]
    fn softball_and_soccer_profiles() {
        let sb = profile_for("softball", 2025).unwrap();
        assert_eq!(sb.stats_url("https://gvsulakers.com/"), "https://gvsulakers.com/sports/softball/stats/2025");
        assert_eq!(sb.table_selector, vec![11]);

        let soc = profile_for("Soccer", 2024).unwrap();
        assert_eq!(soc.site_slug, "womens-soccer");
        assert_eq!(soc.table_selector, vec![17]);
    }

    #[test]
    fn unknown_sport_is_rejected() {
        let err = profile_for("curling", 2024).unwrap_err();
        assert_eq!(err.requested, "curling");
        assert!(err.to_string().contains("baseball, softball, soccer"));
    }

    #[test]
    fn every_profile_has_templates() {
        for key in SportKey::ALL {
            let p = key.profile(2024);
            assert!(!p.templates.single.is_empty(), "{key} has no single templates");
            assert!(!p.templates.multi.is_empty(), "{key} has no multi templates");
        }
    }

    #[test]
    fn exclusion_sets_differ_per_sport() {
        let bb = SportKey::Baseball.profile(2024);
        let sb = SportKey::Softball.profile(2024);
        assert!(bb.excluded_statistics.contains(&"WILD PITCHES".to_string()));
        assert!(!sb.excluded_statistics.contains(&"WILD PITCHES".to_string()));
    }
}
