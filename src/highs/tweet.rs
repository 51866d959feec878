use std::fmt;

use rand::Rng;
use rand::seq::SliceRandom;

use super::classify::verb_for;
use super::date::strip_dates;
use super::detect::Achievement;
use crate::sports::SportProfile;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    Empty,
    MixedPlayers { expected: String, found: String },
    NoTemplates { kind: &'static str },
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::Empty => write!(f, "no achievements to announce"),
            RenderError::MixedPlayers { expected, found } => {
                write!(f, "achievements belong to more than one player ('{expected}' and '{found}')")
            }
            RenderError::NoTemplates { kind } => write!(f, "sport profile has no {kind} templates"),
        }
    }
}

impl std::error::Error for RenderError {}

/// Announcement text for one player's achievements from a single game.
pub fn render<R: Rng + ?Sized>(profile: &SportProfile, highs: &[Achievement], rng: &mut R) -> Result<String, RenderError> {
    let first = highs.first().ok_or(RenderError::Empty)?;
    if let Some(other) = highs.iter().find(|a| a.player != first.player) {
        return Err(RenderError::MixedPlayers { expected: first.player.clone(), found: other.player.clone() });
    }
    let opponent = strip_dates(&first.opponent_raw);

    if let [high] = highs {
        let template = profile
            .templates
            .single
            .choose(rng)
            .ok_or(RenderError::NoTemplates { kind: "single" })?;
        let value = high.value.to_string();
        let stat_type = high.statistic.to_lowercase();
        return Ok(fill(template, &[
            ("player", high.player.as_str()),
            ("value", value.as_str()),
            ("stat_type", stat_type.as_str()),
            ("opponent", opponent.as_str()),
            ("verb", verb_for(profile, &high.statistic)),
        ]));
    }

    let template = profile
        .templates
        .multi
        .choose(rng)
        .ok_or(RenderError::NoTemplates { kind: "multi" })?;
    let phrase = join_achievements(highs);
    Ok(fill(template, &[
        ("player", first.player.as_str()),
        ("achievements", phrase.as_str()),
        ("opponent", opponent.as_str()),
    ]))
}

/// "4 hits, 2 home runs and 3 rbis"
fn join_achievements(highs: &[Achievement]) -> String {
    let parts: Vec<String> = highs
        .iter()
        .map(|a| format!("{} {}", a.value, a.statistic.to_lowercase()))
        .collect();
    match parts.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
        None => String::new(),
    }
}

/// Substitute `{name}` placeholders in one pass; unknown names are kept verbatim.
pub fn fill(template: &str, fields: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = &after[..close];
        match fields.iter().find(|(k, _)| *k == name) {
            Some((_, v)) => out.push_str(v),
            None => out.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::highs::table::StatValue;
    use crate::sports::{SportKey, Templates};

    fn ach(player: &str, value: &str, stat: &str, opponent: &str) -> Achievement {
        Achievement {
            statistic: stat.into(),
            value: StatValue(value.into()),
            player: player.into(),
            opponent_raw: opponent.into(),
            date: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
        }
    }

    fn fixed_templates(key: SportKey) -> SportProfile {
        let mut p = key.profile(2024);
        p.templates = Templates {
            single: vec!["{player} {verb} {value} {stat_type} vs {opponent}".into()],
            multi: vec!["{player}: {achievements} vs {opponent}".into()],
        };
        p
    }

    #[test]
    fn baseball_single_achievement() {
        let p = SportKey::Baseball.profile(2024);
        let mut rng = StdRng::seed_from_u64(7);
        let tweet = render(&p, &[ach("John Doe", "3", "HOME RUNS", "Team A (3/15/2024)")], &mut rng).unwrap();
        assert!(tweet.contains("John Doe"));
        assert!(tweet.contains('3'));
        assert!(tweet.contains("home runs"));
        assert!(tweet.contains("Team A"));
        assert!(tweet.contains("#AnchorUp"));
        assert!(!tweet.contains("(3/15/2024)"));
    }

    #[test]
    fn softball_single_achievement() {
        let p = SportKey::Softball.profile(2024);
        let mut rng = StdRng::seed_from_u64(1);
        let tweet = render(&p, &[ach("Jane Doe", "4", "HITS", "Team B (3/15/2024)")], &mut rng).unwrap();
        assert!(tweet.contains("Jane Doe"));
        assert!(tweet.contains("4 hits"));
        assert!(tweet.contains("Team B"));
        assert!(tweet.contains("#AnchorUp"));
    }

    #[test]
    fn every_single_template_renders_cleanly() {
        for key in SportKey::ALL {
            let p = key.profile(2024);
            for seed in 0..32 {
                let mut rng = StdRng::seed_from_u64(seed);
                let tweet = render(&p, &[ach("Jo", "2", "Doubles", "Ferris State (3/15/2024)")], &mut rng).unwrap();
                assert!(!tweet.contains('{'), "unfilled placeholder in {tweet:?}");
                assert!(tweet.contains('\n'));
            }
        }
    }

    #[test]
    fn deterministic_single_output() {
        let p = fixed_templates(SportKey::Softball);
        let mut rng = StdRng::seed_from_u64(0);
        let tweet = render(&p, &[ach("Jane Doe", "4", "HITS", "Team B (3/15/2024)")], &mut rng).unwrap();
        assert_eq!(tweet, "Jane Doe racked up 4 hits vs Team B");
    }

    #[test]
    fn multiple_achievements_are_joined() {
        let p = SportKey::Softball.profile(2024);
        let mut rng = StdRng::seed_from_u64(3);
        let highs = [
            ach("Jane Doe", "4", "HITS", "Team B (3/15/2024)"),
            ach("Jane Doe", "2", "HOME RUNS", "Team B (3/15/2024)"),
        ];
        let tweet = render(&p, &highs, &mut rng).unwrap();
        assert!(tweet.contains("4 hits and 2 home runs"));
        assert_eq!(tweet.matches("Jane Doe").count(), 1);
        assert!(tweet.contains("Team B"));
        assert!(!tweet.contains("3/15/2024"));
    }

    #[test]
    fn deterministic_multi_output_without_oxford_comma() {
        let p = fixed_templates(SportKey::Baseball);
        let mut rng = StdRng::seed_from_u64(0);
        let highs = [
            ach("Sam", "4", "Hits", "at Davenport (4/1/2024)"),
            ach("Sam", "2", "Doubles", "at Davenport (4/1/2024)"),
            ach("Sam", "6", "RBIs", "at Davenport (4/1/2024)"),
        ];
        assert_eq!(render(&p, &highs, &mut rng).unwrap(), "Sam: 4 hits, 2 doubles and 6 rbis vs at Davenport");
    }

    #[test]
    fn precondition_violations() {
        let p = SportKey::Baseball.profile(2024);
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(render(&p, &[], &mut rng), Err(RenderError::Empty));
        let mixed = [ach("A", "1", "Hits", "X (3/15/2024)"), ach("B", "1", "Walks", "X (3/15/2024)")];
        assert!(matches!(render(&p, &mixed, &mut rng), Err(RenderError::MixedPlayers { .. })));
    }

    #[test]
    fn fill_leaves_unknown_placeholders() {
        assert_eq!(fill("{a} and {b} {", &[("a", "x")]), "x and {b} {");
        assert_eq!(fill("no braces", &[]), "no braces");
        assert_eq!(fill("{a}{a}", &[("a", "{a}")]), "{a}{a}");
    }
}
