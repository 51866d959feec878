use super::SportRules;

pub(crate) static RULES: SportRules = SportRules {
    site_slug: "softball",
    table_selector: &[11],
    excluded: &["STRIKEOUTS", "CAUGHT STEALING", "HIT INTO DP"],
    verbs: &[
        (&["at bats"], "finished with"),
        (&["hits", "runs scored", "rbis"], "racked up"),
        (&["home runs", "doubles", "triples"], "crushed"),
        (&["stolen bases"], "swiped"),
        (&["walks"], "drew"),
        (&["sac hits", "sac flies"], "executed"),
        (&["hit by pitch"], "took one for the team with"),
    ],
    single: &[
        "🥎 SEASON HIGH ALERT! 🥎\n{player} just {verb} {value} {stat_type} against {opponent}! #AnchorUp ⚓️",
        "🔥 {player} is ON FIRE! 🔥\nJust set a season high with {value} {stat_type} vs {opponent}! #AnchorUp ⚓️",
        "⚡️ RECORD BREAKER ⚡️\n{player} leads the way with {value} {stat_type} against {opponent}! #AnchorUp ⚓️",
        "👀 Look what {player} just did!\nNew season high: {value} {stat_type} vs {opponent}! #AnchorUp ⚓️",
        "💪 BEAST MODE: {player} 💪\nDominates with {value} {stat_type} against {opponent}! #AnchorUp ⚓️",
    ],
    multi: &[
        "🥎 WHAT A GAME! 🥎\n{player} sets multiple season highs with {achievements} against {opponent}! #AnchorUp #GLVCsb ⚓️",
        "⚡️ {player} IS UNSTOPPABLE! ⚡️\nNew season highs: {achievements} vs {opponent}! #AnchorUp #GLVCsb",
        "💪 DOMINANT PERFORMANCE 💪\n{player} sets new highs with {achievements} against {opponent}! #AnchorUp #GLVCsb",
    ],
};
