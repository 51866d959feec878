use super::SportRules;

pub(crate) static RULES: SportRules = SportRules {
    site_slug: "womens-soccer",
    table_selector: &[17],
    excluded: &["FOULS", "YELLOW CARDS", "RED CARDS", "GOALS ALLOWED", "OFFSIDES"],
    verbs: &[
        (&["goals"], "scored"),
        (&["assists"], "dished out"),
        (&["points"], "piled up"),
        (&["shots", "shots on goal"], "fired off"),
        (&["saves"], "came up with"),
        (&["minutes"], "logged"),
    ],
    single: &[
        "⚽️ SEASON HIGH ALERT! ⚽️\n{player} just {verb} {value} {stat_type} against {opponent}! #AnchorUp ⚓️",
        "🔥 {player} is ON FIRE! 🔥\nJust set a season high with {value} {stat_type} vs {opponent}! #AnchorUp ⚓️",
        "👀 Look what {player} just did!\nNew season high: {value} {stat_type} vs {opponent}! #AnchorUp ⚓️",
    ],
    multi: &[
        "⚽️ WHAT A MATCH! ⚽️\n{player} sets multiple season highs with {achievements} against {opponent}! #AnchorUp #GLIAC ⚓️",
        "⚡️ {player} IS UNSTOPPABLE! ⚡️\nNew season highs: {achievements} vs {opponent}! #AnchorUp",
    ],
};
