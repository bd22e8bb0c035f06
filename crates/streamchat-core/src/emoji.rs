//! Built-in emoji shipped with the composer, grouped the way picker panels
//! show them.

use crate::candidate::Candidate;

/// A named group of `(shortcode, glyph)` pairs.
#[derive(Debug, Clone, Copy)]
pub struct EmojiCategory {
    pub name: &'static str,
    pub entries: &'static [(&'static str, &'static str)],
}

impl EmojiCategory {
    /// `:shortcode:` texts in declaration order.
    pub fn texts(&self) -> impl Iterator<Item = String> + '_ {
        self.entries.iter().map(|(code, _)| format!(":{code}:"))
    }
}

/// Name of the synthesized category holding custom emotes.
pub const CUSTOM_CATEGORY: &str = "Custom";

pub static BUILTIN_CATEGORIES: &[EmojiCategory] = &[
    EmojiCategory {
        name: "Smileys & Emotion",
        entries: &[
            ("grinning", "😀"),
            ("smiley", "😃"),
            ("smile", "😄"),
            ("grin", "😁"),
            ("laughing", "😆"),
            ("sweat_smile", "😅"),
            ("joy", "😂"),
            ("rofl", "🤣"),
            ("slightly_smiling_face", "🙂"),
            ("upside_down_face", "🙃"),
            ("wink", "😉"),
            ("blush", "😊"),
            ("innocent", "😇"),
            ("heart_eyes", "😍"),
            ("kissing_heart", "😘"),
            ("yum", "😋"),
            ("stuck_out_tongue", "😛"),
            ("thinking", "🤔"),
            ("neutral_face", "😐"),
            ("expressionless", "😑"),
            ("smirk", "😏"),
            ("unamused", "😒"),
            ("roll_eyes", "🙄"),
            ("grimacing", "😬"),
            ("relieved", "😌"),
            ("pensive", "😔"),
            ("sleepy", "😪"),
            ("sleeping", "😴"),
            ("mask", "😷"),
            ("sunglasses", "😎"),
            ("confused", "😕"),
            ("worried", "😟"),
            ("open_mouth", "😮"),
            ("flushed", "😳"),
            ("cry", "😢"),
            ("sob", "😭"),
            ("scream", "😱"),
            ("angry", "😠"),
            ("rage", "😡"),
            ("skull", "💀"),
            ("poop", "💩"),
            ("clown_face", "🤡"),
            ("ghost", "👻"),
            ("alien", "👽"),
            ("robot", "🤖"),
            ("heart", "❤️"),
            ("broken_heart", "💔"),
            ("sparkling_heart", "💖"),
            ("100", "💯"),
            ("zzz", "💤"),
        ],
    },
    EmojiCategory {
        name: "People & Body",
        entries: &[
            ("wave", "👋"),
            ("ok_hand", "👌"),
            ("v", "✌️"),
            ("crossed_fingers", "🤞"),
            ("point_up", "☝️"),
            ("point_down", "👇"),
            ("thumbsup", "👍"),
            ("thumbsdown", "👎"),
            ("fist", "✊"),
            ("clap", "👏"),
            ("raised_hands", "🙌"),
            ("pray", "🙏"),
            ("muscle", "💪"),
            ("eyes", "👀"),
            ("brain", "🧠"),
            ("facepalm", "🤦"),
            ("shrug", "🤷"),
            ("dancer", "💃"),
        ],
    },
    EmojiCategory {
        name: "Animals & Nature",
        entries: &[
            ("dog", "🐶"),
            ("cat", "🐱"),
            ("mouse", "🐭"),
            ("fox_face", "🦊"),
            ("bear", "🐻"),
            ("panda_face", "🐼"),
            ("penguin", "🐧"),
            ("frog", "🐸"),
            ("monkey", "🐒"),
            ("snake", "🐍"),
            ("turtle", "🐢"),
            ("crab", "🦀"),
            ("octopus", "🐙"),
            ("bee", "🐝"),
            ("sunflower", "🌻"),
            ("rose", "🌹"),
            ("evergreen_tree", "🌲"),
            ("cactus", "🌵"),
            ("fire", "🔥"),
            ("sunny", "☀️"),
            ("rainbow", "🌈"),
            ("snowflake", "❄️"),
            ("zap", "⚡"),
        ],
    },
    EmojiCategory {
        name: "Food & Drink",
        entries: &[
            ("apple", "🍎"),
            ("banana", "🍌"),
            ("strawberry", "🍓"),
            ("avocado", "🥑"),
            ("hot_pepper", "🌶️"),
            ("bread", "🍞"),
            ("cheese", "🧀"),
            ("hamburger", "🍔"),
            ("fries", "🍟"),
            ("pizza", "🍕"),
            ("taco", "🌮"),
            ("ramen", "🍜"),
            ("sushi", "🍣"),
            ("cake", "🍰"),
            ("cookie", "🍪"),
            ("coffee", "☕"),
            ("tea", "🍵"),
            ("beer", "🍺"),
            ("wine_glass", "🍷"),
        ],
    },
    EmojiCategory {
        name: "Travel & Places",
        entries: &[
            ("earth_americas", "🌎"),
            ("mountain", "⛰️"),
            ("beach_umbrella", "🏖️"),
            ("house", "🏠"),
            ("car", "🚗"),
            ("bike", "🚲"),
            ("train", "🚆"),
            ("airplane", "✈️"),
            ("rocket", "🚀"),
            ("ship", "🚢"),
            ("crescent_moon", "🌙"),
            ("star", "⭐"),
        ],
    },
    EmojiCategory {
        name: "Activities",
        entries: &[
            ("soccer", "⚽"),
            ("basketball", "🏀"),
            ("tennis", "🎾"),
            ("video_game", "🎮"),
            ("joystick", "🕹️"),
            ("chess_pawn", "♟️"),
            ("dart", "🎯"),
            ("trophy", "🏆"),
            ("medal_sports", "🏅"),
            ("tada", "🎉"),
            ("confetti_ball", "🎊"),
            ("balloon", "🎈"),
            ("gift", "🎁"),
            ("art", "🎨"),
            ("microphone", "🎤"),
            ("headphones", "🎧"),
            ("guitar", "🎸"),
        ],
    },
    EmojiCategory {
        name: "Objects",
        entries: &[
            ("computer", "💻"),
            ("keyboard", "⌨️"),
            ("iphone", "📱"),
            ("camera", "📷"),
            ("tv", "📺"),
            ("bulb", "💡"),
            ("book", "📖"),
            ("memo", "📝"),
            ("pencil2", "✏️"),
            ("lock", "🔒"),
            ("key", "🔑"),
            ("hammer", "🔨"),
            ("wrench", "🔧"),
            ("gear", "⚙️"),
            ("moneybag", "💰"),
            ("bell", "🔔"),
            ("hourglass", "⌛"),
        ],
    },
    EmojiCategory {
        name: "Symbols",
        entries: &[
            ("white_check_mark", "✅"),
            ("x", "❌"),
            ("warning", "⚠️"),
            ("question", "❓"),
            ("exclamation", "❗"),
            ("no_entry", "⛔"),
            ("recycle", "♻️"),
            ("heavy_plus_sign", "➕"),
            ("heavy_minus_sign", "➖"),
            ("arrow_up", "⬆️"),
            ("arrow_down", "⬇️"),
            ("arrows_counterclockwise", "🔄"),
            ("musical_note", "🎵"),
            ("copyright", "©️"),
            ("tm", "™️"),
        ],
    },
    EmojiCategory {
        name: "Flags",
        entries: &[
            ("checkered_flag", "🏁"),
            ("triangular_flag_on_post", "🚩"),
            ("rainbow_flag", "🏳️‍🌈"),
            ("pirate_flag", "🏴‍☠️"),
            ("white_flag", "🏳️"),
            ("black_flag", "🏴"),
        ],
    },
];

/// Every built-in emoji as a candidate, in category order.
pub fn builtin_candidates() -> Vec<Candidate> {
    BUILTIN_CATEGORIES
        .iter()
        .flat_map(|category| category.entries.iter())
        .filter_map(|(code, glyph)| Candidate::emoji(code, glyph).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn shortcodes_are_unique_and_valid() {
        let all = builtin_candidates();
        let total: usize = BUILTIN_CATEGORIES.iter().map(|c| c.entries.len()).sum();
        assert_eq!(all.len(), total);
        let unique: HashSet<&str> = all.iter().map(Candidate::text).collect();
        assert_eq!(unique.len(), all.len());
    }

    #[test]
    fn custom_is_not_a_builtin_category() {
        assert!(BUILTIN_CATEGORIES.iter().all(|c| c.name != CUSTOM_CATEGORY));
        assert!(BUILTIN_CATEGORIES.iter().any(|c| c.name == "Smileys & Emotion"));
    }
}
