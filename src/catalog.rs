//! Icons offered by the log form, grouped the way the picker shows them.
//!
//! Stored entries may carry any icon; this list only drives the picker and a
//! warning for unfamiliar icons.

/// Icon preselected when none is chosen.
pub const DEFAULT_ICON: &str = "🚶";

pub struct Category {
    pub name: &'static str,
    pub icons: &'static [&'static str],
}

pub const CATEGORIES: &[Category] = &[
    Category {
        name: "Activities",
        icons: &["🚶", "🏃", "🚴", "🏊", "🏋️", "🧘", "🤸", "🏃‍♀️", "🚶‍♂️", "🏃‍♂️"],
    },
    Category {
        name: "Food",
        icons: &[
            "☕", "🍕", "🍳", "🍰", "🌮", "🍜", "🍔", "🍝", "🥗", "🍣", "🍩", "🍪", "🥤", "🍷", "🍺",
        ],
    },
    Category {
        name: "Learning",
        icons: &["📚", "💻", "📱", "✍️", "🎓", "💡", "🔬", "📊", "📝", "🎯"],
    },
    Category {
        name: "Entertainment",
        icons: &[
            "🎵", "🎨", "🎮", "🎭", "🎪", "📷", "🎬", "🎤", "🎸", "🎹", "🎲", "🧩", "📺", "🎧",
        ],
    },
    Category {
        name: "Travel",
        icons: &[
            "✈️", "🚗", "🏖️", "🏔️", "🌅", "🌙", "🏠", "🏢", "🏪", "🎡", "🏛️", "🌍", "🗺️", "🚂", "🚢",
        ],
    },
    Category {
        name: "Nature",
        icons: &[
            "🌱", "🌸", "🍀", "🌺", "🌻", "🌿", "🌳", "🌲", "☀️", "⛅", "🌧️", "❄️", "🌈", "🌊", "🔥",
        ],
    },
    Category {
        name: "Social",
        icons: &[
            "👥", "💕", "🎉", "🎊", "🎈", "🎁", "💌", "👨‍👩‍👧‍👦", "👫", "💑", "🤝", "👋", "💬", "📞",
        ],
    },
    Category {
        name: "Health",
        icons: &[
            "💊", "🏥", "🩺", "💉", "🧴", "🛁", "🛌", "😴", "😊", "😌", "🧠", "💪", "🫀", "🦷",
        ],
    },
    Category {
        name: "Shopping",
        icons: &["🛒", "💳", "💰", "💎", "🛍️", "🏪", "💸", "💵", "💴", "💶", "💷"],
    },
    Category {
        name: "Tech",
        icons: &[
            "🤖", "🚀", "⚡", "🔋", "💾", "📡", "🛰️", "🔬", "🧪", "⚗️", "🔭", "💻", "⌚",
        ],
    },
    Category {
        name: "Sports",
        icons: &[
            "⚽", "🏀", "🏈", "🎾", "🏐", "🏓", "🏸", "🏒", "⛳", "🎳", "🎯", "🏹", "🥊", "🥋", "🏆",
        ],
    },
    Category {
        name: "Other",
        icons: &[
            "⭐", "🌟", "✨", "💫", "🎆", "🎇", "🕯️", "🕰️", "⏰", "📅", "🗓️", "📌", "📍", "🔍", "🔎",
        ],
    },
];

pub fn is_known(icon: &str) -> bool {
    category_of(icon).is_some()
}

/// First category listing `icon`. A few icons appear in more than one.
pub fn category_of(icon: &str) -> Option<&'static str> {
    CATEGORIES
        .iter()
        .find(|category| category.icons.iter().any(|i| *i == icon))
        .map(|category| category.name)
}
