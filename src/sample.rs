//! Built-in demo data: six community events in 2024 and a user who searched
//! two of them.

use chrono::NaiveDate;

use crate::item::Item;
use crate::profile::{UserId, UserProfile};

const SAMPLE_EVENTS: [(&str, &str, u32, u32); 6] = [
    ("Community Meeting", "Community", 12, 10),
    ("Music Concert", "Music", 11, 22),
    ("Soccer Tournament", "Sports", 10, 15),
    ("Art Exhibition", "Art", 12, 1),
    ("Tech Conference", "Technology", 9, 5),
    ("Food Festival", "Food", 8, 25),
];

/// Year every sample event falls in.
pub const SAMPLE_YEAR: i32 = 2024;

/// Positions in [`catalog`] the sample user searched for.
pub const SAMPLE_SEARCHES: [usize; 2] = [0, 2];

/// The demo catalog, in a fixed order.
#[must_use]
pub fn catalog() -> Vec<Item> {
    SAMPLE_EVENTS
        .iter()
        .map(|&(name, category, month, day)| {
            let date = NaiveDate::from_ymd_opt(SAMPLE_YEAR, month, day)
                .expect("sample events use valid calendar dates");
            Item::new(name, category, date)
        })
        .collect()
}

/// User 1, who searched for the community meeting and the soccer tournament.
///
/// Positions missing from `items` are skipped.
#[must_use]
pub fn user(items: &[Item]) -> UserProfile {
    let mut user = UserProfile::new(UserId::new(1));
    for item in SAMPLE_SEARCHES.iter().filter_map(|&i| items.get(i)) {
        user.add_search(item.clone());
    }
    user
}
