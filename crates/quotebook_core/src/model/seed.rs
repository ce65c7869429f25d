//! Built-in quotes used when durable storage holds no list yet.

use super::quote::{Quote, QuoteOrigin};

const SEED_QUOTES: &[(&str, &str)] = &[
    (
        "The only way to do great work is to love what you do.",
        "motivation",
    ),
    (
        "Life is what happens to you while you're busy making other plans.",
        "life",
    ),
    (
        "The future belongs to those who believe in the beauty of their dreams.",
        "dreams",
    ),
    (
        "It is during our darkest moments that we must focus to see the light.",
        "inspiration",
    ),
    (
        "Success is not final, failure is not fatal: it is the courage to continue that counts.",
        "success",
    ),
    (
        "The only impossible journey is the one you never begin.",
        "motivation",
    ),
    (
        "In the end, we will remember not the words of our enemies, but the silence of our friends.",
        "friendship",
    ),
    ("Be yourself; everyone else is already taken.", "life"),
];

/// Returns the built-in quote list, all tagged local.
pub fn seed_quotes() -> Vec<Quote> {
    SEED_QUOTES
        .iter()
        .map(|(text, category)| Quote {
            text: (*text).to_string(),
            category: (*category).to_string(),
            origin: QuoteOrigin::Local,
            created_at: None,
        })
        .collect()
}
