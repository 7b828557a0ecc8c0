//! Person-style synthetic email addresses.

use rand::seq::SliceRandom;
use rand::Rng;

const FIRST_NAMES: &[&str] = &[
    "james", "mary", "john", "patricia", "robert", "jennifer", "michael", "linda", "william",
    "elizabeth", "david", "barbara", "richard", "susan", "joseph", "jessica", "thomas", "sarah",
    "charles", "karen", "daniel", "nancy", "matthew", "lisa", "anthony", "betty", "mark",
    "sandra", "steven", "ashley", "paul", "emily", "andrew", "donna", "joshua", "michelle",
    "kevin", "carol", "brian", "amanda", "george", "melissa", "edward", "deborah", "ronald",
    "laura", "timothy", "rebecca", "jason", "sharon",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "rodriguez",
    "martinez", "hernandez", "lopez", "gonzalez", "wilson", "anderson", "thomas", "taylor",
    "moore", "jackson", "martin", "lee", "perez", "thompson", "white", "harris", "sanchez",
    "clark", "ramirez", "lewis", "robinson", "walker", "young", "allen", "king", "wright",
    "scott", "torres", "nguyen", "hill", "flores", "green", "adams", "nelson", "baker", "hall",
    "rivera", "campbell", "mitchell", "carter", "roberts",
];

/// Free-mail providers used for most synthetic addresses.
pub const FREE_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com", "outlook.com"];

/// Reserved example domains mixed in so some addresses can never be live.
pub const SAFE_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, items: &[&'a str]) -> &'a str {
    items.choose(rng).copied().unwrap_or_default()
}

/// A user name in one of several common shapes.
pub fn user_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    let first = pick(rng, FIRST_NAMES);
    let last = pick(rng, LAST_NAMES);
    match rng.gen_range(0..5) {
        0 => format!("{first}.{last}"),
        1 => format!("{first}{last}"),
        2 => format!("{}{last}", &first[..1]),
        3 => format!("{last}.{first}"),
        _ => format!("{first}{}", rng.gen_range(10..100)),
    }
}

/// A synthetic email candidate.
///
/// Most candidates use a free-mail or example domain; some carry a numeric
/// suffix on the user name to widen the space.
pub fn synthetic<R: Rng + ?Sized>(rng: &mut R) -> String {
    let name = user_name(rng);
    match rng.gen_range(0..4) {
        0 => format!("{name}@{}", pick(rng, SAFE_DOMAINS)),
        1 => format!(
            "{name}.{}@{}",
            rng.gen_range(1000..=999_999),
            pick(rng, FREE_DOMAINS)
        ),
        _ => format!("{name}@{}", pick(rng, FREE_DOMAINS)),
    }
}

/// Fallback email, `user<8 digits>@<domain>`.
pub fn fallback<R: Rng + ?Sized>(rng: &mut R, domain: &str) -> String {
    format!("user{:08}@{domain}", rng.gen_range(0..100_000_000u32))
}
