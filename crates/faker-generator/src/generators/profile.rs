//! User profile generator.
//!
//! Profiles are assembled from embedded word lists. Every field is drawn from
//! the RNG passed in, in a fixed order, so a seeded RNG always produces the
//! same profile. Profiles carry no birthdate.

use rand::seq::IndexedRandom;
use rand::Rng;

use super::timestamp::generate_user_timestamp;
use crate::User;

const FIRST_NAMES_MALE: &[&str] = &[
    "James", "John", "Robert", "Michael", "William", "David", "Richard", "Joseph", "Thomas",
    "Charles", "Christopher", "Daniel", "Matthew", "Anthony", "Mark", "Donald", "Steven", "Paul",
    "Andrew", "Joshua", "Kenneth", "Kevin", "Brian", "George", "Timothy", "Ronald", "Edward",
    "Jason", "Jeffrey", "Ryan",
];

const FIRST_NAMES_FEMALE: &[&str] = &[
    "Mary", "Patricia", "Jennifer", "Linda", "Elizabeth", "Barbara", "Susan", "Jessica", "Sarah",
    "Karen", "Lisa", "Nancy", "Betty", "Margaret", "Sandra", "Ashley", "Kimberly", "Emily",
    "Donna", "Michelle", "Carol", "Amanda", "Dorothy", "Melissa", "Deborah", "Stephanie",
    "Rebecca", "Sharon", "Laura", "Cynthia",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Johnson", "Williams", "Brown", "Jones", "Garcia", "Miller", "Davis", "Rodriguez",
    "Martinez", "Hernandez", "Lopez", "Gonzalez", "Wilson", "Anderson", "Thomas", "Taylor",
    "Moore", "Jackson", "Martin", "Lee", "Perez", "Thompson", "White", "Harris", "Sanchez",
    "Clark", "Ramirez", "Lewis", "Robinson", "Walker", "Young", "Allen", "King", "Wright",
    "Scott", "Torres", "Nguyen", "Hill", "Flores",
];

const JOBS: &[&str] = &[
    "Accountant",
    "Actuary",
    "Architect",
    "Barrister",
    "Biomedical engineer",
    "Chemist, analytical",
    "Civil engineer, contracting",
    "Clinical psychologist",
    "Copywriter, advertising",
    "Data scientist",
    "Dentist",
    "Editor, film/video",
    "Electrical engineer",
    "Environmental consultant",
    "Financial planner",
    "Geophysicist/field seismologist",
    "Graphic designer",
    "Horticulturist, commercial",
    "Journalist, newspaper",
    "Landscape architect",
    "Librarian, public",
    "Market researcher",
    "Nurse, adult",
    "Occupational therapist",
    "Pharmacist, hospital",
    "Physiotherapist",
    "Police officer",
    "Programmer, systems",
    "Quantity surveyor",
    "Radio producer",
    "Secondary school teacher",
    "Software engineer",
    "Surveyor, mining",
    "Tax adviser",
    "Translator",
    "Veterinary surgeon",
];

const COMPANY_SUFFIXES: &[&str] = &["Inc", "LLC", "Ltd", "Group", "PLC"];

const STREET_SUFFIXES: &[&str] = &[
    "Street", "Avenue", "Road", "Lane", "Drive", "Court", "Place", "Way", "Boulevard", "Trail",
];

const STREET_NAMES: &[&str] = &[
    "Maple", "Oak", "Pine", "Cedar", "Elm", "Washington", "Lake", "Hill", "Park", "Sunset",
    "River", "Church", "Mill", "Spring", "Highland", "Meadow",
];

const CITIES: &[&str] = &[
    "Port Andrew",
    "East Jennifer",
    "North Michael",
    "Lake Sarah",
    "West Brian",
    "New Laura",
    "South Kevin",
    "Jasonville",
    "Millerberg",
    "Thomasfort",
    "Garciahaven",
    "Smithmouth",
];

const STATES: &[&str] = &[
    "AL", "AK", "AZ", "CA", "CO", "CT", "FL", "GA", "IL", "IN", "MA", "MD", "MI", "MN", "NC",
    "NJ", "NY", "OH", "OR", "PA", "TX", "VA", "WA", "WI",
];

const FREE_EMAIL_DOMAINS: &[&str] = &["gmail.com", "yahoo.com", "hotmail.com"];

const URL_TLDS: &[&str] = &["com", "net", "org", "info", "biz"];

const BLOOD_GROUPS: &[&str] = &["A+", "A-", "B+", "B-", "AB+", "AB-", "O+", "O-"];

/// Generate the user at generation index `index`.
///
/// `created_at` and `updated_at` are the earlier and later of two independently
/// sampled timestamps, so `updated_at >= created_at` always holds.
pub fn generate_user<R: Rng>(rng: &mut R, index: u64) -> User {
    let is_female = rng.random_bool(0.5);
    let first = if is_female {
        pick(rng, FIRST_NAMES_FEMALE)
    } else {
        pick(rng, FIRST_NAMES_MALE)
    };
    let last = pick(rng, LAST_NAMES);

    let username = generate_username(rng, first, last);
    let mail = format!("{username}@{}", pick(rng, FREE_EMAIL_DOMAINS));
    let address = generate_address(rng);
    let residence = generate_address(rng);
    let job = pick(rng, JOBS).to_string();
    let company = generate_company(rng);
    let ssn = format!(
        "{}-{}-{}",
        generate_random_digits(rng, 3),
        generate_random_digits(rng, 2),
        generate_random_digits(rng, 4)
    );
    let blood_group = pick(rng, BLOOD_GROUPS).to_string();
    let website = (0..rng.random_range(1..=4))
        .map(|_| generate_url(rng))
        .collect();
    let current_location = [
        round6(rng.random_range(-90.0..90.0)),
        round6(rng.random_range(-180.0..180.0)),
    ];

    let time_a = generate_user_timestamp(rng);
    let time_b = generate_user_timestamp(rng);

    User {
        id: index + 1,
        name: format!("{first} {last}"),
        username,
        sex: if is_female { "F" } else { "M" }.to_string(),
        mail,
        address,
        residence,
        job,
        company,
        ssn,
        blood_group,
        website,
        current_location,
        created_at: time_a.min(time_b),
        updated_at: time_a.max(time_b),
    }
}

fn pick<'a, R: Rng>(rng: &mut R, words: &[&'a str]) -> &'a str {
    words.choose(rng).copied().unwrap_or_default()
}

fn generate_username<R: Rng>(rng: &mut R, first: &str, last: &str) -> String {
    let first = first.to_lowercase();
    let last = last.to_lowercase();
    match rng.random_range(0..4) {
        0 => format!("{first}{last}"),
        1 => format!("{}{last}", &first[..1]),
        2 => format!("{last}{}", generate_random_digits(rng, 2)),
        _ => format!("{first}{}", generate_random_digits(rng, 2)),
    }
}

fn generate_address<R: Rng>(rng: &mut R) -> String {
    format!(
        "{} {} {}\n{}, {} {}",
        rng.random_range(1..10_000),
        pick(rng, STREET_NAMES),
        pick(rng, STREET_SUFFIXES),
        pick(rng, CITIES),
        pick(rng, STATES),
        generate_random_digits(rng, 5)
    )
}

fn generate_company<R: Rng>(rng: &mut R) -> String {
    match rng.random_range(0..3) {
        0 => format!("{} {}", pick(rng, LAST_NAMES), pick(rng, COMPANY_SUFFIXES)),
        1 => format!("{}-{}", pick(rng, LAST_NAMES), pick(rng, LAST_NAMES)),
        _ => format!(
            "{}, {} and {}",
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES),
            pick(rng, LAST_NAMES)
        ),
    }
}

fn generate_url<R: Rng>(rng: &mut R) -> String {
    format!(
        "https://www.{}.{}/",
        pick(rng, LAST_NAMES).to_lowercase(),
        pick(rng, URL_TLDS)
    )
}

/// Generate a random number with exactly N digits.
fn generate_random_digits<R: Rng>(rng: &mut R, digits: usize) -> String {
    if digits == 0 {
        return String::new();
    }

    let mut result = String::with_capacity(digits);

    // First digit should be 1-9 to avoid leading zeros
    result.push(char::from(b'0' + rng.random_range(1..10u8)));

    for _ in 1..digits {
        result.push(char::from(b'0' + rng.random_range(0..10u8)));
    }

    result
}

fn round6(value: f64) -> f64 {
    (value * 1_000_000.0).round() / 1_000_000.0
}
