//! FILENAME: core/dataset/src/words.rs
//! Word lists used to fabricate names, emails, product titles and review text.

pub(crate) const FIRST_NAMES: &[&str] = &[
    "Aarav", "Alice", "Amara", "Ben", "Carlos", "Chloe", "Daniel", "Diya", "Elena", "Ethan",
    "Fatima", "George", "Hana", "Isaac", "Ishaan", "Jade", "Jonas", "Kavya", "Leo", "Lucia",
    "Maya", "Mateo", "Nina", "Omar", "Priya", "Quinn", "Rohan", "Sara", "Tomas", "Uma",
    "Victor", "Wen", "Yara", "Zoe",
];

pub(crate) const LAST_NAMES: &[&str] = &[
    "Anderson", "Bose", "Castillo", "Dubois", "Evans", "Fischer", "Garcia", "Hoffman", "Iyer",
    "Johansson", "Kapoor", "Lopez", "Meyer", "Nakamura", "Okafor", "Patel", "Quintero", "Rossi",
    "Schmidt", "Tanaka", "Usman", "Varga", "Walker", "Xu", "Young", "Zimmermann",
];

pub(crate) const EMAIL_DOMAINS: &[&str] = &[
    "example.com", "example.org", "example.net", "mail.test", "shop.test",
];

pub(crate) const PRODUCT_WORDS: &[&str] = &[
    "amber", "anchor", "arc", "aspen", "beacon", "birch", "bolt", "breeze", "canyon", "cedar",
    "comet", "coral", "crest", "delta", "drift", "ember", "falcon", "fern", "flint", "glacier",
    "harbor", "haven", "horizon", "iris", "jade", "juniper", "lark", "lumen", "maple", "meadow",
    "nova", "oak", "orbit", "pebble", "pine", "prism", "quartz", "raven", "ridge", "sage",
    "summit", "terra", "thistle", "tide", "vale", "willow", "zenith",
];

pub(crate) const REVIEW_WORDS: &[&str] = &[
    "great", "quality", "arrived", "late", "packaging", "works", "as", "described", "would",
    "buy", "again", "not", "worth", "the", "price", "excellent", "value", "poor", "build",
    "colour", "size", "fits", "perfectly", "broke", "after", "week", "support", "helpful",
    "fast", "delivery", "recommend", "this", "to", "friends", "okay", "product", "overall",
    "cheap", "feel", "sturdy", "looks", "nice", "instructions", "unclear", "battery", "life",
];
