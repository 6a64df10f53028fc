//! English inflection for table and class names.
//!
//! Suffix rules plus a short irregular table. Compound snake_case names
//! only inflect their last word: `blog_post` becomes `blog_posts`.

const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("child", "children"),
    ("man", "men"),
    ("woman", "women"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("life", "lives"),
    ("quiz", "quizzes"),
    ("menu", "menus"),
];

const UNCOUNTABLE: &[&str] = &[
    "sheep",
    "fish",
    "series",
    "species",
    "news",
    "equipment",
    "information",
];

/// Singulars ending in `ie`, which the `ies -> y` rule would mangle.
const IE_NOUNS: &[&str] = &[
    "movie", "cookie", "pie", "tie", "lie", "zombie", "calorie", "rookie", "selfie",
];

/// Singulars ending in `che`, which the `ches -> ch` rule would mangle.
const CHE_NOUNS: &[&str] = &["cache", "niche", "headache", "avalanche", "moustache", "cliche"];

/// Plural form of a (possibly snake_case) noun.
pub fn pluralize(word: &str) -> String {
    map_last_word(word, pluralize_word)
}

/// Singular form of a (possibly snake_case) noun.
pub fn singularize(word: &str) -> String {
    map_last_word(word, singularize_word)
}

/// `create_posts_table` -> `CreatePostsTable`.
pub fn to_pascal_case(s: &str) -> String {
    s.split(['_', '-', ' '])
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

fn map_last_word(word: &str, f: fn(&str) -> String) -> String {
    match word.rsplit_once('_') {
        Some((head, last)) => format!("{}_{}", head, f(last)),
        None => f(word),
    }
}

fn pluralize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((_, plural)) = IRREGULAR.iter().find(|(s, _)| *s == word) {
        return plural.to_string();
    }

    if let Some(stem) = word.strip_suffix('y') {
        if !stem.is_empty() && !ends_with_vowel(stem) {
            return format!("{}ies", stem);
        }
    }
    if ["s", "x", "z", "ch", "sh"].iter().any(|s| word.ends_with(s)) {
        return format!("{}es", word);
    }
    format!("{}s", word)
}

fn singularize_word(word: &str) -> String {
    if word.is_empty() || UNCOUNTABLE.contains(&word) {
        return word.to_string();
    }
    if let Some((singular, _)) = IRREGULAR.iter().find(|(_, p)| *p == word) {
        return singular.to_string();
    }

    if word.ends_with("ss") || word.ends_with("us") {
        return word.to_string();
    }

    if let Some(stem) = word.strip_suffix("ies") {
        let ie = format!("{}ie", stem);
        if IE_NOUNS.contains(&ie.as_str()) {
            return ie;
        }
        if !stem.is_empty() {
            return format!("{}y", stem);
        }
    }
    if let Some(stem) = word.strip_suffix("es") {
        let sibilant = ["ss", "x", "zz", "ch", "sh"].iter().any(|s| stem.ends_with(s));
        if sibilant && !CHE_NOUNS.contains(&&word[..word.len() - 1]) {
            return stem.to_string();
        }
        // `buses`, `statuses`; `houses` and `causes` keep their `e`
        if let Some(head) = stem.strip_suffix("us") {
            if !head.is_empty() && !ends_with_vowel(head) {
                return stem.to_string();
            }
        }
    }
    match word.strip_suffix('s') {
        Some(stem) if !stem.is_empty() => stem.to_string(),
        _ => word.to_string(),
    }
}

fn ends_with_vowel(s: &str) -> bool {
    s.ends_with(['a', 'e', 'i', 'o', 'u'])
}
