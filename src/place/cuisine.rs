//! Cuisine classification
//!
//! Maps provider category tags onto a small closed set of cuisine labels.

use serde::{Deserialize, Serialize};

/// Closed cuisine vocabulary shown on place cards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cuisine {
    American,
    Barbecue,
    Brazilian,
    Chinese,
    French,
    Greek,
    Indian,
    Indonesian,
    Italian,
    Japanese,
    Korean,
    Lebanese,
    Mediterranean,
    Mexican,
    MiddleEastern,
    Spanish,
    Thai,
    Turkish,
    Vietnamese,
    Pizza,
    Burgers,
    Seafood,
    Steakhouse,
    Vegetarian,
    Vegan,
    Breakfast,
    Cafe,
    Bakery,
    Dessert,
    Bar,
    FastFood,
    /// Generic fallback when no specific tag matched
    Restaurant,
}

/// Known tags, each mapping to one label
///
/// Generic tags ("restaurant", "food", "point_of_interest", ...) are
/// intentionally absent: they fall through to `Cuisine::Restaurant`, so a
/// specific tag anywhere in the list outranks them.
const TAG_TABLE: &[(&str, Cuisine)] = &[
    ("american_restaurant", Cuisine::American),
    ("barbecue_restaurant", Cuisine::Barbecue),
    ("brazilian_restaurant", Cuisine::Brazilian),
    ("chinese_restaurant", Cuisine::Chinese),
    ("french_restaurant", Cuisine::French),
    ("greek_restaurant", Cuisine::Greek),
    ("indian_restaurant", Cuisine::Indian),
    ("indonesian_restaurant", Cuisine::Indonesian),
    ("italian_restaurant", Cuisine::Italian),
    ("japanese_restaurant", Cuisine::Japanese),
    ("ramen_restaurant", Cuisine::Japanese),
    ("sushi_restaurant", Cuisine::Japanese),
    ("korean_restaurant", Cuisine::Korean),
    ("lebanese_restaurant", Cuisine::Lebanese),
    ("mediterranean_restaurant", Cuisine::Mediterranean),
    ("mexican_restaurant", Cuisine::Mexican),
    ("middle_eastern_restaurant", Cuisine::MiddleEastern),
    ("spanish_restaurant", Cuisine::Spanish),
    ("thai_restaurant", Cuisine::Thai),
    ("turkish_restaurant", Cuisine::Turkish),
    ("vietnamese_restaurant", Cuisine::Vietnamese),
    ("pizza_restaurant", Cuisine::Pizza),
    ("hamburger_restaurant", Cuisine::Burgers),
    ("seafood_restaurant", Cuisine::Seafood),
    ("steak_house", Cuisine::Steakhouse),
    ("vegetarian_restaurant", Cuisine::Vegetarian),
    ("vegan_restaurant", Cuisine::Vegan),
    ("breakfast_restaurant", Cuisine::Breakfast),
    ("brunch_restaurant", Cuisine::Breakfast),
    ("cafe", Cuisine::Cafe),
    ("coffee_shop", Cuisine::Cafe),
    ("bakery", Cuisine::Bakery),
    ("ice_cream_shop", Cuisine::Dessert),
    ("dessert_shop", Cuisine::Dessert),
    ("bar", Cuisine::Bar),
    ("pub", Cuisine::Bar),
    ("wine_bar", Cuisine::Bar),
    ("fast_food_restaurant", Cuisine::FastFood),
    ("meal_takeaway", Cuisine::FastFood),
];

impl Cuisine {
    /// Classify a place from its provider tags
    ///
    /// Tags are scanned in order and the first tag present in the table wins.
    /// No match yields `Cuisine::Restaurant`.
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        tags.into_iter()
            .find_map(|tag| Self::from_tag(tag.as_ref()))
            .unwrap_or(Self::Restaurant)
    }

    /// Look up a single tag
    pub fn from_tag(tag: &str) -> Option<Self> {
        let tag = tag.trim().to_ascii_lowercase();
        TAG_TABLE
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, cuisine)| *cuisine)
    }

    /// Display label
    pub fn label(&self) -> &'static str {
        match self {
            Self::American => "American",
            Self::Barbecue => "Barbecue",
            Self::Brazilian => "Brazilian",
            Self::Chinese => "Chinese",
            Self::French => "French",
            Self::Greek => "Greek",
            Self::Indian => "Indian",
            Self::Indonesian => "Indonesian",
            Self::Italian => "Italian",
            Self::Japanese => "Japanese",
            Self::Korean => "Korean",
            Self::Lebanese => "Lebanese",
            Self::Mediterranean => "Mediterranean",
            Self::Mexican => "Mexican",
            Self::MiddleEastern => "Middle Eastern",
            Self::Spanish => "Spanish",
            Self::Thai => "Thai",
            Self::Turkish => "Turkish",
            Self::Vietnamese => "Vietnamese",
            Self::Pizza => "Pizza",
            Self::Burgers => "Burgers",
            Self::Seafood => "Seafood",
            Self::Steakhouse => "Steakhouse",
            Self::Vegetarian => "Vegetarian",
            Self::Vegan => "Vegan",
            Self::Breakfast => "Breakfast",
            Self::Cafe => "Cafe",
            Self::Bakery => "Bakery",
            Self::Dessert => "Dessert",
            Self::Bar => "Bar",
            Self::FastFood => "Fast Food",
            Self::Restaurant => "Restaurant",
        }
    }
}

impl Default for Cuisine {
    fn default() -> Self {
        Self::Restaurant
    }
}

impl std::fmt::Display for Cuisine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
