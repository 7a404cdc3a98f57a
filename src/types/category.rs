use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the six Holland interest categories.
///
/// Declaration order is the canonical R, I, A, S, E, C order. The derived
/// `Ord` follows it, so `BTreeMap<Category, _>` iterates canonically and
/// stable sorts over [`Category::ordered`] use it as the tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "R", alias = "Realistic")]
    Realistic,
    #[serde(rename = "I", alias = "Investigative")]
    Investigative,
    #[serde(rename = "A", alias = "Artistic")]
    Artistic,
    #[serde(rename = "S", alias = "Social")]
    Social,
    #[serde(rename = "E", alias = "Enterprising")]
    Enterprising,
    #[serde(rename = "C", alias = "Conventional")]
    Conventional,
}

impl Category {
    pub const COUNT: usize = 6;

    pub fn ordered() -> [Category; Category::COUNT] {
        [
            Category::Realistic,
            Category::Investigative,
            Category::Artistic,
            Category::Social,
            Category::Enterprising,
            Category::Conventional,
        ]
    }

    pub fn code(self) -> char {
        match self {
            Category::Realistic => 'R',
            Category::Investigative => 'I',
            Category::Artistic => 'A',
            Category::Social => 'S',
            Category::Enterprising => 'E',
            Category::Conventional => 'C',
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Realistic => "Realistic",
            Category::Investigative => "Investigative",
            Category::Artistic => "Artistic",
            Category::Social => "Social",
            Category::Enterprising => "Enterprising",
            Category::Conventional => "Conventional",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Category::ordered()
            .into_iter()
            .find(|category| {
                trimmed.eq_ignore_ascii_case(category.label())
                    || (trimmed.len() == 1
                        && trimmed
                            .chars()
                            .all(|c| c.eq_ignore_ascii_case(&category.code())))
            })
            .ok_or_else(|| format!("unknown category code: {trimmed}"))
    }
}
