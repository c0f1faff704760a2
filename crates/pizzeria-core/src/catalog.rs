//! Static menu vocabulary: human-readable size and topping names mapped to
//! the short codes the commerce API expects.
//!
//! Matching is deliberately permissive. Input is trimmed and lower-cased, then
//! compared against the vocabulary in declaration order; the first entry that
//! matches wins. For toppings a match means the input *contains* the
//! vocabulary name, so `"extra bacon"` resolves to bacon. Input containing
//! several vocabulary names resolves to whichever is declared first, which is
//! why longer names that embed a shorter one (`"brooklyn pepperoni"`) are
//! declared ahead of it.

use serde::Serialize;

/// Crust size, serialized as the provider's product code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum SizeCode {
    #[serde(rename = "10SCREEN")]
    Small,
    #[serde(rename = "12SCREEN")]
    Medium,
    #[serde(rename = "14SCREEN")]
    Large,
}

impl SizeCode {
    /// Provider product code, e.g. `"12SCREEN"`.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            SizeCode::Small => "10SCREEN",
            SizeCode::Medium => "12SCREEN",
            SizeCode::Large => "14SCREEN",
        }
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            SizeCode::Small => "small",
            SizeCode::Medium => "medium",
            SizeCode::Large => "large",
        }
    }
}

impl std::fmt::Display for SizeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Sizes in match order: `(abbreviation, full name, size)`.
const SIZES: [(&str, &str, SizeCode); 3] = [
    ("s", "small", SizeCode::Small),
    ("m", "medium", SizeCode::Medium),
    ("l", "large", SizeCode::Large),
];

/// A single topping option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Topping {
    Cheese,
    BrooklynPepperoni,
    Pepperoni,
    Sausage,
    Beef,
    Ham,
    Bacon,
    Salami,
    Chicken,
    PhillySteak,
    Anchovy,
    CheddarMozza,
    Feta,
    Provolone,
    BananaPeppers,
    BlackOlives,
    GreenOlives,
    GreenPeppers,
    Mushroom,
    Pineapple,
    Onion,
    Tomatoes,
    JalapenoPeppers,
}

// Meats first, then non-meats. Order is the tie-break for ambiguous input.
const TOPPINGS: [(&str, Topping); 23] = [
    ("cheese", Topping::Cheese),
    ("brooklyn pepperoni", Topping::BrooklynPepperoni),
    ("pepperoni", Topping::Pepperoni),
    ("sausage", Topping::Sausage),
    ("beef", Topping::Beef),
    ("ham", Topping::Ham),
    ("bacon", Topping::Bacon),
    ("salami", Topping::Salami),
    ("chicken", Topping::Chicken),
    ("philly steak", Topping::PhillySteak),
    ("anchovy", Topping::Anchovy),
    ("cheddar/mozza", Topping::CheddarMozza),
    ("feta", Topping::Feta),
    ("provolone", Topping::Provolone),
    ("banana peppers", Topping::BananaPeppers),
    ("black olives", Topping::BlackOlives),
    ("green olives", Topping::GreenOlives),
    ("green peppers", Topping::GreenPeppers),
    ("mushroom", Topping::Mushroom),
    ("pineapple", Topping::Pineapple),
    ("onion", Topping::Onion),
    ("tomatoes", Topping::Tomatoes),
    ("jalapeno peppers", Topping::JalapenoPeppers),
];

impl Topping {
    /// Provider option code, e.g. `"P"` for pepperoni.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Topping::Cheese => "C",
            Topping::BrooklynPepperoni => "Xp",
            Topping::Pepperoni => "P",
            Topping::Sausage => "S",
            Topping::Beef => "B",
            Topping::Ham => "H",
            Topping::Bacon => "K",
            Topping::Salami => "L",
            Topping::Chicken => "D",
            Topping::PhillySteak => "St",
            Topping::Anchovy => "A",
            Topping::CheddarMozza => "Cm",
            Topping::Feta => "Fe",
            Topping::Provolone => "Cp",
            Topping::BananaPeppers => "Z",
            Topping::BlackOlives => "R",
            Topping::GreenOlives => "V",
            Topping::GreenPeppers => "G",
            Topping::Mushroom => "M",
            Topping::Pineapple => "N",
            Topping::Onion => "O",
            Topping::Tomatoes => "T",
            Topping::JalapenoPeppers => "J",
        }
    }

    /// Vocabulary name as shown to the user.
    #[must_use]
    pub fn name(self) -> &'static str {
        TOPPINGS
            .iter()
            .find(|(_, t)| *t == self)
            .map_or("", |(name, _)| name)
    }
}

/// Resolves free text to a crust size.
///
/// Accepts the single-letter abbreviation (`"m"`) or any input containing the
/// full name (`"Medium please"`). Returns `None` when nothing matches.
#[must_use]
pub fn resolve_size(input: &str) -> Option<SizeCode> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    SIZES
        .iter()
        .find(|(abbrev, name, _)| needle == *abbrev || needle.contains(name))
        .map(|(_, _, size)| *size)
}

/// Resolves one free-text token to a topping by substring containment.
///
/// First match in declaration order wins; `None` when the token contains no
/// vocabulary name.
#[must_use]
pub fn resolve_topping(input: &str) -> Option<Topping> {
    let needle = input.trim().to_lowercase();
    if needle.is_empty() {
        return None;
    }
    TOPPINGS
        .iter()
        .find(|(name, _)| needle.contains(name))
        .map(|(_, topping)| *topping)
}

/// Every topping name, in declaration order.
pub fn topping_names() -> impl Iterator<Item = &'static str> {
    TOPPINGS.iter().map(|(name, _)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_single_letter_sizes() {
        assert_eq!(resolve_size("s"), Some(SizeCode::Small));
        assert_eq!(resolve_size(" M\n"), Some(SizeCode::Medium));
        assert_eq!(resolve_size("l"), Some(SizeCode::Large));
    }

    #[test]
    fn resolves_full_size_names_inside_text() {
        assert_eq!(resolve_size("Large"), Some(SizeCode::Large));
        assert_eq!(resolve_size("a medium one"), Some(SizeCode::Medium));
    }

    #[test]
    fn unknown_size_is_unresolved() {
        assert_eq!(resolve_size("xl"), None);
        assert_eq!(resolve_size(""), None);
        assert_eq!(resolve_size("   "), None);
    }

    #[test]
    fn size_codes_match_provider_codes() {
        assert_eq!(SizeCode::Small.code(), "10SCREEN");
        assert_eq!(SizeCode::Medium.code(), "12SCREEN");
        assert_eq!(SizeCode::Large.code(), "14SCREEN");
    }

    #[test]
    fn resolves_known_toppings() {
        assert_eq!(resolve_topping("pepperoni"), Some(Topping::Pepperoni));
        assert_eq!(
            resolve_topping("banana peppers"),
            Some(Topping::BananaPeppers)
        );
        assert_eq!(resolve_topping("ham"), Some(Topping::Ham));
        assert_eq!(resolve_topping("Cheddar/Mozza"), Some(Topping::CheddarMozza));
    }

    #[test]
    fn unknown_topping_is_unresolved() {
        assert_eq!(resolve_topping("xyz"), None);
        assert_eq!(resolve_topping(""), None);
    }

    #[test]
    fn resolution_is_repeatable() {
        for raw in ["pepperoni", "xyz", " green peppers ", "extra bacon"] {
            assert_eq!(resolve_topping(raw), resolve_topping(raw));
        }
    }

    #[test]
    fn ambiguous_input_takes_first_declared_match() {
        // contains both "cheese" and "ham"; cheese is declared first
        assert_eq!(resolve_topping("ham and cheese"), Some(Topping::Cheese));
    }

    #[test]
    fn brooklyn_pepperoni_is_reachable() {
        assert_eq!(
            resolve_topping("brooklyn pepperoni"),
            Some(Topping::BrooklynPepperoni)
        );
        assert_eq!(Topping::BrooklynPepperoni.code(), "Xp");
    }

    #[test]
    fn topping_names_follow_table_order() {
        let names: Vec<&str> = topping_names().collect();
        assert_eq!(names.len(), 23);
        assert_eq!(names[0], "cheese");
        assert_eq!(names[22], "jalapeno peppers");
        assert_eq!(Topping::Feta.name(), "feta");
    }
}
