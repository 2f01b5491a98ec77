//! Immutable card catalog.
//!
//! Every acquirable card is an enum key with a static definition, so an
//! unknown wire id is a checked case rather than a failed map lookup. The
//! catalog is shared by all matches and never mutated.

use serde::{Deserialize, Serialize};

/// Income-trigger class of an establishment.
///
/// Determines who receives income on a roll and from whom:
/// primary-resource pays every owner from the bank, service pays only the
/// roller from the bank, restaurant transfers from the roller to the owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    PrimaryResource,
    Service,
    Restaurant,
}

/// The ten purchasable establishments.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Establishment {
    WheatField,
    Ranch,
    Forest,
    Mine,
    Bakery,
    ConvenienceStore,
    CheeseFactory,
    FurnitureFactory,
    Cafe,
    FamilyRestaurant,
}

/// The four unique landmarks; owning all four wins the match.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Landmark {
    TrainStation,
    ShoppingMall,
    AmusementPark,
    RadioTower,
}

/// Unique rule tag of a landmark.
///
/// Only `BonusTurnOnDouble` changes turn progression and only
/// `ExtraDieChoice` changes roll validation; the other two are catalog
/// data with no engine effect (they still count toward the win).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LandmarkEffect {
    ExtraDieChoice,
    ShopBonus,
    BonusTurnOnDouble,
    RerollOnce,
}

/// Income override: instead of base income, earn `per_count` coins per
/// owned copy of `counted`. Used by exactly two establishments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Multiplier {
    pub counted: Establishment,
    pub per_count: u32,
}

/// Static definition of an establishment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EstablishmentDef {
    pub name: &'static str,
    pub cost: u32,
    pub category: Category,
    /// Dice totals that trigger this card's income, all in 2..=12 (or 1
    /// for single-die totals).
    pub activation: &'static [u8],
    pub income: u32,
    pub multiplier: Option<Multiplier>,
}

/// Static definition of a landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LandmarkDef {
    pub name: &'static str,
    pub cost: u32,
    pub effect: LandmarkEffect,
}

impl Establishment {
    /// All establishments in catalog order (also the log order within one
    /// player's holdings during income resolution).
    pub const ALL: [Establishment; 10] = [
        Establishment::WheatField,
        Establishment::Ranch,
        Establishment::Forest,
        Establishment::Mine,
        Establishment::Bakery,
        Establishment::ConvenienceStore,
        Establishment::CheeseFactory,
        Establishment::FurnitureFactory,
        Establishment::Cafe,
        Establishment::FamilyRestaurant,
    ];

    /// The static definition for this establishment.
    pub fn definition(self) -> &'static EstablishmentDef {
        match self {
            Establishment::WheatField => &EstablishmentDef {
                name: "Wheat Field",
                cost: 1,
                category: Category::PrimaryResource,
                activation: &[1],
                income: 1,
                multiplier: None,
            },
            Establishment::Ranch => &EstablishmentDef {
                name: "Ranch",
                cost: 1,
                category: Category::PrimaryResource,
                activation: &[2],
                income: 1,
                multiplier: None,
            },
            Establishment::Forest => &EstablishmentDef {
                name: "Forest",
                cost: 3,
                category: Category::PrimaryResource,
                activation: &[5],
                income: 1,
                multiplier: None,
            },
            Establishment::Mine => &EstablishmentDef {
                name: "Mine",
                cost: 6,
                category: Category::PrimaryResource,
                activation: &[9],
                income: 5,
                multiplier: None,
            },
            Establishment::Bakery => &EstablishmentDef {
                name: "Bakery",
                cost: 1,
                category: Category::Service,
                activation: &[2, 3],
                income: 1,
                multiplier: None,
            },
            Establishment::ConvenienceStore => &EstablishmentDef {
                name: "Convenience Store",
                cost: 2,
                category: Category::Service,
                activation: &[4],
                income: 3,
                multiplier: None,
            },
            Establishment::CheeseFactory => &EstablishmentDef {
                name: "Cheese Factory",
                cost: 5,
                category: Category::Service,
                activation: &[7],
                income: 3,
                multiplier: Some(Multiplier {
                    counted: Establishment::Ranch,
                    per_count: 3,
                }),
            },
            Establishment::FurnitureFactory => &EstablishmentDef {
                name: "Furniture Factory",
                cost: 3,
                category: Category::Service,
                activation: &[8],
                income: 3,
                multiplier: Some(Multiplier {
                    counted: Establishment::Forest,
                    per_count: 3,
                }),
            },
            Establishment::Cafe => &EstablishmentDef {
                name: "Cafe",
                cost: 2,
                category: Category::Restaurant,
                activation: &[3],
                income: 1,
                multiplier: None,
            },
            Establishment::FamilyRestaurant => &EstablishmentDef {
                name: "Family Restaurant",
                cost: 3,
                category: Category::Restaurant,
                activation: &[9, 10],
                income: 2,
                multiplier: None,
            },
        }
    }

    /// The wire id for this establishment (kebab-case).
    pub fn id(self) -> &'static str {
        match self {
            Establishment::WheatField => "wheat-field",
            Establishment::Ranch => "ranch",
            Establishment::Forest => "forest",
            Establishment::Mine => "mine",
            Establishment::Bakery => "bakery",
            Establishment::ConvenienceStore => "convenience-store",
            Establishment::CheeseFactory => "cheese-factory",
            Establishment::FurnitureFactory => "furniture-factory",
            Establishment::Cafe => "cafe",
            Establishment::FamilyRestaurant => "family-restaurant",
        }
    }

    /// Resolves a wire id to an establishment.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|e| e.id() == id)
    }
}

impl Landmark {
    /// All landmarks in catalog order.
    pub const ALL: [Landmark; 4] = [
        Landmark::TrainStation,
        Landmark::ShoppingMall,
        Landmark::AmusementPark,
        Landmark::RadioTower,
    ];

    /// The static definition for this landmark.
    pub fn definition(self) -> &'static LandmarkDef {
        match self {
            Landmark::TrainStation => &LandmarkDef {
                name: "Train Station",
                cost: 4,
                effect: LandmarkEffect::ExtraDieChoice,
            },
            Landmark::ShoppingMall => &LandmarkDef {
                name: "Shopping Mall",
                cost: 10,
                effect: LandmarkEffect::ShopBonus,
            },
            Landmark::AmusementPark => &LandmarkDef {
                name: "Amusement Park",
                cost: 16,
                effect: LandmarkEffect::BonusTurnOnDouble,
            },
            Landmark::RadioTower => &LandmarkDef {
                name: "Radio Tower",
                cost: 22,
                effect: LandmarkEffect::RerollOnce,
            },
        }
    }

    /// The wire id for this landmark (kebab-case).
    pub fn id(self) -> &'static str {
        match self {
            Landmark::TrainStation => "train-station",
            Landmark::ShoppingMall => "shopping-mall",
            Landmark::AmusementPark => "amusement-park",
            Landmark::RadioTower => "radio-tower",
        }
    }

    /// Resolves a wire id to a landmark.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|l| l.id() == id)
    }
}

/// A reference to any purchasable card, establishment or landmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CardRef {
    Establishment(Establishment),
    Landmark(Landmark),
}

impl CardRef {
    /// Resolves a wire id against the whole catalog.
    ///
    /// Establishments are checked first; the two id spaces are disjoint.
    pub fn from_id(id: &str) -> Option<Self> {
        Establishment::from_id(id)
            .map(CardRef::Establishment)
            .or_else(|| Landmark::from_id(id).map(CardRef::Landmark))
    }

    /// The wire id of the referenced card.
    pub fn id(self) -> &'static str {
        match self {
            CardRef::Establishment(e) => e.id(),
            CardRef::Landmark(l) => l.id(),
        }
    }

    /// The display name of the referenced card.
    pub fn name(self) -> &'static str {
        match self {
            CardRef::Establishment(e) => e.definition().name,
            CardRef::Landmark(l) => l.definition().name,
        }
    }

    /// The purchase cost of the referenced card.
    pub fn cost(self) -> u32 {
        match self {
            CardRef::Establishment(e) => e.definition().cost,
            CardRef::Landmark(l) => l.definition().cost,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_establishment_resolves_by_id() {
        for e in Establishment::ALL {
            assert_eq!(Establishment::from_id(e.id()), Some(e));
        }
    }

    #[test]
    fn test_every_landmark_resolves_by_id() {
        for l in Landmark::ALL {
            assert_eq!(Landmark::from_id(l.id()), Some(l));
        }
    }

    #[test]
    fn test_unknown_id_is_none() {
        assert_eq!(CardRef::from_id("stadium"), None);
        assert_eq!(Establishment::from_id("train-station"), None);
    }

    #[test]
    fn test_card_ref_resolves_both_kinds() {
        assert_eq!(
            CardRef::from_id("cafe"),
            Some(CardRef::Establishment(Establishment::Cafe))
        );
        assert_eq!(
            CardRef::from_id("radio-tower"),
            Some(CardRef::Landmark(Landmark::RadioTower))
        );
        assert_eq!(CardRef::from_id("radio-tower").unwrap().cost(), 22);
    }

    #[test]
    fn test_activation_numbers_within_range() {
        for e in Establishment::ALL {
            let def = e.definition();
            assert!(!def.activation.is_empty());
            for &n in def.activation {
                assert!((1..=12).contains(&n), "{} activates on {}", def.name, n);
            }
        }
    }

    #[test]
    fn test_exactly_two_multiplier_establishments() {
        let count = Establishment::ALL
            .iter()
            .filter(|e| e.definition().multiplier.is_some())
            .count();
        assert_eq!(count, 2);
    }

    #[test]
    fn test_multiplier_references() {
        let cheese = Establishment::CheeseFactory.definition();
        assert_eq!(
            cheese.multiplier.unwrap().counted,
            Establishment::Ranch
        );
        let furniture = Establishment::FurnitureFactory.definition();
        assert_eq!(
            furniture.multiplier.unwrap().counted,
            Establishment::Forest
        );
    }
}
