use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ProviderId;

/// Unique identifier for a food listing (`Food_ID`).
pub type FoodId = i64;

/// Dietary category of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FoodType {
    Vegetarian,
    #[serde(rename = "Non-Vegetarian")]
    NonVegetarian,
    Vegan,
}

impl FoodType {
    pub const ALL: [FoodType; 3] = [Self::Vegetarian, Self::NonVegetarian, Self::Vegan];
}

impl fmt::Display for FoodType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Vegetarian => write!(f, "Vegetarian"),
            Self::NonVegetarian => write!(f, "Non-Vegetarian"),
            Self::Vegan => write!(f, "Vegan"),
        }
    }
}

impl FromStr for FoodType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace('_', "-").as_str() {
            "VEGETARIAN" | "VEG" => Ok(Self::Vegetarian),
            "NON-VEGETARIAN" | "NON VEGETARIAN" | "NONVEGETARIAN" | "NON-VEG" => {
                Ok(Self::NonVegetarian)
            }
            "VEGAN" => Ok(Self::Vegan),
            _ => Err(format!("Unknown food type: {s}")),
        }
    }
}

/// Meal slot a listing is intended for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MealType {
    Breakfast,
    Lunch,
    Dinner,
    Snacks,
}

impl MealType {
    pub const ALL: [MealType; 4] = [Self::Breakfast, Self::Lunch, Self::Dinner, Self::Snacks];
}

impl fmt::Display for MealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Breakfast => write!(f, "Breakfast"),
            Self::Lunch => write!(f, "Lunch"),
            Self::Dinner => write!(f, "Dinner"),
            Self::Snacks => write!(f, "Snacks"),
        }
    }
}

impl FromStr for MealType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "BREAKFAST" => Ok(Self::Breakfast),
            "LUNCH" => Ok(Self::Lunch),
            "DINNER" => Ok(Self::Dinner),
            "SNACKS" | "SNACK" => Ok(Self::Snacks),
            _ => Err(format!("Unknown meal type: {s}")),
        }
    }
}

/// A stored row of `Food_Listings`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    pub id: FoodId,
    pub name: String,
    /// Always positive when created through the CLI; storage does not check it.
    pub quantity: u32,
    pub expiry_date: NaiveDate,
    pub provider_id: ProviderId,
    /// Copy of the owning provider's type at the time of listing.
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

/// The eight fields collected by the add flow. `Food_ID` is assigned by storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewFoodListing {
    pub name: String,
    pub quantity: u32,
    pub expiry_date: NaiveDate,
    pub provider_id: ProviderId,
    pub provider_type: String,
    pub location: String,
    pub food_type: FoodType,
    pub meal_type: MealType,
}

impl NewFoodListing {
    pub fn into_listing(self, id: FoodId) -> FoodListing {
        FoodListing {
            id,
            name: self.name,
            quantity: self.quantity,
            expiry_date: self.expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        }
    }
}
