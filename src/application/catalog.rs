//! The fixed menu of analytical queries.
//!
//! All filtering and aggregation happens inside the SQL; callers pick a
//! variant, run it, and render the raw [`QueryResult`].

use chrono::NaiveDateTime;
use rusqlite::named_params;
use std::fmt;
use std::str::FromStr;

use crate::domain::CatalogError;
use crate::infra::db::{Database, QueryResult, StorageError};

/// One entry of the analysis menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnalysisQuery {
    ProvidersPerCity,
    ReceiversPerCity,
    TopProviderTypes,
    MostClaimedFood,
    ClaimStatusBreakdown,
    ExpiringSoon,
    ProvidersByListings,
    ReceiversByClaims,
    AverageQuantity,
    FoodTypeDistribution,
    MealTypeDistribution,
    ListingsPerLocation,
    ClaimsPerProvider,
    RecentClaims,
    ExpiredListings,
}

impl AnalysisQuery {
    /// Menu order.
    pub const ALL: [AnalysisQuery; 15] = [
        Self::ProvidersPerCity,
        Self::ReceiversPerCity,
        Self::TopProviderTypes,
        Self::MostClaimedFood,
        Self::ClaimStatusBreakdown,
        Self::ExpiringSoon,
        Self::ProvidersByListings,
        Self::ReceiversByClaims,
        Self::AverageQuantity,
        Self::FoodTypeDistribution,
        Self::MealTypeDistribution,
        Self::ListingsPerLocation,
        Self::ClaimsPerProvider,
        Self::RecentClaims,
        Self::ExpiredListings,
    ];

    /// 1-based position in the menu.
    pub fn number(self) -> usize {
        Self::ALL
            .iter()
            .position(|q| *q == self)
            .map_or(0, |index| index + 1)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => "Count of Providers per City",
            Self::ReceiversPerCity => "Count of Receivers per City",
            Self::TopProviderTypes => "Top Provider Types",
            Self::MostClaimedFood => "Most Claimed Food Items",
            Self::ClaimStatusBreakdown => "Completed vs Pending vs Cancelled Claims",
            Self::ExpiringSoon => "Food Listings Expiring Soon",
            Self::ProvidersByListings => "Providers with Most Food Listings",
            Self::ReceiversByClaims => "Receivers with Most Claims",
            Self::AverageQuantity => "Average Quantity of Food per Listing",
            Self::FoodTypeDistribution => "Vegetarian vs Non-Vegetarian Listings",
            Self::MealTypeDistribution => "Meal Type Distribution",
            Self::ListingsPerLocation => "Food Listings per Location",
            Self::ClaimsPerProvider => "Claims per Provider",
            Self::RecentClaims => "Claims in Last 7 Days",
            Self::ExpiredListings => "Expired Food Listings",
        }
    }

    /// Short name accepted on the command line.
    pub fn slug(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => "providers-per-city",
            Self::ReceiversPerCity => "receivers-per-city",
            Self::TopProviderTypes => "top-provider-types",
            Self::MostClaimedFood => "most-claimed-food",
            Self::ClaimStatusBreakdown => "claim-status",
            Self::ExpiringSoon => "expiring-soon",
            Self::ProvidersByListings => "providers-by-listings",
            Self::ReceiversByClaims => "receivers-by-claims",
            Self::AverageQuantity => "average-quantity",
            Self::FoodTypeDistribution => "food-types",
            Self::MealTypeDistribution => "meal-types",
            Self::ListingsPerLocation => "listings-per-location",
            Self::ClaimsPerProvider => "claims-per-provider",
            Self::RecentClaims => "recent-claims",
            Self::ExpiredListings => "expired-listings",
        }
    }

    /// Whether the statement references the bound `:now` instant.
    pub fn uses_evaluation_time(self) -> bool {
        matches!(
            self,
            Self::ExpiringSoon | Self::RecentClaims | Self::ExpiredListings
        )
    }

    pub fn sql(self) -> &'static str {
        match self {
            Self::ProvidersPerCity => {
                "SELECT City, COUNT(*) AS Provider_Count FROM Providers GROUP BY City ORDER BY City"
            }
            Self::ReceiversPerCity => {
                "SELECT City, COUNT(*) AS Receiver_Count FROM Receivers GROUP BY City ORDER BY City"
            }
            Self::TopProviderTypes => {
                "SELECT Type, COUNT(*) AS Count FROM Providers GROUP BY Type ORDER BY Count DESC, Type"
            }
            Self::MostClaimedFood => {
                r#"
                SELECT f.Food_Name, COUNT(c.Claim_ID) AS Claim_Count
                FROM Claims c
                JOIN Food_Listings f ON c.Food_ID = f.Food_ID
                GROUP BY f.Food_Name
                ORDER BY Claim_Count DESC, f.Food_Name
                "#
            }
            Self::ClaimStatusBreakdown => {
                "SELECT Status, COUNT(*) AS Count FROM Claims GROUP BY Status ORDER BY Status"
            }
            // Calendar-day distance; listings already past their date stay in the window.
            Self::ExpiringSoon => {
                r#"
                SELECT * FROM Food_Listings
                WHERE julianday(date(Expiry_Date)) - julianday(date(:now)) <= 2
                ORDER BY Expiry_Date, Food_ID
                "#
            }
            Self::ProvidersByListings => {
                r#"
                SELECT Provider_ID, COUNT(*) AS Listing_Count
                FROM Food_Listings
                GROUP BY Provider_ID
                ORDER BY Listing_Count DESC, Provider_ID
                "#
            }
            Self::ReceiversByClaims => {
                r#"
                SELECT Receiver_ID, COUNT(*) AS Claim_Count
                FROM Claims
                GROUP BY Receiver_ID
                ORDER BY Claim_Count DESC, Receiver_ID
                "#
            }
            Self::AverageQuantity => "SELECT AVG(Quantity) AS Avg_Quantity FROM Food_Listings",
            Self::FoodTypeDistribution => {
                "SELECT Food_Type, COUNT(*) AS Count FROM Food_Listings GROUP BY Food_Type ORDER BY Food_Type"
            }
            Self::MealTypeDistribution => {
                "SELECT Meal_Type, COUNT(*) AS Count FROM Food_Listings GROUP BY Meal_Type ORDER BY Meal_Type"
            }
            Self::ListingsPerLocation => {
                "SELECT Location, COUNT(*) AS Count FROM Food_Listings GROUP BY Location ORDER BY Location"
            }
            Self::ClaimsPerProvider => {
                r#"
                SELECT p.Name, COUNT(c.Claim_ID) AS Claim_Count
                FROM Claims c
                JOIN Food_Listings f ON c.Food_ID = f.Food_ID
                JOIN Providers p ON f.Provider_ID = p.Provider_ID
                GROUP BY p.Name
                ORDER BY Claim_Count DESC, p.Name
                "#
            }
            // Full timestamps, not calendar days.
            Self::RecentClaims => {
                r#"
                SELECT * FROM Claims
                WHERE julianday(:now) - julianday(Timestamp) <= 7
                ORDER BY Timestamp DESC, Claim_ID
                "#
            }
            Self::ExpiredListings => {
                r#"
                SELECT * FROM Food_Listings
                WHERE date(Expiry_Date) < date(:now)
                ORDER BY Expiry_Date, Food_ID
                "#
            }
        }
    }

    /// Execute against `db`, evaluating date predicates at `now`.
    pub fn run(self, db: &Database, now: NaiveDateTime) -> Result<QueryResult, StorageError> {
        log::debug!("running analysis #{} ({})", self.number(), self.slug());
        if self.uses_evaluation_time() {
            db.execute_query(self.sql(), named_params! { ":now": now })
        } else {
            db.execute_query(self.sql(), [])
        }
    }
}

impl fmt::Display for AnalysisQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.number(), self.label())
    }
}

impl FromStr for AnalysisQuery {
    type Err = CatalogError;

    /// Accepts the menu number, the slug, or the label (with or without its number prefix).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        if let Ok(number) = needle.parse::<usize>() {
            return number
                .checked_sub(1)
                .and_then(|index| Self::ALL.get(index).copied())
                .ok_or_else(|| CatalogError::UnknownQuery(s.to_string()));
        }

        Self::ALL
            .into_iter()
            .find(|q| {
                q.slug().eq_ignore_ascii_case(needle)
                    || q.label().eq_ignore_ascii_case(needle)
                    || q.to_string().eq_ignore_ascii_case(needle)
            })
            .ok_or_else(|| CatalogError::UnknownQuery(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_menu_is_numbered_in_order() {
        for (index, query) in AnalysisQuery::ALL.iter().enumerate() {
            assert_eq!(query.number(), index + 1);
        }
        assert_eq!(
            AnalysisQuery::ExpiredListings.to_string(),
            "15. Expired Food Listings"
        );
    }

    #[test]
    fn test_labels_and_slugs_are_unique() {
        let labels: HashSet<_> = AnalysisQuery::ALL.iter().map(|q| q.label()).collect();
        let slugs: HashSet<_> = AnalysisQuery::ALL.iter().map(|q| q.slug()).collect();
        assert_eq!(labels.len(), 15);
        assert_eq!(slugs.len(), 15);
    }

    #[test]
    fn test_parse_selector() {
        assert_eq!(
            "6".parse::<AnalysisQuery>().unwrap(),
            AnalysisQuery::ExpiringSoon
        );
        assert_eq!(
            "expired-listings".parse::<AnalysisQuery>().unwrap(),
            AnalysisQuery::ExpiredListings
        );
        assert_eq!(
            "meal type distribution".parse::<AnalysisQuery>().unwrap(),
            AnalysisQuery::MealTypeDistribution
        );
        assert_eq!(
            "4. Most Claimed Food Items".parse::<AnalysisQuery>().unwrap(),
            AnalysisQuery::MostClaimedFood
        );
        assert_eq!(
            "0".parse::<AnalysisQuery>(),
            Err(CatalogError::UnknownQuery("0".into()))
        );
        assert!("16".parse::<AnalysisQuery>().is_err());
        assert!("popular".parse::<AnalysisQuery>().is_err());
    }

    #[test]
    fn test_every_query_runs_on_empty_schema() {
        let db = Database::open_in_memory().unwrap();
        let now = chrono::NaiveDate::from_ymd_opt(2025, 3, 17)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        for query in AnalysisQuery::ALL {
            let result = query.run(&db, now).unwrap();
            if query == AnalysisQuery::AverageQuantity {
                // Aggregate without GROUP BY yields one NULL row.
                assert_eq!(result.len(), 1);
            } else {
                assert!(result.is_empty(), "{query} should be empty");
            }
        }
    }

    #[test]
    fn test_only_date_relative_queries_bind_now() {
        for query in AnalysisQuery::ALL {
            assert_eq!(query.sql().contains(":now"), query.uses_evaluation_time());
        }
    }
}
