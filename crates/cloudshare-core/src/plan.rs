//! Plan Catalog
//!
//! The fixed bundles of credits offered on the subscription page. Prices are
//! whole rupees; the backend enforces its own price list and the two are not
//! reconciled at runtime.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::CloudShareError;

/// Identifier of a purchasable plan (wire form: `"premium"`, `"ultimate"`)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Premium,
    Ultimate,
}

impl PlanId {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Premium => "premium",
            Self::Ultimate => "ultimate",
        }
    }

    /// Tier label the backend stores against the user after a purchase
    pub const fn tier(self) -> &'static str {
        match self {
            Self::Premium => "PREMIUM",
            Self::Ultimate => "ULTIMATE",
        }
    }

    /// Catalog entry for this id
    pub fn plan(self) -> &'static Plan {
        match self {
            Self::Premium => &CATALOG[0],
            Self::Ultimate => &CATALOG[1],
        }
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlanId {
    type Err = CloudShareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "premium" => Ok(Self::Premium),
            "ultimate" => Ok(Self::Ultimate),
            other => Err(CloudShareError::UnknownPlan(other.to_string())),
        }
    }
}

/// A priced bundle of credits
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Plan {
    pub id: PlanId,

    /// Display name
    pub name: &'static str,

    /// Credits granted on purchase
    pub credits: u64,

    /// Price in INR
    pub price: Decimal,

    /// Feature bullet points
    pub features: &'static [&'static str],

    /// Highlighted on the pricing grid
    pub recommended: bool,
}

impl Plan {
    /// Look up a plan by id
    pub fn get(id: PlanId) -> &'static Self {
        id.plan()
    }

    /// Currency label, e.g. `₹2500`
    pub fn price_label(&self) -> String {
        format!("₹{}", self.price.normalize())
    }
}

static CATALOG: [Plan; 2] = [
    Plan {
        id: PlanId::Premium,
        name: "Premium",
        credits: 500,
        price: dec!(500),
        features: &[
            "Upload up to 500 files",
            "Access to all basic features",
            "Priority support",
        ],
        recommended: false,
    },
    Plan {
        id: PlanId::Ultimate,
        name: "Ultimate",
        credits: 5000,
        price: dec!(2500),
        features: &[
            "Upload up to 5000 files",
            "Access to all premium features",
            "Priority support",
            "Advanced analytics",
        ],
        recommended: true,
    },
];

/// All purchasable plans in display order
pub fn catalog() -> &'static [Plan] {
    &CATALOG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_values() {
        let premium = Plan::get(PlanId::Premium);
        assert_eq!(premium.credits, 500);
        assert_eq!(premium.price, dec!(500));
        assert!(!premium.recommended);

        let ultimate = Plan::get(PlanId::Ultimate);
        assert_eq!(ultimate.credits, 5000);
        assert_eq!(ultimate.price, dec!(2500));
        assert!(ultimate.recommended);
    }

    #[test]
    fn test_catalog_order_matches_ids() {
        let ids: Vec<_> = catalog().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![PlanId::Premium, PlanId::Ultimate]);
    }

    #[test]
    fn test_plan_id_parsing() {
        assert_eq!("ultimate".parse::<PlanId>().unwrap(), PlanId::Ultimate);
        assert!(matches!(
            "gold".parse::<PlanId>(),
            Err(CloudShareError::UnknownPlan(id)) if id == "gold"
        ));
    }

    #[test]
    fn test_plan_id_wire_format() {
        assert_eq!(serde_json::to_string(&PlanId::Premium).unwrap(), "\"premium\"");
        assert_eq!(PlanId::Ultimate.tier(), "ULTIMATE");
    }

    #[test]
    fn test_price_label() {
        assert_eq!(Plan::get(PlanId::Ultimate).price_label(), "₹2500");
    }
}
