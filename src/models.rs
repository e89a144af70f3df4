// src/models.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// UI slider bounds for the calculator inputs.
pub const TARGET_SUBSCRIBERS_MIN: u32 = 100;
pub const TARGET_SUBSCRIBERS_MAX: u32 = 10_000;
pub const MONTHLY_PRICE_MIN: f64 = 5.0;
pub const MONTHLY_PRICE_MAX: f64 = 50.0;
pub const ESTIMATED_VISITORS_MIN: u64 = 10_000;
pub const ESTIMATED_VISITORS_MAX: u64 = 200_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PublishingModel {
    Trailguide,
    Agency,
    Diy,
}

impl PublishingModel {
    pub const ALL: [PublishingModel; 3] = [
        PublishingModel::Trailguide,
        PublishingModel::Agency,
        PublishingModel::Diy,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            PublishingModel::Trailguide => "TrailGuide",
            PublishingModel::Agency => "Agency",
            PublishingModel::Diy => "DIY",
        }
    }

    pub fn key(&self) -> &'static str {
        match self {
            PublishingModel::Trailguide => "trailguide",
            PublishingModel::Agency => "agency",
            PublishingModel::Diy => "diy",
        }
    }
}

impl fmt::Display for PublishingModel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Funnel conversion ratios for one publishing model, each in (0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRates {
    pub site_to_subscriber: f64,
    pub email_to_subscriber: f64,
    pub visitor_to_email: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingStructure {
    /// One-time upfront cost.
    pub build_cost: f64,
    /// Fixed recurring fee, independent of revenue.
    pub monthly_base: f64,
    /// Fraction of monthly revenue taken on top of the base fee.
    pub revenue_share: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelProfile {
    pub rates: ConversionRates,
    pub pricing: PricingStructure,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum InputError {
    #[error("target subscribers must be greater than zero")]
    NoSubscribers,

    #[error("monthly price must be a positive number, got {0}")]
    InvalidPrice(f64),

    #[error("estimated visitors must be greater than zero")]
    NoVisitors,

    #[error("annual revenue for {subscribers} subscribers at {price} per month is too large to project")]
    RevenueOverflow { subscribers: u32, price: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorInput {
    pub target_subscribers: u32,
    pub monthly_price: f64,
    pub estimated_visitors: u64,
}

impl CalculatorInput {
    pub fn new(target_subscribers: u32, monthly_price: f64, estimated_visitors: u64) -> Self {
        CalculatorInput {
            target_subscribers,
            monthly_price,
            estimated_visitors,
        }
    }

    /// Rejects values the projection cannot give a meaningful answer for.
    /// Slider ranges are not enforced here, see [`CalculatorInput::clamped`].
    pub fn validate(&self) -> Result<(), InputError> {
        if self.target_subscribers == 0 {
            return Err(InputError::NoSubscribers);
        }
        if !self.monthly_price.is_finite() || self.monthly_price <= 0.0 {
            return Err(InputError::InvalidPrice(self.monthly_price));
        }
        if self.estimated_visitors == 0 {
            return Err(InputError::NoVisitors);
        }
        let annual_revenue = self.target_subscribers as f64 * self.monthly_price * 12.0;
        if !annual_revenue.is_finite() {
            return Err(InputError::RevenueOverflow {
                subscribers: self.target_subscribers,
                price: self.monthly_price,
            });
        }
        Ok(())
    }

    /// Pulls every field into its slider range. NaN prices stay NaN so that
    /// `validate` still rejects them.
    pub fn clamped(&self) -> Self {
        CalculatorInput {
            target_subscribers: self
                .target_subscribers
                .clamp(TARGET_SUBSCRIBERS_MIN, TARGET_SUBSCRIBERS_MAX),
            monthly_price: self.monthly_price.clamp(MONTHLY_PRICE_MIN, MONTHLY_PRICE_MAX),
            estimated_visitors: self
                .estimated_visitors
                .clamp(ESTIMATED_VISITORS_MIN, ESTIMATED_VISITORS_MAX),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelResult {
    pub visitors_needed: u64,
    pub email_list_needed: u64,
    pub build_cost: f64,
    pub monthly_fees: f64,
    /// Monthly revenue.
    pub revenue: f64,
    /// Annual revenue less build cost and annualized fees. A currency amount.
    pub net_roi: f64,
    /// Site-to-subscriber rate as a percentage.
    pub conversion_rate: f64,
    /// Email-to-subscriber rate as a percentage.
    pub email_conversion_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub trailguide: ModelResult,
    pub agency: ModelResult,
    pub diy: ModelResult,
}

impl Projection {
    pub fn get(&self, model: PublishingModel) -> &ModelResult {
        match model {
            PublishingModel::Trailguide => &self.trailguide,
            PublishingModel::Agency => &self.agency,
            PublishingModel::Diy => &self.diy,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (PublishingModel, &ModelResult)> {
        PublishingModel::ALL.into_iter().map(move |m| (m, self.get(m)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Achievability {
    pub achievable: bool,
    /// Visitors still missing; zero when achievable.
    pub visitor_gap: u64,
}
