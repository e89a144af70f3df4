// src/services/rate_tables.rs
use crate::models::{ConversionRates, ModelProfile, PricingStructure, PublishingModel};
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RateTableError {
    #[error("{model}: {field} must be in (0, 1], got {value}")]
    RateOutOfRange {
        model: PublishingModel,
        field: &'static str,
        value: f64,
    },

    #[error("{model}: {field} must be a finite non-negative amount, got {value}")]
    InvalidCost {
        model: PublishingModel,
        field: &'static str,
        value: f64,
    },

    #[error("{model}: revenueShare must be in [0, 1], got {value}")]
    RevenueShareOutOfRange { model: PublishingModel, value: f64 },

    #[error("failed to read rate table: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse rate table: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Conversion rates and pricing for every publishing model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    pub trailguide: ModelProfile,
    pub agency: ModelProfile,
    pub diy: ModelProfile,
}

impl RateTable {
    /// The fixed table the calculator widget ships with.
    pub fn standard() -> Self {
        RateTable {
            trailguide: ModelProfile {
                rates: ConversionRates {
                    site_to_subscriber: 0.025,
                    email_to_subscriber: 0.07,
                    visitor_to_email: 0.09,
                },
                pricing: PricingStructure {
                    build_cost: 1000.0,
                    monthly_base: 0.0,
                    revenue_share: 0.10,
                },
            },
            agency: ModelProfile {
                rates: ConversionRates {
                    site_to_subscriber: 0.01,
                    email_to_subscriber: 0.03,
                    visitor_to_email: 0.03,
                },
                pricing: PricingStructure {
                    build_cost: 75000.0,
                    monthly_base: 500.0,
                    revenue_share: 0.0,
                },
            },
            diy: ModelProfile {
                rates: ConversionRates {
                    site_to_subscriber: 0.01,
                    email_to_subscriber: 0.03,
                    visitor_to_email: 0.03,
                },
                pricing: PricingStructure {
                    build_cost: 0.0,
                    monthly_base: 350.0,
                    revenue_share: 0.0,
                },
            },
        }
    }

    pub fn profile(&self, model: PublishingModel) -> &ModelProfile {
        match model {
            PublishingModel::Trailguide => &self.trailguide,
            PublishingModel::Agency => &self.agency,
            PublishingModel::Diy => &self.diy,
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, RateTableError> {
        let table: RateTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RateTableError> {
        let path = path.as_ref();
        info!("Loading rate table from {}", path.display());
        let table = Self::from_json_str(&fs::read_to_string(path)?)?;
        info!("Rate table loaded from {}", path.display());
        Ok(table)
    }

    pub fn validate(&self) -> Result<(), RateTableError> {
        for model in PublishingModel::ALL {
            let profile = self.profile(model);
            let rates = &profile.rates;
            for (field, value) in [
                ("siteToSubscriber", rates.site_to_subscriber),
                ("emailToSubscriber", rates.email_to_subscriber),
                ("visitorToEmail", rates.visitor_to_email),
            ] {
                // NaN fails both comparisons, so it is rejected too
                if !(value > 0.0 && value <= 1.0) {
                    return Err(RateTableError::RateOutOfRange { model, field, value });
                }
            }

            let pricing = &profile.pricing;
            for (field, value) in [
                ("buildCost", pricing.build_cost),
                ("monthlyBase", pricing.monthly_base),
            ] {
                if !value.is_finite() || value < 0.0 {
                    return Err(RateTableError::InvalidCost { model, field, value });
                }
            }

            if !(pricing.revenue_share >= 0.0 && pricing.revenue_share <= 1.0) {
                return Err(RateTableError::RevenueShareOutOfRange {
                    model,
                    value: pricing.revenue_share,
                });
            }
        }
        Ok(())
    }
}
