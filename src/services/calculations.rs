// src/services/calculations.rs
use crate::models::{Achievability, CalculatorInput, ModelProfile, ModelResult, Projection, PublishingModel};
use crate::services::rate_tables::RateTable;
use log::debug;

const MONTHS_PER_YEAR: f64 = 12.0;

/// Audience needed at the stage with conversion `rate` to end up with `target` subscribers.
fn audience_needed(target: u32, rate: f64) -> u64 {
    (target as f64 / rate).ceil() as u64
}

/// Projects one publishing model. Total over any input; callers validate
/// with [`CalculatorInput::validate`] before trusting the numbers.
pub fn project_model(input: &CalculatorInput, profile: &ModelProfile) -> ModelResult {
    let rates = &profile.rates;
    let pricing = &profile.pricing;

    let visitors_needed = audience_needed(input.target_subscribers, rates.site_to_subscriber);
    let email_list_needed = audience_needed(input.target_subscribers, rates.email_to_subscriber);

    let monthly_revenue = input.target_subscribers as f64 * input.monthly_price;
    let monthly_fees = pricing.monthly_base + monthly_revenue * pricing.revenue_share;

    let annual_revenue = monthly_revenue * MONTHS_PER_YEAR;
    let annual_fees = monthly_fees * MONTHS_PER_YEAR;
    let net_roi = annual_revenue - pricing.build_cost - annual_fees;

    ModelResult {
        visitors_needed,
        email_list_needed,
        build_cost: pricing.build_cost,
        monthly_fees,
        revenue: monthly_revenue,
        net_roi,
        conversion_rate: rates.site_to_subscriber * 100.0,
        email_conversion_rate: rates.email_to_subscriber * 100.0,
    }
}

pub fn compute(input: &CalculatorInput, table: &RateTable) -> Projection {
    let [trailguide, agency, diy] = PublishingModel::ALL.map(|model| {
        let result = project_model(input, table.profile(model));
        debug!(
            "{}: visitors_needed={} email_list_needed={} monthly_fees={:.2} net_roi={:.2}",
            model, result.visitors_needed, result.email_list_needed, result.monthly_fees, result.net_roi
        );
        result
    });

    Projection { trailguide, agency, diy }
}

pub fn achievability(estimated_visitors: u64, result: &ModelResult) -> Achievability {
    Achievability {
        achievable: estimated_visitors >= result.visitors_needed,
        visitor_gap: result.visitors_needed.saturating_sub(estimated_visitors),
    }
}
