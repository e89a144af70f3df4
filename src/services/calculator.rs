// src/services/calculator.rs
use crate::models::{
    CalculatorInput, Projection, ESTIMATED_VISITORS_MAX, ESTIMATED_VISITORS_MIN, MONTHLY_PRICE_MAX,
    MONTHLY_PRICE_MIN, TARGET_SUBSCRIBERS_MAX, TARGET_SUBSCRIBERS_MIN,
};
use crate::services::calculations::compute;
use crate::services::rate_tables::RateTable;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_TITLE: &str = "Publishing Platform ROI Calculator";
pub const DEFAULT_DESCRIPTION: &str = "See the traffic, list size and net return each publishing model needs to hit your subscriber goal.";

/// Called after every recalculation with the input and its projection.
pub type Observer = Box<dyn Fn(&CalculatorInput, &Projection) + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorSettings {
    pub title: String,
    pub description: String,
    pub default_input: CalculatorInput,
}

impl Default for CalculatorSettings {
    fn default() -> Self {
        CalculatorSettings {
            title: DEFAULT_TITLE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
            default_input: CalculatorInput::new(1000, 10.0, 50_000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bounds<T> {
    pub min: T,
    pub max: T,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SliderBounds {
    pub target_subscribers: Bounds<u32>,
    pub monthly_price: Bounds<f64>,
    pub estimated_visitors: Bounds<u64>,
}

pub const SLIDER_BOUNDS: SliderBounds = SliderBounds {
    target_subscribers: Bounds { min: TARGET_SUBSCRIBERS_MIN, max: TARGET_SUBSCRIBERS_MAX },
    monthly_price: Bounds { min: MONTHLY_PRICE_MIN, max: MONTHLY_PRICE_MAX },
    estimated_visitors: Bounds { min: ESTIMATED_VISITORS_MIN, max: ESTIMATED_VISITORS_MAX },
};

pub struct Calculator {
    settings: CalculatorSettings,
    table: RateTable,
    observers: Vec<Observer>,
}

impl fmt::Debug for Calculator {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Calculator")
            .field("settings", &self.settings)
            .field("table", &self.table)
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl Calculator {
    pub fn new(settings: CalculatorSettings, table: RateTable) -> Self {
        Calculator {
            settings,
            table,
            observers: Vec::new(),
        }
    }

    pub fn with_observer<F>(mut self, observer: F) -> Self
    where
        F: Fn(&CalculatorInput, &Projection) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
        self
    }

    pub fn settings(&self) -> &CalculatorSettings {
        &self.settings
    }

    pub fn rate_table(&self) -> &RateTable {
        &self.table
    }

    pub fn default_input(&self) -> CalculatorInput {
        self.settings.default_input
    }

    pub fn recalculate(&self, input: &CalculatorInput) -> Projection {
        let projection = compute(input, &self.table);
        for observer in &self.observers {
            observer(input, &projection);
        }
        projection
    }
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new(CalculatorSettings::default(), RateTable::standard())
    }
}
