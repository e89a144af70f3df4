// src/services/comparison.rs
use crate::models::{Achievability, CalculatorInput, ModelResult, Projection, PublishingModel};
use crate::services::calculations::achievability;
use serde::Serialize;
use std::collections::BTreeMap;

/// Side-by-side summary the comparison cards are rendered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Comparison {
    pub best_net_roi: PublishingModel,
    pub fewest_visitors_needed: PublishingModel,
    pub achievability: BTreeMap<PublishingModel, Achievability>,
}

/// First model in `PublishingModel::ALL` order that wins under `better`.
fn pick(projection: &Projection, better: impl Fn(&ModelResult, &ModelResult) -> bool) -> PublishingModel {
    let mut best = PublishingModel::ALL[0];
    for (model, result) in projection.iter().skip(1) {
        if better(result, projection.get(best)) {
            best = model;
        }
    }
    best
}

pub fn summarize(input: &CalculatorInput, projection: &Projection) -> Comparison {
    Comparison {
        best_net_roi: pick(projection, |a, b| a.net_roi > b.net_roi),
        fewest_visitors_needed: pick(projection, |a, b| a.visitors_needed < b.visitors_needed),
        achievability: projection
            .iter()
            .map(|(model, result)| (model, achievability(input.estimated_visitors, result)))
            .collect(),
    }
}
