// src/bin/print_projection.rs
// Usage: print_projection [target_subscribers] [monthly_price] [estimated_visitors]
use anyhow::{Context, Result};
use log::info;
use publisher_roi::config::AppConfig;
use publisher_roi::models::CalculatorInput;
use publisher_roi::services::comparison::summarize;
use std::env;

fn arg_or<T: std::str::FromStr>(args: &[String], idx: usize, name: &str, default: T) -> Result<T>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match args.get(idx) {
        Some(raw) => raw.parse().with_context(|| format!("invalid {}: {:?}", name, raw)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::from_env()?;
    let calculator = config.build_calculator()?;
    let defaults = calculator.default_input();

    let args: Vec<String> = env::args().skip(1).collect();
    let input = CalculatorInput::new(
        arg_or(&args, 0, "target_subscribers", defaults.target_subscribers)?,
        arg_or(&args, 1, "monthly_price", defaults.monthly_price)?,
        arg_or(&args, 2, "estimated_visitors", defaults.estimated_visitors)?,
    );
    input.validate()?;
    info!("Projecting {:?}", input);

    let projection = calculator.recalculate(&input);
    let comparison = summarize(&input, &projection);

    println!("{}", calculator.settings().title);
    println!(
        "{} subscribers at ${:.2}/month, {} visitors/month today\n",
        input.target_subscribers, input.monthly_price, input.estimated_visitors
    );
    println!(
        "{:<12} {:>12} {:>12} {:>12} {:>12} {:>14} {:>12}",
        "model", "visitors", "email list", "build cost", "fees/mo", "net ROI/yr", "gap"
    );
    for (model, result) in projection.iter() {
        let reach = &comparison.achievability[&model];
        let gap = if reach.achievable {
            "on track".to_string()
        } else {
            reach.visitor_gap.to_string()
        };
        println!(
            "{:<12} {:>12} {:>12} {:>12.2} {:>12.2} {:>14.2} {:>12}",
            model.display_name(),
            result.visitors_needed,
            result.email_list_needed,
            result.build_cost,
            result.monthly_fees,
            result.net_roi,
            gap
        );
    }

    println!(
        "\nBest net ROI: {}. Fewest visitors needed: {}.",
        comparison.best_net_roi.display_name(),
        comparison.fewest_visitors_needed.display_name()
    );
    Ok(())
}
