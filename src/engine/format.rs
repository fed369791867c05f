//! Text rendering of a recommendation for the CLI.

use crate::models::recommendation::{Recommendation, TargetSet};

const RULE: &str = "═══════════════════════════════════════════════════════════════";

/// Render a recommendation as a boxed terminal report.
pub fn render_text(rec: &Recommendation) -> String {
    let mut out = String::new();

    out.push_str("╔══════════════════════════════════════════════════════════════╗\n");
    out.push_str("║                   BITCOIN PORTFOLIO ADVISOR                  ║\n");
    out.push_str("╚══════════════════════════════════════════════════════════════╝\n\n");
    out.push_str(&format!("Date/Time: {}\n", rec.timestamp.to_rfc3339()));
    out.push_str(&format!("Current BTC Price: ${:.2}\n\n", rec.current_price));
    out.push_str(RULE);
    out.push('\n');

    if let Some(alert_type) = &rec.alert_type {
        out.push_str(&format!("\n{}\n{}\n\n", alert_type.to_uppercase(), rec.reasoning));
        out.push_str(RULE);
        out.push('\n');
        return out;
    }

    out.push_str(&format!(
        "\nRECOMMENDATION: {}\n",
        rec.recommendation.as_str().replace('_', " ").to_uppercase()
    ));
    out.push_str(&format!("Confidence Level: {:.0}%\n", rec.confidence * 100.0));
    if let Some(score) = rec.composite_score {
        out.push_str(&format!("Composite Score: {:+.3}\n", score));
    }
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');

    if let (Some(bundle), Some(weights)) = (&rec.factor_scores, &rec.factor_weights) {
        out.push_str("\nANALYSIS BREAKDOWN:\n\n");
        let weight_of = |name: &str| match name {
            "rsi" => weights.rsi,
            "moving_averages" => weights.moving_averages,
            "power_law" => weights.power_law,
            "macd" => weights.macd,
            _ => weights.sentiment,
        };
        for (name, factor) in bundle.ordered() {
            out.push_str(&format!(
                "{:<16} {:+.2}  ({:.0}% weight)  {}\n",
                name,
                factor.score,
                weight_of(name) * 100.0,
                factor.label
            ));
        }
        out.push('\n');
        out.push_str(RULE);
        out.push('\n');
    }

    out.push_str(&format!("\nREASONING:\n{}\n\n", rec.reasoning));
    out.push_str(RULE);
    out.push('\n');

    out.push_str("\nSUGGESTED TARGETS:\n");
    match &rec.targets {
        TargetSet::Directional {
            entry,
            target_1,
            target_2,
            stop_loss,
        } => {
            out.push_str(&format!(
                "Entry: ${:.2}, Target 1: ${:.2}, Target 2: ${:.2}, Stop: ${:.2}\n",
                entry, target_1, target_2, stop_loss
            ));
        }
        TargetSet::Neutral {
            entry,
            support,
            resistance,
        } => {
            out.push_str(&format!(
                "Entry: ${:.2}, Support: ${:.2}, Resistance: ${:.2}\n",
                entry, support, resistance
            ));
        }
    }
    out.push_str(RULE);
    out.push('\n');
    out.push_str("DISCLAIMER: For educational purposes only. Not financial advice.\n");

    out
}
