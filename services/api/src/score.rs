use clap::Args;
use receipt_points::error::AppError;
use receipt_points::receipts::{score_receipt, PointsOutcome, Receipt};
use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Receipt JSON file to score (use `-` to read from stdin)
    pub(crate) receipt: PathBuf,
    /// Print the points awarded by each rule
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let outcome = score_file(&args.receipt)?;
    print!("{}", render_outcome(&outcome, args.breakdown));
    Ok(())
}

fn read_receipt(path: &Path) -> Result<Receipt, AppError> {
    let raw = if path == Path::new("-") {
        let mut buffer = Vec::new();
        std::io::stdin().read_to_end(&mut buffer)?;
        buffer
    } else {
        std::fs::read(path)?
    };

    Ok(serde_json::from_slice(&raw)?)
}

pub(crate) fn score_file(path: &Path) -> Result<PointsOutcome, AppError> {
    let receipt = read_receipt(path)?;
    let outcome = score_receipt(&receipt)?;
    Ok(outcome)
}

pub(crate) fn render_outcome(outcome: &PointsOutcome, breakdown: bool) -> String {
    let mut output = format!("Points: {}\n", outcome.points);

    if breakdown {
        output.push_str("\nRule breakdown\n");
        if outcome.components.is_empty() {
            output.push_str("- no rules awarded points\n");
        }
        for component in &outcome.components {
            let _ = writeln!(
                output,
                "- {}: +{} ({})",
                component.rule.label(),
                component.points,
                component.notes
            );
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use receipt_points::receipts::{PointsRule, ScoreComponent};
    use serde_json::json;

    fn fixture_path() -> PathBuf {
        std::env::temp_dir().join(format!("receipt-{}.json", uuid::Uuid::new_v4()))
    }

    fn write_receipt(contents: &str) -> PathBuf {
        let path = fixture_path();
        std::fs::write(&path, contents).expect("write receipt fixture");
        path
    }

    #[test]
    fn scores_receipt_file() {
        let path = write_receipt(
            &json!({
                "retailer": "Target",
                "purchaseDate": "2022-01-01",
                "purchaseTime": "13:01",
                "items": [
                    { "shortDescription": "Mountain Dew 12PK", "price": "6.49" },
                    { "shortDescription": "Emils Cheese Pizza", "price": "12.25" },
                    { "shortDescription": "Knorr Creamy Chicken", "price": "1.26" },
                    { "shortDescription": "Doritos Nacho Cheese", "price": "3.35" },
                    { "shortDescription": "   Klarbrunn 12-PK 12 FL OZ  ", "price": "12.00" }
                ],
                "total": "35.35"
            })
            .to_string(),
        );

        let outcome = score_file(&path).expect("receipt scores");
        std::fs::remove_file(&path).ok();

        assert_eq!(outcome.points, 28);
    }

    #[test]
    fn invalid_receipt_file_is_reported() {
        let path = write_receipt(r#"{ "retailer": "Target" }"#);

        let result = score_file(&path);
        std::fs::remove_file(&path).ok();

        match result {
            Err(AppError::Receipt(err)) => assert!(err.is_invalid_payload()),
            other => panic!("expected receipt error, got {other:?}"),
        }
    }

    #[test]
    fn malformed_json_is_a_payload_error() {
        let path = write_receipt("{ not json");

        let result = score_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(matches!(result, Err(AppError::Payload(_))));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let path = fixture_path();
        assert!(matches!(score_file(&path), Err(AppError::Io(_))));
    }

    #[test]
    fn breakdown_lists_each_rule() {
        let outcome = PointsOutcome {
            points: 16,
            components: vec![
                ScoreComponent {
                    rule: PointsRule::RetailerName,
                    points: 6,
                    notes: "6 alphanumeric character(s) in `Target`".to_string(),
                },
                ScoreComponent {
                    rule: PointsRule::AfternoonPurchase,
                    points: 10,
                    notes: "purchased at 14:33".to_string(),
                },
            ],
        };

        assert_eq!(render_outcome(&outcome, false), "Points: 16\n");
        let rendered = render_outcome(&outcome, true);
        assert!(rendered.contains("- retailer name: +6"));
        assert!(rendered.contains("- purchase between 2pm and 4pm: +10 (purchased at 14:33)"));
    }
}
