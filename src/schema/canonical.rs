use crate::domain::features::CustomerFeatures;
use crate::error::ScoringError;

pub const CANONICAL_FEATURES: [&str; 10] = [
    "RevolvingUtilizationOfUnsecuredLines",
    "age",
    "NumberOfTime30-59DaysPastDueNotWorse",
    "DebtRatio",
    "MonthlyIncome",
    "NumberOfOpenCreditLinesAndLoans",
    "NumberOfTimes90DaysLate",
    "NumberRealEstateLoansOrLines",
    "NumberOfTime60-89DaysPastDueNotWorse",
    "NumberOfDependents",
];

// External payload names use `_` where the model was trained on `-`.
pub const RENAME_TABLE: [(&str, &str); 2] = [
    (
        "NumberOfTime30_59DaysPastDueNotWorse",
        "NumberOfTime30-59DaysPastDueNotWorse",
    ),
    (
        "NumberOfTime60_89DaysPastDueNotWorse",
        "NumberOfTime60-89DaysPastDueNotWorse",
    ),
];

pub fn canonical_name(external: &'static str) -> &'static str {
    RENAME_TABLE
        .iter()
        .find(|(ext, _)| *ext == external)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(external)
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalFeatureVector {
    pub names: Vec<String>,
    pub values: Vec<f64>,
}

pub fn canonicalize(
    input: &CustomerFeatures,
    expected_columns: &[String],
) -> Result<CanonicalFeatureVector, ScoringError> {
    input.validate()?;

    let pairs: Vec<(&'static str, f64)> = external_pairs(input)
        .into_iter()
        .map(|(name, value)| (canonical_name(name), value))
        .collect();

    if expected_columns.len() != pairs.len() {
        return Err(schema_mismatch(expected_columns, &pairs));
    }

    let mut values = Vec::with_capacity(expected_columns.len());
    for column in expected_columns {
        match pairs.iter().find(|(name, _)| name == column) {
            Some((_, value)) => values.push(*value),
            None => return Err(schema_mismatch(expected_columns, &pairs)),
        }
    }

    Ok(CanonicalFeatureVector {
        names: expected_columns.to_vec(),
        values,
    })
}

fn external_pairs(input: &CustomerFeatures) -> Vec<(&'static str, f64)> {
    vec![
        (
            "RevolvingUtilizationOfUnsecuredLines",
            input.revolving_utilization_of_unsecured_lines,
        ),
        ("age", input.age as f64),
        (
            "NumberOfTime30_59DaysPastDueNotWorse",
            input.number_of_time_30_59_days_past_due_not_worse as f64,
        ),
        ("DebtRatio", input.debt_ratio),
        ("MonthlyIncome", input.monthly_income),
        (
            "NumberOfOpenCreditLinesAndLoans",
            input.number_of_open_credit_lines_and_loans as f64,
        ),
        (
            "NumberOfTimes90DaysLate",
            input.number_of_times_90_days_late as f64,
        ),
        (
            "NumberRealEstateLoansOrLines",
            input.number_real_estate_loans_or_lines as f64,
        ),
        (
            "NumberOfTime60_89DaysPastDueNotWorse",
            input.number_of_time_60_89_days_past_due_not_worse as f64,
        ),
        ("NumberOfDependents", input.number_of_dependents as f64),
    ]
}

fn schema_mismatch(expected_columns: &[String], pairs: &[(&'static str, f64)]) -> ScoringError {
    ScoringError::SchemaMismatch {
        expected: expected_columns.to_vec(),
        actual: pairs.iter().map(|(name, _)| name.to_string()).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn features() -> CustomerFeatures {
        CustomerFeatures {
            revolving_utilization_of_unsecured_lines: 0.5,
            age: 45,
            number_of_time_30_59_days_past_due_not_worse: 1,
            debt_ratio: 0.4,
            monthly_income: 6000.0,
            number_of_open_credit_lines_and_loans: 5,
            number_of_times_90_days_late: 0,
            number_real_estate_loans_or_lines: 1,
            number_of_time_60_89_days_past_due_not_worse: 0,
            number_of_dependents: 2,
        }
    }

    fn model_columns() -> Vec<String> {
        CANONICAL_FEATURES.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rename_table_covers_only_the_past_due_counters() {
        assert_eq!(
            canonical_name("NumberOfTime30_59DaysPastDueNotWorse"),
            "NumberOfTime30-59DaysPastDueNotWorse"
        );
        assert_eq!(
            canonical_name("NumberOfTime60_89DaysPastDueNotWorse"),
            "NumberOfTime60-89DaysPastDueNotWorse"
        );
        assert_eq!(canonical_name("age"), "age");
        assert_eq!(canonical_name("DebtRatio"), "DebtRatio");
    }

    #[test]
    fn canonicalize_orders_values_by_model_columns() {
        let vec = canonicalize(&features(), &model_columns()).unwrap();
        assert_eq!(vec.names, model_columns());
        assert_eq!(
            vec.values,
            vec![0.5, 45.0, 1.0, 0.4, 6000.0, 5.0, 0.0, 1.0, 0.0, 2.0]
        );
    }

    #[test]
    fn canonicalize_follows_an_arbitrary_column_order() {
        let mut columns = model_columns();
        columns.reverse();
        let vec = canonicalize(&features(), &columns).unwrap();
        assert_eq!(vec.names, columns);
        assert_eq!(vec.values[0], 2.0);
        assert_eq!(vec.values[9], 0.5);
    }

    #[test]
    fn missing_model_column_is_a_schema_mismatch() {
        let columns: Vec<String> = model_columns().into_iter().skip(1).collect();
        match canonicalize(&features(), &columns) {
            Err(ScoringError::SchemaMismatch { expected, actual }) => {
                assert_eq!(expected.len(), 9);
                assert_eq!(actual.len(), 10);
            }
            other => panic!("expected schema mismatch, got {other:?}"),
        }
    }

    #[test]
    fn unknown_model_column_is_a_schema_mismatch() {
        let mut columns = model_columns();
        columns[3] = "UtterlyUnknownColumn".to_string();
        assert!(matches!(
            canonicalize(&features(), &columns),
            Err(ScoringError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn validation_runs_before_schema_checks() {
        let mut f = features();
        f.age = -5;
        // even with broken columns, the caller's payload error wins
        let columns: Vec<String> = Vec::new();
        assert!(matches!(
            canonicalize(&f, &columns),
            Err(ScoringError::Validation { field: "age", .. })
        ));
    }
}
