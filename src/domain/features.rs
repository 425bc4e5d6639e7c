use crate::error::ScoringError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CustomerFeatures {
    #[serde(rename = "RevolvingUtilizationOfUnsecuredLines")]
    pub revolving_utilization_of_unsecured_lines: f64,
    pub age: i64,
    #[serde(rename = "NumberOfTime30_59DaysPastDueNotWorse")]
    pub number_of_time_30_59_days_past_due_not_worse: i64,
    #[serde(rename = "DebtRatio")]
    pub debt_ratio: f64,
    #[serde(rename = "MonthlyIncome")]
    pub monthly_income: f64,
    #[serde(rename = "NumberOfOpenCreditLinesAndLoans")]
    pub number_of_open_credit_lines_and_loans: i64,
    #[serde(rename = "NumberOfTimes90DaysLate")]
    pub number_of_times_90_days_late: i64,
    #[serde(rename = "NumberRealEstateLoansOrLines")]
    pub number_real_estate_loans_or_lines: i64,
    #[serde(rename = "NumberOfTime60_89DaysPastDueNotWorse")]
    pub number_of_time_60_89_days_past_due_not_worse: i64,
    #[serde(rename = "NumberOfDependents")]
    pub number_of_dependents: i64,
}

impl CustomerFeatures {
    pub fn validate(&self) -> Result<(), ScoringError> {
        non_negative_number(
            "RevolvingUtilizationOfUnsecuredLines",
            self.revolving_utilization_of_unsecured_lines,
        )?;
        positive_count("age", self.age)?;
        non_negative_count(
            "NumberOfTime30_59DaysPastDueNotWorse",
            self.number_of_time_30_59_days_past_due_not_worse,
        )?;
        non_negative_number("DebtRatio", self.debt_ratio)?;
        non_negative_number("MonthlyIncome", self.monthly_income)?;
        non_negative_count(
            "NumberOfOpenCreditLinesAndLoans",
            self.number_of_open_credit_lines_and_loans,
        )?;
        non_negative_count("NumberOfTimes90DaysLate", self.number_of_times_90_days_late)?;
        non_negative_count(
            "NumberRealEstateLoansOrLines",
            self.number_real_estate_loans_or_lines,
        )?;
        non_negative_count(
            "NumberOfTime60_89DaysPastDueNotWorse",
            self.number_of_time_60_89_days_past_due_not_worse,
        )?;
        non_negative_count("NumberOfDependents", self.number_of_dependents)?;
        Ok(())
    }
}

fn non_negative_number(field: &'static str, value: f64) -> Result<(), ScoringError> {
    if !value.is_finite() {
        return Err(ScoringError::Validation {
            field,
            reason: "must be a finite number".to_string(),
        });
    }
    if value < 0.0 {
        return Err(ScoringError::Validation {
            field,
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}

fn positive_count(field: &'static str, value: i64) -> Result<(), ScoringError> {
    if value < 1 {
        return Err(ScoringError::Validation {
            field,
            reason: format!("must be a positive integer, got {value}"),
        });
    }
    Ok(())
}

fn non_negative_count(field: &'static str, value: i64) -> Result<(), ScoringError> {
    if value < 0 {
        return Err(ScoringError::Validation {
            field,
            reason: format!("must be non-negative, got {value}"),
        });
    }
    Ok(())
}
