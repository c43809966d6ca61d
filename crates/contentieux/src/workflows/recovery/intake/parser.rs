use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use super::super::domain::{CaseId, Payment, PaymentId, PaymentStatus};
use super::ImportError;

pub(crate) fn parse_payments<R: Read>(reader: R) -> Result<Vec<Payment>, ImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut payments = Vec::new();

    for (index, record) in csv_reader.deserialize::<PaymentRow>().enumerate() {
        // header occupies line 1
        let line = index + 2;
        let row = record?;
        payments.push(row.into_payment(line)?);
    }

    Ok(payments)
}

#[derive(Debug, Deserialize)]
struct PaymentRow {
    #[serde(rename = "Payment ID")]
    payment_id: String,
    #[serde(rename = "Case ID")]
    case_id: String,
    #[serde(rename = "Amount", default, deserialize_with = "empty_string_as_none")]
    amount: Option<String>,
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Status", default)]
    status: String,
}

impl PaymentRow {
    fn into_payment(self, line: usize) -> Result<Payment, ImportError> {
        let raw_amount = self.amount.ok_or(ImportError::MissingAmount { line })?;
        let amount = Decimal::from_str(&raw_amount).map_err(|_| ImportError::InvalidAmount {
            line,
            value: raw_amount,
        })?;

        let date = parse_date(&self.date).ok_or_else(|| ImportError::InvalidDate {
            line,
            value: self.date.clone(),
        })?;

        // legacy exports carry French status labels
        let status = match self.status.to_ascii_lowercase().as_str() {
            "validated" | "valide" => PaymentStatus::Validated,
            "pending" | "en_attente" => PaymentStatus::Pending,
            _ => PaymentStatus::Other,
        };

        Ok(Payment {
            id: PaymentId(self.payment_id),
            case_id: CaseId(self.case_id),
            amount,
            date,
            status,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc().date());
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok()
}
