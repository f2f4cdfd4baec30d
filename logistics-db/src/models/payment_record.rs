use chrono::{DateTime, SubsecRound, Utc};
use heapless::String as HeaplessString;
use logistics_api::domain::ledger::RevenueAmounts;
use logistics_api::domain::status::{PaymentMethod, PaymentType};
use logistics_api::domain::views::PaymentRecordView;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{CargoBatchModel, Identifiable};
use crate::utils::hash_as_i64;

/// # Documentation
/// - Immutable ledger line, either revenue of a distributed batch or an expense.
/// - Revenue lines are deleted, not voided, when the distribution is reversed.
/// - `hash` is computed once at insert time over the record with `hash = 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecordModel {
    pub id: Uuid,
    pub payment_type: PaymentType,
    pub batch_id: Option<Uuid>,
    pub batch_number: Option<HeaplessString<200>>,
    pub cargo_code: Option<HeaplessString<320>>,
    pub container_id: Option<Uuid>,
    pub sender_name: Option<HeaplessString<400>>,
    pub receiver_name: Option<HeaplessString<400>>,
    pub cargo_price: Decimal,
    pub storage_fee: Decimal,
    pub total_amount: Decimal,
    pub currency_code: HeaplessString<40>,
    pub payment_method: PaymentMethod,
    pub receiver_phone_verified: Option<HeaplessString<120>>,
    pub description: Option<String>,
    pub recorded_by: Uuid,
    pub payment_date: DateTime<Utc>,
    pub hash: i64,
    pub audit_log_id: Option<Uuid>,
}

/// Inputs of a revenue line besides the batch itself.
#[derive(Debug, Clone)]
pub struct RevenueDetails {
    pub cargo_code: Option<HeaplessString<320>>,
    pub amounts: RevenueAmounts,
    pub currency_code: HeaplessString<40>,
    pub payment_method: PaymentMethod,
    pub receiver_phone_verified: Option<HeaplessString<120>>,
}

impl PaymentRecordModel {
    pub fn revenue(
        batch: &CargoBatchModel,
        details: RevenueDetails,
        recorded_by: Uuid,
        payment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_type: PaymentType::Revenue,
            batch_id: Some(batch.id),
            batch_number: Some(batch.batch_number.clone()),
            cargo_code: details.cargo_code,
            container_id: Some(batch.container_id),
            sender_name: Some(batch.sender_name.clone()),
            receiver_name: Some(batch.receiver_name.clone()),
            cargo_price: details.amounts.cargo_price,
            storage_fee: details.amounts.storage_fee,
            total_amount: details.amounts.total_amount,
            currency_code: details.currency_code,
            payment_method: details.payment_method,
            receiver_phone_verified: details.receiver_phone_verified,
            description: None,
            recorded_by,
            payment_date,
            hash: 0,
            audit_log_id: None,
        }
    }

    pub fn expense(
        container_id: Option<Uuid>,
        amount: Decimal,
        currency_code: HeaplessString<40>,
        payment_method: PaymentMethod,
        description: String,
        recorded_by: Uuid,
        payment_date: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            payment_type: PaymentType::Expense,
            batch_id: None,
            batch_number: None,
            cargo_code: None,
            container_id,
            sender_name: None,
            receiver_name: None,
            cargo_price: Decimal::ZERO,
            storage_fee: Decimal::ZERO,
            total_amount: amount,
            currency_code,
            payment_method,
            receiver_phone_verified: None,
            description: Some(description),
            recorded_by,
            payment_date,
            hash: 0,
            audit_log_id: None,
        }
    }

    /// The record as hashed: `hash` zeroed, amounts without trailing zeros and
    /// the timestamp at the microsecond precision Postgres keeps.
    fn hash_basis(&self) -> Self {
        let mut basis = self.clone();
        basis.hash = 0;
        basis.cargo_price = basis.cargo_price.normalize();
        basis.storage_fee = basis.storage_fee.normalize();
        basis.total_amount = basis.total_amount.normalize();
        basis.payment_date = basis.payment_date.trunc_subsecs(6);
        basis
    }

    /// Stamps the audit log and computes the tamper hash.
    pub fn seal(&mut self, audit_log_id: Option<Uuid>) -> Result<(), String> {
        self.audit_log_id = audit_log_id;
        self.hash = hash_as_i64(&self.hash_basis())?;
        Ok(())
    }

    /// True when the stored hash still matches the record's content.
    pub fn verify_hash(&self) -> Result<bool, String> {
        Ok(hash_as_i64(&self.hash_basis())? == self.hash)
    }

    pub fn to_view(&self) -> PaymentRecordView {
        PaymentRecordView {
            id: self.id,
            payment_type: self.payment_type,
            payment_method: self.payment_method,
            batch_id: self.batch_id,
            batch_number: self.batch_number.as_ref().map(|b| b.to_string()),
            cargo_code: self.cargo_code.as_ref().map(|c| c.to_string()),
            container_id: self.container_id,
            sender_name: self.sender_name.as_ref().map(|s| s.to_string()),
            receiver_name: self.receiver_name.as_ref().map(|s| s.to_string()),
            cargo_price: self.cargo_price,
            storage_fee: self.storage_fee,
            total_amount: self.total_amount,
            currency_code: self.currency_code.to_string(),
            receiver_phone_verified: self.receiver_phone_verified.as_ref().map(|p| p.to_string()),
            description: self.description.clone(),
            recorded_by: self.recorded_by,
            payment_date: self.payment_date,
        }
    }
}

impl Identifiable for PaymentRecordModel {
    fn get_id(&self) -> Uuid {
        self.id
    }
}
