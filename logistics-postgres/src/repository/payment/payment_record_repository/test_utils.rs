use chrono::Utc;
use heapless::String as HeaplessString;
use logistics_api::domain::status::PaymentMethod;
use logistics_db::models::PaymentRecordModel;
use rust_decimal::Decimal;
use uuid::Uuid;

pub fn create_test_expense(container_id: Option<Uuid>, amount: i64) -> PaymentRecordModel {
    PaymentRecordModel::expense(
        container_id,
        Decimal::from(amount),
        HeaplessString::try_from("KRW").unwrap(),
        PaymentMethod::Cash,
        "customs broker".to_string(),
        Uuid::new_v4(),
        Utc::now(),
    )
}
