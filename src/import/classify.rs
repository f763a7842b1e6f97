use super::{Field, FieldMappings, Record};

const CUSTOMER_FIELDS: &[Field] = &[Field::CustomerName, Field::CustomerId];
const SALE_FIELDS: &[Field] = &[
    Field::Description,
    Field::Quantity,
    Field::UnitPrice,
    Field::IncomeAccount,
    Field::SaleDate,
    Field::Currency,
];
const PAYMENT_FIELDS: &[Field] = &[Field::PaymentAmount, Field::PaymentDate];

fn has_all(mappings: &FieldMappings, record: &Record, fields: &[Field]) -> bool {
    fields
        .iter()
        .all(|field| mappings.resolve(*field, record).is_some())
}

/// Whether the record has everything needed to build a sale. It may still fail to parse.
pub fn is_valid_sale_record(mappings: &FieldMappings, record: &Record) -> bool {
    has_all(mappings, record, CUSTOMER_FIELDS) && has_all(mappings, record, SALE_FIELDS)
}

/// Whether the record has everything needed to build a payment. It may still fail to parse.
pub fn is_valid_payment_record(mappings: &FieldMappings, record: &Record) -> bool {
    has_all(mappings, record, CUSTOMER_FIELDS) && has_all(mappings, record, PAYMENT_FIELDS)
}

pub fn is_valid_record(mappings: &FieldMappings, record: &Record) -> bool {
    is_valid_sale_record(mappings, record) || is_valid_payment_record(mappings, record)
}
