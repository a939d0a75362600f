//! JSON round-trip coverage for assembled document values.

use chrono::NaiveDate;
use docforge_model::{
    AccountLedger, AccountNumber, BankInfo, BankStatement, Direction, Document, DocumentId,
    FinancialTotals, Invoice, InvoiceNumber, LineItem, PageSpan, Party, PostedTransaction,
    SortCode, Transaction,
};
use docforge_model::{round_minor, Currency};
use rust_decimal::Decimal;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn sample_invoice() -> Document {
    let items = vec![
        LineItem::new("Security Audit - April", dec("2"), dec("10.00")),
        LineItem::new("Software License", dec("1"), dec("5.00")),
        LineItem::new("Cloud Hosting - April", dec("3"), dec("7.00")),
    ];
    let subtotal: Decimal = items.iter().map(|item| item.amount).sum();
    let tax_rate = dec("0.20");
    let tax_amount = round_minor(subtotal * tax_rate);
    let closing: Decimal = items.iter().map(|item| item.amount).sum();
    Document::Invoice(Invoice {
        id: DocumentId::from_random_bytes([7; 16]),
        number: InvoiceNumber::parse("INV-0042-AB12").unwrap(),
        issued_on: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
        due_on: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
        sender: Party {
            name: "Northwind Consulting".to_string(),
            address: "12 High Street, Leeds, L12 4XY".to_string(),
        },
        recipient: Party {
            name: "Grace Walker".to_string(),
            address: "3 Mill Lane, Bristol, B4 2ZQ".to_string(),
        },
        currency: Currency::Gbp,
        totals: FinancialTotals {
            subtotal,
            tax_rate,
            tax_amount,
            total: subtotal + tax_amount,
        },
        pages: vec![PageSpan {
            start: 0,
            end: items.len(),
            opening_balance: Decimal::ZERO,
            closing_balance: closing,
        }],
        items,
    })
}

fn sample_statement() -> Document {
    let opening = dec("100.00");
    let transactions = vec![
        Transaction {
            posted_on: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            description: "Card Purchase - Greggs".to_string(),
            direction: Direction::Debit,
            amount: dec("20.00"),
        },
        Transaction {
            posted_on: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
            description: "BACS Credit - Oliver Smith".to_string(),
            direction: Direction::Credit,
            amount: dec("50.00"),
        },
    ];
    let posted: Vec<PostedTransaction> = {
        let mut balance = opening;
        transactions
            .into_iter()
            .map(|transaction| {
                balance += transaction.signed_amount();
                PostedTransaction {
                    transaction,
                    running_balance: balance,
                }
            })
            .collect()
    };
    let closing = posted.last().unwrap().running_balance;
    Document::BankStatement(BankStatement {
        id: DocumentId::from_random_bytes([9; 16]),
        bank: BankInfo {
            bank_name: "Starling Bank".to_string(),
            account_holder: "Emily Davies".to_string(),
            account_number: AccountNumber::parse("12345678").unwrap(),
            sort_code: SortCode::parse("20-41-33").unwrap(),
        },
        period_start: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
        period_end: NaiveDate::from_ymd_opt(2024, 3, 31).unwrap(),
        currency: Currency::Gbp,
        pages: vec![PageSpan {
            start: 0,
            end: 2,
            opening_balance: opening,
            closing_balance: closing,
        }],
        ledger: AccountLedger {
            opening_balance: opening,
            closing_balance: closing,
            transactions: posted,
        },
    })
}

#[test]
fn test_invoice_round_trips_through_json() {
    let document = sample_invoice();
    let text = serde_json::to_string_pretty(&document).unwrap();
    let restored: Document = serde_json::from_str(&text).unwrap();
    assert_eq!(restored, document);
}

#[test]
fn test_statement_round_trips_through_json() {
    let document = sample_statement();
    let text = serde_json::to_string(&document).unwrap();
    let restored: Document = serde_json::from_str(&text).unwrap();
    assert_eq!(restored, document);
}

#[test]
fn test_document_json_carries_the_type_tag() {
    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&sample_invoice()).unwrap()).unwrap();
    assert_eq!(value["doc_type"], "invoice");
    assert!(value["totals"]["total"].is_string());

    let value: serde_json::Value =
        serde_json::from_str(&serde_json::to_string(&sample_statement()).unwrap()).unwrap();
    assert_eq!(value["doc_type"], "bank_statement");
    // Posted transactions flatten their balance next to the raw fields.
    assert!(value["ledger"]["transactions"][0]["running_balance"].is_string());
    assert_eq!(value["ledger"]["transactions"][0]["direction"], "debit");
}