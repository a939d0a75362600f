use std::collections::HashSet;

use chrono::{Duration, NaiveDate, NaiveDateTime};
use docforge_model::{
    BankInfo, Direction, Party, PaymentMethod, StoreInfo, Transaction,
};
use docforge_model::{AccountNumber, SortCode};
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rust_decimal::Decimal;

use crate::config::BatchConfig;

/// Bounded number of re-draws for a document-local constraint before the
/// document is abandoned as `ExhaustedRetries`.
pub const MAX_DRAW_RETRIES: usize = 16;

/// A document-local draw constraint that could not be satisfied within
/// [`MAX_DRAW_RETRIES`] attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryExhausted {
    /// Name of the unsatisfiable constraint.
    pub constraint: &'static str,
}

/// Unvalidated raw line item: exact quantity/unit pair, no derived amount.
#[derive(Debug, Clone, PartialEq)]
pub struct RawItem {
    /// Drawn description text.
    pub description: String,
    /// Strictly positive quantity.
    pub quantity: Decimal,
    /// Strictly positive unit price.
    pub unit_price: Decimal,
}

/// Raw invoice fields before consistency computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawInvoice {
    /// Drawn invoice number text (validated downstream).
    pub number: String,
    /// Issue date.
    pub issued_on: NaiveDate,
    /// Due date, issue date plus drawn payment terms.
    pub due_on: NaiveDate,
    /// Issuing party.
    pub sender: Party,
    /// Billed party.
    pub recipient: Party,
    /// Drawn line items.
    pub items: Vec<RawItem>,
    /// Tax rate drawn from the configured discrete set.
    pub tax_rate: Decimal,
}

/// Raw receipt fields before consistency computation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawReceipt {
    /// Drawn receipt number text (validated downstream).
    pub number: String,
    /// Till timestamp.
    pub issued_at: NaiveDateTime,
    /// Issuing store.
    pub store: StoreInfo,
    /// Payment method.
    pub payment: PaymentMethod,
    /// Drawn line items.
    pub items: Vec<RawItem>,
    /// Tax rate drawn from the configured discrete set.
    pub tax_rate: Decimal,
}

/// Raw statement fields before balance derivation.
#[derive(Debug, Clone, PartialEq)]
pub struct RawStatement {
    /// Bank and account descriptors.
    pub bank: BankInfo,
    /// First day of the statement period.
    pub period_start: NaiveDate,
    /// Last day of the statement period.
    pub period_end: NaiveDate,
    /// Balance before the first transaction.
    pub opening_balance: Decimal,
    /// Transactions in ascending date order, balances not yet derived.
    pub transactions: Vec<Transaction>,
}

const SERVICES: &[&str] = &[
    "Consulting Services",
    "Web Development",
    "Database Optimization",
    "API Integration",
    "Cloud Hosting",
    "Security Audit",
    "UI/UX Design",
    "Maintenance Retainer",
    "Code Review",
    "Performance Testing",
    "Technical Documentation",
    "DevOps Support",
    "Data Migration",
    "Mobile App Development",
    "System Architecture",
];

const PRODUCTS: &[&str] = &[
    "Software License",
    "Hardware Component",
    "Server Access",
    "Cloud Storage",
    "API Credits",
    "Premium Support",
    "Training Materials",
    "Documentation Package",
    "Development Tools",
    "Monitoring Service",
];

const MONTHS: &[&str] = &[
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const GROCERY_ITEMS: &[&str] = &[
    "Semi-Skimmed Milk 2L",
    "Wholemeal Bread",
    "Free Range Eggs 12pk",
    "Cheddar Cheese 400g",
    "Bananas 1kg",
    "Chicken Breast 600g",
    "Basmati Rice 1kg",
    "Orange Juice 1L",
    "Penne Pasta 500g",
    "Chopped Tomatoes 400g",
    "Ground Coffee 227g",
    "Tea Bags 80pk",
    "Butter 250g",
    "Greek Yoghurt 500g",
    "Porridge Oats 1kg",
    "Apples 6pk",
    "Sparkling Water 1.5L",
    "Dark Chocolate 100g",
    "Olive Oil 500ml",
    "Tomato Soup 400g",
    "Toilet Roll 4pk",
    "Washing Up Liquid 500ml",
    "Kitchen Towel 2pk",
    "Granola 500g",
];

const COMPANY_STEMS: &[&str] = &[
    "Acme", "Northwind", "Bluefield", "Ironside", "Crestline", "Harborview", "Stonegate",
    "Fairmont", "Westbrook", "Kingsley", "Ashford", "Granite Peak",
];

const COMPANY_SUFFIXES: &[&str] = &["Ltd", "PLC", "Consulting", "Holdings", "Solutions", "Partners"];

const FIRST_NAMES: &[&str] = &[
    "Oliver", "Amelia", "Jack", "Isla", "Harry", "Emily", "George", "Sophie", "Thomas", "Grace",
    "Daniel", "Chloe",
];

const LAST_NAMES: &[&str] = &[
    "Smith", "Jones", "Taylor", "Brown", "Williams", "Wilson", "Davies", "Evans", "Thomas",
    "Johnson", "Roberts", "Walker",
];

const STREETS: &[&str] = &[
    "High Street",
    "Station Road",
    "Church Lane",
    "Victoria Road",
    "Mill Lane",
    "London Road",
    "Park Avenue",
    "Queensway",
];

const CITIES: &[&str] = &[
    "London",
    "Manchester",
    "Leeds",
    "Bristol",
    "Sheffield",
    "Liverpool",
    "Newcastle",
    "Nottingham",
];

const STORES: &[&str] = &[
    "Albion Mini Market",
    "Corner Grocers",
    "Daily Essentials",
    "The Pantry",
    "Greenway Foods",
    "Market Street Stores",
    "Oakfield Convenience",
    "Riverside Newsagents",
];

const BANKS: &[&str] = &[
    "Barclays Bank",
    "HSBC UK",
    "Lloyds Bank",
    "NatWest",
    "Santander UK",
    "Nationwide",
    "Monzo Bank",
    "Starling Bank",
];

const MERCHANTS: &[&str] = &[
    "Tesco Stores",
    "Sainsbury's",
    "Boots",
    "Greggs",
    "Shell",
    "TfL Travel",
    "Amazon UK",
    "Argos",
    "Costa Coffee",
    "Marks & Spencer",
    "Waterstones",
    "Post Office",
];

const DEBIT_KINDS: &[&str] = &[
    "Card Purchase",
    "Direct Debit",
    "Standing Order",
    "ATM Withdrawal",
    "Faster Payment",
];

const CREDIT_KINDS: &[&str] = &["BACS Credit", "Faster Payment", "Transfer In", "Refund"];

const PAYMENT_TERMS_DAYS: &[i64] = &[14, 30, 45, 60];

enum ItemPool {
    InvoiceLines,
    ReceiptLines,
}

/// Produces randomized raw field values with plausible ranges per document
/// type.
///
/// Purely a source of unvalidated inputs: quantities and unit amounts are
/// always strictly positive and entry counts fall within the configured
/// bounds, but no derived field is computed here. Identical seed and
/// configuration yield an identical raw-field stream.
pub struct EntityGenerator<'a> {
    config: &'a BatchConfig,
    rng: ChaCha8Rng,
}

impl<'a> EntityGenerator<'a> {
    /// Builds a generator over one document's seeded stream.
    pub fn new(config: &'a BatchConfig, rng: ChaCha8Rng) -> Self {
        Self { config, rng }
    }

    /// Mutable access to the underlying stream, for draws that belong to
    /// the same document but happen outside this generator (the document
    /// id, drawn by the assembler).
    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Draws raw invoice fields.
    pub fn draw_invoice(&mut self) -> Result<RawInvoice, RetryExhausted> {
        let issued_on = self.date_within_last_year();
        let terms = PAYMENT_TERMS_DAYS[self.rng.gen_range(0..PAYMENT_TERMS_DAYS.len())];
        let bounds = self.config.invoice_items;
        let count = self.rng.gen_range(bounds.min..=bounds.max);
        Ok(RawInvoice {
            number: self.invoice_number(),
            issued_on,
            due_on: issued_on + Duration::days(terms),
            sender: Party {
                name: self.company_name(),
                address: self.address_line(),
            },
            recipient: Party {
                name: self.person_name(),
                address: self.address_line(),
            },
            items: self.draw_items(count, ItemPool::InvoiceLines)?,
            tax_rate: self.tax_rate(),
        })
    }

    /// Draws raw receipt fields.
    pub fn draw_receipt(&mut self) -> Result<RawReceipt, RetryExhausted> {
        let bounds = self.config.receipt_items;
        let count = self.rng.gen_range(bounds.min..=bounds.max);
        let date = self.date_within_last_year();
        let time = chrono::NaiveTime::from_hms_opt(
            self.rng.gen_range(8..22),
            self.rng.gen_range(0..60),
            self.rng.gen_range(0..60),
        )
        .expect("drawn time components in range");
        let payment = if self.rng.gen_bool(0.7) {
            PaymentMethod::Card {
                last4: self.digits(4),
            }
        } else {
            PaymentMethod::Cash
        };
        Ok(RawReceipt {
            number: format!("RCP-{}", self.digits(8)),
            issued_at: date.and_time(time),
            store: StoreInfo {
                name: STORES[self.rng.gen_range(0..STORES.len())].to_string(),
                address: self.address_line(),
                vat_number: format!("GB{}", self.digits(9)),
            },
            payment,
            items: self.draw_items(count, ItemPool::ReceiptLines)?,
            tax_rate: self.tax_rate(),
        })
    }

    /// Draws raw statement fields with transactions in ascending date order.
    pub fn draw_statement(&mut self) -> Result<RawStatement, RetryExhausted> {
        let bounds = self.config.statement_transactions;
        let count = self.rng.gen_range(bounds.min..=bounds.max);
        let period_end = self.date_within_last_year();
        let period_start = period_end - Duration::days(self.rng.gen_range(28..=92));
        let span = (period_end - period_start).num_days();

        let mut offsets: Vec<i64> = (0..count).map(|_| self.rng.gen_range(0..=span)).collect();
        offsets.sort_unstable();

        let transactions = offsets
            .into_iter()
            .map(|offset| self.transaction_on(period_start + Duration::days(offset)))
            .collect();

        Ok(RawStatement {
            bank: BankInfo {
                bank_name: BANKS[self.rng.gen_range(0..BANKS.len())].to_string(),
                account_holder: self.person_name(),
                account_number: AccountNumber::new(self.digits(8)),
                sort_code: SortCode::new(format!(
                    "{}-{}-{}",
                    self.digits(2),
                    self.digits(2),
                    self.digits(2)
                )),
            },
            period_start,
            period_end,
            opening_balance: self.money(-500_00, 10_000_00),
            transactions,
        })
    }

    fn draw_items(
        &mut self,
        count: usize,
        pool: ItemPool,
    ) -> Result<Vec<RawItem>, RetryExhausted> {
        let mut items = Vec::with_capacity(count);
        let mut seen = HashSet::new();
        for _ in 0..count {
            let mut attempts = 0;
            let item = loop {
                let candidate = match pool {
                    ItemPool::InvoiceLines => self.invoice_item(),
                    ItemPool::ReceiptLines => self.receipt_item(),
                };
                if seen.insert(candidate.description.clone()) {
                    break candidate;
                }
                attempts += 1;
                if attempts >= MAX_DRAW_RETRIES {
                    return Err(RetryExhausted {
                        constraint: "unique line item description",
                    });
                }
            };
            items.push(item);
        }
        Ok(items)
    }

    fn invoice_item(&mut self) -> RawItem {
        if self.rng.gen_bool(0.5) {
            // Services bill whole units at day-rate prices.
            RawItem {
                description: format!(
                    "{} - {}",
                    SERVICES[self.rng.gen_range(0..SERVICES.len())],
                    MONTHS[self.rng.gen_range(0..MONTHS.len())]
                ),
                quantity: Decimal::from(self.rng.gen_range(1..=20)),
                unit_price: self.money(75_00, 500_00),
            }
        } else {
            // Goods allow fractional quantities to one decimal place.
            RawItem {
                description: PRODUCTS[self.rng.gen_range(0..PRODUCTS.len())].to_string(),
                quantity: Decimal::new(self.rng.gen_range(10..=100), 1),
                unit_price: self.money(25_00, 350_00),
            }
        }
    }

    fn receipt_item(&mut self) -> RawItem {
        RawItem {
            description: GROCERY_ITEMS[self.rng.gen_range(0..GROCERY_ITEMS.len())].to_string(),
            quantity: Decimal::from(self.rng.gen_range(1..=5)),
            unit_price: self.money(40, 12_00),
        }
    }

    fn transaction_on(&mut self, posted_on: NaiveDate) -> Transaction {
        if self.rng.gen_bool(0.7) {
            Transaction {
                posted_on,
                description: format!(
                    "{} - {}",
                    DEBIT_KINDS[self.rng.gen_range(0..DEBIT_KINDS.len())],
                    MERCHANTS[self.rng.gen_range(0..MERCHANTS.len())]
                ),
                direction: Direction::Debit,
                amount: self.money(5_00, 400_00),
            }
        } else if self.rng.gen_bool(0.2) {
            Transaction {
                posted_on,
                description: format!("Salary - {}", self.company_name()),
                direction: Direction::Credit,
                amount: self.money(1_500_00, 3_500_00),
            }
        } else {
            Transaction {
                posted_on,
                description: format!(
                    "{} - {}",
                    CREDIT_KINDS[self.rng.gen_range(0..CREDIT_KINDS.len())],
                    self.person_name()
                ),
                direction: Direction::Credit,
                amount: self.money(10_00, 1_000_00),
            }
        }
    }

    fn tax_rate(&mut self) -> Decimal {
        self.config.tax_rates[self.rng.gen_range(0..self.config.tax_rates.len())]
    }

    /// Draws an exact minor-unit amount within `[min, max]` (both in
    /// minor units), so raw values carry no float artifacts.
    fn money(&mut self, min: i64, max: i64) -> Decimal {
        Decimal::new(self.rng.gen_range(min..=max), 2)
    }

    fn date_within_last_year(&mut self) -> NaiveDate {
        self.config.reference_date - Duration::days(self.rng.gen_range(0..=365))
    }

    fn invoice_number(&mut self) -> String {
        const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
        let suffix: String = (0..4)
            .map(|_| ALNUM[self.rng.gen_range(0..ALNUM.len())] as char)
            .collect();
        format!("INV-{}-{}", self.digits(4), suffix)
    }

    fn digits(&mut self, count: usize) -> String {
        (0..count)
            .map(|_| char::from(b'0' + self.rng.gen_range(0..10u8)))
            .collect()
    }

    fn company_name(&mut self) -> String {
        format!(
            "{} {}",
            COMPANY_STEMS[self.rng.gen_range(0..COMPANY_STEMS.len())],
            COMPANY_SUFFIXES[self.rng.gen_range(0..COMPANY_SUFFIXES.len())]
        )
    }

    fn person_name(&mut self) -> String {
        format!(
            "{} {}",
            FIRST_NAMES[self.rng.gen_range(0..FIRST_NAMES.len())],
            LAST_NAMES[self.rng.gen_range(0..LAST_NAMES.len())]
        )
    }

    fn address_line(&mut self) -> String {
        format!(
            "{} {}, {}, {}{} {}{}{}",
            self.rng.gen_range(1..200),
            STREETS[self.rng.gen_range(0..STREETS.len())],
            CITIES[self.rng.gen_range(0..CITIES.len())],
            char::from(b'A' + self.rng.gen_range(0..26u8)),
            self.rng.gen_range(1..30),
            self.rng.gen_range(1..10),
            char::from(b'A' + self.rng.gen_range(0..26u8)),
            char::from(b'A' + self.rng.gen_range(0..26u8)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed::rng_for_seed;
    use docforge_model::EntryAmount;

    fn config() -> BatchConfig {
        BatchConfig {
            invoices: 1,
            receipts: 1,
            statements: 1,
            ..BatchConfig::default()
        }
    }

    #[test]
    fn raw_values_are_strictly_positive_and_bounded() {
        let config = config();
        let mut gen = EntityGenerator::new(&config, rng_for_seed(7));
        for _ in 0..50 {
            let raw = gen.draw_invoice().unwrap();
            assert!(raw.items.len() >= config.invoice_items.min);
            assert!(raw.items.len() <= config.invoice_items.max);
            for item in &raw.items {
                assert!(item.quantity > Decimal::ZERO);
                assert!(item.unit_price > Decimal::ZERO);
            }
            assert!(raw.due_on > raw.issued_on);
        }
    }

    #[test]
    fn identical_seed_reproduces_the_raw_stream() {
        let config = config();
        let mut a = EntityGenerator::new(&config, rng_for_seed(99));
        let mut b = EntityGenerator::new(&config, rng_for_seed(99));
        assert_eq!(a.draw_invoice().unwrap(), b.draw_invoice().unwrap());
        assert_eq!(a.draw_receipt().unwrap(), b.draw_receipt().unwrap());
        assert_eq!(a.draw_statement().unwrap(), b.draw_statement().unwrap());
    }

    #[test]
    fn statement_dates_ascend_within_the_period() {
        let config = config();
        let mut gen = EntityGenerator::new(&config, rng_for_seed(3));
        let raw = gen.draw_statement().unwrap();
        let mut previous = raw.period_start;
        for txn in &raw.transactions {
            assert!(txn.posted_on >= previous);
            assert!(txn.posted_on <= raw.period_end);
            assert!(txn.amount_is_consistent());
            previous = txn.posted_on;
        }
    }
}
