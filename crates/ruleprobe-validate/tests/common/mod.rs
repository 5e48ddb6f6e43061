//! Shared fixtures for the validation integration tests.

#![allow(dead_code)]

use chrono::{Local, NaiveDate};
use ruleprobe_model::{Violation, property_model};
use ruleprobe_validate::{
    CallError, Validate, ValidationAssert, ValidatorOptions, ensure_valid, nested,
};

pub const SEED: u64 = 7;

/// Assert entry point with a fixed seed and default policy.
pub fn seeded() -> ValidationAssert {
    ValidationAssert::with_options(ValidatorOptions::default().with_seed(SEED))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Address {
    pub street: String,
    pub zip: Option<String>,
}

property_model!(Address {
    #[not_blank]
    street,
    #[nullable]
    zip,
});

impl Validate for Address {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.street.trim().is_empty() {
            violations.push(Violation::new("street", "must not be blank"));
        }
        violations
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
    pub name: String,
    pub age: i32,
    pub email: Option<String>,
    pub tags: Vec<String>,
    pub address: Address,
    pub nickname: Option<String>,
}

property_model!(Customer {
    #[not_blank]
    name,
    #[min]
    #[max]
    age,
    #[nullable]
    email,
    #[size]
    tags,
    #[valid]
    address,
    nickname,
});

impl Validate for Customer {
    fn validate(&self) -> Vec<Violation> {
        let mut violations = Vec::new();
        if self.name.trim().is_empty() {
            violations.push(Violation::new("name", "must not be blank"));
        }
        if self.age < 18 {
            violations.push(Violation::new("age", "must be greater than or equal to 18"));
        }
        if self.age > 120 {
            violations.push(Violation::new("age", "must be less than or equal to 120"));
        }
        if self.tags.is_empty() || self.tags.len() > 3 {
            violations.push(Violation::new("tags", "size must be between 1 and 3"));
        }
        violations.extend(nested("address", self.address.validate()));
        violations
    }
}

pub fn customer() -> Customer {
    Customer {
        name: "Ada".to_string(),
        age: 36,
        email: None,
        tags: vec!["vip".to_string()],
        address: Address {
            street: "Main Street 1".to_string(),
            zip: None,
        },
        nickname: None,
    }
}

/// A method that validates its argument on entry.
pub fn create(customer: Customer) -> Result<(), CallError> {
    ensure_valid("create", &customer)?;
    Ok(())
}

/// Same as [`create`] with a leading identifier.
pub fn update(_id: u64, customer: Customer) -> Result<(), CallError> {
    ensure_valid("update", &customer)?;
    Ok(())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Money {
    pub cents: i64,
}

property_model!(Money { cents });

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
    pub due: NaiveDate,
    pub total: Money,
    pub memo: Option<String>,
}

property_model!(Invoice {
    #[future]
    due,
    total,
    #[source_only(nullable)]
    memo,
});

impl Validate for Invoice {
    fn validate(&self) -> Vec<Violation> {
        if self.due <= Local::now().date_naive() {
            vec![Violation::new("due", "must be a future date")]
        } else {
            Vec::new()
        }
    }
}

pub fn invoice() -> Invoice {
    Invoice {
        due: Local::now().date_naive() + chrono::Days::new(30),
        total: Money { cents: 1_000 },
        memo: None,
    }
}
