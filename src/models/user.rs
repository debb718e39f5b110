// src/models/user.rs

//! End user and the address derived from their input.

use serde::{Deserialize, Serialize};

use crate::models::{Address, City};

/// A subscriber with one free-text address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub city: City,
    pub raw_address: String,

    /// Derived once from `raw_address`; `house` may be `None`
    pub address: Address,
}

impl User {
    pub fn new(id: i64, city: City, raw_address: impl Into<String>) -> Self {
        let raw_address = raw_address.into();
        let address = Address::from_raw(city, &raw_address);
        Self {
            id,
            city,
            raw_address,
            address,
        }
    }
}
