//! JSON test vector loader for contact validation tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::fs;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct ContactVector {
    pub description: String,
    pub body: String,
    #[serde(default)]
    pub expect: Option<ExpectContact>,
    #[serde(default)]
    pub expect_error: Option<ExpectError>,
}

#[derive(Debug, Deserialize)]
pub struct ExpectContact {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct ExpectError {
    pub code: String,
    pub message: String,
}

pub fn load(name: &str) -> Vec<ContactVector> {
    let s = fs::read_to_string(format!("tests/vectors/{name}")).unwrap();
    serde_json::from_str(&s).expect("invalid test vector file")
}
