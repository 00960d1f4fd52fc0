//! Parsing totalistic Life-like rule strings.

use super::Rule;
use crate::error::Error;
use ca_rules::ParseLife;
use std::str::FromStr;

/// The birth and survival conditions of a parsed rule string.
struct BsConditions {
    b: Vec<u8>,
    s: Vec<u8>,
}

/// A parser for the rule.
impl ParseLife for BsConditions {
    fn from_bs(mut b: Vec<u8>, mut s: Vec<u8>) -> Self {
        b.sort_unstable();
        b.dedup();
        s.sort_unstable();
        s.dedup();
        BsConditions { b, s }
    }
}

impl FromStr for Rule {
    type Err = Error;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let BsConditions { b, s } = BsConditions::parse_rule(input)?;
        [Rule::Standard]
            .into_iter()
            .find(|rule| rule.birth() == b.as_slice() && rule.survival() == s.as_slice())
            .ok_or_else(|| Error::UnsupportedRule(input.to_string()))
    }
}
