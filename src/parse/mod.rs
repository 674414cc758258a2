//! Parsers voor invoerbestanden.

pub mod dmp;
