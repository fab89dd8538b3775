mod arbitrary;
mod filter;
mod property_multivalue;
pub(crate) mod utils;
