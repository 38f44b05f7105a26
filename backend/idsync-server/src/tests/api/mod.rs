mod asserted_identity;
mod error;
