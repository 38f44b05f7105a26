pub mod asserted_identity;
