mod table_store_tests;
mod timeout_tests;
