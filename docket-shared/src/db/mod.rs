/// Database layer
///
/// - `pool`: PostgreSQL connection pool construction and health checks
/// - `migrations`: embedded schema migrations, including the row-security
///   policies that mirror the visibility predicates at the store boundary

pub mod migrations;
pub mod pool;
