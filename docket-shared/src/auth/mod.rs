/// Identity-claims handling
///
/// Docket does not authenticate anyone itself - the identity provider is
/// an external collaborator that issues short-lived HS256 access tokens.
/// This module validates those tokens and turns them into a per-request
/// identity; everything the engine then decides comes from its own store,
/// never from extra claims.
///
/// # Modules
///
/// - [`jwt`]: Claims shape and token validation
/// - [`middleware`]: Axum middleware inserting the request identity

pub mod jwt;
pub mod middleware;
