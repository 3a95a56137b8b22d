//! Tests for the token codec


pub(crate) const CURRENT_PRIVATE_PEM: &str = include_str!("../../../../tests/fixtures/keys/current_private.pem");
pub(crate) const CURRENT_PUBLIC_PEM: &str = include_str!("../../../../tests/fixtures/keys/current_public.pem");
pub(crate) const OTHER_PRIVATE_PEM: &str = include_str!("../../../../tests/fixtures/keys/other_private.pem");
pub(crate) const OTHER_PUBLIC_PEM: &str = include_str!("../../../../tests/fixtures/keys/other_public.pem");
