//! Tests for the credential service
