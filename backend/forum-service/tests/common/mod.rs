#![allow(dead_code)]

pub mod mock_identity_client;
pub mod postgres;
