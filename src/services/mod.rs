// src/services/mod.rs
//
// Clients for the external collaborators (AI completion, payment gateway)
// and process-level monitoring.

pub mod gemini;
pub mod monitoring;
pub mod paystack;

pub use gemini::{AiError, CompletionModel, GeminiModel};
pub use paystack::{GatewayError, InitializeTransaction, PaymentGateway, PaystackGateway};
