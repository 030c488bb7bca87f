//! Coach advice adapters. Implement AdvicePort for LLM integration.
//!
//! Provides an OpenAI-compatible adapter and a mock adapter for offline use and testing.

pub mod csv_utils;
pub mod mock_adapter;
pub mod openai_adapter;

pub use csv_utils::history_to_csv;
pub use mock_adapter::MockAdviceAdapter;
pub use openai_adapter::OpenAiAdviceAdapter;
