pub mod chatbot;
pub mod decoding;
pub mod generator;
pub mod inference_client;
pub mod metrics_manager;
pub mod sentiment;
