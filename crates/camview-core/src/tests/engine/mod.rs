mod adapter;
mod engine_config;
