pub mod groq_service;
pub mod ollama_service;
